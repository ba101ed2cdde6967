use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Named monetary components keyed by their case-sensitive field name.
///
/// The key is the component's identity everywhere in the pipeline; a sorted
/// map keeps issue and discrepancy emission order deterministic.
pub type ComponentMap = BTreeMap<String, f64>;

/// Source layout of the scanned payslip, used only as a key into the
/// constraint-range and required-component tables.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    Pcda,
    Military,
    Corporate,
    Unknown,
}

impl Default for DocumentFormat {
    fn default() -> Self {
        DocumentFormat::Unknown
    }
}

/// Sum of all component amounts in a map.
pub fn component_sum(map: &ComponentMap) -> f64 {
    map.values().sum()
}

/// Distance of a value from its integer part.
///
/// `1000.49` drifts `0.49`, `1000.50` drifts `0.50`; a drift of `0.50` or
/// more marks the value as carrying suspicious sub-unit noise.
pub fn fractional_drift(value: f64) -> f64 {
    (value - value.trunc()).abs()
}
