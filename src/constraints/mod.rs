//! Fixed lookup tables for component-level validation: expected numeric
//! ranges keyed by component name and document format, the required-field
//! set, and the debit-side allowlist used to partition flat extraction maps.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::DocumentFormat;
use crate::errors::{PipelineStep, ReconError, ReconResult};

/// Fields every payslip extraction is expected to carry.
pub const REQUIRED_FIELDS: [&str; 3] = ["BASIC_PAY", "TOTAL_CREDITS", "TOTAL_DEBITS"];

/// Components that belong on the debit side of a flat extraction map;
/// everything else is treated as a credit.
pub const DEBIT_COMPONENTS: [&str; 4] = ["AGIF", "INCOME_TAX", "PROFESSIONAL_TAX", "NET_AMOUNT"];

/// Printed aggregates, excluded from both partition sums.
pub const AGGREGATE_COMPONENTS: [&str; 2] = ["TOTAL_CREDITS", "TOTAL_DEBITS"];

pub fn is_debit_component(name: &str) -> bool {
    DEBIT_COMPONENTS.contains(&name)
}

pub fn is_aggregate_component(name: &str) -> bool {
    AGGREGATE_COMPONENTS.contains(&name)
}

/// Components a format cannot plausibly omit; the analyzer reports absences
/// as missing-component discrepancies.
pub fn required_components(format: DocumentFormat) -> &'static [&'static str] {
    match format {
        DocumentFormat::Pcda => &["BASIC_PAY", "DA", "AGIF"],
        DocumentFormat::Military => &["BASIC_PAY", "AGIF"],
        DocumentFormat::Corporate | DocumentFormat::Unknown => &[],
    }
}

/// Closed plausible range for a component amount.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ComponentRange {
    pub min: f64,
    pub max: f64,
}

impl ComponentRange {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Ranges shared by every format.
const BASE_RANGES: [(&str, f64, f64); 10] = [
    ("BASIC_PAY", 10_000.0, 500_000.0),
    ("DA", 0.0, 300_000.0),
    ("HRA", 0.0, 100_000.0),
    ("AGIF", 0.0, 10_000.0),
    ("INCOME_TAX", 0.0, 150_000.0),
    ("PROFESSIONAL_TAX", 0.0, 2_500.0),
    ("TOTAL_CREDITS", 10_000.0, 1_000_000.0),
    ("TOTAL_DEBITS", 0.0, 500_000.0),
    ("NET_AMOUNT", 0.0, 1_000_000.0),
    ("ARREARS", 0.0, 200_000.0),
];

/// Service-pay extras only defence formats carry.
const SERVICE_RANGES: [(&str, f64, f64); 3] = [
    ("MSP", 0.0, 15_500.0),
    ("DSOP", 0.0, 40_000.0),
    ("TPTA", 0.0, 8_000.0),
];

static STANDARD_TABLE: Lazy<ConstraintTable> = Lazy::new(ConstraintTable::build_standard);

/// Expected-range table keyed by `(format, component)`.
///
/// Resolved once at process start and threaded through validator
/// constructors; never a mutable global.
#[derive(Debug, Clone)]
pub struct ConstraintTable {
    ranges: HashMap<(DocumentFormat, String), ComponentRange>,
}

impl ConstraintTable {
    /// Builds a table from caller-supplied entries, rejecting malformed
    /// ranges (non-finite bounds or `min > max`).
    pub fn from_entries(
        entries: impl IntoIterator<Item = (DocumentFormat, String, ComponentRange)>,
    ) -> ReconResult<Self> {
        let mut ranges = HashMap::new();
        for (format, component, range) in entries {
            if !range.min.is_finite() || !range.max.is_finite() {
                return Err(ReconError::failure(
                    PipelineStep::ConstraintValidation,
                    component,
                    "constraint range bound is not finite",
                ));
            }
            if range.min > range.max {
                return Err(ReconError::failure(
                    PipelineStep::ConstraintValidation,
                    component,
                    format!("constraint range is inverted ({} > {})", range.min, range.max),
                ));
            }
            ranges.insert((format, component), range);
        }
        Ok(Self { ranges })
    }

    /// The built-in table for all supported formats.
    pub fn standard() -> Self {
        STANDARD_TABLE.clone()
    }

    pub fn range_for(&self, format: DocumentFormat, component: &str) -> Option<ComponentRange> {
        self.ranges.get(&(format, component.to_string())).copied()
    }

    fn build_standard() -> Self {
        let formats = [
            DocumentFormat::Pcda,
            DocumentFormat::Military,
            DocumentFormat::Corporate,
            DocumentFormat::Unknown,
        ];
        let mut ranges = HashMap::new();
        for format in formats {
            for (component, min, max) in BASE_RANGES {
                ranges.insert((format, component.to_string()), ComponentRange { min, max });
            }
        }
        for format in [DocumentFormat::Pcda, DocumentFormat::Military] {
            for (component, min, max) in SERVICE_RANGES {
                ranges.insert((format, component.to_string()), ComponentRange { min, max });
            }
        }
        Self { ranges }
    }
}
