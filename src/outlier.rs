//! Interface to the external outlier-detection collaborator.
//!
//! The core treats the detector's output as an opaque payload merged
//! unmodified into the validation result; only the risk level is inspected
//! to surface advisory issues.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{ComponentMap, DocumentFormat};
use crate::errors::ReconResult;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

/// One statistically extreme component as reported by the collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlierFinding {
    pub value: f64,
    pub z_score: f64,
    pub risk_level: RiskLevel,
    pub expected_range: (f64, f64),
    pub explanation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlierDetectionResult {
    pub outliers: BTreeMap<String, OutlierFinding>,
    pub overall_risk: RiskLevel,
    pub confidence: f64,
}

/// Classifies statistical extremity of extracted amounts.
///
/// A failing detector call aborts the whole validation invocation; partial
/// results are never presented as validated.
pub trait OutlierDetector {
    fn detect_outliers(
        &self,
        amounts: &ComponentMap,
        format: DocumentFormat,
    ) -> ReconResult<OutlierDetectionResult>;
}
