use serde::{Deserialize, Serialize};

/// Drift between extracted values and their expected or self-consistent form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiscrepancyKind {
    AmountMismatch,
    MissingComponent,
    ExtraComponent,
    CalculationError,
    RoundingIssue,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum DiscrepancySeverity {
    Low,
    Medium,
    High,
    Critical,
}

/// A detected inconsistency, prior to any fix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconciliationDiscrepancy {
    pub component: String,
    pub extracted_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_value: Option<f64>,
    pub kind: DiscrepancyKind,
    pub severity: DiscrepancySeverity,
    pub explanation: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    Correction,
    Addition,
    Removal,
    Consolidation,
}

/// Advisory proposed fix. Never applied automatically; surfaced to the
/// caller for human or downstream review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconciliationSuggestion {
    pub kind: SuggestionKind,
    pub component: String,
    pub suggested_value: f64,
    pub confidence: f64,
    pub explanation: String,
}

/// An automatically decided fix that is actually merged back into a
/// component map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconciliationCorrection {
    pub component: String,
    pub original_value: f64,
    pub corrected_value: f64,
    pub reason: String,
    pub confidence: f64,
}
