use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::outlier::OutlierDetectionResult;

/// Data-shape violations found on the stand-alone validation path.
///
/// This taxonomy is distinct from [`super::discrepancy::DiscrepancyKind`]:
/// issues describe violations of a single document's shape, discrepancies
/// describe drift between extracted and expected totals. The two are never
/// merged.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    AmountMismatch,
    OutlierValue,
    MissingComponent,
    InvalidFormat,
    ConstraintViolation,
    CrossReferenceFailure,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    Critical,
    Warning,
    Info,
}

/// A single validation finding. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialValidationIssue {
    pub kind: IssueKind,
    pub severity: IssueSeverity,
    pub component: String,
    pub extracted_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_value: Option<f64>,
    pub message: String,
    pub confidence: f64,
}

/// Terminal artifact of the validation path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialValidationResult {
    pub id: Uuid,
    pub is_valid: bool,
    pub confidence: f64,
    pub issues: Vec<FinancialValidationIssue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outlier_analysis: Option<OutlierDetectionResult>,
    pub reconciliation_suggestions: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

impl FinancialValidationResult {
    pub fn critical_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Critical)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Warning)
            .count()
    }
}
