use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::{ComponentMap, DocumentFormat};
use super::discrepancy::{
    ReconciliationCorrection, ReconciliationDiscrepancy, ReconciliationSuggestion,
};

/// Read-only summary of one reconciliation invocation, passed to the
/// suggestion and correction generators.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReconciliationContext {
    pub format: DocumentFormat,
    pub has_expected_totals: bool,
    pub component_count: usize,
    pub total_amount: f64,
}

/// Structural self-check outcome for a correction pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconciliationValidation {
    pub is_valid: bool,
    pub confidence: f64,
    pub quality_score: f64,
    pub issues: Vec<String>,
}

/// Terminal artifact of the reconciliation path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconciliationResult {
    pub id: Uuid,
    pub credits: ComponentMap,
    pub debits: ComponentMap,
    pub net_amount: f64,
    pub confidence: f64,
    pub corrections: Vec<ReconciliationCorrection>,
    pub unresolved_discrepancies: Vec<ReconciliationDiscrepancy>,
    pub suggestions: Vec<ReconciliationSuggestion>,
    pub validation: ReconciliationValidation,
    pub generated_at: DateTime<Utc>,
}
