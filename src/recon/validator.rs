use crate::confidence::{clamp01, quality_score};
use crate::domain::{component_sum, ReconciliationValidation, Totals};

/// Absolute net drift beyond which the correction pass is considered to
/// have changed the document's meaning.
pub const NET_DRIFT_TOLERANCE: f64 = 1.0;

/// Structural self-check over a correction pass.
///
/// This is not a re-run of the business rules; it exists to catch
/// corruption introduced by the correction step itself (sign flips, broken
/// additive consistency, outsized net change).
pub struct ReconciliationValidator;

impl ReconciliationValidator {
    pub fn validate(&self, original: &Totals, corrected: &Totals) -> ReconciliationValidation {
        let mut confidence: f64 = 0.9;
        let mut issues: Vec<String> = Vec::new();

        if (original.net_amount - corrected.net_amount).abs() > NET_DRIFT_TOLERANCE {
            issues.push("Net amount changed significantly".to_string());
            confidence -= 0.2;
        }

        if corrected.net_amount < 0.0 && original.net_amount >= 0.0 {
            issues.push("Reconciliation introduced negative net amount".to_string());
            confidence -= 0.3;
        }

        let calculated_net = component_sum(&corrected.credits) - component_sum(&corrected.debits);
        if (calculated_net - corrected.net_amount).abs() > NET_DRIFT_TOLERANCE {
            issues.push("Inconsistent credit/debit totals after reconciliation".to_string());
            confidence -= 0.4;
        }

        let quality = quality_score(confidence, issues.len());
        ReconciliationValidation {
            is_valid: issues.is_empty(),
            confidence: clamp01(confidence),
            quality_score: quality,
            issues,
        }
    }
}
