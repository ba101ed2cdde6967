use crate::domain::{
    fractional_drift, DiscrepancyKind, ReconciliationContext, ReconciliationDiscrepancy,
    ReconciliationSuggestion, SuggestionKind,
};

use super::analyzer::ROUNDING_DRIFT_THRESHOLD;

const MISMATCH_SUGGESTION_CONFIDENCE: f64 = 0.8;
const ADDITION_SUGGESTION_CONFIDENCE: f64 = 0.6;
const ROUNDING_SUGGESTION_CONFIDENCE: f64 = 0.9;
const CALCULATION_SUGGESTION_CONFIDENCE: f64 = 0.7;
const REMOVAL_SUGGESTION_CONFIDENCE: f64 = 0.6;

/// Maps each discrepancy to zero or more advisory fixes. Suggestions never
/// touch the component maps; they are surfaced for human or downstream
/// review.
pub struct SuggestionGenerator;

impl SuggestionGenerator {
    pub fn generate(
        &self,
        discrepancies: &[ReconciliationDiscrepancy],
        context: &ReconciliationContext,
    ) -> Vec<ReconciliationSuggestion> {
        discrepancies
            .iter()
            .filter_map(|discrepancy| self.suggest(discrepancy, context))
            .collect()
    }

    fn suggest(
        &self,
        discrepancy: &ReconciliationDiscrepancy,
        context: &ReconciliationContext,
    ) -> Option<ReconciliationSuggestion> {
        match discrepancy.kind {
            DiscrepancyKind::AmountMismatch => {
                let expected = discrepancy.expected_value?;
                Some(ReconciliationSuggestion {
                    kind: SuggestionKind::Correction,
                    component: discrepancy.component.clone(),
                    suggested_value: expected,
                    confidence: MISMATCH_SUGGESTION_CONFIDENCE,
                    explanation: format!(
                        "replace {} with the expected total {}",
                        discrepancy.extracted_value, expected
                    ),
                })
            }
            DiscrepancyKind::MissingComponent => Some(ReconciliationSuggestion {
                kind: SuggestionKind::Addition,
                component: discrepancy.component.clone(),
                suggested_value: 0.0,
                confidence: ADDITION_SUGGESTION_CONFIDENCE,
                explanation: format!(
                    "add {} as a placeholder; {:?} payslips normally carry it",
                    discrepancy.component, context.format
                ),
            }),
            DiscrepancyKind::RoundingIssue => {
                if fractional_drift(discrepancy.extracted_value) < ROUNDING_DRIFT_THRESHOLD {
                    return None;
                }
                Some(ReconciliationSuggestion {
                    kind: SuggestionKind::Correction,
                    component: discrepancy.component.clone(),
                    suggested_value: discrepancy.extracted_value.round(),
                    confidence: ROUNDING_SUGGESTION_CONFIDENCE,
                    explanation: format!(
                        "round {} to {}",
                        discrepancy.extracted_value,
                        discrepancy.extracted_value.round()
                    ),
                })
            }
            DiscrepancyKind::CalculationError => {
                let target = discrepancy.expected_value.unwrap_or(0.0);
                Some(ReconciliationSuggestion {
                    kind: SuggestionKind::Correction,
                    component: discrepancy.component.clone(),
                    suggested_value: target,
                    confidence: CALCULATION_SUGGESTION_CONFIDENCE,
                    explanation: format!("recompute {} as {}", discrepancy.component, target),
                })
            }
            DiscrepancyKind::ExtraComponent => Some(ReconciliationSuggestion {
                kind: SuggestionKind::Removal,
                component: discrepancy.component.clone(),
                suggested_value: 0.0,
                confidence: REMOVAL_SUGGESTION_CONFIDENCE,
                explanation: format!(
                    "remove the duplicate {} entry",
                    discrepancy.component
                ),
            }),
        }
    }
}
