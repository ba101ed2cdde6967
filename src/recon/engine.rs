use chrono::Utc;
use uuid::Uuid;

use crate::confidence::reconciliation_confidence;
use crate::domain::{
    component_sum, ComponentMap, DocumentFormat, ExpectedTotals, ReconciliationContext,
    ReconciliationResult, Totals,
};
use crate::errors::{PipelineStep, ReconError, ReconResult};

use super::analyzer::DiscrepancyAnalyzer;
use super::correction::CorrectionGenerator;
use super::suggestion::SuggestionGenerator;
use super::validator::ReconciliationValidator;

/// Composes the reconciliation pipeline: discrepancy analysis, suggestion
/// and correction generation, correction application, and the structural
/// self-check. Stateless and reentrant; every invocation builds its result
/// from scratch.
pub struct ReconciliationEngine {
    analyzer: DiscrepancyAnalyzer,
    suggestions: SuggestionGenerator,
    corrections: CorrectionGenerator,
    validator: ReconciliationValidator,
}

impl ReconciliationEngine {
    pub fn new() -> Self {
        Self {
            analyzer: DiscrepancyAnalyzer,
            suggestions: SuggestionGenerator,
            corrections: CorrectionGenerator,
            validator: ReconciliationValidator,
        }
    }

    pub fn reconcile(
        &self,
        credits: &ComponentMap,
        debits: &ComponentMap,
        expected: &ExpectedTotals,
        format: DocumentFormat,
    ) -> ReconResult<ReconciliationResult> {
        Self::screen_inputs(credits, debits, expected)?;

        let original = Totals::from_maps(credits.clone(), debits.clone());
        let context = ReconciliationContext {
            format,
            has_expected_totals: !expected.is_empty(),
            component_count: credits.len() + debits.len(),
            total_amount: component_sum(credits),
        };

        let discrepancies = self.analyzer.analyze(credits, debits, expected, format);
        let suggestions = self.suggestions.generate(&discrepancies, &context);
        let corrections = self.corrections.generate(&discrepancies, &context);
        let corrected = self.corrections.apply(credits, debits, &corrections);
        let validation = self.validator.validate(&original, &corrected);

        let unresolved_discrepancies: Vec<_> = discrepancies
            .iter()
            .filter(|discrepancy| {
                !corrections
                    .iter()
                    .any(|correction| correction.component == discrepancy.component)
            })
            .cloned()
            .collect();

        let confidence = reconciliation_confidence(
            original.net_amount,
            corrected.net_amount,
            unresolved_discrepancies.len(),
            corrections.len(),
        );

        tracing::debug!(
            discrepancies = discrepancies.len(),
            corrections = corrections.len(),
            unresolved = unresolved_discrepancies.len(),
            confidence,
            "reconciliation pass complete"
        );

        Ok(ReconciliationResult {
            id: Uuid::new_v4(),
            credits: corrected.credits,
            debits: corrected.debits,
            net_amount: corrected.net_amount,
            confidence,
            corrections,
            unresolved_discrepancies,
            suggestions,
            validation,
            generated_at: Utc::now(),
        })
    }

    /// Rejects non-finite amounts up front: a result derived from NaN can
    /// never be presented as reconciled.
    fn screen_inputs(
        credits: &ComponentMap,
        debits: &ComponentMap,
        expected: &ExpectedTotals,
    ) -> ReconResult<()> {
        for (component, value) in credits.iter().chain(debits.iter()) {
            if !value.is_finite() {
                return Err(ReconError::failure(
                    PipelineStep::InputScreening,
                    component.clone(),
                    format!("extracted amount {} is not finite", value),
                ));
            }
        }
        for (label, value) in [
            ("expected credits", expected.credits),
            ("expected debits", expected.debits),
            ("expected net", expected.net),
        ] {
            if let Some(value) = value {
                if !value.is_finite() {
                    return Err(ReconError::failure(
                        PipelineStep::InputScreening,
                        label,
                        "expected total is not finite",
                    ));
                }
            }
        }
        Ok(())
    }
}

impl Default for ReconciliationEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, f64)]) -> ComponentMap {
        entries
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect()
    }

    #[test]
    fn nan_credit_aborts_the_invocation() {
        let credits = map(&[("BASIC_PAY", f64::NAN)]);
        let err = ReconciliationEngine::new()
            .reconcile(
                &credits,
                &ComponentMap::new(),
                &ExpectedTotals::default(),
                DocumentFormat::Unknown,
            )
            .expect_err("NaN must abort");
        let message = format!("{err}");
        assert!(message.contains("BASIC_PAY"), "unexpected error: {message}");
        assert!(message.contains("input screening"));
    }

    #[test]
    fn infinite_expected_total_aborts_the_invocation() {
        let credits = map(&[("BASIC_PAY", 50_000.0)]);
        let result = ReconciliationEngine::new().reconcile(
            &credits,
            &ComponentMap::new(),
            &ExpectedTotals {
                credits: Some(f64::INFINITY),
                ..Default::default()
            },
            DocumentFormat::Unknown,
        );
        assert!(result.is_err());
    }

    #[test]
    fn unresolved_matching_is_by_component_name() {
        // A corrected rounding issue resolves its component; the high
        // mismatch on TOTAL_CREDITS stays unresolved.
        let credits = map(&[("BASIC_PAY", 50_000.6)]);
        let result = ReconciliationEngine::new()
            .reconcile(
                &credits,
                &ComponentMap::new(),
                &ExpectedTotals {
                    credits: Some(80_000.0),
                    ..Default::default()
                },
                DocumentFormat::Unknown,
            )
            .expect("reconcile");
        assert_eq!(result.corrections.len(), 1);
        assert_eq!(result.unresolved_discrepancies.len(), 1);
        assert_eq!(result.unresolved_discrepancies[0].component, "TOTAL_CREDITS");
    }
}
