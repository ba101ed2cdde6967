use crate::confidence::applied_correction_confidence;
use crate::domain::{
    fractional_drift, ComponentMap, DiscrepancyKind, DiscrepancySeverity, ReconciliationContext,
    ReconciliationCorrection, ReconciliationDiscrepancy, Totals,
};

use super::analyzer::ROUNDING_DRIFT_THRESHOLD;

/// Relative error below which a medium-severity total mismatch may be
/// aligned without confirmation.
pub const SAFE_MISMATCH_RATIO: f64 = 0.10;

const ROUNDING_CORRECTION_CONFIDENCE: f64 = 0.8;
const MISMATCH_CORRECTION_CONFIDENCE: f64 = 0.7;

/// Decides which discrepancies are safe to fix without human confirmation.
///
/// Deliberately stricter than [`super::SuggestionGenerator`]: high-severity
/// mismatches are never auto-corrected, and no other discrepancy kind is
/// touched at all.
pub struct CorrectionGenerator;

impl CorrectionGenerator {
    pub fn generate(
        &self,
        discrepancies: &[ReconciliationDiscrepancy],
        context: &ReconciliationContext,
    ) -> Vec<ReconciliationCorrection> {
        let corrections: Vec<ReconciliationCorrection> = discrepancies
            .iter()
            .filter_map(Self::correct)
            .collect();
        tracing::debug!(
            format = ?context.format,
            candidates = discrepancies.len(),
            accepted = corrections.len(),
            "auto-correction policy applied"
        );
        corrections
    }

    fn correct(discrepancy: &ReconciliationDiscrepancy) -> Option<ReconciliationCorrection> {
        match discrepancy.kind {
            DiscrepancyKind::RoundingIssue => {
                if fractional_drift(discrepancy.extracted_value) < ROUNDING_DRIFT_THRESHOLD {
                    return None;
                }
                Some(ReconciliationCorrection {
                    component: discrepancy.component.clone(),
                    original_value: discrepancy.extracted_value,
                    corrected_value: discrepancy.extracted_value.round(),
                    reason: "Applied standard rounding".to_string(),
                    confidence: ROUNDING_CORRECTION_CONFIDENCE,
                })
            }
            DiscrepancyKind::AmountMismatch => {
                let expected = discrepancy.expected_value?;
                let safe = match discrepancy.severity {
                    DiscrepancySeverity::Low => true,
                    DiscrepancySeverity::Medium => {
                        let ratio =
                            (discrepancy.extracted_value - expected).abs() / expected.abs();
                        ratio < SAFE_MISMATCH_RATIO
                    }
                    DiscrepancySeverity::High | DiscrepancySeverity::Critical => false,
                };
                if !safe {
                    return None;
                }
                Some(ReconciliationCorrection {
                    component: discrepancy.component.clone(),
                    original_value: discrepancy.extracted_value,
                    corrected_value: expected,
                    reason: "Aligned with expected total".to_string(),
                    confidence: MISMATCH_CORRECTION_CONFIDENCE,
                })
            }
            DiscrepancyKind::MissingComponent
            | DiscrepancyKind::ExtraComponent
            | DiscrepancyKind::CalculationError => None,
        }
    }

    /// Merges accepted corrections back into the credit/debit maps.
    ///
    /// The correction's key decides which map it patches; a key absent from
    /// both maps is dropped. The result's confidence is the mean over
    /// corrections that actually patched a map, or 1.0 when none did.
    pub fn apply(
        &self,
        credits: &ComponentMap,
        debits: &ComponentMap,
        corrections: &[ReconciliationCorrection],
    ) -> Totals {
        let mut credits = credits.clone();
        let mut debits = debits.clone();
        let mut applied = Vec::new();
        for correction in corrections {
            if let Some(slot) = credits.get_mut(&correction.component) {
                *slot = correction.corrected_value;
                applied.push(correction.confidence);
            } else if let Some(slot) = debits.get_mut(&correction.component) {
                *slot = correction.corrected_value;
                applied.push(correction.confidence);
            } else {
                tracing::debug!(
                    component = %correction.component,
                    "correction targets a component absent from both maps; dropped"
                );
            }
        }
        let confidence = applied_correction_confidence(&applied);
        Totals::from_maps(credits, debits).with_confidence(confidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DocumentFormat;

    fn context() -> ReconciliationContext {
        ReconciliationContext {
            format: DocumentFormat::Unknown,
            has_expected_totals: true,
            component_count: 1,
            total_amount: 1_000.0,
        }
    }

    fn mismatch(severity: DiscrepancySeverity, extracted: f64, expected: f64) -> ReconciliationDiscrepancy {
        ReconciliationDiscrepancy {
            component: "TOTAL_CREDITS".into(),
            extracted_value: extracted,
            expected_value: Some(expected),
            kind: DiscrepancyKind::AmountMismatch,
            severity,
            explanation: String::new(),
        }
    }

    fn map(entries: &[(&str, f64)]) -> ComponentMap {
        entries
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect()
    }

    #[test]
    fn high_severity_mismatch_is_never_corrected() {
        let found = CorrectionGenerator.generate(
            &[mismatch(DiscrepancySeverity::High, 1_000.0, 1_200.0)],
            &context(),
        );
        assert!(found.is_empty());
    }

    #[test]
    fn medium_mismatch_within_safe_ratio_is_corrected() {
        let found = CorrectionGenerator.generate(
            &[mismatch(DiscrepancySeverity::Medium, 1_000.0, 1_050.0)],
            &context(),
        );
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].corrected_value, 1_050.0);
        assert_eq!(found[0].reason, "Aligned with expected total");
        assert_eq!(found[0].confidence, 0.7);
    }

    #[test]
    fn medium_mismatch_beyond_safe_ratio_is_skipped() {
        let found = CorrectionGenerator.generate(
            &[mismatch(DiscrepancySeverity::Medium, 1_000.0, 1_150.0)],
            &context(),
        );
        assert!(found.is_empty());
    }

    #[test]
    fn mismatch_against_zero_expected_is_skipped() {
        let found = CorrectionGenerator.generate(
            &[mismatch(DiscrepancySeverity::Medium, 5.0, 0.0)],
            &context(),
        );
        assert!(found.is_empty());
    }

    #[test]
    fn rounding_issue_is_corrected() {
        let discrepancy = ReconciliationDiscrepancy {
            component: "BASIC_PAY".into(),
            extracted_value: 50_000.6,
            expected_value: Some(50_001.0),
            kind: DiscrepancyKind::RoundingIssue,
            severity: DiscrepancySeverity::Low,
            explanation: String::new(),
        };
        let found = CorrectionGenerator.generate(&[discrepancy], &context());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].corrected_value, 50_001.0);
        assert_eq!(found[0].reason, "Applied standard rounding");
        assert_eq!(found[0].confidence, 0.8);
    }

    #[test]
    fn other_kinds_are_never_corrected() {
        for kind in [
            DiscrepancyKind::MissingComponent,
            DiscrepancyKind::ExtraComponent,
            DiscrepancyKind::CalculationError,
        ] {
            let discrepancy = ReconciliationDiscrepancy {
                component: "DA".into(),
                extracted_value: 100.0,
                expected_value: Some(200.0),
                kind,
                severity: DiscrepancySeverity::Medium,
                explanation: String::new(),
            };
            assert!(CorrectionGenerator.generate(&[discrepancy], &context()).is_empty());
        }
    }

    #[test]
    fn apply_patches_the_owning_map() {
        let credits = map(&[("BASIC_PAY", 50_000.6)]);
        let debits = map(&[("AGIF", 5_000.0)]);
        let correction = ReconciliationCorrection {
            component: "BASIC_PAY".into(),
            original_value: 50_000.6,
            corrected_value: 50_001.0,
            reason: "Applied standard rounding".into(),
            confidence: 0.8,
        };
        let totals = CorrectionGenerator.apply(&credits, &debits, &[correction]);
        assert_eq!(totals.credits["BASIC_PAY"], 50_001.0);
        assert!((totals.net_amount - 45_001.0).abs() < 1e-9);
        assert_eq!(totals.confidence, Some(0.8));
    }

    #[test]
    fn apply_drops_corrections_for_unknown_keys() {
        let credits = map(&[("X", 1_000.0)]);
        let correction = ReconciliationCorrection {
            component: "TOTAL_CREDITS".into(),
            original_value: 1_000.0,
            corrected_value: 1_050.0,
            reason: "Aligned with expected total".into(),
            confidence: 0.7,
        };
        let totals = CorrectionGenerator.apply(&credits, &ComponentMap::new(), &[correction]);
        assert_eq!(totals.credits["X"], 1_000.0);
        assert!((totals.net_amount - 1_000.0).abs() < 1e-9);
        // Nothing was actually patched, so confidence is full.
        assert_eq!(totals.confidence, Some(1.0));
    }

    #[test]
    fn apply_with_no_corrections_is_identity() {
        let credits = map(&[("BASIC_PAY", 50_000.0)]);
        let debits = map(&[("AGIF", 5_000.0)]);
        let totals = CorrectionGenerator.apply(&credits, &debits, &[]);
        assert_eq!(totals.credits, credits);
        assert_eq!(totals.debits, debits);
        assert_eq!(totals.confidence, Some(1.0));

        // Idempotence: applying again to the output changes nothing.
        let again = CorrectionGenerator.apply(&totals.credits, &totals.debits, &[]);
        assert_eq!(again.credits, totals.credits);
        assert_eq!(again.net_amount, totals.net_amount);
    }
}
