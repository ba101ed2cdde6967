//! Confidence formulas, one pure function per pipeline stage.
//!
//! Each clamp and weight lives here so it can be verified independently of
//! the orchestrators that blend them.

/// Clamps a score into the `[0, 1]` confidence range.
pub fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Validation-path confidence: each critical issue costs 0.3, each warning
/// 0.1, while data completeness and amount reasonableness each add back up
/// to 0.1.
pub fn validation_confidence(
    critical_count: usize,
    warning_count: usize,
    completeness: f64,
    reasonableness: f64,
) -> f64 {
    clamp01(
        1.0 - 0.3 * critical_count as f64 - 0.1 * warning_count as f64
            + 0.1 * completeness
            + 0.1 * reasonableness,
    )
}

/// Mean confidence over the corrections that actually patched a map.
///
/// An empty slice means nothing needed fixing, which is full confidence,
/// not zero.
pub fn applied_correction_confidence(confidences: &[f64]) -> f64 {
    if confidences.is_empty() {
        return 1.0;
    }
    clamp01(confidences.iter().sum::<f64>() / confidences.len() as f64)
}

/// Post-correction confidence for the whole reconciliation: large net swings
/// and unresolved discrepancies subtract, applied corrections add back a
/// little.
pub fn reconciliation_confidence(
    original_net: f64,
    corrected_net: f64,
    unresolved_count: usize,
    correction_count: usize,
) -> f64 {
    let net_change_ratio = (corrected_net - original_net).abs() / original_net.abs().max(1.0);
    clamp01(
        0.8 - 0.3 * net_change_ratio - 0.1 * unresolved_count as f64
            + 0.05 * correction_count as f64,
    )
}

/// Quality score for the structural self-check: the running confidence
/// discounted 10% per recorded issue.
pub fn quality_score(confidence: f64, issue_count: usize) -> f64 {
    clamp01(confidence * (1.0 - 0.1 * issue_count as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp01_bounds_both_ends() {
        assert_eq!(clamp01(-3.0), 0.0);
        assert_eq!(clamp01(1.5), 1.0);
        assert_eq!(clamp01(0.42), 0.42);
    }

    #[test]
    fn validation_confidence_penalizes_criticals_hardest() {
        let clean = validation_confidence(0, 0, 1.0, 1.0);
        assert!((clean - 1.0).abs() < 1e-9);
        let one_critical = validation_confidence(1, 0, 1.0, 1.0);
        assert!((one_critical - 0.9).abs() < 1e-9);
        let swamped = validation_confidence(10, 10, 0.0, 0.0);
        assert_eq!(swamped, 0.0);
    }

    #[test]
    fn applied_correction_confidence_defaults_to_full() {
        assert_eq!(applied_correction_confidence(&[]), 1.0);
        let mean = applied_correction_confidence(&[0.8, 0.6]);
        assert!((mean - 0.7).abs() < 1e-9);
    }

    #[test]
    fn reconciliation_confidence_uses_unit_floor_for_tiny_nets() {
        // |original| < 1.0 must not inflate the ratio via a tiny divisor.
        let score = reconciliation_confidence(0.2, 0.4, 0, 0);
        assert!((score - (0.8 - 0.3 * 0.2)).abs() < 1e-9);
    }

    #[test]
    fn reconciliation_confidence_stays_in_unit_interval() {
        assert_eq!(reconciliation_confidence(1.0, 1_000_000.0, 50, 0), 0.0);
        assert!(reconciliation_confidence(100.0, 100.0, 0, 100) <= 1.0);
    }

    #[test]
    fn quality_score_discounts_per_issue() {
        assert!((quality_score(0.9, 0) - 0.9).abs() < 1e-9);
        assert!((quality_score(0.9, 2) - 0.72).abs() < 1e-9);
        assert_eq!(quality_score(0.9, 20), 0.0);
    }
}
