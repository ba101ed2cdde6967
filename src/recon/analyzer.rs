use crate::constraints::required_components;
use crate::domain::{
    component_sum, fractional_drift, ComponentMap, DiscrepancyKind, DiscrepancySeverity,
    DocumentFormat, ExpectedTotals, ReconciliationDiscrepancy,
};

/// Absolute difference beyond which an extracted total disagrees with an
/// expected total. Intentionally looser than the sub-unit rounding
/// threshold: total drift is systemic, rounding noise is not.
pub const TOTAL_TOLERANCE: f64 = 1.0;

/// Fractional drift at which a component value is treated as carrying OCR
/// digit noise rather than a genuine paisa amount.
pub const ROUNDING_DRIFT_THRESHOLD: f64 = 0.50;

/// A total mismatch above this share of the expected value is high severity.
pub const HIGH_MISMATCH_RATIO: f64 = 0.10;

/// Compares extracted totals and components against expected values and
/// against their own rounded form, producing typed, severity-ranked
/// discrepancies. Pure and total over its inputs.
pub struct DiscrepancyAnalyzer;

impl DiscrepancyAnalyzer {
    pub fn analyze(
        &self,
        credits: &ComponentMap,
        debits: &ComponentMap,
        expected: &ExpectedTotals,
        format: DocumentFormat,
    ) -> Vec<ReconciliationDiscrepancy> {
        let credit_total = component_sum(credits);
        let debit_total = component_sum(debits);
        let net = credit_total - debit_total;

        let mut discrepancies = Vec::new();

        if let Some(expected_credits) = expected.credits {
            Self::check_total("TOTAL_CREDITS", credit_total, expected_credits, &mut discrepancies);
        }
        if let Some(expected_debits) = expected.debits {
            Self::check_total("TOTAL_DEBITS", debit_total, expected_debits, &mut discrepancies);
        }
        if let Some(expected_net) = expected.net {
            Self::check_net(net, expected_net, &mut discrepancies);
        }

        for component in required_components(format) {
            if !credits.contains_key(*component) && !debits.contains_key(*component) {
                discrepancies.push(ReconciliationDiscrepancy {
                    component: component.to_string(),
                    extracted_value: 0.0,
                    expected_value: None,
                    kind: DiscrepancyKind::MissingComponent,
                    severity: DiscrepancySeverity::Medium,
                    explanation: format!(
                        "{} was not extracted but {:?} payslips always carry it",
                        component, format
                    ),
                });
            }
        }

        for (component, credit_value) in credits {
            if let Some(debit_value) = debits.get(component) {
                discrepancies.push(ReconciliationDiscrepancy {
                    component: component.clone(),
                    extracted_value: *credit_value,
                    expected_value: Some(*debit_value),
                    kind: DiscrepancyKind::ExtraComponent,
                    severity: DiscrepancySeverity::Medium,
                    explanation: format!(
                        "{} appears on both the credit and debit side",
                        component
                    ),
                });
            }
        }

        Self::check_rounding(credits, &mut discrepancies);
        Self::check_rounding(debits, &mut discrepancies);

        discrepancies
    }

    fn check_total(
        component: &str,
        extracted: f64,
        expected: f64,
        out: &mut Vec<ReconciliationDiscrepancy>,
    ) {
        let diff = (extracted - expected).abs();
        if diff <= TOTAL_TOLERANCE {
            return;
        }
        let severity = if diff > HIGH_MISMATCH_RATIO * expected.abs() {
            DiscrepancySeverity::High
        } else {
            DiscrepancySeverity::Medium
        };
        out.push(ReconciliationDiscrepancy {
            component: component.to_string(),
            extracted_value: extracted,
            expected_value: Some(expected),
            kind: DiscrepancyKind::AmountMismatch,
            severity,
            explanation: format!(
                "extracted {} of {} differs from the expected {} by {}",
                component, extracted, expected, diff
            ),
        });
    }

    fn check_net(net: f64, expected_net: f64, out: &mut Vec<ReconciliationDiscrepancy>) {
        let diff = (net - expected_net).abs();
        if diff <= TOTAL_TOLERANCE {
            return;
        }
        let severity = if diff > HIGH_MISMATCH_RATIO * expected_net.abs() {
            DiscrepancySeverity::High
        } else {
            DiscrepancySeverity::Medium
        };
        out.push(ReconciliationDiscrepancy {
            component: "NET_AMOUNT".to_string(),
            extracted_value: net,
            expected_value: Some(expected_net),
            kind: DiscrepancyKind::CalculationError,
            severity,
            explanation: format!(
                "net of credits minus debits is {} but the expected net is {}",
                net, expected_net
            ),
        });
    }

    fn check_rounding(map: &ComponentMap, out: &mut Vec<ReconciliationDiscrepancy>) {
        for (component, value) in map {
            if fractional_drift(*value) >= ROUNDING_DRIFT_THRESHOLD {
                out.push(ReconciliationDiscrepancy {
                    component: component.clone(),
                    extracted_value: *value,
                    expected_value: Some(value.round()),
                    kind: DiscrepancyKind::RoundingIssue,
                    severity: DiscrepancySeverity::Low,
                    explanation: format!(
                        "{} of {} carries sub-unit noise; nearest whole amount is {}",
                        component,
                        value,
                        value.round()
                    ),
                });
            }
        }
    }
}
