use std::collections::BTreeMap;

use payslip_core::constraints::{ComponentRange, ConstraintTable};
use payslip_core::domain::{ComponentMap, DocumentFormat, IssueKind, IssueSeverity};
use payslip_core::errors::{ReconError, ReconResult};
use payslip_core::outlier::{
    OutlierDetectionResult, OutlierDetector, OutlierFinding, RiskLevel,
};
use payslip_core::validation::FinancialValidator;

fn map(entries: &[(&str, f64)]) -> ComponentMap {
    entries
        .iter()
        .map(|(name, value)| (name.to_string(), *value))
        .collect()
}

struct StubDetector {
    result: Option<OutlierDetectionResult>,
}

impl OutlierDetector for StubDetector {
    fn detect_outliers(
        &self,
        _amounts: &ComponentMap,
        _format: DocumentFormat,
    ) -> ReconResult<OutlierDetectionResult> {
        match &self.result {
            Some(result) => Ok(result.clone()),
            None => Err(ReconError::failure(
                payslip_core::errors::PipelineStep::OutlierDetection,
                "BASIC_PAY",
                "collaborator unavailable",
            )),
        }
    }
}

fn flagged_analysis() -> OutlierDetectionResult {
    let mut outliers = BTreeMap::new();
    outliers.insert(
        "BASIC_PAY".to_string(),
        OutlierFinding {
            value: 480_000.0,
            z_score: 4.2,
            risk_level: RiskLevel::High,
            expected_range: (10_000.0, 120_000.0),
            explanation: "BASIC_PAY is 4.2 standard deviations above the format mean".to_string(),
        },
    );
    OutlierDetectionResult {
        outliers,
        overall_risk: RiskLevel::High,
        confidence: 0.88,
    }
}

#[test]
fn printed_total_mismatch_beyond_tolerance_is_critical() {
    // Calculated credits 19_998.5 vs printed 20_000: diff 1.5 > 1.0.
    let data = map(&[("BASIC_PAY", 19_998.5)]);
    let printed = map(&[("TOTAL_CREDITS", 20_000.0)]);
    let result = FinancialValidator::new(ConstraintTable::standard())
        .validate(&data, Some(&printed), DocumentFormat::Pcda)
        .expect("validate");

    assert!(!result.is_valid);
    let failure = result
        .issues
        .iter()
        .find(|issue| issue.kind == IssueKind::CrossReferenceFailure)
        .expect("expected a cross-reference failure");
    assert_eq!(failure.severity, IssueSeverity::Critical);
    assert_eq!(failure.expected_value, Some(20_000.0));
    assert!(result
        .reconciliation_suggestions
        .iter()
        .any(|hint| hint.contains("printed totals")));
}

#[test]
fn validity_flag_is_advisory_and_result_is_complete() {
    // Even an invalid result carries issues, confidence, and hints; a
    // caller may still present the data with a warning.
    let data = map(&[("BASIC_PAY", -10.0)]);
    let result = FinancialValidator::new(ConstraintTable::standard())
        .validate(&data, None, DocumentFormat::Pcda)
        .expect("validate");
    assert!(!result.is_valid);
    assert!(!result.issues.is_empty());
    assert!(!result.reconciliation_suggestions.is_empty());
    assert!(result.confidence >= 0.0 && result.confidence <= 1.0);
}

#[test]
fn outlier_analysis_is_merged_unmodified() {
    let data = map(&[("BASIC_PAY", 480_000.0)]);
    let validator = FinancialValidator::new(ConstraintTable::standard())
        .with_outlier_detector(Box::new(StubDetector {
            result: Some(flagged_analysis()),
        }));
    let result = validator
        .validate(&data, None, DocumentFormat::Pcda)
        .expect("validate");

    let analysis = result.outlier_analysis.expect("analysis present");
    assert_eq!(analysis.overall_risk, RiskLevel::High);
    assert_eq!(analysis.outliers["BASIC_PAY"].z_score, 4.2);

    // High-risk findings additionally surface as advisory issues.
    let advisory = result
        .issues
        .iter()
        .find(|issue| issue.kind == IssueKind::OutlierValue)
        .expect("advisory outlier issue");
    assert_eq!(advisory.severity, IssueSeverity::Info);
    assert_eq!(advisory.confidence, 0.88);
}

#[test]
fn failing_detector_aborts_the_whole_invocation() {
    let data = map(&[("BASIC_PAY", 50_000.0)]);
    let validator = FinancialValidator::new(ConstraintTable::standard())
        .with_outlier_detector(Box::new(StubDetector { result: None }));
    let err = validator
        .validate(&data, None, DocumentFormat::Pcda)
        .expect_err("detector fault must abort");
    let message = format!("{err}");
    assert!(message.contains("outlier detection"), "unexpected: {message}");
}

#[test]
fn malformed_constraint_table_is_rejected_up_front() {
    let err = ConstraintTable::from_entries([(
        DocumentFormat::Pcda,
        "BASIC_PAY".to_string(),
        ComponentRange {
            min: 500_000.0,
            max: 10_000.0,
        },
    )])
    .expect_err("inverted range");
    assert!(matches!(err, ReconError::ReconciliationFailure { .. }));
}

#[test]
fn custom_table_drives_constraint_checks() {
    let table = ConstraintTable::from_entries([(
        DocumentFormat::Corporate,
        "GROSS_SALARY".to_string(),
        ComponentRange {
            min: 20_000.0,
            max: 900_000.0,
        },
    )])
    .expect("table");
    let data = map(&[("GROSS_SALARY", 5_000.0)]);
    let result = FinancialValidator::new(table)
        .validate(&data, None, DocumentFormat::Corporate)
        .expect("validate");
    let violation = result
        .issues
        .iter()
        .find(|issue| issue.kind == IssueKind::ConstraintViolation)
        .expect("constraint violation");
    assert_eq!(violation.severity, IssueSeverity::Warning);
    assert_eq!(violation.component, "GROSS_SALARY");
}

#[test]
fn retrying_a_failed_invocation_with_same_inputs_is_safe() {
    let data = map(&[("BASIC_PAY", 19_998.5)]);
    let printed = map(&[("TOTAL_CREDITS", 20_000.0)]);
    let validator = FinancialValidator::new(ConstraintTable::standard());
    let first = validator
        .validate(&data, Some(&printed), DocumentFormat::Pcda)
        .expect("first");
    let second = validator
        .validate(&data, Some(&printed), DocumentFormat::Pcda)
        .expect("second");
    assert_eq!(first.is_valid, second.is_valid);
    assert_eq!(first.issues.len(), second.issues.len());
    assert_eq!(first.confidence, second.confidence);
}
