use chrono::Utc;
use uuid::Uuid;

use crate::confidence::validation_confidence;
use crate::constraints::{is_aggregate_component, is_debit_component, ConstraintTable, REQUIRED_FIELDS};
use crate::domain::{
    ComponentMap, DocumentFormat, FinancialValidationIssue, FinancialValidationResult, IssueKind,
    IssueSeverity,
};
use crate::errors::ReconResult;
use crate::outlier::{OutlierDetector, RiskLevel};

use super::constraint_validator::{ConstraintValidator, CROSS_REFERENCE_TOLERANCE};

const INVALID_FORMAT_CONFIDENCE: f64 = 0.95;
const MISSING_FIELD_CONFIDENCE: f64 = 0.8;
const CROSS_REFERENCE_CONFIDENCE: f64 = 0.95;

/// Orchestrator for the stand-alone validation path.
///
/// Partitions a flat extraction map into an implicit credit/debit split,
/// runs constraint and cross-reference checks, folds in the external outlier
/// analysis, and produces the aggregate confidence.
pub struct FinancialValidator {
    constraints: ConstraintValidator,
    outlier_detector: Option<Box<dyn OutlierDetector>>,
}

impl FinancialValidator {
    pub fn new(table: ConstraintTable) -> Self {
        Self {
            constraints: ConstraintValidator::new(table),
            outlier_detector: None,
        }
    }

    pub fn with_outlier_detector(mut self, detector: Box<dyn OutlierDetector>) -> Self {
        self.outlier_detector = Some(detector);
        self
    }

    pub fn validate(
        &self,
        data: &ComponentMap,
        printed_totals: Option<&ComponentMap>,
        format: DocumentFormat,
    ) -> ReconResult<FinancialValidationResult> {
        let mut issues = Vec::new();

        for (component, value) in data {
            if !value.is_finite() {
                issues.push(FinancialValidationIssue {
                    kind: IssueKind::InvalidFormat,
                    severity: IssueSeverity::Critical,
                    component: component.clone(),
                    extracted_value: *value,
                    expected_value: None,
                    message: format!("{} could not be read as a finite amount", component),
                    confidence: INVALID_FORMAT_CONFIDENCE,
                });
            }
        }

        issues.extend(self.constraints.validate_constraints(data, format));

        if let Some(printed) = printed_totals {
            issues.extend(self.constraints.validate_cross_references(data, printed));
            issues.extend(Self::validate_partition_sums(data, printed));
        }

        for field in REQUIRED_FIELDS {
            if !data.contains_key(field) {
                issues.push(FinancialValidationIssue {
                    kind: IssueKind::MissingComponent,
                    severity: IssueSeverity::Info,
                    component: field.to_string(),
                    extracted_value: 0.0,
                    expected_value: None,
                    message: format!("{} was not extracted from the document", field),
                    confidence: MISSING_FIELD_CONFIDENCE,
                });
            }
        }

        let outlier_analysis = match &self.outlier_detector {
            Some(detector) => {
                let analysis = detector.detect_outliers(data, format)?;
                for (component, finding) in &analysis.outliers {
                    if finding.risk_level >= RiskLevel::High {
                        issues.push(FinancialValidationIssue {
                            kind: IssueKind::OutlierValue,
                            severity: IssueSeverity::Info,
                            component: component.clone(),
                            extracted_value: finding.value,
                            expected_value: None,
                            message: finding.explanation.clone(),
                            confidence: analysis.confidence,
                        });
                    }
                }
                Some(analysis)
            }
            None => None,
        };

        let completeness = self.constraints.data_completeness(data);
        let reasonableness = self.constraints.amount_reasonableness(data, format);
        let critical_count = issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Critical)
            .count();
        let warning_count = issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Warning)
            .count();
        let confidence =
            validation_confidence(critical_count, warning_count, completeness, reasonableness);

        let reconciliation_suggestions = Self::suggestion_hints(&issues);

        tracing::debug!(
            issues = issues.len(),
            critical = critical_count,
            confidence,
            "validation pass complete"
        );

        Ok(FinancialValidationResult {
            id: Uuid::new_v4(),
            is_valid: critical_count == 0,
            confidence,
            issues,
            outlier_analysis,
            reconciliation_suggestions,
            generated_at: Utc::now(),
        })
    }

    /// Splits the flat map into credit and debit sums using the debit-key
    /// allowlist and checks each side against the printed total. Printed
    /// aggregates and unreadable values stay out of both sums.
    fn validate_partition_sums(
        data: &ComponentMap,
        printed: &ComponentMap,
    ) -> Vec<FinancialValidationIssue> {
        let mut credit_sum = 0.0;
        let mut debit_sum = 0.0;
        for (component, value) in data {
            if is_aggregate_component(component) || !value.is_finite() {
                continue;
            }
            if is_debit_component(component) {
                debit_sum += value;
            } else {
                credit_sum += value;
            }
        }

        let mut issues = Vec::new();
        for (aggregate, calculated) in [("TOTAL_CREDITS", credit_sum), ("TOTAL_DEBITS", debit_sum)]
        {
            let Some(printed_total) = printed.get(aggregate) else {
                continue;
            };
            if (calculated - printed_total).abs() > CROSS_REFERENCE_TOLERANCE {
                issues.push(FinancialValidationIssue {
                    kind: IssueKind::CrossReferenceFailure,
                    severity: IssueSeverity::Critical,
                    component: aggregate.to_string(),
                    extracted_value: calculated,
                    expected_value: Some(*printed_total),
                    message: format!(
                        "calculated {} of {} disagrees with printed total {}",
                        aggregate, calculated, printed_total
                    ),
                    confidence: CROSS_REFERENCE_CONFIDENCE,
                });
            }
        }
        issues
    }

    /// One advisory hint per issue kind present, in emission order.
    fn suggestion_hints(issues: &[FinancialValidationIssue]) -> Vec<String> {
        let mut hints: Vec<String> = Vec::new();
        for issue in issues {
            let hint = match issue.kind {
                IssueKind::AmountMismatch => "Re-check extracted amounts against the document",
                IssueKind::OutlierValue => {
                    "Verify statistically extreme amounts against the source document"
                }
                IssueKind::MissingComponent => {
                    "Confirm whether the payslip omits standard fields or extraction missed them"
                }
                IssueKind::InvalidFormat => {
                    "Re-scan the document; some amounts could not be read as numbers"
                }
                IssueKind::ConstraintViolation => {
                    "Review components outside their expected ranges before accepting totals"
                }
                IssueKind::CrossReferenceFailure => {
                    "Re-extract totals; calculated sums disagree with printed totals"
                }
            };
            if !hints.iter().any(|existing| existing == hint) {
                hints.push(hint.to_string());
            }
        }
        hints
    }
}
