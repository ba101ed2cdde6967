use crate::constraints::{ConstraintTable, REQUIRED_FIELDS};
use crate::domain::{
    ComponentMap, DocumentFormat, FinancialValidationIssue, IssueKind, IssueSeverity,
};

/// Absolute difference below which an extracted amount and a printed amount
/// are considered equal.
pub const CROSS_REFERENCE_TOLERANCE: f64 = 1.0;

const CONSTRAINT_ISSUE_CONFIDENCE: f64 = 0.9;
const CROSS_REFERENCE_CONFIDENCE: f64 = 0.95;

/// Range-checks individual components against the format's constraint table
/// and cross-checks extracted amounts against externally printed totals.
pub struct ConstraintValidator {
    table: ConstraintTable,
}

impl ConstraintValidator {
    pub fn new(table: ConstraintTable) -> Self {
        Self { table }
    }

    /// Emits a constraint violation for every component whose value falls
    /// outside its known range. Components without a known range are skipped.
    pub fn validate_constraints(
        &self,
        data: &ComponentMap,
        format: DocumentFormat,
    ) -> Vec<FinancialValidationIssue> {
        let mut issues = Vec::new();
        for (component, value) in data {
            if !value.is_finite() {
                continue;
            }
            let Some(range) = self.table.range_for(format, component) else {
                continue;
            };
            if !range.contains(*value) {
                let severity = if *value <= 0.0 {
                    IssueSeverity::Critical
                } else {
                    IssueSeverity::Warning
                };
                issues.push(FinancialValidationIssue {
                    kind: IssueKind::ConstraintViolation,
                    severity,
                    component: component.clone(),
                    extracted_value: *value,
                    expected_value: None,
                    message: format!(
                        "{} is {} but the expected range is [{}, {}]",
                        component, value, range.min, range.max
                    ),
                    confidence: CONSTRAINT_ISSUE_CONFIDENCE,
                });
            }
        }
        issues
    }

    /// Compares every printed amount against the extracted amount of the
    /// same component, within [`CROSS_REFERENCE_TOLERANCE`].
    pub fn validate_cross_references(
        &self,
        data: &ComponentMap,
        printed_totals: &ComponentMap,
    ) -> Vec<FinancialValidationIssue> {
        let mut issues = Vec::new();
        for (component, printed) in printed_totals {
            let Some(extracted) = data.get(component) else {
                continue;
            };
            if (extracted - printed).abs() > CROSS_REFERENCE_TOLERANCE {
                issues.push(FinancialValidationIssue {
                    kind: IssueKind::CrossReferenceFailure,
                    severity: IssueSeverity::Critical,
                    component: component.clone(),
                    extracted_value: *extracted,
                    expected_value: Some(*printed),
                    message: format!(
                        "{} was extracted as {} but the document prints {}",
                        component, extracted, printed
                    ),
                    confidence: CROSS_REFERENCE_CONFIDENCE,
                });
            }
        }
        issues
    }

    /// Fraction of the required field set present in the data.
    pub fn data_completeness(&self, data: &ComponentMap) -> f64 {
        let present = REQUIRED_FIELDS
            .iter()
            .filter(|field| data.contains_key(**field))
            .count();
        present as f64 / REQUIRED_FIELDS.len() as f64
    }

    /// Fraction of components whose value sits inside the known range table.
    /// Components absent from the table count against the score.
    pub fn amount_reasonableness(&self, data: &ComponentMap, format: DocumentFormat) -> f64 {
        if data.is_empty() {
            return 0.0;
        }
        let reasonable = data
            .iter()
            .filter(|(component, value)| {
                self.table
                    .range_for(format, component)
                    .is_some_and(|range| range.contains(**value))
            })
            .count();
        reasonable as f64 / data.len() as f64
    }
}
