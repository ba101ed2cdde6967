pub mod common;
pub mod context;
pub mod discrepancy;
pub mod issue;
pub mod totals;

pub use common::{component_sum, fractional_drift, ComponentMap, DocumentFormat};
pub use context::{ReconciliationContext, ReconciliationResult, ReconciliationValidation};
pub use discrepancy::{
    DiscrepancyKind, DiscrepancySeverity, ReconciliationCorrection, ReconciliationDiscrepancy,
    ReconciliationSuggestion, SuggestionKind,
};
pub use issue::{FinancialValidationIssue, FinancialValidationResult, IssueKind, IssueSeverity};
pub use totals::{ExpectedTotals, Totals};
