use std::fmt;

use thiserror::Error;

pub type ReconResult<T> = Result<T, ReconError>;

/// Pipeline stage at which an internal fault surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStep {
    InputScreening,
    ConstraintValidation,
    CrossReferenceCheck,
    OutlierDetection,
    DiscrepancyAnalysis,
    CorrectionApplication,
    ReconciliationCheck,
}

impl fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PipelineStep::InputScreening => "input screening",
            PipelineStep::ConstraintValidation => "constraint validation",
            PipelineStep::CrossReferenceCheck => "cross-reference check",
            PipelineStep::OutlierDetection => "outlier detection",
            PipelineStep::DiscrepancyAnalysis => "discrepancy analysis",
            PipelineStep::CorrectionApplication => "correction application",
            PipelineStep::ReconciliationCheck => "reconciliation check",
        };
        f.write_str(label)
    }
}

/// Error type for internal pipeline faults.
///
/// Normal outcomes (out-of-range values, unresolved discrepancies, empty
/// correction sets) are data, never errors; a `ReconciliationFailure` aborts
/// the whole invocation because a partially populated result must never be
/// presented as reconciled.
#[derive(Debug, Error)]
pub enum ReconError {
    #[error("reconciliation failure at {step} for {component}: {reason}")]
    ReconciliationFailure {
        step: PipelineStep,
        component: String,
        reason: String,
    },
}

impl ReconError {
    pub fn failure(
        step: PipelineStep,
        component: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ReconError::ReconciliationFailure {
            step,
            component: component.into(),
            reason: reason.into(),
        }
    }
}
