use crate::error::{ErrorCategory, GatheringFailure, Requirement, ValidationError};
use crate::state::{Discipline, SpecializationId};

/// Errors raised by the skill ledger and specialization selection.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProgressionError {
    #[error("specialization {specialization} not found")]
    SpecializationNotFound { specialization: SpecializationId },

    #[error("{discipline} specialization already selected ({current})")]
    SpecializationAlreadySelected {
        discipline: Discipline,
        current: SpecializationId,
    },

    #[error("cannot select specialization: {0}")]
    RequirementNotMet(Requirement),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl GatheringFailure for ProgressionError {
    fn category(&self) -> ErrorCategory {
        match self {
            Self::SpecializationNotFound { .. } => ErrorCategory::NotFound,
            Self::SpecializationAlreadySelected { .. } | Self::RequirementNotMet(_) => {
                ErrorCategory::PreconditionFailed
            }
            Self::Validation(_) => ErrorCategory::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::SpecializationNotFound { .. } => "specialization_not_found",
            Self::SpecializationAlreadySelected { .. } => "specialization_already_selected",
            Self::RequirementNotMet(_) => "requirement_not_met",
            Self::Validation(inner) => inner.error_code(),
        }
    }
}
