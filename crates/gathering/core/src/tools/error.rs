use crate::error::{ErrorCategory, GatheringFailure, Requirement, ValidationError};
use crate::state::{ToolId, ToolSlot};

/// Errors raised by the tool registry.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ToolError {
    #[error("tool {tool} not found")]
    ToolNotFound { tool: ToolId },

    #[error("no tool equipped in {slot} slot")]
    SlotEmpty { slot: ToolSlot },

    #[error("cannot equip tool: {0}")]
    RequirementNotMet(Requirement),

    #[error("tool in {slot} slot is not damaged")]
    NotDamaged { slot: ToolSlot },

    #[error("repair costs {required} but only {available} is available")]
    InsufficientFunds { required: u64, available: u64 },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl GatheringFailure for ToolError {
    fn category(&self) -> ErrorCategory {
        match self {
            Self::ToolNotFound { .. } | Self::SlotEmpty { .. } => ErrorCategory::NotFound,
            Self::RequirementNotMet(_) | Self::NotDamaged { .. } => {
                ErrorCategory::PreconditionFailed
            }
            Self::InsufficientFunds { .. } => ErrorCategory::InsufficientResources,
            Self::Validation(_) => ErrorCategory::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ToolNotFound { .. } => "tool_not_found",
            Self::SlotEmpty { .. } => "tool_slot_empty",
            Self::RequirementNotMet(_) => "requirement_not_met",
            Self::NotDamaged { .. } => "tool_not_damaged",
            Self::InsufficientFunds { .. } => "insufficient_funds",
            Self::Validation(inner) => inner.error_code(),
        }
    }
}
