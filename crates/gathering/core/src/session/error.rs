use crate::error::{ErrorCategory, GatheringFailure, Requirement, ValidationError};
use crate::node::NodeError;
use crate::state::{CharacterId, MaterialId, NodeId};

/// Errors raised while starting or settling a gathering session.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionError {
    #[error("{character} already has an active gathering session")]
    AlreadyRunning { character: CharacterId },

    #[error("{character} has no gathering session")]
    NotFound { character: CharacterId },

    #[error("session not complete: {completed}/{goal} gathered")]
    NotComplete { completed: u32, goal: u32 },

    #[error("material {material} not found")]
    MaterialNotFound { material: MaterialId },

    #[error("{node} yields {found}, not {expected}")]
    NodeMaterialMismatch {
        node: NodeId,
        expected: MaterialId,
        found: MaterialId,
    },

    #[error("cannot gather: {0}")]
    RequirementNotMet(Requirement),

    #[error(transparent)]
    Node(#[from] NodeError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl GatheringFailure for SessionError {
    fn category(&self) -> ErrorCategory {
        match self {
            Self::AlreadyRunning { .. }
            | Self::NotComplete { .. }
            | Self::RequirementNotMet(_) => ErrorCategory::PreconditionFailed,
            Self::NotFound { .. } | Self::MaterialNotFound { .. } => ErrorCategory::NotFound,
            Self::NodeMaterialMismatch { .. } | Self::Validation(_) => ErrorCategory::Validation,
            Self::Node(inner) => inner.category(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyRunning { .. } => "session_already_running",
            Self::NotFound { .. } => "session_not_found",
            Self::NotComplete { .. } => "session_not_complete",
            Self::MaterialNotFound { .. } => "material_not_found",
            Self::NodeMaterialMismatch { .. } => "node_material_mismatch",
            Self::RequirementNotMet(_) => "requirement_not_met",
            Self::Node(inner) => inner.error_code(),
            Self::Validation(inner) => inner.error_code(),
        }
    }
}
