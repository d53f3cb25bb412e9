use crate::error::{ErrorCategory, GatheringFailure, ValidationError};
use crate::state::{NodeId, Timestamp};

/// Errors raised by node lifecycle operations.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeError {
    #[error("node {node} not found")]
    NotFound { node: NodeId },

    #[error("node {node} is depleted")]
    Depleted {
        node: NodeId,
        respawn_at: Option<Timestamp>,
    },

    #[error("node {node} is already a hotspot until {expires_at}")]
    AlreadyHotspot { node: NodeId, expires_at: Timestamp },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl GatheringFailure for NodeError {
    fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::Depleted { .. } | Self::AlreadyHotspot { .. } => {
                ErrorCategory::PreconditionFailed
            }
            Self::Validation(_) => ErrorCategory::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "node_not_found",
            Self::Depleted { .. } => "node_depleted",
            Self::AlreadyHotspot { .. } => "already_hotspot",
            Self::Validation(inner) => inner.error_code(),
        }
    }
}
