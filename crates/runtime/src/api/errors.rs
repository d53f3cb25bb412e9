//! Unified error types surfaced by the runtime API.
//!
//! Wraps domain failures from `gathering-core`, repository and collaborator
//! failures so clients can branch on one [`ErrorCategory`] taxonomy.
use gathering_core::{
    CharacterId, ErrorCategory, GatheringFailure, NodeError, ProgressionError, SessionError,
    ToolError, ValidationError, ZoneId,
};
use thiserror::Error;

use crate::collaborators::CollaboratorError;
pub use crate::repository::{EntityKey, RepositoryError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Node(#[from] NodeError),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error(transparent)]
    Progression(#[from] ProgressionError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Another call wrote `entity` between this call's read and its commit.
    #[error("{entity} was modified concurrently; retry the operation")]
    ConcurrencyConflict { entity: EntityKey },

    #[error(transparent)]
    Repository(RepositoryError),

    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),

    #[error("{character} has no gathering profile; initialize it first")]
    CharacterNotInitialized { character: CharacterId },

    #[error("{zone} not found")]
    ZoneNotFound { zone: ZoneId },

    #[error("{zone} already has {nodes} nodes")]
    ZoneAlreadySeeded { zone: ZoneId, nodes: usize },

    #[error("gathering service requires {component} to be configured before building")]
    MissingComponent { component: &'static str },
}

impl From<RepositoryError> for RuntimeError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::Conflict { entity, .. } => RuntimeError::ConcurrencyConflict { entity },
            other => RuntimeError::Repository(other),
        }
    }
}

impl RuntimeError {
    /// Domain category; `None` for infrastructure failures (I/O, poisoned
    /// locks, misconfiguration) that fit none of them.
    pub fn category(&self) -> Option<ErrorCategory> {
        let category = match self {
            Self::Session(inner) => inner.category(),
            Self::Node(inner) => inner.category(),
            Self::Tool(inner) => inner.category(),
            Self::Progression(inner) => inner.category(),
            Self::Validation(inner) => inner.category(),
            Self::ConcurrencyConflict { .. } => ErrorCategory::ConcurrencyConflict,
            Self::CharacterNotInitialized { .. } | Self::ZoneNotFound { .. } => {
                ErrorCategory::NotFound
            }
            Self::ZoneAlreadySeeded { .. } => ErrorCategory::PreconditionFailed,
            Self::Collaborator(CollaboratorError::CharacterNotFound { .. }) => {
                ErrorCategory::NotFound
            }
            Self::Collaborator(CollaboratorError::InsufficientFunds { .. }) => {
                ErrorCategory::InsufficientResources
            }
            Self::Collaborator(_) | Self::Repository(_) | Self::MissingComponent { .. } => {
                return None;
            }
        };
        Some(category)
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Session(inner) => inner.error_code(),
            Self::Node(inner) => inner.error_code(),
            Self::Tool(inner) => inner.error_code(),
            Self::Progression(inner) => inner.error_code(),
            Self::Validation(inner) => inner.error_code(),
            Self::ConcurrencyConflict { .. } => "concurrency_conflict",
            Self::Repository(_) => "repository_failure",
            Self::Collaborator(CollaboratorError::CharacterNotFound { .. }) => {
                "character_not_found"
            }
            Self::Collaborator(CollaboratorError::InsufficientFunds { .. }) => {
                "insufficient_funds"
            }
            Self::Collaborator(_) => "collaborator_failure",
            Self::CharacterNotInitialized { .. } => "character_not_initialized",
            Self::ZoneNotFound { .. } => "zone_not_found",
            Self::ZoneAlreadySeeded { .. } => "zone_already_seeded",
            Self::MissingComponent { .. } => "missing_component",
        }
    }

    /// Only optimistic-concurrency losses are worth retrying.
    pub fn is_retryable(&self) -> bool {
        self.category()
            .is_some_and(|category| category.is_retryable())
    }
}
