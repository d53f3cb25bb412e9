//! Common error infrastructure for gathering-core.
//!
//! Component-specific errors (`ToolError`, `NodeError`, `SessionError`,
//! `ProgressionError`) live next to the rules they enforce. This module holds
//! the pieces they share: the category taxonomy callers branch on, structured
//! requirement details, and input validation failures.
//!
//! # Design Principles
//!
//! - **Type Safety**: each component has its own error enum
//! - **Actionable Detail**: requirement failures carry current and required values
//! - **Categorization**: every error maps onto one [`ErrorCategory`]

use std::fmt;

use crate::state::Discipline;

/// Category of a failure, used by callers to pick a handling strategy.
///
/// Only [`ErrorCategory::ConcurrencyConflict`] is retryable; every other
/// category is terminal for the call that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorCategory {
    /// Bad input, e.g. a goal below one.
    Validation,

    /// A rule blocks the call: level too low, session already running,
    /// node depleted, specialization already chosen.
    PreconditionFailed,

    /// Unknown material, node, tool, session or specialization.
    NotFound,

    /// Currency or materials too low.
    InsufficientResources,

    /// Lost an optimistic write race; the caller should retry.
    ConcurrencyConflict,
}

impl ErrorCategory {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::PreconditionFailed => "precondition_failed",
            Self::NotFound => "not_found",
            Self::InsufficientResources => "insufficient_resources",
            Self::ConcurrencyConflict => "concurrency_conflict",
        }
    }

    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrencyConflict)
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Common trait for all gathering-core errors.
pub trait GatheringFailure: fmt::Display + fmt::Debug {
    fn category(&self) -> ErrorCategory;

    /// Stable identifier of the variant, for metrics and client messages.
    fn error_code(&self) -> &'static str;
}

/// What a [`Requirement`] measures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RequirementKind {
    DisciplineLevel(Discipline),
    CharacterLevel,
}

impl fmt::Display for RequirementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequirementKind::DisciplineLevel(discipline) => write!(f, "{discipline} level"),
            RequirementKind::CharacterLevel => f.write_str("character level"),
        }
    }
}

/// An unmet threshold with enough detail to render an actionable message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Requirement {
    pub kind: RequirementKind,
    pub current: u32,
    pub required: u32,
}

impl Requirement {
    pub const fn new(kind: RequirementKind, current: u32, required: u32) -> Self {
        Self {
            kind,
            current,
            required,
        }
    }

    /// Returns `Err(self)` when `current < required`.
    pub fn check(kind: RequirementKind, current: u32, required: u32) -> Result<(), Requirement> {
        if current < required {
            Err(Self::new(kind, current, required))
        } else {
            Ok(())
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} is below required {}",
            self.kind, self.current, self.required
        )
    }
}

/// Input rejected before any state is read.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValidationError {
    #[error("quantity goal must be at least 1 (got {goal})")]
    InvalidGoal { goal: u32 },

    #[error("multiplier must be a positive finite number (got {value})")]
    InvalidMultiplier { value: f64 },

    #[error("duration must be positive (got {seconds}s)")]
    InvalidDuration { seconds: u64 },

    #[error("amount must be a non-negative finite number (got {amount})")]
    InvalidAmount { amount: f32 },

    #[error("expected a {expected} entry, got {found}")]
    DisciplineMismatch {
        expected: Discipline,
        found: Discipline,
    },
}

impl GatheringFailure for ValidationError {
    fn category(&self) -> ErrorCategory {
        ErrorCategory::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidGoal { .. } => "invalid_goal",
            Self::InvalidMultiplier { .. } => "invalid_multiplier",
            Self::InvalidDuration { .. } => "invalid_duration",
            Self::InvalidAmount { .. } => "invalid_amount",
            Self::DisciplineMismatch { .. } => "discipline_mismatch",
        }
    }
}

/// Rejects multipliers that would make composition meaningless.
pub fn validate_multiplier(value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::InvalidMultiplier { value })
    }
}
