//! Public runtime API surface.
//!
//! This module gathers the types returned by [`crate::GatheringService`] so
//! callers do not need to reach into the service internals.

pub mod errors;
pub mod reports;

pub use errors::{Result, RuntimeError};
pub use reports::{
    CancelReport, CollectReport, NodeView, ProgressReport, RepairReport, SkillView,
    StartReport,
};
