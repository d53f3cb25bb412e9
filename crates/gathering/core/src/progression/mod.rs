//! Skill progression ledger and specialization selection.
mod error;
mod skill;
mod specialization;

pub use error::ProgressionError;
pub use skill::{LevelChange, SkillRecord, cumulative_experience, level_for_experience};
pub use specialization::{SpecializationSelection, select_specialization};
