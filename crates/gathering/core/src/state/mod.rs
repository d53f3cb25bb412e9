//! Identifiers, time, and classification types shared by every component.
mod discipline;
mod ids;
mod time;

pub use discipline::{Discipline, InvalidTier, Tier, ToolSlot};
pub use ids::{CharacterId, EventId, MaterialId, NodeId, SpecializationId, ToolId, ZoneId};
pub use time::Timestamp;
