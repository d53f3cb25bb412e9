//! Deterministic gathering rules and data types.
//!
//! `gathering-core` defines the canonical rules for resource gathering: bonus
//! composition, tool wear, node depletion and respawn, time-based session
//! settling and skill progression. Everything here is pure; the runtime
//! supplies timestamps, static content (through the oracle traits in [`env`])
//! and persistence.
pub mod bonus;
pub mod config;
pub mod env;
pub mod error;
pub mod node;
pub mod progression;
pub mod session;
pub mod state;
pub mod tools;

pub use bonus::{
    AppliedEffect, BaseRates, BonusComposer, ComposedRates, EventModifier, HotspotModifier,
    Modifiers, SpecializationModifiers, ToolModifier, compose,
};
pub use config::GatheringConfig;
pub use env::{
    EventOracle, GatheringEnv, Material, MaterialOracle, NodeSpawn, PcgRng, Rarity, RngOracle,
    SeasonalEvent, SpecializationDefinition, SpecializationOracle, ToolDefinition, ToolOracle,
    ZoneDefinition, ZoneOracle,
};
pub use error::{
    ErrorCategory, GatheringFailure, Requirement, RequirementKind, ValidationError,
    validate_multiplier,
};
pub use node::{
    GatheringNode, HarvestOutcome, Hotspot, HotspotKind, NodeError, NodeKind, NodePhase,
    RefreshOutcome,
};
pub use progression::{
    LevelChange, ProgressionError, SkillRecord, SpecializationSelection, select_specialization,
};
pub use session::{
    GatheringSession, SessionError, SessionStatus, SettleOutcome, StartRequest,
};
pub use state::{
    CharacterId, Discipline, EventId, InvalidTier, MaterialId, NodeId, SpecializationId, Tier,
    Timestamp, ToolId, ToolSlot, ZoneId,
};
pub use tools::{DurabilityChange, EquippedTool, EquippedTools, RepairQuote, ToolError};
