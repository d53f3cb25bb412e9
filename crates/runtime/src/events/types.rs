//! Event payloads published by the gathering service.

use gathering_core::{
    CharacterId, Discipline, HotspotKind, MaterialId, NodeId, SpecializationId, Timestamp, Tier,
    ToolId, ToolSlot,
};
use serde::{Deserialize, Serialize};

/// Session lifecycle and progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    Started {
        character: CharacterId,
        material: MaterialId,
        node: Option<NodeId>,
        goal: u32,
        at: Timestamp,
    },
    Progressed {
        character: CharacterId,
        gained: u32,
        completed: u32,
        goal: u32,
        experience: u64,
    },
    Completed {
        character: CharacterId,
        material: MaterialId,
        at: Timestamp,
    },
    Collected {
        character: CharacterId,
        material: MaterialId,
        quantity: u32,
    },
    Cancelled {
        character: CharacterId,
        material: MaterialId,
        completed: u32,
        granted: u32,
    },
}

/// Node durability and hotspot changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeEvent {
    Harvested { node: NodeId, remaining: u8 },
    Depleted { node: NodeId, respawn_at: Timestamp },
    Respawned { node: NodeId, durability: u8 },
    HotspotPromoted {
        node: NodeId,
        kind: HotspotKind,
        multiplier: f64,
        expires_at: Timestamp,
    },
    HotspotExpired { node: NodeId, kind: HotspotKind },
}

/// Tools, levels and specializations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProgressionEvent {
    ToolEquipped {
        character: CharacterId,
        slot: ToolSlot,
        tool: ToolId,
        tier: Tier,
    },
    ToolRepaired {
        character: CharacterId,
        slot: ToolSlot,
        cost: u64,
    },
    ToolBroken {
        character: CharacterId,
        slot: ToolSlot,
    },
    LevelUp {
        character: CharacterId,
        discipline: Discipline,
        previous_level: u8,
        new_level: u8,
    },
    SpecializationSelected {
        character: CharacterId,
        discipline: Discipline,
        specialization: SpecializationId,
    },
}
