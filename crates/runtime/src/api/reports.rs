//! Results returned by service operations.
//!
//! Every report is `Serialize` so transports can render them as JSON.

use gathering_core::{
    CharacterId, ComposedRates, Discipline, DurabilityChange, GatheringNode, GatheringSession,
    LevelChange, MaterialId, NodeId, NodePhase, SessionStatus, SpecializationId, Tier, Timestamp,
    ToolSlot,
};
use serde::Serialize;

/// A freshly opened session and the rates it will start at.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StartReport {
    pub session: GatheringSession,
    pub rates: ComposedRates,
}

/// Session state after a poll.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProgressReport {
    pub character: CharacterId,
    pub material: MaterialId,
    pub discipline: Discipline,
    pub node: Option<NodeId>,
    pub completed: u32,
    pub goal: u32,
    pub banked: u32,
    pub status: SessionStatus,
    /// Rates composed for this poll.
    pub rates: ComposedRates,
    /// `None` once the session is complete.
    pub time_to_next_unit_ms: Option<u64>,
    /// Units gained by this poll.
    pub gained: u32,
    pub experience_gained: u64,
    /// Wait dropped because the node ran out.
    pub forfeited_ms: u64,
    /// Present only when this poll crossed a level threshold.
    pub level_up: Option<LevelChange>,
    pub tool_wear: Option<DurabilityChange>,
}

impl ProgressReport {
    pub fn is_complete(&self) -> bool {
        self.status == SessionStatus::Completed
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CollectReport {
    pub character: CharacterId,
    pub material: MaterialId,
    pub discipline: Discipline,
    /// Materials granted to the inventory.
    pub quantity: u32,
    /// Experience credited by the settle that ran inside collect.
    pub experience_gained: u64,
    pub level_up: Option<LevelChange>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CancelReport {
    pub character: CharacterId,
    pub material: MaterialId,
    pub discipline: Discipline,
    pub completed: u32,
    pub goal: u32,
    /// Banked partial materials granted to the inventory.
    pub granted: u32,
    pub experience_gained: u64,
    pub level_up: Option<LevelChange>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RepairReport {
    pub slot: ToolSlot,
    pub tier: Tier,
    pub cost: u64,
    /// Currency left after paying.
    pub balance: u64,
    pub durability: DurabilityChange,
}

/// Level, experience and specialization of one discipline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SkillView {
    pub character: CharacterId,
    pub discipline: Discipline,
    pub level: u8,
    pub experience: u64,
    /// `None` at the level cap.
    pub experience_to_next: Option<u64>,
    pub specialization: Option<SpecializationId>,
}

/// A node as seen at one instant, after lazy maintenance.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodeView {
    pub node: GatheringNode,
    pub phase: NodePhase,
    pub observed_at: Timestamp,
}

impl NodeView {
    pub fn new(node: GatheringNode, now: Timestamp) -> Self {
        let phase = node.phase(now);
        Self {
            node,
            phase,
            observed_at: now,
        }
    }

    pub fn id(&self) -> NodeId {
        self.node.id
    }

    /// True when the hotspot, if any, is still running at `observed_at`.
    pub fn is_hotspot(&self) -> bool {
        self.node.active_hotspot(self.observed_at).is_some()
    }
}
