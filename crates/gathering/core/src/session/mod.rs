//! Long-running gather-N-units sessions.
//!
//! A session stores only counters and timestamps. Progress is derived on
//! demand by [`GatheringSession::settle`], which converts elapsed time into
//! whole units using the rates composed for that call.
mod error;
mod settle;

pub use error::SessionError;
pub use settle::SettleOutcome;

use crate::env::{Material, session_seed};
use crate::error::{Requirement, RequirementKind, ValidationError};
use crate::node::{GatheringNode, NodeError};
use crate::state::{CharacterId, Discipline, MaterialId, NodeId, Timestamp};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionStatus {
    Active,
    Completed,
}

/// Everything `start` needs besides the session itself.
#[derive(Clone, Copy, Debug)]
pub struct StartRequest<'a> {
    pub character: CharacterId,
    pub material: &'a Material,
    pub node: Option<&'a GatheringNode>,
    pub goal: u32,
    pub discipline_level: u8,
    pub character_level: u8,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GatheringSession {
    pub character: CharacterId,
    pub discipline: Discipline,
    pub material: MaterialId,
    pub node: Option<NodeId>,
    pub goal: u32,
    completed: u32,
    /// Sum of yields from successful units, paid out on collect or cancel.
    banked: u32,
    pub started_at: Timestamp,
    last_settled_at: Timestamp,
    status: SessionStatus,
    pub seed: u64,
}

impl GatheringSession {
    /// Validates a start request and opens a session at `now`.
    ///
    /// Checks run in this order: goal, node material, node depletion,
    /// discipline level, character level.
    pub fn start(request: StartRequest<'_>, now: Timestamp) -> Result<Self, SessionError> {
        let StartRequest {
            character,
            material,
            node,
            goal,
            discipline_level,
            character_level,
        } = request;

        if goal < 1 {
            return Err(ValidationError::InvalidGoal { goal }.into());
        }

        if let Some(node) = node {
            if node.material != material.id {
                return Err(SessionError::NodeMaterialMismatch {
                    node: node.id,
                    expected: material.id.clone(),
                    found: node.material.clone(),
                });
            }
            if node.is_depleted() {
                return Err(NodeError::Depleted {
                    node: node.id,
                    respawn_at: node.respawn_at(),
                }
                .into());
            }
        }

        Requirement::check(
            RequirementKind::DisciplineLevel(material.discipline),
            u32::from(discipline_level),
            u32::from(material.required_level),
        )
        .map_err(SessionError::RequirementNotMet)?;
        Requirement::check(
            RequirementKind::CharacterLevel,
            u32::from(character_level),
            u32::from(material.required_character_level),
        )
        .map_err(SessionError::RequirementNotMet)?;

        Ok(Self {
            character,
            discipline: material.discipline,
            material: material.id.clone(),
            node: node.map(|node| node.id),
            goal,
            completed: 0,
            banked: 0,
            started_at: now,
            last_settled_at: now,
            status: SessionStatus::Active,
            seed: session_seed(character.0, now.as_millis()),
        })
    }

    pub fn completed(&self) -> u32 {
        self.completed
    }

    pub fn remaining(&self) -> u32 {
        self.goal - self.completed
    }

    pub fn banked(&self) -> u32 {
        self.banked
    }

    pub fn last_settled_at(&self) -> Timestamp {
        self.last_settled_at
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_complete(&self) -> bool {
        self.status == SessionStatus::Completed
    }

    /// Drops elapsed time up to `until` without gathering anything, e.g. the
    /// wait for a depleted node to respawn. Returns the milliseconds dropped.
    pub fn forfeit_until(&mut self, until: Timestamp) -> u64 {
        if self.is_complete() || until <= self.last_settled_at {
            return 0;
        }
        let dropped = until.millis_since(self.last_settled_at);
        self.last_settled_at = until;
        dropped
    }

    /// Milliseconds until the next unit lands at `duration_ms` per unit.
    pub fn time_to_next_unit(&self, duration_ms: u64, now: Timestamp) -> Option<u64> {
        if self.is_complete() {
            return None;
        }
        let duration = duration_ms.max(1);
        let into_unit = now.millis_since(self.last_settled_at) % duration;
        Some(duration - into_unit)
    }
}
