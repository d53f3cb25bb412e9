//! Repository contract for gathering state.

use gathering_core::{
    CharacterId, Discipline, EquippedTools, GatheringNode, GatheringSession, NodeId, SkillRecord,
    SpecializationSelection, ZoneId,
};

use super::{ChangeSet, CommitReceipt, Result, Versioned};

/// Persistent store for every mutable gathering entity.
///
/// Reads return the entity together with its version. All writes go through
/// [`GatheringStore::commit`], which checks every expected version and
/// applies the whole change set or nothing.
pub trait GatheringStore: Send + Sync {
    fn session(&self, character: CharacterId) -> Result<Option<Versioned<GatheringSession>>>;

    fn node(&self, id: NodeId) -> Result<Option<Versioned<GatheringNode>>>;

    /// All nodes of `zone`, ordered by id.
    fn zone_nodes(&self, zone: ZoneId) -> Result<Vec<Versioned<GatheringNode>>>;

    fn tools(&self, character: CharacterId) -> Result<Option<Versioned<EquippedTools>>>;

    fn skill(
        &self,
        character: CharacterId,
        discipline: Discipline,
    ) -> Result<Option<Versioned<SkillRecord>>>;

    fn specialization(
        &self,
        character: CharacterId,
        discipline: Discipline,
    ) -> Result<Option<Versioned<SpecializationSelection>>>;

    /// Validates every expected version, then applies all changes.
    ///
    /// Fails with [`super::RepositoryError::Conflict`] naming the first stale
    /// entity; nothing is written in that case.
    fn commit(&self, changes: ChangeSet) -> Result<CommitReceipt>;
}
