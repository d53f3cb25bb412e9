//! The gathering service: every operation a transport can call.
//!
//! Each call reads the entities it needs together with their versions,
//! runs the pure `gathering-core` rules at one timestamp taken from the
//! [`Clock`], and commits all resulting writes as a single [`ChangeSet`].
//! The service keeps no state of its own between calls.
mod builder;
mod nodes;
mod progression;
mod sessions;
mod tools;

pub use builder::GatheringServiceBuilder;

use std::sync::Arc;

use gathering_core::{
    BonusComposer, CharacterId, ComposedRates, Discipline, EquippedTools, EventOracle,
    GatheringEnv, GatheringNode, Material, MaterialId, MaterialOracle, Modifiers, NodeError, NodeId,
    SessionError, SkillRecord, SpecializationOracle, SpecializationSelection, Timestamp,
};
use tracing::{debug, warn};

use crate::api::{Result, RuntimeError};
use crate::clock::Clock;
use crate::collaborators::{CharacterStore, InventoryStore};
use crate::events::EventBus;
use crate::oracle::OracleManager;
use crate::repository::{ChangeSet, CommitReceipt, GatheringStore, RepositoryError, Versioned};

/// Orchestrates sessions, nodes, tools and progression over a store.
pub struct GatheringService {
    store: Arc<dyn GatheringStore>,
    inventory: Arc<dyn InventoryStore>,
    characters: Arc<dyn CharacterStore>,
    oracles: OracleManager,
    clock: Arc<dyn Clock>,
    events: EventBus,
    composer: BonusComposer,
}

impl GatheringService {
    pub fn builder() -> GatheringServiceBuilder {
        GatheringServiceBuilder::new()
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn oracles(&self) -> &OracleManager {
        &self.oracles
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    fn env(&self) -> GatheringEnv<'_> {
        self.oracles.as_env()
    }

    // ===== shared reads =====

    fn material(&self, id: &MaterialId) -> Result<Material> {
        self.env()
            .materials
            .material(id)
            .ok_or_else(|| SessionError::MaterialNotFound { material: id.clone() }.into())
    }

    fn node(&self, id: NodeId) -> Result<Versioned<GatheringNode>> {
        self.store
            .node(id)?
            .ok_or_else(|| NodeError::NotFound { node: id }.into())
    }

    fn loadout(&self, character: CharacterId) -> Result<Versioned<EquippedTools>> {
        self.store
            .tools(character)?
            .ok_or(RuntimeError::CharacterNotInitialized { character })
    }

    fn discipline_level(
        &self,
        character: CharacterId,
        discipline: Discipline,
    ) -> Result<(u8, Option<Versioned<SkillRecord>>)> {
        let record = self.store.skill(character, discipline)?;
        let level = record
            .as_ref()
            .map_or(gathering_core::GatheringConfig::MIN_LEVEL, |record| {
                record.value.level()
            });
        Ok((level, record))
    }

    /// Modifiers in force for `material` at `now`.
    fn modifiers(
        &self,
        material: &Material,
        tools: &EquippedTools,
        selection: Option<&SpecializationSelection>,
        node: Option<&GatheringNode>,
        now: Timestamp,
    ) -> Modifiers {
        let mut modifiers = Modifiers::new();

        if let Some(tool) = tools.modifier(material.discipline) {
            modifiers = modifiers.with_tool(tool);
        }
        if let Some(selection) = selection
            && let Some(definition) = self
                .env()
                .specializations
                .specialization(&selection.specialization)
        {
            modifiers = modifiers.with_specialization(definition.modifiers);
        }
        if let Some(hotspot) = node.and_then(|node| node.active_hotspot(now)) {
            modifiers = modifiers.with_hotspot(hotspot);
        }

        let zone = node.map(|node| node.zone);
        for event in self.env().events.matching_events(zone, &material.id, now) {
            modifiers = modifiers.with_event(event.modifier());
        }

        modifiers
    }

    fn compose(
        &self,
        material: &Material,
        tools: &EquippedTools,
        selection: Option<&SpecializationSelection>,
        node: Option<&GatheringNode>,
        now: Timestamp,
    ) -> ComposedRates {
        let modifiers = self.modifiers(material, tools, selection, node, now);
        self.composer.compose(&material.base_rates(), &modifiers)
    }

    // ===== writes =====

    /// Commits `changes`, turning a lost race into a retryable error.
    ///
    /// Returns `None` without touching the store when there is nothing to write.
    fn commit(&self, operation: &'static str, changes: ChangeSet) -> Result<Option<CommitReceipt>> {
        if changes.is_empty() {
            return Ok(None);
        }

        match self.store.commit(changes) {
            Ok(receipt) => {
                debug!(
                    operation,
                    revision = receipt.revision,
                    applied = receipt.applied,
                    "committed change set"
                );
                Ok(Some(receipt))
            }
            Err(RepositoryError::Conflict {
                entity,
                expected,
                found,
            }) => {
                warn!(
                    operation,
                    %entity,
                    ?expected,
                    ?found,
                    "optimistic commit lost a race"
                );
                Err(RuntimeError::ConcurrencyConflict { entity })
            }
            Err(error) => Err(error.into()),
        }
    }
}

impl std::fmt::Debug for GatheringService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatheringService")
            .field("oracles", &self.oracles)
            .field("composer", &self.composer)
            .finish_non_exhaustive()
    }
}
