//! In-memory [`GatheringStore`] for tests, local runs and as the snapshot
//! store's working copy.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use gathering_core::{
    CharacterId, Discipline, EquippedTools, GatheringNode, GatheringSession, NodeId, SkillRecord,
    SpecializationSelection, ZoneId,
};
use serde::{Deserialize, Serialize};

use crate::repository::{
    Change, ChangeSet, CommitReceipt, EntityKey, GatheringStore, Record, RepositoryError, Result,
    Versioned,
};

/// Every stored entity plus the store-wide revision counter.
///
/// Versions come from one counter shared by all entities, so a deleted and
/// re-created entity never reuses a version a stale reader may still hold.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StoreState {
    revision: u64,
    sessions: HashMap<CharacterId, Versioned<GatheringSession>>,
    nodes: BTreeMap<NodeId, Versioned<GatheringNode>>,
    tools: HashMap<CharacterId, Versioned<EquippedTools>>,
    skills: HashMap<(CharacterId, Discipline), Versioned<SkillRecord>>,
    specializations: HashMap<(CharacterId, Discipline), Versioned<SpecializationSelection>>,
}

impl StoreState {
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn version_of(&self, key: EntityKey) -> Option<u64> {
        match key {
            EntityKey::Session(character) => self.sessions.get(&character).map(|v| v.version),
            EntityKey::Node(id) => self.nodes.get(&id).map(|v| v.version),
            EntityKey::Tools(character) => self.tools.get(&character).map(|v| v.version),
            EntityKey::Skill(character, discipline) => {
                self.skills.get(&(character, discipline)).map(|v| v.version)
            }
            EntityKey::Specialization(character, discipline) => self
                .specializations
                .get(&(character, discipline))
                .map(|v| v.version),
        }
    }

    fn check(&self, changes: &ChangeSet) -> Result<()> {
        for change in changes.changes() {
            let found = self.version_of(change.key);
            if found != change.expected {
                tracing::debug!(
                    entity = %change.key,
                    ?found,
                    expected = ?change.expected,
                    "Rejecting stale change set"
                );
                return Err(RepositoryError::Conflict {
                    entity: change.key,
                    expected: change.expected,
                    found,
                });
            }
        }
        Ok(())
    }

    fn apply(&mut self, changes: ChangeSet) -> CommitReceipt {
        if changes.is_empty() {
            return CommitReceipt {
                revision: self.revision,
                applied: 0,
            };
        }

        self.revision += 1;
        let revision = self.revision;
        let applied = changes.len();
        for Change { key, record, .. } in changes.into_changes() {
            match record {
                Some(record) => self.put(record, revision),
                None => self.remove(key),
            }
        }
        CommitReceipt { revision, applied }
    }

    fn put(&mut self, record: Record, revision: u64) {
        match record {
            Record::Session(session) => {
                self.sessions
                    .insert(session.character, Versioned::new(session, revision));
            }
            Record::Node(node) => {
                self.nodes.insert(node.id, Versioned::new(node, revision));
            }
            Record::Tools(tools) => {
                self.tools
                    .insert(tools.character, Versioned::new(tools, revision));
            }
            Record::Skill(skill) => {
                self.skills.insert(
                    (skill.character, skill.discipline),
                    Versioned::new(skill, revision),
                );
            }
            Record::Specialization(selection) => {
                self.specializations.insert(
                    (selection.character, selection.discipline),
                    Versioned::new(selection, revision),
                );
            }
        }
    }

    fn remove(&mut self, key: EntityKey) {
        match key {
            EntityKey::Session(character) => {
                self.sessions.remove(&character);
            }
            EntityKey::Node(id) => {
                self.nodes.remove(&id);
            }
            EntityKey::Tools(character) => {
                self.tools.remove(&character);
            }
            EntityKey::Skill(character, discipline) => {
                self.skills.remove(&(character, discipline));
            }
            EntityKey::Specialization(character, discipline) => {
                self.specializations.remove(&(character, discipline));
            }
        }
    }
}

/// In-memory implementation of [`GatheringStore`].
///
/// One `RwLock` guards the whole state; commits validate and apply under a
/// single write lock.
#[derive(Debug, Default)]
pub struct InMemoryGatheringStore {
    state: RwLock<StoreState>,
}

impl InMemoryGatheringStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from a previously captured state.
    pub fn from_state(state: StoreState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> Result<StoreState> {
        Ok(self.read()?.clone())
    }

    pub fn revision(&self) -> Result<u64> {
        Ok(self.read()?.revision)
    }

    /// Replaces the whole state, e.g. with one another writer persisted.
    pub fn replace_state(&self, state: StoreState) -> Result<()> {
        *self.write()? = state;
        Ok(())
    }

    /// Commits only if `persist` accepts the resulting state.
    ///
    /// The new state is built on a copy; the live state is replaced after
    /// `persist` returns `Ok`.
    pub fn commit_with<F>(&self, changes: ChangeSet, persist: F) -> Result<CommitReceipt>
    where
        F: FnOnce(&StoreState) -> Result<()>,
    {
        let mut state = self.write()?;
        state.check(&changes)?;
        if changes.is_empty() {
            return Ok(CommitReceipt {
                revision: state.revision,
                applied: 0,
            });
        }

        let mut next = state.clone();
        let receipt = next.apply(changes);
        persist(&next)?;
        *state = next;
        Ok(receipt)
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, StoreState>> {
        self.state.read().map_err(|_| RepositoryError::LockPoisoned)
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, StoreState>> {
        self.state.write().map_err(|_| RepositoryError::LockPoisoned)
    }
}

impl GatheringStore for InMemoryGatheringStore {
    fn session(&self, character: CharacterId) -> Result<Option<Versioned<GatheringSession>>> {
        Ok(self.read()?.sessions.get(&character).cloned())
    }

    fn node(&self, id: NodeId) -> Result<Option<Versioned<GatheringNode>>> {
        Ok(self.read()?.nodes.get(&id).cloned())
    }

    fn zone_nodes(&self, zone: ZoneId) -> Result<Vec<Versioned<GatheringNode>>> {
        Ok(self
            .read()?
            .nodes
            .values()
            .filter(|node| node.value.zone == zone)
            .cloned()
            .collect())
    }

    fn tools(&self, character: CharacterId) -> Result<Option<Versioned<EquippedTools>>> {
        Ok(self.read()?.tools.get(&character).cloned())
    }

    fn skill(
        &self,
        character: CharacterId,
        discipline: Discipline,
    ) -> Result<Option<Versioned<SkillRecord>>> {
        Ok(self.read()?.skills.get(&(character, discipline)).cloned())
    }

    fn specialization(
        &self,
        character: CharacterId,
        discipline: Discipline,
    ) -> Result<Option<Versioned<SpecializationSelection>>> {
        Ok(self
            .read()?
            .specializations
            .get(&(character, discipline))
            .cloned())
    }

    fn commit(&self, changes: ChangeSet) -> Result<CommitReceipt> {
        let mut state = self.write()?;
        state.check(&changes)?;
        Ok(state.apply(changes))
    }
}
