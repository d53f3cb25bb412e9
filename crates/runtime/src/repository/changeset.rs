//! Versioned records and the unit of work committed by a store.

use std::fmt;

use gathering_core::{
    CharacterId, Discipline, EquippedTools, GatheringNode, GatheringSession, NodeId, SkillRecord,
    SpecializationSelection,
};
use serde::{Deserialize, Serialize};

/// A stored value together with the store revision that last wrote it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Versioned<T> {
    pub value: T,
    pub version: u64,
}

impl<T> Versioned<T> {
    pub fn new(value: T, version: u64) -> Self {
        Self { value, version }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Versioned<U> {
        Versioned {
            value: f(self.value),
            version: self.version,
        }
    }
}

/// Identity of one stored entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKey {
    Session(CharacterId),
    Node(NodeId),
    Tools(CharacterId),
    Skill(CharacterId, Discipline),
    Specialization(CharacterId, Discipline),
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKey::Session(character) => write!(f, "session of {character}"),
            EntityKey::Node(node) => write!(f, "{node}"),
            EntityKey::Tools(character) => write!(f, "tools of {character}"),
            EntityKey::Skill(character, discipline) => {
                write!(f, "{discipline} skill of {character}")
            }
            EntityKey::Specialization(character, discipline) => {
                write!(f, "{discipline} specialization of {character}")
            }
        }
    }
}

/// New value of an entity; `None` fields of [`Change`] mean deletion.
#[derive(Clone, Debug, PartialEq)]
pub enum Record {
    Session(GatheringSession),
    Node(GatheringNode),
    Tools(EquippedTools),
    Skill(SkillRecord),
    Specialization(SpecializationSelection),
}

impl Record {
    pub fn key(&self) -> EntityKey {
        match self {
            Record::Session(session) => EntityKey::Session(session.character),
            Record::Node(node) => EntityKey::Node(node.id),
            Record::Tools(tools) => EntityKey::Tools(tools.character),
            Record::Skill(skill) => EntityKey::Skill(skill.character, skill.discipline),
            Record::Specialization(selection) => {
                EntityKey::Specialization(selection.character, selection.discipline)
            }
        }
    }
}

/// One compare-and-swap write.
#[derive(Clone, Debug, PartialEq)]
pub struct Change {
    pub key: EntityKey,
    /// Version the caller read; `None` requires the entity to be absent.
    pub expected: Option<u64>,
    /// Value to store; `None` deletes the entity.
    pub record: Option<Record>,
}

/// Writes produced by one service call, applied all-or-nothing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChangeSet {
    changes: Vec<Change>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, record: Record, expected: Option<u64>) -> &mut Self {
        self.changes.push(Change {
            key: record.key(),
            expected,
            record: Some(record),
        });
        self
    }

    pub fn delete(&mut self, key: EntityKey, expected: u64) -> &mut Self {
        self.changes.push(Change {
            key,
            expected: Some(expected),
            record: None,
        });
        self
    }

    pub fn put_session(&mut self, session: GatheringSession, expected: Option<u64>) -> &mut Self {
        self.put(Record::Session(session), expected)
    }

    pub fn delete_session(&mut self, character: CharacterId, expected: u64) -> &mut Self {
        self.delete(EntityKey::Session(character), expected)
    }

    pub fn put_node(&mut self, node: GatheringNode, expected: Option<u64>) -> &mut Self {
        self.put(Record::Node(node), expected)
    }

    pub fn put_tools(&mut self, tools: EquippedTools, expected: Option<u64>) -> &mut Self {
        self.put(Record::Tools(tools), expected)
    }

    pub fn put_skill(&mut self, skill: SkillRecord, expected: Option<u64>) -> &mut Self {
        self.put(Record::Skill(skill), expected)
    }

    pub fn put_specialization(
        &mut self,
        selection: SpecializationSelection,
        expected: Option<u64>,
    ) -> &mut Self {
        self.put(Record::Specialization(selection), expected)
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    pub fn into_changes(self) -> Vec<Change> {
        self.changes
    }
}

/// Result of a successful commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommitReceipt {
    /// Store revision after the commit; every written entity carries it as
    /// its new version.
    pub revision: u64,
    pub applied: usize,
}
