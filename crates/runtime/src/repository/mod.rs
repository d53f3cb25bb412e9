//! Persistence adapters for gathering state.
//!
//! Static content comes from oracles; everything that changes while playing
//! (sessions, nodes, tools, skills, specializations) lives behind
//! [`GatheringStore`].
mod changeset;
mod error;
mod file;
mod memory;
mod traits;

pub use changeset::{ChangeSet, Change, CommitReceipt, EntityKey, Record, Versioned};
pub use error::{RepositoryError, Result};
pub use file::{FileSnapshotStore, open_lock_file, read_snapshot, write_snapshot};
pub use memory::{InMemoryGatheringStore, StoreState};
pub use traits::GatheringStore;
