//! File-based repository implementations.

mod snapshot;

pub use snapshot::{FileSnapshotStore, open_lock_file, read_snapshot, write_snapshot};
