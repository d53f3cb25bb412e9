//! File-backed [`GatheringStore`] that persists a bincode snapshot.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use fd_lock::RwLock as FileLock;

use gathering_core::{
    CharacterId, Discipline, EquippedTools, GatheringNode, GatheringSession, NodeId, SkillRecord,
    SpecializationSelection, ZoneId,
};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::repository::{
    ChangeSet, CommitReceipt, GatheringStore, InMemoryGatheringStore, RepositoryError, Result,
    StoreState, Versioned,
};

/// Bumped whenever the layout of [`StoreState`] changes.
const SNAPSHOT_FORMAT: u32 = 2;

/// Snapshot-backed store for one-shot processes such as the CLI.
///
/// # File Format
///
/// The whole store is written as one bincode blob `(format, state)` after
/// every successful commit. Writes go to `<path>.tmp` and are renamed over
/// the snapshot, so a crash leaves either the old or the new snapshot.
///
/// # Sharing
///
/// Several stores (or processes) may open the same path. Each commit holds
/// an exclusive advisory lock on `<path>.lock`, reloads the snapshot if
/// another writer advanced it, and only then checks versions. A stale read
/// therefore surfaces as [`RepositoryError::Conflict`] instead of silently
/// overwriting the other writer's commit.
pub struct FileSnapshotStore {
    path: PathBuf,
    inner: InMemoryGatheringStore,
}

impl FileSnapshotStore {
    /// Opens `path`, starting empty if the file does not exist yet.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let state = load_state(&path)?.unwrap_or_default();
        tracing::debug!(
            "Loaded gathering snapshot r{} from {}",
            state.revision(),
            path.display()
        );

        Ok(Self {
            path,
            inner: InMemoryGatheringStore::from_state(state),
        })
    }

    /// Picks up commits another writer persisted since this store last looked.
    fn reload(&self) -> Result<()> {
        let Some(state) = load_state(&self.path)? else {
            return Ok(());
        };
        if state.revision() != self.inner.revision()? {
            tracing::debug!(
                "Reloading gathering snapshot r{} from {}",
                state.revision(),
                self.path.display()
            );
            self.inner.replace_state(state)?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GatheringStore for FileSnapshotStore {
    fn session(&self, character: CharacterId) -> Result<Option<Versioned<GatheringSession>>> {
        self.inner.session(character)
    }

    fn node(&self, id: NodeId) -> Result<Option<Versioned<GatheringNode>>> {
        self.inner.node(id)
    }

    fn zone_nodes(&self, zone: ZoneId) -> Result<Vec<Versioned<GatheringNode>>> {
        self.inner.zone_nodes(zone)
    }

    fn tools(&self, character: CharacterId) -> Result<Option<Versioned<EquippedTools>>> {
        self.inner.tools(character)
    }

    fn skill(
        &self,
        character: CharacterId,
        discipline: Discipline,
    ) -> Result<Option<Versioned<SkillRecord>>> {
        self.inner.skill(character, discipline)
    }

    fn specialization(
        &self,
        character: CharacterId,
        discipline: Discipline,
    ) -> Result<Option<Versioned<SpecializationSelection>>> {
        self.inner.specialization(character, discipline)
    }

    fn commit(&self, changes: ChangeSet) -> Result<CommitReceipt> {
        let path = &self.path;
        let mut lock = FileLock::new(open_lock_file(path)?);
        let _held = lock.write()?;
        self.reload()?;

        self.inner.commit_with(changes, |state| {
            write_snapshot(path, &(SNAPSHOT_FORMAT, state))?;
            tracing::debug!("Saved gathering snapshot r{} to {}", state.revision(), path.display());
            Ok(())
        })
    }
}

fn load_state(path: &Path) -> Result<Option<StoreState>> {
    match read_snapshot::<(u32, StoreState)>(path)? {
        Some((SNAPSHOT_FORMAT, state)) => Ok(Some(state)),
        Some((format, _)) => Err(RepositoryError::CorruptedData(format!(
            "unsupported snapshot format {format} in {}",
            path.display()
        ))),
        None => Ok(None),
    }
}

/// Opens (creating if needed) the advisory lock file that guards `path`.
///
/// The lock lives in its own file because the snapshot itself is replaced
/// by rename on every write.
pub fn open_lock_file(path: &Path) -> Result<File> {
    create_parent(path)?;
    let file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(path.with_extension("lock"))?;
    Ok(file)
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Serializes `value` with bincode and atomically replaces `path`.
pub fn write_snapshot<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let bytes =
        bincode::serialize(value).map_err(|e| RepositoryError::Serialization(e.to_string()))?;

    create_parent(path)?;

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, bytes)?;
    fs::rename(&temp_path, path)?;
    Ok(())
}

/// Reads a bincode snapshot; `None` when `path` does not exist.
pub fn read_snapshot<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let bytes = fs::read(path)?;
    let value = bincode::deserialize(&bytes)
        .map_err(|e| RepositoryError::CorruptedData(format!("{}: {}", path.display(), e)))?;
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gathering_core::{MaterialId, NodeKind, Timestamp};
    use tempfile::TempDir;

    fn oak(id: u64) -> GatheringNode {
        GatheringNode::spawn(
            NodeId(id),
            ZoneId(1),
            NodeKind::Tree,
            MaterialId::new("oak_log"),
            3,
            30_000,
        )
    }

    #[test]
    fn commits_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("world.bin");

        {
            let store = FileSnapshotStore::open(&path).unwrap();
            let mut changes = ChangeSet::new();
            changes.put_node(oak(7), None);
            store.commit(changes).unwrap();

            let read = store.node(NodeId(7)).unwrap().unwrap();
            let mut harvested = read.value.clone();
            harvested.harvest(Timestamp::from_secs(1)).unwrap();
            let mut changes = ChangeSet::new();
            changes.put_node(harvested, Some(read.version));
            store.commit(changes).unwrap();
        }

        let reopened = FileSnapshotStore::open(&path).unwrap();
        let node = reopened.node(NodeId(7)).unwrap().unwrap();
        assert_eq!(node.version, 2);
        assert_eq!(node.value.durability(), 2);
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn conflicting_commit_is_not_persisted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("world.bin");
        let store = FileSnapshotStore::open(&path).unwrap();

        let mut changes = ChangeSet::new();
        changes.put_node(oak(1), None);
        store.commit(changes.clone()).unwrap();
        assert!(store.commit(changes).is_err());

        let reopened = FileSnapshotStore::open(&path).unwrap();
        assert_eq!(reopened.node(NodeId(1)).unwrap().unwrap().version, 1);
    }

    #[test]
    fn stores_sharing_a_path_keep_each_others_commits() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("world.bin");
        let first = FileSnapshotStore::open(&path).unwrap();
        let second = FileSnapshotStore::open(&path).unwrap();

        let mut changes = ChangeSet::new();
        changes.put_node(oak(1), None);
        first.commit(changes).unwrap();

        let mut changes = ChangeSet::new();
        changes.put_node(oak(2), None);
        second.commit(changes).unwrap();

        let reopened = FileSnapshotStore::open(&path).unwrap();
        assert!(reopened.node(NodeId(1)).unwrap().is_some());
        assert!(reopened.node(NodeId(2)).unwrap().is_some());
        assert!(path.with_extension("lock").exists());
    }

    #[test]
    fn stale_writer_gets_a_conflict_instead_of_overwriting() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("world.bin");
        let first = FileSnapshotStore::open(&path).unwrap();
        let mut changes = ChangeSet::new();
        changes.put_node(oak(1), None);
        first.commit(changes).unwrap();

        let second = FileSnapshotStore::open(&path).unwrap();
        let stale = second.node(NodeId(1)).unwrap().unwrap();

        let read = first.node(NodeId(1)).unwrap().unwrap();
        let mut harvested = read.value.clone();
        harvested.harvest(Timestamp::from_secs(1)).unwrap();
        let mut changes = ChangeSet::new();
        changes.put_node(harvested, Some(read.version));
        first.commit(changes).unwrap();

        let mut harvested = stale.value.clone();
        harvested.harvest(Timestamp::from_secs(2)).unwrap();
        let mut changes = ChangeSet::new();
        changes.put_node(harvested, Some(stale.version));
        assert!(matches!(
            second.commit(changes),
            Err(RepositoryError::Conflict { .. })
        ));

        // The losing store now sees the winner's write.
        let node = second.node(NodeId(1)).unwrap().unwrap();
        assert_eq!(node.value.durability(), 2);
        let reopened = FileSnapshotStore::open(&path).unwrap();
        assert_eq!(reopened.node(NodeId(1)).unwrap().unwrap().value.durability(), 2);
    }

    #[test]
    fn garbage_file_is_reported_as_corrupted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("world.bin");
        fs::write(&path, b"not a snapshot").unwrap();
        assert!(matches!(
            FileSnapshotStore::open(&path),
            Err(RepositoryError::CorruptedData(_))
        ));
    }
}
