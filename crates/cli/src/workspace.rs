//! Everything one CLI invocation needs, loaded from and saved to disk.
//!
//! Gathering state lives in the snapshot store. Inventory and character
//! levels belong to other systems; the CLI stands in for them with an
//! in-memory copy kept in a sidecar file next to the snapshot.
//!
//! The sidecar is read at open and written at exit, so invocations sharing
//! a data directory run one at a time under [`Workspace::lock`].

use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use gathering_content::ContentFactory;
use gathering_core::CharacterId;
use fd_lock::RwLock as FileLock;
use gathering_runtime::repository::{open_lock_file, read_snapshot, write_snapshot};
use gathering_runtime::{
    FileSnapshotStore, GatheringService, InMemoryCharacters, InMemoryInventory, InventorySnapshot,
    OracleManager, RuntimeConfig, SystemClock,
};
use serde::{Deserialize, Serialize};

const SNAPSHOT_FILE: &str = "world.bin";
const SIDECAR_FILE: &str = "collaborators.bin";
/// Stem of the invocation lock (`cli.lock`), distinct from the store's own.
const LOCK_STEM: &str = "cli";

/// Inventory and character levels as stored in the sidecar file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct CollaboratorState {
    inventory: InventorySnapshot,
    levels: HashMap<CharacterId, u8>,
}

pub struct Workspace {
    pub service: GatheringService,
    pub inventory: Arc<InMemoryInventory>,
    pub characters: Arc<InMemoryCharacters>,
    sidecar: PathBuf,
}

/// Where the world snapshot lives for `config` and `data_dir`.
pub fn snapshot_path(config: &RuntimeConfig, data_dir: &Path) -> PathBuf {
    config
        .snapshot_path
        .clone()
        .unwrap_or_else(|| data_dir.join(SNAPSHOT_FILE))
}

impl Workspace {
    /// Advisory lock serializing whole invocations on `snapshot_path`.
    pub fn lock(snapshot_path: &Path) -> Result<FileLock<File>> {
        let file = open_lock_file(&snapshot_path.with_file_name(LOCK_STEM))
            .with_context(|| format!("opening lock next to {}", snapshot_path.display()))?;
        Ok(FileLock::new(file))
    }

    /// Loads content, the world snapshot at `snapshot_path` and its sidecar.
    pub fn open(config: RuntimeConfig, snapshot_path: &Path) -> Result<Self> {
        let content = match &config.content_dir {
            Some(dir) => ContentFactory::new(dir)
                .load_all()
                .with_context(|| format!("loading content from {}", dir.display()))?,
            None => ContentFactory::builtin().context("loading built-in content")?,
        };

        let store = FileSnapshotStore::open(snapshot_path)
            .with_context(|| format!("opening snapshot {}", snapshot_path.display()))?;

        let sidecar = snapshot_path.with_file_name(SIDECAR_FILE);
        let state: CollaboratorState = read_snapshot(&sidecar)
            .with_context(|| format!("reading {}", sidecar.display()))?
            .unwrap_or_default();
        let inventory = Arc::new(InMemoryInventory::from_snapshot(state.inventory));
        let characters = Arc::new(InMemoryCharacters::from_levels(state.levels));

        let service = GatheringService::builder()
            .config(config)
            .store(Arc::new(store))
            .inventory(inventory.clone())
            .characters(characters.clone())
            .oracles(OracleManager::from_content(content))
            .clock(Arc::new(SystemClock))
            .build()?;

        tracing::debug!(
            snapshot = %snapshot_path.display(),
            sidecar = %sidecar.display(),
            "workspace opened"
        );

        Ok(Self {
            service,
            inventory,
            characters,
            sidecar,
        })
    }

    /// Writes inventory and character levels back to the sidecar.
    pub fn save(&self) -> Result<()> {
        let state = CollaboratorState {
            inventory: self.inventory.snapshot()?,
            levels: self.characters.levels()?,
        };
        write_snapshot(&self.sidecar, &state)
            .with_context(|| format!("writing {}", self.sidecar.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gathering_core::{MaterialId, ZoneId};
    use gathering_runtime::InventoryStore;
    use tempfile::TempDir;

    #[test]
    fn collaborator_state_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let snapshot = snapshot_path(&RuntimeConfig::default(), dir.path());
        let hero = CharacterId(7);
        let oak = MaterialId::new("oak_log");

        {
            let workspace = Workspace::open(RuntimeConfig::default(), &snapshot).unwrap();
            workspace.characters.set_level(hero, 12).unwrap();
            workspace.inventory.set_currency(hero, 250).unwrap();
            workspace.inventory.add_material(hero, &oak, 3).unwrap();
            workspace.service.seed_zone(ZoneId(1)).unwrap();
            workspace.save().unwrap();
        }

        let workspace = Workspace::open(RuntimeConfig::default(), &snapshot).unwrap();
        assert_eq!(workspace.characters.levels().unwrap().get(&hero), Some(&12));
        assert_eq!(workspace.inventory.currency(hero).unwrap(), 250);
        assert_eq!(workspace.inventory.quantity(hero, &oak).unwrap(), 3);
        assert!(!workspace.service.available_nodes(ZoneId(1)).unwrap().is_empty());
    }

    #[test]
    fn invocation_lock_is_exclusive() {
        let dir = TempDir::new().unwrap();
        let snapshot = snapshot_path(&RuntimeConfig::default(), dir.path());

        let mut held = Workspace::lock(&snapshot).unwrap();
        let _guard = held.write().unwrap();

        let mut other = Workspace::lock(&snapshot).unwrap();
        assert!(other.try_write().is_err());
    }
}
