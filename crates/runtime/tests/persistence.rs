mod common;

use std::sync::Arc;

use common::{HERO, T0};
use gathering_content::ContentFactory;
use gathering_core::{Discipline, MaterialId};
use gathering_runtime::{
    FileSnapshotStore, GatheringService, InMemoryCharacters, InMemoryInventory, ManualClock,
    OracleManager,
};
use tempfile::tempdir;

fn service_at(
    path: &std::path::Path,
    clock: Arc<ManualClock>,
    inventory: Arc<InMemoryInventory>,
) -> GatheringService {
    let characters = Arc::new(InMemoryCharacters::new());
    characters.set_level(HERO, 1).unwrap();
    GatheringService::builder()
        .oracles(OracleManager::from_content(ContentFactory::builtin().unwrap()))
        .store(Arc::new(FileSnapshotStore::open(path).unwrap()))
        .inventory(inventory)
        .characters(characters)
        .clock(clock)
        .build()
        .unwrap()
}

#[test]
fn sessions_survive_a_restart() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("gathering.bin");
    let clock = Arc::new(ManualClock::new(T0));
    let inventory = Arc::new(InMemoryInventory::new());
    let oak = MaterialId::new("oak_log");

    {
        let service = service_at(&path, clock.clone(), inventory.clone());
        service.initialize_character(HERO).unwrap();
        service.start_session(HERO, &oak, 3, None).unwrap();
    }

    clock.advance(9_000);
    let service = service_at(&path, clock.clone(), inventory.clone());
    let collected = service.collect_session(HERO).unwrap();
    assert_eq!(collected.quantity, 3);
    assert_eq!(
        service.skill(HERO, Discipline::Woodcutting).unwrap().experience,
        30
    );

    drop(service);
    let reopened = service_at(&path, clock, inventory);
    assert!(reopened.poll_session(HERO).is_err());
    assert_eq!(
        reopened
            .skill(HERO, Discipline::Woodcutting)
            .unwrap()
            .experience,
        30
    );
}
