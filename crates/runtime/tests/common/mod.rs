#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use gathering_content::ContentFactory;
use gathering_core::{CharacterId, MaterialId, NodeId, Timestamp, ZoneId};
use gathering_runtime::{
    CollaboratorError, GatheringService, GatheringStore, InMemoryCharacters,
    InMemoryGatheringStore, InMemoryInventory, InventoryStore, ManualClock, OracleManager,
};

pub const HERO: CharacterId = CharacterId(1);
pub const RIVAL: CharacterId = CharacterId(2);

/// Outside every built-in seasonal event window.
pub const T0: Timestamp = Timestamp::from_millis(1_700_000_000_000);

pub const WOODS: ZoneId = ZoneId(1);
pub const MINES: ZoneId = ZoneId(2);

/// Node ids assigned by `seed_zone`, in spawn-table order.
pub fn seeded_node(zone: ZoneId, index: u64) -> NodeId {
    NodeId((u64::from(zone.0) << 32) | index)
}

/// First oak tree of the woods (tier 1, durability 4, 120 s respawn).
pub fn oak_tree() -> NodeId {
    seeded_node(WOODS, 0)
}

/// First willow tree of the woods (tier 2, durability 3, 300 s respawn).
pub fn willow_tree() -> NodeId {
    seeded_node(WOODS, 3)
}

pub struct Harness {
    pub service: Arc<GatheringService>,
    pub store: Arc<InMemoryGatheringStore>,
    pub inventory: Arc<InMemoryInventory>,
    pub characters: Arc<InMemoryCharacters>,
    pub clock: Arc<ManualClock>,
}

impl Harness {
    /// Built-in content, clock at [`T0`], [`HERO`] and [`RIVAL`] initialized.
    pub fn new() -> Self {
        Self::with_store(Arc::new(InMemoryGatheringStore::new()))
    }

    pub fn with_store(store: Arc<InMemoryGatheringStore>) -> Self {
        let content = ContentFactory::builtin().expect("built-in content loads");
        let inventory = Arc::new(InMemoryInventory::new());
        let characters = Arc::new(InMemoryCharacters::new());
        let clock = Arc::new(ManualClock::new(T0));
        for character in [HERO, RIVAL] {
            characters.set_level(character, 1).unwrap();
        }

        let service = GatheringService::builder()
            .oracles(OracleManager::from_content(content))
            .store(store.clone() as Arc<dyn GatheringStore>)
            .inventory(inventory.clone())
            .characters(characters.clone())
            .clock(clock.clone())
            .build()
            .expect("service builds");

        for character in [HERO, RIVAL] {
            service.initialize_character(character).unwrap();
        }

        Self {
            service: Arc::new(service),
            store,
            inventory,
            characters,
            clock,
        }
    }

    pub fn seeded() -> Self {
        let harness = Self::new();
        harness.service.seed_zone(WOODS).unwrap();
        harness.service.seed_zone(MINES).unwrap();
        harness
    }

    pub fn advance(&self, millis: u64) -> Timestamp {
        self.clock.advance(millis)
    }
}

/// Inventory whose material grants can be switched off.
#[derive(Default)]
pub struct FlakyInventory {
    pub inner: InMemoryInventory,
    failing: AtomicBool,
}

impl FlakyInventory {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl InventoryStore for FlakyInventory {
    fn add_material(
        &self,
        character: CharacterId,
        material: &MaterialId,
        quantity: u32,
    ) -> Result<(), CollaboratorError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(CollaboratorError::Backend("inventory down".into()));
        }
        self.inner.add_material(character, material, quantity)
    }

    fn currency(&self, character: CharacterId) -> Result<u64, CollaboratorError> {
        self.inner.currency(character)
    }

    fn debit_currency(&self, character: CharacterId, amount: u64) -> Result<u64, CollaboratorError> {
        self.inner.debit_currency(character, amount)
    }

    fn credit_currency(&self, character: CharacterId, amount: u64) -> Result<u64, CollaboratorError> {
        self.inner.credit_currency(character, amount)
    }
}

/// Service over [`FlakyInventory`], clock at [`T0`], [`HERO`] initialized.
pub fn flaky_service() -> (GatheringService, Arc<FlakyInventory>, Arc<ManualClock>) {
    let content = ContentFactory::builtin().expect("built-in content loads");
    let inventory = Arc::new(FlakyInventory::default());
    let characters = Arc::new(InMemoryCharacters::new());
    characters.set_level(HERO, 1).unwrap();
    let clock = Arc::new(ManualClock::new(T0));

    let service = GatheringService::builder()
        .oracles(OracleManager::from_content(content))
        .inventory(inventory.clone())
        .characters(characters)
        .clock(clock.clone())
        .build()
        .expect("service builds");
    service.initialize_character(HERO).unwrap();

    (service, inventory, clock)
}
