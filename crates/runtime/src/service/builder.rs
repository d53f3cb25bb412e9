//! Builder for [`GatheringService`] with flexible configuration.

use std::sync::Arc;

use gathering_core::BonusComposer;

use super::GatheringService;
use crate::api::{Result, RuntimeError};
use crate::clock::{Clock, SystemClock};
use crate::collaborators::{CharacterStore, InventoryStore};
use crate::config::RuntimeConfig;
use crate::events::EventBus;
use crate::oracle::OracleManager;
use crate::repository::{GatheringStore, InMemoryGatheringStore};

/// Oracles and both collaborators are required; the store defaults to an
/// empty in-memory store and the clock to the system clock.
#[derive(Default)]
pub struct GatheringServiceBuilder {
    config: RuntimeConfig,
    store: Option<Arc<dyn GatheringStore>>,
    inventory: Option<Arc<dyn InventoryStore>>,
    characters: Option<Arc<dyn CharacterStore>>,
    oracles: Option<OracleManager>,
    clock: Option<Arc<dyn Clock>>,
    events: Option<EventBus>,
}

impl GatheringServiceBuilder {
    pub(super) fn new() -> Self {
        Self::default()
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn store(mut self, store: Arc<dyn GatheringStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn inventory(mut self, inventory: Arc<dyn InventoryStore>) -> Self {
        self.inventory = Some(inventory);
        self
    }

    pub fn characters(mut self, characters: Arc<dyn CharacterStore>) -> Self {
        self.characters = Some(characters);
        self
    }

    /// Set required oracle manager
    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Share an existing bus instead of creating one from the config.
    pub fn events(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    pub fn build(self) -> Result<GatheringService> {
        let oracles = self
            .oracles
            .ok_or(RuntimeError::MissingComponent { component: "oracles" })?;
        let inventory = self
            .inventory
            .ok_or(RuntimeError::MissingComponent {
                component: "an inventory store",
            })?;
        let characters = self
            .characters
            .ok_or(RuntimeError::MissingComponent {
                component: "a character store",
            })?;

        let composer = BonusComposer::from_config(oracles.config());
        let events = self
            .events
            .unwrap_or_else(|| EventBus::with_capacity(self.config.event_capacity));

        Ok(GatheringService {
            store: self
                .store
                .unwrap_or_else(|| Arc::new(InMemoryGatheringStore::new())),
            inventory,
            characters,
            oracles,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            events,
            composer,
        })
    }
}
