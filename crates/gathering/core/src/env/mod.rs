//! Traits describing read-only gathering content.
//!
//! Oracles expose the material catalog, tool catalog, specialization bundles,
//! seasonal events and zone seeding templates. [`GatheringEnv`] bundles them
//! so the rules can reach everything they need without coupling to concrete
//! implementations.
mod events;
mod materials;
mod rng;
mod specializations;
mod tools;
mod zones;

pub use events::{EventOracle, SeasonalEvent};
pub use materials::{Material, MaterialOracle, Rarity};
pub use rng::{PcgRng, RngOracle, session_seed, unit_seed};
pub use specializations::{SpecializationDefinition, SpecializationOracle};
pub use tools::{ToolDefinition, ToolOracle};
pub use zones::{NodeSpawn, ZoneDefinition, ZoneOracle};

use crate::config::GatheringConfig;

/// Aggregates the read-only oracles and rules configuration.
#[derive(Clone, Copy)]
pub struct GatheringEnv<'a> {
    pub materials: &'a dyn MaterialOracle,
    pub tools: &'a dyn ToolOracle,
    pub specializations: &'a dyn SpecializationOracle,
    pub events: &'a dyn EventOracle,
    pub zones: &'a dyn ZoneOracle,
    pub rng: &'a dyn RngOracle,
    pub config: &'a GatheringConfig,
}

impl<'a> GatheringEnv<'a> {
    pub fn new(
        materials: &'a dyn MaterialOracle,
        tools: &'a dyn ToolOracle,
        specializations: &'a dyn SpecializationOracle,
        events: &'a dyn EventOracle,
        zones: &'a dyn ZoneOracle,
        rng: &'a dyn RngOracle,
        config: &'a GatheringConfig,
    ) -> Self {
        Self {
            materials,
            tools,
            specializations,
            events,
            zones,
            rng,
            config,
        }
    }
}

impl std::fmt::Debug for GatheringEnv<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatheringEnv")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
