//! Loaded content bundle with cross-file checks.

use std::collections::HashSet;

use gathering_core::{
    Discipline, GatheringConfig, Material, SeasonalEvent, SpecializationDefinition,
    ToolDefinition, ZoneDefinition,
};
use strum::IntoEnumIterator;

use crate::loaders::LoadResult;

/// Everything the runtime oracles are built from.
#[derive(Debug, Clone)]
pub struct GatheringContent {
    pub config: GatheringConfig,
    pub materials: Vec<Material>,
    pub tools: Vec<ToolDefinition>,
    pub specializations: Vec<SpecializationDefinition>,
    pub events: Vec<SeasonalEvent>,
    pub zones: Vec<ZoneDefinition>,
}

impl GatheringContent {
    /// Checks references between files.
    ///
    /// - every zone spawn names a known material
    /// - every event material filter names a known material
    /// - every discipline has a tier-1 tool to hand out at character creation
    pub fn validate(&self) -> LoadResult<()> {
        let materials: HashSet<_> = self.materials.iter().map(|m| &m.id).collect();

        for zone in &self.zones {
            for spawn in &zone.spawns {
                if !materials.contains(&spawn.material) {
                    anyhow::bail!(
                        "Zone {} spawns unknown material '{}'",
                        zone.id,
                        spawn.material
                    );
                }
            }
        }

        for event in &self.events {
            if let Some(unknown) = event.materials.iter().find(|m| !materials.contains(m)) {
                anyhow::bail!("Event '{}' filters unknown material '{}'", event.id, unknown);
            }
        }

        for discipline in Discipline::iter() {
            let has_starter = self
                .tools
                .iter()
                .any(|tool| tool.discipline == discipline && tool.tier.get() == 1);
            if !has_starter {
                anyhow::bail!("No tier-1 {} tool for character creation", discipline);
            }
        }

        Ok(())
    }
}
