//! Runtime wrappers around static gathering content oracles.
//!
//! These implementations expose `gathering-core` oracle traits and bundle them
//! into an [`OracleManager`] so the service can build
//! [`gathering_core::GatheringEnv`] views on demand. The data is immutable at
//! runtime; dynamic state lives in repositories.
mod events;
mod materials;
mod specializations;
mod tools;
mod zones;

use std::sync::Arc;

use gathering_content::GatheringContent;
use gathering_core::{GatheringConfig, GatheringEnv, PcgRng};

pub use events::EventOracleImpl;
pub use materials::MaterialOracleImpl;
pub use specializations::SpecializationOracleImpl;
pub use tools::ToolOracleImpl;
pub use zones::ZoneOracleImpl;

/// Manages all oracle implementations and provides unified access
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) materials: Arc<MaterialOracleImpl>,
    pub(crate) tools: Arc<ToolOracleImpl>,
    pub(crate) specializations: Arc<SpecializationOracleImpl>,
    pub(crate) events: Arc<EventOracleImpl>,
    pub(crate) zones: Arc<ZoneOracleImpl>,
    pub(crate) config: Arc<GatheringConfig>,
    pub(crate) rng: PcgRng,
}

impl OracleManager {
    pub fn new(
        materials: Arc<MaterialOracleImpl>,
        tools: Arc<ToolOracleImpl>,
        specializations: Arc<SpecializationOracleImpl>,
        events: Arc<EventOracleImpl>,
        zones: Arc<ZoneOracleImpl>,
        config: Arc<GatheringConfig>,
    ) -> Self {
        Self {
            materials,
            tools,
            specializations,
            events,
            zones,
            config,
            rng: PcgRng, // PcgRng is stateless
        }
    }

    /// Builds every oracle from loaded content.
    pub fn from_content(content: GatheringContent) -> Self {
        let GatheringContent {
            config,
            materials,
            tools,
            specializations,
            events,
            zones,
        } = content;

        Self::new(
            Arc::new(MaterialOracleImpl::new(materials)),
            Arc::new(ToolOracleImpl::new(tools)),
            Arc::new(SpecializationOracleImpl::new(specializations)),
            Arc::new(EventOracleImpl::new(events)),
            Arc::new(ZoneOracleImpl::new(zones)),
            Arc::new(config),
        )
    }

    /// Borrowed view for gathering-core rules.
    pub fn as_env(&self) -> GatheringEnv<'_> {
        GatheringEnv::new(
            self.materials.as_ref(),
            self.tools.as_ref(),
            self.specializations.as_ref(),
            self.events.as_ref(),
            self.zones.as_ref(),
            &self.rng,
            self.config.as_ref(),
        )
    }

    pub fn config(&self) -> &GatheringConfig {
        &self.config
    }
}

impl std::fmt::Debug for OracleManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleManager")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
