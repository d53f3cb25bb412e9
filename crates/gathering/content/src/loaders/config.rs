//! Gathering configuration loader.

use std::path::Path;

use gathering_core::GatheringConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for gathering configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Keys missing from the file keep their default values.
    pub fn load(path: &Path) -> LoadResult<GatheringConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GatheringConfig> {
        let config: GatheringConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.max_level < GatheringConfig::MIN_LEVEL {
            anyhow::bail!("max_level must be at least {}", GatheringConfig::MIN_LEVEL);
        }
        if config.xp_per_level == 0 {
            anyhow::bail!("xp_per_level must be positive");
        }
        if !(config.tier_speed_step.is_finite() && config.tier_speed_step >= 0.0) {
            anyhow::bail!("tier_speed_step must be a non-negative number");
        }

        Ok(config)
    }
}
