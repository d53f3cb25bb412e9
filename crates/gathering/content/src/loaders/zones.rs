//! Zone seeding template loader.

use std::path::Path;

use gathering_core::ZoneDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, ensure_unique, read_file};

/// Zone list structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneCatalog {
    pub zones: Vec<ZoneDefinition>,
}

/// Loader for zone seeding templates from RON files.
pub struct ZoneLoader;

impl ZoneLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<ZoneDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<ZoneDefinition>> {
        let catalog: ZoneCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse zone catalog RON: {}", e))?;
        ensure_unique("zone", catalog.zones.iter().map(|z| &z.id))?;
        Ok(catalog.zones)
    }
}
