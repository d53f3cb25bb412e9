//! Material catalog loader.

use std::path::Path;

use gathering_core::Material;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, ensure_unique, read_file};

/// Material catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialCatalog {
    pub materials: Vec<Material>,
}

/// Loader for the material catalog from RON files.
pub struct MaterialLoader;

impl MaterialLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<Material>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<Material>> {
        let catalog: MaterialCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse material catalog RON: {}", e))?;

        ensure_unique("material", catalog.materials.iter().map(|m| &m.id))?;
        for material in &catalog.materials {
            if material.base_duration_ms == 0 {
                anyhow::bail!("Material '{}' has a zero base duration", material.id);
            }
            if !(0.0..=1.0).contains(&material.base_success_chance) {
                anyhow::bail!(
                    "Material '{}' success chance {} is outside [0, 1]",
                    material.id,
                    material.base_success_chance
                );
            }
        }

        Ok(catalog.materials)
    }
}
