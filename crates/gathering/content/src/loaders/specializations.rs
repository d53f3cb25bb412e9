//! Specialization catalog loader.

use std::path::Path;

use gathering_core::{SpecializationDefinition, validate_multiplier};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, ensure_unique, read_file};

/// Specialization catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecializationCatalog {
    pub specializations: Vec<SpecializationDefinition>,
}

/// Loader for specialization bundles from RON files.
pub struct SpecializationLoader;

impl SpecializationLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<SpecializationDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<SpecializationDefinition>> {
        let catalog: SpecializationCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse specialization catalog RON: {}", e))?;

        ensure_unique(
            "specialization",
            catalog.specializations.iter().map(|s| &s.id),
        )?;
        for spec in &catalog.specializations {
            validate_multiplier(spec.modifiers.yield_multiplier)
                .and_then(|_| validate_multiplier(spec.modifiers.speed_multiplier))
                .map_err(|e| anyhow::anyhow!("Specialization '{}': {}", spec.id, e))?;
        }

        Ok(catalog.specializations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omitted_modifiers_are_neutral() {
        let ron = r#"(specializations: [
            (id: "lumberjack", name: "Lumberjack", discipline: Woodcutting,
             modifiers: (yield_multiplier: 1.25)),
        ])"#;
        let specs = SpecializationLoader::parse(ron).unwrap();
        assert_eq!(specs[0].modifiers.yield_multiplier, 1.25);
        assert_eq!(specs[0].modifiers.speed_multiplier, 1.0);
        assert!(!specs[0].modifiers.failure_immunity);
    }

    #[test]
    fn zero_speed_is_rejected() {
        let ron = r#"(specializations: [
            (id: "idle", name: "Idle", discipline: Mining, modifiers: (speed_multiplier: 0.0)),
        ])"#;
        assert!(SpecializationLoader::parse(ron).is_err());
    }
}
