//! [`gathering_core::MaterialOracle`] backed by an in-memory map.
use std::collections::HashMap;

use gathering_core::{Material, MaterialId, MaterialOracle};

/// MaterialOracle implementation with static material definitions
#[derive(Debug, Default)]
pub struct MaterialOracleImpl {
    materials: HashMap<MaterialId, Material>,
}

impl MaterialOracleImpl {
    pub fn new(materials: impl IntoIterator<Item = Material>) -> Self {
        Self {
            materials: materials.into_iter().map(|m| (m.id.clone(), m)).collect(),
        }
    }
}

impl MaterialOracle for MaterialOracleImpl {
    fn material(&self, id: &MaterialId) -> Option<Material> {
        self.materials.get(id).cloned()
    }

    fn all_materials(&self) -> Vec<Material> {
        let mut all: Vec<_> = self.materials.values().cloned().collect();
        all.sort_by(|a, b| (a.discipline, a.tier, &a.id).cmp(&(b.discipline, b.tier, &b.id)));
        all
    }
}
