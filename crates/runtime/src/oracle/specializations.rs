//! [`gathering_core::SpecializationOracle`] backed by an in-memory map.
use std::collections::HashMap;

use gathering_core::{Discipline, SpecializationDefinition, SpecializationId, SpecializationOracle};

#[derive(Debug, Default)]
pub struct SpecializationOracleImpl {
    specializations: HashMap<SpecializationId, SpecializationDefinition>,
}

impl SpecializationOracleImpl {
    pub fn new(specializations: impl IntoIterator<Item = SpecializationDefinition>) -> Self {
        Self {
            specializations: specializations
                .into_iter()
                .map(|s| (s.id.clone(), s))
                .collect(),
        }
    }
}

impl SpecializationOracle for SpecializationOracleImpl {
    fn specialization(&self, id: &SpecializationId) -> Option<SpecializationDefinition> {
        self.specializations.get(id).cloned()
    }

    fn for_discipline(&self, discipline: Discipline) -> Vec<SpecializationDefinition> {
        let mut matching: Vec<_> = self
            .specializations
            .values()
            .filter(|s| s.discipline == discipline)
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.id.cmp(&b.id));
        matching
    }
}
