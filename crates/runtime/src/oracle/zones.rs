//! [`gathering_core::ZoneOracle`] backed by an in-memory map.
use std::collections::BTreeMap;

use gathering_core::{ZoneDefinition, ZoneId, ZoneOracle};

#[derive(Debug, Default)]
pub struct ZoneOracleImpl {
    zones: BTreeMap<ZoneId, ZoneDefinition>,
}

impl ZoneOracleImpl {
    pub fn new(zones: impl IntoIterator<Item = ZoneDefinition>) -> Self {
        Self {
            zones: zones.into_iter().map(|z| (z.id, z)).collect(),
        }
    }
}

impl ZoneOracle for ZoneOracleImpl {
    fn zone(&self, id: ZoneId) -> Option<ZoneDefinition> {
        self.zones.get(&id).cloned()
    }

    fn all_zones(&self) -> Vec<ZoneDefinition> {
        self.zones.values().cloned().collect()
    }
}
