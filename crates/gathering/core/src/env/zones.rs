use crate::node::NodeKind;
use crate::state::{MaterialId, ZoneId};

pub trait ZoneOracle: Send + Sync {
    fn zone(&self, id: ZoneId) -> Option<ZoneDefinition>;

    fn all_zones(&self) -> Vec<ZoneDefinition>;
}

/// Seeding template for one zone.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneDefinition {
    pub id: ZoneId,
    pub name: String,
    pub spawns: Vec<NodeSpawn>,
}

/// `count` nodes of `kind` yielding `material`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeSpawn {
    pub kind: NodeKind,
    pub material: MaterialId,
    pub count: u16,
    pub respawn_secs: u64,
}
