//! Node lifecycle operations and zone seeding.

use gathering_core::{
    GatheringNode, Hotspot, HotspotKind, NodeId, RefreshOutcome, ZoneId, ZoneOracle,
};
use tracing::{debug, info};

use super::GatheringService;
use crate::api::{NodeView, Result, RuntimeError};
use crate::events::NodeEvent;
use crate::repository::{ChangeSet, Versioned};

impl GatheringService {
    /// Takes one unit of durability from a node outside of any session.
    pub fn harvest_node(&self, id: NodeId) -> Result<NodeView> {
        let now = self.clock.now();
        let Versioned { value: mut node, version } = self.node(id)?;
        let refresh = node.refresh(now);
        let harvest = node.harvest(now)?;

        let mut changes = ChangeSet::new();
        changes.put_node(node.clone(), Some(version));
        self.commit("harvest_node", changes)?;

        self.publish_refresh(&node, refresh);
        debug!(%id, remaining = harvest.remaining, "node harvested");
        self.events.publish(NodeEvent::Harvested {
            node: id,
            remaining: harvest.remaining,
        });
        if let Some(respawn_at) = harvest.respawn_at {
            info!(%id, %respawn_at, "node depleted");
            self.events.publish(NodeEvent::Depleted {
                node: id,
                respawn_at,
            });
        }

        Ok(NodeView::new(node, now))
    }

    /// Applies lazy maintenance to one node and persists it if anything changed.
    pub fn try_respawn(&self, id: NodeId) -> Result<NodeView> {
        let now = self.clock.now();
        let Versioned { value: mut node, version } = self.node(id)?;
        let refresh = node.refresh(now);

        if refresh.changed() {
            let mut changes = ChangeSet::new();
            changes.put_node(node.clone(), Some(version));
            self.commit("try_respawn", changes)?;
            self.publish_refresh(&node, refresh);
        }

        Ok(NodeView::new(node, now))
    }

    /// Nodes of `zone` that can be gathered now, ordered by id.
    ///
    /// Every node is refreshed first; depleted nodes are left out.
    pub fn available_nodes(&self, zone: ZoneId) -> Result<Vec<NodeView>> {
        let now = self.clock.now();
        if self.env().zones.zone(zone).is_none() {
            return Err(RuntimeError::ZoneNotFound { zone });
        }

        let mut changes = ChangeSet::new();
        let mut refreshed = Vec::new();
        let mut nodes = Vec::new();
        for Versioned { value: mut node, version } in self.store.zone_nodes(zone)? {
            let refresh = node.refresh(now);
            if refresh.changed() {
                changes.put_node(node.clone(), Some(version));
                refreshed.push((node.clone(), refresh));
            }
            nodes.push(node);
        }

        self.commit("available_nodes", changes)?;
        for (node, refresh) in &refreshed {
            self.publish_refresh(node, *refresh);
        }

        Ok(nodes
            .into_iter()
            .filter(|node| !node.is_depleted())
            .map(|node| NodeView::new(node, now))
            .collect())
    }

    /// Creates the nodes listed by the zone's spawn table.
    ///
    /// Node ids are `zone << 32 | index`, so seeding is deterministic. A zone
    /// that already has nodes is rejected.
    pub fn seed_zone(&self, zone: ZoneId) -> Result<Vec<NodeView>> {
        let now = self.clock.now();
        let definition = self
            .env()
            .zones
            .zone(zone)
            .ok_or(RuntimeError::ZoneNotFound { zone })?;

        let existing = self.store.zone_nodes(zone)?;
        if !existing.is_empty() {
            return Err(RuntimeError::ZoneAlreadySeeded {
                zone,
                nodes: existing.len(),
            });
        }

        let config = self.env().config;
        let mut changes = ChangeSet::new();
        let mut nodes = Vec::new();
        let mut index = 0u64;
        for spawn in &definition.spawns {
            let material = self.material(&spawn.material)?;
            for _ in 0..spawn.count {
                let node = GatheringNode::spawn(
                    NodeId((u64::from(zone.0) << 32) | index),
                    zone,
                    spawn.kind,
                    material.id.clone(),
                    config.node_durability(material.tier),
                    spawn.respawn_secs.saturating_mul(1_000),
                );
                index += 1;
                changes.put_node(node.clone(), None);
                nodes.push(node);
            }
        }

        self.commit("seed_zone", changes)?;
        info!(%zone, name = %definition.name, nodes = nodes.len(), "zone seeded");

        Ok(nodes
            .into_iter()
            .map(|node| NodeView::new(node, now))
            .collect())
    }

    /// Turns a node into a hotspot for `duration_secs`.
    pub fn promote_hotspot(
        &self,
        id: NodeId,
        kind: HotspotKind,
        multiplier: f64,
        duration_secs: u64,
    ) -> Result<Hotspot> {
        let now = self.clock.now();
        let Versioned { value: mut node, version } = self.node(id)?;
        let refresh = node.refresh(now);
        let hotspot = node.promote_to_hotspot(kind, multiplier, duration_secs, now)?;

        let mut changes = ChangeSet::new();
        changes.put_node(node.clone(), Some(version));
        self.commit("promote_hotspot", changes)?;

        self.publish_refresh(&node, refresh);
        info!(%id, %kind, multiplier, expires_at = %hotspot.expires_at, "node promoted to hotspot");
        self.events.publish(NodeEvent::HotspotPromoted {
            node: id,
            kind,
            multiplier,
            expires_at: hotspot.expires_at,
        });

        Ok(hotspot)
    }

    pub(super) fn publish_refresh(&self, node: &GatheringNode, refresh: RefreshOutcome) {
        if let Some(expired) = refresh.hotspot_expired {
            debug!(node = %node.id, kind = %expired.kind, "hotspot expired");
            self.events.publish(NodeEvent::HotspotExpired {
                node: node.id,
                kind: expired.kind,
            });
        }
        if refresh.respawned {
            info!(node = %node.id, durability = node.durability(), "node respawned");
            self.events.publish(NodeEvent::Respawned {
                node: node.id,
                durability: node.max_durability(),
            });
        }
    }
}
