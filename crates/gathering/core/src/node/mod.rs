//! Harvestable node lifecycle.
//!
//! A node cycles `Active → Depleting → Depleted → Respawning → Active`.
//! There is no background timer: [`GatheringNode::refresh`] is applied on
//! every read, expiring hotspots and restoring depleted nodes whose respawn
//! time has passed before the node is handed to callers.
mod error;

pub use error::NodeError;

use crate::bonus::HotspotModifier;
use crate::error::{ValidationError, validate_multiplier};
use crate::state::{MaterialId, NodeId, Timestamp, ZoneId};

/// Visual/interaction category of a node.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum NodeKind {
    Tree,
    OreVein,
    FishingSpot,
    HerbPatch,
    Carcass,
    ForageBush,
}

/// Why a node was promoted to a hotspot.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum HotspotKind {
    /// Unusually dense growth or ore.
    Bountiful,
    /// Old-growth / deep vein with rarer drops.
    Ancient,
    /// Promoted by a scheduled world event.
    Event,
}

/// Temporary high-reward state of a node.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hotspot {
    pub kind: HotspotKind,
    pub multiplier: f64,
    pub expires_at: Timestamp,
}

impl Hotspot {
    /// Expired strictly after `expires_at`.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now > self.expires_at
    }

    pub fn modifier(&self) -> HotspotModifier {
        HotspotModifier {
            kind: self.kind,
            multiplier: self.multiplier,
        }
    }
}

/// Lifecycle phase derived from durability and respawn schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodePhase {
    /// Full durability.
    Active,
    /// Harvested at least once, durability remaining.
    Depleting,
    /// No durability left, respawn pending.
    Depleted { respawn_at: Timestamp },
    /// Respawn time reached; restored on the next refresh.
    Respawning,
}

/// What a refresh changed, so callers can log and publish it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RefreshOutcome {
    pub hotspot_expired: Option<Hotspot>,
    pub respawned: bool,
}

impl RefreshOutcome {
    pub fn changed(&self) -> bool {
        self.hotspot_expired.is_some() || self.respawned
    }
}

/// Result of one successful harvest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HarvestOutcome {
    pub remaining: u8,
    /// Set when this harvest depleted the node.
    pub respawn_at: Option<Timestamp>,
}

/// A harvestable instance bound to a zone.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GatheringNode {
    pub id: NodeId,
    pub zone: ZoneId,
    pub kind: NodeKind,
    pub material: MaterialId,
    durability: u8,
    max_durability: u8,
    pub respawn_duration_ms: u64,
    respawn_at: Option<Timestamp>,
    /// Scheduled time of the most recent respawn.
    last_respawned_at: Option<Timestamp>,
    hotspot: Option<Hotspot>,
}

impl GatheringNode {
    /// Spawns a node at full durability. `max_durability` is raised to 1.
    pub fn spawn(
        id: NodeId,
        zone: ZoneId,
        kind: NodeKind,
        material: MaterialId,
        max_durability: u8,
        respawn_duration_ms: u64,
    ) -> Self {
        let max_durability = max_durability.max(1);
        Self {
            id,
            zone,
            kind,
            material,
            durability: max_durability,
            max_durability,
            respawn_duration_ms,
            respawn_at: None,
            last_respawned_at: None,
            hotspot: None,
        }
    }

    pub fn durability(&self) -> u8 {
        self.durability
    }

    pub fn max_durability(&self) -> u8 {
        self.max_durability
    }

    pub fn respawn_at(&self) -> Option<Timestamp> {
        self.respawn_at
    }

    /// When the node last came back, as scheduled by the depleting harvest
    /// rather than when a reader noticed it.
    pub fn last_respawned_at(&self) -> Option<Timestamp> {
        self.last_respawned_at
    }

    pub fn hotspot(&self) -> Option<&Hotspot> {
        self.hotspot.as_ref()
    }

    pub fn is_depleted(&self) -> bool {
        self.durability == 0
    }

    pub fn phase(&self, now: Timestamp) -> NodePhase {
        match (self.durability, self.respawn_at) {
            (0, Some(respawn_at)) if now >= respawn_at => NodePhase::Respawning,
            (0, Some(respawn_at)) => NodePhase::Depleted { respawn_at },
            (0, None) => NodePhase::Respawning,
            (d, _) if d == self.max_durability => NodePhase::Active,
            _ => NodePhase::Depleting,
        }
    }

    /// Hotspot modifier if the node is a hotspot that has not expired.
    pub fn active_hotspot(&self, now: Timestamp) -> Option<HotspotModifier> {
        self.hotspot
            .filter(|hotspot| !hotspot.is_expired(now))
            .map(|hotspot| hotspot.modifier())
    }

    /// Lazy read-time maintenance: expire the hotspot, then try to respawn.
    pub fn refresh(&mut self, now: Timestamp) -> RefreshOutcome {
        let hotspot_expired = self.expire_hotspot(now);
        let respawned = self.try_respawn(now);
        RefreshOutcome {
            hotspot_expired,
            respawned,
        }
    }

    /// Clears the hotspot if `now > expires_at`, returning the cleared value.
    pub fn expire_hotspot(&mut self, now: Timestamp) -> Option<Hotspot> {
        match self.hotspot {
            Some(hotspot) if hotspot.is_expired(now) => self.hotspot.take(),
            _ => None,
        }
    }

    /// Restores full durability once `now >= respawn_at`.
    pub fn try_respawn(&mut self, now: Timestamp) -> bool {
        let due = match (self.durability, self.respawn_at) {
            (0, Some(respawn_at)) => now >= respawn_at,
            // Depleted without a schedule can only come from hand-built state.
            (0, None) => true,
            _ => false,
        };
        if due {
            self.durability = self.max_durability;
            self.last_respawned_at = Some(self.respawn_at.take().unwrap_or(now));
        }
        due
    }

    /// Takes one unit of durability.
    ///
    /// A depleted node fails with [`NodeError::Depleted`] even if its respawn
    /// time has passed; respawning only happens through [`Self::refresh`].
    pub fn harvest(&mut self, now: Timestamp) -> Result<HarvestOutcome, NodeError> {
        if self.durability == 0 {
            return Err(NodeError::Depleted {
                node: self.id,
                respawn_at: self.respawn_at,
            });
        }

        self.durability -= 1;
        let respawn_at = if self.durability == 0 {
            let at = now + self.respawn_duration_ms;
            self.respawn_at = Some(at);
            Some(at)
        } else {
            None
        };

        Ok(HarvestOutcome {
            remaining: self.durability,
            respawn_at,
        })
    }

    pub fn promote_to_hotspot(
        &mut self,
        kind: HotspotKind,
        multiplier: f64,
        duration_secs: u64,
        now: Timestamp,
    ) -> Result<Hotspot, NodeError> {
        let multiplier = validate_multiplier(multiplier)?;
        if duration_secs == 0 {
            return Err(ValidationError::InvalidDuration {
                seconds: duration_secs,
            }
            .into());
        }
        if let Some(existing) = self.hotspot
            && !existing.is_expired(now)
        {
            return Err(NodeError::AlreadyHotspot {
                node: self.id,
                expires_at: existing.expires_at,
            });
        }

        let hotspot = Hotspot {
            kind,
            multiplier,
            expires_at: now + duration_secs.saturating_mul(1_000),
        };
        self.hotspot = Some(hotspot);
        Ok(hotspot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn oak_tree(max: u8) -> GatheringNode {
        GatheringNode::spawn(
            NodeId(1),
            ZoneId(1),
            NodeKind::Tree,
            MaterialId::new("oak_log"),
            max,
            30_000,
        )
    }

    #[test]
    fn harvest_until_depleted_then_respawn() {
        let mut node = oak_tree(3);
        let t0 = Timestamp::from_secs(10);

        assert_eq!(node.harvest(t0).unwrap().remaining, 2);
        assert_eq!(node.harvest(t0).unwrap().remaining, 1);
        let last = node.harvest(t0).unwrap();
        assert_eq!(last.remaining, 0);
        assert_eq!(last.respawn_at, Some(t0 + 30_000));

        assert!(matches!(
            node.harvest(t0),
            Err(NodeError::Depleted { .. })
        ));

        // Not yet due.
        assert!(!node.try_respawn(t0 + 29_999));
        assert_eq!(node.durability(), 0);

        assert!(node.try_respawn(t0 + 30_000));
        assert_eq!(node.durability(), 3);
        assert_eq!(node.respawn_at(), None);
        assert_eq!(node.last_respawned_at(), Some(t0 + 30_000));
    }

    #[test]
    fn late_refresh_records_scheduled_respawn_time() {
        let mut node = oak_tree(1);
        let t0 = Timestamp::from_secs(0);
        node.harvest(t0).unwrap();

        let refresh = node.refresh(t0 + 500_000);
        assert!(refresh.respawned);
        assert_eq!(node.last_respawned_at(), Some(t0 + 30_000));
    }

    #[test]
    fn harvest_mid_respawn_does_not_auto_respawn() {
        let mut node = oak_tree(1);
        let t0 = Timestamp::from_secs(0);
        node.harvest(t0).unwrap();

        let later = t0 + 60_000;
        assert!(matches!(
            node.harvest(later),
            Err(NodeError::Depleted { .. })
        ));
        assert!(node.is_depleted());
    }

    #[test]
    fn phases_follow_durability() {
        let mut node = oak_tree(2);
        let t0 = Timestamp::from_secs(0);
        assert_eq!(node.phase(t0), NodePhase::Active);

        node.harvest(t0).unwrap();
        assert_eq!(node.phase(t0), NodePhase::Depleting);

        node.harvest(t0).unwrap();
        assert_eq!(
            node.phase(t0),
            NodePhase::Depleted {
                respawn_at: t0 + 30_000
            }
        );
        assert_eq!(node.phase(t0 + 30_000), NodePhase::Respawning);

        let outcome = node.refresh(t0 + 30_000);
        assert!(outcome.respawned);
        assert_eq!(node.phase(t0 + 30_000), NodePhase::Active);
    }

    #[test]
    fn hotspot_expires_lazily() {
        let mut node = oak_tree(3);
        let t0 = Timestamp::from_secs(0);
        node.promote_to_hotspot(HotspotKind::Bountiful, 2.0, 60, t0)
            .unwrap();

        assert_eq!(
            node.active_hotspot(Timestamp::from_secs(60)).map(|h| h.multiplier),
            Some(2.0)
        );
        assert!(node.active_hotspot(Timestamp::from_secs(61)).is_none());

        let outcome = node.refresh(Timestamp::from_secs(61));
        assert!(outcome.hotspot_expired.is_some());
        assert!(node.hotspot().is_none());
    }

    #[test]
    fn cannot_promote_active_hotspot_twice() {
        let mut node = oak_tree(3);
        let t0 = Timestamp::from_secs(0);
        node.promote_to_hotspot(HotspotKind::Bountiful, 2.0, 60, t0)
            .unwrap();

        let err = node
            .promote_to_hotspot(HotspotKind::Ancient, 3.0, 60, t0 + 1_000)
            .unwrap_err();
        assert!(matches!(err, NodeError::AlreadyHotspot { .. }));

        // Once expired, a new promotion is allowed.
        assert!(
            node.promote_to_hotspot(HotspotKind::Ancient, 3.0, 60, Timestamp::from_secs(61))
                .is_ok()
        );
    }

    #[test]
    fn promotion_validates_inputs() {
        let mut node = oak_tree(3);
        let t0 = Timestamp::from_secs(0);
        assert!(matches!(
            node.promote_to_hotspot(HotspotKind::Event, 0.0, 60, t0),
            Err(NodeError::Validation(ValidationError::InvalidMultiplier { .. }))
        ));
        assert!(matches!(
            node.promote_to_hotspot(HotspotKind::Event, 2.0, 0, t0),
            Err(NodeError::Validation(ValidationError::InvalidDuration { .. }))
        ));
    }

    #[test]
    fn spawn_clamps_zero_durability() {
        let node = oak_tree(0);
        assert_eq!(node.max_durability(), 1);
        assert_eq!(node.durability(), 1);
    }

    proptest! {
        #[test]
        fn durability_stays_within_bounds(
            max in 1u8..10,
            steps in prop::collection::vec((any::<bool>(), 0u64..60_000), 1..60),
        ) {
            let mut node = oak_tree(max);
            let mut now = Timestamp::from_secs(1);

            for (harvest, elapsed_ms) in steps {
                now = now + elapsed_ms;
                if harvest {
                    let before = node.durability();
                    match node.harvest(now) {
                        Ok(outcome) => prop_assert_eq!(outcome.remaining, before - 1),
                        Err(NodeError::Depleted { .. }) => prop_assert_eq!(before, 0),
                        Err(other) => prop_assert!(false, "unexpected error {:?}", other),
                    }
                } else {
                    node.refresh(now);
                }
                prop_assert!(node.durability() <= node.max_durability());
                prop_assert_eq!(node.is_depleted(), node.respawn_at().is_some());
            }
        }
    }
}
