use crate::bonus::ComposedRates;
use crate::env::{RngOracle, unit_seed};
use crate::node::GatheringNode;
use crate::state::{NodeId, Timestamp};

use super::{GatheringSession, SessionError, SessionStatus};

/// What one settle changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SettleOutcome {
    /// Units gathered by this settle.
    pub gained: u32,
    /// Units whose success roll passed.
    pub successes: u32,
    /// Materials added to the bank.
    pub banked: u32,
    pub experience: u64,
    /// Node durability taken, one per gained unit.
    pub harvested: u32,
    /// Set when the bound node hit zero during this settle.
    pub node_depleted: Option<(NodeId, Timestamp)>,
    /// Elapsed time dropped because the node could not supply more units.
    pub forfeited_ms: u64,
    /// True when this settle moved the session to `Completed`.
    pub completed: bool,
}

impl SettleOutcome {
    pub fn changed(&self) -> bool {
        self.gained > 0 || self.forfeited_ms > 0
    }
}

impl GatheringSession {
    /// Advances the session to `now` with the rates composed for this call.
    ///
    /// `node` must be the bound node (already refreshed) for node-bound
    /// sessions and `None` otherwise. Each gained unit harvests the node once;
    /// when the node runs out first, the remaining elapsed time is forfeited
    /// and `last_settled_at` jumps to `now`. Otherwise it advances by exactly
    /// `gained * duration` so partial progress toward the next unit is kept.
    pub fn settle(
        &mut self,
        rates: &ComposedRates,
        mut node: Option<&mut GatheringNode>,
        rng: &dyn RngOracle,
        now: Timestamp,
    ) -> Result<SettleOutcome, SessionError> {
        let mut outcome = SettleOutcome::default();
        if self.status == SessionStatus::Completed || now <= self.last_settled_at {
            return Ok(outcome);
        }

        let duration = rates.duration_ms.max(1);
        let elapsed = now.millis_since(self.last_settled_at);
        let units = elapsed / duration;
        let wanted = units.min(u64::from(self.remaining())) as u32;

        let mut gain = wanted;
        let mut node_capped = false;
        if let Some(node) = node.as_deref() {
            let available = u32::from(node.durability());
            if available < wanted {
                gain = available;
                node_capped = true;
            }
        }

        for offset in 0..gain {
            let unit_index = self.completed + offset;
            let finished_at = self.last_settled_at + u64::from(offset + 1) * duration;

            if let Some(node) = node.as_deref_mut() {
                let harvest = node.harvest(finished_at)?;
                outcome.harvested += 1;
                if let Some(respawn_at) = harvest.respawn_at {
                    outcome.node_depleted = Some((node.id, respawn_at));
                }
            }

            if rng.succeeds(unit_seed(self.seed, unit_index), rates.success_chance) {
                outcome.successes += 1;
                outcome.banked = outcome.banked.saturating_add(rates.yield_per_unit);
            }
        }

        outcome.gained = gain;
        outcome.experience = u64::from(gain) * u64::from(rates.experience_per_unit);
        self.completed += gain;
        self.banked = self.banked.saturating_add(outcome.banked);

        if node_capped {
            let used = u64::from(gain) * duration;
            outcome.forfeited_ms = elapsed - used;
            self.last_settled_at = now;
        } else {
            self.last_settled_at = self.last_settled_at + u64::from(gain) * duration;
        }

        if self.completed == self.goal {
            self.status = SessionStatus::Completed;
            outcome.completed = true;
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bonus::{Modifiers, ToolModifier, compose};
    use crate::env::{Material, PcgRng};
    use crate::node::NodeKind;
    use crate::session::StartRequest;
    use crate::state::{CharacterId, Discipline, MaterialId, Tier, ZoneId};
    use proptest::prelude::*;

    fn oak_log() -> Material {
        Material::new(
            "oak_log",
            "Oak Log",
            Tier::MIN,
            Discipline::Woodcutting,
            1,
            3_000,
            10,
        )
    }

    fn start(material: &Material, node: Option<&GatheringNode>, goal: u32) -> GatheringSession {
        GatheringSession::start(
            StartRequest {
                character: CharacterId(1),
                material,
                node,
                goal,
                discipline_level: 1,
                character_level: 1,
            },
            Timestamp::EPOCH,
        )
        .unwrap()
    }

    fn tier_one_rates(material: &Material) -> ComposedRates {
        let modifiers = Modifiers::new().with_tool(ToolModifier::new(Tier::MIN, 100.0));
        compose(&material.base_rates(), &modifiers)
    }

    fn oak_tree(max: u8) -> GatheringNode {
        GatheringNode::spawn(
            NodeId(9),
            ZoneId(1),
            NodeKind::Tree,
            MaterialId::new("oak_log"),
            max,
            30_000,
        )
    }

    #[test]
    fn single_unit_completes_session() {
        let material = oak_log();
        let rates = tier_one_rates(&material);
        let mut session = start(&material, None, 1);

        let outcome = session
            .settle(&rates, None, &PcgRng, Timestamp::from_millis(3_000))
            .unwrap();

        assert_eq!(outcome.gained, 1);
        assert_eq!(outcome.experience, 10);
        assert_eq!(outcome.banked, 1);
        assert!(outcome.completed);
        assert!(session.is_complete());
        assert_eq!(session.banked(), 1);
    }

    #[test]
    fn partial_progress_is_retained() {
        let material = oak_log();
        let rates = tier_one_rates(&material);
        let mut session = start(&material, None, 10);

        let outcome = session
            .settle(&rates, None, &PcgRng, Timestamp::from_millis(6_500))
            .unwrap();

        assert_eq!(outcome.gained, 2);
        assert_eq!(session.completed(), 2);
        assert_eq!(session.last_settled_at(), Timestamp::from_millis(6_000));
        assert_eq!(
            session.time_to_next_unit(rates.duration_ms, Timestamp::from_millis(6_500)),
            Some(2_500)
        );
    }

    #[test]
    fn settle_is_idempotent_without_elapsed_time() {
        let material = oak_log();
        let rates = tier_one_rates(&material);
        let mut session = start(&material, None, 10);
        let now = Timestamp::from_millis(7_000);

        session.settle(&rates, None, &PcgRng, now).unwrap();
        let snapshot = session.clone();
        let again = session.settle(&rates, None, &PcgRng, now).unwrap();

        assert!(!again.changed());
        assert_eq!(session, snapshot);
    }

    #[test]
    fn broken_tool_gathers_at_base_speed() {
        let material = oak_log();
        let broken = Modifiers::new().with_tool(ToolModifier::new(Tier::MAX, 0.0));
        let rates = compose(&material.base_rates(), &broken);
        assert_eq!(rates.duration_ms, 3_000);

        let mut session = start(&material, None, 10);
        let outcome = session
            .settle(&rates, None, &PcgRng, Timestamp::from_millis(9_000))
            .unwrap();
        assert_eq!(outcome.gained, 3);
    }

    #[test]
    fn node_caps_gain_and_forfeits_wait() {
        let material = oak_log();
        let rates = tier_one_rates(&material);
        let mut node = oak_tree(3);
        let mut session = start(&material, Some(&node), 10);

        let now = Timestamp::from_millis(20_000);
        let outcome = session
            .settle(&rates, Some(&mut node), &PcgRng, now)
            .unwrap();

        assert_eq!(outcome.gained, 3);
        assert_eq!(outcome.harvested, 3);
        assert_eq!(outcome.forfeited_ms, 11_000);
        // Third unit finished at 9s; respawn is scheduled from then.
        assert_eq!(
            outcome.node_depleted,
            Some((NodeId(9), Timestamp::from_millis(39_000)))
        );
        assert!(node.is_depleted());
        assert_eq!(session.last_settled_at(), now);
        assert!(!session.is_complete());
    }

    #[test]
    fn depleted_node_yields_nothing() {
        let material = oak_log();
        let rates = tier_one_rates(&material);
        let mut node = oak_tree(1);
        let mut session = start(&material, Some(&node), 5);
        node.harvest(Timestamp::EPOCH).unwrap();

        let now = Timestamp::from_millis(10_000);
        let outcome = session
            .settle(&rates, Some(&mut node), &PcgRng, now)
            .unwrap();
        assert_eq!(outcome.gained, 0);
        assert_eq!(outcome.forfeited_ms, 10_000);
        assert_eq!(session.last_settled_at(), now);
    }

    #[test]
    fn failed_rolls_still_grant_experience() {
        let material = oak_log().with_success_chance(0.0);
        let rates = tier_one_rates(&material);
        let mut session = start(&material, None, 4);

        let outcome = session
            .settle(&rates, None, &PcgRng, Timestamp::from_millis(12_000))
            .unwrap();
        assert_eq!(outcome.gained, 4);
        assert_eq!(outcome.successes, 0);
        assert_eq!(outcome.experience, 40);
        assert_eq!(session.banked(), 0);
        assert!(session.is_complete());
    }

    #[test]
    fn completed_session_ignores_further_time() {
        let material = oak_log();
        let rates = tier_one_rates(&material);
        let mut session = start(&material, None, 1);
        session
            .settle(&rates, None, &PcgRng, Timestamp::from_millis(3_000))
            .unwrap();

        let later = session
            .settle(&rates, None, &PcgRng, Timestamp::from_millis(60_000))
            .unwrap();
        assert!(!later.changed());
        assert_eq!(session.completed(), 1);
    }

    proptest! {
        #[test]
        fn completed_never_exceeds_goal(goal in 1u32..50, steps in prop::collection::vec(0u64..20_000, 1..20)) {
            let material = oak_log();
            let rates = tier_one_rates(&material);
            let mut session = start(&material, None, goal);
            let mut now = Timestamp::EPOCH;
            for step in steps {
                now = now + step;
                let before = session.last_settled_at();
                session.settle(&rates, None, &PcgRng, now).unwrap();
                prop_assert!(session.completed() <= session.goal);
                prop_assert!(session.last_settled_at() >= before);
                prop_assert!(session.last_settled_at() <= now);
            }
        }

        #[test]
        fn split_settles_match_one_settle(split in 0u64..30_000, total in 0u64..30_000) {
            let material = oak_log();
            let rates = tier_one_rates(&material);
            let end = Timestamp::from_millis(split.max(total));
            let mid = Timestamp::from_millis(split.min(total));

            let mut once = start(&material, None, 100);
            once.settle(&rates, None, &PcgRng, end).unwrap();

            let mut twice = start(&material, None, 100);
            twice.settle(&rates, None, &PcgRng, mid).unwrap();
            twice.settle(&rates, None, &PcgRng, end).unwrap();

            prop_assert_eq!(once, twice);
        }
    }
}
