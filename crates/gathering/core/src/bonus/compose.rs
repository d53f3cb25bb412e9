//! Deterministic bonus composition.
//!
//! Composition order is fixed:
//! Tool tier → Specialization → Hotspot → Seasonal events → Rounding/Clamp
//!
//! The composer is a pure function of its inputs. Settling a session
//! recomputes it on every call, so identical inputs must always produce
//! identical rates.

use super::modifiers::{BaseRates, Modifiers};
use crate::config::GatheringConfig;
use crate::node::HotspotKind;
use crate::state::{EventId, Tier};

/// A modifier that took part in a composition, in application order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AppliedEffect {
    ToolSpeed {
        tier: Tier,
        factor: f64,
        durability_loss_factor: f64,
    },
    /// Tool equipped but at zero durability: no tier bonus.
    ToolBroken { tier: Tier },
    SpecializationYield { multiplier: f64 },
    SpecializationSpeed { multiplier: f64 },
    FailureImmunity,
    Hotspot { kind: HotspotKind, multiplier: f64 },
    SeasonalEvent {
        event: EventId,
        yield_multiplier: f64,
        experience_multiplier: f64,
    },
}

/// Effective per-unit rates after every modifier.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComposedRates {
    /// Materials produced by one successful unit (floored).
    pub yield_per_unit: u32,
    /// Time to gather one unit, rounded to the millisecond, never below 1.
    pub duration_ms: u64,
    /// Probability in `[0, 1]` that a unit yields materials.
    pub success_chance: f64,
    /// Experience credited per unit (floored).
    pub experience_per_unit: u32,
    /// Multiplier applied to the tool's per-use wear; 0 without a tool.
    pub durability_loss_factor: f64,
    pub applied_effects: Vec<AppliedEffect>,
}

/// Tier scaling parameters of the composer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BonusComposer {
    tier_speed_step: f64,
    min_durability_loss_factor: f64,
}

impl BonusComposer {
    pub const fn new(tier_speed_step: f64, min_durability_loss_factor: f64) -> Self {
        Self {
            tier_speed_step,
            min_durability_loss_factor,
        }
    }

    pub fn from_config(config: &GatheringConfig) -> Self {
        Self::new(config.tier_speed_step, config.min_durability_loss_factor)
    }

    /// Speed factor of a tool tier: `1 + step * (tier - 1)`.
    pub fn tier_speed_factor(&self, tier: Tier) -> f64 {
        1.0 + self.tier_speed_step * f64::from(tier.get() - 1)
    }

    /// Per-use wear factor of a tool tier: `max(floor, 1 / tier)`.
    pub fn durability_loss_factor(&self, tier: Tier) -> f64 {
        (1.0 / f64::from(tier.get())).max(self.min_durability_loss_factor)
    }

    pub fn compose(&self, base: &BaseRates, modifiers: &Modifiers) -> ComposedRates {
        let mut yield_per_unit = base.yield_per_unit;
        let mut duration = base.duration_ms;
        let mut success_chance = base.success_chance;
        let mut experience = base.experience;
        let mut durability_loss_factor = 0.0;
        let mut applied = Vec::new();

        // Step 1: tool tier
        if let Some(tool) = &modifiers.tool {
            durability_loss_factor = self.durability_loss_factor(tool.tier);
            if tool.is_broken() {
                applied.push(AppliedEffect::ToolBroken { tier: tool.tier });
            } else {
                let factor = self.tier_speed_factor(tool.tier);
                duration /= factor;
                applied.push(AppliedEffect::ToolSpeed {
                    tier: tool.tier,
                    factor,
                    durability_loss_factor,
                });
            }
        }

        // Step 2: specialization
        let mut failure_immunity = false;
        if let Some(spec) = &modifiers.specialization {
            if spec.yield_multiplier != 1.0 {
                yield_per_unit *= spec.yield_multiplier;
                applied.push(AppliedEffect::SpecializationYield {
                    multiplier: spec.yield_multiplier,
                });
            }
            if spec.speed_multiplier != 1.0 {
                duration /= spec.speed_multiplier;
                applied.push(AppliedEffect::SpecializationSpeed {
                    multiplier: spec.speed_multiplier,
                });
            }
            if spec.failure_immunity {
                failure_immunity = true;
                applied.push(AppliedEffect::FailureImmunity);
            }
        }

        // Step 3: hotspot
        if let Some(hotspot) = &modifiers.hotspot {
            yield_per_unit *= hotspot.multiplier;
            experience *= hotspot.multiplier;
            applied.push(AppliedEffect::Hotspot {
                kind: hotspot.kind,
                multiplier: hotspot.multiplier,
            });
        }

        // Step 4: seasonal events, each independently
        for event in &modifiers.events {
            yield_per_unit *= event.yield_multiplier;
            experience *= event.experience_multiplier;
            applied.push(AppliedEffect::SeasonalEvent {
                event: event.event.clone(),
                yield_multiplier: event.yield_multiplier,
                experience_multiplier: event.experience_multiplier,
            });
        }

        // Step 5: rounding and clamping
        if failure_immunity {
            success_chance = 1.0;
        }
        let success_chance = if success_chance.is_nan() {
            0.0
        } else {
            success_chance.clamp(0.0, 1.0)
        };

        ComposedRates {
            yield_per_unit: yield_per_unit.floor() as u32,
            duration_ms: (duration.round() as u64).max(1),
            success_chance,
            experience_per_unit: experience.floor() as u32,
            durability_loss_factor,
            applied_effects: applied,
        }
    }
}

impl Default for BonusComposer {
    fn default() -> Self {
        Self::new(
            GatheringConfig::DEFAULT_TIER_SPEED_STEP,
            GatheringConfig::DEFAULT_MIN_DURABILITY_LOSS_FACTOR,
        )
    }
}

/// Composes with the default tier scaling.
pub fn compose(base: &BaseRates, modifiers: &Modifiers) -> ComposedRates {
    BonusComposer::default().compose(base, modifiers)
}
