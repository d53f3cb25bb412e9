use crate::state::Tier;

/// Gathering rules constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GatheringConfig {
    /// Experience needed to advance from level `L` to `L + 1` is `L * xp_per_level`.
    pub xp_per_level: u64,
    /// Highest reachable discipline level.
    pub max_level: u8,
    /// Discipline level at which a specialization can be selected.
    pub specialization_unlock_level: u8,
    /// Speed gained per tool tier above 1 (0.10 = +10% per tier).
    pub tier_speed_step: f64,
    /// Floor of the per-use durability loss factor `max(floor, 1/tier)`.
    pub min_durability_loss_factor: f64,
    /// Durability a tier-1 tool loses per gathered unit.
    pub tool_wear_per_use: f32,
    /// Repair cost indexed by tool tier (tier 1 first).
    pub repair_costs: [u64; 5],
    /// Node max durability indexed by material tier (tier 1 first).
    pub node_durability_by_tier: [u8; 5],
}

impl GatheringConfig {
    // ===== fixed bounds =====
    pub const MIN_LEVEL: u8 = 1;
    pub const MAX_TOOL_DURABILITY: f32 = 100.0;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_XP_PER_LEVEL: u64 = 100;
    pub const DEFAULT_MAX_LEVEL: u8 = 99;
    pub const DEFAULT_SPECIALIZATION_UNLOCK_LEVEL: u8 = 50;
    pub const DEFAULT_TIER_SPEED_STEP: f64 = 0.10;
    pub const DEFAULT_MIN_DURABILITY_LOSS_FACTOR: f64 = 0.2;
    pub const DEFAULT_TOOL_WEAR_PER_USE: f32 = 1.0;
    pub const DEFAULT_REPAIR_COSTS: [u64; 5] = [50, 150, 400, 1000, 2500];
    pub const DEFAULT_NODE_DURABILITY_BY_TIER: [u8; 5] = [4, 3, 2, 2, 1];

    pub fn new() -> Self {
        Self {
            xp_per_level: Self::DEFAULT_XP_PER_LEVEL,
            max_level: Self::DEFAULT_MAX_LEVEL,
            specialization_unlock_level: Self::DEFAULT_SPECIALIZATION_UNLOCK_LEVEL,
            tier_speed_step: Self::DEFAULT_TIER_SPEED_STEP,
            min_durability_loss_factor: Self::DEFAULT_MIN_DURABILITY_LOSS_FACTOR,
            tool_wear_per_use: Self::DEFAULT_TOOL_WEAR_PER_USE,
            repair_costs: Self::DEFAULT_REPAIR_COSTS,
            node_durability_by_tier: Self::DEFAULT_NODE_DURABILITY_BY_TIER,
        }
    }

    pub fn repair_cost(&self, tier: Tier) -> u64 {
        self.repair_costs[tier.index()]
    }

    /// Max durability of a freshly seeded node; never below 1.
    pub fn node_durability(&self, tier: Tier) -> u8 {
        self.node_durability_by_tier[tier.index()].max(1)
    }
}

impl Default for GatheringConfig {
    fn default() -> Self {
        Self::new()
    }
}
