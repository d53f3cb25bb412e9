use crate::bonus::BaseRates;
use crate::state::{Discipline, MaterialId, Tier};

pub trait MaterialOracle: Send + Sync {
    fn material(&self, id: &MaterialId) -> Option<Material>;

    /// Returns all material definitions available in this oracle.
    fn all_materials(&self) -> Vec<Material>;
}

/// Rarity label carried for presentation and loot tables.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

/// Catalog entry for a gatherable material. Immutable reference data.
///
/// The tier orders materials for level gating; `required_level` and
/// `required_character_level` are the concrete thresholds checked when a
/// session starts.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Material {
    pub id: MaterialId,
    pub name: String,
    pub tier: Tier,
    pub discipline: Discipline,
    pub required_level: u8,
    #[cfg_attr(feature = "serde", serde(default = "default_character_level"))]
    pub required_character_level: u8,
    /// Time to gather one unit with no bonuses, in milliseconds.
    pub base_duration_ms: u64,
    /// Experience credited per gathered unit before multipliers.
    pub experience: u32,
    #[cfg_attr(feature = "serde", serde(default = "default_yield"))]
    pub base_yield: u32,
    #[cfg_attr(feature = "serde", serde(default = "default_success_chance"))]
    pub base_success_chance: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rarity: Rarity,
}

impl Material {
    pub fn new(
        id: impl Into<MaterialId>,
        name: impl Into<String>,
        tier: Tier,
        discipline: Discipline,
        required_level: u8,
        base_duration_ms: u64,
        experience: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tier,
            discipline,
            required_level,
            required_character_level: default_character_level(),
            base_duration_ms,
            experience,
            base_yield: default_yield(),
            base_success_chance: default_success_chance(),
            rarity: Rarity::Common,
        }
    }

    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    pub fn with_character_level(mut self, level: u8) -> Self {
        self.required_character_level = level;
        self
    }

    pub fn with_success_chance(mut self, chance: f64) -> Self {
        self.base_success_chance = chance;
        self
    }

    pub fn with_yield(mut self, base_yield: u32) -> Self {
        self.base_yield = base_yield;
        self
    }

    /// Unmodified per-unit rates fed into the bonus composer.
    pub fn base_rates(&self) -> BaseRates {
        BaseRates {
            yield_per_unit: f64::from(self.base_yield),
            duration_ms: self.base_duration_ms as f64,
            success_chance: self.base_success_chance,
            experience: f64::from(self.experience),
        }
    }
}

fn default_character_level() -> u8 {
    1
}

fn default_yield() -> u32 {
    1
}

fn default_success_chance() -> f64 {
    1.0
}
