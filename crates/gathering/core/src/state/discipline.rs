//! Gathering disciplines, their tool slots, and quality tiers.

use std::fmt;

/// A gathering skill category.
///
/// Every discipline owns exactly one tool slot (see [`Discipline::tool_slot`]),
/// its own skill record, and at most one specialization per character.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Discipline {
    Mining,
    Woodcutting,
    Fishing,
    Herbalism,
    Skinning,
    Foraging,
}

impl Discipline {
    pub const COUNT: usize = 6;

    /// Fixed discipline → slot map.
    pub const fn tool_slot(self) -> ToolSlot {
        match self {
            Discipline::Mining => ToolSlot::Pickaxe,
            Discipline::Woodcutting => ToolSlot::Hatchet,
            Discipline::Fishing => ToolSlot::FishingRod,
            Discipline::Herbalism => ToolSlot::Sickle,
            Discipline::Skinning => ToolSlot::SkinningKnife,
            Discipline::Foraging => ToolSlot::GatheringGloves,
        }
    }

    /// Dense index used for per-discipline arrays.
    pub const fn index(self) -> usize {
        match self {
            Discipline::Mining => 0,
            Discipline::Woodcutting => 1,
            Discipline::Fishing => 2,
            Discipline::Herbalism => 3,
            Discipline::Skinning => 4,
            Discipline::Foraging => 5,
        }
    }
}

/// Equipment slot holding the tool of one discipline.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ToolSlot {
    Pickaxe,
    Hatchet,
    FishingRod,
    Sickle,
    SkinningKnife,
    GatheringGloves,
}

impl ToolSlot {
    pub const fn discipline(self) -> Discipline {
        match self {
            ToolSlot::Pickaxe => Discipline::Mining,
            ToolSlot::Hatchet => Discipline::Woodcutting,
            ToolSlot::FishingRod => Discipline::Fishing,
            ToolSlot::Sickle => Discipline::Herbalism,
            ToolSlot::SkinningKnife => Discipline::Skinning,
            ToolSlot::GatheringGloves => Discipline::Foraging,
        }
    }
}

/// Quality rank shared by tools and materials, always within `1..=5`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct Tier(u8);

impl Tier {
    pub const MIN: Tier = Tier(1);
    pub const MAX: Tier = Tier(5);

    /// Returns `None` outside `1..=5`.
    pub const fn new(value: u8) -> Option<Self> {
        if value >= Self::MIN.0 && value <= Self::MAX.0 {
            Some(Self(value))
        } else {
            None
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// Zero-based index into tier-indexed tables.
    pub const fn index(self) -> usize {
        (self.0 - 1) as usize
    }
}

impl Default for Tier {
    fn default() -> Self {
        Self::MIN
    }
}

impl TryFrom<u8> for Tier {
    type Error = InvalidTier;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Tier::new(value).ok_or(InvalidTier(value))
    }
}

impl From<Tier> for u8 {
    fn from(tier: Tier) -> u8 {
        tier.0
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("tier {0} is outside 1..=5")]
pub struct InvalidTier(pub u8);
