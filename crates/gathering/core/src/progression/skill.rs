//! Experience accumulation and level thresholds.
//!
//! Advancing from level `L` to `L + 1` costs `L * xp_per_level`, so reaching
//! level `L` needs `xp_per_level * L * (L - 1) / 2` in total.

use crate::config::GatheringConfig;
use crate::state::{CharacterId, Discipline};

/// Total experience needed to reach `level`.
pub fn cumulative_experience(level: u8, xp_per_level: u64) -> u64 {
    let level = u64::from(level.max(GatheringConfig::MIN_LEVEL));
    xp_per_level * level * (level - 1) / 2
}

/// Highest level whose cumulative requirement is covered by `experience`.
pub fn level_for_experience(experience: u64, config: &GatheringConfig) -> u8 {
    let mut level = GatheringConfig::MIN_LEVEL;
    while level < config.max_level
        && cumulative_experience(level + 1, config.xp_per_level) <= experience
    {
        level += 1;
    }
    level
}

/// Level before and after an experience credit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelChange {
    pub discipline: Discipline,
    pub previous_level: u8,
    pub new_level: u8,
}

impl LevelChange {
    pub fn leveled_up(&self) -> bool {
        self.new_level > self.previous_level
    }
}

/// Per (character, discipline) level and accumulated experience.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillRecord {
    pub character: CharacterId,
    pub discipline: Discipline,
    level: u8,
    experience: u64,
}

impl SkillRecord {
    pub fn new(character: CharacterId, discipline: Discipline) -> Self {
        Self {
            character,
            discipline,
            level: GatheringConfig::MIN_LEVEL,
            experience: 0,
        }
    }

    /// Record whose level is derived from `experience`.
    pub fn with_experience(
        character: CharacterId,
        discipline: Discipline,
        experience: u64,
        config: &GatheringConfig,
    ) -> Self {
        Self {
            character,
            discipline,
            level: level_for_experience(experience, config),
            experience,
        }
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn experience(&self) -> u64 {
        self.experience
    }

    /// Experience still needed for the next level; `None` at the cap.
    pub fn experience_to_next(&self, config: &GatheringConfig) -> Option<u64> {
        if self.level >= config.max_level {
            return None;
        }
        let next = cumulative_experience(self.level + 1, config.xp_per_level);
        Some(next.saturating_sub(self.experience))
    }

    pub fn add_experience(&mut self, amount: u64, config: &GatheringConfig) -> LevelChange {
        let previous_level = self.level;
        self.experience = self.experience.saturating_add(amount);
        self.level = level_for_experience(self.experience, config);
        LevelChange {
            discipline: self.discipline,
            previous_level,
            new_level: self.level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record() -> SkillRecord {
        SkillRecord::new(CharacterId(1), Discipline::Woodcutting)
    }

    #[test]
    fn thresholds_grow_by_level() {
        // 1→2: 100, 2→3: 200, 3→4: 300
        assert_eq!(cumulative_experience(1, 100), 0);
        assert_eq!(cumulative_experience(2, 100), 100);
        assert_eq!(cumulative_experience(3, 100), 300);
        assert_eq!(cumulative_experience(4, 100), 600);
    }

    #[test]
    fn level_up_is_reported() {
        let config = GatheringConfig::default();
        let mut skill = record();

        let change = skill.add_experience(99, &config);
        assert!(!change.leveled_up());
        assert_eq!(skill.level(), 1);

        let change = skill.add_experience(1, &config);
        assert!(change.leveled_up());
        assert_eq!(change.new_level, 2);
        assert_eq!(skill.experience_to_next(&config), Some(200));
    }

    #[test]
    fn multiple_levels_in_one_credit() {
        let config = GatheringConfig::default();
        let mut skill = record();
        let change = skill.add_experience(600, &config);
        assert_eq!(change.previous_level, 1);
        assert_eq!(change.new_level, 4);
    }

    #[test]
    fn level_caps_at_max() {
        let config = GatheringConfig::default();
        let mut skill = record();
        skill.add_experience(u64::MAX / 2, &config);
        assert_eq!(skill.level(), 99);
        assert_eq!(skill.experience_to_next(&config), None);
    }

    #[test]
    fn level_fifty_needs_expected_total() {
        let config = GatheringConfig::default();
        let needed = cumulative_experience(50, config.xp_per_level);
        assert_eq!(needed, 122_500);
        assert_eq!(level_for_experience(needed - 1, &config), 49);
        assert_eq!(level_for_experience(needed, &config), 50);
    }

    proptest! {
        #[test]
        fn level_matches_threshold_definition(xp in 0u64..2_000_000) {
            let config = GatheringConfig::default();
            let level = level_for_experience(xp, &config);
            prop_assert!(cumulative_experience(level, config.xp_per_level) <= xp);
            if level < config.max_level {
                prop_assert!(cumulative_experience(level + 1, config.xp_per_level) > xp);
            }
        }
    }
}
