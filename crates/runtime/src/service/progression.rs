//! Skill ledger and specialization operations.

use gathering_core::{
    CharacterId, Discipline, LevelChange, ProgressionError, SkillRecord, SpecializationId,
    SpecializationOracle, SpecializationSelection, select_specialization,
};
use tracing::info;

use super::GatheringService;
use crate::api::{Result, SkillView};
use crate::events::ProgressionEvent;
use crate::repository::{ChangeSet, Versioned};

impl GatheringService {
    /// Credits experience outside of a session.
    pub fn add_experience(
        &self,
        character: CharacterId,
        discipline: Discipline,
        amount: u64,
    ) -> Result<LevelChange> {
        let (mut record, expected) = match self.store.skill(character, discipline)? {
            Some(Versioned { value, version }) => (value, Some(version)),
            None => (SkillRecord::new(character, discipline), None),
        };
        let change = record.add_experience(amount, self.env().config);

        let mut changes = ChangeSet::new();
        changes.put_skill(record, expected);
        self.commit("add_experience", changes)?;

        self.publish_level_change(character, change);
        Ok(change)
    }

    /// Level and experience of a discipline; level 1 when nothing is recorded.
    pub fn skill(&self, character: CharacterId, discipline: Discipline) -> Result<SkillView> {
        let record = self
            .store
            .skill(character, discipline)?
            .map(|record| record.value)
            .unwrap_or_else(|| SkillRecord::new(character, discipline));
        let specialization = self
            .store
            .specialization(character, discipline)?
            .map(|selection| selection.value.specialization);

        Ok(SkillView {
            character,
            discipline,
            level: record.level(),
            experience: record.experience(),
            experience_to_next: record.experience_to_next(self.env().config),
            specialization,
        })
    }

    /// Permanently picks a specialization for one discipline.
    pub fn select_specialization(
        &self,
        character: CharacterId,
        discipline: Discipline,
        specialization: &SpecializationId,
    ) -> Result<SpecializationSelection> {
        let now = self.clock.now();
        let definition = self
            .env()
            .specializations
            .specialization(specialization)
            .ok_or_else(|| ProgressionError::SpecializationNotFound {
                specialization: specialization.clone(),
            })?;
        let existing = self.store.specialization(character, discipline)?;
        let (level, _) = self.discipline_level(character, discipline)?;

        let selection = select_specialization(
            character,
            discipline,
            &definition,
            existing.as_ref().map(|existing| &existing.value),
            level,
            self.env().config,
            now,
        )?;

        let mut changes = ChangeSet::new();
        changes.put_specialization(selection.clone(), None);
        self.commit("select_specialization", changes)?;

        info!(%character, %discipline, %specialization, "specialization selected");
        self.events.publish(ProgressionEvent::SpecializationSelected {
            character,
            discipline,
            specialization: specialization.clone(),
        });
        Ok(selection)
    }

    pub(super) fn publish_level_change(&self, character: CharacterId, change: LevelChange) {
        if !change.leveled_up() {
            return;
        }
        info!(
            %character,
            discipline = %change.discipline,
            previous = change.previous_level,
            level = change.new_level,
            "level up"
        );
        self.events.publish(ProgressionEvent::LevelUp {
            character,
            discipline: change.discipline,
            previous_level: change.previous_level,
            new_level: change.new_level,
        });
    }
}
