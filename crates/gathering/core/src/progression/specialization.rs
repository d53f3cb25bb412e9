use crate::config::GatheringConfig;
use crate::env::SpecializationDefinition;
use crate::error::{Requirement, RequirementKind, ValidationError};
use crate::state::{CharacterId, Discipline, SpecializationId, Timestamp};

use super::ProgressionError;

/// A character's permanent specialization choice for one discipline.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpecializationSelection {
    pub character: CharacterId,
    pub discipline: Discipline,
    pub specialization: SpecializationId,
    pub selected_at: Timestamp,
}

/// Validates and builds a selection.
///
/// Fails when `definition` belongs to another discipline, the discipline
/// level is below the unlock level, or a selection already exists.
pub fn select_specialization(
    character: CharacterId,
    discipline: Discipline,
    definition: &SpecializationDefinition,
    existing: Option<&SpecializationSelection>,
    discipline_level: u8,
    config: &GatheringConfig,
    now: Timestamp,
) -> Result<SpecializationSelection, ProgressionError> {
    if definition.discipline != discipline {
        return Err(ValidationError::DisciplineMismatch {
            expected: discipline,
            found: definition.discipline,
        }
        .into());
    }

    Requirement::check(
        RequirementKind::DisciplineLevel(discipline),
        u32::from(discipline_level),
        u32::from(config.specialization_unlock_level),
    )
    .map_err(ProgressionError::RequirementNotMet)?;

    if let Some(current) = existing {
        return Err(ProgressionError::SpecializationAlreadySelected {
            discipline,
            current: current.specialization.clone(),
        });
    }

    Ok(SpecializationSelection {
        character,
        discipline,
        specialization: definition.id.clone(),
        selected_at: now,
    })
}
