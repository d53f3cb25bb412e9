use crate::bonus::SpecializationModifiers;
use crate::state::{Discipline, SpecializationId};

pub trait SpecializationOracle: Send + Sync {
    fn specialization(&self, id: &SpecializationId) -> Option<SpecializationDefinition>;

    /// All bundles selectable for `discipline`.
    fn for_discipline(&self, discipline: Discipline) -> Vec<SpecializationDefinition>;
}

/// A named bundle of gathering multipliers, chosen once per discipline.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpecializationDefinition {
    pub id: SpecializationId,
    pub name: String,
    pub discipline: Discipline,
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifiers: SpecializationModifiers,
}

impl SpecializationDefinition {
    pub fn new(
        id: impl Into<SpecializationId>,
        name: impl Into<String>,
        discipline: Discipline,
        modifiers: SpecializationModifiers,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            discipline,
            modifiers,
        }
    }
}
