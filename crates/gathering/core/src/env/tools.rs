use crate::state::{Discipline, Tier, ToolId, ToolSlot};

pub trait ToolOracle: Send + Sync {
    fn tool(&self, id: &ToolId) -> Option<ToolDefinition>;

    /// Tier-1 tool handed out at character creation for `discipline`.
    fn starter_tool(&self, discipline: Discipline) -> Option<ToolDefinition>;

    fn all_tools(&self) -> Vec<ToolDefinition>;
}

/// Catalog entry for an equippable gathering tool.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ToolDefinition {
    pub id: ToolId,
    pub name: String,
    pub discipline: Discipline,
    pub tier: Tier,
    /// Discipline level needed to equip this tool.
    #[cfg_attr(feature = "serde", serde(default))]
    pub required_level: u8,
}

impl ToolDefinition {
    pub fn new(
        id: impl Into<ToolId>,
        name: impl Into<String>,
        discipline: Discipline,
        tier: Tier,
        required_level: u8,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            discipline,
            tier,
            required_level,
        }
    }

    pub fn slot(&self) -> ToolSlot {
        self.discipline.tool_slot()
    }
}
