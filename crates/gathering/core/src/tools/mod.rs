//! Tool registry: one equipped tool per discipline slot, with wear.
//!
//! Tool durability is independent of node durability and always stays in
//! `[0, 100]`. A tool at zero durability stays equipped but counts as
//! tier-equivalent-0 for bonuses until repaired.
mod error;

pub use error::ToolError;

use strum::IntoEnumIterator;

use crate::bonus::ToolModifier;
use crate::config::GatheringConfig;
use crate::env::{ToolDefinition, ToolOracle};
use crate::error::{Requirement, RequirementKind, ValidationError};
use crate::state::{CharacterId, Discipline, Tier, ToolId, ToolSlot};

const MAX_DURABILITY: f32 = GatheringConfig::MAX_TOOL_DURABILITY;

/// The tool occupying one slot.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquippedTool {
    pub tool: ToolId,
    pub tier: Tier,
    durability: f32,
}

impl EquippedTool {
    pub fn new(definition: &ToolDefinition) -> Self {
        Self {
            tool: definition.id.clone(),
            tier: definition.tier,
            durability: MAX_DURABILITY,
        }
    }

    pub fn durability(&self) -> f32 {
        self.durability
    }

    pub fn is_broken(&self) -> bool {
        self.durability <= 0.0
    }

    pub fn modifier(&self) -> ToolModifier {
        ToolModifier::new(self.tier, self.durability)
    }

    fn set_durability(&mut self, value: f32) {
        self.durability = value.clamp(0.0, MAX_DURABILITY);
    }
}

/// Durability before and after a change.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DurabilityChange {
    pub slot: ToolSlot,
    pub before: f32,
    pub after: f32,
}

impl DurabilityChange {
    /// True if this change took the tool to zero.
    pub fn broke(&self) -> bool {
        self.before > 0.0 && self.after <= 0.0
    }
}

/// Price of restoring one slot to full durability.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RepairQuote {
    pub slot: ToolSlot,
    pub tier: Tier,
    pub cost: u64,
}

/// Per-character loadout, one entry per discipline slot.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquippedTools {
    pub character: CharacterId,
    slots: [Option<EquippedTool>; Discipline::COUNT],
}

impl EquippedTools {
    pub fn empty(character: CharacterId) -> Self {
        Self {
            character,
            slots: Default::default(),
        }
    }

    /// Character-creation loadout: the starter tool of every discipline.
    pub fn starter(character: CharacterId, tools: &dyn ToolOracle) -> Self {
        let mut loadout = Self::empty(character);
        for discipline in Discipline::iter() {
            if let Some(definition) = tools.starter_tool(discipline) {
                loadout.slots[discipline.index()] = Some(EquippedTool::new(&definition));
            }
        }
        loadout
    }

    pub fn slot(&self, slot: ToolSlot) -> Option<&EquippedTool> {
        self.slots[slot.discipline().index()].as_ref()
    }

    fn slot_mut(&mut self, slot: ToolSlot) -> Result<&mut EquippedTool, ToolError> {
        self.slots[slot.discipline().index()]
            .as_mut()
            .ok_or(ToolError::SlotEmpty { slot })
    }

    pub fn iter(&self) -> impl Iterator<Item = (ToolSlot, &EquippedTool)> {
        ToolSlot::iter().filter_map(|slot| self.slot(slot).map(|tool| (slot, tool)))
    }

    /// Composer input for `discipline`; `None` for an empty slot.
    pub fn modifier(&self, discipline: Discipline) -> Option<ToolModifier> {
        self.slot(discipline.tool_slot()).map(EquippedTool::modifier)
    }

    /// Equips `definition` in its discipline's slot at full durability.
    ///
    /// Returns the tool previously in that slot.
    pub fn equip(
        &mut self,
        definition: &ToolDefinition,
        discipline_level: u8,
    ) -> Result<Option<EquippedTool>, ToolError> {
        Requirement::check(
            RequirementKind::DisciplineLevel(definition.discipline),
            u32::from(discipline_level),
            u32::from(definition.required_level),
        )
        .map_err(ToolError::RequirementNotMet)?;

        let index = definition.discipline.index();
        Ok(self.slots[index].replace(EquippedTool::new(definition)))
    }

    pub fn unequip(&mut self, slot: ToolSlot) -> Result<EquippedTool, ToolError> {
        self.slots[slot.discipline().index()]
            .take()
            .ok_or(ToolError::SlotEmpty { slot })
    }

    /// Lowers durability by `amount`, clamping at zero.
    pub fn reduce_durability(
        &mut self,
        slot: ToolSlot,
        amount: f32,
    ) -> Result<DurabilityChange, ToolError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(ValidationError::InvalidAmount { amount }.into());
        }
        let tool = self.slot_mut(slot)?;
        let before = tool.durability;
        tool.set_durability(before - amount);
        Ok(DurabilityChange {
            slot,
            before,
            after: tool.durability,
        })
    }

    /// Wear from gathering `units` with the composed loss factor.
    ///
    /// Returns `None` when the discipline has no tool or nothing was gathered.
    pub fn wear(
        &mut self,
        discipline: Discipline,
        units: u32,
        durability_loss_factor: f64,
        config: &GatheringConfig,
    ) -> Option<DurabilityChange> {
        if units == 0 {
            return None;
        }
        let slot = discipline.tool_slot();
        let amount = (f64::from(config.tool_wear_per_use) * durability_loss_factor * f64::from(units))
            as f32;
        self.reduce_durability(slot, amount).ok()
    }

    pub fn quote_repair(
        &self,
        slot: ToolSlot,
        config: &GatheringConfig,
    ) -> Result<RepairQuote, ToolError> {
        let tool = self.slot(slot).ok_or(ToolError::SlotEmpty { slot })?;
        if tool.durability >= MAX_DURABILITY {
            return Err(ToolError::NotDamaged { slot });
        }
        Ok(RepairQuote {
            slot,
            tier: tool.tier,
            cost: config.repair_cost(tool.tier),
        })
    }

    /// Restores full durability once the quote has been paid.
    pub fn restore(&mut self, slot: ToolSlot) -> Result<DurabilityChange, ToolError> {
        let tool = self.slot_mut(slot)?;
        let before = tool.durability;
        tool.set_durability(MAX_DURABILITY);
        Ok(DurabilityChange {
            slot,
            before,
            after: tool.durability,
        })
    }
}
