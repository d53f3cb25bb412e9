//! Tool loadout operations.

use gathering_core::{
    CharacterId, DurabilityChange, EquippedTool, EquippedTools, ToolError, ToolId, ToolOracle,
    ToolSlot,
};
use tracing::{info, warn};

use super::GatheringService;
use crate::api::{RepairReport, Result, RuntimeError};
use crate::collaborators::CollaboratorError;
use crate::events::ProgressionEvent;
use crate::repository::{ChangeSet, Versioned};

impl GatheringService {
    /// Gives a known character the starter tool of every discipline.
    ///
    /// A character that already has a loadout keeps it unchanged.
    pub fn initialize_character(&self, character: CharacterId) -> Result<EquippedTools> {
        // Unknown characters fail here.
        self.characters.character_level(character)?;

        if let Some(existing) = self.store.tools(character)? {
            return Ok(existing.value);
        }

        let loadout = EquippedTools::starter(character, self.env().tools);
        let mut changes = ChangeSet::new();
        changes.put_tools(loadout.clone(), None);
        self.commit("initialize_character", changes)?;

        info!(%character, tools = loadout.iter().count(), "character initialized with starter tools");
        Ok(loadout)
    }

    pub fn tools(&self, character: CharacterId) -> Result<EquippedTools> {
        Ok(self.loadout(character)?.value)
    }

    /// Equips a tool at full durability, returning the one it replaced.
    pub fn equip_tool(&self, character: CharacterId, tool: &ToolId) -> Result<Option<EquippedTool>> {
        let definition = self
            .env()
            .tools
            .tool(tool)
            .ok_or_else(|| ToolError::ToolNotFound { tool: tool.clone() })?;
        let Versioned { value: mut loadout, version } = self.loadout(character)?;
        let (discipline_level, _) = self.discipline_level(character, definition.discipline)?;

        let previous = loadout.equip(&definition, discipline_level)?;

        let mut changes = ChangeSet::new();
        changes.put_tools(loadout, Some(version));
        self.commit("equip_tool", changes)?;

        info!(%character, %tool, tier = %definition.tier, "tool equipped");
        self.events.publish(ProgressionEvent::ToolEquipped {
            character,
            slot: definition.slot(),
            tool: definition.id.clone(),
            tier: definition.tier,
        });
        Ok(previous)
    }

    pub fn unequip_tool(&self, character: CharacterId, slot: ToolSlot) -> Result<EquippedTool> {
        let Versioned { value: mut loadout, version } = self.loadout(character)?;
        let removed = loadout.unequip(slot)?;

        let mut changes = ChangeSet::new();
        changes.put_tools(loadout, Some(version));
        self.commit("unequip_tool", changes)?;

        info!(%character, %slot, tool = %removed.tool, "tool unequipped");
        Ok(removed)
    }

    /// Lowers a tool's durability, clamping at zero.
    pub fn reduce_tool_durability(
        &self,
        character: CharacterId,
        slot: ToolSlot,
        amount: f32,
    ) -> Result<DurabilityChange> {
        let Versioned { value: mut loadout, version } = self.loadout(character)?;
        let change = loadout.reduce_durability(slot, amount)?;

        let mut changes = ChangeSet::new();
        changes.put_tools(loadout, Some(version));
        self.commit("reduce_tool_durability", changes)?;

        if change.broke() {
            warn!(%character, %slot, "tool broke");
            self.events.publish(ProgressionEvent::ToolBroken { character, slot });
        }
        Ok(change)
    }

    /// Restores a damaged tool to full durability for its tier's price.
    ///
    /// The currency is debited before the commit and credited back if the
    /// commit fails.
    pub fn repair_tool(&self, character: CharacterId, slot: ToolSlot) -> Result<RepairReport> {
        let Versioned { value: mut loadout, version } = self.loadout(character)?;
        let quote = loadout.quote_repair(slot, self.env().config)?;

        let available = self.inventory.currency(character)?;
        if available < quote.cost {
            return Err(ToolError::InsufficientFunds {
                required: quote.cost,
                available,
            }
            .into());
        }
        let balance = self
            .inventory
            .debit_currency(character, quote.cost)
            .map_err(|error| match error {
                CollaboratorError::InsufficientFunds {
                    required,
                    available,
                } => RuntimeError::Tool(ToolError::InsufficientFunds {
                    required,
                    available,
                }),
                other => other.into(),
            })?;

        let durability = loadout.restore(slot)?;
        let mut changes = ChangeSet::new();
        changes.put_tools(loadout, Some(version));
        if let Err(error) = self.commit("repair_tool", changes) {
            warn!(%character, %slot, cost = quote.cost, %error, "repair not saved; refunding");
            self.inventory.credit_currency(character, quote.cost)?;
            return Err(error);
        }

        info!(%character, %slot, cost = quote.cost, balance, "tool repaired");
        self.events.publish(ProgressionEvent::ToolRepaired {
            character,
            slot,
            cost: quote.cost,
        });

        Ok(RepairReport {
            slot,
            tier: quote.tier,
            cost: quote.cost,
            balance,
            durability,
        })
    }
}
