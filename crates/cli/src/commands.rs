//! Subcommands, one per engine operation plus collaborator helpers.

use anyhow::Result;
use clap::Subcommand;
use gathering_core::{
    CharacterId, Discipline, HotspotKind, MaterialId, NodeId, SpecializationId, ToolId, ToolSlot,
    ZoneId,
};

use crate::output::{OutputFormat, emit};
use crate::workspace::Workspace;

#[derive(Subcommand)]
pub enum Command {
    /// Register a character with the character store and give it starter tools
    Init {
        character: u64,
        /// Character level recorded in the character store
        #[arg(short, long, default_value_t = 1)]
        level: u8,
        /// Starting currency
        #[arg(short, long, default_value_t = 0)]
        currency: u64,
    },

    /// Set a character's level in the character store
    SetLevel { character: u64, level: u8 },

    /// Set a character's currency balance
    SetCurrency { character: u64, amount: u64 },

    /// Show currency and materials
    Wallet { character: u64 },

    /// Spawn a zone's nodes from its template
    Seed { zone: u32 },

    /// List harvestable nodes in a zone
    Nodes { zone: u32 },

    /// Harvest one unit from a node
    Harvest { node: u64 },

    /// Restore a depleted node whose respawn time has passed
    Respawn { node: u64 },

    /// Turn a node into a timed hotspot
    Hotspot {
        node: u64,
        #[arg(value_name = "KIND")]
        kind: HotspotKind,
        multiplier: f64,
        /// Duration in seconds
        #[arg(value_name = "SECS")]
        duration: u64,
    },

    /// Start a gathering session
    Start {
        character: u64,
        material: String,
        /// Units to gather
        #[arg(short, long, default_value_t = 1)]
        goal: u32,
        /// Bind the session to a node
        #[arg(short, long)]
        node: Option<u64>,
    },

    /// Settle and show the active session
    Poll { character: u64 },

    /// Finish a completed session and receive its materials
    Collect { character: u64 },

    /// Stop the active session, keeping what was already gathered
    Cancel { character: u64 },

    /// Show the equipped tools
    Tools { character: u64 },

    /// Equip a tool at full durability
    Equip { character: u64, tool: String },

    /// Remove the tool in a slot
    Unequip { character: u64, slot: ToolSlot },

    /// Wear down a tool by a fixed amount
    Wear {
        character: u64,
        slot: ToolSlot,
        amount: f32,
    },

    /// Pay to restore a tool to full durability
    Repair { character: u64, slot: ToolSlot },

    /// Show level and experience of a discipline
    Skill {
        character: u64,
        discipline: Discipline,
    },

    /// Credit experience directly
    AddXp {
        character: u64,
        discipline: Discipline,
        amount: u64,
    },

    /// Pick a discipline specialization (permanent)
    Specialize {
        character: u64,
        discipline: Discipline,
        specialization: String,
    },
}

impl Command {
    pub fn execute(self, workspace: &Workspace, format: OutputFormat) -> Result<()> {
        let service = &workspace.service;
        match self {
            Self::Init {
                character,
                level,
                currency,
            } => {
                let character = CharacterId(character);
                workspace.characters.set_level(character, level)?;
                if currency > 0 {
                    workspace.inventory.set_currency(character, currency)?;
                }
                emit(format, &service.initialize_character(character)?)
            }
            Self::SetLevel { character, level } => {
                let character = CharacterId(character);
                workspace.characters.set_level(character, level)?;
                println!("{character} is now level {level}");
                Ok(())
            }
            Self::SetCurrency { character, amount } => {
                let character = CharacterId(character);
                workspace.inventory.set_currency(character, amount)?;
                emit(format, &workspace.inventory.wallet(character)?)
            }
            Self::Wallet { character } => {
                emit(format, &workspace.inventory.wallet(CharacterId(character))?)
            }
            Self::Seed { zone } => emit(format, &service.seed_zone(ZoneId(zone))?),
            Self::Nodes { zone } => emit(format, &service.available_nodes(ZoneId(zone))?),
            Self::Harvest { node } => emit(format, &service.harvest_node(NodeId(node))?),
            Self::Respawn { node } => emit(format, &service.try_respawn(NodeId(node))?),
            Self::Hotspot {
                node,
                kind,
                multiplier,
                duration,
            } => emit(
                format,
                &service.promote_hotspot(NodeId(node), kind, multiplier, duration)?,
            ),
            Self::Start {
                character,
                material,
                goal,
                node,
            } => emit(
                format,
                &service.start_session(
                    CharacterId(character),
                    &MaterialId::new(material),
                    goal,
                    node.map(NodeId),
                )?,
            ),
            Self::Poll { character } => emit(format, &service.poll_session(CharacterId(character))?),
            Self::Collect { character } => {
                emit(format, &service.collect_session(CharacterId(character))?)
            }
            Self::Cancel { character } => {
                emit(format, &service.cancel_session(CharacterId(character))?)
            }
            Self::Tools { character } => emit(format, &service.tools(CharacterId(character))?),
            Self::Equip { character, tool } => {
                let character = CharacterId(character);
                let replaced = service.equip_tool(character, &ToolId::new(tool))?;
                if let Some(replaced) = replaced {
                    tracing::info!(%character, tool = %replaced.tool, "replaced tool returned to owner");
                }
                emit(format, &service.tools(character)?)
            }
            Self::Unequip { character, slot } => {
                emit(format, &service.unequip_tool(CharacterId(character), slot)?)
            }
            Self::Wear {
                character,
                slot,
                amount,
            } => emit(
                format,
                &service.reduce_tool_durability(CharacterId(character), slot, amount)?,
            ),
            Self::Repair { character, slot } => {
                emit(format, &service.repair_tool(CharacterId(character), slot)?)
            }
            Self::Skill {
                character,
                discipline,
            } => emit(format, &service.skill(CharacterId(character), discipline)?),
            Self::AddXp {
                character,
                discipline,
                amount,
            } => emit(
                format,
                &service.add_experience(CharacterId(character), discipline, amount)?,
            ),
            Self::Specialize {
                character,
                discipline,
                specialization,
            } => emit(
                format,
                &service.select_specialization(
                    CharacterId(character),
                    discipline,
                    &SpecializationId::new(specialization),
                )?,
            ),
        }
    }
}
