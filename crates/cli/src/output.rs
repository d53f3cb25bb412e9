//! Rendering of command results.

use anyhow::Result;
use gathering_core::{
    DurabilityChange, EquippedTool, EquippedTools, Hotspot, LevelChange, NodePhase, SessionStatus,
    SpecializationSelection,
};
use gathering_runtime::{
    CancelReport, CollectReport, NodeView, ProgressReport, RepairReport, RuntimeError, SkillView,
    StartReport, Wallet,
};
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Text form of a command result.
pub trait Render {
    fn render(&self) -> String;
}

pub fn emit<T: Serialize + Render>(format: OutputFormat, value: &T) -> Result<()> {
    match format {
        OutputFormat::Text => println!("{}", value.render()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

/// Prints a failed operation with its code, category and retry hint.
pub fn emit_error(format: OutputFormat, err: &RuntimeError) {
    match format {
        OutputFormat::Text => {
            let retry = if err.is_retryable() { " (retry)" } else { "" };
            eprintln!("error[{}]: {err}{retry}", err.error_code());
        }
        OutputFormat::Json => {
            let body = serde_json::json!({
                "error": err.error_code(),
                "message": err.to_string(),
                "category": err.category(),
                "retryable": err.is_retryable(),
            });
            eprintln!("{body:#}");
        }
    }
}

fn level_line(change: &Option<LevelChange>) -> String {
    match change {
        Some(change) => format!(
            "\n  level up! {} {} -> {}",
            change.discipline, change.previous_level, change.new_level
        ),
        None => String::new(),
    }
}

fn durability_line(change: &DurabilityChange) -> String {
    let broke = if change.broke() { " (broken)" } else { "" };
    format!(
        "{} durability {:.1}% -> {:.1}%{broke}",
        change.slot, change.before, change.after
    )
}

impl Render for StartReport {
    fn render(&self) -> String {
        let session = &self.session;
        let node = session
            .node
            .map(|node| format!(" at {node}"))
            .unwrap_or_default();
        format!(
            "{} started gathering {} x{}{node}\n  {} ms/unit, {:.0}% success, yield {}, {} xp/unit",
            session.character,
            session.material,
            session.goal,
            self.rates.duration_ms,
            self.rates.success_chance * 100.0,
            self.rates.yield_per_unit,
            self.rates.experience_per_unit,
        )
    }
}

impl Render for ProgressReport {
    fn render(&self) -> String {
        let mut out = format!(
            "{} {}: {}/{} gathered, {} banked",
            self.character, self.material, self.completed, self.goal, self.banked
        );
        match (self.status, self.time_to_next_unit_ms) {
            (SessionStatus::Completed, _) => out.push_str("\n  complete, ready to collect"),
            (_, Some(ms)) => out.push_str(&format!("\n  next unit in {ms} ms")),
            (_, None) => {}
        }
        if self.gained > 0 {
            out.push_str(&format!(
                "\n  +{} units, +{} xp",
                self.gained, self.experience_gained
            ));
        }
        if self.forfeited_ms > 0 {
            out.push_str(&format!("\n  {} ms lost waiting on the node", self.forfeited_ms));
        }
        if let Some(wear) = &self.tool_wear {
            out.push_str(&format!("\n  {}", durability_line(wear)));
        }
        out.push_str(&level_line(&self.level_up));
        out
    }
}

impl Render for CollectReport {
    fn render(&self) -> String {
        format!(
            "{} collected {} x{}{}",
            self.character,
            self.material,
            self.quantity,
            level_line(&self.level_up)
        )
    }
}

impl Render for CancelReport {
    fn render(&self) -> String {
        format!(
            "{} cancelled {} at {}/{}, kept {}{}",
            self.character,
            self.material,
            self.completed,
            self.goal,
            self.granted,
            level_line(&self.level_up)
        )
    }
}

impl Render for RepairReport {
    fn render(&self) -> String {
        format!(
            "repaired {} tier {} for {} (balance {})\n  {}",
            self.slot,
            self.tier,
            self.cost,
            self.balance,
            durability_line(&self.durability)
        )
    }
}

impl Render for SkillView {
    fn render(&self) -> String {
        let next = self
            .experience_to_next
            .map(|xp| format!(", {xp} xp to next"))
            .unwrap_or_else(|| ", max level".to_owned());
        let spec = self
            .specialization
            .as_ref()
            .map(|id| format!(", specialized as {id}"))
            .unwrap_or_default();
        format!(
            "{} {}: level {} ({} xp{next}){spec}",
            self.character, self.discipline, self.level, self.experience
        )
    }
}

impl Render for NodeView {
    fn render(&self) -> String {
        let node = &self.node;
        let phase = match self.phase {
            NodePhase::Active => "active".to_owned(),
            NodePhase::Depleting => "depleting".to_owned(),
            NodePhase::Depleted { respawn_at } => format!("depleted until {respawn_at}"),
            NodePhase::Respawning => "respawning".to_owned(),
        };
        let hotspot = match node.hotspot() {
            Some(hotspot) if self.is_hotspot() => {
                format!(" [{} x{}]", hotspot.kind, hotspot.multiplier)
            }
            _ => String::new(),
        };
        format!(
            "{} {} {} {}/{} {phase}{hotspot}",
            node.id,
            node.kind,
            node.material,
            node.durability(),
            node.max_durability()
        )
    }
}

impl Render for Vec<NodeView> {
    fn render(&self) -> String {
        if self.is_empty() {
            return "no nodes".to_owned();
        }
        self.iter().map(Render::render).collect::<Vec<_>>().join("\n")
    }
}

impl Render for Hotspot {
    fn render(&self) -> String {
        format!(
            "{} hotspot x{} until {}",
            self.kind, self.multiplier, self.expires_at
        )
    }
}

impl Render for EquippedTool {
    fn render(&self) -> String {
        format!("{} (tier {}) {:.1}%", self.tool, self.tier, self.durability())
    }
}

impl Render for EquippedTools {
    fn render(&self) -> String {
        let lines: Vec<_> = self
            .iter()
            .map(|(slot, tool)| format!("{slot}: {}", tool.render()))
            .collect();
        if lines.is_empty() {
            return format!("{} has no tools equipped", self.character);
        }
        lines.join("\n")
    }
}

impl Render for DurabilityChange {
    fn render(&self) -> String {
        durability_line(self)
    }
}

impl Render for LevelChange {
    fn render(&self) -> String {
        if self.leveled_up() {
            format!(
                "{} level {} -> {}",
                self.discipline, self.previous_level, self.new_level
            )
        } else {
            format!("{} level {}", self.discipline, self.new_level)
        }
    }
}

impl Render for SpecializationSelection {
    fn render(&self) -> String {
        format!(
            "{} specialized in {} as {}",
            self.character, self.discipline, self.specialization
        )
    }
}

impl Render for Wallet {
    fn render(&self) -> String {
        let mut out = format!("currency: {}", self.currency);
        for (material, quantity) in &self.materials {
            out.push_str(&format!("\n{material}: {quantity}"));
        }
        out
    }
}
