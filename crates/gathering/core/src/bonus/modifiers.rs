//! Typed modifier inputs consumed by the composer.
//!
//! Each source of bonuses has its own struct with named fields, so the
//! composer never has to interpret free-form effect payloads.

use crate::node::HotspotKind;
use crate::state::{EventId, Tier};

/// Unmodified per-unit rates of a material.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseRates {
    pub yield_per_unit: f64,
    pub duration_ms: f64,
    pub success_chance: f64,
    pub experience: f64,
}

/// Equipped tool as seen by the composer.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ToolModifier {
    pub tier: Tier,
    pub durability: f32,
}

impl ToolModifier {
    pub fn new(tier: Tier, durability: f32) -> Self {
        Self { tier, durability }
    }

    pub fn is_broken(&self) -> bool {
        self.durability <= 0.0
    }

    /// Tier used for bonuses: 0 while broken.
    pub fn effective_tier(&self) -> u8 {
        if self.is_broken() { 0 } else { self.tier.get() }
    }
}

/// Multipliers granted by a selected specialization.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpecializationModifiers {
    pub yield_multiplier: f64,
    pub speed_multiplier: f64,
    /// Forces success chance to 1.0, overriding everything else.
    pub failure_immunity: bool,
}

impl SpecializationModifiers {
    pub const NEUTRAL: Self = Self {
        yield_multiplier: 1.0,
        speed_multiplier: 1.0,
        failure_immunity: false,
    };
}

impl Default for SpecializationModifiers {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Active hotspot on the node being gathered.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HotspotModifier {
    pub kind: HotspotKind,
    pub multiplier: f64,
}

/// One matching seasonal event.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventModifier {
    pub event: EventId,
    pub yield_multiplier: f64,
    pub experience_multiplier: f64,
}

/// Every modifier source for one composition, applied in a fixed order:
/// tool, specialization, hotspot, events.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Modifiers {
    pub tool: Option<ToolModifier>,
    pub specialization: Option<SpecializationModifiers>,
    pub hotspot: Option<HotspotModifier>,
    pub events: Vec<EventModifier>,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tool(mut self, tool: ToolModifier) -> Self {
        self.tool = Some(tool);
        self
    }

    pub fn with_specialization(mut self, specialization: SpecializationModifiers) -> Self {
        self.specialization = Some(specialization);
        self
    }

    pub fn with_hotspot(mut self, hotspot: HotspotModifier) -> Self {
        self.hotspot = Some(hotspot);
        self
    }

    pub fn with_event(mut self, event: EventModifier) -> Self {
        self.events.push(event);
        self
    }
}
