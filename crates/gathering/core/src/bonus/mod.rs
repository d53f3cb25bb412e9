//! Bonus composition for gathering rates.
//!
//! Tool tier, specialization, hotspot and seasonal event modifiers combine
//! into one [`ComposedRates`] through [`BonusComposer::compose`].
mod compose;
mod modifiers;

pub use compose::{AppliedEffect, BonusComposer, ComposedRates, compose};
pub use modifiers::{
    BaseRates, EventModifier, HotspotModifier, Modifiers, SpecializationModifiers, ToolModifier,
};
