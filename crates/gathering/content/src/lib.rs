//! Data-driven gathering content and loaders.
//!
//! This crate houses static gathering content and provides loaders for RON/TOML data files:
//! - Material catalog (data-driven via RON)
//! - Tool catalog (data-driven via RON)
//! - Specialization bundles (data-driven via RON)
//! - Seasonal event schedule (data-driven via RON)
//! - Zone seeding templates (data-driven via RON)
//! - Gathering configuration (data-driven via TOML)
//!
//! Content is consumed by runtime oracles and never appears in persisted state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, EventLoader, GatheringContent, LoadResult, MaterialLoader,
    SpecializationLoader, ToolLoader, ZoneLoader,
};
