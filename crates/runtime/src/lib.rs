//! Runtime orchestration for the gathering engine.
//!
//! This crate wires `gathering-core` rules to persistence, static content and
//! external collaborators. Consumers build a [`GatheringService`] and call its
//! operations; each call commits its writes as one versioned change set.
//!
//! Modules are organized by responsibility:
//! - [`service`] hosts the service and its builder
//! - [`api`] exposes the error and report types clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`repository`] holds the versioned store contract and its adapters
//! - [`collaborators`] defines the inventory and character stores the engine calls
//! - [`oracle`] adapts loaded content to the core oracle traits
//! - [`clock`] and [`config`] supply time and runtime settings
pub mod api;
pub mod clock;
pub mod collaborators;
pub mod config;
pub mod events;
pub mod oracle;
pub mod repository;
pub mod service;

pub use api::{
    CancelReport, CollectReport, NodeView, ProgressReport, RepairReport, Result, RuntimeError,
    SkillView, StartReport,
};
pub use clock::{Clock, ManualClock, SystemClock};
pub use collaborators::{
    CharacterStore, CollaboratorError, InMemoryCharacters, InMemoryInventory, InventorySnapshot,
    InventoryStore, Wallet,
};
pub use config::RuntimeConfig;
pub use events::{EventBus, GatheringEvent, NodeEvent, ProgressionEvent, SessionEvent, Topic};
pub use oracle::{
    EventOracleImpl, MaterialOracleImpl, OracleManager, SpecializationOracleImpl, ToolOracleImpl,
    ZoneOracleImpl,
};
pub use repository::{
    ChangeSet, CommitReceipt, EntityKey, FileSnapshotStore, GatheringStore,
    InMemoryGatheringStore, RepositoryError, StoreState, Versioned,
};
pub use service::{GatheringService, GatheringServiceBuilder};
