//! In-memory repository implementations for tests and local runs.

mod store;

pub use store::{InMemoryGatheringStore, StoreState};
