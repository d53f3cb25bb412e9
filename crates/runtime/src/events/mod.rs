//! Topic-based event bus for gathering events.
//!
//! Events are published to specific topics, and consumers can subscribe only
//! to the topics they need.

mod bus;
mod types;

pub use bus::{EventBus, GatheringEvent, Topic};
pub use types::{NodeEvent, ProgressionEvent, SessionEvent};
