//! [`gathering_core::EventOracle`] over a fixed schedule.
use gathering_core::{EventOracle, SeasonalEvent};

#[derive(Debug, Default)]
pub struct EventOracleImpl {
    events: Vec<SeasonalEvent>,
}

impl EventOracleImpl {
    pub fn new(events: impl IntoIterator<Item = SeasonalEvent>) -> Self {
        let mut events: Vec<_> = events.into_iter().collect();
        events.sort_by_key(|e| e.starts_at);
        Self { events }
    }
}

impl EventOracle for EventOracleImpl {
    fn all_events(&self) -> Vec<SeasonalEvent> {
        self.events.clone()
    }
}
