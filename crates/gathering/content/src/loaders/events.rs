//! Seasonal event schedule loader.

use std::path::Path;

use gathering_core::{SeasonalEvent, validate_multiplier};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, ensure_unique, read_file};

/// Event schedule structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventSchedule {
    pub events: Vec<SeasonalEvent>,
}

/// Loader for seasonal events from RON files.
pub struct EventLoader;

impl EventLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<SeasonalEvent>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<SeasonalEvent>> {
        let schedule: EventSchedule = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse event schedule RON: {}", e))?;

        ensure_unique("event", schedule.events.iter().map(|e| &e.id))?;
        for event in &schedule.events {
            if event.ends_at <= event.starts_at {
                anyhow::bail!("Event '{}' ends before it starts", event.id);
            }
            validate_multiplier(event.yield_multiplier)
                .and_then(|_| validate_multiplier(event.experience_multiplier))
                .map_err(|e| anyhow::anyhow!("Event '{}': {}", event.id, e))?;
        }

        Ok(schedule.events)
    }
}
