//! Runtime configuration.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Settings the service is built with.
///
/// Rules tunables (`GatheringConfig`) ship with the content, not here.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    /// Broadcast capacity of each event topic.
    pub event_capacity: usize,
    /// Directory with RON catalogs and `config.toml`; built-in content when unset.
    pub content_dir: Option<PathBuf>,
    /// Where the file snapshot store keeps its state.
    pub snapshot_path: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_capacity: Self::DEFAULT_EVENT_CAPACITY,
            content_dir: None,
            snapshot_path: None,
        }
    }
}

impl RuntimeConfig {
    pub const DEFAULT_EVENT_CAPACITY: usize = 100;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `GATHERING_CONTENT_DIR` - Content directory (default: built-in content)
    /// - `GATHERING_SNAPSHOT_PATH` - Snapshot file (default: caller decides)
    /// - `GATHERING_EVENT_CAPACITY` - Per-topic event buffer (default: 100)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = read_env::<PathBuf>("GATHERING_CONTENT_DIR") {
            config.content_dir = Some(dir);
        }
        if let Some(path) = read_env::<PathBuf>("GATHERING_SNAPSHOT_PATH") {
            config.snapshot_path = Some(path);
        }
        if let Some(capacity) = read_env::<usize>("GATHERING_EVENT_CAPACITY") {
            config.event_capacity = capacity.max(1);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: FromStr,
{
    env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_builtin_content() {
        let config = RuntimeConfig::default();
        assert_eq!(config.event_capacity, 100);
        assert!(config.content_dir.is_none());
        assert!(config.snapshot_path.is_none());
    }
}
