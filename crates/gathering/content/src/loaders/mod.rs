//! Content loaders for reading gathering data from files.
//!
//! Each loader turns one RON/TOML file into gathering-core types. The
//! [`ContentFactory`] loads a whole data directory and cross-checks it.

pub mod catalogs;
pub mod config;
pub mod events;
pub mod factory;
pub mod materials;
pub mod specializations;
pub mod tools;
pub mod zones;

pub use catalogs::GatheringContent;
pub use config::ConfigLoader;
pub use events::EventLoader;
pub use factory::ContentFactory;
pub use materials::MaterialLoader;
pub use specializations::SpecializationLoader;
pub use tools::ToolLoader;
pub use zones::ZoneLoader;

use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;
use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Fails on the first id that appears twice.
pub(crate) fn ensure_unique<'a, K, I>(kind: &str, ids: I) -> LoadResult<()>
where
    K: Eq + Hash + Display + 'a,
    I: IntoIterator<Item = &'a K>,
{
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            anyhow::bail!("Duplicate {} id '{}'", kind, id);
        }
    }
    Ok(())
}
