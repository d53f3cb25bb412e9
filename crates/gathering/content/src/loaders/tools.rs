//! Tool catalog loader.

use std::path::Path;

use gathering_core::ToolDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, ensure_unique, read_file};

/// Tool catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCatalog {
    pub tools: Vec<ToolDefinition>,
}

/// Loader for the tool catalog from RON files.
pub struct ToolLoader;

impl ToolLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<ToolDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<ToolDefinition>> {
        let catalog: ToolCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse tool catalog RON: {}", e))?;
        ensure_unique("tool", catalog.tools.iter().map(|t| &t.id))?;
        Ok(catalog.tools)
    }
}
