//! [`gathering_core::ToolOracle`] backed by an in-memory map.
use std::collections::HashMap;

use gathering_core::{Discipline, ToolDefinition, ToolId, ToolOracle};

#[derive(Debug, Default)]
pub struct ToolOracleImpl {
    tools: HashMap<ToolId, ToolDefinition>,
}

impl ToolOracleImpl {
    pub fn new(tools: impl IntoIterator<Item = ToolDefinition>) -> Self {
        Self {
            tools: tools.into_iter().map(|t| (t.id.clone(), t)).collect(),
        }
    }
}

impl ToolOracle for ToolOracleImpl {
    fn tool(&self, id: &ToolId) -> Option<ToolDefinition> {
        self.tools.get(id).cloned()
    }

    /// Lowest-tier, lowest-requirement tool of the discipline; ties broken by id.
    fn starter_tool(&self, discipline: Discipline) -> Option<ToolDefinition> {
        self.tools
            .values()
            .filter(|tool| tool.discipline == discipline)
            .min_by(|a, b| (a.tier, a.required_level, &a.id).cmp(&(b.tier, b.required_level, &b.id)))
            .cloned()
    }

    fn all_tools(&self) -> Vec<ToolDefinition> {
        let mut all: Vec<_> = self.tools.values().cloned().collect();
        all.sort_by(|a, b| (a.discipline, a.tier, &a.id).cmp(&(b.discipline, b.tier, &b.id)));
        all
    }
}
