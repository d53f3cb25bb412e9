//! Content factory for building catalogs from data files.

use std::path::{Path, PathBuf};

use crate::loaders::{
    ConfigLoader, EventLoader, GatheringContent, LoadResult, MaterialLoader, SpecializationLoader,
    ToolLoader, ZoneLoader,
};

/// Content factory that loads all gathering content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── materials.ron
/// ├── tools.ron
/// ├── specializations.ron
/// ├── events.ron
/// └── zones.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Content compiled into the crate from its `data/` directory.
    pub fn builtin() -> LoadResult<GatheringContent> {
        let content = GatheringContent {
            config: ConfigLoader::parse(include_str!("../../data/config.toml"))?,
            materials: MaterialLoader::parse(include_str!("../../data/materials.ron"))?,
            tools: ToolLoader::parse(include_str!("../../data/tools.ron"))?,
            specializations: SpecializationLoader::parse(include_str!(
                "../../data/specializations.ron"
            ))?,
            events: EventLoader::parse(include_str!("../../data/events.ron"))?,
            zones: ZoneLoader::parse(include_str!("../../data/zones.ron"))?,
        };
        content.validate()?;
        Ok(content)
    }

    /// Load gathering configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<gathering_core::GatheringConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load material catalog from `materials.ron`.
    pub fn load_materials(&self) -> LoadResult<Vec<gathering_core::Material>> {
        MaterialLoader::load(&self.data_dir.join("materials.ron"))
    }

    /// Load tool catalog from `tools.ron`.
    pub fn load_tools(&self) -> LoadResult<Vec<gathering_core::ToolDefinition>> {
        ToolLoader::load(&self.data_dir.join("tools.ron"))
    }

    /// Load specialization bundles from `specializations.ron`.
    pub fn load_specializations(
        &self,
    ) -> LoadResult<Vec<gathering_core::SpecializationDefinition>> {
        SpecializationLoader::load(&self.data_dir.join("specializations.ron"))
    }

    /// Load seasonal events from `events.ron`.
    pub fn load_events(&self) -> LoadResult<Vec<gathering_core::SeasonalEvent>> {
        EventLoader::load(&self.data_dir.join("events.ron"))
    }

    /// Load zone seeding templates from `zones.ron`.
    pub fn load_zones(&self) -> LoadResult<Vec<gathering_core::ZoneDefinition>> {
        ZoneLoader::load(&self.data_dir.join("zones.ron"))
    }

    /// Loads and cross-checks every file of the data directory.
    pub fn load_all(&self) -> LoadResult<GatheringContent> {
        let content = GatheringContent {
            config: self.load_config()?,
            materials: self.load_materials()?,
            tools: self.load_tools()?,
            specializations: self.load_specializations()?,
            events: self.load_events()?,
            zones: self.load_zones()?,
        };
        content.validate()?;
        Ok(content)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
