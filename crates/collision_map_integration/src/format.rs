use std::path::Path;

use collision_map_codegen::{export, preview, ExportConfig};
use collision_map_core::Map;

use crate::format_meta::FormatMeta;

/// Identifier of the built-in collision header format
pub const BUTANO_COLLISIONS_ID: &str = "butano-collisions";
/// Display name of the built-in collision header format
pub const BUTANO_COLLISIONS_NAME: &str = "Butano Header - Collision Map";
/// Description of the built-in collision header format
pub const BUTANO_COLLISIONS_DESCRIPTION: &str =
    "Walkability array and grid size of the \"Collisions\" tile layer";

/// An export format as the host sees it.
///
/// Errors cross this boundary as human-readable messages; the host shows
/// them to the user as-is.
pub trait MapFormat: std::fmt::Debug {
    /// Stable identifier used to select the format
    fn id(&self) -> &str;

    /// Name shown in export dialogs
    fn name(&self) -> &str;

    /// Extension of the files this format produces
    fn extension(&self) -> &str;

    /// One-line summary for format listings
    fn description(&self) -> &str {
        ""
    }

    /// Export `map`, deriving the output location from `filename`
    fn write(&self, map: &Map, filename: &Path) -> Result<(), String>;

    /// Produce the exported text without writing it
    fn render(&self, map: &Map, filename: &Path) -> Result<String, String>;
}

/// Butano collision header export
#[derive(Debug, Clone)]
pub struct ButanoCollisionsFormat {
    id: String,
    name: String,
    description: String,
    config: ExportConfig,
}

impl ButanoCollisionsFormat {
    pub fn new() -> Self {
        Self {
            id: BUTANO_COLLISIONS_ID.to_string(),
            name: BUTANO_COLLISIONS_NAME.to_string(),
            description: BUTANO_COLLISIONS_DESCRIPTION.to_string(),
            config: ExportConfig::default(),
        }
    }

    /// Build a format from TOML metadata; unset fields keep the built-in values
    pub fn from_meta(meta: &FormatMeta) -> Self {
        let defaults = Self::new();
        Self {
            id: meta.format.id.clone(),
            name: meta.format.name.clone().unwrap_or(defaults.name),
            description: meta.format.description.clone().unwrap_or(defaults.description),
            config: meta.export_config(),
        }
    }

    /// Set the export configuration
    pub fn with_config(mut self, config: ExportConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }
}

impl Default for ButanoCollisionsFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl MapFormat for ButanoCollisionsFormat {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn extension(&self) -> &str {
        &self.config.extension
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn write(&self, map: &Map, filename: &Path) -> Result<(), String> {
        export(map, filename, &self.config)
            .map(|_| ())
            .map_err(|e| format!("Export failed: {e}"))
    }

    fn render(&self, map: &Map, filename: &Path) -> Result<String, String> {
        preview(map, filename, &self.config).map_err(|e| format!("Export failed: {e}"))
    }
}
