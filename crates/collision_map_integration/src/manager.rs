use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::format::ButanoCollisionsFormat;
use crate::format_meta::FormatMeta;
use crate::registry::FormatRegistry;
use crate::IntegrationError;

/// Discovers and loads export format TOML metadata files.
#[derive(Debug, Default)]
pub struct ConfigManager {
    formats_dir: Option<PathBuf>,
    formats: BTreeMap<String, FormatMeta>,
}

impl ConfigManager {
    /// Create a manager using the platform default config directory.
    ///
    /// Format files live in a `formats/` directory under:
    /// 1. The platform config directory for `collision_map`
    ///    (e.g. `~/.config/collision_map/` on Linux)
    /// 2. `.collision_map/` in the current directory as a fallback
    pub fn from_default_config() -> Self {
        let config_dir = ProjectDirs::from("", "", "collision_map")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".collision_map"));

        Self::with_formats_dir(config_dir.join("formats"))
    }

    /// Create a manager reading format files from `dir`.
    pub fn with_formats_dir(dir: impl Into<PathBuf>) -> Self {
        ConfigManager {
            formats_dir: Some(dir.into()),
            formats: BTreeMap::new(),
        }
    }

    pub fn formats_dir(&self) -> Option<&Path> {
        self.formats_dir.as_deref()
    }

    /// Parse a single format metadata file.
    pub fn load_file(path: &Path) -> Result<FormatMeta, IntegrationError> {
        let content = std::fs::read_to_string(path).map_err(|source| IntegrationError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        let meta: FormatMeta =
            toml::from_str(&content).map_err(|source| IntegrationError::ParseError {
                path: path.to_path_buf(),
                source,
            })?;

        if meta.format.id.trim().is_empty() {
            return Err(IntegrationError::ValidationError {
                path: path.to_path_buf(),
                message: "format id must not be empty".to_string(),
            });
        }
        Ok(meta)
    }

    /// Load all `.toml` format metadata files from the formats directory.
    pub fn load_metadata(&mut self) -> Result<(), IntegrationError> {
        self.formats.clear();

        let Some(ref dir) = self.formats_dir else {
            return Ok(());
        };

        if !dir.exists() {
            log::debug!("No formats directory at {}", dir.display());
            return Ok(());
        }

        let read_error = |source: std::io::Error| IntegrationError::IoError {
            path: dir.clone(),
            source,
        };

        let entries = std::fs::read_dir(dir).map_err(read_error)?;
        for entry in entries {
            let path = entry.map_err(read_error)?.path();
            if path.extension().is_some_and(|ext| ext == "toml") {
                let meta = Self::load_file(&path)?;
                if self.formats.contains_key(&meta.format.id) {
                    log::warn!(
                        "Format '{}' is defined more than once, using {}",
                        meta.format.id,
                        path.display()
                    );
                }
                self.formats.insert(meta.format.id.clone(), meta);
            }
        }

        Ok(())
    }

    /// Iterate over all loaded formats as `(id, metadata)` pairs, ordered by id.
    pub fn formats(&self) -> impl Iterator<Item = (&String, &FormatMeta)> {
        self.formats.iter()
    }

    /// Register every loaded format into `registry`.
    pub fn register_into(&self, registry: &mut FormatRegistry) {
        for meta in self.formats.values() {
            registry.register_format(ButanoCollisionsFormat::from_meta(meta));
        }
    }
}
