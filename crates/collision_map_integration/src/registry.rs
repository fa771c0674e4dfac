use std::path::Path;

use collision_map_core::Map;

use crate::format::{ButanoCollisionsFormat, MapFormat};

/// Registry of all export formats available to the host.
#[derive(Debug, Default)]
pub struct FormatRegistry {
    formats: Vec<Box<dyn MapFormat>>,
}

impl FormatRegistry {
    /// Registry holding the built-in Butano collision format.
    pub fn with_builtin() -> Self {
        let mut registry = Self::default();
        registry.register_format(ButanoCollisionsFormat::new());
        registry
    }

    /// Register a format. A format with the same id is replaced in place.
    pub fn register_format(&mut self, format: impl MapFormat + 'static) {
        match self.formats.iter().position(|f| f.id() == format.id()) {
            Some(index) => {
                log::debug!("Replacing export format '{}'", format.id());
                self.formats[index] = Box::new(format);
            }
            None => {
                log::debug!("Registered export format '{}'", format.id());
                self.formats.push(Box::new(format));
            }
        }
    }

    /// Look up a format by id.
    pub fn get(&self, id: &str) -> Option<&dyn MapFormat> {
        self.formats
            .iter()
            .find(|f| f.id() == id)
            .map(|f| f.as_ref())
    }

    /// All formats producing files with the given extension.
    pub fn find_by_extension(&self, extension: &str) -> Vec<&dyn MapFormat> {
        let extension = extension.trim_start_matches('.');
        self.formats
            .iter()
            .filter(|f| f.extension().eq_ignore_ascii_case(extension))
            .map(|f| f.as_ref())
            .collect()
    }

    /// Iterate over formats in registration order.
    pub fn formats(&self) -> impl Iterator<Item = &dyn MapFormat> {
        self.formats.iter().map(|f| f.as_ref())
    }

    /// Export through the format with the given id.
    pub fn write(&self, id: &str, map: &Map, filename: &Path) -> Result<(), String> {
        self.get(id)
            .ok_or_else(|| format!("Export failed: Unknown export format '{id}'"))?
            .write(map, filename)
    }
}
