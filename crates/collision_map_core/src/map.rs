//! Map - an ordered stack of layers with tilesets

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::tiled::{self, MapLoadError};
use crate::{Layer, TileLayer, TilesetRef};

/// A complete map with layers and tilesets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Map {
    /// Width in tiles
    pub width: u32,
    /// Height in tiles
    pub height: u32,
    /// Tile width in pixels
    #[serde(default)]
    pub tile_width: u32,
    /// Tile height in pixels
    #[serde(default)]
    pub tile_height: u32,
    /// Top-level layers, bottom to top
    pub layers: Vec<Layer>,
    #[serde(default)]
    pub tilesets: Vec<TilesetRef>,
}

impl Map {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tile_width: 8,
            tile_height: 8,
            layers: Vec::new(),
            tilesets: Vec::new(),
        }
    }

    /// Append a layer on top of the stack
    pub fn add_layer(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    /// Builder form of [`Map::add_layer`]
    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.add_layer(layer);
        self
    }

    /// First top-level tile layer with exactly this name.
    ///
    /// Layers of other kinds sharing the name are skipped, and layers nested
    /// inside groups are not searched.
    pub fn find_tile_layer(&self, name: &str) -> Option<&TileLayer> {
        self.layers
            .iter()
            .filter(|layer| layer.name == name)
            .find_map(Layer::as_tile_layer)
    }

    /// Names of all top-level layers in order
    pub fn layer_names(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.name.as_str()).collect()
    }

    /// Parse a map from Tiled's JSON map format
    pub fn from_tiled_json(json: &str) -> Result<Self, MapLoadError> {
        tiled::parse_map(json)
    }

    /// Load a Tiled JSON map (`.tmj` / `.json`) from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapLoadError> {
        let path = path.as_ref();
        if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("tmx") || ext.eq_ignore_ascii_case("tsx"))
        {
            return Err(MapLoadError::UnsupportedFormat(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        let map = Self::from_tiled_json(&content)?;
        log::debug!(
            "Loaded map {} ({}x{}, {} layers)",
            path.display(),
            map.width,
            map.height,
            map.layers.len()
        );
        Ok(map)
    }
}
