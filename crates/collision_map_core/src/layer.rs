//! Layer types for tile, object, image and group layers

use serde::{Deserialize, Serialize};

/// A reference to a tile placed in a tile layer cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileRef {
    /// Local tile ID inside its tileset
    pub id: i64,
    /// Index into the map's tileset list, if the GID resolved to one
    #[serde(default)]
    pub tileset: Option<usize>,
}

impl TileRef {
    pub fn new(id: i64) -> Self {
        Self { id, tileset: None }
    }

    /// Set the tileset this tile belongs to
    pub fn with_tileset(mut self, tileset: usize) -> Self {
        self.tileset = Some(tileset);
        self
    }
}

/// Read access to a rectangular grid of tiles.
///
/// Anything that can answer "which tile sits at (x, y)" can be exported,
/// so host models only need a thin adapter implementing this trait.
pub trait TileLookup {
    /// Width of the grid in tiles
    fn width(&self) -> u32;

    /// Height of the grid in tiles
    fn height(&self) -> u32;

    /// Tile at the given cell, `None` for empty or out-of-range cells
    fn tile_at(&self, x: u32, y: u32) -> Option<TileRef>;
}

/// A layer (tiles, objects, image or nested group)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    pub name: String,
    pub visible: bool,
    pub data: LayerData,
}

impl Layer {
    /// Create a new empty tile layer
    pub fn new_tile_layer(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            visible: true,
            data: LayerData::Tiles(TileLayer::new(width, height)),
        }
    }

    /// Create a new object layer
    pub fn new_object_layer(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visible: true,
            data: LayerData::Objects { object_count: 0 },
        }
    }

    /// Create a new group layer holding child layers
    pub fn new_group(name: impl Into<String>, layers: Vec<Layer>) -> Self {
        Self {
            name: name.into(),
            visible: true,
            data: LayerData::Group { layers },
        }
    }

    /// Get the type of this layer
    pub fn layer_type(&self) -> LayerType {
        match &self.data {
            LayerData::Tiles(_) => LayerType::Tiles,
            LayerData::Objects { .. } => LayerType::Objects,
            LayerData::Image { .. } => LayerType::Image,
            LayerData::Group { .. } => LayerType::Group,
        }
    }

    pub fn is_tile_layer(&self) -> bool {
        self.layer_type() == LayerType::Tiles
    }

    /// Get the tile grid if this is a tile layer
    pub fn as_tile_layer(&self) -> Option<&TileLayer> {
        match &self.data {
            LayerData::Tiles(tiles) => Some(tiles),
            _ => None,
        }
    }

    /// Get the mutable tile grid if this is a tile layer
    pub fn as_tile_layer_mut(&mut self) -> Option<&mut TileLayer> {
        match &mut self.data {
            LayerData::Tiles(tiles) => Some(tiles),
            _ => None,
        }
    }
}

/// The type of a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayerType {
    Tiles,
    Objects,
    Image,
    Group,
}

/// The data contained in a layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LayerData {
    /// Tile layer with a row-major cell grid
    Tiles(TileLayer),
    /// Object layer; objects are not exported, only counted
    Objects { object_count: usize },
    /// Image layer referencing a single image
    Image { image: String },
    /// Group layer containing nested layers
    Group { layers: Vec<Layer> },
}

/// A rectangular grid of tile cells stored row-major
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileLayer {
    width: u32,
    height: u32,
    /// Cell data - None means empty
    tiles: Vec<Option<TileRef>>,
}

impl TileLayer {
    /// Create an empty grid
    pub fn new(width: u32, height: u32) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            tiles: vec![None; size],
        }
    }

    /// Create a grid from row-major cells, `None` if the cell count does
    /// not match the dimensions
    pub fn from_cells(width: u32, height: u32, tiles: Vec<Option<TileRef>>) -> Option<Self> {
        if tiles.len() != width as usize * height as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            tiles,
        })
    }

    /// Create a grid from rows of tile IDs; every ID is placed as-is
    ///
    /// Rows shorter than the first row are padded with empty cells.
    pub fn from_id_rows(rows: &[&[i64]]) -> Self {
        let height = rows.len() as u32;
        let width = rows.first().map(|r| r.len()).unwrap_or(0) as u32;
        let mut layer = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, id) in row.iter().take(width as usize).enumerate() {
                layer.set_tile(x as u32, y as u32, Some(TileRef::new(*id)));
            }
        }
        layer
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Set a cell; out-of-range coordinates are ignored
    pub fn set_tile(&mut self, x: u32, y: u32, tile: Option<TileRef>) {
        if let Some(idx) = self.index(x, y) {
            self.tiles[idx] = tile;
        }
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Option<TileRef>] {
        &self.tiles
    }
}

impl TileLookup for TileLayer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn tile_at(&self, x: u32, y: u32) -> Option<TileRef> {
        self.index(x, y).and_then(|idx| self.tiles[idx])
    }
}
