//! Tile ID to walkability classification

use collision_map_core::{TileLookup, TileRef};

/// Tile ID painted on walkable cells
pub const WALKABLE_TILE_ID: i64 = 0;
/// Tile ID painted on blocked cells
pub const NON_WALKABLE_TILE_ID: i64 = 1;

/// Byte emitted for cells the player can enter
pub const WALKABLE: u8 = 1;
/// Byte emitted for everything else
pub const NON_WALKABLE: u8 = 0;

/// Walkability byte for a tile ID.
///
/// Only [`WALKABLE_TILE_ID`] is walkable; every other ID, known or not,
/// is blocked.
pub const fn classify(tile_id: i64) -> u8 {
    match tile_id {
        WALKABLE_TILE_ID => WALKABLE,
        NON_WALKABLE_TILE_ID => NON_WALKABLE,
        _ => NON_WALKABLE,
    }
}

/// Walkability byte for a cell; empty cells are blocked
pub fn classify_cell(cell: Option<TileRef>) -> u8 {
    cell.map_or(NON_WALKABLE, |tile| classify(tile.id))
}

/// Per-cell walkability derived from a collision layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkabilityGrid {
    width: u32,
    height: u32,
    rows: Vec<Vec<u8>>,
}

impl WalkabilityGrid {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Rows top to bottom, each row left to right
    pub fn rows(&self) -> &[Vec<u8>] {
        &self.rows
    }

    /// Values flattened as `row * width + column`
    pub fn to_flat(&self) -> Vec<u8> {
        self.rows.iter().flatten().copied().collect()
    }

    /// Number of walkable cells
    pub fn walkable_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|&&v| v == WALKABLE)
            .count()
    }
}

/// Classify every cell of a tile grid, row by row
pub fn build_grid<L: TileLookup + ?Sized>(layer: &L) -> WalkabilityGrid {
    let width = layer.width();
    let height = layer.height();

    let rows = (0..height)
        .map(|y| {
            (0..width)
                .map(|x| classify_cell(layer.tile_at(x, y)))
                .collect()
        })
        .collect();

    WalkabilityGrid {
        width,
        height,
        rows,
    }
}
