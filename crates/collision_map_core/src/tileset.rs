//! Tileset references and global tile ID resolution

use serde::{Deserialize, Serialize};

use crate::TileRef;

/// Tiled stores flip/rotation state in the top bits of every GID
pub const FLIPPED_HORIZONTALLY_FLAG: u32 = 0x8000_0000;
pub const FLIPPED_VERTICALLY_FLAG: u32 = 0x4000_0000;
pub const FLIPPED_DIAGONALLY_FLAG: u32 = 0x2000_0000;
pub const ROTATED_HEXAGONAL_120_FLAG: u32 = 0x1000_0000;

const FLAG_MASK: u32 = FLIPPED_HORIZONTALLY_FLAG
    | FLIPPED_VERTICALLY_FLAG
    | FLIPPED_DIAGONALLY_FLAG
    | ROTATED_HEXAGONAL_120_FLAG;

/// A tileset used by a map, identified by the first global ID it owns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilesetRef {
    pub first_gid: u32,
    /// Tileset name for embedded tilesets
    #[serde(default)]
    pub name: Option<String>,
    /// Path of an external tileset file
    #[serde(default)]
    pub source: Option<String>,
}

impl TilesetRef {
    pub fn new(first_gid: u32) -> Self {
        Self {
            first_gid,
            name: None,
            source: None,
        }
    }

    /// Set the tileset name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Display label: name, then source path, then first GID
    pub fn label(&self) -> String {
        self.name
            .clone()
            .or_else(|| self.source.clone())
            .unwrap_or_else(|| format!("tileset@{}", self.first_gid))
    }
}

/// Strip flip/rotation flags from a raw GID
pub fn strip_flags(raw_gid: u32) -> u32 {
    raw_gid & !FLAG_MASK
}

/// Resolve a raw GID into a tile reference.
///
/// GID 0 is an empty cell. Otherwise the owning tileset is the one with the
/// greatest `first_gid` not above the GID, and the local ID is the offset
/// from it. A GID below every tileset keeps its value as the ID.
pub fn resolve_gid(raw_gid: u32, tilesets: &[TilesetRef]) -> Option<TileRef> {
    let gid = strip_flags(raw_gid);
    if gid == 0 {
        return None;
    }

    let owner = tilesets
        .iter()
        .enumerate()
        .filter(|(_, ts)| ts.first_gid <= gid)
        .max_by_key(|(_, ts)| ts.first_gid);

    match owner {
        Some((index, ts)) => Some(TileRef::new(i64::from(gid - ts.first_gid)).with_tileset(index)),
        None => Some(TileRef::new(i64::from(gid))),
    }
}
