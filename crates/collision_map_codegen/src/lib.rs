//! collision_map_codegen - Butano collision header generation
//!
//! Turns the "Collisions" tile layer of a map into a C++ header for the
//! Butano GBA engine:
//!
//! - **Classification** - tile ID 0 is walkable, everything else is blocked
//! - **Grid building** - one byte per cell, rows top to bottom
//! - **Rendering** - include guard, size constants and a flat `collisions` array
//! - **Export** - writes `<base name>.hh` next to the map file
//!
//! # Example
//!
//! ```rust,ignore
//! use collision_map_codegen::{export, ExportConfig};
//!
//! let map = Map::load("maps/level1.tmj")?;
//! let result = export(&map, Path::new("maps/level1.tmj"), &ExportConfig::default())?;
//! assert_eq!(result.path, PathBuf::from("maps/level1.hh"));
//! ```

pub mod generator;
pub mod header;
pub mod walkability;

pub use generator::{
    base_name, export, locate_collision_layer, output_path, output_path_with_extension, preview,
    ExportConfig, ExportResult, COLLISION_LAYER_NAME, HEADER_EXTENSION,
};
pub use header::{guard_name, render, HeaderConfig};
pub use walkability::{build_grid, classify, classify_cell, WalkabilityGrid, NON_WALKABLE, WALKABLE};

use thiserror::Error;

/// Errors that can occur during export
#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("Could not find a tile layer called '{0}'")]
    MissingLayer(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
