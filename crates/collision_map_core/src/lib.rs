//! Core data structures for collision_map
//!
//! This crate provides the types for representing tile-based maps:
//! - `Map` - A complete map with an ordered layer stack and tilesets
//! - `Layer` - A single layer (tiles, objects, image or group)
//! - `TileLayer` - A rectangular grid of tile references
//! - `TileLookup` - Read access to a tile grid, for adapting host models
//! - `TilesetRef` - First-GID tileset references and GID resolution
//!
//! Maps are usually read from Tiled's JSON format with [`Map::load`].

mod layer;
mod map;
pub mod tiled;
pub mod tileset;

pub use layer::{Layer, LayerData, LayerType, TileLayer, TileLookup, TileRef};
pub use map::Map;
pub use tiled::MapLoadError;
pub use tileset::TilesetRef;
