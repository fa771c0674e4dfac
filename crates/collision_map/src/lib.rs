//! # collision_map
//!
//! Export the "Collisions" tile layer of a Tiled map as a Butano C++ header.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use collision_map::prelude::*;
//!
//! let registry = FormatRegistry::with_builtin();
//! export_map_file(&registry, BUTANO_COLLISIONS_ID, Path::new("maps/level1.tmj"), None)?;
//! // maps/level1.hh now holds SPRITES_PER_ROW, SPRITES_PER_COLUMN and `collisions[]`
//! ```
//!
//! ## Crate Structure
//!
//! - [`model`] - Map, layer and tileset types, Tiled JSON loading
//! - [`codegen`] - Walkability classification and header generation
//! - [`integration`] - Export format registry and TOML format configuration

use std::path::Path;

pub use collision_map_codegen as codegen;
pub use collision_map_core as model;
pub use collision_map_integration as integration;

use collision_map_core::Map;
use collision_map_integration::registry::FormatRegistry;

/// Commonly used types
pub mod prelude {
    pub use crate::{export_map_file, render_map_file};
    pub use collision_map_codegen::{
        build_grid, classify, export, preview, CodegenError, ExportConfig, ExportResult,
        HeaderConfig, WalkabilityGrid,
    };
    pub use collision_map_core::{Layer, LayerData, LayerType, Map, TileLayer, TileLookup, TileRef};
    pub use collision_map_integration::prelude::*;
}

fn load_map(map_path: &Path) -> Result<Map, String> {
    Map::load(map_path).map_err(|e| format!("Export failed: {}: {}", map_path.display(), e))
}

/// Load a map file and export it through the format `format_id`.
///
/// `filename` decides where the output goes; it defaults to the map path, so
/// `maps/level1.tmj` exports next to itself.
pub fn export_map_file(
    registry: &FormatRegistry,
    format_id: &str,
    map_path: &Path,
    filename: Option<&Path>,
) -> Result<(), String> {
    let map = load_map(map_path)?;
    registry.write(format_id, &map, filename.unwrap_or(map_path))
}

/// Load a map file and return the text `format_id` would write.
pub fn render_map_file(
    registry: &FormatRegistry,
    format_id: &str,
    map_path: &Path,
    filename: Option<&Path>,
) -> Result<String, String> {
    let map = load_map(map_path)?;
    let format = registry
        .get(format_id)
        .ok_or_else(|| format!("Export failed: Unknown export format '{format_id}'"))?;
    format.render(&map, filename.unwrap_or(map_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use collision_map_integration::format::BUTANO_COLLISIONS_ID;

    const LEVEL1: &str = r#"{
        "width": 2, "height": 2, "tilewidth": 8, "tileheight": 8,
        "tilesets": [{ "firstgid": 1, "name": "collisions" }],
        "layers": [
            { "type": "tilelayer", "name": "Background", "width": 2, "height": 2, "data": [2, 2, 2, 2] },
            { "type": "tilelayer", "name": "Collisions", "width": 2, "height": 2, "data": [1, 2, 2, 1] }
        ]
    }"#;

    const NO_COLLISIONS: &str = r#"{
        "width": 1, "height": 1,
        "layers": [
            { "type": "tilelayer", "name": "Background", "width": 1, "height": 1, "data": [1] },
            { "type": "tilelayer", "name": "Foreground", "width": 1, "height": 1, "data": [1] }
        ]
    }"#;

    #[test]
    fn test_export_next_to_map() {
        let tmp = tempfile::tempdir().unwrap();
        let map_path = tmp.path().join("level1.tmj");
        std::fs::write(&map_path, LEVEL1).unwrap();

        let registry = FormatRegistry::with_builtin();
        export_map_file(&registry, BUTANO_COLLISIONS_ID, &map_path, None).unwrap();

        let text = std::fs::read_to_string(tmp.path().join("level1.hh")).unwrap();
        assert!(text.starts_with("#ifndef LEVEL1_HH\n"));
        assert!(text.contains("constexpr const uint8_t collisions[] = {\n\t1, 0,\n\t0, 1,\n};\n"));
    }

    #[test]
    fn test_export_to_other_filename() {
        let tmp = tempfile::tempdir().unwrap();
        let map_path = tmp.path().join("level1.tmj");
        std::fs::write(&map_path, LEVEL1).unwrap();
        let out_dir = tmp.path().join("include");
        std::fs::create_dir(&out_dir).unwrap();

        let registry = FormatRegistry::with_builtin();
        export_map_file(
            &registry,
            BUTANO_COLLISIONS_ID,
            &map_path,
            Some(&out_dir.join("first_room.tmx")),
        )
        .unwrap();

        let text = std::fs::read_to_string(out_dir.join("first_room.hh")).unwrap();
        assert!(text.starts_with("#ifndef FIRST_ROOM_HH\n"));
        assert!(!tmp.path().join("level1.hh").exists());
    }

    #[test]
    fn test_missing_layer_message() {
        let tmp = tempfile::tempdir().unwrap();
        let map_path = tmp.path().join("level2.tmj");
        std::fs::write(&map_path, NO_COLLISIONS).unwrap();

        let registry = FormatRegistry::with_builtin();
        let result = export_map_file(&registry, BUTANO_COLLISIONS_ID, &map_path, None);

        assert_eq!(
            result,
            Err("Export failed: Could not find a tile layer called 'Collisions'".to_string())
        );
        assert!(!tmp.path().join("level2.hh").exists());
    }

    #[test]
    fn test_render_does_not_write() {
        let tmp = tempfile::tempdir().unwrap();
        let map_path = tmp.path().join("level1.tmj");
        std::fs::write(&map_path, LEVEL1).unwrap();

        let registry = FormatRegistry::with_builtin();
        let text = render_map_file(&registry, BUTANO_COLLISIONS_ID, &map_path, None).unwrap();

        assert!(text.contains("SPRITES_PER_ROW = 2;"));
        assert!(!tmp.path().join("level1.hh").exists());
    }

    #[test]
    fn test_unreadable_map() {
        let tmp = tempfile::tempdir().unwrap();
        let registry = FormatRegistry::with_builtin();

        let err = export_map_file(
            &registry,
            BUTANO_COLLISIONS_ID,
            &tmp.path().join("missing.tmj"),
            None,
        )
        .unwrap_err();
        assert!(err.starts_with("Export failed:"));
        assert!(err.contains("missing.tmj"));
    }
}
