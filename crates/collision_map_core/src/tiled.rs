//! Tiled JSON map format (`.tmj`) loading
//!
//! Only the parts of the format needed to rebuild the layer stack are read:
//! map size, tile size, tilesets (first GID + name or source) and layers.
//! Tile layer data must be stored as a plain GID array (Tiled's "CSV" layer
//! format); base64 and infinite/chunked maps are rejected.

use serde::Deserialize;
use thiserror::Error;

use crate::tileset::resolve_gid;
use crate::{Layer, LayerData, Map, TileLayer, TilesetRef};

/// Errors that can occur while loading a map
#[derive(Debug, Error)]
pub enum MapLoadError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid map JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Layer '{layer}' uses unsupported encoding '{encoding}' (save the map with the CSV layer format)")]
    UnsupportedEncoding { layer: String, encoding: String },

    #[error("Unsupported map file '{0}': only Tiled JSON (.tmj/.json) is read, export TMX maps as JSON first")]
    UnsupportedFormat(String),

    #[error("Infinite maps are not supported")]
    InfiniteMap,

    #[error("Layer '{layer}' has {actual} tiles, expected {expected}")]
    DataLength {
        layer: String,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Deserialize)]
struct TiledMap {
    width: u32,
    height: u32,
    #[serde(default)]
    tilewidth: u32,
    #[serde(default)]
    tileheight: u32,
    #[serde(default)]
    infinite: bool,
    #[serde(default)]
    layers: Vec<TiledLayer>,
    #[serde(default)]
    tilesets: Vec<TiledTileset>,
}

#[derive(Debug, Deserialize)]
struct TiledTileset {
    firstgid: u32,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    source: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum TiledLayer {
    TileLayer(TiledTileLayer),
    ObjectGroup(TiledObjectGroup),
    ImageLayer(TiledImageLayer),
    Group(TiledGroup),
}

#[derive(Debug, Deserialize)]
struct TiledTileLayer {
    name: String,
    #[serde(default = "default_visible")]
    visible: bool,
    width: u32,
    height: u32,
    #[serde(default)]
    data: Option<TiledData>,
    #[serde(default)]
    encoding: Option<String>,
    #[serde(default)]
    chunks: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TiledData {
    Gids(Vec<u32>),
    // base64 payload, rejected before it is decoded
    Encoded(serde::de::IgnoredAny),
}

#[derive(Debug, Deserialize)]
struct TiledObjectGroup {
    name: String,
    #[serde(default = "default_visible")]
    visible: bool,
    #[serde(default)]
    objects: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct TiledImageLayer {
    name: String,
    #[serde(default = "default_visible")]
    visible: bool,
    #[serde(default)]
    image: String,
}

#[derive(Debug, Deserialize)]
struct TiledGroup {
    name: String,
    #[serde(default = "default_visible")]
    visible: bool,
    #[serde(default)]
    layers: Vec<TiledLayer>,
}

fn default_visible() -> bool {
    true
}

/// Parse Tiled JSON into a [`Map`]
pub fn parse_map(json: &str) -> Result<Map, MapLoadError> {
    let raw: TiledMap = serde_json::from_str(json)?;
    if raw.infinite {
        return Err(MapLoadError::InfiniteMap);
    }

    let tilesets: Vec<TilesetRef> = raw
        .tilesets
        .into_iter()
        .map(|ts| TilesetRef {
            first_gid: ts.firstgid,
            name: ts.name,
            source: ts.source,
        })
        .collect();

    let layers = raw
        .layers
        .into_iter()
        .map(|layer| convert_layer(layer, &tilesets))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Map {
        width: raw.width,
        height: raw.height,
        tile_width: raw.tilewidth,
        tile_height: raw.tileheight,
        layers,
        tilesets,
    })
}

fn convert_layer(layer: TiledLayer, tilesets: &[TilesetRef]) -> Result<Layer, MapLoadError> {
    let layer = match layer {
        TiledLayer::TileLayer(tl) => {
            let tiles = convert_tiles(&tl, tilesets)?;
            Layer {
                name: tl.name,
                visible: tl.visible,
                data: LayerData::Tiles(tiles),
            }
        }
        TiledLayer::ObjectGroup(og) => Layer {
            name: og.name,
            visible: og.visible,
            data: LayerData::Objects {
                object_count: og.objects.len(),
            },
        },
        TiledLayer::ImageLayer(il) => Layer {
            name: il.name,
            visible: il.visible,
            data: LayerData::Image { image: il.image },
        },
        TiledLayer::Group(group) => {
            let layers = group
                .layers
                .into_iter()
                .map(|child| convert_layer(child, tilesets))
                .collect::<Result<Vec<_>, _>>()?;
            Layer {
                name: group.name,
                visible: group.visible,
                data: LayerData::Group { layers },
            }
        }
    };
    Ok(layer)
}

fn convert_tiles(layer: &TiledTileLayer, tilesets: &[TilesetRef]) -> Result<TileLayer, MapLoadError> {
    if layer.chunks.is_some() {
        return Err(MapLoadError::InfiniteMap);
    }
    if let Some(encoding) = layer.encoding.as_deref().filter(|e| *e != "csv") {
        return Err(MapLoadError::UnsupportedEncoding {
            layer: layer.name.clone(),
            encoding: encoding.to_string(),
        });
    }

    let gids: &[u32] = match &layer.data {
        Some(TiledData::Gids(gids)) => gids,
        Some(TiledData::Encoded(_)) => {
            return Err(MapLoadError::UnsupportedEncoding {
                layer: layer.name.clone(),
                encoding: layer
                    .encoding
                    .clone()
                    .unwrap_or_else(|| "base64".to_string()),
            })
        }
        None => &[],
    };

    let expected = layer.width as usize * layer.height as usize;
    if gids.len() != expected {
        return Err(MapLoadError::DataLength {
            layer: layer.name.clone(),
            expected,
            actual: gids.len(),
        });
    }

    let cells = gids.iter().map(|&gid| resolve_gid(gid, tilesets)).collect();
    TileLayer::from_cells(layer.width, layer.height, cells).ok_or_else(|| MapLoadError::DataLength {
        layer: layer.name.clone(),
        expected,
        actual: gids.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LayerType, TileLookup, TileRef};

    const LEVEL_JSON: &str = r#"{
        "type": "map",
        "width": 3,
        "height": 2,
        "tilewidth": 8,
        "tileheight": 8,
        "infinite": false,
        "orientation": "orthogonal",
        "tilesets": [
            { "firstgid": 1, "name": "collisions" },
            { "firstgid": 3, "source": "decor.tsj" }
        ],
        "layers": [
            {
                "type": "tilelayer",
                "name": "Background",
                "width": 3,
                "height": 2,
                "data": [3, 4, 3, 4, 3, 4]
            },
            {
                "type": "tilelayer",
                "name": "Collisions",
                "width": 3,
                "height": 2,
                "visible": false,
                "data": [1, 2, 0, 2147483650, 1, 5]
            },
            {
                "type": "objectgroup",
                "name": "Spawns",
                "objects": [{ "id": 1 }, { "id": 2 }]
            },
            {
                "type": "group",
                "name": "Overlay",
                "layers": [
                    { "type": "imagelayer", "name": "Sky", "image": "sky.png" }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_layers_in_order() {
        let map = parse_map(LEVEL_JSON).unwrap();

        assert_eq!(map.width, 3);
        assert_eq!(map.height, 2);
        assert_eq!(map.tile_width, 8);
        assert_eq!(
            map.layer_names(),
            vec!["Background", "Collisions", "Spawns", "Overlay"]
        );
        assert_eq!(map.layers[2].layer_type(), LayerType::Objects);
        assert!(matches!(
            map.layers[2].data,
            LayerData::Objects { object_count: 2 }
        ));
        assert_eq!(map.layers[3].layer_type(), LayerType::Group);
        assert!(!map.layers[1].visible);
    }

    #[test]
    fn test_gids_resolve_to_local_ids() {
        let map = parse_map(LEVEL_JSON).unwrap();
        let collisions = map.find_tile_layer("Collisions").unwrap();

        assert_eq!(collisions.tile_at(0, 0), Some(TileRef::new(0).with_tileset(0)));
        assert_eq!(collisions.tile_at(1, 0), Some(TileRef::new(1).with_tileset(0)));
        assert_eq!(collisions.tile_at(2, 0), None);
        // 2147483650 = 2 with the horizontal flip bit set
        assert_eq!(collisions.tile_at(0, 1), Some(TileRef::new(1).with_tileset(0)));
        assert_eq!(collisions.tile_at(2, 1), Some(TileRef::new(2).with_tileset(1)));
    }

    #[test]
    fn test_rejects_base64_layers() {
        let json = r#"{
            "width": 1, "height": 1,
            "layers": [{
                "type": "tilelayer", "name": "Collisions",
                "width": 1, "height": 1,
                "encoding": "base64", "data": "AQAAAA=="
            }]
        }"#;

        let err = parse_map(json).unwrap_err();
        assert!(matches!(
            err,
            MapLoadError::UnsupportedEncoding { ref encoding, .. } if encoding == "base64"
        ));
    }

    #[test]
    fn test_rejects_string_data_without_encoding() {
        let json = r#"{
            "width": 1, "height": 1,
            "layers": [{
                "type": "tilelayer", "name": "Collisions",
                "width": 1, "height": 1, "data": "AQAAAA=="
            }]
        }"#;

        let err = parse_map(json).unwrap_err();
        assert!(matches!(
            err,
            MapLoadError::UnsupportedEncoding { ref layer, ref encoding }
                if layer == "Collisions" && encoding == "base64"
        ));
    }

    #[test]
    fn test_rejects_infinite_maps() {
        let json = r#"{ "width": 1, "height": 1, "infinite": true, "layers": [] }"#;
        assert!(matches!(parse_map(json), Err(MapLoadError::InfiniteMap)));
    }

    #[test]
    fn test_rejects_short_data() {
        let json = r#"{
            "width": 2, "height": 2,
            "layers": [{
                "type": "tilelayer", "name": "Collisions",
                "width": 2, "height": 2, "data": [1, 1, 1]
            }]
        }"#;

        let err = parse_map(json).unwrap_err();
        assert!(matches!(
            err,
            MapLoadError::DataLength {
                expected: 4,
                actual: 3,
                ..
            }
        ));
        assert_eq!(err.to_string(), "Layer 'Collisions' has 3 tiles, expected 4");
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            parse_map("{ not json"),
            Err(MapLoadError::JsonError(_))
        ));
    }

    #[test]
    fn test_load_from_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("level1.tmj");
        std::fs::write(&path, LEVEL_JSON).unwrap();

        let map = Map::load(&path).unwrap();
        assert_eq!(map.tilesets.len(), 2);
        assert_eq!(map.tilesets[1].label(), "decor.tsj");
    }
}
