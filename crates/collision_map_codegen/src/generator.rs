//! Export orchestration
//!
//! Finds the collision layer, derives the walkability grid, renders the
//! header and commits it next to the source map.

use collision_map_core::{Map, TileLayer};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::header::{render, HeaderConfig};
use crate::walkability::build_grid;
use crate::CodegenError;

/// Name of the tile layer holding collision tiles
pub const COLLISION_LAYER_NAME: &str = "Collisions";

/// Default extension of the output file
pub const HEADER_EXTENSION: &str = "hh";

/// Configuration for an export
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Text settings for the generated header
    pub header: HeaderConfig,

    /// Extension forced onto the output file
    pub extension: String,

    /// Write to a temporary file in the destination directory and rename it
    /// over the target, instead of writing the target in place
    pub atomic_write: bool,
}

impl ExportConfig {
    pub fn new() -> Self {
        Self {
            header: HeaderConfig::default(),
            extension: HEADER_EXTENSION.to_string(),
            atomic_write: true,
        }
    }

    /// Set the header settings
    pub fn with_header(mut self, header: HeaderConfig) -> Self {
        self.header = header;
        self
    }

    /// Set the output extension
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    /// Write the target file in place
    pub fn without_atomic_write(mut self) -> Self {
        self.atomic_write = false;
        self
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a successful export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResult {
    /// Header file that was written
    pub path: PathBuf,
    /// Grid width in tiles
    pub width: u32,
    /// Grid height in tiles
    pub height: u32,
    /// Number of walkable cells
    pub walkable: usize,
}

/// First top-level tile layer called [`COLLISION_LAYER_NAME`]
pub fn locate_collision_layer(map: &Map) -> Result<&TileLayer, CodegenError> {
    map.find_tile_layer(COLLISION_LAYER_NAME)
        .ok_or_else(|| CodegenError::MissingLayer(COLLISION_LAYER_NAME.to_string()))
}

/// File name without directory, cut at the first `.`
pub fn base_name(filename: &Path) -> String {
    let file_name = filename
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    match file_name.split_once('.') {
        Some((base, _)) => base.to_string(),
        None => file_name,
    }
}

/// Header path for a map file: same directory, base name, `.hh` extension
pub fn output_path(filename: &Path) -> PathBuf {
    output_path_with_extension(filename, HEADER_EXTENSION)
}

/// Like [`output_path`] with a custom extension
pub fn output_path_with_extension(filename: &Path, extension: &str) -> PathBuf {
    let header_name = format!("{}.{}", base_name(filename), extension);
    match filename.parent() {
        Some(dir) => dir.join(header_name),
        None => PathBuf::from(header_name),
    }
}

/// Render the header for a map without touching the file system
pub fn preview(map: &Map, filename: &Path, config: &ExportConfig) -> Result<String, CodegenError> {
    let layer = locate_collision_layer(map)?;
    let grid = build_grid(layer);
    Ok(render(&base_name(filename), &grid, &config.header))
}

/// Export the map's collision layer as a Butano header.
///
/// Nothing is written when the collision layer is missing. The header text
/// is fully rendered before the output file is opened.
pub fn export(map: &Map, filename: &Path, config: &ExportConfig) -> Result<ExportResult, CodegenError> {
    let layer = locate_collision_layer(map)?;
    let path = output_path_with_extension(filename, &config.extension);

    let grid = build_grid(layer);
    log::debug!(
        "Collision grid {}x{} ({} walkable)",
        grid.width(),
        grid.height(),
        grid.walkable_count()
    );

    let text = render(&base_name(filename), &grid, &config.header);

    if config.atomic_write {
        write_atomic(&path, text.as_bytes())?;
    } else {
        fs::write(&path, text.as_bytes())?;
    }

    log::info!("Wrote collision header {}", path.display());

    Ok(ExportResult {
        path,
        width: grid.width(),
        height: grid.height(),
        walkable: grid.walkable_count(),
    })
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), CodegenError> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut builder = tempfile::Builder::new();
    builder.prefix(".collision_map").suffix(".tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // open(2) masks this with the umask, matching a plain fs::write
        builder.permissions(fs::Permissions::from_mode(0o666));
    }

    let mut file = builder.tempfile_in(dir)?;
    file.write_all(contents)?;
    if let Ok(existing) = fs::metadata(path) {
        file.as_file().set_permissions(existing.permissions())?;
    }
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| CodegenError::IoError(e.error))?;
    Ok(())
}
