//! Butano header rendering
//!
//! Produces a C++ header with the grid size constants and the flat
//! `collisions` array, indexed by the game as `row * SPRITES_PER_ROW + column`.

use crate::walkability::WalkabilityGrid;

/// Settings for the generated header text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderConfig {
    /// C++ namespace wrapping the declarations
    pub namespace: String,

    /// Header pulled in for `uint8_t`
    pub include: String,
}

impl HeaderConfig {
    pub fn new() -> Self {
        Self {
            namespace: "gj".to_string(),
            include: "bn_core.h".to_string(),
        }
    }

    /// Set the namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Set the include
    pub fn with_include(mut self, include: impl Into<String>) -> Self {
        self.include = include.into();
        self
    }
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Include guard for a header base name: upper-cased, `_HH` appended.
///
/// Characters that are not valid in an identifier are passed through.
pub fn guard_name(base_name: &str) -> String {
    format!("{}_HH", base_name.to_uppercase())
}

/// Render a single array row: tab, comma-joined values, trailing comma
fn render_row(row: &[u8]) -> String {
    let values: Vec<String> = row.iter().map(|v| v.to_string()).collect();
    format!("\t{},", values.join(", "))
}

/// Render the complete header text; every line ends with a newline
pub fn render(base_name: &str, grid: &WalkabilityGrid, config: &HeaderConfig) -> String {
    let guard = guard_name(base_name);

    let mut lines = vec![
        format!("#ifndef {}", guard),
        format!("#define {}", guard),
        "".to_string(),
        format!("#include \"{}\"", config.include),
        "".to_string(),
        format!("namespace {} {{", config.namespace),
        "".to_string(),
        format!("const uint8_t SPRITES_PER_ROW = {};", grid.width()),
        "".to_string(),
        format!("const uint8_t SPRITES_PER_COLUMN = {};", grid.height()),
        "".to_string(),
        "constexpr const uint8_t collisions[] = {".to_string(),
    ];

    lines.extend(grid.rows().iter().map(|row| render_row(row)));

    lines.push("};".to_string());
    lines.push("".to_string());
    lines.push("}".to_string());
    lines.push("".to_string());
    lines.push("#endif".to_string());

    let mut text = lines.join("\n");
    text.push('\n');
    text
}
