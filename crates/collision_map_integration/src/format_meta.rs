use serde::Deserialize;

use collision_map_codegen::{ExportConfig, HeaderConfig};

/// Top-level export format metadata, deserialized from a TOML file.
#[derive(Debug, Clone, Deserialize)]
pub struct FormatMeta {
    pub format: FormatInfo,
    #[serde(default)]
    pub header: HeaderMeta,
    #[serde(default)]
    pub export: ExportMeta,
}

/// Identity of a format as shown to the host.
#[derive(Debug, Clone, Deserialize)]
pub struct FormatInfo {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub extension: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Overrides for the generated header text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HeaderMeta {
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub include: Option<String>,
}

/// Overrides for how the header is written.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportMeta {
    #[serde(default)]
    pub atomic_write: Option<bool>,
}

impl FormatMeta {
    /// Export configuration with every override from this metadata applied
    /// on top of the defaults.
    pub fn export_config(&self) -> ExportConfig {
        let mut header = HeaderConfig::default();
        if let Some(namespace) = &self.header.namespace {
            header = header.with_namespace(namespace.clone());
        }
        if let Some(include) = &self.header.include {
            header = header.with_include(include.clone());
        }

        let mut config = ExportConfig::default().with_header(header);
        if let Some(extension) = &self.format.extension {
            config = config.with_extension(extension.clone());
        }
        if let Some(atomic_write) = self.export.atomic_write {
            config.atomic_write = atomic_write;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_format() {
        let meta: FormatMeta = toml::from_str(
            r#"
[format]
id = "butano-collisions"
"#,
        )
        .unwrap();

        assert_eq!(meta.format.id, "butano-collisions");
        assert_eq!(meta.format.name, None);

        let config = meta.export_config();
        assert_eq!(config.header, HeaderConfig::default());
        assert_eq!(config.extension, "hh");
        assert!(config.atomic_write);
    }

    #[test]
    fn parse_full_format() {
        let meta: FormatMeta = toml::from_str(
            r#"
[format]
id = "butano-collisions-town"
name = "Butano Header - Town Collisions"
extension = "hpp"
description = "Collision maps for the town scenes"

[header]
namespace = "town"
include = "bn_common.h"

[export]
atomic_write = false
"#,
        )
        .unwrap();

        assert_eq!(meta.format.name.as_deref(), Some("Butano Header - Town Collisions"));
        assert_eq!(meta.format.extension.as_deref(), Some("hpp"));
        assert_eq!(
            meta.format.description.as_deref(),
            Some("Collision maps for the town scenes")
        );

        let config = meta.export_config();
        assert_eq!(config.extension, "hpp");
        assert_eq!(config.header.namespace, "town");
        assert_eq!(config.header.include, "bn_common.h");
        assert!(!config.atomic_write);
    }

    #[test]
    fn missing_id_is_an_error() {
        let result: Result<FormatMeta, _> = toml::from_str(
            r#"
[format]
name = "No id"
"#,
        );
        assert!(result.is_err());
    }
}
