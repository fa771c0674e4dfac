pub use crate::format::{ButanoCollisionsFormat, MapFormat, BUTANO_COLLISIONS_ID};
pub use crate::format_meta::{ExportMeta, FormatInfo, FormatMeta, HeaderMeta};
pub use crate::manager::ConfigManager;
pub use crate::registry::FormatRegistry;
pub use crate::IntegrationError;
