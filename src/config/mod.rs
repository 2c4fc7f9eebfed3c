//! Config module.
//! Provides copy option and settings types, the default config path, XML loading, and validation.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::default_config_path;
pub use types::{CopyOptions, DurabilityMode, LogLevel, Settings, SymlinkPolicy};
pub use xml::{load_settings, load_settings_from_xml_path};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "DEPFS_CONFIG";
/// Mode for directories created by the tree copier (subject to the umask).
pub const DEFAULT_DIR_MODE: u32 = 0o755;
/// Streaming buffer size for file copies.
pub const DEFAULT_BUFFER_SIZE: usize = 1024 * 1024;
