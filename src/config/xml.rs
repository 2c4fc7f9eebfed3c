//! XML configuration support.
//! - Loads Settings (copy options + log level) from config.xml (quick_xml + serde).
//! - Every field is optional; missing fields keep their defaults.
//! - Unknown fields are rejected so typos surface instead of being ignored.
//!
//! Example:
//!   <config>
//!     <dir_mode>750</dir_mode>
//!     <buffer_size>65536</buffer_size>
//!     <durability>full</durability>
//!     <symlinks>skip</symlinks>
//!     <log_level>info</log_level>
//!   </config>

use anyhow::{anyhow, Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

use super::paths::default_config_path;
use super::types::{DurabilityMode, LogLevel, Settings, SymlinkPolicy};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    /// Octal text, e.g. "755" or "0o755"
    dir_mode: Option<String>,
    buffer_size: Option<String>,
    durability: Option<String>,
    symlinks: Option<String>,
    log_level: Option<String>,
}

fn parse_octal_mode(s: &str) -> Result<u32> {
    let t = s.trim();
    let digits = t.strip_prefix("0o").unwrap_or(t);
    u32::from_str_radix(digits, 8).map_err(|e| anyhow!("invalid dir_mode '{t}': {e}"))
}

// Map XmlConfig -> Settings; blank elements count as absent.
fn xml_to_settings(parsed: XmlConfig) -> Result<Settings> {
    let mut settings = Settings::default();
    let opts = &mut settings.copy;
    let present = |v: &Option<String>| v.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_owned);

    if let Some(s) = present(&parsed.dir_mode) {
        opts.dir_mode = parse_octal_mode(&s)?;
    }
    if let Some(s) = present(&parsed.buffer_size) {
        opts.buffer_size = s
            .parse::<usize>()
            .map_err(|e| anyhow!("invalid buffer_size '{s}': {e}"))?;
    }
    if let Some(s) = present(&parsed.durability) {
        opts.durability = s.parse::<DurabilityMode>().map_err(|e| anyhow!(e))?;
    }
    if let Some(s) = present(&parsed.symlinks) {
        opts.symlinks = s.parse::<SymlinkPolicy>().map_err(|e| anyhow!(e))?;
    }
    if let Some(s) = present(&parsed.log_level) {
        settings.log_level = s.parse::<LogLevel>().map_err(|e| anyhow!(e))?;
    }

    settings.copy.validate()?;
    Ok(settings)
}

/// Load Settings from a specific XML file path.
pub fn load_settings_from_xml_path(path: &Path) -> Result<Settings> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_settings(parsed).with_context(|| format!("invalid config xml '{}'", path.display()))
}

/// Load Settings from `$DEPFS_CONFIG` or the default path.
/// Returns the defaults when no config file exists; a present but broken file is an error.
pub fn load_settings() -> Result<Settings> {
    let Some(path) = default_config_path() else {
        debug!("no config directory available; using default settings");
        return Ok(Settings::default());
    };
    if !path.exists() {
        debug!(path = %path.display(), "config file absent; using default settings");
        return Ok(Settings::default());
    }
    let settings = load_settings_from_xml_path(&path)?;
    debug!(path = %path.display(), ?settings, "loaded settings");
    Ok(settings)
}
