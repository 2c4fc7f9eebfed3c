//! Default config path resolution.

use dirs::config_dir;
use std::env;
use std::path::PathBuf;

use super::CONFIG_ENV;

/// Config file location: `$DEPFS_CONFIG` when set, else `<config_dir>/depfs/config.xml`.
pub fn default_config_path() -> Option<PathBuf> {
    if let Some(explicit) = env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(explicit));
    }
    if let Some(mut base) = config_dir() {
        base.push("depfs");
        base.push("config.xml");
        Some(base)
    } else {
        env::var("HOME").ok().map(|h| {
            PathBuf::from(h)
                .join(".config")
                .join("depfs")
                .join("config.xml")
        })
    }
}
