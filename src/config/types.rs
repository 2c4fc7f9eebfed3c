//! Core configuration types.
//! - CopyOptions holds tunables for file and tree copies with sensible defaults.
//! - Settings is what a config file yields: copy options plus the host's log level.
//! - SymlinkPolicy, DurabilityMode and LogLevel are small enums with string parsing.

use std::fmt;
use std::str::FromStr;

use super::{DEFAULT_BUFFER_SIZE, DEFAULT_DIR_MODE};

/// Durability mode controlling post-write flush behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DurabilityMode {
    /// Written data reaches the OS page cache; no disk barrier.
    #[default]
    Data,
    /// Force data and metadata to stable storage (`sync_all`) for every file.
    Full,
}

impl FromStr for DurabilityMode {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "data" | "fast" => Ok(DurabilityMode::Data),
            "full" | "sync" => Ok(DurabilityMode::Full),
            _ => Err(format!("invalid durability mode: '{s}'")),
        }
    }
}

impl fmt::Display for DurabilityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DurabilityMode::Data => "data",
            DurabilityMode::Full => "full",
        })
    }
}

/// What the tree copier does with symbolic links found during the walk.
/// Links are never followed, so link cycles cannot cause unbounded recursion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SymlinkPolicy {
    /// Create a new link with the same target text.
    #[default]
    Recreate,
    /// Leave the link out of the copy.
    Skip,
    /// Abort the copy with `FsError::UnsupportedFileType`.
    Reject,
}

impl FromStr for SymlinkPolicy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recreate" | "copy" | "preserve" => Ok(SymlinkPolicy::Recreate),
            "skip" | "ignore" => Ok(SymlinkPolicy::Skip),
            "reject" | "error" => Ok(SymlinkPolicy::Reject),
            _ => Err(format!("invalid symlink policy: '{s}'")),
        }
    }
}

impl fmt::Display for SymlinkPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SymlinkPolicy::Recreate => "recreate",
            SymlinkPolicy::Skip => "skip",
            SymlinkPolicy::Reject => "reject",
        })
    }
}

/// Program-defined verbosity levels for hosts that initialize logging through this crate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// Per-tree progress
    Info,
    /// Per-entry trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Tunables shared by `copy_file_with` and `copy_dir_with`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyOptions {
    /// Mode for directories the tree copier creates
    pub dir_mode: u32,
    /// Streaming buffer size in bytes
    pub buffer_size: usize,
    /// Whether each copied file is synced to stable storage
    pub durability: DurabilityMode,
    /// Handling of symlinks met during a tree walk
    pub symlinks: SymlinkPolicy,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            dir_mode: DEFAULT_DIR_MODE,
            buffer_size: DEFAULT_BUFFER_SIZE,
            durability: DurabilityMode::Data,
            symlinks: SymlinkPolicy::Recreate,
        }
    }
}

/// Everything a config file can set. `log_level` is for hosts that call
/// `logging::init_tracing`; the copiers only see `copy`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Settings {
    pub copy: CopyOptions,
    pub log_level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_log_levels_case_insensitive() {
        assert_eq!(LogLevel::parse("QUIET"), Some(LogLevel::Quiet));
        assert_eq!(LogLevel::parse("verbose"), Some(LogLevel::Info));
        assert_eq!(LogLevel::parse("trace"), Some(LogLevel::Debug));
        assert!(LogLevel::from_str("loud").is_err());
    }

    #[test]
    fn display_roundtrips_with_fromstr() {
        for p in [SymlinkPolicy::Recreate, SymlinkPolicy::Skip, SymlinkPolicy::Reject] {
            assert_eq!(p.to_string().parse::<SymlinkPolicy>().unwrap(), p);
        }
        for d in [DurabilityMode::Data, DurabilityMode::Full] {
            assert_eq!(d.to_string().parse::<DurabilityMode>().unwrap(), d);
        }
        for l in [LogLevel::Quiet, LogLevel::Normal, LogLevel::Info, LogLevel::Debug] {
            assert_eq!(l.to_string().parse::<LogLevel>().unwrap(), l);
        }
    }

    #[test]
    fn defaults() {
        let o = CopyOptions::default();
        assert_eq!(o.dir_mode, 0o755);
        assert_eq!(o.buffer_size, 1024 * 1024);
        assert_eq!(o.durability, DurabilityMode::Data);
        assert_eq!(o.symlinks, SymlinkPolicy::Recreate);
    }
}
