//! Core library for `depfs`.
//!
//! Filesystem predicates and permission-preserving copies:
//! - `is_regular`, `is_dir`, `is_non_empty_dir`, `is_symlink` answer `Ok(false)` for a
//!   missing path and reserve errors for "cannot tell".
//! - `copy_file` copies bytes, then the exact mode bits of the source.
//! - `copy_dir` mirrors a tree, aborting on the first failure (no rollback).
//! - `rename_with_fallback` moves across filesystems by copying.
//!
//! All operations are synchronous, keep no state between calls, and return a single
//! `FsError` naming the path that failed.

pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod logging;
pub mod platform;

pub use config::{CopyOptions, DurabilityMode, LogLevel, Settings, SymlinkPolicy};
pub use errors::{FsError, Result};
pub use fs_ops::{
    copy_dir, copy_dir_with, copy_file, copy_file_with, is_dir, is_non_empty_dir, is_regular,
    is_symlink, rename_with_fallback,
};
pub use platform::supports_permission_denial;
