//! Windows implementations of platform helpers (best-effort, no ACL awareness).
//!
//! Notes:
//! - Windows lacks POSIX mode semantics; only the readonly attribute is mirrored.
//! - Access denial through permission bits cannot be arranged, so the capability
//!   flag reports false and permission-failure tests are skipped.

use std::fs::{DirBuilder, File, OpenOptions};
use std::io;
use std::path::Path;

/// Mode bits cannot deny access here; ACLs do, and those are out of scope.
pub fn supports_permission_denial() -> bool {
    false
}

/// Create `path` and any missing parents; `mode` has no Windows equivalent.
pub fn create_dir_all_with_mode(path: &Path, _mode: u32) -> io::Result<()> {
    DirBuilder::new().recursive(true).create(path)
}

/// Create a file or directory symlink depending on what the source link resolved to.
pub fn create_symlink(target: &Path, link: &Path, points_to_dir: bool) -> io::Result<()> {
    if points_to_dir {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    }
}

/// Open log file for appending (no symlink defense available via std on Windows).
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    OpenOptions::new().create(true).append(true).open(path)
}
