//! Unix implementations of platform helpers.

use std::fs::{self, DirBuilder, File, OpenOptions};
use std::io;
use std::os::unix::fs::{DirBuilderExt, OpenOptionsExt, PermissionsExt};
use std::path::Path;

/// Whether mode bits can actually deny this process access to a path.
///
/// False for the superuser, who bypasses read/write/search checks; callers and
/// tests that rely on "inaccessible directory" failures should consult this.
pub fn supports_permission_denial() -> bool {
    // SAFETY: geteuid has no preconditions and cannot fail.
    unsafe { libc::geteuid() != 0 }
}

/// Create `path` and any missing parents with `mode` (subject to the umask).
/// An existing directory is accepted as-is.
pub fn create_dir_all_with_mode(path: &Path, mode: u32) -> io::Result<()> {
    DirBuilder::new().recursive(true).mode(mode).create(path)
}

/// Create a symlink at `link` pointing to `target`; the directory hint is unused on Unix.
pub fn create_symlink(target: &Path, link: &Path, _points_to_dir: bool) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

/// Open log file for appending; set 0600 only when creating a new file.
/// If the file already exists, its existing permissions are kept.
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let existed = path.exists();
    let f = OpenOptions::new()
        .create(true)
        .append(true)
        .mode(0o600) // applies on create
        .open(path)?;
    if !existed {
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o600));
    }
    Ok(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn preserve_existing_log_file_mode() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.txt");
        fs::write(&path, b"hello").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();
        let _f = open_log_file_secure_append(&path).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640, "existing permissions should be preserved");
    }

    #[test]
    fn new_log_file_gets_0600() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("new_log.txt");
        let _f = open_log_file_secure_append(&path).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600, "newly created log file should be 0600");
    }

    #[test]
    fn dir_mode_is_applied_under_umask() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a").join("b");
        create_dir_all_with_mode(&path, 0o700).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        // 0o700 has no group/other bits for the umask to strip.
        assert_eq!(mode, 0o700);
        // Idempotent on an existing directory.
        create_dir_all_with_mode(&path, 0o700).unwrap();
    }
}
