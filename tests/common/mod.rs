//! Shared fixtures for integration tests.
//! Scoped temp directories with permission toggling; everything is restored on drop.
#![allow(dead_code)]
#![cfg(unix)]

use std::fs;
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// True (after printing why) when the permission-denial tests must be skipped.
pub fn skip_without_permission_denial() -> bool {
    if depfs::supports_permission_denial() {
        return false;
    }
    eprintln!("skipping: mode bits cannot deny access here (e.g. running as root)");
    true
}

/// A temp location holding one directory `dir` that is made untraversable
/// (mode 0o666) once `op` has populated it.
pub struct InaccessibleDir {
    _root: TempDir,
    dir: PathBuf,
}

impl InaccessibleDir {
    pub fn new(op: impl FnOnce(&Path) -> io::Result<()>) -> io::Result<Self> {
        let root = tempfile::tempdir()?;
        let dir = root.path().join("dir");
        fs::create_dir(&dir)?;
        fs::set_permissions(&dir, fs::Permissions::from_mode(0o777))?;
        op(&dir)?;
        fs::set_permissions(&dir, fs::Permissions::from_mode(0o666))?;
        Ok(Self { _root: root, dir })
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }
}

impl Drop for InaccessibleDir {
    fn drop(&mut self) {
        // Restore search permission so the TempDir can be removed.
        let _ = fs::set_permissions(&self.dir, fs::Permissions::from_mode(0o777));
    }
}

/// Sets a mode on `path` and puts 0o755 back when dropped.
pub struct ModeGuard {
    path: PathBuf,
}

impl ModeGuard {
    pub fn set(path: &Path, mode: u32) -> io::Result<Self> {
        fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
        Ok(Self {
            path: path.to_path_buf(),
        })
    }
}

impl Drop for ModeGuard {
    fn drop(&mut self) {
        let _ = fs::set_permissions(&self.path, fs::Permissions::from_mode(0o755));
    }
}

pub fn mode(path: &Path) -> u32 {
    fs::metadata(path).unwrap().permissions().mode() & 0o7777
}
