//! Rename with a copy fallback.
//! - Tries a plain rename first.
//! - On Windows, removes an existing destination file first (rename doesn't overwrite there).
//! - When the rename crosses filesystems, copies (tree or file) and then removes the source.
//!   Like the copy itself this is not transactional: a failed removal leaves both copies.

use std::fs;
use std::path::Path;
use tracing::debug;

use crate::errors::{FsError, Result};
use crate::platform::create_symlink;

use super::dir_copy::copy_dir;
use super::file_copy::copy_file;
use super::helpers::at;
use super::util::is_cross_device;

/// Move `src` to `dst`, copying across filesystems when a rename is not possible.
pub fn rename_with_fallback(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> Result<()> {
    let (src, dst) = (src.as_ref(), dst.as_ref());
    let lmeta = fs::symlink_metadata(src).map_err(at("stat rename source", src))?;

    #[cfg(windows)]
    {
        if let Ok(dmeta) = fs::symlink_metadata(dst)
            && !dmeta.is_dir()
        {
            fs::remove_file(dst).map_err(at("remove existing destination", dst))?;
        }
    }

    let err = match fs::rename(src, dst) {
        Ok(()) => {
            debug!(src = %src.display(), dst = %dst.display(), "renamed");
            return Ok(());
        }
        Err(e) => e,
    };
    if !is_cross_device(&err) {
        return Err(FsError::io("rename", src, err));
    }

    debug!(src = %src.display(), dst = %dst.display(), "rename crosses filesystems; copying instead");
    let ftype = lmeta.file_type();
    if ftype.is_symlink() {
        let target = fs::read_link(src).map_err(at("read symlink", src))?;
        let points_to_dir = fs::metadata(src).map(|m| m.is_dir()).unwrap_or(false);
        create_symlink(&target, dst, points_to_dir).map_err(at("create symlink", dst))?;
        remove_link(src, points_to_dir)?;
    } else if ftype.is_dir() {
        copy_dir(src, dst)?;
        fs::remove_dir_all(src).map_err(at("remove source directory", src))?;
    } else {
        copy_file(src, dst)?;
        fs::remove_file(src).map_err(at("remove source file", src))?;
    }
    Ok(())
}

fn remove_link(link: &Path, points_to_dir: bool) -> Result<()> {
    // Directory symlinks on Windows are removed like directories.
    if cfg!(windows) && points_to_dir {
        fs::remove_dir(link).map_err(at("remove source symlink", link))
    } else {
        fs::remove_file(link).map_err(at("remove source symlink", link))
    }
}
