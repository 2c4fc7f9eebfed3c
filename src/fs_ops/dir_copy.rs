//! Recursive directory copy.
//!
//! The source is validated before anything is written. The walk is depth-first with
//! parents before children, so every file's destination directory already exists
//! when the file is copied. The first failure aborts the copy and whatever was
//! already written stays in place.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::config::{CopyOptions, SymlinkPolicy};
use crate::errors::{FsError, Result};
use crate::platform::{create_dir_all_with_mode, create_symlink};

use super::file_copy::{check_options, copy_one};
use super::helpers::at;
use super::stat::is_dir;

/// Copy the tree rooted at `src` to `dst` with default options.
///
/// `dst` and any missing parents are created; an existing directory at `dst` is
/// reused. Regular files keep their mode bits, directories get the default mode.
/// Symbolic links are recreated (not followed); devices, FIFOs and sockets abort
/// the copy with `FsError::UnsupportedFileType`.
pub fn copy_dir(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> Result<()> {
    copy_dir_with(src, dst, &CopyOptions::default())
}

/// Copy the tree rooted at `src` to `dst` using `opts`.
///
/// `opts` is validated before anything is touched; invalid options fail with
/// `FsError::InvalidOptions`.
pub fn copy_dir_with(src: impl AsRef<Path>, dst: impl AsRef<Path>, opts: &CopyOptions) -> Result<()> {
    let (src, dst) = (src.as_ref(), dst.as_ref());

    check_options(opts, dst)?;
    if !is_dir(src)? {
        return Err(not_a_directory(src));
    }
    ensure_not_nested(src, dst)?;
    prepare_destination(dst, opts.dir_mode)?;

    let mut tally = Tally::default();
    let walker = WalkDir::new(src)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|e| walk_error(src, e))?;
        let rel = entry.path().strip_prefix(src).map_err(|_| FsError::Io {
            op: "relativize walk entry",
            path: entry.path().to_path_buf(),
            source: io::Error::other("walk entry escaped the source root"),
        })?;
        let target = dst.join(rel);
        let ftype = entry.file_type();

        if ftype.is_dir() {
            create_dir_all_with_mode(&target, opts.dir_mode).map_err(at("create directory", &target))?;
            trace!(dir = %target.display(), "created directory");
            tally.dirs += 1;
        } else if ftype.is_file() {
            copy_one(entry.path(), &target, opts)?;
            tally.files += 1;
        } else if ftype.is_symlink() {
            copy_symlink(entry.path(), &target, opts.symlinks)?;
            tally.links += 1;
        } else {
            return Err(FsError::UnsupportedFileType {
                path: entry.path().to_path_buf(),
                file_type: special_kind(&ftype),
            });
        }
    }

    debug!(
        src = %src.display(),
        dst = %dst.display(),
        files = tally.files,
        dirs = tally.dirs,
        symlinks = tally.links,
        "copied directory tree"
    );
    Ok(())
}

#[derive(Default)]
struct Tally {
    files: u64,
    dirs: u64,
    links: u64,
}

/// Error for a source that `is_dir` rejected: missing, or present with the wrong type.
fn not_a_directory(src: &Path) -> FsError {
    match fs::metadata(src) {
        Ok(_) => FsError::TypeMismatch {
            path: src.to_path_buf(),
            expected: "directory",
        },
        Err(e) => FsError::io("stat source directory", src, e),
    }
}

/// Create `dst` (and parents); refuse an existing non-directory.
fn prepare_destination(dst: &Path, mode: u32) -> Result<()> {
    if let Ok(meta) = fs::metadata(dst)
        && !meta.is_dir()
    {
        return Err(FsError::TypeMismatch {
            path: dst.to_path_buf(),
            expected: "directory",
        });
    }
    create_dir_all_with_mode(dst, mode).map_err(at("create destination directory", dst))?;
    trace!(dir = %dst.display(), mode = format!("{mode:o}"), "prepared destination");
    Ok(())
}

/// Refuse a destination equal to, or below, the source: the walk would descend into
/// the copy it is producing.
fn ensure_not_nested(src: &Path, dst: &Path) -> Result<()> {
    let src_real = fs::canonicalize(src).unwrap_or_else(|_| src.to_path_buf());
    let dst_real = resolve_existing_prefix(dst);
    if dst_real.starts_with(&src_real) {
        return Err(FsError::DestinationInsideSource {
            src: src.to_path_buf(),
            dst: dst.to_path_buf(),
        });
    }
    Ok(())
}

/// Canonicalize the longest existing ancestor of `path` and re-append the rest.
fn resolve_existing_prefix(path: &Path) -> PathBuf {
    let mut tail = Vec::new();
    let mut cur = path;
    loop {
        if let Ok(real) = fs::canonicalize(cur) {
            return tail.iter().rev().fold(real, |acc, name| acc.join(name));
        }
        match (cur.parent(), cur.file_name()) {
            (Some(parent), Some(name)) => {
                tail.push(name.to_os_string());
                cur = if parent.as_os_str().is_empty() {
                    Path::new(".")
                } else {
                    parent
                };
            }
            _ => return path.to_path_buf(),
        }
    }
}

fn copy_symlink(src: &Path, dst: &Path, policy: SymlinkPolicy) -> Result<()> {
    match policy {
        SymlinkPolicy::Skip => {
            trace!(link = %src.display(), "skipped symlink");
            Ok(())
        }
        SymlinkPolicy::Reject => Err(FsError::UnsupportedFileType {
            path: src.to_path_buf(),
            file_type: "symlink",
        }),
        SymlinkPolicy::Recreate => {
            let target = fs::read_link(src).map_err(at("read symlink", src))?;
            // Replace a link or file left by an earlier copy, as regular files are.
            if let Ok(existing) = fs::symlink_metadata(dst)
                && !existing.is_dir()
            {
                fs::remove_file(dst).map_err(at("remove existing link", dst))?;
            }
            // Only consulted on platforms that distinguish file and directory links.
            let points_to_dir = fs::metadata(src).map(|m| m.is_dir()).unwrap_or(false);
            create_symlink(&target, dst, points_to_dir).map_err(at("create symlink", dst))?;
            trace!(link = %dst.display(), target = %target.display(), "recreated symlink");
            Ok(())
        }
    }
}

fn walk_error(root: &Path, e: walkdir::Error) -> FsError {
    let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
    match e.into_io_error() {
        Some(io_err) => FsError::io("walk source tree", path, io_err),
        None => FsError::Io {
            op: "walk source tree",
            path,
            source: io::Error::other("filesystem loop detected"),
        },
    }
}

fn special_kind(ftype: &fs::FileType) -> &'static str {
    #[cfg(unix)]
    {
        use std::os::unix::fs::FileTypeExt;
        if ftype.is_fifo() {
            return "fifo";
        }
        if ftype.is_socket() {
            return "socket";
        }
        if ftype.is_block_device() {
            return "block device";
        }
        if ftype.is_char_device() {
            return "character device";
        }
    }
    let _ = ftype;
    "special file"
}
