//! Single-file copy: bytes first, then the exact permission bits of the source.
//! Timestamps and extended attributes are not carried over.

use std::fs::{self, File};
use std::io;
use std::path::Path;
use tracing::debug;

use crate::config::CopyOptions;
use crate::errors::{FsError, Result};

use super::io_copy::copy_streaming;
use super::meta::{mode_of, propagate_permissions};

/// Copy `src` to `dst` with default options.
///
/// `dst` is created or overwritten; its parent must already exist. If the bytes are
/// written but the mode cannot be applied, `FsError::PartialWrite` is returned and
/// the destination keeps the copied content. A `dst` that is `src` itself (directly,
/// through a symlink or a hardlink) is refused with `FsError::SameFile`.
pub fn copy_file(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> Result<()> {
    copy_file_with(src, dst, &CopyOptions::default())
}

/// Copy `src` to `dst` using the buffering and durability in `opts`.
///
/// `opts` is validated first; invalid options fail with `FsError::InvalidOptions`.
pub fn copy_file_with(src: impl AsRef<Path>, dst: impl AsRef<Path>, opts: &CopyOptions) -> Result<()> {
    let (src, dst) = (src.as_ref(), dst.as_ref());
    check_options(opts, dst)?;
    copy_one(src, dst, opts)
}

/// Map a failed `CopyOptions::validate` onto the path the call would have created.
pub(super) fn check_options(opts: &CopyOptions, dst: &Path) -> Result<()> {
    opts.validate().map_err(|e| FsError::InvalidOptions {
        path: dst.to_path_buf(),
        reason: format!("{e:#}"),
    })
}

/// Copy without re-validating `opts`; the tree copier validates once up front.
pub(super) fn copy_one(src: &Path, dst: &Path, opts: &CopyOptions) -> Result<()> {
    copy_with_mode_step(src, dst, opts, propagate_permissions)
}

/// Stream the bytes, then run `set_mode` on the open destination. A `set_mode`
/// failure is reported as a partial write.
pub(super) fn copy_with_mode_step<F>(src: &Path, dst: &Path, opts: &CopyOptions, set_mode: F) -> Result<()>
where
    F: FnOnce(&File, &fs::Metadata) -> io::Result<u32>,
{
    let streamed = copy_streaming(src, dst, opts)?;
    let applied = set_mode(&streamed.dst, &streamed.src_meta).map_err(|e| FsError::PartialWrite {
        path: dst.to_path_buf(),
        mode: mode_of(&streamed.src_meta),
        source: e,
    })?;

    debug!(
        src = %src.display(),
        dst = %dst.display(),
        bytes = streamed.bytes,
        mode = format!("{applied:o}"),
        "copied file"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn copies_bytes() {
        let td = tempdir().unwrap();
        let src = td.path().join("srcfile");
        let dst = td.path().join("destf");
        fs::write(&src, "hello world").unwrap();

        copy_file(&src, &dst).unwrap();
        assert_eq!(fs::read_to_string(&dst).unwrap(), "hello world");
    }

    #[test]
    fn missing_destination_parent_names_destination() {
        let td = tempdir().unwrap();
        let src = td.path().join("srcfile");
        fs::write(&src, "x").unwrap();
        let dst = td.path().join("no_such_dir").join("file");

        let err = copy_file(&src, &dst).unwrap_err();
        assert_eq!(err.path(), dst.as_path());
        assert!(matches!(err, FsError::NotFound { op: "create destination file", .. }));
    }

    #[cfg(unix)]
    #[test]
    fn read_only_source_mode_is_mirrored() {
        use std::os::unix::fs::PermissionsExt;
        let td = tempdir().unwrap();
        let src = td.path().join("ro");
        let dst = td.path().join("ro.copy");
        fs::write(&src, "frozen").unwrap();
        fs::set_permissions(&src, fs::Permissions::from_mode(0o444)).unwrap();

        copy_file(&src, &dst).unwrap();
        let mode = fs::metadata(&dst).unwrap().permissions().mode() & 0o7777;
        assert_eq!(mode, 0o444);
        assert_eq!(fs::read_to_string(&dst).unwrap(), "frozen");
    }

    #[test]
    fn failed_mode_step_is_partial_write_with_bytes_kept() {
        let td = tempdir().unwrap();
        let src = td.path().join("srcfile");
        let dst = td.path().join("destf");
        fs::write(&src, "hello world").unwrap();

        let err = copy_with_mode_step(&src, &dst, &CopyOptions::default(), |_, _| {
            Err(io::Error::from(io::ErrorKind::PermissionDenied))
        })
        .unwrap_err();

        assert!(err.is_partial_write(), "{err}");
        assert_eq!(err.path(), dst.as_path());
        assert_eq!(fs::read_to_string(&dst).unwrap(), "hello world");
    }

    #[test]
    fn copy_onto_itself_is_refused() {
        let td = tempdir().unwrap();
        let f = td.path().join("x");
        fs::write(&f, "hello world").unwrap();

        let err = copy_file(&f, &f).unwrap_err();
        assert!(matches!(err, FsError::SameFile { .. }), "{err}");
        assert_eq!(fs::read_to_string(&f).unwrap(), "hello world");
    }

    #[cfg(unix)]
    #[test]
    fn copy_onto_symlink_to_source_is_refused() {
        let td = tempdir().unwrap();
        let f = td.path().join("x");
        let link = td.path().join("link");
        fs::write(&f, "hello world").unwrap();
        std::os::unix::fs::symlink(&f, &link).unwrap();

        let err = copy_file(&f, &link).unwrap_err();
        assert!(matches!(err, FsError::SameFile { .. }), "{err}");
        assert_eq!(err.path(), link.as_path());
        assert_eq!(fs::read_to_string(&f).unwrap(), "hello world");
    }

    #[test]
    fn zero_buffer_is_invalid_options() {
        let td = tempdir().unwrap();
        let src = td.path().join("s");
        let dst = td.path().join("d");
        fs::write(&src, "x").unwrap();
        let opts = CopyOptions { buffer_size: 0, ..CopyOptions::default() };

        let err = copy_file_with(&src, &dst, &opts).unwrap_err();
        assert!(matches!(err, FsError::InvalidOptions { .. }), "{err}");
        assert!(!dst.exists());
    }
}
