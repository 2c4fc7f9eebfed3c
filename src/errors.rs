//! Typed error definitions for depfs.
//! Every variant carries the path that failed so callers can report it directly;
//! io-backed variants also append a platform-aware hint (see `fs_ops::helpers`).

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::fs_ops::helpers::hint;

#[derive(Debug, Error)]
pub enum FsError {
    #[error("{op} '{}': {source}{}", path.display(), hint(source))]
    NotFound {
        op: &'static str,
        path: PathBuf,
        source: io::Error,
    },

    #[error("{op} '{}': {source}{}", path.display(), hint(source))]
    PermissionDenied {
        op: &'static str,
        path: PathBuf,
        source: io::Error,
    },

    #[error("'{}' exists but is not a {expected}", path.display())]
    TypeMismatch { path: PathBuf, expected: &'static str },

    /// Bytes were copied to `path`, but its permission bits could not be set.
    #[error("copied data to '{}' but failed to set mode {mode:o}: {source}{}", path.display(), hint(source))]
    PartialWrite {
        path: PathBuf,
        mode: u32,
        source: io::Error,
    },

    #[error("unsupported file type ({file_type}) at '{}'", path.display())]
    UnsupportedFileType {
        path: PathBuf,
        file_type: &'static str,
    },

    #[error("cannot copy '{}' into its own subtree '{}'", src.display(), dst.display())]
    DestinationInsideSource { src: PathBuf, dst: PathBuf },

    /// `dst` resolves to the file `src` already is; opening it for writing would empty it.
    #[error("'{}' and '{}' are the same file", src.display(), dst.display())]
    SameFile { src: PathBuf, dst: PathBuf },

    #[error("invalid copy options for '{}': {reason}", path.display())]
    InvalidOptions { path: PathBuf, reason: String },

    #[error("{op} '{}': {source}{}", path.display(), hint(source))]
    Io {
        op: &'static str,
        path: PathBuf,
        source: io::Error,
    },
}

pub type Result<T, E = FsError> = std::result::Result<T, E>;

impl FsError {
    /// Classify an io::Error raised while performing `op` on `path`.
    pub fn io(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound => FsError::NotFound { op, path, source },
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied { op, path, source },
            _ => FsError::Io { op, path, source },
        }
    }

    /// The path the failure is attributed to.
    pub fn path(&self) -> &Path {
        match self {
            FsError::NotFound { path, .. }
            | FsError::PermissionDenied { path, .. }
            | FsError::TypeMismatch { path, .. }
            | FsError::PartialWrite { path, .. }
            | FsError::UnsupportedFileType { path, .. }
            | FsError::InvalidOptions { path, .. }
            | FsError::Io { path, .. } => path,
            FsError::DestinationInsideSource { dst, .. } | FsError::SameFile { dst, .. } => dst,
        }
    }

    /// Closest `io::ErrorKind` for callers that branch on kind.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            FsError::NotFound { .. } => io::ErrorKind::NotFound,
            FsError::PermissionDenied { .. } => io::ErrorKind::PermissionDenied,
            FsError::TypeMismatch { .. } => io::ErrorKind::AlreadyExists,
            FsError::PartialWrite { source, .. } | FsError::Io { source, .. } => source.kind(),
            FsError::UnsupportedFileType { .. }
            | FsError::DestinationInsideSource { .. }
            | FsError::SameFile { .. }
            | FsError::InvalidOptions { .. } => io::ErrorKind::InvalidInput,
        }
    }

    /// True when the destination holds the copied bytes despite the error.
    pub fn is_partial_write(&self) -> bool {
        matches!(self, FsError::PartialWrite { .. })
    }
}

impl From<FsError> for io::Error {
    fn from(e: FsError) -> Self {
        io::Error::new(e.kind(), e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_classifies_by_kind() {
        let nf = FsError::io("open", "/x", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(nf, FsError::NotFound { op: "open", .. }));

        let pd = FsError::io("open", "/x", io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(pd, FsError::PermissionDenied { .. }));
        assert_eq!(pd.kind(), io::ErrorKind::PermissionDenied);

        let other = FsError::io("open", "/x", io::Error::other("boom"));
        assert!(matches!(other, FsError::Io { .. }));
    }

    #[test]
    fn display_names_path_and_op() {
        let e = FsError::io(
            "create destination file",
            "/no/such/dir/file",
            io::Error::from(io::ErrorKind::NotFound),
        );
        let msg = e.to_string();
        assert!(msg.contains("create destination file"), "{msg}");
        assert!(msg.contains("/no/such/dir/file"), "{msg}");
        assert_eq!(e.path(), Path::new("/no/such/dir/file"));
    }

    #[test]
    fn converts_into_io_error() {
        let e = FsError::TypeMismatch {
            path: PathBuf::from("/tmp/f"),
            expected: "directory",
        };
        let io_err: io::Error = e.into();
        assert_eq!(io_err.kind(), io::ErrorKind::AlreadyExists);
        assert!(io_err.to_string().contains("not a directory"));
    }

    #[test]
    fn same_file_is_attributed_to_destination() {
        let e = FsError::SameFile {
            src: PathBuf::from("/tmp/a"),
            dst: PathBuf::from("/tmp/link"),
        };
        assert_eq!(e.path(), Path::new("/tmp/link"));
        assert_eq!(e.kind(), io::ErrorKind::InvalidInput);
        assert!(e.to_string().contains("same file"));
    }

    #[test]
    fn partial_write_is_flagged() {
        let e = FsError::PartialWrite {
            path: PathBuf::from("/tmp/f"),
            mode: 0o644,
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert!(e.is_partial_write());
        assert!(e.to_string().contains("644"));
    }
}
