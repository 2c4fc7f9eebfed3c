//! I/O helper utilities.
//!
//! Provides small adapters that turn io::Error into a path-attributed FsError,
//! plus the platform-aware hint appended to every io-backed error message.
//!
//! Usage:
//!   File::open(src).map_err(at("open source file", src))?;

use std::io;
use std::path::Path;

use crate::errors::FsError;

/// Actionable suffix for an io::Error, keyed on the raw OS code when present.
pub(crate) fn hint(e: &io::Error) -> String {
    let mut msg = String::new();

    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            let text = match code {
                libc::EACCES | libc::EPERM => Some("permission denied; check ownership and mode bits"),
                libc::ENOENT => Some("path not found; verify it and its parents exist"),
                libc::EEXIST => Some("already exists"),
                libc::ENOTDIR => Some("a path component is not a directory"),
                libc::EISDIR => Some("target is a directory"),
                libc::EXDEV => Some("cross-filesystem; rename not possible"),
                libc::ENOSPC => Some("insufficient space on device"),
                libc::EROFS => Some("read-only filesystem"),
                libc::ELOOP => Some("too many levels of symbolic links"),
                libc::ENAMETOOLONG => Some("filename or path too long"),
                libc::EMFILE => Some("process file descriptor limit reached"),
                libc::ENFILE => Some("system-wide file table overflow"),
                _ => None,
            };
            if let Some(t) = text {
                msg.push_str(" (");
                msg.push_str(t);
                msg.push(')');
            }
        }
        #[cfg(windows)]
        {
            let text = match code {
                5 => Some("access denied; check permissions"), // ERROR_ACCESS_DENIED
                2 | 3 => Some("path not found; verify it exists"), // FILE/PATH NOT FOUND
                17 => Some("not same device; cross-filesystem"), // ERROR_NOT_SAME_DEVICE
                32 => Some("sharing violation; file is in use"), // ERROR_SHARING_VIOLATION
                80 | 183 => Some("already exists"),              // ERROR_FILE_EXISTS / ALREADY_EXISTS
                112 => Some("insufficient disk space"),          // ERROR_DISK_FULL
                206 => Some("filename or path too long"),        // ERROR_FILENAME_EXCED_RANGE
                _ => None,
            };
            if let Some(t) = text {
                msg.push_str(" (");
                msg.push_str(t);
                msg.push(')');
            }
        }
        msg.push_str(&format!(" [os code: {code}]"));
    }

    msg
}

/// Adapter for `.map_err(...)`: attribute an io::Error to `op` on `path`.
pub(crate) fn at<'a>(op: &'static str, path: &'a Path) -> impl FnOnce(io::Error) -> FsError + 'a {
    move |e: io::Error| FsError::io(op, path, e)
}
