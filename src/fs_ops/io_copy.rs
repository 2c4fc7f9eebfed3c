//! Streaming copy with configurable buffering and durability.
//!
//! - Source is stat'ed and opened first so an unreadable or special source is
//!   reported before the destination is touched.
//! - A destination that is the source itself (same path, symlink or hardlink) is
//!   refused; truncating it would empty the source.
//! - Destination is created or truncated (existing files are overwritten).
//! - Read failures are attributed to the source path, write failures to the destination.
//!
//! Snapshot semantics: the source is read once from start to EOF; bytes appended
//! concurrently after EOF is observed are not included.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use crate::config::{CopyOptions, DurabilityMode};
use crate::errors::{FsError, Result};

use super::helpers::at;

/// An open, fully written destination plus what the caller needs to finish it.
pub(super) struct Streamed {
    /// Destination handle, still open so permissions can be applied through it.
    pub dst: File,
    /// Metadata of the source taken from the open handle.
    pub src_meta: fs::Metadata,
    /// Total bytes copied.
    pub bytes: u64,
}

/// Stat and open `src`, create/truncate `dst` and stream every byte across.
pub(super) fn copy_streaming(src: &Path, dst: &Path, opts: &CopyOptions) -> Result<Streamed> {
    // Stat before opening: opening a FIFO for reading blocks until a writer appears.
    let probed = fs::metadata(src).map_err(at("stat source file", src))?;
    if probed.is_dir() {
        return Err(FsError::TypeMismatch {
            path: src.to_path_buf(),
            expected: "regular file",
        });
    }
    if !probed.is_file() {
        return Err(FsError::UnsupportedFileType {
            path: src.to_path_buf(),
            file_type: "special file",
        });
    }

    let mut src_f = File::open(src).map_err(at("open source file", src))?;
    let src_meta = src_f.metadata().map_err(at("stat source file", src))?;

    if let Ok(dst_meta) = fs::metadata(dst)
        && same_file(src, &src_meta, dst, &dst_meta)
    {
        return Err(FsError::SameFile {
            src: src.to_path_buf(),
            dst: dst.to_path_buf(),
        });
    }

    let dst_f = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(dst)
        .map_err(at("create destination file", dst))?;

    let buf_size = opts.buffer_size.max(1);
    let mut writer = BufWriter::with_capacity(buf_size, dst_f);
    let mut buf = vec![0u8; buf_size];
    let mut bytes: u64 = 0;

    loop {
        let n = match src_f.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(FsError::io("read source file", src, e)),
        };
        writer
            .write_all(&buf[..n])
            .map_err(at("write destination file", dst))?;
        bytes += n as u64;
    }

    writer.flush().map_err(at("flush destination file", dst))?;
    let dst_f = writer
        .into_inner()
        .map_err(|e| FsError::io("flush destination file", dst, e.into_error()))?;

    if matches!(opts.durability, DurabilityMode::Full) {
        dst_f.sync_all().map_err(at("sync destination file", dst))?;
    }

    Ok(Streamed {
        dst: dst_f,
        src_meta,
        bytes,
    })
}

/// Whether `dst` (followed through symlinks) is the file already opened as `src`.
#[cfg(unix)]
fn same_file(_src: &Path, src_meta: &fs::Metadata, _dst: &Path, dst_meta: &fs::Metadata) -> bool {
    use std::os::unix::fs::MetadataExt;
    src_meta.dev() == dst_meta.dev() && src_meta.ino() == dst_meta.ino()
}

#[cfg(not(unix))]
fn same_file(src: &Path, _src_meta: &fs::Metadata, dst: &Path, _dst_meta: &fs::Metadata) -> bool {
    match (fs::canonicalize(src), fs::canonicalize(dst)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
