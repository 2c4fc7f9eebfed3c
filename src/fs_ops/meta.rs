//! Permission propagation.
//!
//! Applies the source's permission bits to an open destination handle. Failures are
//! returned to the caller, which reports them as a partial write.

use std::fs::{self, File};
use std::io;

/// Set the permissions of `dst` to exactly those described by `src_meta`.
/// Returns the mode that was applied (on non-Unix: 0o444 or 0o666 by readonly flag).
pub(super) fn propagate_permissions(dst: &File, src_meta: &fs::Metadata) -> io::Result<u32> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = src_meta.permissions().mode() & 0o7777;
        dst.set_permissions(fs::Permissions::from_mode(mode))?;
        Ok(mode)
    }
    #[cfg(not(unix))]
    {
        let readonly = src_meta.permissions().readonly();
        let mut perms = dst.metadata()?.permissions();
        perms.set_readonly(readonly);
        dst.set_permissions(perms)?;
        Ok(if readonly { 0o444 } else { 0o666 })
    }
}

/// Mode bits of `meta` as reported in errors and logs.
pub(super) fn mode_of(meta: &fs::Metadata) -> u32 {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        meta.permissions().mode() & 0o7777
    }
    #[cfg(not(unix))]
    {
        if meta.permissions().readonly() { 0o444 } else { 0o666 }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::tempdir;

    #[test]
    fn applies_exact_mode() {
        let td = tempdir().unwrap();
        let src = td.path().join("src");
        let dst = td.path().join("dst");
        fs::write(&src, b"x").unwrap();
        fs::write(&dst, b"x").unwrap();
        // Unusual enough that a umask-derived default would not match.
        fs::set_permissions(&src, fs::Permissions::from_mode(0o604)).unwrap();

        let src_meta = fs::metadata(&src).unwrap();
        let handle = File::options().write(true).open(&dst).unwrap();
        let applied = propagate_permissions(&handle, &src_meta).unwrap();
        drop(handle);

        assert_eq!(applied, mode_of(&src_meta));
        let got = fs::metadata(&dst).unwrap().permissions().mode() & 0o7777;
        assert_eq!(got, applied);
    }
}
