use std::io;

/// Whether a rename failed because source and destination live on different filesystems.
pub(super) fn is_cross_device(e: &io::Error) -> bool {
    // std::io::ErrorKind::CrossesDevices is not stable on every supported toolchain,
    // so detect EXDEV / ERROR_NOT_SAME_DEVICE via raw OS error codes.
    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            if code == libc::EXDEV {
                return true;
            }
        }
        #[cfg(windows)]
        {
            // ERROR_NOT_SAME_DEVICE
            if code == 17 {
                return true;
            }
        }
    }
    false
}
