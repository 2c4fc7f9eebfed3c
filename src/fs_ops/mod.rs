//! Filesystem operations: modularized.

mod dir_copy;
mod file_copy;
pub(crate) mod helpers;
mod io_copy;
mod meta;
mod rename;
mod stat;
mod util;

pub use dir_copy::{copy_dir, copy_dir_with};
pub use file_copy::{copy_file, copy_file_with};
pub use rename::rename_with_fallback;
pub use stat::{is_dir, is_non_empty_dir, is_regular, is_symlink};
