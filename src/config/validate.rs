//! CopyOptions validation.

use anyhow::{bail, Result};

use super::types::CopyOptions;

impl CopyOptions {
    /// Reject values the copiers cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.buffer_size == 0 {
            bail!("buffer_size must be greater than zero");
        }
        if self.dir_mode > 0o7777 {
            bail!("dir_mode {:o} has bits outside 0o7777", self.dir_mode);
        }
        if self.dir_mode & 0o700 != 0o700 {
            // The walk must be able to list and populate the directories it creates.
            bail!("dir_mode {:o} must grant the owner rwx", self.dir_mode);
        }
        Ok(())
    }
}
