//! Removal of files that must not ship in a generated project.
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::debug;

use crate::constants::{EPHEMERAL_DIR, VCS_DIR};
use crate::error::Result;

/// Removes a file or directory tree. A missing path is not an error.
pub fn remove_if_exists<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("Nothing to remove at '{}'.", path.display());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if metadata.is_dir() {
        fs::remove_dir_all(path)?;
    } else {
        fs::remove_file(path)?;
    }
    debug!("Removed '{}'.", path.display());
    Ok(())
}

/// Drops the template's version control metadata.
pub fn remove_vcs_metadata<P: AsRef<Path>>(target: P) -> Result<()> {
    remove_if_exists(target.as_ref().join(VCS_DIR))
}

/// Drops the scaffolding-only tooling directory.
pub fn remove_ephemeral<P: AsRef<Path>>(target: P) -> Result<()> {
    remove_if_exists(target.as_ref().join(EPHEMERAL_DIR))
}
