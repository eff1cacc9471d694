//! Template acquisition for the repackager.
//! Materializes the template either by copying the local working tree or by
//! cloning a tagged revision of the remote repository.
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use log::debug;
use walkdir::{DirEntry, WalkDir};

use crate::cleanup::remove_if_exists;
use crate::config::Config;
use crate::constants::{COPY_LOCAL_CHOICE, DEPENDENCY_CACHE_DIRS};
use crate::error::{Error, Result};
use crate::vcs;

/// Where the template comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcquisitionChoice {
    /// Copy the local working tree
    LocalTree,
    /// Clone the given tag of the remote repository
    TaggedRemote(String),
}

impl std::fmt::Display for AcquisitionChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AcquisitionChoice::LocalTree => write!(f, "{}", COPY_LOCAL_CHOICE),
            AcquisitionChoice::TaggedRemote(tag) => write!(f, "{}", tag),
        }
    }
}

/// Trait for materializing the template at a target path.
pub trait Acquirer {
    /// Populates `target` with a complete copy of the template.
    ///
    /// `target` must not exist yet.
    fn acquire(&self, target: &Path) -> Result<()>;
}

/// Copies the local working tree through a private cache directory.
pub struct LocalCopier<'a> {
    source: &'a Path,
    cache_dir: &'a Path,
}

/// Clones one tag of a remote repository.
pub struct TagCloner<'a> {
    repository: &'a str,
    tag: &'a str,
}

impl<'a> LocalCopier<'a> {
    pub fn new(source: &'a Path, cache_dir: &'a Path) -> Self {
        Self { source, cache_dir }
    }
}

impl<'a> TagCloner<'a> {
    pub fn new(repository: &'a str, tag: &'a str) -> Self {
        Self { repository, tag }
    }
}

/// Whether a walked entry is a dependency cache that must not be copied.
fn is_dependency_cache(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| DEPENDENCY_CACHE_DIRS.contains(&name))
        .unwrap_or(false)
}

/// Recursively copies `source` into `dest`, skipping dependency caches.
///
/// Symlinks are recreated as symlinks on unix and copied elsewhere.
pub fn copy_tree(source: &Path, dest: &Path) -> Result<()> {
    fs::create_dir_all(dest)?;

    let walker = WalkDir::new(source)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| !is_dependency_cache(e));

    for entry in walker {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| Error::ConfigError(e.to_string()))?;
        let dest_path = dest.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&dest_path)?;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &dest_path)?;
        } else {
            fs::copy(entry.path(), &dest_path)?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn copy_symlink(source: &Path, dest: &Path) -> Result<()> {
    let link = fs::read_link(source)?;
    std::os::unix::fs::symlink(link, dest)?;
    Ok(())
}

#[cfg(not(unix))]
fn copy_symlink(source: &Path, dest: &Path) -> Result<()> {
    if source.is_dir() {
        copy_tree(source, dest)
    } else {
        fs::copy(source, dest)?;
        Ok(())
    }
}

/// Moves a directory, falling back to copy and remove across file systems.
pub fn move_dir(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)?;
    }
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) => {
            debug!("Rename failed ({}), copying '{}' instead.", e, from.display());
            copy_tree(from, to)?;
            fs::remove_dir_all(from)?;
            Ok(())
        }
    }
}

fn unique_temp_name() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    format!("{}-{}", millis, std::process::id())
}

impl Acquirer for LocalCopier<'_> {
    fn acquire(&self, target: &Path) -> Result<()> {
        if !self.source.is_dir() {
            return Err(Error::ConfigError(format!(
                "template source '{}' is not a directory",
                self.source.display()
            )));
        }

        let tmp_location = self.cache_dir.join(unique_temp_name());
        debug!(
            "Copying '{}' to '{}'.",
            self.source.display(),
            tmp_location.display()
        );
        copy_tree(self.source, &tmp_location)?;
        move_dir(&tmp_location, target)?;
        remove_if_exists(&tmp_location)?;

        if fs::read_dir(self.cache_dir)?.next().is_none() {
            debug!("Removing empty cache directory '{}'.", self.cache_dir.display());
            fs::remove_dir(self.cache_dir)?;
        }
        Ok(())
    }
}

impl Acquirer for TagCloner<'_> {
    fn acquire(&self, target: &Path) -> Result<()> {
        vcs::clone_tag(self.repository, self.tag, target)
    }
}

/// Makes sure `target` can be populated, removing it first when `force` is set.
///
/// # Errors
/// * `Error::OutputDirectoryExistsError` if the target exists and `force` is false
pub fn prepare_target(target: &Path, force: bool) -> Result<()> {
    if target.exists() {
        if !force {
            return Err(Error::OutputDirectoryExistsError {
                output_dir: target.display().to_string(),
            });
        }
        debug!("Replacing existing '{}'.", target.display());
        remove_if_exists(target)?;
    }
    Ok(())
}

/// Materializes the template chosen by `choice` at `target`.
pub fn acquire(choice: &AcquisitionChoice, config: &Config, target: &Path) -> Result<PathBuf> {
    prepare_target(target, config.force)?;

    let acquirer: Box<dyn Acquirer + '_> = match choice {
        AcquisitionChoice::LocalTree => {
            Box::new(LocalCopier::new(&config.source_dir, &config.cache_dir))
        }
        AcquisitionChoice::TaggedRemote(tag) => {
            Box::new(TagCloner::new(&config.repository, tag))
        }
    };
    acquirer.acquire(target)?;
    Ok(target.to_path_buf())
}
