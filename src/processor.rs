//! Identifier substitution over a scaffolded tree.
//! Replaces every placeholder token in every text file and prunes the
//! scaffolding entries from the two known manifests.
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::constants::{LOCK_FILE, MANIFEST_FILE};
use crate::error::{Error, Result};
use crate::manifest::{rewrite_lock, rewrite_manifest};
use crate::names::NameSet;

/// Manifest files that get structural pruning after substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
    Lock,
    Package,
}

impl ManifestKind {
    /// Detects a manifest by its exact file name.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.file_name().and_then(|n| n.to_str()) {
            Some(LOCK_FILE) => Some(Self::Lock),
            Some(MANIFEST_FILE) => Some(Self::Package),
            _ => None,
        }
    }
}

/// Outcome of rewriting a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rewrite {
    Updated,
    Unchanged,
    /// Not valid UTF-8, left untouched
    Skipped,
}

/// Replaces every occurrence of each placeholder, in the order of `names`.
pub fn substitute(content: &str, names: &NameSet) -> String {
    names
        .pairs()
        .iter()
        .fold(content.to_string(), |acc, pair| acc.replace(pair.placeholder, &pair.value))
}

/// Reads, substitutes, prunes and writes back one file.
pub fn rewrite_file(path: &Path, names: &NameSet) -> Result<Rewrite> {
    let bytes = fs::read(path)?;
    let original = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(_) => {
            warn!("Skipping non-text file '{}'.", path.display());
            return Ok(Rewrite::Skipped);
        }
    };

    let substituted = substitute(&original, names);
    let content = match ManifestKind::from_path(path) {
        Some(kind) => {
            debug!("Pruning {:?} manifest '{}'.", kind, path.display());
            let rewritten = match kind {
                ManifestKind::Lock => rewrite_lock(&substituted),
                ManifestKind::Package => rewrite_manifest(&substituted),
            };
            rewritten.map_err(|source| Error::ManifestError {
                path: path.display().to_string(),
                source,
            })?
        }
        None => substituted,
    };

    if content == original {
        return Ok(Rewrite::Unchanged);
    }
    fs::write(path, content)?;
    Ok(Rewrite::Updated)
}

/// Lists every regular file below `root`.
pub fn collect_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Rewrites every file under `root` using at most `jobs` workers.
///
/// Returns the number of files that changed. The first failure aborts the
/// run; files already written are left as they are.
pub fn substitute_tree(root: &Path, names: &NameSet, jobs: usize) -> Result<usize> {
    let files = collect_files(root)?;
    debug!("Rewriting {} files with {} workers.", files.len(), jobs);

    let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs.max(1)).build()?;
    let outcomes = pool.install(|| {
        files
            .par_iter()
            .map(|path| rewrite_file(path, names))
            .collect::<Result<Vec<_>>>()
    })?;

    let updated = outcomes.iter().filter(|o| **o == Rewrite::Updated).count();
    debug!("{} of {} files updated.", updated, files.len());
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_kind_from_path() {
        assert_eq!(ManifestKind::from_path(Path::new("a/package-lock.json")), Some(ManifestKind::Lock));
        assert_eq!(ManifestKind::from_path(Path::new("package.json")), Some(ManifestKind::Package));
        assert_eq!(ManifestKind::from_path(Path::new("my-package.json.bak")), None);
        assert_eq!(ManifestKind::from_path(Path::new("tsconfig.json")), None);
    }

    #[test]
    fn test_substitute_replaces_every_occurrence() {
        let names = NameSet::derive("my-cool-tool").unwrap();
        let content = "__my-ts-cli__ __my-ts-cli__ __MY_TS_CLI___SILENT __MyTsCli__";
        assert_eq!(
            substitute(content, &names),
            "my-cool-tool my-cool-tool MY_COOL_TOOL_SILENT MyCoolTool"
        );
    }
}
