//! Typed views of the JavaScript manifests read or pruned by the repackager.
//!
//! The pruned documents wrap the whole parsed object in an `IndexMap`, so
//! every key keeps its original position; the accessors name the sections
//! that get edited.
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{DEPENDENCY_CACHE_DIRS, EPHEMERAL_DIR, TOOL_NAME};
use crate::error::{Error, Result};

/// Key of the root package inside the lock file `packages` map.
const ROOT_PACKAGE: &str = "";

const PACKAGES: &str = "packages";
const DEPENDENCIES: &str = "dependencies";
const WORKSPACES: &str = "workspaces";

/// A `package-lock.json` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageLock(IndexMap<String, Value>);

/// A `package.json` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageManifest(IndexMap<String, Value>);

fn object_mut<'a>(map: &'a mut IndexMap<String, Value>, key: &str) -> Option<&'a mut Map<String, Value>> {
    map.get_mut(key).and_then(Value::as_object_mut)
}

impl PackageLock {
    /// The `packages` map, keyed by install path.
    pub fn packages_mut(&mut self) -> Option<&mut Map<String, Value>> {
        object_mut(&mut self.0, PACKAGES)
    }

    /// The legacy top-level `dependencies` map.
    pub fn dependencies_mut(&mut self) -> Option<&mut Map<String, Value>> {
        object_mut(&mut self.0, DEPENDENCIES)
    }

    /// Removes the workspace list of the root package, the repackager's own
    /// package entries and its top-level dependency entry.
    pub fn prune(&mut self) {
        if let Some(packages) = self.packages_mut() {
            if let Some(root) = packages.get_mut(ROOT_PACKAGE).and_then(Value::as_object_mut) {
                root.shift_remove(WORKSPACES);
            }
            packages.shift_remove(&format!("{}/{}", EPHEMERAL_DIR, TOOL_NAME));
            for cache in DEPENDENCY_CACHE_DIRS {
                packages.shift_remove(&format!("{}/{}", cache, TOOL_NAME));
            }
        }
        if let Some(dependencies) = self.dependencies_mut() {
            dependencies.shift_remove(TOOL_NAME);
        }
    }
}

impl PackageManifest {
    /// Removes the workspace list.
    pub fn prune(&mut self) {
        self.0.shift_remove(WORKSPACES);
    }
}

/// `repository` field of a package manifest, either shorthand or expanded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RepositoryField {
    Url(String),
    Detailed { url: String },
}

impl RepositoryField {
    /// Clone URL with npm's `git+` transport prefix removed.
    pub fn url(&self) -> &str {
        let url = match self {
            RepositoryField::Url(url) => url,
            RepositoryField::Detailed { url } => url,
        };
        url.strip_prefix("git+").unwrap_or(url)
    }
}

/// Identity of the template, read from its own `package.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TemplateManifest {
    pub version: String,
    #[serde(default)]
    pub repository: Option<RepositoryField>,
}

impl TemplateManifest {
    /// Reads `package.json` from the template root `dir`.
    ///
    /// # Errors
    /// * `Error::IoError` if the file cannot be read
    /// * `Error::ManifestError` if it is not a manifest with a `version`
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let path = dir.as_ref().join(crate::constants::MANIFEST_FILE);
        let content = std::fs::read_to_string(&path)?;
        serde_json::from_str(&content).map_err(|source| Error::ManifestError {
            path: path.display().to_string(),
            source,
        })
    }

    /// Tag of the release matching this manifest's version.
    pub fn release_tag(&self) -> String {
        format!("v{}", self.version)
    }
}

fn to_json<T: Serialize>(value: &T, original: &str) -> serde_json::Result<String> {
    let mut out = serde_json::to_string_pretty(value)?;
    if original.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}

/// Parses, prunes and reserializes a lock file.
pub fn rewrite_lock(content: &str) -> serde_json::Result<String> {
    let mut lock: PackageLock = serde_json::from_str(content)?;
    lock.prune();
    to_json(&lock, content)
}

/// Parses, prunes and reserializes a package manifest.
pub fn rewrite_manifest(content: &str) -> serde_json::Result<String> {
    let mut manifest: PackageManifest = serde_json::from_str(content)?;
    manifest.prune();
    to_json(&manifest, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const LOCK: &str = r#"{
  "name": "demo-app",
  "version": "1.0.0",
  "lockfileVersion": 2,
  "requires": true,
  "packages": {
    "": {
      "name": "demo-app",
      "version": "1.0.0",
      "workspaces": ["__ephemeral/*"],
      "dependencies": { "yargs": "^17.0.0" }
    },
    "__ephemeral/repackager": { "version": "0.0.0" },
    "node_modules/repackager": { "resolved": "__ephemeral/repackager", "link": true },
    "node_modules/yargs": { "version": "17.0.0" }
  },
  "dependencies": {
    "repackager": { "version": "file:__ephemeral/repackager" },
    "yargs": { "version": "17.0.0" }
  }
}
"#;

    fn keys(value: &Value) -> Vec<String> {
        value.as_object().unwrap().keys().cloned().collect()
    }

    #[test]
    fn test_rewrite_lock_removes_scaffolding_entries() {
        let rewritten = rewrite_lock(LOCK).unwrap();
        let value: Value = serde_json::from_str(&rewritten).unwrap();

        assert!(value["packages"][""].get("workspaces").is_none());
        assert!(value["packages"].get("__ephemeral/repackager").is_none());
        assert!(value["packages"].get("node_modules/repackager").is_none());
        assert!(value["dependencies"].get("repackager").is_none());
    }

    #[test]
    fn test_rewrite_lock_preserves_other_entries() {
        let rewritten = rewrite_lock(LOCK).unwrap();
        let value: Value = serde_json::from_str(&rewritten).unwrap();

        assert_eq!(value["name"], json!("demo-app"));
        assert_eq!(value["lockfileVersion"], json!(2));
        assert_eq!(value["requires"], json!(true));
        assert_eq!(value["packages"][""]["dependencies"], json!({ "yargs": "^17.0.0" }));
        assert_eq!(value["packages"]["node_modules/yargs"], json!({ "version": "17.0.0" }));
        assert_eq!(value["dependencies"]["yargs"], json!({ "version": "17.0.0" }));
    }

    #[test]
    fn test_rewrite_lock_keeps_key_order_and_newline() {
        let rewritten = rewrite_lock(LOCK).unwrap();
        let value: Value = serde_json::from_str(&rewritten).unwrap();
        assert_eq!(
            keys(&value),
            vec!["name", "version", "lockfileVersion", "requires", "packages", "dependencies"]
        );
        assert!(rewritten.ends_with("}\n"));
    }

    #[test]
    fn test_rewrite_lock_keeps_order_of_unusual_layouts() {
        let content = r#"{"packages":{"":{"name":"a"},"node_modules/b":{"version":"1","workspaces":["y"]}},"name":"a","dependencies":{"b":{}},"lockfileVersion":3}"#;
        let value: Value = serde_json::from_str(&rewrite_lock(content).unwrap()).unwrap();

        assert_eq!(keys(&value), vec!["packages", "name", "dependencies", "lockfileVersion"]);
        assert_eq!(keys(&value["packages"]["node_modules/b"]), vec!["version", "workspaces"]);
    }

    #[test]
    fn test_rewrite_lock_without_sections() {
        let rewritten = rewrite_lock(r#"{"name":"x","lockfileVersion":3}"#).unwrap();
        let value: Value = serde_json::from_str(&rewritten).unwrap();
        assert_eq!(value, json!({ "name": "x", "lockfileVersion": 3 }));
        assert!(!rewritten.ends_with('\n'));
    }

    #[test]
    fn test_rewrite_manifest_removes_workspaces() {
        let content = r#"{
  "name": "demo-app",
  "workspaces": ["__ephemeral/*"],
  "scripts": { "build": "tsc" },
  "bin": { "demo-app": "dist/cli.js" }
}
"#;
        let rewritten = rewrite_manifest(content).unwrap();
        let value: Value = serde_json::from_str(&rewritten).unwrap();

        assert!(value.get("workspaces").is_none());
        assert_eq!(keys(&value), vec!["name", "scripts", "bin"]);
        assert_eq!(value["scripts"], json!({ "build": "tsc" }));
        assert_eq!(value["bin"], json!({ "demo-app": "dist/cli.js" }));
    }

    #[test]
    fn test_rewrite_manifest_rejects_invalid_json() {
        assert!(rewrite_manifest("{ not json").is_err());
    }

    #[test]
    fn test_repository_field_forms() {
        let short: TemplateManifest =
            serde_json::from_str(r#"{"version":"1.2.3","repository":"https://example.com/t.git"}"#)
                .unwrap();
        assert_eq!(short.repository.unwrap().url(), "https://example.com/t.git");
        assert_eq!(short.version, "1.2.3");

        let detailed: TemplateManifest = serde_json::from_str(
            r#"{"version":"2.0.0","repository":{"type":"git","url":"git+https://example.com/t.git"}}"#,
        )
        .unwrap();
        assert_eq!(detailed.repository.as_ref().unwrap().url(), "https://example.com/t.git");
        assert_eq!(detailed.release_tag(), "v2.0.0");
    }
}
