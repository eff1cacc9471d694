//! Runtime configuration for the repackager.
//! Environment flags and command-line overrides are resolved once at startup
//! into a [`Config`] that is passed by reference to every stage.

use std::path::{Path, PathBuf};

use log::debug;

use crate::cli::Args;
use crate::constants::{
    CACHE_DIR_NAME, ENV_MODE_VAR, ENV_PRETTY_ERRORS_VAR, ENV_SILENT_VAR, MANIFEST_FILE,
};
use crate::error::{Error, Result};
use crate::manifest::TemplateManifest;

/// Execution mode value that enables the version picker.
const DEVELOPMENT_MODE: &str = "development";

/// Resolved configuration for one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Offer the version picker before scaffolding.
    pub development: bool,
    /// Suppress status output.
    pub silent: bool,
    /// Template working tree copied by the "copy local" choice.
    pub source_dir: PathBuf,
    /// Remote template repository, from the template's manifest unless overridden.
    pub repository: String,
    /// Tag of the template's current version, cloned when the version picker
    /// is not offered.
    pub release_tag: String,
    /// Per-user cache directory holding temporary copies.
    pub cache_dir: PathBuf,
    /// Directory in which the new project directory is created.
    pub output_root: PathBuf,
    /// Worker count for the substitution engine.
    pub jobs: usize,
    /// Replace an existing target directory.
    pub force: bool,
}

/// Flags read from the process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvFlags {
    pub development: bool,
    pub silent: bool,
    pub pretty_errors: bool,
}

impl Default for EnvFlags {
    fn default() -> Self {
        Self { development: false, silent: false, pretty_errors: true }
    }
}

impl EnvFlags {
    /// Reads the flags from the current process environment.
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Reads the flags from an explicit set of variables.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut flags = Self::default();
        for (key, value) in vars {
            let value = value.as_ref();
            match key.as_ref() {
                ENV_MODE_VAR => flags.development = value.trim() == DEVELOPMENT_MODE,
                ENV_SILENT_VAR => flags.silent = parse_bool_string(Some(value), false),
                ENV_PRETTY_ERRORS_VAR => {
                    flags.pretty_errors = parse_bool_string(Some(value), true)
                }
                _ => {}
            }
        }
        flags
    }
}

/// Interprets `true`/`on` (any case, surrounding whitespace ignored) as true
/// and any other value as false. An absent value yields `fallback`.
pub fn parse_bool_string(value: Option<&str>, fallback: bool) -> bool {
    match value {
        Some(s) => {
            let s = s.trim();
            s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("on")
        }
        None => fallback,
    }
}

/// Template root when the crate sits at `<template>/__ephemeral/repackager`.
pub fn default_source_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
}

fn default_jobs() -> usize {
    std::thread::available_parallelism().map(|n| n.get()).unwrap_or(4)
}

impl Config {
    /// Builds the configuration from the environment and parsed arguments.
    ///
    /// The remote repository and release tag come from the `package.json` of
    /// the template source; `--repository` overrides the former.
    ///
    /// # Errors
    /// * `Error::ConfigError` if the home or current directory cannot be found,
    ///   or no repository is known
    /// * `Error::IoError`/`Error::ManifestError` if the template manifest is unreadable
    pub fn load(args: &Args, env: &EnvFlags) -> Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| {
            Error::ConfigError("unable to locate the home directory".to_string())
        })?;
        let output_root = match &args.output_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().map_err(|e| {
                Error::ConfigError(format!("unable to read the current directory: {}", e))
            })?,
        };

        let source_dir = args.source.clone().unwrap_or_else(default_source_dir);
        let template = TemplateManifest::load(&source_dir)?;
        let repository = match (&args.repository, &template.repository) {
            (Some(url), _) => url.clone(),
            (None, Some(field)) => field.url().to_string(),
            (None, None) => {
                return Err(Error::ConfigError(format!(
                    "'{}' has no repository; pass --repository",
                    source_dir.join(MANIFEST_FILE).display()
                )))
            }
        };

        let config = Self {
            development: env.development || args.dev,
            silent: env.silent || args.silent,
            release_tag: template.release_tag(),
            source_dir,
            repository,
            cache_dir: home.join(CACHE_DIR_NAME),
            output_root,
            jobs: args.jobs.map(usize::from).unwrap_or_else(default_jobs),
            force: args.force,
        };
        debug!("Resolved configuration: {:?}", config);
        Ok(config)
    }
}
