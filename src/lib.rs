//! Repackager turns the my-ts-cli template into a freshly named project.
//! It acquires the template, strips scaffolding-only files, optionally sets up
//! a new git repository and replaces the placeholder identifiers.

/// Template acquisition from the local working tree or a tagged remote
pub mod acquire;

/// Removal of version control metadata and ephemeral tooling
pub mod cleanup;

/// Command-line interface module
pub mod cli;

/// Runtime configuration built from the environment and arguments
pub mod config;

/// Fixed tokens and file names
pub mod constants;

/// Error types and handling
pub mod error;

/// Logging setup
pub mod logger;

/// Typed views of the JavaScript manifests pruned during substitution
pub mod manifest;

/// Project name validation and casing variants
pub mod names;

/// Stage orchestration
pub mod pipeline;

/// Identifier substitution over the generated tree
pub mod processor;

/// User input and interaction handling
pub mod prompt;

/// Status reporting for pipeline stages
pub mod status;

/// Git operations
pub mod vcs;
