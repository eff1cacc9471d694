//! Common constants used throughout the repackager.

/// Placeholder for the kebab-lowercase project name.
pub const KEBAB_LOWER_PLACEHOLDER: &str = "__my-ts-cli__";

/// Placeholder for the snake-uppercase project name.
pub const SNAKE_UPPER_PLACEHOLDER: &str = "__MY_TS_CLI__";

/// Placeholder for the upper-camel project name.
pub const UPPER_CAMEL_PLACEHOLDER: &str = "__MyTsCli__";

/// Scaffolding-only tooling that never ships in generated projects.
pub const EPHEMERAL_DIR: &str = "__ephemeral";

/// Version control metadata directory.
pub const VCS_DIR: &str = ".git";

/// Directory names skipped when copying the local working tree.
pub const DEPENDENCY_CACHE_DIRS: [&str; 1] = ["node_modules"];

/// Dependency lock file pruned during substitution.
pub const LOCK_FILE: &str = "package-lock.json";

/// Package manifest pruned during substitution.
pub const MANIFEST_FILE: &str = "package.json";

/// Name of the repackaging tool as it appears in the template manifests.
pub const TOOL_NAME: &str = "repackager";

/// Remote registered for the new repository.
pub const ORIGIN: &str = "origin";

/// Choice offered by the version picker for copying the local working tree.
pub const COPY_LOCAL_CHOICE: &str = "* copy local *";

/// Per-user cache directory (relative to the home directory).
pub const CACHE_DIR_NAME: &str = ".my-ts-cli";

/// Environment variable selecting the execution mode.
pub const ENV_MODE_VAR: &str = "REPACKAGER_ENV";

/// Environment variable suppressing status output.
pub const ENV_SILENT_VAR: &str = "REPACKAGER_SILENT";

/// Environment variable toggling styled error output.
pub const ENV_PRETTY_ERRORS_VAR: &str = "REPACKAGER_PRETTY_ERRORS";
