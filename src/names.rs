//! Project name derivation.
//! Turns the user-supplied kebab-lowercase name into the three casing
//! variants that replace the template placeholders.

use std::sync::LazyLock;

use cruet::Inflector;
use regex::Regex;

use crate::constants::{
    KEBAB_LOWER_PLACEHOLDER, SNAKE_UPPER_PLACEHOLDER, UPPER_CAMEL_PLACEHOLDER,
};
use crate::error::{Error, Result};

/// Hyphen-separated segments of lowercase ASCII letters and digits, each
/// starting with a letter, so every casing variant splits at the hyphens only.
static NAME_SEGMENTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z][a-z0-9]*(-[a-z][a-z0-9]*)*$").expect("name pattern is valid")
});

/// A placeholder token and the value that replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub placeholder: &'static str,
    pub value: String,
}

/// The three casing variants derived from one project name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameSet {
    pub kebab_lower: Replacement,
    pub snake_upper: Replacement,
    pub upper_camel: Replacement,
}

/// Lowercase kebab form of `input`, the canonical spelling of a project name.
pub fn to_kebab_lower(input: &str) -> String {
    input.to_kebab_case().to_lowercase()
}

/// Checks that `input` is usable as a project name.
///
/// # Errors
/// * `Error::ValidationError` if the name is empty, has surrounding
///   whitespace, is not already in kebab-lowercase form, or has a segment
///   starting with a digit
pub fn validate_name(input: &str) -> Result<()> {
    if input.is_empty() {
        return Err(Error::ValidationError("the project name cannot be empty".to_string()));
    }
    if input != input.trim_start() {
        return Err(Error::ValidationError(format!(
            "\"{}\" has some leading whitespace",
            input
        )));
    }
    if input != input.trim_end() {
        return Err(Error::ValidationError(format!(
            "\"{}\" has some trailing whitespace",
            input
        )));
    }
    let expected = to_kebab_lower(input);
    if input != expected {
        return Err(Error::ValidationError(format!(
            "expected \"{}\" to look like \"{}\"",
            input, expected
        )));
    }
    if !NAME_SEGMENTS.is_match(input) {
        return Err(Error::ValidationError(format!(
            "every part of \"{}\" between hyphens must start with a letter",
            input
        )));
    }
    Ok(())
}

impl NameSet {
    /// Validates `raw` and derives all three variants from it.
    pub fn derive(raw: &str) -> Result<Self> {
        validate_name(raw)?;

        Ok(Self {
            kebab_lower: Replacement {
                placeholder: KEBAB_LOWER_PLACEHOLDER,
                value: to_kebab_lower(raw),
            },
            snake_upper: Replacement {
                placeholder: SNAKE_UPPER_PLACEHOLDER,
                value: raw.to_screaming_snake_case(),
            },
            upper_camel: Replacement {
                placeholder: UPPER_CAMEL_PLACEHOLDER,
                value: raw.to_pascal_case(),
            },
        })
    }

    /// Pairs in replacement order.
    pub fn pairs(&self) -> [&Replacement; 3] {
        [&self.kebab_lower, &self.snake_upper, &self.upper_camel]
    }

    /// Directory name of the new project.
    pub fn directory_name(&self) -> &str {
        &self.kebab_lower.value
    }
}
