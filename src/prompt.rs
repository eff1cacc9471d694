//! User input and interaction handling.
//! The questions asked before scaffolding, behind a [`Prompter`] trait so the
//! flow can be driven without a terminal.

use std::sync::LazyLock;

use dialoguer::{Confirm, Input, Select};
use log::debug;
use regex::Regex;

use crate::acquire::AcquisitionChoice;
use crate::constants::COPY_LOCAL_CHOICE;
use crate::error::{Error, Result};
use crate::names::validate_name;

static GIT_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:git|ssh|https?|git@[-\w.]+):(//)?(.*?)(\.git)(/?|#[-\d\w._]+?)$")
        .expect("git URL pattern is valid")
});

/// Validator applied to free-text answers; `Err` carries the message shown
/// before asking again.
pub type Validator<'a> = &'a dyn Fn(&str) -> std::result::Result<(), String>;

/// Trait for asking the user questions.
pub trait Prompter {
    /// Lets the user pick one of `items`, returning its index.
    fn select(&self, prompt: &str, items: &[String], default: usize) -> Result<usize>;

    /// Asks for text until `validate` accepts it.
    fn input(&self, prompt: &str, validate: Validator<'_>) -> Result<String>;

    /// Asks a yes/no question.
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;
}

/// Terminal prompter backed by dialoguer.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn select(&self, prompt: &str, items: &[String], default: usize) -> Result<usize> {
        Ok(Select::new().with_prompt(prompt).default(default).items(items).interact()?)
    }

    fn input(&self, prompt: &str, validate: Validator<'_>) -> Result<String> {
        Ok(Input::<String>::new()
            .with_prompt(prompt)
            .validate_with(|input: &String| validate(input.as_str()))
            .interact_text()?)
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        Ok(Confirm::new().with_prompt(prompt).default(default).interact()?)
    }
}

/// Answers collected before the pipeline runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectAnswers {
    /// Raw kebab-lowercase project name
    pub name: String,
    /// Create a fresh repository in the new project
    pub add_git: bool,
    /// Remote registered as `origin`, if any
    pub origin: Option<String>,
}

/// Whether `url` looks like a git remote (git, ssh, http(s) or scp-style,
/// ending in `.git` optionally followed by a slash or a fragment).
pub fn validate_remote_url(url: &str) -> bool {
    GIT_URL.is_match(url)
}

/// Offers the local working tree and every known tag.
pub fn pick_acquisition(prompter: &dyn Prompter, tags: &[String]) -> Result<AcquisitionChoice> {
    let mut items = Vec::with_capacity(tags.len() + 1);
    items.push(COPY_LOCAL_CHOICE.to_string());
    items.extend(tags.iter().cloned());

    let index = prompter.select("Pick which version of the template you want to use", &items, 0)?;
    let choice = match index {
        0 => AcquisitionChoice::LocalTree,
        i => match tags.get(i - 1) {
            Some(tag) => AcquisitionChoice::TaggedRemote(tag.clone()),
            None => {
                return Err(Error::ValidationError(format!("no version at position {}", i)))
            }
        },
    };
    debug!("Using template version '{}'.", choice);
    Ok(choice)
}

/// Asks for the project name and the version control setup.
pub fn ask_project(prompter: &dyn Prompter) -> Result<ProjectAnswers> {
    let name = prompter.input("What is the name of your CLI? (as kebab lowercase)", &|input: &str| {
        validate_name(input).map_err(|e| match e {
            Error::ValidationError(msg) => format!("Hmmm {}.", msg),
            other => other.to_string(),
        })
    })?;

    let add_git = prompter.confirm("Would you like to add a `.git` folder to this CLI?", true)?;

    let origin = if add_git
        && prompter.confirm("Do you have an existing remote Git repository?", true)?
    {
        Some(prompter.input("Provide the URL for your remote Git repository", &|input: &str| {
            if validate_remote_url(input) {
                Ok(())
            } else {
                Err(format!("\"{}\" does not look like a git remote URL.", input))
            }
        })?)
    } else {
        None
    };

    Ok(ProjectAnswers { name, add_git, origin })
}
