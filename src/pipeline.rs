//! Scaffolding orchestration.
//! Runs acquisition, cleanup, repository setup and identifier substitution
//! strictly one after another, narrating each stage.
use std::path::PathBuf;

use crate::acquire::{acquire, AcquisitionChoice};
use crate::cleanup::{remove_ephemeral, remove_vcs_metadata};
use crate::config::Config;
use crate::constants::ORIGIN;
use crate::error::Result;
use crate::names::NameSet;
use crate::processor::substitute_tree;
use crate::prompt::ProjectAnswers;
use crate::status::{stage, Reporter};
use crate::vcs;

/// Drives one scaffolding run.
pub struct Scaffolder<'a> {
    config: &'a Config,
    reporter: &'a dyn Reporter,
}

impl<'a> Scaffolder<'a> {
    pub fn new(config: &'a Config, reporter: &'a dyn Reporter) -> Self {
        Self { config, reporter }
    }

    /// Creates the new project and returns its directory.
    ///
    /// A failed run leaves whatever was already written in place.
    pub fn run(&self, choice: &AcquisitionChoice, answers: &ProjectAnswers) -> Result<PathBuf> {
        let names = NameSet::derive(&answers.name)?;
        let target = self.config.output_root.join(names.directory_name());
        let shown = target.display().to_string();

        stage(
            self.reporter,
            &format!("Repo cloning into: {}", shown),
            &format!("Repo cloned into: {}", shown),
            "Something went wrong while cloning",
            || {
                acquire(choice, self.config, &target)?;
                remove_vcs_metadata(&target)
            },
        )?;

        stage(
            self.reporter,
            "Removing ephemeral files",
            "Removed ephemeral files",
            "Something went wrong when removing ephemeral files",
            || remove_ephemeral(&target),
        )?;

        if answers.add_git {
            stage(
                self.reporter,
                "Creating .git folder",
                "Created .git folder",
                "Something went wrong when creating .git",
                || vcs::init_repository(&target),
            )?;

            if let Some(url) = &answers.origin {
                stage(
                    self.reporter,
                    &format!("Setting up remote \"{}\": {}", ORIGIN, url),
                    &format!("Remote \"{}\" was created: {}", ORIGIN, url),
                    "Something went wrong when setting up remote",
                    || vcs::add_remote(&target, ORIGIN, url),
                )?;
            }
        }

        stage(
            self.reporter,
            "Replacing identifiers in the source code",
            "Done!",
            "Something went wrong when replacing identifiers",
            || substitute_tree(&target, &names, self.config.jobs),
        )?;

        Ok(target)
    }
}
