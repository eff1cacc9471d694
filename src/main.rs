//! Repackager's main application entry point.
//! Parses arguments, asks the scaffolding questions and runs the pipeline.

use repackager::{
    acquire::AcquisitionChoice,
    cli::{get_args, Args},
    config::{Config, EnvFlags},
    error::{default_error_handler, Result},
    logger::init_logger,
    pipeline::Scaffolder,
    prompt::{ask_project, pick_acquisition, DialoguerPrompter},
    status::{Reporter, SilentReporter, SpinnerReporter},
    vcs::list_tags,
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    let env = EnvFlags::from_env();
    let pretty_errors = args.pretty_errors.unwrap_or(env.pretty_errors);

    if let Err(err) = run(&args, &env) {
        default_error_handler(err, pretty_errors);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Resolves the configuration
/// 2. Picks the template version (development mode only)
/// 3. Asks for the project name and git setup
/// 4. Runs the scaffolding pipeline
fn run(args: &Args, env: &EnvFlags) -> Result<()> {
    let config = Config::load(args, env)?;
    let prompter = DialoguerPrompter::new();

    let choice = if config.development {
        let tags = list_tags(&config.source_dir)?;
        pick_acquisition(&prompter, &tags)?
    } else {
        AcquisitionChoice::TaggedRemote(config.release_tag.clone())
    };

    let answers = ask_project(&prompter)?;

    let reporter: Box<dyn Reporter> = if config.silent {
        Box::new(SilentReporter)
    } else {
        Box::new(SpinnerReporter::new())
    };

    let target = Scaffolder::new(&config, &*reporter).run(&choice, &answers)?;
    log::debug!("Project created in '{}'.", target.display());
    Ok(())
}
