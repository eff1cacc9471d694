//! Status reporting for pipeline stages.
//! Every stage is narrated with a start message followed by either a success
//! or a failure line.

use std::cell::RefCell;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::Result;

/// Sequential status indicator.
pub trait Reporter {
    /// Begins a new stage.
    fn start(&self, msg: &str);
    /// Marks the current stage as successful.
    fn succeed(&self, msg: &str);
    /// Marks the current stage as failed.
    fn fail(&self, msg: &str);
}

/// Terminal spinner backed by indicatif.
#[derive(Default)]
pub struct SpinnerReporter {
    bar: RefCell<Option<ProgressBar>>,
}

impl SpinnerReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn stop(&self) {
        if let Some(bar) = self.bar.borrow_mut().take() {
            bar.finish_and_clear();
        }
    }
}

impl Reporter for SpinnerReporter {
    fn start(&self, msg: &str) {
        self.stop();
        let bar = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            bar.set_style(spinner_style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
        }
        bar.set_message(msg.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        *self.bar.borrow_mut() = Some(bar);
    }

    fn succeed(&self, msg: &str) {
        self.stop();
        println!("{} {}", style("✔").green().bold(), msg);
    }

    fn fail(&self, msg: &str) {
        self.stop();
        eprintln!("{} {}", style("✖").red().bold(), msg);
    }
}

impl Drop for SpinnerReporter {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Reporter that prints nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn start(&self, _msg: &str) {}
    fn succeed(&self, _msg: &str) {}
    fn fail(&self, _msg: &str) {}
}

/// Runs `f` as one reported stage.
///
/// On error the failure message is emitted and the error is returned as is.
pub fn stage<T, F>(
    reporter: &dyn Reporter,
    start: &str,
    success: &str,
    failure: &str,
    f: F,
) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    reporter.start(start);
    match f() {
        Ok(value) => {
            reporter.succeed(success);
            Ok(value)
        }
        Err(e) => {
            reporter.fail(failure);
            Err(e)
        }
    }
}
