use std::cell::RefCell;
use std::collections::VecDeque;

use repackager::acquire::AcquisitionChoice;
use repackager::error::Result;
use repackager::prompt::{
    ask_project, pick_acquisition, validate_remote_url, ProjectAnswers, Prompter, Validator,
};

/// Replays scripted answers. Rejected inputs are recorded and the next
/// scripted input is tried, the way a terminal prompt asks again.
#[derive(Default)]
struct ScriptedPrompter {
    selections: RefCell<VecDeque<usize>>,
    inputs: RefCell<VecDeque<String>>,
    confirms: RefCell<VecDeque<bool>>,
    rejected: RefCell<Vec<String>>,
    asked: RefCell<Vec<String>>,
    confirm_defaults: RefCell<Vec<bool>>,
}

impl ScriptedPrompter {
    fn new(selections: &[usize], inputs: &[&str], confirms: &[bool]) -> Self {
        Self {
            selections: RefCell::new(selections.iter().copied().collect()),
            inputs: RefCell::new(inputs.iter().map(|s| s.to_string()).collect()),
            confirms: RefCell::new(confirms.iter().copied().collect()),
            ..Default::default()
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&self, prompt: &str, _items: &[String], _default: usize) -> Result<usize> {
        self.asked.borrow_mut().push(prompt.to_string());
        Ok(self.selections.borrow_mut().pop_front().expect("scripted selection"))
    }

    fn input(&self, prompt: &str, validate: Validator<'_>) -> Result<String> {
        self.asked.borrow_mut().push(prompt.to_string());
        loop {
            let input = self.inputs.borrow_mut().pop_front().expect("scripted input");
            match validate(input.as_str()) {
                Ok(()) => return Ok(input),
                Err(msg) => self.rejected.borrow_mut().push(msg),
            }
        }
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        self.asked.borrow_mut().push(prompt.to_string());
        self.confirm_defaults.borrow_mut().push(default);
        Ok(self.confirms.borrow_mut().pop_front().expect("scripted confirm"))
    }
}

#[test]
fn test_validate_remote_url() {
    assert!(validate_remote_url("https://example.com/repo.git"));
    assert!(validate_remote_url("http://example.com/repo.git/"));
    assert!(validate_remote_url("ssh://git@example.com/team/repo.git"));
    assert!(validate_remote_url("git://example.com/repo.git"));
    assert!(validate_remote_url("git@github.com:user/repo.git"));
    assert!(validate_remote_url("https://example.com/repo.git#v1.0"));
    assert!(!validate_remote_url("ftp://example.com/repo"));
    assert!(!validate_remote_url("https://example.com/repo"));
    assert!(!validate_remote_url(""));
}

#[test]
fn test_ask_project_without_git() {
    let prompter = ScriptedPrompter::new(&[], &["demo-app"], &[false]);
    let answers = ask_project(&prompter).unwrap();

    assert_eq!(
        answers,
        ProjectAnswers { name: "demo-app".to_string(), add_git: false, origin: None }
    );
    // The remote question is never asked without a repository.
    assert_eq!(prompter.asked.borrow().len(), 2);
}

#[test]
fn test_ask_project_reprompts_invalid_name() {
    let prompter = ScriptedPrompter::new(&[], &[" My Tool ", "MyTool", "my-tool"], &[true, false]);
    let answers = ask_project(&prompter).unwrap();

    assert_eq!(answers.name, "my-tool");
    assert!(answers.add_git);
    assert_eq!(answers.origin, None);

    let rejected = prompter.rejected.borrow();
    assert_eq!(rejected.len(), 2);
    assert!(rejected[0].contains("leading whitespace"));
    assert!(rejected[1].contains("\"my-tool\""));
}

#[test]
fn test_ask_project_with_origin() {
    let prompter = ScriptedPrompter::new(
        &[],
        &["demo-app", "ftp://example.com/repo", "https://example.com/repo.git"],
        &[true, true],
    );
    let answers = ask_project(&prompter).unwrap();

    assert_eq!(answers.origin.as_deref(), Some("https://example.com/repo.git"));
    assert_eq!(prompter.rejected.borrow().len(), 1);
}

#[test]
fn test_confirms_default_to_yes() {
    let prompter = ScriptedPrompter::new(&[], &["demo-app"], &[true, false]);
    ask_project(&prompter).unwrap();

    assert_eq!(*prompter.confirm_defaults.borrow(), vec![true, true]);
}

#[test]
fn test_pick_acquisition() {
    let tags = vec!["v1.0.0".to_string(), "v1.1.0".to_string()];

    let prompter = ScriptedPrompter::new(&[0], &[], &[]);
    assert_eq!(pick_acquisition(&prompter, &tags).unwrap(), AcquisitionChoice::LocalTree);

    let prompter = ScriptedPrompter::new(&[2], &[], &[]);
    assert_eq!(
        pick_acquisition(&prompter, &tags).unwrap(),
        AcquisitionChoice::TaggedRemote("v1.1.0".to_string())
    );
}

#[test]
fn test_pick_acquisition_out_of_range() {
    let prompter = ScriptedPrompter::new(&[5], &[], &[]);
    assert!(pick_acquisition(&prompter, &[]).is_err());
}
