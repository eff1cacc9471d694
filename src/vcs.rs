//! Version control operations backed by libgit2.
use std::path::{Path, PathBuf};

use git2::build::CheckoutBuilder;
use git2::{Cred, CredentialType, FetchOptions, RemoteCallbacks, Repository};
use log::debug;
use url::Url;

use crate::error::Result;

/// Lists the tags of the repository containing `repo_dir`.
pub fn list_tags<P: AsRef<Path>>(repo_dir: P) -> Result<Vec<String>> {
    let repo = Repository::discover(repo_dir.as_ref())?;
    let tags = repo.tag_names(None)?;
    let tags: Vec<String> = tags.iter().flatten().map(String::from).collect();
    debug!("Found {} tags in '{}'.", tags.len(), repo_dir.as_ref().display());
    Ok(tags)
}

/// Whether `repo_url` points at a network remote rather than a local path.
///
/// libgit2's local transport does not support shallow fetches.
pub fn is_network_url(repo_url: &str) -> bool {
    if repo_url.starts_with("git@") {
        return true;
    }
    match Url::parse(repo_url) {
        Ok(url) => matches!(url.scheme(), "http" | "https" | "git" | "ssh"),
        Err(_) => false,
    }
}

fn credential_callbacks<'a>() -> RemoteCallbacks<'a> {
    let mut callbacks = RemoteCallbacks::new();
    callbacks.credentials(|_url, username_from_url, allowed_types| {
        let username = username_from_url.unwrap_or("git");
        if allowed_types.contains(CredentialType::SSH_KEY) {
            if let Ok(cred) = Cred::ssh_key_from_agent(username) {
                return Ok(cred);
            }
            if let Some(home) = dirs::home_dir() {
                let key: PathBuf = home.join(".ssh").join("id_rsa");
                return Cred::ssh_key(username, None, &key, None);
            }
        }
        Cred::default()
    });
    callbacks
}

/// Clones only the commit tagged `tag` from `repo_url` into `target`.
///
/// The tag is fetched alone with a depth of one when the remote is a network
/// URL, then checked out as a detached HEAD.
pub fn clone_tag<P: AsRef<Path>>(repo_url: &str, tag: &str, target: P) -> Result<()> {
    let target = target.as_ref();
    debug!("Cloning tag '{}' of '{}' into '{}'.", tag, repo_url, target.display());

    let repo = Repository::init(target)?;
    let mut remote = repo.remote_anonymous(repo_url)?;

    let mut fetch_opts = FetchOptions::new();
    fetch_opts.remote_callbacks(credential_callbacks());
    if is_network_url(repo_url) {
        fetch_opts.depth(1);
    }

    let tag_ref = format!("refs/tags/{}", tag);
    let refspec = format!("+{0}:{0}", tag_ref);
    remote.fetch(&[refspec.as_str()], Some(&mut fetch_opts), None)?;

    let commit = repo.revparse_single(&tag_ref)?.peel_to_commit()?;
    repo.checkout_tree(commit.as_object(), Some(CheckoutBuilder::new().force()))?;
    repo.set_head_detached(commit.id())?;

    debug!("Checked out {} at '{}'.", commit.id(), tag);
    Ok(())
}

/// Creates a fresh repository rooted at `target`.
pub fn init_repository<P: AsRef<Path>>(target: P) -> Result<()> {
    let target = target.as_ref();
    debug!("Initializing repository in '{}'.", target.display());
    Repository::init(target)?;
    Ok(())
}

/// Registers `name` as a remote pointing at `url` in the repository at `target`.
pub fn add_remote<P: AsRef<Path>>(target: P, name: &str, url: &str) -> Result<()> {
    let repo = Repository::open(target.as_ref())?;
    repo.remote(name, url)?;
    debug!("Remote '{}' set to '{}'.", name, url);
    Ok(())
}
