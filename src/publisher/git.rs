//! [`VersionControl`] on top of libgit2.

use git2::build::{CheckoutBuilder, RepoBuilder};
use git2::{BranchType, Index, Oid, Signature};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::{OutputTree, Repository, VersionControl, WorkspaceLayout};
use crate::error::{GenerationError, Result};

/// Committer used when neither an explicit identity nor `user.name` /
/// `user.email` is configured.
const FALLBACK_IDENTITY: (&str, &str) = ("enterprise-gen", "enterprise-gen@localhost");

/// [`VersionControl`] backed by `git2`.
///
/// Every repository lives at the [`WorkspaceLayout`] root for its name.
#[derive(Debug, Clone)]
pub struct GitClient {
    layout: WorkspaceLayout,
    identity: Option<(String, String)>,
}

impl GitClient {
    pub fn new(layout: WorkspaceLayout) -> Self {
        Self {
            layout,
            identity: None,
        }
    }

    /// Commit as `name <email>` instead of the repository configuration.
    pub fn with_identity(mut self, name: impl Into<String>, email: impl Into<String>) -> Self {
        self.identity = Some((name.into(), email.into()));
        self
    }

    fn signature(&self, repo: &git2::Repository) -> Result<Signature<'static>> {
        if let Some((name, email)) = &self.identity {
            return Signature::now(name, email).map_err(vcs_error("create signature"));
        }
        match repo.signature() {
            Ok(signature) => Ok(signature.to_owned()),
            Err(_) => Signature::now(FALLBACK_IDENTITY.0, FALLBACK_IDENTITY.1)
                .map_err(vcs_error("create signature")),
        }
    }

    /// Fetch the checked-out branch from `origin` and fast-forward onto it.
    fn pull(&self, repo: &git2::Repository, name: &str) -> Result<()> {
        let Some(branch) = current_branch(repo)? else {
            debug!(repository = name, "detached HEAD, skipping pull");
            return Ok(());
        };
        let mut origin = repo.find_remote("origin").map_err(vcs_error("find origin"))?;
        origin
            .fetch(&[branch.as_str()], None, None)
            .map_err(vcs_error("fetch"))?;

        let fetch_head = repo
            .find_reference("FETCH_HEAD")
            .map_err(vcs_error("read FETCH_HEAD"))?;
        let fetched = repo
            .reference_to_annotated_commit(&fetch_head)
            .map_err(vcs_error("read FETCH_HEAD"))?;
        let (analysis, _) = repo
            .merge_analysis(&[&fetched])
            .map_err(vcs_error("merge analysis"))?;

        if analysis.is_up_to_date() {
            debug!(repository = name, branch = %branch, "already up to date");
            return Ok(());
        }
        if !analysis.is_fast_forward() {
            return Err(GenerationError::VersionControl(format!(
                "cannot fast-forward '{branch}' in {name}"
            )));
        }

        let refname = format!("refs/heads/{branch}");
        let mut reference = repo
            .find_reference(&refname)
            .map_err(vcs_error("find branch"))?;
        reference
            .set_target(fetched.id(), "fast-forward")
            .map_err(vcs_error("fast-forward"))?;
        repo.set_head(&refname).map_err(vcs_error("set HEAD"))?;
        repo.checkout_head(Some(CheckoutBuilder::new().force()))
            .map_err(vcs_error("checkout"))?;
        info!(repository = name, branch = %branch, "fast-forwarded");
        Ok(())
    }
}

impl VersionControl for GitClient {
    fn ensure_repository(&self, name: &str, remote: Option<&str>) -> Result<Repository> {
        let root = self.layout.root_for(name);

        if root.join(".git").exists() {
            if remote.is_some() {
                let repo = open(&root)?;
                info!(repository = name, "pulling");
                self.pull(&repo, name)?;
            }
        } else {
            match remote {
                Some(url) => {
                    if let Some(parent) = root.parent() {
                        fs::create_dir_all(parent).map_err(|e| GenerationError::io(parent, e))?;
                    }
                    info!(repository = name, remote = url, "cloning");
                    RepoBuilder::new()
                        .clone(url, &root)
                        .map_err(vcs_error("clone"))?;
                }
                None => {
                    fs::create_dir_all(&root).map_err(|e| GenerationError::io(&root, e))?;
                    info!(repository = name, "initializing");
                    git2::Repository::init(&root).map_err(vcs_error("init"))?;
                }
            }
        }

        Ok(Repository {
            name: name.to_string(),
            root,
        })
    }

    fn checkout(
        &self,
        repository: &Repository,
        branch: &str,
        create_if_missing: bool,
    ) -> Result<()> {
        let repo = open(&repository.root)?;
        if current_branch(&repo)?.as_deref() == Some(branch) {
            return Ok(());
        }

        let refname = format!("refs/heads/{branch}");
        if repo.find_branch(branch, BranchType::Local).is_err() {
            if !create_if_missing {
                return Err(GenerationError::VersionControl(format!(
                    "branch '{branch}' does not exist in {}",
                    repository.name
                )));
            }
            info!(repository = %repository.name, branch, "creating branch");
            match repo.head().and_then(|head| head.peel_to_commit()) {
                Ok(commit) => {
                    repo.branch(branch, &commit, false)
                        .map_err(vcs_error("create branch"))?;
                }
                // Unborn HEAD: pointing at the new name is enough, the first
                // commit creates the branch.
                Err(_) => {
                    return repo.set_head(&refname).map_err(vcs_error("set HEAD"));
                }
            }
        }

        repo.set_head(&refname).map_err(vcs_error("set HEAD"))?;
        repo.checkout_head(Some(CheckoutBuilder::new().safe()))
            .map_err(vcs_error("checkout"))
    }

    /// Commit exactly `files`.
    ///
    /// The commit tree is HEAD's tree with those paths replaced (or removed
    /// when absent on disk); anything else staged in the index stays out of
    /// the commit. No commit is created when the tree is unchanged.
    fn commit(&self, repository: &Repository, files: &[PathBuf], message: &str) -> Result<()> {
        let repo = open(&repository.root)?;
        let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());

        let mut staged = repo.index().map_err(vcs_error("read index"))?;
        let mut tree_index = Index::new().map_err(vcs_error("create index"))?;
        if let Some(parent) = &parent {
            let tree = parent.tree().map_err(vcs_error("read HEAD tree"))?;
            tree_index
                .read_tree(&tree)
                .map_err(vcs_error("read HEAD tree"))?;
        }

        for file in files {
            if repository.root.join(file).is_file() {
                staged.add_path(file).map_err(vcs_error("stage file"))?;
                let entry = staged.get_path(file, 0).ok_or_else(|| {
                    GenerationError::VersionControl(format!("{} not staged", file.display()))
                })?;
                tree_index.add(&entry).map_err(vcs_error("stage file"))?;
            } else {
                if staged.get_path(file, 0).is_some() {
                    staged.remove_path(file).map_err(vcs_error("unstage file"))?;
                }
                if tree_index.get_path(file, 0).is_some() {
                    tree_index
                        .remove_path(file)
                        .map_err(vcs_error("unstage file"))?;
                }
            }
        }
        staged.write().map_err(vcs_error("write index"))?;

        let tree_id = tree_index
            .write_tree_to(&repo)
            .map_err(vcs_error("write tree"))?;
        let unchanged = match &parent {
            Some(parent) => parent.tree_id() == tree_id,
            None => tree_id == empty_tree(&repo)?,
        };
        if unchanged {
            info!(repository = %repository.name, "working tree unchanged, skipping commit");
            return Ok(());
        }

        let tree = repo.find_tree(tree_id).map_err(vcs_error("find tree"))?;
        let signature = self.signature(&repo)?;
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();
        let oid = repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
            .map_err(vcs_error("commit"))?;
        info!(repository = %repository.name, commit = %oid, files = files.len(), "committed");
        Ok(())
    }
}

fn open(root: &Path) -> Result<git2::Repository> {
    git2::Repository::open(root).map_err(vcs_error("open repository"))
}

/// Short name of the branch HEAD points at, born or not.
fn current_branch(repo: &git2::Repository) -> Result<Option<String>> {
    let head = repo.find_reference("HEAD").map_err(vcs_error("read HEAD"))?;
    Ok(head
        .symbolic_target()
        .and_then(|target| target.strip_prefix("refs/heads/"))
        .map(str::to_string))
}

fn empty_tree(repo: &git2::Repository) -> Result<Oid> {
    repo.treebuilder(None)
        .and_then(|builder| builder.write())
        .map_err(vcs_error("write empty tree"))
}

fn vcs_error(action: &'static str) -> impl Fn(git2::Error) -> GenerationError {
    move |e| GenerationError::VersionControl(format!("failed to {action}: {}", e.message()))
}
