//! # Publisher Module
//!
//! Writes synthesized artifacts into a module working tree and records them in
//! version control with a single commit.
//!
//! ## Collaborators
//!
//! - **[`VersionControl`]** - repository bootstrap, branch checkout and commit.
//!   [`GitClient`] implements it with `git2`; tests substitute a recording fake.
//!   Files are written under the [`Repository::root`] it returns.
//! - **[`OutputTree`]** - maps a repository code to its working-tree root.
//!   [`WorkspaceLayout`] places every repository under one workspace directory.
//!
//! ## Publish Sequence
//!
//! ```text
//! ensure template repo (clone or pull)
//! ensure module repo, checkout module branch (create if missing)
//! write artifacts in plan order
//! write support files (REST configuration), copy template assets
//! commit everything once
//! ```
//!
//! Nothing happens for an empty artifact list: no repository is touched and no
//! commit is issued. The first failing write aborts the run before the commit.

mod artifact;
mod git;

pub use artifact::{ArtifactKind, ArtifactLayout, GeneratedArtifact};
pub use git::GitClient;

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::config::GeneratorConfig;
use crate::error::{GenerationError, Result};

/// A repository known to the version-control client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub name: String,
    pub root: PathBuf,
}

/// Version-control operations the publisher needs.
pub trait VersionControl {
    /// Make `name` available locally.
    ///
    /// With a remote, clone it when absent and pull when present. Without one,
    /// initialize an empty repository when absent.
    fn ensure_repository(&self, name: &str, remote: Option<&str>) -> Result<Repository>;

    /// Switch the working tree to `branch`, creating it when allowed.
    fn checkout(&self, repository: &Repository, branch: &str, create_if_missing: bool)
        -> Result<()>;

    /// Stage `files` (relative to the repository root) and commit them.
    fn commit(&self, repository: &Repository, files: &[PathBuf], message: &str) -> Result<()>;
}

/// Resolves a repository code to its working-tree root.
pub trait OutputTree {
    fn root_for(&self, code: &str) -> PathBuf;
}

/// Every repository lives in `<workspace>/<code>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceLayout {
    workspace: PathBuf,
}

impl WorkspaceLayout {
    pub fn new(workspace: impl Into<PathBuf>) -> Self {
        Self {
            workspace: workspace.into(),
        }
    }

    pub fn workspace(&self) -> &Path {
        &self.workspace
    }
}

impl OutputTree for WorkspaceLayout {
    fn root_for(&self, code: &str) -> PathBuf {
        self.workspace.join(code)
    }
}

/// What a publish run touched. Paths are relative to the module working tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishOutcome {
    pub artifacts: Vec<PathBuf>,
    pub support_files: Vec<PathBuf>,
    pub committed: bool,
}

/// Writes artifacts and commits them through the configured version control.
pub struct ArtifactPublisher<'a> {
    config: &'a GeneratorConfig,
    vcs: &'a dyn VersionControl,
}

impl<'a> ArtifactPublisher<'a> {
    pub fn new(config: &'a GeneratorConfig, vcs: &'a dyn VersionControl) -> Self {
        Self { config, vcs }
    }

    /// Publish one module's artifacts.
    ///
    /// `support` files (the REST configuration) are written after `artifacts`
    /// and only when `artifacts` is non-empty.
    pub fn publish(
        &self,
        module_code: &str,
        artifacts: &[GeneratedArtifact],
        support: &[GeneratedArtifact],
    ) -> Result<PublishOutcome> {
        if artifacts.is_empty() {
            info!(module = module_code, "no artifacts to publish");
            return Ok(PublishOutcome::default());
        }

        let template_repo = self.vcs.ensure_repository(
            &self.config.template_repository,
            Some(&self.config.template_remote),
        )?;
        let module_repo = self.vcs.ensure_repository(module_code, None)?;
        self.vcs
            .checkout(&module_repo, &self.config.module_branch, true)?;

        let module_root = &module_repo.root;
        let mut outcome = PublishOutcome::default();
        for artifact in artifacts {
            write_artifact(module_root, artifact)?;
            outcome.artifacts.push(artifact.path.clone());
        }
        for artifact in support {
            write_artifact(module_root, artifact)?;
            outcome.support_files.push(artifact.path.clone());
        }

        let assets =
            copy_template_assets(&template_repo.root, module_root, &self.config.template_assets)?;
        outcome.support_files.extend(assets);

        let files: Vec<PathBuf> = outcome
            .artifacts
            .iter()
            .chain(outcome.support_files.iter())
            .cloned()
            .collect();
        self.vcs
            .commit(&module_repo, &files, &self.config.commit_message)?;
        outcome.committed = true;
        info!(
            module = module_code,
            artifacts = outcome.artifacts.len(),
            support_files = outcome.support_files.len(),
            "published and committed"
        );
        Ok(outcome)
    }
}

/// Write one artifact under `root`, creating parent directories.
pub fn write_artifact(root: &Path, artifact: &GeneratedArtifact) -> Result<()> {
    artifact::validate_relative_path(&artifact.path)
        .map_err(|e| GenerationError::io(&artifact.path, e))?;
    let path = root.join(&artifact.path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| GenerationError::io(parent, e))?;
    }
    fs::write(&path, &artifact.content).map_err(|e| GenerationError::io(&path, e))?;
    debug!(path = %path.display(), class = %artifact.class_name, "wrote artifact");
    Ok(())
}

/// Copy every file under `template_root` whose path contains one of `assets`
/// to the same relative location under `module_root`.
///
/// `.git` is skipped. Returns the copied paths relative to `module_root`, in
/// file-name order.
pub fn copy_template_assets(
    template_root: &Path,
    module_root: &Path,
    assets: &[String],
) -> Result<Vec<PathBuf>> {
    let mut copied = Vec::new();
    if assets.is_empty() || !template_root.is_dir() {
        debug!(template = %template_root.display(), "no template assets to copy");
        return Ok(copied);
    }

    let walker = WalkDir::new(template_root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.file_name() != ".git");
    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| template_root.to_path_buf());
            GenerationError::io(path, e.into())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(template_root) else {
            continue;
        };
        let relative_str = relative.to_string_lossy();
        if !assets.iter().any(|asset| relative_str.contains(asset.as_str())) {
            continue;
        }

        let target = module_root.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| GenerationError::io(parent, e))?;
        }
        fs::copy(entry.path(), &target).map_err(|e| GenerationError::io(&target, e))?;
        debug!(asset = %relative.display(), "copied template asset");
        copied.push(relative.to_path_buf());
    }
    Ok(copied)
}
