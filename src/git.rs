use crate::error::{GitAiError, Result};
use git2::{Diff, DiffFormat, ErrorCode, Repository, Tree};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

const MESSAGE_HEADER: &str = "# AI-generated commit message. Edit if needed, then save and close to commit.\n# Lines starting with # will be ignored.\n\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffSelection {
    Staged,
    Unstaged,
    LastCommit,
}

pub trait DiffSource {
    fn staged_diff(&self) -> Result<String>;
    fn unstaged_diff(&self) -> Result<String>;
    fn last_commit_diff(&self) -> Result<String>;
}

pub trait Committer {
    fn commit_with_message_file(&self, path: &Path) -> Result<()>;
}

pub fn read_diff(source: &dyn DiffSource, selection: DiffSelection) -> Result<String> {
    let diff = match selection {
        DiffSelection::Staged => source.staged_diff()?,
        DiffSelection::Unstaged => source.unstaged_diff()?,
        DiffSelection::LastCommit => source.last_commit_diff()?,
    };
    debug!(?selection, bytes = diff.len(), "read diff");
    Ok(diff)
}

pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    pub fn discover() -> Result<Self> {
        let repo = Repository::discover(".").map_err(|_| GitAiError::NotAGitRepo)?;
        Ok(Self { repo })
    }

    fn workdir(&self) -> PathBuf {
        self.repo
            .workdir()
            .unwrap_or_else(|| self.repo.path())
            .to_path_buf()
    }

    // None on an unborn branch: the first commit diffs against the empty tree.
    fn head_tree(&self) -> Result<Option<Tree<'_>>> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head.peel_to_tree()?)),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl DiffSource for GitRepo {
    fn staged_diff(&self) -> Result<String> {
        let head_tree = self.head_tree()?;
        let diff = self
            .repo
            .diff_tree_to_index(head_tree.as_ref(), None, None)?;
        patch_text(&diff)
    }

    fn unstaged_diff(&self) -> Result<String> {
        // Tracked files only, like `git diff`.
        let diff = self.repo.diff_index_to_workdir(None, None)?;
        patch_text(&diff)
    }

    fn last_commit_diff(&self) -> Result<String> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                return Err(GitAiError::NoCommits);
            }
            Err(e) => return Err(e.into()),
        };
        let commit = head.peel_to_commit()?;
        let tree = commit.tree()?;
        let parent_tree = match commit.parent_count() {
            0 => None,
            _ => Some(commit.parent(0)?.tree()?),
        };
        let diff = self
            .repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)?;
        patch_text(&diff)
    }
}

impl Committer for GitRepo {
    fn commit_with_message_file(&self, path: &Path) -> Result<()> {
        commit_with_git_cli(&self.workdir(), path)
    }
}

fn patch_text(diff: &Diff<'_>) -> Result<String> {
    let mut text = String::new();
    diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        let origin = line.origin();
        if matches!(origin, '+' | '-' | ' ') {
            text.push(origin);
        }
        text.push_str(&String::from_utf8_lossy(line.content()));
        true
    })?;
    Ok(text)
}

// Removed from disk when the returned path is dropped.
pub fn write_message_file(suggestion: &str) -> Result<tempfile::TempPath> {
    let mut file = tempfile::Builder::new()
        .prefix("git-ai-")
        .suffix(".git-commit")
        .tempfile()?;
    file.write_all(MESSAGE_HEADER.as_bytes())?;
    file.write_all(suggestion.as_bytes())?;
    file.flush()?;
    Ok(file.into_temp_path())
}

// `-F` alone would commit without review; `-e` reopens it in the editor.
// Unlike `--template`, an unedited message is still committed.
pub fn commit_with_git_cli(workdir: &Path, message_file: &Path) -> Result<()> {
    debug!(file = %message_file.display(), "handing message file to git commit");
    let status = Command::new("git")
        .current_dir(workdir)
        .arg("commit")
        .arg("-e")
        .arg("-F")
        .arg(message_file)
        .status()
        .map_err(|e| GitAiError::CommitFailed(format!("Failed to run git commit: {}", e)))?;

    if !status.success() {
        let msg = match status.code() {
            Some(code) => format!("git commit exited with status {}", code),
            None => "git commit was terminated by a signal".to_string(),
        };
        return Err(GitAiError::CommitFailed(msg));
    }

    Ok(())
}
