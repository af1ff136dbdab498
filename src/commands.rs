use crate::args::{ConfigArgs, SuggestArgs};
use crate::config;
use crate::error::Result;
use crate::git::{Committer, DiffSelection, DiffSource, read_diff, write_message_file};
use crate::suggest::{StyleHints, Suggestion, TextGenerator, suggest_commit};
use std::io::Write;
use std::path::Path;
use tracing::info;

pub struct Services<'a> {
    pub diffs: &'a dyn DiffSource,
    pub generator: &'a dyn TextGenerator,
    pub committer: &'a dyn Committer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed,
    NothingToCommit,
}

pub fn suggest(
    services: &Services<'_>,
    args: &SuggestArgs,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32 {
    let result = run_suggest(services, args, out).map(|()| 0);
    finish(result, err)
}

// An empty staged diff is a failure here, unlike `suggest`.
pub fn commit(services: &Services<'_>, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    let result = run_commit(services, out).map(|outcome| match outcome {
        CommitOutcome::Committed => 0,
        CommitOutcome::NothingToCommit => 1,
    });
    finish(result, err)
}

fn finish(result: Result<i32>, err: &mut dyn Write) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            let _ = writeln!(err, "Error: {e}");
            1
        }
    }
}

pub fn run_suggest(services: &Services<'_>, args: &SuggestArgs, out: &mut dyn Write) -> Result<()> {
    let diff = read_diff(services.diffs, args.selection())?;
    let suggestion = suggest_commit(services.generator, &diff, &args.style_hints())?;
    writeln!(out, "{suggestion}")?;
    Ok(())
}

pub fn run_commit(services: &Services<'_>, out: &mut dyn Write) -> Result<CommitOutcome> {
    writeln!(out, "Analyzing changes and generating commit message...")?;
    let diff = read_diff(services.diffs, DiffSelection::Staged)?;

    let message = match suggest_commit(services.generator, &diff, &StyleHints::default())? {
        Suggestion::Message(message) => message,
        Suggestion::NoChanges => {
            writeln!(out, "{}", Suggestion::NoChanges)?;
            return Ok(CommitOutcome::NothingToCommit);
        }
    };

    writeln!(out, "Opening editor with the suggested message...")?;
    out.flush()?;

    // Deleted when dropped, after git has returned.
    let message_file = write_message_file(&message)?;
    services.committer.commit_with_message_file(&message_file)?;
    info!("commit created");
    Ok(CommitOutcome::Committed)
}

pub fn configure(path: &Path, args: &ConfigArgs, out: &mut dyn Write) -> Result<()> {
    let mut stored = config::load_from(path)?;

    if args.is_empty() {
        let key = config::effective_api_key(&stored)
            .map(|key| config::mask_key(&key))
            .unwrap_or_else(|| "(not set)".to_string());
        writeln!(out, "config file: {}", path.display())?;
        writeln!(out, "api_key:     {key}")?;
        writeln!(out, "model:       {}", config::effective_model(&stored))?;
        writeln!(out, "api_url:     {}", stored.api_url())?;
        return Ok(());
    }

    if let Some(key) = &args.api_key {
        stored.api_key = Some(key.clone());
    }
    if let Some(model) = &args.model {
        stored.model = Some(model.clone());
    }
    if let Some(url) = &args.api_url {
        stored.api_url = Some(url.clone());
    }
    config::save_to(path, &stored)?;
    writeln!(out, "Saved configuration to {}", path.display())?;
    Ok(())
}
