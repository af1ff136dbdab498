use clap::{Parser, Subcommand};

use crate::git::DiffSelection;
use crate::suggest::StyleHints;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "git-ai",
    version,
    about = "Git AI plugin for intelligent commit messages",
    long_about = "Reads the current diff, asks a text-generation service for a commit message, and either prints it or opens it in your commit editor. Installed on PATH as git-ai, it runs as `git ai`."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create a commit using an AI-generated message from staged changes.
    Commit,
    /// Suggest a commit message with customizable options.
    ///
    /// Extra context can be given as a free-form argument:
    /// git ai suggest "make it focus on the security aspects"
    Suggest(SuggestArgs),
    /// Show or update the stored configuration.
    Config(ConfigArgs),
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct SuggestArgs {
    #[arg(long, overrides_with = "unstaged", help = "Use staged changes (default)")]
    pub staged: bool,

    #[arg(long, overrides_with = "staged", help = "Use unstaged changes")]
    pub unstaged: bool,

    #[arg(long, help = "Use last commit instead of changes")]
    pub last: bool,

    #[arg(long, help = "Generate a shorter message")]
    pub shorter: bool,

    #[arg(long, help = "Generate a more detailed message")]
    pub longer: bool,

    #[arg(help = "Free-form context for the message")]
    pub context: Option<String>,
}

impl SuggestArgs {
    // --last wins over the staged/unstaged pair.
    pub fn selection(&self) -> DiffSelection {
        if self.last {
            DiffSelection::LastCommit
        } else if self.unstaged {
            DiffSelection::Unstaged
        } else {
            DiffSelection::Staged
        }
    }

    pub fn style_hints(&self) -> StyleHints {
        StyleHints {
            shorter: self.shorter,
            longer: self.longer,
            context: self.context.clone(),
        }
    }
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    #[arg(long, help = "Store the API key used for the completion service")]
    pub api_key: Option<String>,

    #[arg(long, help = "Store the model name sent with each request")]
    pub model: Option<String>,

    #[arg(long, help = "Store an OpenAI-compatible chat completions URL")]
    pub api_url: Option<String>,
}

impl ConfigArgs {
    pub fn is_empty(&self) -> bool {
        self.api_key.is_none() && self.model.is_none() && self.api_url.is_none()
    }
}
