mod args;
mod client;
mod commands;
mod config;
mod error;
mod git;
mod logging;
mod prompt;
mod suggest;

use anyhow::{Context, Result};
use args::{Args, Command};
use clap::Parser;
use client::ChatClient;
use commands::Services;
use git::GitRepo;
use std::io;

fn main() {
    logging::setup_logger();
    let args = Args::parse();

    let code = match run(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            1
        }
    };
    std::process::exit(code);
}

fn run(args: Args) -> Result<i32> {
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();

    match args.command {
        Command::Config(config_args) => {
            let path = config::config_path()?;
            commands::configure(&path, &config_args, &mut stdout)
                .with_context(|| format!("failed to update {}", path.display()))?;
            Ok(0)
        }
        Command::Suggest(suggest_args) => {
            let (repo, client) = open()?;
            let services = Services {
                diffs: &repo,
                generator: &client,
                committer: &repo,
            };
            Ok(commands::suggest(
                &services,
                &suggest_args,
                &mut stdout,
                &mut stderr,
            ))
        }
        Command::Commit => {
            let (repo, client) = open()?;
            let services = Services {
                diffs: &repo,
                generator: &client,
                committer: &repo,
            };
            Ok(commands::commit(&services, &mut stdout, &mut stderr))
        }
    }
}

fn open() -> Result<(GitRepo, ChatClient)> {
    let repo = GitRepo::discover()?;
    let config = config::load().context("failed to load configuration")?;
    Ok((repo, ChatClient::from_config(&config)))
}
