//! # Projection Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! Entry point of the Projection CLI, a scaffolding tool for PHP projects.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Loading the user configuration and the template set
//! - Routing execution to the command handlers and mapping their outcome to
//!   an exit status
//!
//! ## Architecture
//!
//! - Each top-level command is a variant of the `Commands` enum.
//! - Handlers return a `Completion`; a declined confirmation (or closed input
//!   while prompting) prints `Operation aborted.` and exits with status 1.
//! - Errors are propagated to this level, printed with their cause chain on
//!   stderr, and exit with status 1.
//!
//! ## Examples
//!
//! ```bash
//! # Get help
//! projection --help
//!
//! # Generate a project without prompts, with verbose logging
//! projection -v -n generate project --name Blog --author-name "Jane Doe" --author-email jane@example.com
//!
//! # Add a class from inside the project
//! projection g class --name Post/Repository
//! ```
//!
use clap::Parser;
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod common;
mod core;

use crate::commands::generate::{Completion, Session};
use crate::core::error::{ProjectionError, Result};
use crate::core::templating::TemplateRenderer;
use anyhow::Context;

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "projection",
    about = "Projection: scaffolding for PHP projects",
    long_about = "Generates PHP projects (sources, docs, license, PHPUnit setup) and\n\
                  adds classes with matching unit tests to existing projects.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Do not ask any interactive question.
    #[arg(short = 'n', long, global = true)]
    no_interaction: bool,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Generates projects and classes.
    #[command(alias = "g")]
    Generate(commands::generate::GenerateArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    match run(cli) {
        Ok(Completion::Generated) => ExitCode::SUCCESS,
        Ok(Completion::Aborted) => {
            println!("Operation aborted.");
            ExitCode::FAILURE
        }
        Err(e) if is_user_abort(&e) => {
            println!();
            println!("Operation aborted.");
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::debug!("Command execution failed: {:?}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<Completion> {
    let config = crate::core::config::load_config()?;
    let mut renderer = TemplateRenderer::builtin()?;
    if let Some(directory) = config.template_directory() {
        renderer = renderer.with_overrides(&directory)?;
    }
    let cwd = std::env::current_dir().context("Failed to determine the current directory")?;
    let interactive = !cli.no_interaction && std::io::stdin().is_terminal();
    tracing::debug!("Interactive mode: {}", interactive);

    let session = Session {
        cwd,
        renderer: &renderer,
        config: &config,
        interactive,
    };
    match cli.command {
        Commands::Generate(args) => commands::generate::handle_generate(args, &session),
    }
}

fn is_user_abort(error: &anyhow::Error) -> bool {
    matches!(
        error.downcast_ref::<ProjectionError>(),
        Some(ProjectionError::UserAborted)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_cmd::Command;
    use predicates::prelude::*;

    fn projection_cmd() -> Command {
        Command::cargo_bin("projection").expect("Failed to find projection binary for testing")
    }

    #[test]
    fn test_main_help_flag() {
        projection_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("generate"));
    }

    #[test]
    fn test_main_version_flag() {
        projection_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["projection", "g", "class", "-n", "-vv", "--name", "Post"])
            .unwrap();
        assert!(cli.no_interaction);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_user_abort_detection() {
        assert!(is_user_abort(&anyhow::Error::new(ProjectionError::UserAborted)));
        assert!(!is_user_abort(&anyhow::anyhow!("boom")));
    }
}
