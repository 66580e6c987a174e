//! # Projection Generate Command Group
//!
//! File: cli/src/commands/generate/mod.rs
//!
//! ## Overview
//!
//! Entry point and router for `projection generate`. Two subcommands exist:
//! `project` scaffolds a new PHP project in a subdirectory of the current
//! directory, `class` adds a class (and its test stub) to the project that
//! contains the current directory.
//!
//! ## Architecture
//!
//! - `GenerateArgs` / `GenerateCommand`: the clap surface of the group.
//! - [`Session`]: what every handler needs from `main` (working directory,
//!   template renderer, user configuration, interactivity).
//! - [`Completion`]: handlers report whether they generated something or the
//!   user declined the confirmation, so `main` can pick the exit status.
//! - `validators`: the parameter checks shared by both subcommands.
//!
//! Handlers are generic over the prompter's input/output and the stream that
//! receives progress lines, so tests drive them with in-memory buffers.
//!
//! ## Examples
//!
//! ```bash
//! projection generate project --name Blog --author-name "Jane Doe" --author-email jane@example.com
//! cd Blog && projection g class --name Post/Repository
//! ```
//!
use crate::common::ui::prompts::Prompter;
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::templating::TemplateRenderer;
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use tracing::debug;

mod class;
mod project;
pub mod validators;

#[derive(Parser, Debug)]
pub struct GenerateArgs {
    #[command(subcommand)]
    command: GenerateCommand,
}

#[derive(Subcommand, Debug)]
enum GenerateCommand {
    /// Generates a new project.
    Project(project::ProjectArgs),
    /// Generates a new class in the current project.
    Class(class::ClassArgs),
}

/// Outcome of a generate command that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Generated,
    /// The user declined the confirmation; nothing was written.
    Aborted,
}

/// Shared state handed to the generate handlers.
pub struct Session<'a> {
    /// Directory the command was started from.
    pub cwd: PathBuf,
    pub renderer: &'a TemplateRenderer,
    pub config: &'a Config,
    /// Whether to prompt for values and ask for confirmation.
    pub interactive: bool,
}

/// Routes `projection generate <subcommand>` using stdin/stdout.
pub fn handle_generate(args: GenerateArgs, session: &Session) -> Result<Completion> {
    debug!("Generate command: {:?}", args.command);
    let mut prompter = Prompter::stdio();
    let mut stdout = io::stdout();
    match args.command {
        GenerateCommand::Project(args) => {
            project::handle_project(args, session, &mut prompter, &mut stdout)
        }
        GenerateCommand::Class(args) => {
            class::handle_class(args, session, &mut prompter, &mut stdout)
        }
    }
}
