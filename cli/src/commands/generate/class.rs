//! # Projection Generate Class Command
//!
//! File: cli/src/commands/generate/class.rs
//!
//! ## Overview
//!
//! Implements `projection generate class`, which adds a PHP class to the
//! project containing the current directory. `--name Post\Repository` (or
//! `Post/Repository`) in a project with namespace `Acme\Blog` writes:
//!
//! - `src/Acme/Blog/Post/Repository.php` from `php/class.php`
//! - `tests/Acme/Blog/Tests/Post/RepositoryTest.php` from `phpunit/test.php`,
//!   only when the project has tests enabled
//!
//! Both templates receive the project settings as `config` and a `class`
//! object with the short name, the sub-namespace and a variable name.
//!
use super::validators::{require, validator_for, Field};
use super::{Completion, Session};
use crate::common::fs::io::DiskWriter;
use crate::common::ui::progress::ReportingWriter;
use crate::common::ui::prompts::Prompter;
use crate::core::error::{ProjectionError, Result};
use crate::core::project::ProjectConfig;
use crate::core::structure::{Structure, StructureMaterializer};
use clap::Parser;
use serde::Serialize;
use std::io::{BufRead, Write};
use tera::Context;
use tracing::{debug, info};

#[derive(Parser, Debug)]
pub struct ClassArgs {
    /// The class name, relative to the project namespace (e.g. Post\Repository).
    #[arg(long)]
    name: Option<String>,
}

/// The `class` object exposed to the class and test templates.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
struct ClassDescriptor {
    name: String,
    namespace: String,
    #[serde(rename = "varName")]
    var_name: String,
}

impl ClassDescriptor {
    /// Splits a validated `\`-separated class name.
    fn from_qualified(qualified: &str) -> Self {
        let (namespace, name) = match qualified.rsplit_once('\\') {
            Some((namespace, name)) => (namespace.to_string(), name.to_string()),
            None => (String::new(), qualified.to_string()),
        };
        let mut chars = name.chars();
        let var_name = match chars.next() {
            Some(first) => first.to_lowercase().chain(chars).collect(),
            None => String::new(),
        };
        Self {
            name,
            namespace,
            var_name,
        }
    }
}

/// Handles `projection generate class`.
pub fn handle_class<R: BufRead, W: Write>(
    args: ClassArgs,
    session: &Session,
    prompter: &mut Prompter<R, W>,
    out: &mut dyn Write,
) -> Result<Completion> {
    let project = ProjectConfig::discover(&session.cwd).map_err(|e| match e {
        ProjectionError::NotAProject { .. } => {
            anyhow::Error::new(e).context("This is not a project directory.")
        }
        other => other.into(),
    })?;
    let settings = project.settings()?;
    debug!("Generating a class in project at {}", project.root().display());

    let mut name = args.name;
    if session.interactive {
        prompter.section("Welcome to the Projection class generator!")?;
        let intro = format!(
            "This task will generate a new class in the {} project,",
            settings.project.name
        );
        prompter.text(&[
            "",
            &intro,
            "along with its unit test if the project uses them.",
            "",
        ])?;
        name = Some(prompter.ask_and_validate(
            "Class name",
            name.as_deref(),
            validator_for(Field::ClassName),
        )?);
    }
    let name = require(Field::ClassName, name.as_deref())?;

    if session.interactive {
        prompter.text(&[""])?;
        if !prompter.confirm("Do you confirm generation", true)? {
            info!("Class generation declined by the user.");
            return Ok(Completion::Aborted);
        }
    }

    let class_path = name.replace('\\', "/");
    let source_path = format!("{}/{}.php", project.source_directory()?, class_path);
    let mut structure = Structure::new().file(source_path.as_str(), "php/class.php");
    if settings.tests_enabled() {
        structure = structure.file(
            format!("{}/{}Test.php", project.tests_directory()?, class_path),
            "phpunit/test.php",
        );
    }

    let mut context = Context::new();
    context.insert("config", settings);
    context.insert("class", &ClassDescriptor::from_qualified(&name));

    writeln!(out)?;
    let mut writer = ReportingWriter::new(DiskWriter::new(project.root()), &mut *out);
    StructureMaterializer::new(session.renderer).materialize(
        &mut writer,
        "/",
        &structure,
        &context,
    )?;

    writeln!(out)?;
    writeln!(out, "Class {} has been created in {}.", name, source_path)?;
    info!("Class '{}' generated in {}", name, project.root().display());
    Ok(Completion::Generated)
}
