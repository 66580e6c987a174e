//! # Projection Generate Project Command
//!
//! File: cli/src/commands/generate/project.rs
//!
//! ## Overview
//!
//! Implements `projection generate project`, which creates a new PHP project
//! below the current directory:
//!
//! ```text
//! Blog/
//! ├── .projection.toml
//! ├── LICENSE
//! ├── README.md
//! ├── doc/
//! ├── phpunit.xml.dist          (unless --no-tests)
//! ├── src/Acme/Blog/
//! └── tests/Acme/Blog/Tests/    (unless --no-tests)
//!     └── TestCase.php
//! ```
//!
//! ## Architecture
//!
//! 1. Command-line values are merged with the user configuration defaults and
//!    the built-in defaults into a [`ProjectAnswers`].
//! 2. In interactive mode every value is asked for, with the merged value as
//!    the default, and invalid answers are asked again.
//! 3. All values are validated before anything touches the filesystem. A
//!    missing required value fails with `MissingOption`.
//! 4. In interactive mode the user confirms; declining returns
//!    [`Completion::Aborted`] without writing anything.
//! 5. Directories are materialized, `.projection.toml` is saved, then the
//!    templated files are rendered with the settings as `config`.
//!
//! Every creation goes through a `ReportingWriter`, so each new directory and
//! file is printed as it appears.
//!
use super::validators::{require, validator_for, Field};
use super::{Completion, Session};
use crate::common::fs::io::DiskWriter;
use crate::common::ui::progress::ReportingWriter;
use crate::common::ui::prompts::Prompter;
use crate::core::config::DefaultsConfig;
use crate::core::error::{ProjectionError, ProjectionResult, Result};
use crate::core::project::{
    AuthorSection, DirSection, LicenseKind, LicenseSection, ProjectConfig, ProjectSection,
    ProjectSettings,
};
use crate::core::structure::{Structure, StructureMaterializer};
use anyhow::Context as _;
use chrono::Datelike;
use clap::Parser;
use std::io::{BufRead, Write};
use tera::Context;
use tracing::{debug, info};

const DEFAULT_LICENSE: &str = "mit";
const DEFAULT_SRC_DIR: &str = "src";
const DEFAULT_DOCS_DIR: &str = "doc";
const DEFAULT_TESTS_DIR: &str = "tests";

#[derive(Parser, Debug)]
pub struct ProjectArgs {
    /// Your new project's name.
    #[arg(long)]
    name: Option<String>,

    /// The project's directory, relative to the current one (defaults to the name).
    #[arg(long)]
    dir: Option<String>,

    /// The project's PHP namespace (defaults to the name without spaces).
    #[arg(long)]
    namespace: Option<String>,

    /// The author's name.
    #[arg(long)]
    author_name: Option<String>,

    /// The author's email.
    #[arg(long)]
    author_email: Option<String>,

    /// The license to use (gpl, mit, lgpl).
    #[arg(long)]
    license: Option<String>,

    /// The year(s) the license applies to, e.g. 2024 or 2012-2024.
    #[arg(long)]
    license_years: Option<String>,

    /// The source directory.
    #[arg(long)]
    src_dir: Option<String>,

    /// The documentation directory.
    #[arg(long)]
    docs_dir: Option<String>,

    /// Never generate unit tests for this project.
    #[arg(long)]
    no_tests: bool,

    /// The tests directory (ignored with --no-tests).
    #[arg(long)]
    tests_dir: Option<String>,
}

/// The values `generate project` works with, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ProjectAnswers {
    name: Option<String>,
    dir: Option<String>,
    namespace: Option<String>,
    author_name: Option<String>,
    author_email: Option<String>,
    license: String,
    license_years: String,
    src_dir: String,
    docs_dir: String,
    tests: bool,
    tests_dir: String,
}

/// A validated project, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ProjectPlan {
    directory: String,
    settings: ProjectSettings,
}

impl ProjectAnswers {
    /// Command-line values first, then user defaults, then built-ins.
    fn resolve(args: ProjectArgs, defaults: &DefaultsConfig) -> Self {
        let pick = |arg: Option<String>, configured: &Option<String>, builtin: &str| {
            arg.or_else(|| configured.clone())
                .unwrap_or_else(|| builtin.to_string())
        };
        Self {
            name: args.name,
            dir: args.dir,
            namespace: args.namespace,
            author_name: args.author_name.or_else(|| defaults.author_name.clone()),
            author_email: args.author_email.or_else(|| defaults.author_email.clone()),
            license: pick(args.license, &defaults.license, DEFAULT_LICENSE),
            license_years: args.license_years.unwrap_or_else(current_year),
            src_dir: pick(args.src_dir, &defaults.src_dir, DEFAULT_SRC_DIR),
            docs_dir: pick(args.docs_dir, &defaults.docs_dir, DEFAULT_DOCS_DIR),
            tests: !args.no_tests,
            tests_dir: pick(args.tests_dir, &defaults.tests_dir, DEFAULT_TESTS_DIR),
        }
    }

    fn default_dir(&self) -> Option<String> {
        self.dir.clone().or_else(|| self.name.clone())
    }

    fn default_namespace(&self) -> Option<String> {
        self.namespace
            .clone()
            .or_else(|| self.name.as_ref().map(|name| name.replace(' ', "")))
    }

    /// Validates every value, in the order the options are documented.
    fn into_plan(self) -> ProjectionResult<ProjectPlan> {
        for (field, value) in [
            (Field::ProjectName, &self.name),
            (Field::AuthorName, &self.author_name),
            (Field::AuthorEmail, &self.author_email),
        ] {
            if value.is_none() {
                return Err(ProjectionError::MissingOption(
                    field.option_name().to_string(),
                ));
            }
        }

        let name = require(Field::ProjectName, self.name.as_deref())?;
        let directory = require(Field::Directory, self.default_dir().as_deref())?;
        let namespace = require(Field::Namespace, self.default_namespace().as_deref())?;
        let author_name = require(Field::AuthorName, self.author_name.as_deref())?;
        let author_email = require(Field::AuthorEmail, self.author_email.as_deref())?;
        let license: LicenseKind = require(Field::License, Some(self.license.as_str()))?.parse()?;
        let years = require(Field::LicenseYears, Some(self.license_years.as_str()))?;
        let src_dir = require(Field::Directory, Some(self.src_dir.as_str()))?;
        let docs_dir = require(Field::Directory, Some(self.docs_dir.as_str()))?;
        let tests = if self.tests {
            Some(DirSection {
                dir: require(Field::Directory, Some(self.tests_dir.as_str()))?,
            })
        } else {
            None
        };

        Ok(ProjectPlan {
            directory,
            settings: ProjectSettings {
                tests,
                project: ProjectSection { name, namespace },
                author: AuthorSection {
                    name: author_name,
                    email: author_email,
                },
                license: LicenseSection {
                    kind: license,
                    years,
                },
                src: DirSection { dir: src_dir },
                docs: DirSection { dir: docs_dir },
            },
        })
    }
}

fn current_year() -> String {
    chrono::Local::now().year().to_string()
}

/// Handles `projection generate project`.
pub fn handle_project<R: BufRead, W: Write>(
    args: ProjectArgs,
    session: &Session,
    prompter: &mut Prompter<R, W>,
    out: &mut dyn Write,
) -> Result<Completion> {
    let mut answers = ProjectAnswers::resolve(args, &session.config.defaults);
    debug!("Resolved project answers: {:?}", answers);

    if session.interactive {
        interact(&mut answers, prompter)?;
    }

    let plan = answers.into_plan()?;
    debug!("Validated project plan: {:?}", plan);

    if session.interactive {
        prompter.text(&[""])?;
        if !prompter.confirm("Do you confirm generation", true)? {
            info!("Project generation declined by the user.");
            return Ok(Completion::Aborted);
        }
    }

    let name = plan.settings.project.name.clone();
    let directory = plan.directory.clone();
    let root = session.cwd.join(&directory);

    writeln!(out)?;
    create_project(plan, session, out)
        .with_context(|| format!("Failed to generate project \"{}\"", name))?;

    writeln!(out)?;
    writeln!(out, "Project {} created in {}.", name, directory)?;
    if let Some(relative) = pathdiff::diff_paths(&root, &session.cwd) {
        writeln!(out, "\nNext steps:\n  cd {}", relative.display())?;
    }
    info!("Project '{}' generated at {}", name, root.display());
    Ok(Completion::Generated)
}

fn create_project(plan: ProjectPlan, session: &Session, out: &mut dyn Write) -> Result<()> {
    let root = session.cwd.join(&plan.directory);
    let mut project = ProjectConfig::new(&root);
    project.set_settings(plan.settings);
    let settings = project.settings()?;
    let materializer = StructureMaterializer::new(session.renderer);
    let mut writer = ReportingWriter::new(DiskWriter::new(&root), &mut *out);

    let mut directories = Structure::new()
        .directory("/")
        .directory(settings.src.dir.as_str())
        .directory(project.source_directory()?)
        .directory(settings.docs.dir.as_str());
    if let Some(tests) = &settings.tests {
        directories = directories
            .directory(tests.dir.as_str())
            .directory(project.tests_directory()?);
    }
    materializer.materialize(&mut writer, "/", &directories, &Context::new())?;

    project.save(&mut writer)?;

    let mut files = Structure::new()
        .file("/README.md", "txt/README.md")
        .file("/LICENSE", settings.license.kind.template_id());
    if settings.tests_enabled() {
        files = files
            .file("/phpunit.xml.dist", "phpunit/phpunit.xml.dist")
            .file(
                format!("{}/TestCase.php", project.tests_directory()?),
                "phpunit/TestCase.php",
            );
    }
    let mut context = Context::new();
    context.insert("config", settings);
    materializer.materialize(&mut writer, "/", &files, &context)?;
    Ok(())
}

fn ask<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    question: &str,
    default: Option<&str>,
    field: Field,
) -> ProjectionResult<String> {
    prompter.ask_and_validate(question, default, validator_for(field))
}

fn interact<R: BufRead, W: Write>(
    answers: &mut ProjectAnswers,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    prompter.section("Welcome to the Projection project generator!")?;
    prompter.text(&[
        "All your work as a PHP developer is split into projects.",
        "Each project is a separate application with its own author,",
        "license, source code, unit tests and so on.",
        "",
        "This command will allow you to generate a new project.",
        "",
    ])?;

    let name = ask(prompter, "Project name", answers.name.as_deref(), Field::ProjectName)?;
    answers.name = Some(name);
    let dir = ask(
        prompter,
        "Project directory",
        answers.default_dir().as_deref(),
        Field::Directory,
    )?;
    answers.dir = Some(dir);
    let namespace = ask(
        prompter,
        "Project namespace",
        answers.default_namespace().as_deref(),
        Field::Namespace,
    )?;
    answers.namespace = Some(namespace);

    prompter.text(&[
        "",
        "Would you mind telling us about yourself? We will use this",
        "info to write license information and API documentation",
        "for your project.",
        "",
    ])?;
    let author_name = ask(
        prompter,
        "Author name",
        answers.author_name.as_deref(),
        Field::AuthorName,
    )?;
    answers.author_name = Some(author_name);
    let author_email = ask(
        prompter,
        "Author email",
        answers.author_email.as_deref(),
        Field::AuthorEmail,
    )?;
    answers.author_email = Some(author_email);

    prompter.text(&[
        "",
        "Now decide which license your project will be released under.",
        "We strongly recommend the MIT license.",
        "",
    ])?;
    answers.license = ask(prompter, "License type", Some(answers.license.as_str()), Field::License)?;
    answers.license_years = ask(
        prompter,
        "License year(s)",
        Some(answers.license_years.as_str()),
        Field::LicenseYears,
    )?;

    prompter.text(&[
        "",
        "It is time to decide where your project files will be stored.",
        "Keep the default settings unless you have special requirements.",
        "",
    ])?;
    answers.src_dir = ask(prompter, "Source directory", Some(answers.src_dir.as_str()), Field::Directory)?;
    answers.docs_dir = ask(
        prompter,
        "Documentation directory",
        Some(answers.docs_dir.as_str()),
        Field::Directory,
    )?;

    prompter.text(&[
        "",
        "Almost done! Choose whether the project will use unit tests.",
        "",
    ])?;
    answers.tests = prompter.confirm("Do you want to use unit tests", answers.tests)?;
    if answers.tests {
        answers.tests_dir = ask(
            prompter,
            "Tests directory",
            Some(answers.tests_dir.as_str()),
            Field::Directory,
        )?;
    }
    Ok(())
}
