//! # Projection Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout Projection. Core
//! components (templating, filesystem writing, structure materialization and
//! project configuration) return the typed [`ProjectionError`]; command handlers
//! work with [`Result`], an alias for `anyhow::Result`, and add context as the
//! error travels up to `main`.
//!
//! ## Architecture
//!
//! The error kinds map onto the failure domains of the tool:
//! - Parameter validation (`Validation`, `MissingOption`)
//! - Project configuration (`NotAProject`, `InvalidConfig`, `MissingConfiguration`, `ConfigSerialize`)
//! - Templates (`TemplateNotFound`, `Render`)
//! - Filesystem (`DirectoryCreation`, `FileWrite`)
//! - Positional wrapping applied by the structure materializer (`Item`)
//! - Interactive confirmation declined (`UserAborted`)
//!
//! ## Examples
//!
//! ```rust
//! // Typed failure in a core component
//! return Err(ProjectionError::TemplateNotFound { name: id.to_string() });
//!
//! // Detecting an abort at the command layer
//! if let Some(ProjectionError::UserAborted) = err.downcast_ref::<ProjectionError>() {
//!     println!("Operation aborted.");
//! }
//! ```
//!
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for Projection.
#[derive(Error, Debug)]
pub enum ProjectionError {
    #[error("{0}")]
    Validation(String),

    #[error("The \"{0}\" option must be provided.")]
    MissingOption(String),

    #[error("\"{path}\" is not a project path (\"{config_path}\" does not exist).")]
    NotAProject { path: PathBuf, config_path: PathBuf },

    #[error("Cannot parse \"{path}\": {reason}")]
    InvalidConfig { path: PathBuf, reason: String },

    #[error("Missing project configuration: {0}")]
    MissingConfiguration(String),

    #[error("Cannot serialize project configuration")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Cannot load template \"{name}\".")]
    TemplateNotFound { name: String },

    #[error("Cannot render template \"{name}\"")]
    Render {
        name: String,
        #[source]
        source: tera::Error,
    },

    #[error("Cannot create directory \"{directory}\" in \"{}\"", .root.display())]
    DirectoryCreation {
        directory: String,
        root: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot create file \"{path}\" in \"{}\"", .root.display())]
    FileWrite {
        path: String,
        root: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot create item \"{item}\" in \"{base}\"")]
    Item {
        item: String,
        base: String,
        #[source]
        source: Box<ProjectionError>,
    },

    #[error("Operation aborted.")]
    UserAborted,
}

impl ProjectionError {
    /// Shorthand for a [`ProjectionError::Validation`] with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        ProjectionError::Validation(message.into())
    }

    /// Returns the innermost error, skipping any positional `Item` wrappers.
    #[cfg(test)]
    pub fn root_cause(&self) -> &ProjectionError {
        match self {
            ProjectionError::Item { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Result alias for core components that fail with a typed [`ProjectionError`].
pub type ProjectionResult<T> = std::result::Result<T, ProjectionError>;

/// Type alias for Result using anyhow::Error, used by command handlers.
pub type Result<T> = anyhow::Result<T>;
