//! # Projection Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! The core components that turn validated parameters into a project on disk,
//! plus the infrastructure they share.
//!
//! ## Architecture
//!
//! - `config`: The optional user configuration (defaults, template overrides)
//! - `error`: Error types and the `Result` aliases
//! - `project`: `.projection.toml` settings and the derived source/tests directories
//! - `structure`: Declarative structures and the materializer that realizes them
//! - `templating`: The template renderer and the embedded templates
//!
//! ```rust
//! use crate::core::error::{ProjectionError, Result};
//! use crate::core::project::ProjectConfig;
//! use crate::core::structure::{Structure, StructureMaterializer};
//! use crate::core::templating::TemplateRenderer;
//! ```
//!
pub mod config;
pub mod error;
pub mod project;
pub mod structure;
pub mod templating;
