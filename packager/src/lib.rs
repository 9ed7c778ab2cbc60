//! Release packager for ruplacer.
//!
//! This crate turns a ruplacer checkout into publishable release artefacts: it
//! builds the binary, stages it with its documents, archives the staging
//! directory and publishes the archive under `dist/`. On Linux it also builds a
//! Debian package. It backs the `ruplacer-package` binary and can be driven
//! programmatically for tests or custom release workflows.
//!
//! # Modules
//!
//! - [`builder`] - Cargo release build
//! - [`cli`] - Command-line argument definitions
//! - [`command`] - External command execution seam
//! - [`config`] - Pipeline configuration and product discovery
//! - [`deb`] - Debian packaging through `cargo-deb`
//! - [`dist`] - Publication into the `dist/` directory
//! - [`error`] - Error types
//! - [`output`] - Progress and dry-run output
//! - [`pipeline`] - End-to-end orchestration
//! - [`platform`] - Platform resolution and archive format selection
//! - [`release`] - Naming, manifest, archive and checksum
//! - [`stager`] - Staging directory population

pub mod builder;
pub mod cli;
pub mod command;
pub mod config;
pub mod deb;
pub mod dist;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod platform;
pub mod release;
pub mod stager;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
