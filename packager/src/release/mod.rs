//! Release artefact naming, manifest, archiving and checksums.
//!
//! # Sub-modules
//!
//! - [`archive`] - Zip and gzip-tar writers rooted at the staging directory.
//! - [`checksum`] - SHA-256 digests and `.sha256` sidecar files.
//! - [`manifest`] - The fixed set of files every release contains.
//! - [`naming`] - Version newtype and `<product>-<version>-<platform>` names.

pub mod archive;
pub mod checksum;
pub mod manifest;
pub mod naming;
