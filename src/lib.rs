//! daystart scaffolds a dated project directory from a declarative
//! language/template catalog, renders template files against a fixed
//! field set, runs post-create steps and hands the result to an editor.

/// Versioned project-directory allocation
pub mod allocator;

/// Catalog and user-profile data model, decoding and listing
pub mod catalog;

/// Command-line interface module for the daystart application
pub mod cli;

/// Common constants used across modules
pub mod constants;

/// External editor handoff
pub mod editor;

/// Error types and handling for the daystart application
pub mod error;

pub mod logger;

/// Materialization pipeline: directory, files, post-create steps
pub mod processor;

/// Strict template rendering over the fixed context field set
pub mod renderer;

/// Two-tier resource resolution: filesystem override, bundled default
pub mod resources;
