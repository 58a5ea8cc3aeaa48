//! # Error Handling
//!
//! This module defines the centralized error type for `brp-bytecompile`. It
//! uses the `thiserror` library to describe every failure the planner can
//! hit, from a single malformed config file up to the run-terminating
//! ownership checks.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Configuration problems (`ConfigLoad`,
//!   `ConfigValue`) are isolated per file and surface as diagnostics, while
//!   `RootConflict` and `OrphanLibdir` terminate the run with their own exit
//!   codes.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! - **`exit_codes`**: The process exit codes the binary maps errors onto.

use std::collections::BTreeMap;

use thiserror::Error;

/// Process exit codes used by the `brp-bytecompile` binary.
pub mod exit_codes {
    /// The run finished (or had nothing to do).
    pub const SUCCESS: i32 = 0;
    /// Any failure without a dedicated code.
    pub const FAILURE: i32 = 1;
    /// A root directory is claimed by more than one default runtime.
    pub const ROOT_CONFLICT: i32 = 10;
    /// A staged runtime library directory has no governing config.
    pub const ORPHAN_LIBDIR: i32 = 11;
}

/// Main error type for brp-bytecompile operations
#[derive(Error, Debug)]
pub enum Error {
    /// A config file could not be read or parsed.
    ///
    /// Loading continues with the remaining files; these errors are reported
    /// as diagnostics rather than aborting the run.
    #[error("Failed to load config {path}: {message}")]
    ConfigLoad { path: String, message: String },

    /// A config field is present but malformed.
    #[error("Invalid value for '{key}' in config '{name}': {message}")]
    ConfigValue {
        name: String,
        key: String,
        message: String,
    },

    /// One or more roots are claimed by several default runtimes.
    ///
    /// Maps each contested root to the sorted names of its claimants.
    #[error("{} root(s) claimed as default by multiple runtimes: {}", roots.len(), format_roots(roots))]
    RootConflict { roots: BTreeMap<String, Vec<String>> },

    /// Staged library directories that no config claims.
    #[error("{} library dir(s) not associated with any runtime: {}", dirs.len(), dirs.join(", "))]
    OrphanLibdir { dirs: Vec<String> },

    /// A command template could not be rendered.
    #[error("Template processing error: {message}{}", variable.as_ref().map(|v| format!(" (variable: {})", v)).unwrap_or_default())]
    Template {
        message: String,
        /// The template variable that caused the error, if applicable
        variable: Option<String>,
    },

    /// A compile command exited unsuccessfully.
    #[error("Command from config '{name}' failed ({status}): {command}")]
    CommandFailed {
        name: String,
        command: String,
        status: String,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// A directory walk error, wrapped from `walkdir::Error`.
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

impl Error {
    /// The process exit code this error maps to.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::RootConflict { .. } => exit_codes::ROOT_CONFLICT,
            Error::OrphanLibdir { .. } => exit_codes::ORPHAN_LIBDIR,
            _ => exit_codes::FAILURE,
        }
    }
}

fn format_roots(roots: &BTreeMap<String, Vec<String>>) -> String {
    roots
        .iter()
        .map(|(root, names)| format!("\"{}\": {}", root, names.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
