//! # brp-bytecompile Library
//!
//! This library plans byte-compilation for several independently versioned
//! runtimes installed into one package staging tree. It is designed to be
//! used by the `brp-bytecompile` command-line tool during package builds,
//! but the planning pipeline is usable on its own.
//!
//! ## Quick Example
//!
//! ```
//! use brp_bytecompile::config::{ConfigOverrides, RuntimeConfig};
//! use brp_bytecompile::exclusion::exclusions_for;
//! use brp_bytecompile::path::normalize_join;
//! use brp_bytecompile::registry::ConfigRegistry;
//!
//! // Absolute segments are appended, never a reset
//! assert_eq!(normalize_join("/stage", &["/usr/lib"]), "/stage/usr/lib");
//!
//! let main = RuntimeConfig::build(
//!     "python2.7",
//!     ConfigOverrides {
//!         default_for_rootdir: Some("1".to_string()),
//!         ..ConfigOverrides::default()
//!     },
//! )
//! .unwrap();
//! let other = RuntimeConfig::build("python3.4", ConfigOverrides::default()).unwrap();
//! let registry = ConfigRegistry::from_configs(vec![main, other]);
//!
//! // python2.7 compiles the whole tree, minus what python3.4 owns
//! let exclusions = exclusions_for("python2.7", &registry, "/stage");
//! assert!(exclusions.contains(&"/stage/usr/lib/python3.4".to_string()));
//! assert!(!exclusions.contains(&"/stage/usr/lib/python2.7".to_string()));
//! ```
//!
//! ## Core Concepts
//!
//! - **Runtime configs (`config`, `registry`)**: one INI file per runtime,
//!   declaring its root, whether it is the default compiler for that root,
//!   its interpreter and the library directories it owns.
//! - **Validation (`validate`)**: a root may have only one default runtime,
//!   and every staged versioned library directory must be owned by a config.
//! - **Exclusions (`exclusion`)**: the directories a default runtime must
//!   skip because another runtime owns them.
//! - **Planning (`planner`, `template`)**: the compile invocations of every
//!   runtime and the shell commands they render to.
//!
//! ## Execution Flow
//!
//! [`orchestrator::run`] loads the configs, runs both validation checks,
//! plans and renders every runtime's invocations. The binary then hands the
//! commands to a [`runner::CommandRunner`], or only logs them in dry-run
//! mode.

pub mod config;
pub mod defaults;
pub mod diagnostics;
pub mod error;
pub mod exclusion;
pub mod orchestrator;
pub mod path;
pub mod planner;
pub mod registry;
pub mod runner;
pub mod template;
pub mod validate;

#[cfg(test)]
mod path_proptest;
