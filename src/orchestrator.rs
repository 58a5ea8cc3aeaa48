//! Orchestrator for a complete byte-compilation run
//!
//! This module coordinates every stage of a run behind one call:
//! 1. Normalize the staging root (a root of `/` means there is nothing to do)
//! 2. Load every runtime config from the config directory
//! 3. Validate root ownership and staged library directories
//! 4. Plan each runtime's invocations against the other runtimes' exclusions
//! 5. Render every invocation into its shell command
//!
//! Executing the commands is left to [`crate::runner`].

use std::path::PathBuf;

use log::debug;

use crate::diagnostics::{Diagnostic, DiagnosticKind, Reporter};
use crate::error::Result;
use crate::path;
use crate::planner;
use crate::registry::ConfigRegistry;
use crate::template;
use crate::validate;

/// Inputs of a run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Absolute path of the staging tree.
    pub staging_root: String,
    /// Directory holding the `*.conf` runtime configs.
    pub config_dir: PathBuf,
}

/// Shell commands planned for one runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPlan {
    pub name: String,
    pub commands: Vec<String>,
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The staging root is `/`, so there is no package tree to compile.
    NothingToDo,
    /// Commands for every loaded runtime, in name order.
    Planned(Vec<RenderedPlan>),
}

/// Execute the full planning pipeline.
///
/// Config files that fail to load are reported as warnings and left out of
/// the run. Root conflicts and orphaned library directories are reported in
/// full before the matching error is returned.
pub fn run(options: &RunOptions, reporter: &mut dyn Reporter) -> Result<Outcome> {
    let staging_root = path::normalize(&options.staging_root);
    if staging_root == "/" {
        debug!("Staging root is /, nothing to compile");
        return Ok(Outcome::NothingToDo);
    }

    let report = ConfigRegistry::load(&options.config_dir);
    for error in report.errors {
        reporter.report(Diagnostic::warning(DiagnosticKind::ConfigLoad, error.to_string()));
    }
    let registry = report.registry;
    debug!(
        "Loaded {} runtime config(s) from {}",
        registry.len(),
        options.config_dir.display()
    );

    validate::check(&registry, &staging_root, reporter)?;

    let mut rendered = Vec::new();
    for plan in planner::plan(&registry, &staging_root)? {
        let Some(config) = registry.get(&plan.name) else {
            continue;
        };
        let commands = plan
            .invocations
            .iter()
            .map(|invocation| template::render(config, invocation))
            .collect::<Result<Vec<_>>>()?;
        rendered.push(RenderedPlan {
            name: plan.name,
            commands,
        });
    }

    Ok(Outcome::Planned(rendered))
}
