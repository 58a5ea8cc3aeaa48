//! # Invocation Planning
//!
//! Turns each runtime config into the list of compile invocations it needs:
//! one per staged library directory and flag variant, plus, for a default
//! runtime, one per flag variant covering its whole root minus the
//! exclusion set.
//!
//! Planning only reads the staging tree (existence checks and directory
//! walks to bound the recursion depth). Nothing is executed here.

use std::path::Path;

use log::debug;
use walkdir::WalkDir;

use crate::config::RuntimeConfig;
use crate::error::Result;
use crate::exclusion::{self, ExclusionPattern};
use crate::path;
use crate::registry::ConfigRegistry;

/// A fully resolved compile invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileInvocation {
    /// Interpreter that runs the compilation, as installed.
    pub interpreter: String,
    /// Interpreter flags for this variant.
    pub flags: String,
    /// Directory to compile, inside the staging tree.
    pub target_dir: String,
    /// The same directory as it appears once installed.
    pub real_dir: String,
    /// Maximum recursion depth below `target_dir`.
    pub depth: usize,
    /// Paths to skip, only set for whole-root invocations.
    pub exclude: Option<ExclusionPattern>,
}

/// Every invocation planned for one runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimePlan {
    pub name: String,
    pub invocations: Vec<CompileInvocation>,
}

/// Depth of the deepest entry below `dir`, relative to `dir` itself.
///
/// Symlinks are not followed, so the walk is bounded by the real tree.
pub fn search_depth(dir: &Path) -> Result<usize> {
    let mut deepest = 0;
    for entry in WalkDir::new(dir).follow_links(false) {
        deepest = deepest.max(entry?.depth());
    }
    Ok(deepest)
}

/// Invocations for a single runtime.
///
/// Library directories missing from the staging tree are skipped. The root
/// of a default runtime is always planned, with depth 0 when it is absent.
/// `exclude_dirs` holds escaped fragments as built by
/// [`exclusion::exclusions_for`]. Those that contain the staged root are
/// dropped, since they would exclude the very tree being compiled.
pub fn compile_directives(
    config: &RuntimeConfig,
    staging_root: &str,
    exclude_dirs: &[String],
) -> Result<Vec<CompileInvocation>> {
    let variants = config.flag_variants();
    let mut invocations = Vec::new();

    for real_dir in &config.library_dirs {
        let target_dir = path::staged(staging_root, real_dir);
        let target = Path::new(&target_dir);
        if !target.exists() {
            debug!(
                "Skipping {} for \"{}\": not present in the staging tree",
                real_dir, config.name
            );
            continue;
        }

        let depth = search_depth(target)?;
        for flags in &variants {
            invocations.push(CompileInvocation {
                interpreter: config.interpreter_path.clone(),
                flags: flags.clone(),
                target_dir: target_dir.clone(),
                real_dir: real_dir.clone(),
                depth,
                exclude: None,
            });
        }
    }

    if config.is_default_for_root {
        let target_dir = config.staged_root(staging_root);
        let target = Path::new(&target_dir);
        let depth = if target.exists() {
            search_depth(target)?
        } else {
            0
        };

        let escaped_target = exclusion::escape_fragment(&target_dir);
        let retained: Vec<String> = exclude_dirs
            .iter()
            .filter(|dir| !path::is_ancestor_or_self(dir, &escaped_target))
            .cloned()
            .collect();
        let exclude = ExclusionPattern::new(&retained)?;

        for flags in &variants {
            invocations.push(CompileInvocation {
                interpreter: config.interpreter_path.clone(),
                flags: flags.clone(),
                target_dir: target_dir.clone(),
                real_dir: config.root_dir.clone(),
                depth,
                exclude: exclude.clone(),
            });
        }
    }

    Ok(invocations)
}

/// Plan every runtime in the registry, in name order.
pub fn plan(registry: &ConfigRegistry, staging_root: &str) -> Result<Vec<RuntimePlan>> {
    registry
        .iter()
        .map(|config| {
            let exclusions = exclusion::exclusions_for(&config.name, registry, staging_root);
            Ok(RuntimePlan {
                name: config.name.clone(),
                invocations: compile_directives(config, staging_root, &exclusions)?,
            })
        })
        .collect()
}
