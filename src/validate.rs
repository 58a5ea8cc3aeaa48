//! # Ownership Validation
//!
//! Two independent checks run over the whole registry before anything is
//! planned:
//!
//! - **Root conflicts**: a root may have at most one default runtime.
//! - **Orphan library dirs**: every staged versioned library directory must
//!   be claimed by some config.
//!
//! [`check`] always runs both and reports every finding before deciding the
//! outcome, so one run shows the operator the complete list of problems.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::defaults::LIBDIR_GLOBS;
use crate::diagnostics::{Diagnostic, DiagnosticKind, Reporter};
use crate::error::{Error, Result};
use crate::path;
use crate::registry::ConfigRegistry;

/// Roots claimed by two or more default runtimes, with the sorted names of
/// the claimants.
pub fn root_conflicts(registry: &ConfigRegistry) -> BTreeMap<String, Vec<String>> {
    let mut claims: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for config in registry.iter().filter(|config| config.is_default_for_root) {
        claims
            .entry(path::normalize(&config.root_dir))
            .or_default()
            .push(config.name.clone());
    }

    claims.retain(|_, names| names.len() > 1);
    for names in claims.values_mut() {
        names.sort();
    }
    claims
}

/// Staged versioned library directories that no config claims, sorted.
pub fn orphan_libdirs(registry: &ConfigRegistry, staging_root: &str) -> Result<Vec<String>> {
    let escaped_root = glob::Pattern::escape(path::normalize(staging_root).trim_end_matches('/'));

    let mut staged = BTreeSet::new();
    for libdir_glob in LIBDIR_GLOBS {
        let pattern = format!("{}/{}", escaped_root, libdir_glob);
        for entry in glob::glob(&pattern)? {
            let dir = entry.map_err(|e| Error::Io(e.into()))?;
            if dir.is_dir() {
                staged.insert(path::normalize(&dir.to_string_lossy()));
            }
        }
    }

    let claimed: HashSet<String> = registry
        .iter()
        .flat_map(|config| config.staged_library_dirs(staging_root))
        .collect();

    Ok(staged
        .into_iter()
        .filter(|dir| !claimed.contains(dir))
        .collect())
}

/// Run both ownership checks, reporting every finding to `reporter`.
///
/// A root conflict takes precedence over orphaned directories when both are
/// found, and over a failure to scan the staging tree for library dirs.
pub fn check(
    registry: &ConfigRegistry,
    staging_root: &str,
    reporter: &mut dyn Reporter,
) -> Result<()> {
    let conflicts = root_conflicts(registry);
    let orphans = orphan_libdirs(registry, staging_root);
    classify(conflicts, orphans, reporter)
}

fn classify(
    conflicts: BTreeMap<String, Vec<String>>,
    orphans: Result<Vec<String>>,
    reporter: &mut dyn Reporter,
) -> Result<()> {
    if !conflicts.is_empty() {
        reporter.report(Diagnostic::error(
            DiagnosticKind::RootConflict,
            "Error: following roots are to be compiled by multiple default runtimes:",
        ));
        for (root, names) in &conflicts {
            reporter.report(Diagnostic::error(
                DiagnosticKind::RootConflict,
                format!("\"{}\": {}", root, names.join(", ")),
            ));
        }
    }

    let orphans = match orphans {
        Ok(orphans) => orphans,
        Err(e) if !conflicts.is_empty() => {
            reporter.report(Diagnostic::error(
                DiagnosticKind::OrphanLibdir,
                format!("Failed to scan for library dirs: {}", e),
            ));
            return Err(Error::RootConflict { roots: conflicts });
        }
        Err(e) => return Err(e),
    };
    if !orphans.is_empty() {
        reporter.report(Diagnostic::error(
            DiagnosticKind::OrphanLibdir,
            "Error: there are library dirs not associated with any runtime:",
        ));
        for dir in &orphans {
            reporter.report(Diagnostic::error(DiagnosticKind::OrphanLibdir, dir.clone()));
        }
    }

    if !conflicts.is_empty() {
        return Err(Error::RootConflict { roots: conflicts });
    }
    if !orphans.is_empty() {
        return Err(Error::OrphanLibdir { dirs: orphans });
    }
    Ok(())
}
