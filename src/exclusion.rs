//! Exclusion sets for whole-tree compilation
//!
//! A default runtime compiles its entire root, so it has to skip whatever
//! belongs to other runtimes: their roots when they are default for one,
//! and their library directories always. On top of that, executable
//! directories and any versioned runtime library directory are skipped.
//!
//! The base fragments carry no staging prefix. The resulting regex is
//! searched anywhere in a path, so `/usr/lib/python[0-9].[0-9]` also catches
//! library directories nested inside alternate roots.
//!
//! Staged paths are escaped with [`escape_fragment`] before they join the
//! set, so a build root such as `.../BUILDROOT/gtk+-2.24` stays a literal.
//! Only `.` keeps its wildcard meaning.

use std::collections::BTreeSet;

use regex::Regex;

use crate::defaults::{EXECUTABLE_DIRS, LIBDIR_GLOBS};
use crate::error::Result;
use crate::registry::ConfigRegistry;

/// Characters escaped in staged paths, for both Rust and Python regexes.
const REGEX_META: [char; 13] = [
    '\\', '^', '$', '*', '+', '?', '{', '}', '[', ']', '(', ')', '|',
];

/// Escape regex metacharacters in a staged path, leaving `.` and `/` as is.
pub fn escape_fragment(path: &str) -> String {
    let mut escaped = String::with_capacity(path.len());
    for c in path.chars() {
        if REGEX_META.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Fragments excluded from every whole-tree compile.
pub fn base_exclusions() -> Vec<String> {
    EXECUTABLE_DIRS
        .iter()
        .map(|dir| dir.to_string())
        .chain(LIBDIR_GLOBS.iter().map(|glob| format!("/{}", glob)))
        .collect()
}

/// Sorted, de-duplicated exclusions for the whole-tree compile of `current`.
///
/// Only other runtimes contribute staged paths, escaped with
/// [`escape_fragment`]. The current runtime's own root and library
/// directories are never part of the result, even when another config
/// claims them as well.
pub fn exclusions_for(current: &str, registry: &ConfigRegistry, staging_root: &str) -> Vec<String> {
    let mut exclusions: BTreeSet<String> = base_exclusions().into_iter().collect();

    for config in registry.iter().filter(|config| config.name != current) {
        if config.is_default_for_root {
            exclusions.insert(escape_fragment(&config.staged_root(staging_root)));
        }
        exclusions.extend(
            config
                .staged_library_dirs(staging_root)
                .iter()
                .map(|dir| escape_fragment(dir)),
        );
    }

    if let Some(own) = registry.get(current) {
        if own.is_default_for_root {
            exclusions.remove(&escape_fragment(&own.staged_root(staging_root)));
        }
        for dir in own.staged_library_dirs(staging_root) {
            exclusions.remove(&escape_fragment(&dir));
        }
    }

    exclusions.into_iter().collect()
}

/// Alternation of exclusion fragments, validated as a regex.
///
/// Fragments are joined verbatim, so glob-like fragments such as
/// `python[0-9].[0-9]` keep their character classes.
#[derive(Debug, Clone)]
pub struct ExclusionPattern {
    source: String,
    regex: Regex,
}

impl ExclusionPattern {
    /// Build the pattern, or `None` when there is nothing to exclude.
    pub fn new(fragments: &[String]) -> Result<Option<Self>> {
        if fragments.is_empty() {
            return Ok(None);
        }
        let source = fragments.join("|");
        let regex = Regex::new(&source)?;
        Ok(Some(Self { source, regex }))
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether a compile pass using this pattern would skip `path`.
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }
}

impl PartialEq for ExclusionPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for ExclusionPattern {}
