//! # Runtime Configuration
//!
//! This module defines [`RuntimeConfig`], the ownership rules of one
//! installed runtime, and the logic for building it from an INI config file.
//!
//! ## File Format
//!
//! Each runtime ships one `<name>.conf` file. Only the `[bytecompile]`
//! section is read, and every key is optional:
//!
//! ```ini
//! [bytecompile]
//! rootdir = /opt/rh/python33/root
//! default_for_rootdir = 1
//! flags = -s
//! python = /{rootdir}/usr/bin/python
//! compile_dirs = /{rootdir}/usr/lib/python3.3:/{rootdir}/usr/lib64/python3.3
//! run = scl enable python33 <<EOF\n{python} {flags} -c '{inline_script}'\nEOF
//! ```
//!
//! Values may reference `{fname}` (the file stem) and `{rootdir}`; these are
//! resolved once when the config is built. `run` and `inline_script` are
//! command templates rendered later by [`crate::template`]. Escape sequences
//! such as `\n` are decoded by the INI reader; quotes are kept verbatim.
//! A value may also continue on indented lines, which are joined with
//! newlines after their indentation is stripped:
//!
//! ```ini
//! run = scl enable python33 <<EOF
//!     {python} {flags} -c '{inline_script}'
//!     EOF
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use ini::{Ini, ParseOption};

use crate::defaults::{
    CONFIG_SECTION, DEFAULT_COMPILE_DIRS, DEFAULT_INLINE_SCRIPT, DEFAULT_PYTHON, DEFAULT_ROOTDIR,
    DEFAULT_RUN, OPTIMIZE_FLAG,
};
use crate::error::{Error, Result};
use crate::path;
use crate::template::{self, INLINE_SCRIPT_PLACEHOLDERS, RUN_PLACEHOLDERS};

/// Raw values read from a config file, before defaults and templating.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub rootdir: Option<String>,
    pub default_for_rootdir: Option<String>,
    pub flags: Option<String>,
    pub python: Option<String>,
    pub compile_dirs: Option<String>,
    pub run: Option<String>,
    pub inline_script: Option<String>,
}

impl ConfigOverrides {
    /// Read the `[bytecompile]` section of a parsed INI document.
    ///
    /// A document without that section yields no overrides at all.
    pub fn from_ini(ini: &Ini) -> Self {
        let Some(section) = ini.section(Some(CONFIG_SECTION)) else {
            return Self::default();
        };
        let get = |key: &str| section.get(key).map(str::to_string);

        Self {
            rootdir: get("rootdir"),
            default_for_rootdir: get("default_for_rootdir"),
            flags: get("flags"),
            python: get("python"),
            compile_dirs: get("compile_dirs"),
            run: get("run"),
            inline_script: get("inline_script"),
        }
    }
}

/// Ownership rules of one runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Unique name, taken from the config file stem.
    pub name: String,
    /// Root compiled by this runtime when it is the default for it.
    pub root_dir: String,
    /// Whether this runtime compiles everything under `root_dir` that no
    /// other runtime claims.
    pub is_default_for_root: bool,
    /// Interpreter used to run the compilation, as installed.
    pub interpreter_path: String,
    /// Directories always compiled by this runtime, as installed.
    pub library_dirs: Vec<String>,
    /// Extra interpreter flags, passed through untouched.
    pub extra_flags: String,
    /// Command template handed to the shell.
    pub run_template: String,
    /// Script template passed to the interpreter.
    pub inline_script_template: String,
}

impl RuntimeConfig {
    /// Build a config for runtime `name`, filling every absent field with
    /// its default.
    pub fn build(name: &str, overrides: ConfigOverrides) -> Result<Self> {
        let mut vars = BTreeMap::new();
        vars.insert("fname", name.to_string());

        let root_dir = resolve_path(
            name,
            "rootdir",
            overrides.rootdir.as_deref().unwrap_or(DEFAULT_ROOTDIR),
            &vars,
        )?;
        vars.insert("rootdir", root_dir.clone());

        let interpreter_path = resolve_path(
            name,
            "python",
            overrides.python.as_deref().unwrap_or(DEFAULT_PYTHON),
            &vars,
        )?;

        let library_dirs = resolve_path_list(
            name,
            "compile_dirs",
            overrides
                .compile_dirs
                .as_deref()
                .unwrap_or(DEFAULT_COMPILE_DIRS),
            &vars,
        )?;

        let is_default_for_root = overrides
            .default_for_rootdir
            .as_deref()
            .map(str::trim)
            == Some("1");

        let run_template = overrides.run.unwrap_or_else(|| DEFAULT_RUN.to_string());
        check_template(name, "run", &run_template, &RUN_PLACEHOLDERS)?;

        let inline_script_template = overrides
            .inline_script
            .unwrap_or_else(|| DEFAULT_INLINE_SCRIPT.to_string());
        check_template(
            name,
            "inline_script",
            &inline_script_template,
            &INLINE_SCRIPT_PLACEHOLDERS,
        )?;

        Ok(Self {
            name: name.to_string(),
            root_dir,
            is_default_for_root,
            interpreter_path,
            library_dirs,
            extra_flags: overrides.flags.unwrap_or_default().trim().to_string(),
            run_template,
            inline_script_template,
        })
    }

    /// Load a config file; the runtime is named after the file stem.
    pub fn from_file(file: &Path) -> Result<Self> {
        let name = file
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .filter(|stem| !stem.is_empty())
            .ok_or_else(|| Error::ConfigLoad {
                path: file.display().to_string(),
                message: "cannot derive a runtime name from the file name".to_string(),
            })?;

        let options = ParseOption {
            enabled_quote: false,
            enabled_escape: true,
            enabled_indented_mutiline_value: true,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_file_opt(file, options).map_err(|e| Error::ConfigLoad {
            path: file.display().to_string(),
            message: e.to_string(),
        })?;

        Self::build(&name, ConfigOverrides::from_ini(&ini))
    }

    /// The two flag variants every directory is compiled with: the plain
    /// flags, then the same flags plus the optimize flag.
    pub fn flag_variants(&self) -> [String; 2] {
        let optimized = if self.extra_flags.is_empty() {
            OPTIMIZE_FLAG.to_string()
        } else {
            format!("{} {}", self.extra_flags, OPTIMIZE_FLAG)
        };
        [self.extra_flags.clone(), optimized]
    }

    /// `root_dir` inside the staging tree.
    pub fn staged_root(&self, staging_root: &str) -> String {
        path::staged(staging_root, &self.root_dir)
    }

    /// `library_dirs` inside the staging tree, in declared order.
    pub fn staged_library_dirs(&self, staging_root: &str) -> Vec<String> {
        self.library_dirs
            .iter()
            .map(|dir| path::staged(staging_root, dir))
            .collect()
    }
}

fn resolve(name: &str, key: &str, raw: &str, vars: &BTreeMap<&str, String>) -> Result<String> {
    template::substitute(raw, vars).map_err(|e| Error::ConfigValue {
        name: name.to_string(),
        key: key.to_string(),
        message: match e {
            Error::Template {
                variable: Some(variable),
                ..
            } => format!("unknown placeholder '{{{}}}'", variable),
            other => other.to_string(),
        },
    })
}

fn resolve_path(name: &str, key: &str, raw: &str, vars: &BTreeMap<&str, String>) -> Result<String> {
    let value = resolve(name, key, raw.trim(), vars)?;
    if !value.starts_with(path::SEPARATOR) {
        return Err(Error::ConfigValue {
            name: name.to_string(),
            key: key.to_string(),
            message: format!("'{}' is not an absolute path", value),
        });
    }
    Ok(path::normalize(&value))
}

fn resolve_path_list(
    name: &str,
    key: &str,
    raw: &str,
    vars: &BTreeMap<&str, String>,
) -> Result<Vec<String>> {
    let value = resolve(name, key, raw.trim(), vars)?;
    if value.is_empty() {
        return Ok(Vec::new());
    }

    value
        .split(':')
        .map(|entry| {
            let entry = entry.trim();
            if entry.is_empty() {
                return Err(Error::ConfigValue {
                    name: name.to_string(),
                    key: key.to_string(),
                    message: format!("empty entry in path list '{}'", value),
                });
            }
            if !entry.starts_with(path::SEPARATOR) {
                return Err(Error::ConfigValue {
                    name: name.to_string(),
                    key: key.to_string(),
                    message: format!("entry '{}' is not an absolute path", entry),
                });
            }
            Ok(path::normalize(entry))
        })
        .collect()
}

fn check_template(name: &str, key: &str, template: &str, allowed: &[&str]) -> Result<()> {
    let unknown = template::unknown_placeholders(template, allowed)?;
    if unknown.is_empty() {
        return Ok(());
    }
    Err(Error::ConfigValue {
        name: name.to_string(),
        key: key.to_string(),
        message: format!("unknown placeholder(s): {}", unknown.join(", ")),
    })
}
