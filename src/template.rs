//! Placeholder templating for config values and compile commands
//!
//! Templates use `{name}` placeholders; `{{` and `}}` stand for literal
//! braces. The same engine resolves the self-references inside config files
//! (`{fname}`, `{rootdir}`) and renders a [`CompileInvocation`] into the
//! string handed to the shell.

use std::collections::BTreeMap;

use regex::Regex;

use crate::config::RuntimeConfig;
use crate::error::{Error, Result};
use crate::planner::CompileInvocation;

const PLACEHOLDER: &str = r"\{\{|\}\}|\{([A-Za-z_][A-Za-z0-9_]*)\}";

/// Placeholders available to the inline script template.
pub const INLINE_SCRIPT_PLACEHOLDERS: [&str; 8] = [
    "fname",
    "rootdir",
    "python",
    "flags",
    "python_libdir",
    "depth",
    "real_libdir",
    "rx",
];

/// Placeholders available to the run template.
pub const RUN_PLACEHOLDERS: [&str; 9] = [
    "fname",
    "rootdir",
    "python",
    "flags",
    "python_libdir",
    "depth",
    "real_libdir",
    "rx",
    "inline_script",
];

/// Replace every placeholder in `template` with its value from `vars`.
pub fn substitute(template: &str, vars: &BTreeMap<&str, String>) -> Result<String> {
    let placeholder = Regex::new(PLACEHOLDER)?;
    let mut rendered = String::with_capacity(template.len());
    let mut last = 0;

    for captures in placeholder.captures_iter(template) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        rendered.push_str(&template[last..whole.start()]);

        match captures.get(1) {
            Some(name) => {
                let value = vars.get(name.as_str()).ok_or_else(|| Error::Template {
                    message: format!("unknown placeholder in '{}'", template),
                    variable: Some(name.as_str().to_string()),
                })?;
                rendered.push_str(value);
            }
            // `{{` or `}}`
            None => rendered.push_str(&whole.as_str()[..1]),
        }
        last = whole.end();
    }

    rendered.push_str(&template[last..]);
    Ok(rendered)
}

/// Names of the placeholders in `template` that are not in `allowed`.
pub fn unknown_placeholders(template: &str, allowed: &[&str]) -> Result<Vec<String>> {
    let placeholder = Regex::new(PLACEHOLDER)?;
    let mut unknown: Vec<String> = placeholder
        .captures_iter(template)
        .filter_map(|captures| captures.get(1))
        .map(|name| name.as_str())
        .filter(|name| !allowed.contains(name))
        .map(str::to_string)
        .collect();
    unknown.sort();
    unknown.dedup();
    Ok(unknown)
}

/// Render `invocation` into the shell command described by `config`.
pub fn render(config: &RuntimeConfig, invocation: &CompileInvocation) -> Result<String> {
    // These land inside a double-quoted Python string that is itself single-quoted for sh.
    let quoted = [
        ("python_libdir", invocation.target_dir.as_str()),
        ("real_libdir", invocation.real_dir.as_str()),
        (
            "rx",
            invocation.exclude.as_ref().map_or("", |p| p.as_str()),
        ),
    ];
    for (key, value) in quoted {
        if value.contains('\'') || value.contains('"') {
            return Err(Error::Template {
                message: format!("value '{}' contains a quote character", value),
                variable: Some(key.to_string()),
            });
        }
    }

    let rx = match &invocation.exclude {
        Some(pattern) => format!("re.compile(r\"{}\")", pattern.as_str()),
        None => "None".to_string(),
    };

    let mut vars = BTreeMap::new();
    vars.insert("fname", config.name.clone());
    vars.insert("rootdir", config.root_dir.clone());
    vars.insert("python", invocation.interpreter.clone());
    vars.insert("flags", invocation.flags.clone());
    vars.insert("python_libdir", invocation.target_dir.clone());
    vars.insert("depth", invocation.depth.to_string());
    vars.insert("real_libdir", invocation.real_dir.clone());
    vars.insert("rx", rx);

    let inline_script = substitute(&config.inline_script_template, &vars)?;
    vars.insert("inline_script", inline_script);
    substitute(&config.run_template, &vars)
}
