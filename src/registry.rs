//! Registry of every runtime config found in the config directory
//!
//! Loading is tolerant: a file that cannot be read or parsed is recorded as
//! an error and skipped, and the remaining files still load. The caller
//! decides how to surface the collected errors.

use std::collections::BTreeMap;
use std::path::Path;

use log::debug;

use crate::config::RuntimeConfig;
use crate::defaults::CONFIG_EXTENSION;
use crate::error::Error;

/// Runtime configs keyed by runtime name, iterated in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigRegistry {
    configs: BTreeMap<String, RuntimeConfig>,
}

/// Result of scanning a config directory.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub registry: ConfigRegistry,
    /// Per-file failures, in file name order.
    pub errors: Vec<Error>,
}

impl ConfigRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_configs(configs: impl IntoIterator<Item = RuntimeConfig>) -> Self {
        let mut registry = Self::new();
        for config in configs {
            registry.insert(config);
        }
        registry
    }

    /// Add a config, returning the one it replaced.
    pub fn insert(&mut self, config: RuntimeConfig) -> Option<RuntimeConfig> {
        self.configs.insert(config.name.clone(), config)
    }

    pub fn get(&self, name: &str) -> Option<&RuntimeConfig> {
        self.configs.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RuntimeConfig> {
        self.configs.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.configs.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// Load every `*.conf` file directly inside `dir`.
    ///
    /// A missing directory yields an empty registry.
    pub fn load(dir: &Path) -> LoadReport {
        let mut report = LoadReport::default();

        let dir = dir.to_string_lossy();
        let pattern = format!(
            "{}/*.{}",
            glob::Pattern::escape(dir.trim_end_matches('/')),
            CONFIG_EXTENSION
        );

        let entries = match glob::glob(&pattern) {
            Ok(entries) => entries,
            Err(e) => {
                report.errors.push(e.into());
                return report;
            }
        };

        for entry in entries {
            let file = match entry {
                Ok(file) => file,
                Err(e) => {
                    report.errors.push(Error::ConfigLoad {
                        path: e.path().display().to_string(),
                        message: e.error().to_string(),
                    });
                    continue;
                }
            };
            if !file.is_file() {
                continue;
            }

            match RuntimeConfig::from_file(&file) {
                Ok(config) => {
                    debug!("Loaded config \"{}\" from {}", config.name, file.display());
                    report.registry.insert(config);
                }
                Err(e) => report.errors.push(e),
            }
        }

        report
    }
}
