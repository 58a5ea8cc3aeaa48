//! # Diagnostics
//!
//! Validators and the config loader never write to the log directly. They
//! hand [`Diagnostic`] records to a [`Reporter`] supplied by the caller: the
//! binary forwards them to the `log` facade through [`LogReporter`], while
//! tests collect them with [`CollectingReporter`] and assert on the exact set
//! of messages.

use log::{error, warn};

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

/// Which check produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticKind {
    /// A config file failed to load.
    ConfigLoad,
    /// A root is claimed by several default runtimes.
    RootConflict,
    /// A staged library directory has no governing config.
    OrphanLibdir,
}

/// A single diagnostic line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn error(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            kind,
            message: message.into(),
        }
    }

    pub fn warning(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            kind,
            message: message.into(),
        }
    }
}

/// Sink for diagnostics.
pub trait Reporter {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => error!("{}", diagnostic.message),
            Severity::Warning => warn!("{}", diagnostic.message),
        }
    }
}

/// Keeps every diagnostic in memory, in report order.
#[derive(Debug, Default, Clone)]
pub struct CollectingReporter {
    diagnostics: Vec<Diagnostic>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Messages of the given kind, in report order.
    pub fn messages(&self, kind: DiagnosticKind) -> Vec<&str> {
        self.diagnostics
            .iter()
            .filter(|d| d.kind == kind)
            .map(|d| d.message.as_str())
            .collect()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }
}

impl Reporter for CollectingReporter {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}
