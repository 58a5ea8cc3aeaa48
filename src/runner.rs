//! Running rendered compile commands
//!
//! A [`CommandRunner`] receives the shell commands of every planned
//! invocation. [`ShellRunner`] executes them with `sh -c`; [`DryRunRunner`]
//! only logs them.

use std::process::Command;

use log::{info, warn};

use crate::error::{Error, Result};
use crate::orchestrator::RenderedPlan;

/// Executes one rendered command on behalf of a runtime.
pub trait CommandRunner {
    fn run(&mut self, name: &str, command: &str) -> Result<()>;
}

/// Logs commands without executing them.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunRunner;

impl CommandRunner for DryRunRunner {
    fn run(&mut self, _name: &str, command: &str) -> Result<()> {
        info!("{}", command);
        Ok(())
    }
}

/// Executes commands through a POSIX shell.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: String,
}

impl ShellRunner {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new("sh")
    }
}

impl CommandRunner for ShellRunner {
    fn run(&mut self, name: &str, command: &str) -> Result<()> {
        info!("{}", command);
        let status = Command::new(&self.shell).arg("-c").arg(command).status()?;
        if !status.success() {
            return Err(Error::CommandFailed {
                name: name.to_string(),
                command: command.to_string(),
                status: status.to_string(),
            });
        }
        Ok(())
    }
}

/// Hand every command of every plan to `runner`, plan by plan.
///
/// With `errors_terminate` the first failure aborts the run; otherwise
/// failures are logged and counted. Returns the number of failed commands.
pub fn run_plans(
    plans: &[RenderedPlan],
    runner: &mut dyn CommandRunner,
    errors_terminate: bool,
) -> Result<usize> {
    let mut failures = 0;
    for plan in plans {
        info!("Running from config \"{}\":", plan.name);
        for command in &plan.commands {
            match runner.run(&plan.name, command) {
                Ok(()) => {}
                Err(e) if !errors_terminate => {
                    warn!("{}", e);
                    failures += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
    Ok(failures)
}
