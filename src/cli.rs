//! CLI argument parsing and run dispatch

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, warn, LevelFilter};

use brp_bytecompile::defaults::DEFAULT_CONFIG_DIR;
use brp_bytecompile::diagnostics::LogReporter;
use brp_bytecompile::error::{exit_codes, Error};
use brp_bytecompile::orchestrator::{self, Outcome, RunOptions};
use brp_bytecompile::runner::{self, CommandRunner, DryRunRunner, ShellRunner};

/// Byte-compile every runtime staged in a package build root
#[derive(Parser, Debug)]
#[command(name = "brp-bytecompile")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Default interpreter (accepted for compatibility, not used)
    default_python: String,

    /// Whether a failed compile command fails the run ("0" only warns)
    errors_terminate: String,

    /// Only log the commands that would run
    #[arg(long)]
    dry_run: bool,

    /// Directory scanned for runtime configs (*.conf)
    #[arg(long, value_name = "DIR", default_value = DEFAULT_CONFIG_DIR)]
    config_dir: PathBuf,

    /// Staging tree to compile; "/" means there is nothing to do
    #[arg(long, value_name = "DIR", env = "RPM_BUILD_ROOT", default_value = "/")]
    buildroot: PathBuf,

    /// Set log level (off, error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: LevelFilter,
}

impl Cli {
    /// Run and return the process exit code.
    pub fn execute(self) -> i32 {
        init_logging(self.log_level);

        match self.run() {
            Ok(()) => exit_codes::SUCCESS,
            Err(err) => {
                error!("{:#}", err);
                err.downcast_ref::<Error>()
                    .map(Error::exit_code)
                    .unwrap_or(exit_codes::FAILURE)
            }
        }
    }

    fn run(&self) -> Result<()> {
        let buildroot = if self.buildroot.is_absolute() {
            self.buildroot.clone()
        } else {
            std::env::current_dir()
                .context("Failed to resolve the current directory")?
                .join(&self.buildroot)
        };

        let options = RunOptions {
            staging_root: buildroot.to_string_lossy().into_owned(),
            config_dir: self.config_dir.clone(),
        };

        let plans = match orchestrator::run(&options, &mut LogReporter)? {
            Outcome::NothingToDo => return Ok(()),
            Outcome::Planned(plans) => plans,
        };

        let mut runner: Box<dyn CommandRunner> = if self.dry_run {
            Box::new(DryRunRunner)
        } else {
            Box::new(ShellRunner::default())
        };
        let errors_terminate = self.errors_terminate.trim() != "0";

        let failures = runner::run_plans(&plans, runner.as_mut(), errors_terminate)
            .with_context(|| format!("Byte-compilation of {} failed", options.staging_root))?;
        if failures > 0 {
            warn!("{} compile command(s) failed", failures);
        }
        Ok(())
    }
}

/// Log to stderr as `brp-bytecompile: <message>`.
///
/// `RUST_LOG` takes precedence over `--log-level`.
fn init_logging(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "{}: {}", env!("CARGO_PKG_NAME"), record.args()))
        .try_init();
}
