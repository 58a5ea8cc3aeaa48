//! Shared test utilities for CLI E2E tests.
//!
//! This module provides a fixture that lays out a fake package build: a
//! staging tree and a config directory side by side in a temp directory.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new()
//!         .with_config("python2.7", configs::DEFAULT_FOR_ROOT)
//!         .with_staged_file("usr/lib/python2.7/os.py");
//!     fixture.command().assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::configs;
    pub use super::TestFixture;
}

/// Common runtime config snippets for testing.
#[allow(dead_code)]
pub mod configs {
    /// A runtime compiling the whole tree.
    pub const DEFAULT_FOR_ROOT: &str = "[bytecompile]\ndefault_for_rootdir = 1\n";

    /// A runtime compiling only its own library dirs.
    pub const LIBDIRS_ONLY: &str = "[bytecompile]\n";

    /// A default runtime rooted at `/foo/bar`.
    pub const DEFAULT_FOR_FOO_BAR: &str =
        "[bytecompile]\nrootdir = /foo/bar\ndefault_for_rootdir = 1\n";

    /// A software collection with its own root and interpreter.
    pub const SCL_PYTHON33: &str = "[bytecompile]\n\
        rootdir = /opt/rh/python33/root\n\
        default_for_rootdir = 1\n\
        python = /{rootdir}/usr/bin/python\n\
        compile_dirs = /{rootdir}/usr/lib/python3.3:/{rootdir}/usr/lib64/python3.3\n\
        run = scl enable {fname} <<EOF\\n{python} {flags} -c '{inline_script}'\\nEOF\n";
}

/// Staging root used by every fixture, relative to the temp directory.
pub const BUILDROOT: &str = "some/build/dir/BUILDROOT/foo-1.2.3.fcXY.x86_64";

/// A temp directory holding a staging tree and a config directory.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a fixture with an empty staging tree and no configs.
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        temp_dir
            .child(BUILDROOT)
            .create_dir_all()
            .expect("Failed to create staging root");
        temp_dir
            .child("etc/pypackages-tools")
            .create_dir_all()
            .expect("Failed to create config dir");
        Self { temp_dir }
    }

    /// Add `<name>.conf` to the config directory.
    pub fn with_config(self, name: &str, content: &str) -> Self {
        fs::write(self.config_dir().join(format!("{}.conf", name)), content)
            .expect("Failed to write config file");
        self
    }

    /// Add an empty file inside the staging tree.
    pub fn with_staged_file(self, path: &str) -> Self {
        let file = self.staging_root().join(path);
        fs::create_dir_all(file.parent().expect("staged file has a parent"))
            .expect("Failed to create staged dirs");
        fs::write(&file, "").expect("Failed to write staged file");
        self
    }

    /// Add an empty directory inside the staging tree.
    pub fn with_staged_dir(self, path: &str) -> Self {
        fs::create_dir_all(self.staging_root().join(path)).expect("Failed to create staged dir");
        self
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn staging_root(&self) -> PathBuf {
        self.temp_dir.path().join(BUILDROOT)
    }

    /// The staging root as the planner prints it.
    pub fn staging_str(&self) -> String {
        self.staging_root().to_string_lossy().into_owned()
    }

    pub fn config_dir(&self) -> PathBuf {
        self.temp_dir.path().join("etc/pypackages-tools")
    }

    /// The binary pointed at this fixture, without any run arguments.
    pub fn base_command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("brp-bytecompile");
        cmd.current_dir(self.path())
            .env_remove("RUST_LOG")
            .env("RPM_BUILD_ROOT", self.staging_root())
            .arg("--config-dir")
            .arg(self.config_dir());
        cmd
    }

    /// A dry-run command against this fixture.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = self.base_command();
        cmd.arg("--dry-run").arg("python").arg("1");
        cmd
    }

    /// Run the dry-run command and return its exit code and log output.
    pub fn run_dry(&self) -> (i32, String) {
        let output = self.command().output().expect("Failed to run binary");
        let code = output.status.code().expect("Process exited by signal");
        (code, String::from_utf8_lossy(&output.stderr).into_owned())
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// The default compile command for one invocation.
#[allow(dead_code)]
pub fn compile_command(
    python: &str,
    flags: &str,
    target: &str,
    depth: usize,
    real_dir: &str,
    rx: Option<&str>,
) -> String {
    let rx = rx.map_or("None".to_string(), |rx| format!("re.compile(r\"{}\")", rx));
    format!(
        "{} {} -c 'import compileall, sys, re; sys.exit(not compileall.compile_dir(\"{}\", {}, \"{}\", force=1, quiet=1, rx={}))'",
        python, flags, target, depth, real_dir, rx
    )
}

/// [`compile_command`] as a dry-run log line.
#[allow(dead_code)]
pub fn compile_line(
    python: &str,
    flags: &str,
    target: &str,
    depth: usize,
    real_dir: &str,
    rx: Option<&str>,
) -> String {
    format!(
        "brp-bytecompile: {}",
        compile_command(python, flags, target, depth, real_dir, rx)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_layout() {
        let fixture = TestFixture::new()
            .with_config("python2.7", configs::DEFAULT_FOR_ROOT)
            .with_staged_file("usr/lib/python2.7/os.py");
        assert!(fixture.config_dir().join("python2.7.conf").is_file());
        assert!(fixture.staging_root().join("usr/lib/python2.7/os.py").is_file());
    }

    #[test]
    fn test_compile_line_without_rx() {
        let line = compile_line("/usr/bin/python2.7", "", "/s/usr/lib/python2.7", 4, "/usr/lib/python2.7", None);
        assert!(line.contains("/usr/bin/python2.7  -c '"));
        assert!(line.ends_with("rx=None))'"));
    }
}
