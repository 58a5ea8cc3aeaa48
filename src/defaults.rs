//! Default values for brp-bytecompile.
//!
//! This module provides centralized default values used across the planner,
//! ensuring consistency and avoiding duplication.

/// Directory scanned for runtime configs when `--config-dir` is not given.
pub const DEFAULT_CONFIG_DIR: &str = "/etc/pypackages-tools/";

/// Extension of runtime config files inside the config directory.
pub const CONFIG_EXTENSION: &str = "conf";

/// INI section holding the byte-compilation settings of a runtime.
pub const CONFIG_SECTION: &str = "bytecompile";

/// Root a runtime is responsible for unless its config says otherwise.
pub const DEFAULT_ROOTDIR: &str = "/";

/// Interpreter location, relative to the runtime's root.
pub const DEFAULT_PYTHON: &str = "/{rootdir}/usr/bin/{fname}";

/// Library directories a runtime owns, relative to its root.
pub const DEFAULT_COMPILE_DIRS: &str = "/{rootdir}/usr/lib/{fname}:/{rootdir}/usr/lib64/{fname}";

/// Command handed to the shell for every compile invocation.
pub const DEFAULT_RUN: &str = "{python} {flags} -c '{inline_script}'";

/// Script passed to the interpreter with `-c`.
///
/// It is embedded in single quotes by [`DEFAULT_RUN`], so it only uses
/// double quotes itself.
pub const DEFAULT_INLINE_SCRIPT: &str = concat!(
    "import compileall, sys, re; ",
    "sys.exit(not compileall.compile_dir(\"{python_libdir}\", {depth}, \"{real_libdir}\", ",
    "force=1, quiet=1, rx={rx}))"
);

/// Flag appended to produce the optimized variant of every invocation.
pub const OPTIMIZE_FLAG: &str = "-O";

/// Staging-relative globs of versioned runtime library directories.
///
/// Version digits are a single character each, matching `python2.7` but not
/// `python3.12`.
pub const LIBDIR_GLOBS: [&str; 2] = [
    "usr/lib/python[0-9].[0-9]",
    "usr/lib64/python[0-9].[0-9]",
];

/// Executable directories never swept by a whole-tree compile.
pub const EXECUTABLE_DIRS: [&str; 2] = ["/bin/", "/sbin/"];
