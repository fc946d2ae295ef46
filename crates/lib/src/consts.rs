//! Constants shared across the crate.

/// Environment variable listing build directories currently mid-rebuild.
///
/// The value is a path-separator-delimited list inherited by the build
/// tool's child processes. A build directory already present in the list is
/// never rebuilt again, which stops a build step that spawns a fresh
/// interpreter from re-entering the resolver forever.
pub const SKIP_ENV: &str = "SRCLINK_EDITABLE_SKIP";

/// Environment variable overriding rebuild verbosity.
///
/// The literal value `"0"` forces verbosity off; any other non-empty value
/// forces it on, regardless of the flag passed at install time.
pub const VERBOSE_ENV: &str = "SRCLINK_EDITABLE_VERBOSE";

/// File name marking a module as a package with child search paths.
pub const PACKAGE_INIT: &str = "__init__.py";

/// Build tool invoked for the `--build` and `--install` steps.
pub const DEFAULT_BUILD_TOOL: &str = "cmake";
