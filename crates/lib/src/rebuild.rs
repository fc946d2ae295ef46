//! Pre-import rebuild of the native build directory.
//!
//! Runs the build tool's build step followed by its install step, in the
//! configured build directory, before a build-output redirect is served.
//! Both steps block the resolving caller; there is no timeout.
//!
//! A build step may spawn a fresh interpreter that re-enters the resolver,
//! which would rebuild again forever. The guard is an inherited environment
//! marker: every rebuild appends its build directory to the child
//! environment's [`consts::SKIP_ENV`] list, and a directory already on the
//! inherited list is never rebuilt.

use std::env;
use std::ffi::OsStr;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::{debug, info};

use crate::consts;

/// Errors raised by a rebuild attempt.
#[derive(Debug, Error)]
pub enum RebuildError {
  /// A build tool step exited nonzero.
  #[error("{step} step failed with exit code {code:?} in {}", build_dir.display())]
  StepFailed {
    step: BuildStep,
    build_dir: PathBuf,
    code: Option<i32>,
    output: String,
  },

  /// Spawning the build tool or reading its output failed.
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  /// The skip marker could not be encoded into the child environment.
  #[error("invalid skip marker: {0}")]
  Marker(#[from] env::JoinPathsError),
}

/// The two sequential external steps of a rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStep {
  Build,
  Install,
}

impl std::fmt::Display for BuildStep {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      BuildStep::Build => write!(f, "build"),
      BuildStep::Install => write!(f, "install"),
    }
  }
}

/// Invokes the external build tool for one build directory.
///
/// Constructed once per installed resolver; `rebuild` may be called on every
/// resolution of a build-output module.
#[derive(Debug, Clone)]
pub struct Rebuilder {
  build_dir: Option<PathBuf>,
  install_root: PathBuf,
  tool: PathBuf,
  verbose: bool,
  build_options: Vec<String>,
  install_options: Vec<String>,
}

impl Rebuilder {
  pub fn new(
    build_dir: Option<PathBuf>,
    install_root: PathBuf,
    verbose: bool,
    build_options: Vec<String>,
    install_options: Vec<String>,
  ) -> Self {
    // An empty build dir means "no local build configured", same as None.
    let build_dir = build_dir.filter(|dir| !dir.as_os_str().is_empty());
    Self {
      build_dir,
      install_root,
      tool: PathBuf::from(consts::DEFAULT_BUILD_TOOL),
      verbose,
      build_options,
      install_options,
    }
  }

  /// Replace the build tool program (tests swap in a scripted fake).
  pub fn with_tool(mut self, tool: impl Into<PathBuf>) -> Self {
    self.tool = tool.into();
    self
  }

  /// Run the build step, then the install step.
  ///
  /// Returns without running anything when no build directory is configured
  /// or the directory is already mid-rebuild in this process chain. The
  /// install step is not attempted after a failed build step.
  pub fn rebuild(&self) -> Result<(), RebuildError> {
    let Some(build_dir) = self.build_dir.as_deref() else {
      return Ok(());
    };

    let marker = env::var_os(consts::SKIP_ENV).unwrap_or_default();
    if env::split_paths(&marker).any(|entry| entry == build_dir) {
      debug!(dir = ?build_dir, "rebuild already in progress, skipping");
      return Ok(());
    }
    let extended =
      env::join_paths(env::split_paths(&marker).chain([build_dir.to_path_buf()]))?;

    let verbose = self.effective_verbose();
    info!(dir = ?build_dir, verbose, "rebuilding before redirect");

    self.run_step(BuildStep::Build, build_dir, &extended, verbose)?;
    self.run_step(BuildStep::Install, build_dir, &extended, verbose)
  }

  /// Resolve the effective verbosity from the flag and the environment.
  ///
  /// A non-empty [`consts::VERBOSE_ENV`] forces verbosity on, except the
  /// literal `"0"` which forces it off.
  fn effective_verbose(&self) -> bool {
    match env::var(consts::VERBOSE_ENV) {
      Ok(value) if value == "0" => false,
      Ok(value) if !value.is_empty() => true,
      _ => self.verbose,
    }
  }

  fn run_step(
    &self,
    step: BuildStep,
    build_dir: &Path,
    marker: &OsStr,
    verbose: bool,
  ) -> Result<(), RebuildError> {
    let mut command = Command::new(&self.tool);
    match step {
      BuildStep::Build => {
        command.arg("--build").arg(".").args(&self.build_options);
      }
      BuildStep::Install => {
        command
          .arg("--install")
          .arg(".")
          .arg("--prefix")
          .arg(&self.install_root)
          .args(&self.install_options);
      }
    }
    command
      .current_dir(build_dir)
      .env(consts::SKIP_ENV, marker)
      .stdout(Stdio::piped());

    debug!(tool = ?self.tool, %step, "spawning build tool");

    let mut child = command.spawn()?;
    let mut output = String::new();
    if let Some(stdout) = child.stdout.take() {
      if verbose {
        // Stream progress to the error stream as it arrives.
        for line in BufReader::new(stdout).lines() {
          let line = line?;
          eprintln!("{line}");
          output.push_str(&line);
          output.push('\n');
        }
      } else {
        BufReader::new(stdout).read_to_string(&mut output)?;
      }
    }
    let status = child.wait()?;

    if !status.success() {
      if !verbose && !output.is_empty() {
        eprintln!("ERROR: {output}");
      }
      return Err(RebuildError::StepFailed {
        step,
        build_dir: build_dir.to_path_buf(),
        code: status.code(),
        output,
      });
    }

    Ok(())
  }
}
