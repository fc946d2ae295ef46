//! Test utilities for srclink-lib.
//!
//! Provides a scripted stand-in for the external build tool so rebuild
//! behavior can be tested without a real CMake installation.

use std::fs;
use std::path::{Path, PathBuf};

/// Name of the log file the fake build tool appends each invocation to.
pub const INVOCATION_LOG: &str = "invocations.log";

/// Write an executable fake build tool into `dir`.
///
/// The script appends its arguments (one line per invocation) to
/// [`INVOCATION_LOG`] in `dir`, then runs `body`. The returned path is
/// absolute and suitable for `Rebuilder::with_tool`.
#[cfg(unix)]
pub fn fake_build_tool(dir: &Path, body: &str) -> PathBuf {
  use std::os::unix::fs::PermissionsExt;

  let path = dir.join("fake-cmake");
  let log = dir.join(INVOCATION_LOG);
  let script = format!("#!/bin/sh\necho \"$@\" >> \"{}\"\n{}\n", log.display(), body);
  fs::write(&path, script).unwrap();

  let mut perms = fs::metadata(&path).unwrap().permissions();
  perms.set_mode(0o755);
  fs::set_permissions(&path, perms).unwrap();
  path
}

#[cfg(windows)]
pub fn fake_build_tool(dir: &Path, body: &str) -> PathBuf {
  let path = dir.join("fake-cmake.bat");
  let log = dir.join(INVOCATION_LOG);
  let script = format!(
    "@echo off\r\necho %* >> \"{}\"\r\n{}\r\n",
    log.display(),
    body
  );
  fs::write(&path, script).unwrap();
  path
}

/// The fake build tool's recorded invocations, one argument line each.
pub fn invocation_log(dir: &Path) -> Vec<String> {
  fs::read_to_string(dir.join(INVOCATION_LOG))
    .map(|text| text.lines().map(str::to_string).collect())
    .unwrap_or_default()
}
