//! Rebuild-on-import behavior through the full chain.
//!
//! These tests script the build tool, so they are Unix-only like the other
//! shell-backed tests in this crate.
#![cfg(unix)]

use std::path::PathBuf;

use serial_test::serial;
use srclink_lib::consts;
use srclink_lib::manifest::EditableManifest;
use srclink_lib::rebuild::{BuildStep, RebuildError};
use srclink_lib::registry::LoaderContext;
use srclink_lib::resolve::{EditableResolver, Origin, ResolveError};
use tempfile::TempDir;

use super::common::{fake_build_tool, invocation_log, sample_project};

struct Fixture {
  ctx: LoaderContext,
  build_dir: PathBuf,
  site: PathBuf,
}

/// Install a rebuilding resolver whose build tool is the scripted fake.
fn fixture(temp: &TempDir, tool_body: &str) -> Fixture {
  let (mut manifest, site) = sample_project(temp.path());
  let build_dir = temp.path().join("build");
  std::fs::create_dir(&build_dir).unwrap();
  let tool = fake_build_tool(&build_dir, tool_body);

  manifest.rebuild = true;
  manifest.build_dir = Some(build_dir.clone());

  let resolver = EditableResolver::new(manifest, site.clone())
    .unwrap()
    .with_build_tool(tool);
  let mut ctx = LoaderContext::new();
  ctx.register_front(Box::new(resolver));

  Fixture {
    ctx,
    build_dir,
    site,
  }
}

fn with_clean_env<R>(f: impl FnOnce() -> R) -> R {
  temp_env::with_vars(
    [(consts::SKIP_ENV, None::<&str>), (consts::VERBOSE_ENV, None)],
    f,
  )
}

#[test]
#[serial]
fn build_output_import_triggers_one_build_install_pair() {
  let temp = TempDir::new().unwrap();
  let f = fixture(&temp, "exit 0");

  let spec = with_clean_env(|| f.ctx.resolve("pkg.native").unwrap().unwrap());

  assert_eq!(spec.origin, Origin::Built);
  assert_eq!(spec.path, f.site.join("pkg/native.so"));

  let log = invocation_log(&f.build_dir);
  assert_eq!(log.len(), 2);
  assert_eq!(log[0], "--build .");
  assert_eq!(log[1], format!("--install . --prefix {}", f.site.display()));
}

#[test]
#[serial]
fn source_import_never_rebuilds() {
  let temp = TempDir::new().unwrap();
  let f = fixture(&temp, "exit 0");

  let spec = with_clean_env(|| f.ctx.resolve("pkg.mod").unwrap().unwrap());

  assert_eq!(spec.origin, Origin::Source);
  assert!(invocation_log(&f.build_dir).is_empty());
}

#[test]
#[serial]
fn failed_rebuild_fails_the_resolution() {
  let temp = TempDir::new().unwrap();
  let f = fixture(&temp, "case \"$1\" in --build) exit 9;; esac\nexit 0");

  let err = with_clean_env(|| f.ctx.resolve("pkg.native").unwrap_err());

  let ResolveError::Rebuild(rebuild_err) = err;
  assert!(matches!(
    rebuild_err,
    RebuildError::StepFailed {
      step: BuildStep::Build,
      code: Some(9),
      ..
    }
  ));
  // The install step was never attempted.
  assert_eq!(invocation_log(&f.build_dir).len(), 1);
}

#[test]
#[serial]
fn inherited_marker_suppresses_the_rebuild() {
  let temp = TempDir::new().unwrap();
  let f = fixture(&temp, "exit 0");

  let spec = temp_env::with_vars(
    [
      (consts::SKIP_ENV, Some(f.build_dir.to_str().unwrap())),
      (consts::VERBOSE_ENV, None),
    ],
    || f.ctx.resolve("pkg.native").unwrap().unwrap(),
  );

  // The redirect is still served; only the rebuild is skipped.
  assert_eq!(spec.origin, Origin::Built);
  assert!(invocation_log(&f.build_dir).is_empty());
}
