//! Resolution through an installed chain, no rebuild configured.

use std::path::PathBuf;

use srclink_lib::registry::{LoaderContext, install};
use srclink_lib::resolve::Origin;
use tempfile::TempDir;

use super::common::sample_project;

#[test]
fn source_module_round_trips_through_the_chain() {
  let temp = TempDir::new().unwrap();
  let (manifest, site) = sample_project(temp.path());

  let mut ctx = LoaderContext::new();
  install(&mut ctx, manifest, site).unwrap();

  let spec = ctx.resolve("pkg.mod").unwrap().unwrap();
  assert_eq!(spec.origin, Origin::Source);
  assert_eq!(spec.reader().read_to_string().unwrap(), "answer = 42\n");
}

#[test]
fn package_scope_spans_source_tree_and_install_root() {
  let temp = TempDir::new().unwrap();
  let (manifest, site) = sample_project(temp.path());

  let mut ctx = LoaderContext::new();
  install(&mut ctx, manifest, site.clone()).unwrap();

  let spec = ctx.resolve("pkg").unwrap().unwrap();
  assert!(spec.package);

  let locations = spec.search_locations.unwrap();
  assert_eq!(locations.len(), 2);
  assert!(locations.contains(&temp.path().join("src/pkg")));
  assert!(locations.contains(&site.join("pkg")));
}

#[test]
fn build_output_resolves_under_the_install_root() {
  let temp = TempDir::new().unwrap();
  let (manifest, site) = sample_project(temp.path());

  let mut ctx = LoaderContext::new();
  install(&mut ctx, manifest, site.clone()).unwrap();

  let spec = ctx.resolve("pkg.native").unwrap().unwrap();
  assert_eq!(spec.origin, Origin::Built);
  assert_eq!(spec.path, site.join("pkg/native.so"));
  assert_eq!(spec.reader().read().unwrap(), b"\x7fELF");
}

#[test]
fn unknown_names_fall_through_to_nothing() {
  let temp = TempDir::new().unwrap();
  let (manifest, site) = sample_project(temp.path());

  let mut ctx = LoaderContext::new();
  install(&mut ctx, manifest, site).unwrap();

  assert!(ctx.resolve("os.path").unwrap().is_none());
  assert!(ctx.resolve("pkgother").unwrap().is_none());
}

#[test]
fn empty_manifest_installs_and_declines_everything() {
  let mut ctx = LoaderContext::new();
  install(&mut ctx, Default::default(), PathBuf::from("/site")).unwrap();

  assert_eq!(ctx.len(), 1);
  assert!(ctx.resolve("pkg").unwrap().is_none());
}
