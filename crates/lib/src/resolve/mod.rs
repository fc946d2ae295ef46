//! Module lookup against the editable-install tables.
//!
//! A resolver answers "where does module `a.b.c` physically live right now":
//! in the build output when the build tool produced it, otherwise in the
//! source tree, otherwise it declines so the host can try the rest of its
//! lookup chain. Declining is a negative result, never an error.

mod types;

pub use types::*;

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::debug;

use crate::manifest::EditableManifest;
use crate::rebuild::Rebuilder;
use crate::scope::{ScopeError, ScopeMap};

/// A participant in the host's ordered component-lookup chain.
///
/// `Ok(None)` declines the name and lets later participants attempt it.
pub trait ComponentResolver {
  fn resolve(&self, name: &str) -> Result<Option<ModuleSpec>, ResolveError>;
}

/// Redirects module lookups to the source tree or the build output.
///
/// Tables and derived scopes are fixed at construction; resolution has no
/// side effects besides the optional pre-import rebuild.
pub struct EditableResolver {
  source_files: BTreeMap<String, PathBuf>,
  wheel_files: BTreeMap<String, PathBuf>,
  root_dir: PathBuf,
  rebuild_flag: bool,
  scope: ScopeMap,
  rebuilder: Rebuilder,
}

impl EditableResolver {
  /// Build a resolver from the orchestrator's manifest.
  ///
  /// `root_dir` anchors relative wheel paths and is the prefix the install
  /// step targets.
  pub fn new(manifest: EditableManifest, root_dir: PathBuf) -> Result<Self, ScopeError> {
    let scope = ScopeMap::build(&manifest.source_files, &manifest.wheel_files, &root_dir)?;
    let rebuilder = Rebuilder::new(
      manifest.build_dir,
      root_dir.clone(),
      manifest.verbose,
      manifest.build_options,
      manifest.install_options,
    );
    Ok(Self {
      source_files: manifest.source_files,
      wheel_files: manifest.wheel_files,
      root_dir,
      rebuild_flag: manifest.rebuild,
      scope,
      rebuilder,
    })
  }

  /// Replace the build tool program on the inner [`Rebuilder`].
  pub fn with_build_tool(mut self, tool: impl Into<PathBuf>) -> Self {
    self.rebuilder = self.rebuilder.with_tool(tool);
    self
  }

  fn spec(&self, name: &str, path: PathBuf, origin: Origin) -> ModuleSpec {
    ModuleSpec {
      name: name.to_string(),
      path,
      search_locations: self.scope.search_locations(name),
      package: self.scope.is_package(name),
      origin,
    }
  }
}

impl ComponentResolver for EditableResolver {
  fn resolve(&self, name: &str) -> Result<Option<ModuleSpec>, ResolveError> {
    // Build output wins over the source tree: it holds the freshest
    // compiled artifacts.
    if let Some(file) = self.wheel_files.get(name) {
      if self.rebuild_flag {
        self.rebuilder.rebuild()?;
      }
      let path = if file.is_absolute() {
        file.clone()
      } else {
        self.root_dir.join(file)
      };
      debug!(module = %name, path = ?path, "redirecting to build output");
      return Ok(Some(self.spec(name, path, Origin::Built)));
    }

    if let Some(file) = self.source_files.get(name) {
      debug!(module = %name, path = ?file, "redirecting to source tree");
      return Ok(Some(self.spec(name, file.clone(), Origin::Source)));
    }

    Ok(None)
  }
}
