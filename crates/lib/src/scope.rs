//! Submodule search scope derivation.
//!
//! Children of an editable package may physically live in either the source
//! tree or the build output, so a package's submodule search path has to
//! aggregate directories from both tables. This module derives that mapping
//! once, at resolver installation, from the manifest tables.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::consts;

/// Errors raised while deriving search scopes.
#[derive(Debug, Error)]
pub enum ScopeError {
  /// A non-root module's file does not live in a directory.
  #[error("unexpected path to module file: {} [{module}]", file.display())]
  MalformedEntry { module: String, file: PathBuf },
}

/// Per-package submodule search directories, merged across both tables.
///
/// Built once at install time and immutable afterwards. A module is a
/// *package* when its file is a package initializer; only packages own a
/// scope entry, keyed by their full dotted name. Plain modules contribute
/// their directory to their parent's entry instead.
#[derive(Debug, Clone, Default)]
pub struct ScopeMap {
  locations: BTreeMap<String, BTreeSet<PathBuf>>,
  packages: BTreeSet<String>,
}

impl ScopeMap {
  /// Derive the scope map from the two manifest tables.
  ///
  /// Relative directories from the wheel table are anchored to `root_dir`
  /// (build outputs are installed under a fixed root); source-tree
  /// directories are taken as-is.
  ///
  /// # Errors
  ///
  /// [`ScopeError::MalformedEntry`] when a module that needs a scope entry
  /// has a file with no parent directory.
  pub fn build(
    source_files: &BTreeMap<String, PathBuf>,
    wheel_files: &BTreeMap<String, PathBuf>,
    root_dir: &Path,
  ) -> Result<Self, ScopeError> {
    let mut locations: BTreeMap<String, BTreeSet<PathBuf>> = BTreeMap::new();
    let mut packages: BTreeSet<String> = BTreeSet::new();

    for (table, anchored) in [(source_files, false), (wheel_files, true)] {
      for (module, file) in table {
        let is_init = file
          .file_name()
          .is_some_and(|name| name == consts::PACKAGE_INIT);

        // An initializer makes the module itself the scope owner; anything
        // else contributes to its parent package.
        let owner = if is_init {
          packages.insert(module.clone());
          module.clone()
        } else {
          match module.rsplit_once('.') {
            Some((parent, _)) if !parent.is_empty() => parent.to_string(),
            // Root-level plain modules have no submodule search path.
            _ => continue,
          }
        };

        let dir = match file.parent() {
          Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
          _ => {
            return Err(ScopeError::MalformedEntry {
              module: module.clone(),
              file: file.clone(),
            });
          }
        };

        let dir = if anchored && dir.is_relative() {
          root_dir.join(dir)
        } else {
          dir
        };

        locations.entry(owner).or_default().insert(dir);
      }
    }

    debug!(
      packages = packages.len(),
      scoped = locations.len(),
      "derived submodule search scopes"
    );

    Ok(Self { locations, packages })
  }

  /// Search directories for `module`'s children, if it has any.
  pub fn search_locations(&self, module: &str) -> Option<Vec<PathBuf>> {
    self
      .locations
      .get(module)
      .map(|dirs| dirs.iter().cloned().collect())
  }

  /// Whether `module` was identified as a package.
  pub fn is_package(&self, module: &str) -> bool {
    self.packages.contains(module)
  }
}
