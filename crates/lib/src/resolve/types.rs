//! Resolution result types.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::rebuild::RebuildError;

/// Errors raised while resolving a module name.
///
/// A name absent from both tables is not an error; resolvers decline it with
/// `Ok(None)` instead.
#[derive(Debug, Error)]
pub enum ResolveError {
  /// The pre-import rebuild failed; the resolution attempt fails with it.
  #[error("rebuild failed: {0}")]
  Rebuild(#[from] RebuildError),
}

/// Which tree the resolved file came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
  /// The project source tree.
  Source,
  /// The build tool's install output.
  Built,
}

/// A successful resolution: the physical file backing a module name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSpec {
  /// The dotted module name as requested.
  pub name: String,

  /// The file to load the module from.
  pub path: PathBuf,

  /// Directories to search for submodules, when the module has any.
  pub search_locations: Option<Vec<PathBuf>>,

  /// Whether the module is a package (its file is a package initializer).
  pub package: bool,

  /// Which tree `path` points into.
  pub origin: Origin,
}

impl ModuleSpec {
  /// A read binding for the resolved file.
  pub fn reader(&self) -> FileReader {
    FileReader {
      path: self.path.clone(),
    }
  }
}

/// Reads the contents of a resolved module file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReader {
  path: PathBuf,
}

impl FileReader {
  /// The physical file this reader is bound to.
  pub fn path(&self) -> &Path {
    &self.path
  }

  pub fn read(&self) -> io::Result<Vec<u8>> {
    std::fs::read(&self.path)
  }

  pub fn read_to_string(&self) -> io::Result<String> {
    std::fs::read_to_string(&self.path)
  }
}
