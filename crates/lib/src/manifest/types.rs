//! Manifest types for editable installs.
//!
//! # Structure
//!
//! The manifest contains two independently-populated tables:
//! - `source_files`: module name → file in the project source tree
//! - `wheel_files`: module name → file placed by the build tool's install
//!   step, relative to the install root
//!
//! plus the configuration for the optional pre-import rebuild.
//!
//! # Serialization
//!
//! The manifest is fully serializable so the orchestrator can write it next
//! to the installed redirect stub and the host can load it back at startup.
//! [`BTreeMap`] keys keep the serialized form deterministic.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The complete hand-off from the packaging orchestrator.
///
/// Keys across the two tables may overlap; `wheel_files` wins during
/// resolution since it reflects the freshest compiled artifacts.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditableManifest {
  /// Module name → source-tree file (absolute or caller-relative).
  #[serde(default)]
  pub source_files: BTreeMap<String, PathBuf>,

  /// Module name → build-output file, relative to the install root.
  #[serde(default)]
  pub wheel_files: BTreeMap<String, PathBuf>,

  /// Local build directory to rebuild in, if one is configured.
  #[serde(default)]
  pub build_dir: Option<PathBuf>,

  /// Rebuild before serving a build-output redirect.
  #[serde(default)]
  pub rebuild: bool,

  /// Stream build tool output while rebuilding.
  #[serde(default)]
  pub verbose: bool,

  /// Extra arguments for the build step.
  #[serde(default)]
  pub build_options: Vec<String>,

  /// Extra arguments for the install step.
  #[serde(default)]
  pub install_options: Vec<String>,
}

impl EditableManifest {
  /// Parse a manifest from its serialized JSON form.
  pub fn from_json(text: &str) -> serde_json::Result<Self> {
    serde_json::from_str(text)
  }

  /// Serialize the manifest to JSON.
  pub fn to_json(&self) -> serde_json::Result<String> {
    serde_json::to_string(self)
  }
}
