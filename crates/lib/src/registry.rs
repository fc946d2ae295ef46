//! The host's component-lookup chain.
//!
//! Instead of mutating a process-global finder list, the chain is an
//! explicit, ordered registry owned by the host: resolvers are asked in
//! order, the first answer wins, and declines fall through to the next
//! participant.

use std::path::PathBuf;

use tracing::info;

use crate::manifest::EditableManifest;
use crate::resolve::{ComponentResolver, EditableResolver, ModuleSpec, ResolveError};
use crate::scope::ScopeError;

/// An ordered list of component resolvers.
#[derive(Default)]
pub struct LoaderContext {
  resolvers: Vec<Box<dyn ComponentResolver>>,
}

impl LoaderContext {
  pub fn new() -> Self {
    Self::default()
  }

  /// Register a resolver ahead of everything already in the chain.
  pub fn register_front(&mut self, resolver: Box<dyn ComponentResolver>) {
    self.resolvers.insert(0, resolver);
  }

  /// Register a resolver behind everything already in the chain.
  pub fn register_back(&mut self, resolver: Box<dyn ComponentResolver>) {
    self.resolvers.push(resolver);
  }

  pub fn len(&self) -> usize {
    self.resolvers.len()
  }

  pub fn is_empty(&self) -> bool {
    self.resolvers.is_empty()
  }

  /// Ask each resolver in order; the first answer wins.
  ///
  /// `Ok(None)` means no participant knows the name. Errors stop the walk
  /// and surface to the caller that triggered the lookup.
  pub fn resolve(&self, name: &str) -> Result<Option<ModuleSpec>, ResolveError> {
    for resolver in &self.resolvers {
      if let Some(spec) = resolver.resolve(name)? {
        return Ok(Some(spec));
      }
    }
    Ok(None)
  }
}

/// Install the editable redirect resolver at the front of the chain.
///
/// Derives the submodule search scopes once, wires the rebuild
/// configuration into an [`EditableResolver`], and registers it with the
/// highest priority. Calling this twice registers two resolvers; the most
/// recent one shadows the other for overlapping names. Deduplication is the
/// caller's responsibility.
pub fn install(
  ctx: &mut LoaderContext,
  manifest: EditableManifest,
  root_dir: impl Into<PathBuf>,
) -> Result<(), ScopeError> {
  let modules = manifest.source_files.len() + manifest.wheel_files.len();
  let resolver = EditableResolver::new(manifest, root_dir.into())?;
  info!(modules, "installing editable redirect resolver");
  ctx.register_front(Box::new(resolver));
  Ok(())
}
