//! Editable-install manifest types.
//!
//! The manifest is produced by the packaging orchestrator when it prepares an
//! editable install: it captures every known module location plus the rebuild
//! configuration, and is handed to [`crate::registry::install`] at startup.

mod types;

pub use types::*;
