//! srclink-lib: import redirection for editable installs
//!
//! This crate provides the redirection layer a build backend installs for
//! "editable" development installs of a Python package:
//! - `manifest`: the name→file tables and rebuild configuration handed over
//!   by the packaging orchestrator
//! - `scope`: derives per-package submodule search directories from those
//!   tables
//! - `resolve`: answers module lookups from either the source tree or the
//!   native build output
//! - `rebuild`: runs the build tool's build and install steps before a
//!   redirect is served
//! - `registry`: the ordered resolver chain a host embeds

pub mod consts;
pub mod manifest;
pub mod rebuild;
pub mod registry;
pub mod resolve;
pub mod scope;
pub mod util;
