//! Package binding routine.
//!
//! This module wires the wrapping namespace to the loaded native extension:
//! guard against rebinding, flatten public symbols, rebind the four version
//! identifiers, and register submodule aliases. Binding either completes
//! fully or fails before anything is written.

mod binder;

pub use binder::{bind_package, BindError, BindOutcome, BindReport, BindingState};
