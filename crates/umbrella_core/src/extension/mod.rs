//! Native extension collaborator contracts.
//!
//! This module defines the opaque surface the binding layer consumes from the
//! native extension: attribute enumeration with structural kind tags, version
//! metadata, and the loading contract. The extension's own functionality is
//! out of scope; only its export shape is modeled here.

pub mod loader;
pub mod metadata;
pub mod module;
