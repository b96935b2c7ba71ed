//! Installable components.
//!
//! - [`spec`] - Immutable component descriptors
//! - [`builtin`] - The built-in component table
//! - [`registry`] - Lookup by name, merged with config overrides

pub mod builtin;
pub mod registry;
pub mod spec;

pub use builtin::builtin_components;
pub use registry::ComponentRegistry;
pub use spec::{Category, ComponentSpec};
