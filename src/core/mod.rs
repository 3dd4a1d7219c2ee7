//! Core data model: resolution mode, dependency spec, import target.

pub mod dependency;
pub mod mode;
pub mod target;

pub use dependency::HeaderLib;
pub use mode::ResolutionMode;
pub use target::{ImportTarget, LinkRef, Provenance};
