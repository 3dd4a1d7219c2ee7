//! Headland - dependency resolution for header-only binding libraries
//!
//! This crate provides the core library functionality for Headland:
//! locating a header-only library on the host system (or falling back to
//! the bundled in-tree copy) and exposing it as a reusable import target
//! that downstream build targets consume for include paths and, through
//! it, the host-language runtime they must link against.

pub mod core;
pub mod ops;
pub mod resolver;
pub mod stage;
pub mod util;

pub use crate::core::{
    dependency::HeaderLib,
    mode::ResolutionMode,
    target::{ImportTarget, LinkRef, Provenance},
};

pub use crate::resolver::Resolver;
pub use crate::util::config::Config;
pub use crate::util::shell::Shell;
