//! High-level operations driven by the CLI.

pub mod resolve;
pub mod stage;

pub use resolve::{resolve_target, ResolveOptions};
pub use stage::{stage_headers, StageOptions};
