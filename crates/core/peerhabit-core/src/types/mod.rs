//! Collaborator contracts consumed by the registry

pub mod context;
pub mod localization;
pub mod storage;

pub use context::*;
pub use localization::*;
pub use storage::*;
