//! Robot state model

pub mod attributes;
pub mod feedback;
pub mod naming;
pub mod registry;
pub mod summary;

pub use attributes::{AttributeCodec, AttributeSpec, CodecKind, DEFAULT_ZERO_DAY};
pub use feedback::{evaluate_feedback_rating, MAX_RATING};
pub use naming::random_name;
pub use registry::{RobotProfile, RobotRegistry};
pub use summary::compose_summary;
