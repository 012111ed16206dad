//! Peer-habit core
//!
//! State model for a population of simulated "robot" agents that take part in
//! daily habit check-ins alongside human users:
//!
//! - Unique, never-reused robot identities
//! - Typed per-robot attributes over a plain key-value store, including sparse
//!   day-indexed score/response/feedback series
//! - A noisy feedback-score to rating transform
//! - Localized daily summaries with streak commentary
//!
//! # Example
//!
//! ```no_run
//! use peerhabit_core::*;
//! use rand::SeedableRng;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<()> {
//! let registry = RobotRegistry::new(
//!     Arc::new(MemoryStore::new()),
//!     Arc::new(StringCatalog::english()?),
//! );
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let id = registry.create_robot(&mut rng).await?;
//! registry.set_response(&id, 7121, 3).await?;
//! println!("{}", registry.summarize(&id, 7121).await?);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod memory_store;
pub mod robot;
pub mod templates;
pub mod types;
pub mod utils;

pub use config::{load_env, load_env_from_path, RegistryConfig};
pub use error::{PeerHabitError, Result};
pub use memory_store::MemoryStore;
pub use robot::{
    compose_summary, evaluate_feedback_rating, random_name, AttributeCodec, AttributeSpec,
    CodecKind, RobotProfile, RobotRegistry, DEFAULT_ZERO_DAY, MAX_RATING,
};
pub use templates::StringCatalog;
pub use types::{
    ContextCodec, JsonContextCodec, KeyValueStore, Localizer, Message, NameVocabulary,
};
pub use utils::init_logging;
