//! Partner context serialization contract

use crate::{PeerHabitError, Result};

/// Parse/serialize pair for the opaque partner context.
///
/// The registry never looks inside `Context`.
pub trait ContextCodec: Send + Sync {
    /// In-memory context type
    type Context;

    /// Parse a stored context
    fn parse_context(&self, raw: &str) -> Result<Self::Context>;

    /// Serialize a context for storage
    fn serialize_context(&self, context: &Self::Context) -> Result<String>;
}

/// Stores contexts as JSON documents
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonContextCodec;

impl ContextCodec for JsonContextCodec {
    type Context = serde_json::Value;

    fn parse_context(&self, raw: &str) -> Result<Self::Context> {
        serde_json::from_str(raw)
            .map_err(|e| PeerHabitError::context(format!("Invalid partner context: {}", e)))
    }

    fn serialize_context(&self, context: &Self::Context) -> Result<String> {
        Ok(serde_json::to_string(context)?)
    }
}
