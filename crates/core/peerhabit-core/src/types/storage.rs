//! Key-value storage contract

use crate::Result;
use async_trait::async_trait;
use std::collections::HashSet;

/// The five primitives the registry needs from a storage engine.
///
/// Each call is assumed atomic on its own. Nothing is assumed across calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a scalar value
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a scalar value, replacing any previous one
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Add a member to a set
    async fn set_add(&self, set_key: &str, member: &str) -> Result<()>;

    /// Test set membership
    async fn set_is_member(&self, set_key: &str, member: &str) -> Result<bool>;

    /// All members of a set, in no particular order
    async fn set_members(&self, set_key: &str) -> Result<HashSet<String>>;
}
