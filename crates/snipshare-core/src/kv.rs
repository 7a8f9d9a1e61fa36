//! Ephemeral key-value storage with a per-record time-to-live.

mod cloudflare;
mod memory;

pub use cloudflare::CloudflareKv;
pub use memory::MemoryKv;

use crate::error::StoreError;
use async_trait::async_trait;
use std::time::Duration;

/// A key-value store whose records disappear once their TTL has elapsed.
///
/// `get` reports a key that was never written, or has expired, as `Ok(None)`.
/// Only transport or backend failures are errors.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn put(&self, key: &str, value: String, ttl: Duration) -> Result<(), StoreError>;

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
}
