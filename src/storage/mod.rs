//! Durable local storage for cart snapshots.

pub mod cart_storage;
mod error;
pub mod file;
pub mod memory;

pub use cart_storage::*;
pub use error::*;
pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;

/// Byte-string key-value medium that survives a process restart.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;
    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;
}
