use anyhow::Result;
use async_trait::async_trait;

/// Durable key/value capability backing anything the client must remember
/// between runs.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;

    async fn remove(&self, key: &str) -> Result<()>;
}

pub type KeyValueStoreBox = Box<dyn KeyValueStore>;
