#[cfg(test)]
#[path = "file_test.rs"]
mod tests;

use std::collections::BTreeMap;
use std::path;

use anyhow::Result;
use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::KeyValueStore;

/// Keeps every key in a single YAML map on disk, rewritten in full on each
/// change.
pub struct FileStore {
    pub file_path: path::PathBuf,
}

impl Default for FileStore {
    fn default() -> FileStore {
        return FileStore::new(path::PathBuf::from(Config::get(ConfigKey::StorageFile)));
    }
}

impl FileStore {
    pub fn new(file_path: path::PathBuf) -> FileStore {
        return FileStore { file_path };
    }

    async fn read(&self) -> Result<BTreeMap<String, String>> {
        if !self.file_path.exists() {
            return Ok(BTreeMap::new());
        }

        let payload = fs::read_to_string(&self.file_path).await?;
        if payload.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        let values: BTreeMap<String, String> = serde_yaml::from_str(&payload)?;
        return Ok(values);
    }

    async fn write(&self, values: &BTreeMap<String, String>) -> Result<()> {
        let payload = serde_yaml::to_string(values)?;

        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).await?;
            }
        }

        let mut file = fs::File::create(&self.file_path).await?;
        file.write_all(payload.as_bytes()).await?;
        file.flush().await?;

        return Ok(());
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.read().await?;
        return Ok(values.get(key).cloned());
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.read().await?;
        values.insert(key.to_string(), value.to_string());

        return self.write(&values).await;
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.read().await?;
        if values.remove(key).is_none() {
            return Ok(());
        }

        return self.write(&values).await;
    }
}
