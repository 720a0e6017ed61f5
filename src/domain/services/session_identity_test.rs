use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;

use super::SessionIdentity;
use super::SESSION_STORAGE_KEY;
use crate::domain::models::KeyValueStore;
use crate::domain::models::Session;
use crate::infrastructure::storage::MemoryStore;

struct UnavailableStore {}

#[async_trait]
impl KeyValueStore for UnavailableStore {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        bail!("storage is offline");
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<()> {
        bail!("storage is offline");
    }

    async fn remove(&self, _key: &str) -> Result<()> {
        bail!("storage is offline");
    }
}

struct ReadOnlyStore {}

#[async_trait]
impl KeyValueStore for ReadOnlyStore {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        return Ok(None);
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<()> {
        bail!("storage is read only");
    }

    async fn remove(&self, _key: &str) -> Result<()> {
        return Ok(());
    }
}

#[test]
fn it_creates_prefixed_ids() {
    let id = SessionIdentity::create_id();

    assert!(id.starts_with("session_"));
    assert_eq!(id.len(), "session_".len() + 12);
    assert!(Session::is_valid_id(&id));
    assert!(id["session_".len()..]
        .chars()
        .all(|c| return c.is_ascii_digit() || c.is_ascii_lowercase()));
}

#[test]
fn it_creates_distinct_ids() {
    assert_ne!(SessionIdentity::create_id(), SessionIdentity::create_id());
}

#[tokio::test]
async fn it_returns_the_same_id_within_a_process() {
    let identity = SessionIdentity::new(Box::<MemoryStore>::default());

    let first = identity.get_or_create_session_id().await;
    let second = identity.get_or_create_session_id().await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn it_persists_new_ids() -> Result<()> {
    let store = MemoryStore::default();
    let identity = SessionIdentity::new(Box::new(store.clone()));

    let id = identity.get_or_create_session_id().await;

    assert_eq!(store.get(SESSION_STORAGE_KEY).await?, Some(id));
    return Ok(());
}

#[tokio::test]
async fn it_reuses_stored_ids() -> Result<()> {
    let store = MemoryStore::default();
    store.set(SESSION_STORAGE_KEY, "session_abc123xyz").await?;

    let identity = SessionIdentity::new(Box::new(store.clone()));

    assert_eq!(
        identity.get_or_create_session_id().await,
        "session_abc123xyz"
    );
    return Ok(());
}

#[tokio::test]
async fn it_generates_once_per_fresh_store() -> Result<()> {
    let store = MemoryStore::default();

    let first_run = SessionIdentity::new(Box::new(store.clone()));
    let created = first_run.get_or_create_session_id().await;

    let second_run = SessionIdentity::new(Box::new(store.clone()));
    assert_eq!(second_run.get_or_create_session_id().await, created);

    let fresh_run = SessionIdentity::new(Box::<MemoryStore>::default());
    assert_ne!(fresh_run.get_or_create_session_id().await, created);
    return Ok(());
}

#[tokio::test]
async fn it_replaces_malformed_stored_ids() -> Result<()> {
    let store = MemoryStore::default();
    store.set(SESSION_STORAGE_KEY, "session_").await?;

    let identity = SessionIdentity::new(Box::new(store.clone()));
    let id = identity.get_or_create_session_id().await;

    assert!(Session::is_valid_id(&id));
    assert_eq!(store.get(SESSION_STORAGE_KEY).await?, Some(id));
    return Ok(());
}

#[tokio::test]
async fn it_degrades_to_memory_when_storage_is_unavailable() {
    let identity = SessionIdentity::new(Box::new(UnavailableStore {}));

    let first = identity.get_or_create_session_id().await;
    let second = identity.get_or_create_session_id().await;

    assert!(Session::is_valid_id(&first));
    assert_eq!(first, second);
}

#[tokio::test]
async fn it_keeps_the_id_when_persisting_fails() {
    let identity = SessionIdentity::new(Box::new(ReadOnlyStore {}));

    let first = identity.get_or_create_session_id().await;
    assert_eq!(identity.get_or_create_session_id().await, first);
}

#[tokio::test]
async fn it_forgets_the_stored_id() -> Result<()> {
    let store = MemoryStore::default();
    let identity = SessionIdentity::new(Box::new(store.clone()));
    let id = identity.get_or_create_session_id().await;

    identity.forget().await?;

    assert_eq!(store.get(SESSION_STORAGE_KEY).await?, None);
    assert_eq!(identity.get_or_create_session_id().await, id);
    return Ok(());
}
