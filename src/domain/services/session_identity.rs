#[cfg(test)]
#[path = "session_identity_test.rs"]
mod tests;

use std::iter;

use anyhow::Result;
use once_cell::sync::OnceCell;
use rand::Rng;

use crate::domain::models::KeyValueStoreBox;
use crate::domain::models::Session;
use crate::domain::models::SESSION_PREFIX;

pub const SESSION_STORAGE_KEY: &str = "ivf_session_id";

const SESSION_SUFFIX_LEN: usize = 12;
const CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Hands out the one session id this client uses with the dialogue engine,
/// creating and persisting it on first use.
pub struct SessionIdentity {
    store: KeyValueStoreBox,
    session: OnceCell<Session>,
}

impl SessionIdentity {
    pub fn new(store: KeyValueStoreBox) -> SessionIdentity {
        return SessionIdentity {
            store,
            session: OnceCell::new(),
        };
    }

    pub fn create_id() -> String {
        let mut rng = rand::thread_rng();
        let one_char = || return CHARSET[rng.gen_range(0..CHARSET.len())] as char;
        let suffix = iter::repeat_with(one_char)
            .take(SESSION_SUFFIX_LEN)
            .collect::<String>();

        return format!("{SESSION_PREFIX}{suffix}");
    }

    pub async fn get_or_create_session_id(&self) -> String {
        if let Some(session) = self.session.get() {
            return session.id.to_string();
        }

        let session = self.resolve().await;
        return self.session.get_or_init(|| return session).id.to_string();
    }

    /// Removes the persisted id so the next run starts a fresh conversation.
    /// The id already handed out in this process is kept.
    pub async fn forget(&self) -> Result<()> {
        return self.store.remove(SESSION_STORAGE_KEY).await;
    }

    async fn resolve(&self) -> Session {
        match self.store.get(SESSION_STORAGE_KEY).await {
            Ok(Some(id)) if Session::is_valid_id(&id) => {
                tracing::debug!(session_id = id, "reusing stored session");
                return Session::new(&id);
            }
            Ok(Some(id)) => {
                tracing::warn!(stored = id, "stored session id is malformed, replacing it");
            }
            Ok(None) => (),
            Err(err) => {
                tracing::warn!(error = ?err, "session storage unavailable, using an in-memory session");
                return Session::new(&SessionIdentity::create_id());
            }
        }

        let session = Session::new(&SessionIdentity::create_id());
        if let Err(err) = self.store.set(SESSION_STORAGE_KEY, &session.id).await {
            tracing::warn!(error = ?err, "failed to persist session id, it will only last for this run");
        } else {
            tracing::debug!(session_id = session.id, "created session");
        }

        return session;
    }
}
