use serde_derive::Deserialize;
use serde_derive::Serialize;

pub const SESSION_PREFIX: &str = "session_";

/// Shortest random suffix accepted as a valid stored session id.
pub const SESSION_MIN_SUFFIX_LEN: usize = 9;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
}

impl Session {
    pub fn new(id: &str) -> Session {
        return Session { id: id.to_string() };
    }

    pub fn is_valid_id(id: &str) -> bool {
        if let Some(suffix) = id.strip_prefix(SESSION_PREFIX) {
            return suffix.len() >= SESSION_MIN_SUFFIX_LEN
                && suffix.chars().all(|c| return c.is_ascii_alphanumeric());
        }

        return false;
    }
}
