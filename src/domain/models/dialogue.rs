#[cfg(test)]
#[path = "dialogue_test.rs"]
mod tests;

use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::IntakeError;

/// One user turn as it goes over the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueRequest {
    pub session_id: String,
    pub message: String,
}

impl DialogueRequest {
    pub fn new(session_id: &str, message: &str) -> DialogueRequest {
        return DialogueRequest {
            session_id: session_id.to_string(),
            message: message.to_string(),
        };
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DialogueReply {
    pub reply: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_select: Option<bool>,
    /// Case-notes snapshot the engine attaches to each reply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<serde_json::Value>,
}

impl DialogueReply {
    pub fn new(reply: &str) -> DialogueReply {
        return DialogueReply {
            reply: reply.to_string(),
            ..DialogueReply::default()
        };
    }

    pub fn options(&self) -> Vec<String> {
        return self.options.clone().unwrap_or_default();
    }

    pub fn is_multi_select(&self) -> bool {
        return self.multi_select.unwrap_or(false);
    }
}

#[async_trait]
pub trait DialogueService: Send + Sync {
    /// Used at startup to check the engine is reachable before the first turn.
    async fn health_check(&self) -> Result<(), IntakeError>;

    /// Sends one user turn and waits for the engine's answer to it. No retry
    /// is attempted.
    async fn send(&self, request: DialogueRequest) -> Result<DialogueReply, IntakeError>;
}

pub type DialogueServiceBox = Box<dyn DialogueService>;
