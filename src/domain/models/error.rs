use thiserror::Error;

/// Shown in place of a reply whenever the dialogue engine can't be reached or
/// answers with something unreadable.
pub const ERROR_REPLY_TEXT: &str = "Error connecting to server.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
    #[error("request to the dialogue engine failed: {0}")]
    NetworkFailure(String),

    #[error("dialogue engine returned an unexpected response: {0}")]
    MalformedResponse(String),

    #[error("no options were selected")]
    EmptySelection,

    #[error("nothing to send")]
    EmptySubmission,

    #[error("still waiting for the previous reply")]
    Busy,
}
