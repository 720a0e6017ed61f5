#[cfg(test)]
#[path = "checkpoint_test.rs"]
mod tests;

/// Heading the dialogue engine opens its "summarize & confirm" turn with.
pub const CHECKPOINT_MARKER: &str = "Section A: My Understanding";

pub struct CheckpointDetector {}

impl CheckpointDetector {
    pub fn classify(reply_text: &str) -> bool {
        return reply_text.contains(CHECKPOINT_MARKER);
    }
}
