#[cfg(test)]
#[path = "message_log_test.rs"]
mod tests;

use tokio::sync::mpsc;

use crate::domain::models::Event;
use crate::domain::models::Message;
use crate::domain::models::Role;

/// Append-only transcript of the conversation. Insertion order is both
/// conversation order and rendering order.
#[derive(Default)]
pub struct MessageLog {
    messages: Vec<Message>,
    subscribers: Vec<mpsc::UnboundedSender<Event>>,
}

impl MessageLog {
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);

        let index = self.messages.len() - 1;
        self.subscribers
            .retain(|tx| return tx.send(Event::MessageAppended(index)).is_ok());
    }

    pub fn all(&self) -> &[Message] {
        return &self.messages;
    }

    pub fn len(&self) -> usize {
        return self.messages.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.messages.is_empty();
    }

    pub fn get(&self, index: usize) -> Option<&Message> {
        return self.messages.get(index);
    }

    /// The most recent message, if it was written by the bot. Once the user
    /// answers, no bot message is live until the next reply lands.
    pub fn latest_bot_message(&self) -> Option<&Message> {
        return self
            .messages
            .last()
            .filter(|message| return message.role == Role::Bot);
    }

    /// Only the latest bot message accepts option clicks or checkbox
    /// toggles. Older prompts stay visible but inert.
    pub fn is_interactive(&self, index: usize) -> bool {
        return self.latest_bot_message().is_some() && index + 1 == self.messages.len();
    }

    /// Registers a listener notified after every append.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<Event> {
        let (tx, rx) = mpsc::unbounded_channel::<Event>();
        self.subscribers.push(tx);

        return rx;
    }
}
