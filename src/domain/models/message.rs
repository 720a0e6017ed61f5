#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Role;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageType {
    Normal,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    pub options: Vec<String>,
    pub multi_select: bool,
    pub is_checkpoint: bool,
    mtype: MessageType,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Message {
        return Message::new_with_type(role, MessageType::Normal, content);
    }

    pub fn new_with_type(role: Role, mtype: MessageType, content: &str) -> Message {
        return Message {
            role,
            content: content.replace('\t', "  "),
            options: vec![],
            multi_select: false,
            is_checkpoint: false,
            mtype,
        };
    }

    /// Attaches a choice set. Ignored for user messages, which never carry
    /// options.
    pub fn with_options(mut self, options: Vec<String>, multi_select: bool) -> Message {
        if self.role == Role::Bot {
            self.multi_select = multi_select && !options.is_empty();
            self.options = options;
        }

        return self;
    }

    pub fn with_checkpoint(mut self, is_checkpoint: bool) -> Message {
        self.is_checkpoint = self.role == Role::Bot && is_checkpoint;
        return self;
    }

    pub fn message_type(&self) -> MessageType {
        return self.mtype;
    }

    pub fn has_options(&self) -> bool {
        return !self.options.is_empty();
    }

    pub fn as_string_lines(&self, line_max_width: usize) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();

        for full_line in self.content.split('\n') {
            if full_line.trim().is_empty() {
                lines.push(" ".to_string());
                continue;
            }

            let mut char_count = 0;
            let mut current_lines: Vec<&str> = vec![];

            for word in full_line.split(' ') {
                let word_len = word.chars().count();
                if !current_lines.is_empty() && word_len + char_count + 1 > line_max_width {
                    lines.push(current_lines.join(" ").trim_end().to_string());
                    current_lines = vec![word];
                    char_count = word_len + 1;
                } else {
                    current_lines.push(word);
                    char_count += word_len + 1;
                }
            }
            if !current_lines.is_empty() {
                lines.push(current_lines.join(" ").trim_end().to_string());
            }
        }

        return lines;
    }
}
