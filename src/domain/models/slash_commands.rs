#[cfg(test)]
#[path = "slash_commands_test.rs"]
mod tests;

pub struct SlashCommand {
    command: String,
}

impl SlashCommand {
    pub fn parse(text: &str) -> Option<SlashCommand> {
        let prefix = text.split_whitespace().next()?;
        let cmd = SlashCommand {
            command: prefix.to_string(),
        };
        if cmd.is_quit() || cmd.is_help() || cmd.is_notes() || cmd.is_session() {
            return Some(cmd);
        }

        return None;
    }

    pub fn is_quit(&self) -> bool {
        return ["/q", "/quit", "/exit"].contains(&self.command.as_str());
    }

    pub fn is_help(&self) -> bool {
        return ["/h", "/help"].contains(&self.command.as_str());
    }

    pub fn is_notes(&self) -> bool {
        return ["/n", "/notes"].contains(&self.command.as_str());
    }

    pub fn is_session(&self) -> bool {
        return ["/s", "/session"].contains(&self.command.as_str());
    }
}
