use super::Message;
use super::TurnState;

/// What the input area should offer the user right now. Derived from the
/// turn state and the latest bot message, never stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Affordance {
    pub placeholder: &'static str,
    pub action_label: &'static str,
    pub enabled: bool,
}

impl Affordance {
    pub fn derive(turn_state: TurnState, latest_bot: Option<&Message>) -> Affordance {
        if turn_state.is_busy() {
            return Affordance {
                placeholder: "Typing...",
                action_label: "Send",
                enabled: false,
            };
        }

        if latest_bot.map_or(false, |message| return message.is_checkpoint) {
            return Affordance {
                placeholder: "Please confirm the summary above...",
                action_label: "Confirm",
                enabled: true,
            };
        }

        return Affordance {
            placeholder: "Type your medical history...",
            action_label: "Send",
            enabled: true,
        };
    }
}
