#[cfg(test)]
#[path = "turn_controller_test.rs"]
mod tests;

use tokio::sync::mpsc;

use super::CheckpointDetector;
use super::MessageLog;
use super::SelectionAggregator;
use crate::domain::models::Affordance;
use crate::domain::models::CaseNotes;
use crate::domain::models::DialogueReply;
use crate::domain::models::DialogueRequest;
use crate::domain::models::DialogueServiceBox;
use crate::domain::models::Event;
use crate::domain::models::IntakeError;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::Role;
use crate::domain::models::TurnState;
use crate::domain::models::ERROR_REPLY_TEXT;

/// Runs the request/response cycle with the dialogue engine. The only writer
/// of the message log, and the owner of the busy/idle turn state.
pub struct TurnController {
    session_id: String,
    service: DialogueServiceBox,
    log: MessageLog,
    selections: SelectionAggregator,
    turn_state: TurnState,
    case_state: Option<serde_json::Value>,
}

impl TurnController {
    pub fn new(session_id: &str, service: DialogueServiceBox) -> TurnController {
        return TurnController {
            session_id: session_id.to_string(),
            service,
            log: MessageLog::default(),
            selections: SelectionAggregator::default(),
            turn_state: TurnState::Idle,
            case_state: None,
        };
    }

    pub fn session_id(&self) -> &str {
        return &self.session_id;
    }

    pub fn log(&self) -> &MessageLog {
        return &self.log;
    }

    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<Event> {
        return self.log.subscribe();
    }

    pub fn turn_state(&self) -> TurnState {
        return self.turn_state;
    }

    pub fn selections(&self) -> &[String] {
        return self.selections.current();
    }

    pub fn affordance(&self) -> Affordance {
        return Affordance::derive(self.turn_state, self.log.latest_bot_message());
    }

    pub fn case_notes(&self) -> Option<CaseNotes> {
        return self.case_state.as_ref().map(CaseNotes::from_state);
    }

    pub fn is_multi_select_pending(&self) -> bool {
        return self
            .log
            .latest_bot_message()
            .map_or(false, |message| return message.multi_select);
    }

    /// Ticks or unticks a checkbox of the latest multi-select prompt.
    /// Returns false, changing nothing, when no such prompt is live or the
    /// option isn't one it offered.
    pub fn toggle(&mut self, option: &str, included: bool) -> bool {
        if self.turn_state.is_busy() || !self.is_multi_select_pending() {
            return false;
        }

        let offered = self
            .log
            .latest_bot_message()
            .map_or(false, |message| return message.options.iter().any(|e| return e == option));
        if !offered {
            return false;
        }

        self.selections.toggle(option, included);
        return true;
    }

    /// Sends one user turn and appends the engine's answer. `None` submits the
    /// staged selections of a pending multi-select prompt; `Some` sends the
    /// given text, whether typed or an option label.
    ///
    /// Engine failures are answered in the log with an error message and do
    /// not surface here. Only refused submissions return an error, and those
    /// leave every piece of state untouched.
    pub async fn submit(&mut self, text: Option<&str>) -> Result<(), IntakeError> {
        let request = self.begin(text)?;
        self.dispatch(request).await;

        return Ok(());
    }

    /// Sends a turn opened with `begin` and records whatever comes back.
    pub async fn dispatch(&mut self, request: DialogueRequest) {
        let result = self.service.send(request).await;
        self.finish(result);
    }

    /// First half of `submit`: validates the turn, records the user message
    /// and locks the controller until `finish` is called.
    pub fn begin(&mut self, text: Option<&str>) -> Result<DialogueRequest, IntakeError> {
        if self.turn_state.is_busy() {
            tracing::debug!("submit rejected, a reply is still pending");
            return Err(IntakeError::Busy);
        }

        let resolved = match text {
            Some(text) => text.to_string(),
            None if self.is_multi_select_pending() => self.selections.commit()?,
            None => return Err(IntakeError::EmptySubmission),
        };
        if resolved.trim().is_empty() {
            return Err(IntakeError::EmptySubmission);
        }

        self.selections.clear();
        self.log.append(Message::new(Role::User, &resolved));
        self.turn_state = TurnState::AwaitingReply;
        tracing::debug!(session_id = self.session_id, "awaiting reply");

        return Ok(DialogueRequest::new(&self.session_id, &resolved));
    }

    /// Second half of `submit`: pairs the pending user message with a bot
    /// message and releases the lock.
    pub fn finish(&mut self, result: Result<DialogueReply, IntakeError>) {
        if !self.turn_state.is_busy() {
            tracing::warn!("dropping a reply that arrived with no turn pending");
            return;
        }

        let message = match result {
            Ok(reply) => {
                let is_checkpoint = CheckpointDetector::classify(&reply.reply);
                if reply.state.is_some() {
                    self.case_state = reply.state.clone();
                }

                Message::new(Role::Bot, &reply.reply)
                    .with_options(reply.options(), reply.is_multi_select())
                    .with_checkpoint(is_checkpoint)
            }
            Err(err) => {
                tracing::error!(error = ?err, "dialogue engine call failed");
                Message::new_with_type(Role::Bot, MessageType::Error, ERROR_REPLY_TEXT)
            }
        };

        self.selections.clear();
        self.log.append(message);
        self.turn_state = TurnState::Idle;
        tracing::debug!(messages = self.log.len(), "turn finished");
    }
}
