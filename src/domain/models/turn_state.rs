#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TurnState {
    #[default]
    Idle,
    AwaitingReply,
}

impl TurnState {
    pub fn is_busy(&self) -> bool {
        return *self == TurnState::AwaitingReply;
    }
}
