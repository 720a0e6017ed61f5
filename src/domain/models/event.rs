#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Carries the index of the message just appended to the log.
    MessageAppended(usize),
}
