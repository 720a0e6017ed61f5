mod affordance;
mod case_notes;
mod dialogue;
mod error;
mod event;
mod message;
mod role;
mod session;
mod slash_commands;
mod storage;
mod turn_state;

pub use affordance::*;
pub use case_notes::*;
pub use dialogue::*;
pub use error::*;
pub use event::*;
pub use message::*;
pub use role::*;
pub use session::*;
pub use slash_commands::*;
pub use storage::*;
pub use turn_state::*;
