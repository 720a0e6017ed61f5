mod checkpoint;
mod message_log;
mod selections;
mod session_identity;
mod turn_controller;

pub use checkpoint::*;
pub use message_log::*;
pub use selections::*;
pub use session_identity::*;
pub use turn_controller::*;
