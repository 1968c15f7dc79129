//! Game orchestration: the session state machine, turn phases, and the
//! outbound event stream.

pub mod events;
pub mod session;
pub mod turn;
