//! Messages exchanged during a run and the role's memory of them.

pub mod memory;
pub mod message;

pub use memory::{Memory, format_history};
pub use message::{ActionKind, Message};
