//! # Triage Console
//!
//! The interactive menu for the triage booking system: registration, login, booking and
//! queue display. Generic over its input and output streams so the whole session can be
//! driven from scripted input.

pub mod prompt;
pub mod session;

pub use prompt::Prompter;
pub use session::{MenuChoice, Session};
