//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. There is no
//! auto-repeat handling: every key press is one command, as with the browser
//! buttons the game was designed around.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};
