//! Terminal rendering adapter.
//!
//! Everything the simulation core leaves out lives here: drawing the field,
//! the score panel and overlays, the ambient background cycling and block
//! blinking, and flushing frames to a real terminal.
//!
//! - [`fb`]: framebuffer of styled glyphs
//! - [`ambient`]: background/blink timers (visual only, never touch the game)
//! - [`game_view`]: pure `GameSnapshot` -> `FrameBuffer` mapping
//! - [`renderer`]: diffing terminal flush via crossterm

pub mod ambient;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use ambient::Ambient;
pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{GameView, Viewport};
pub use renderer::TerminalRenderer;
