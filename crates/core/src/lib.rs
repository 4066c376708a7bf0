//! Simulation core for blockfall - pure, deterministic, and testable.
//!
//! This crate holds the grid simulation and nothing else: no rendering, no
//! terminal, no timers of its own. Time enters through
//! [`GameState::tick`](game_state::GameState::tick) and input through
//! [`GameState::apply_action`](game_state::GameState::apply_action).
//!
//! # Module Structure
//!
//! - [`cell`]: a single occupied grid cell
//! - [`group`]: block groups - movement, rotation, freeze transition
//! - [`registry`]: settled registry and the collision queries over it
//! - [`line_clear`]: row clearing, gravity collapse and cascades
//! - [`score`]: running score
//! - [`rng`]: deterministic shape/color generator
//! - [`game_state`]: the controller tying everything together
//! - [`snapshot`]: immutable state for renderers
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::{GameAction, GameEvent, DROP_INTERVAL_MS};
//!
//! let mut game = GameState::new(12345);
//! game.start().unwrap();
//!
//! game.apply_action(GameAction::MoveRight).unwrap();
//! game.tick(DROP_INTERVAL_MS).unwrap();
//!
//! assert!(!game.game_over());
//! assert!(matches!(game.take_events()[0], GameEvent::Spawned { .. }));
//! ```

pub mod cell;
pub mod error;
pub mod game_state;
pub mod group;
pub mod line_clear;
pub mod registry;
pub mod rng;
pub mod score;
pub mod snapshot;

pub use blockfall_types as types;

pub use cell::Cell;
pub use error::TetrisError;
pub use game_state::GameState;
pub use group::{BlockGroup, DropOutcome, RotateOutcome};
pub use line_clear::{clear_full_rows, ClearedRows};
pub use registry::SettledRegistry;
pub use rng::{ShapeGenerator, SimpleRng};
pub use score::ScoreTracker;
pub use snapshot::{CellSnapshot, GameSnapshot};
