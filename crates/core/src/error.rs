//! Error taxonomy for the simulation core.
//!
//! Every variant is a programmer error: callers are expected to propagate it
//! and abort, never to recover and keep playing. Game over is a normal
//! terminal state and is not represented here.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TetrisError {
    /// A cell was created with a negative coordinate.
    #[error("invalid cell construction at ({x}, {y}): coordinates must be non-negative")]
    InvalidConstruction { x: i32, y: i32 },

    /// A block group was asked to make a transition it cannot make.
    #[error("invalid state transition: {0}")]
    InvalidStateTransition(&'static str),
}

pub type Result<T> = std::result::Result<T, TetrisError>;
