//! blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so the runner, the
//! integration tests and the benches can write `blockfall::core::GameState`.
//! The implementation lives in the dedicated crates under `crates/`.

pub mod cli;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;
