//! TetrECS (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof so binaries, tests and
//! benches can write `tetrecs::core::GameEngine` and friends. The
//! implementation lives in dedicated crates under `crates/`.

pub use tetrecs_core as core;
pub use tetrecs_ledger as ledger;
pub use tetrecs_multiplayer as multiplayer;
pub use tetrecs_types as types;
