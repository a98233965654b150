//! Block grid puzzle (workspace facade crate).
//!
//! Re-exports the member crates under `block_grid::{types, core, input, term, adapter}`
//! so the binary, integration tests and benches share one import path.

pub use block_grid_adapter as adapter;
pub use block_grid_core as core;
pub use block_grid_input as input;
pub use block_grid_term as term;
pub use block_grid_types as types;
