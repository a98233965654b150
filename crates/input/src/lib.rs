//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key and mouse events into [`crate::types::GameAction`]s and
//! screen positions. Turning a screen position into a grid coordinate is the
//! view's job (see `block_grid_term::GameView::hit_test`), since only the view
//! knows where it drew the board.

pub mod map;

pub use block_grid_types as types;

pub use map::{handle_key_event, mouse_click, should_quit};
