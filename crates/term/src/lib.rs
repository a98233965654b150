//! Terminal "game renderer" module.
//!
//! A small rendering layer for terminal play. It renders a
//! [`GridSnapshot`](crate::core::GridSnapshot) into a framebuffer that can be
//! flushed to a terminal backend, and maps terminal positions back to grid
//! coordinates for mouse clicks.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Keep the view pure so layout and hit testing are unit-testable
//! - Draw each block 2 chars wide to compensate for glyph aspect ratio

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use block_grid_core as core;
pub use block_grid_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AdapterStatusView, AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
