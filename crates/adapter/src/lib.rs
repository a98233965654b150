//! Adapter module - external controllers over TCP with a JSON protocol
//!
//! Lets bots and scripts drive the game through a TCP socket while the
//! terminal UI keeps running.
//!
//! # Protocol Overview
//!
//! The adapter speaks a **line-delimited JSON protocol** over TCP:
//!
//! 1. **Connection**: client connects (default `127.0.0.1:7878`)
//! 2. **Handshake**: client sends `hello`, server answers `welcome`
//! 3. **Controller assignment**: the first client to hello is the controller;
//!    later clients observe. When the controller leaves, the lowest remaining
//!    client id takes over.
//! 4. **Commanding**: the controller sends `click` / `reset` commands, each
//!    answered by an `ack` (or an `error`)
//! 5. **Observations**: clients that asked for `stream_observations` get the
//!    full grid after every change
//!
//! # Error codes
//!
//! `handshake_required`, `protocol_mismatch`, `not_controller`,
//! `invalid_command`, `out_of_bounds`, `backpressure`.
//!
//! # Environment Variables
//!
//! - `BLOCK_GRID_AI_HOST`: bind address (default `127.0.0.1`)
//! - `BLOCK_GRID_AI_PORT`: port number (default `7878`)
//! - `BLOCK_GRID_AI_MAX_PENDING`: command queue length (default 16)
//! - `BLOCK_GRID_AI_DISABLED`: `1` or `true` disables the adapter
//!
//! # Example Protocol Flow
//!
//! ```text
//! C: {"type":"hello","seq":1,"ts":0,"client":{"name":"bot","version":"0.1"},"protocol_version":"1.0.0","stream_observations":true}
//! S: {"type":"welcome","seq":1,"ts":...,"protocol_version":"1.0.0","game_id":"block-grid","client_id":1,"role":"controller","controller_id":1}
//! S: {"type":"observation","seq":1,"ts":...,"episode_id":0,"seed":42,"revision":0,"remaining":100,"board":{"width":10,"height":10,"cells":[[...]]}}
//! C: {"type":"command","seq":2,"ts":0,"action":"click","x":3,"y":0}
//! S: {"type":"ack","seq":2,"ts":...,"status":"ok","applied":true}
//! ```
//!
//! Board cells are colour codes, top row first: `0` cleared, `1` orange,
//! `2` yellow, `3` blue, `4` pink. Command coordinates use row 0 = bottom.

pub mod protocol;
pub mod runtime;
pub mod server;

pub use block_grid_core as core;
pub use block_grid_types as types;

// Re-export protocol types for convenience
pub use protocol::*;
pub use runtime::{apply_inbound, Adapter, ClientCommand, InboundCommand, OutboundMessage};
pub use server::{is_disabled, run_server, ServerConfig};
