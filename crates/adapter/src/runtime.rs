//! Adapter runtime integration.
//!
//! Bridges the synchronous game loop with the async TCP server. The game
//! loop stays the single writer of the session: it drains queued commands
//! with [`Adapter::pump`] between frames.

use std::net::SocketAddr;

use anyhow::{anyhow, Result};
use tokio::runtime::Runtime;
use tokio::sync::{mpsc, oneshot};
use tracing::warn;

use crate::core::{GameSession, GridSnapshot};
use crate::protocol::{
    build_observation, create_ack, create_error, AckMessage, ErrorCode, ErrorMessage,
    ObservationMessage,
};
use crate::server::{is_disabled, run_server, ServerConfig};
use crate::types::Coord;

/// Command delivered to the game loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundCommand {
    pub client_id: usize,
    pub seq: u64,
    pub command: ClientCommand,
}

/// Command payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCommand {
    /// Raw wire coordinates; bounds are checked against the live grid.
    Click { x: i32, y: i32 },
    Reset,
}

/// Outbound message to be delivered by the server.
#[derive(Debug, Clone)]
pub enum OutboundMessage {
    ToClientAck { client_id: usize, ack: AckMessage },
    ToClientError { client_id: usize, err: ErrorMessage },
    BroadcastObservation { obs: ObservationMessage },
}

/// Apply one inbound command to the session and build the reply.
pub fn apply_inbound(session: &mut GameSession, cmd: &InboundCommand) -> OutboundMessage {
    let client_id = cmd.client_id;
    match cmd.command {
        ClientCommand::Click { x, y } => match wire_coord(session, x, y) {
            Some(coord) => {
                let applied = session.click(coord).is_some();
                OutboundMessage::ToClientAck {
                    client_id,
                    ack: create_ack(cmd.seq, applied),
                }
            }
            None => OutboundMessage::ToClientError {
                client_id,
                err: create_error(
                    cmd.seq,
                    ErrorCode::OutOfBounds,
                    &format!(
                        "({x}, {y}) is outside the {}x{} grid",
                        session.grid().width(),
                        session.grid().height()
                    ),
                ),
            },
        },
        ClientCommand::Reset => {
            session.reset();
            OutboundMessage::ToClientAck {
                client_id,
                ack: create_ack(cmd.seq, true),
            }
        }
    }
}

fn wire_coord(session: &GameSession, x: i32, y: i32) -> Option<Coord> {
    let x = u8::try_from(x).ok()?;
    let y = u8::try_from(y).ok()?;
    let coord = Coord::new(x, y);
    session.grid().in_bounds(coord).then_some(coord)
}

/// Running adapter instance.
pub struct Adapter {
    _rt: Runtime,
    local_addr: SocketAddr,
    cmd_rx: mpsc::Receiver<InboundCommand>,
    out_tx: mpsc::UnboundedSender<OutboundMessage>,
    obs_seq: u64,
    published_revision: Option<u32>,
    snap: GridSnapshot,
}

impl Adapter {
    /// Start the adapter from environment variables.
    ///
    /// Returns `Ok(None)` if `BLOCK_GRID_AI_DISABLED` is set.
    pub fn start_from_env() -> Result<Option<Self>> {
        if is_disabled() {
            return Ok(None);
        }
        Self::start(ServerConfig::from_env()).map(Some)
    }

    /// Start the server on a dedicated runtime and wait until it is bound.
    ///
    /// Must not be called from inside an async context.
    pub fn start(config: ServerConfig) -> Result<Self> {
        let max_pending = config.max_pending_commands.max(1);
        let (cmd_tx, cmd_rx) = mpsc::channel::<InboundCommand>(max_pending);
        let (out_tx, out_rx) = mpsc::unbounded_channel::<OutboundMessage>();
        let (ready_tx, ready_rx) = oneshot::channel();

        let rt = Runtime::new()?;
        rt.spawn(async move {
            if let Err(e) = run_server(config, cmd_tx, out_rx, Some(ready_tx)).await {
                warn!(error = %e, "adapter server stopped");
            }
        });

        let local_addr = ready_rx
            .blocking_recv()
            .map_err(|_| anyhow!("adapter server failed to start"))?;

        Ok(Self {
            _rt: rt,
            local_addr,
            cmd_rx,
            out_tx,
            obs_seq: 0,
            published_revision: None,
            snap: GridSnapshot::default(),
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn try_recv(&mut self) -> Option<InboundCommand> {
        self.cmd_rx.try_recv().ok()
    }

    pub fn send(&self, msg: OutboundMessage) {
        let _ = self.out_tx.send(msg);
    }

    fn next_obs_seq(&mut self) -> u64 {
        self.obs_seq += 1;
        self.obs_seq
    }

    /// Apply every queued command, then broadcast an observation if the
    /// session changed since the last broadcast (locally or remotely).
    /// The first call always broadcasts, which seeds the server's cached
    /// observation for clients that connect later.
    ///
    /// Returns true if any command was processed.
    pub fn pump(&mut self, session: &mut GameSession) -> bool {
        let mut processed = false;
        while let Some(cmd) = self.try_recv() {
            let reply = apply_inbound(session, &cmd);
            self.send(reply);
            processed = true;
        }

        if self.published_revision != Some(session.revision()) {
            self.published_revision = Some(session.revision());
            session.snapshot_into(&mut self.snap);
            let seq = self.next_obs_seq();
            self.send(OutboundMessage::BroadcastObservation {
                obs: build_observation(&self.snap, seq),
            });
        }
        processed
    }
}
