//! TCP server for the controller adapter
//!
//! Handles incoming connections and the client lifecycle (handshake,
//! controller assignment, sequencing, backpressure). Grid changes never
//! happen here: mapped commands are queued for the game loop.

use std::net::SocketAddr;
use std::sync::Arc;

use serde::Serialize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot, RwLock};
use tracing::{debug, info, warn};

use crate::protocol::*;
use crate::runtime::{ClientCommand, InboundCommand, OutboundMessage};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 7878;
const DEFAULT_MAX_PENDING: usize = 16;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_pending_commands: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_pending_commands: DEFAULT_MAX_PENDING,
        }
    }
}

impl ServerConfig {
    /// Read `BLOCK_GRID_AI_HOST`, `BLOCK_GRID_AI_PORT` and
    /// `BLOCK_GRID_AI_MAX_PENDING`. Missing or unparsable values use defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("BLOCK_GRID_AI_HOST")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = lookup("BLOCK_GRID_AI_PORT")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let max_pending_commands = lookup("BLOCK_GRID_AI_MAX_PENDING")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_MAX_PENDING);

        Self {
            host,
            port,
            max_pending_commands,
        }
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

/// True when `BLOCK_GRID_AI_DISABLED` is `1` or `true`.
pub fn is_disabled() -> bool {
    std::env::var("BLOCK_GRID_AI_DISABLED")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Handle to a connected client
#[derive(Debug)]
struct ClientHandle {
    id: usize,
    handshaken: bool,
    stream_observations: bool,
    last_seq: Option<u64>,
    tx: mpsc::UnboundedSender<ClientOutbound>,
}

/// Connected clients plus the current controller.
///
/// `latest` is the last broadcast observation. Streaming clients get it right
/// after `welcome`, so a hello never has to go through the command queue.
#[derive(Debug, Default)]
struct Registry {
    clients: Vec<ClientHandle>,
    controller: Option<usize>,
    latest: Option<ObservationMessage>,
}

impl Registry {
    fn get(&self, id: usize) -> Option<&ClientHandle> {
        self.clients.iter().find(|c| c.id == id)
    }

    fn get_mut(&mut self, id: usize) -> Option<&mut ClientHandle> {
        self.clients.iter_mut().find(|c| c.id == id)
    }

    fn is_handshaken(&self, id: usize) -> bool {
        self.get(id).is_some_and(|c| c.handshaken)
    }

    fn is_controller(&self, id: usize) -> bool {
        self.controller == Some(id)
    }

    /// Record `seq` if it is strictly greater than the last one seen.
    fn advance_seq(&mut self, id: usize, seq: u64) -> bool {
        let Some(client) = self.get_mut(id) else {
            return false;
        };
        match client.last_seq {
            Some(prev) if seq <= prev => false,
            _ => {
                client.last_seq = Some(seq);
                true
            }
        }
    }

    /// Drop a client. Returns the newly promoted controller, if any.
    fn remove(&mut self, id: usize) -> Option<usize> {
        self.clients.retain(|c| c.id != id);
        if self.controller != Some(id) {
            return None;
        }
        self.controller = self
            .clients
            .iter()
            .filter(|c| c.handshaken)
            .map(|c| c.id)
            .min();
        self.controller
    }
}

#[derive(Debug, Clone)]
enum ClientOutbound {
    Welcome(WelcomeMessage),
    Ack(AckMessage),
    Error(ErrorMessage),
    Observation(ObservationMessage),
}

impl ClientOutbound {
    fn encode_into(&self, buf: &mut Vec<u8>) -> serde_json::Result<()> {
        fn write<T: Serialize>(buf: &mut Vec<u8>, v: &T) -> serde_json::Result<()> {
            serde_json::to_writer(&mut *buf, v)?;
            buf.push(b'\n');
            Ok(())
        }
        match self {
            ClientOutbound::Welcome(v) => write(buf, v),
            ClientOutbound::Ack(v) => write(buf, v),
            ClientOutbound::Error(v) => write(buf, v),
            ClientOutbound::Observation(v) => write(buf, v),
        }
    }
}

type SharedRegistry = Arc<RwLock<Registry>>;

/// Run the TCP server until the listener fails.
///
/// `ready_tx` receives the bound address once the listener is up (useful with
/// port 0).
pub async fn run_server(
    config: ServerConfig,
    command_tx: mpsc::Sender<InboundCommand>,
    mut out_rx: mpsc::UnboundedReceiver<OutboundMessage>,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    let listener = TcpListener::bind(config.socket_addr()?).await?;
    let bound = listener.local_addr()?;
    info!(%bound, "adapter listening");
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let registry: SharedRegistry = Arc::new(RwLock::new(Registry::default()));

    // Outbound dispatcher.
    {
        let registry = Arc::clone(&registry);
        tokio::spawn(async move {
            while let Some(msg) = out_rx.recv().await {
                let mut reg = registry.write().await;
                match msg {
                    OutboundMessage::ToClientAck { client_id, ack } => {
                        if let Some(c) = reg.get(client_id) {
                            let _ = c.tx.send(ClientOutbound::Ack(ack));
                        }
                    }
                    OutboundMessage::ToClientError { client_id, err } => {
                        if let Some(c) = reg.get(client_id) {
                            let _ = c.tx.send(ClientOutbound::Error(err));
                        }
                    }
                    OutboundMessage::BroadcastObservation { obs } => {
                        for c in reg.clients.iter().filter(|c| c.handshaken && c.stream_observations) {
                            let _ = c.tx.send(ClientOutbound::Observation(obs.clone()));
                        }
                        reg.latest = Some(obs);
                    }
                }
            }
        });
    }

    let mut client_id_counter = 0usize;
    loop {
        let (socket, addr) = listener.accept().await?;
        client_id_counter += 1;
        let client_id = client_id_counter;
        info!(client_id, %addr, "client connected");

        let registry = Arc::clone(&registry);
        let command_tx = command_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = handle_client(socket, addr, client_id, registry, command_tx).await {
                warn!(client_id, error = %e, "client error");
            }
            info!(client_id, "client disconnected");
        });
    }
}

async fn handle_client(
    socket: TcpStream,
    addr: SocketAddr,
    client_id: usize,
    registry: SharedRegistry,
    command_tx: mpsc::Sender<InboundCommand>,
) -> anyhow::Result<()> {
    let (reader, mut writer) = socket.into_split();
    let mut reader = BufReader::new(reader);
    let (tx, mut rx) = mpsc::unbounded_channel::<ClientOutbound>();

    debug!(client_id, %addr, "registering client");
    registry.write().await.clients.push(ClientHandle {
        id: client_id,
        handshaken: false,
        stream_observations: false,
        last_seq: None,
        tx: tx.clone(),
    });

    let write_task = tokio::spawn(async move {
        let mut buf: Vec<u8> = Vec::with_capacity(4096);
        while let Some(msg) = rx.recv().await {
            buf.clear();
            if msg.encode_into(&mut buf).is_err() {
                continue;
            }
            if writer.write_all(&buf).await.is_err() || writer.flush().await.is_err() {
                break;
            }
        }
    });

    let result = read_loop(&mut reader, client_id, &registry, &command_tx, &tx).await;

    // Remove the client and hand control to the next one in line.
    {
        let mut reg = registry.write().await;
        let was_controller = reg.is_controller(client_id);
        let promoted = reg.remove(client_id);
        match promoted {
            Some(new_id) => info!(client_id = new_id, "controller promoted"),
            None if was_controller => info!(client_id, "controller released"),
            None => {}
        }
    }

    drop(tx);
    let _ = write_task.await;
    result
}

async fn read_loop(
    reader: &mut BufReader<tokio::net::tcp::OwnedReadHalf>,
    client_id: usize,
    registry: &SharedRegistry,
    command_tx: &mpsc::Sender<InboundCommand>,
    tx: &mpsc::UnboundedSender<ClientOutbound>,
) -> anyhow::Result<()> {
    let reply_error = |seq: u64, code: ErrorCode, message: &str| {
        let _ = tx.send(ClientOutbound::Error(create_error(seq, code, message)));
    };

    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            return Ok(());
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        debug!(client_id, line = trimmed, "recv");

        match parse_message(trimmed) {
            Ok(ParsedMessage::Hello(hello)) => {
                let mut reg = registry.write().await;
                if reg.is_handshaken(client_id) && !reg.advance_seq(client_id, hello.seq) {
                    reply_error(hello.seq, ErrorCode::InvalidCommand, "seq must be strictly increasing");
                    continue;
                }

                if !hello.protocol_version.starts_with(PROTOCOL_MAJOR) {
                    reply_error(
                        hello.seq,
                        ErrorCode::ProtocolMismatch,
                        &format!("protocol version {} not supported", hello.protocol_version),
                    );
                    return Ok(());
                }

                if let Some(client) = reg.get_mut(client_id) {
                    client.handshaken = true;
                    client.stream_observations = hello.stream_observations;
                    client.last_seq = Some(hello.seq);
                }
                if reg.controller.is_none() {
                    reg.controller = Some(client_id);
                    info!(client_id, name = %hello.client.name, "client is now controller");
                }
                let role = if reg.is_controller(client_id) {
                    AssignedRole::Controller
                } else {
                    AssignedRole::Observer
                };
                let controller_id = reg.controller.map(|id| id as u64);

                // Queued under the lock so no broadcast can overtake the welcome.
                let welcome = create_welcome(hello.seq, client_id as u64, role, controller_id);
                let _ = tx.send(ClientOutbound::Welcome(welcome));
                if hello.stream_observations {
                    if let Some(obs) = &reg.latest {
                        let _ = tx.send(ClientOutbound::Observation(obs.clone()));
                    }
                }
            }

            Ok(ParsedMessage::Command(cmd)) => {
                {
                    let mut reg = registry.write().await;
                    if !reg.is_handshaken(client_id) {
                        reply_error(cmd.seq, ErrorCode::HandshakeRequired, "send hello before command");
                        continue;
                    }
                    if !reg.advance_seq(client_id, cmd.seq) {
                        reply_error(cmd.seq, ErrorCode::InvalidCommand, "seq must be strictly increasing");
                        continue;
                    }
                    if !reg.is_controller(client_id) {
                        reply_error(cmd.seq, ErrorCode::NotController, "only the controller may send commands");
                        continue;
                    }
                }

                let command = match map_command(&cmd) {
                    Ok(c) => c,
                    Err(message) => {
                        reply_error(cmd.seq, ErrorCode::InvalidCommand, &message);
                        continue;
                    }
                };

                // Ack is sent by the game loop once the command is applied.
                if command_tx
                    .try_send(InboundCommand {
                        client_id,
                        seq: cmd.seq,
                        command,
                    })
                    .is_err()
                {
                    reply_error(cmd.seq, ErrorCode::Backpressure, "command queue is full");
                }
            }

            Ok(ParsedMessage::Unknown(unknown)) => {
                let mut reg = registry.write().await;
                if reg.is_handshaken(client_id) && !reg.advance_seq(client_id, unknown.seq) {
                    reply_error(unknown.seq, ErrorCode::InvalidCommand, "seq must be strictly increasing");
                    continue;
                }
                reply_error(unknown.seq, ErrorCode::InvalidCommand, "unknown message type");
            }

            Err(e) => {
                let seq = extract_seq_best_effort(trimmed).unwrap_or(0);
                reply_error(seq, ErrorCode::InvalidCommand, &format!("JSON parse error: {e}"));
            }
        }
    }
}

/// Map a wire command onto a game-loop command.
fn map_command(cmd: &CommandMessage) -> Result<ClientCommand, String> {
    if cmd.action.eq_ignore_ascii_case("click") {
        match (cmd.x, cmd.y) {
            (Some(x), Some(y)) => Ok(ClientCommand::Click { x, y }),
            _ => Err("click requires x and y".to_string()),
        }
    } else if cmd.action.eq_ignore_ascii_case("reset") || cmd.action.eq_ignore_ascii_case("restart") {
        Ok(ClientCommand::Reset)
    } else {
        Err(format!("unknown action: {}", cmd.action))
    }
}
