//! Terminal block grid runner (default binary).
//!
//! Keyboard and mouse drive the session directly; external controllers go
//! through the TCP adapter. Both are drained on the same thread, so every
//! click runs to completion before the next one is looked at.

use std::fs::OpenOptions;
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use block_grid::adapter::Adapter;
use block_grid::core::{GameSession, GridConfig, GridSnapshot};
use block_grid::input::{handle_key_event, mouse_click, should_quit};
use block_grid::term::{AdapterStatusView, FrameBuffer, GameView, TerminalRenderer, Viewport};

const FRAME_MS: u64 = 50;

fn main() -> Result<()> {
    init_logging()?;

    let mut config = GridConfig::from_env()?;
    if config.seed.is_none() {
        config.seed = Some(clock_seed());
    }
    info!(
        width = config.width,
        height = config.height,
        colors = config.colors,
        seed = config.seed,
        "starting"
    );
    let session = GameSession::new(config);

    let adapter = match Adapter::start_from_env() {
        Ok(adapter) => adapter,
        Err(e) => {
            warn!(error = %e, "controller adapter unavailable");
            None
        }
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, session, adapter);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Install a file-backed subscriber when `BLOCK_GRID_LOG_PATH` is set.
///
/// The terminal belongs to the game, so logs never go to stdout/stderr.
fn init_logging() -> Result<()> {
    let Some(path) = std::env::var_os("BLOCK_GRID_LOG_PATH") else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.to_string_lossy()))?;
    let filter = EnvFilter::try_from_env("BLOCK_GRID_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn clock_seed() -> u32 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    (nanos as u32) ^ ((nanos >> 32) as u32)
}

fn run(term: &mut TerminalRenderer, mut session: GameSession, mut adapter: Option<Adapter>) -> Result<()> {
    let view = GameView::default();
    let status = adapter.as_ref().map(|a| AdapterStatusView {
        port: a.local_addr().port(),
    });

    let mut snap = GridSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut viewport = terminal_viewport();
    let mut drawn: Option<(u32, u16, u16, u8, u8)> = None;

    loop {
        // Render only when something visible changed.
        let key = (
            session.revision(),
            viewport.width,
            viewport.height,
            session.cursor().x,
            session.cursor().y,
        );
        if drawn != Some(key) {
            session.snapshot_into(&mut snap);
            view.render_into_with_adapter(&snap, status.as_ref(), viewport, &mut fb);
            term.draw_swap(&mut fb)?;
            drawn = Some(key);
        }

        if event::poll(Duration::from_millis(FRAME_MS))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        session.apply_action(action);
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some((col, row)) = mouse_click(mouse) {
                        if let Some(coord) = view.hit_test(&snap, viewport, col, row) {
                            session.set_cursor(coord);
                            session.click(coord);
                        }
                    }
                }
                Event::Resize(w, h) => {
                    viewport = Viewport::new(w, h);
                    term.invalidate();
                }
                _ => {}
            }
        }

        if let Some(adapter) = adapter.as_mut() {
            adapter.pump(&mut session);
        }
    }
}

fn terminal_viewport() -> Viewport {
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    Viewport::new(w, h)
}
