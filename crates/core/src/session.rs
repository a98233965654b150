//! Game session - the single owner of a grid
//!
//! Input collaborators (keyboard, mouse, remote controllers) talk to the
//! session, never to the grid directly. The session filters clicks to
//! removable blocks, keeps a keyboard cursor, and bumps `revision` whenever
//! the grid changes so renderers know to redraw.

use tracing::debug;

use crate::config::GridConfig;
use crate::grid::{ClearEvent, Grid};
use crate::rng::SimpleRng;
use crate::snapshot::GridSnapshot;
use crate::types::{Coord, GameAction, PALETTE};

#[derive(Debug, Clone)]
pub struct GameSession {
    config: GridConfig,
    grid: Grid,
    rng: SimpleRng,
    /// RNG state the current grid was dealt from
    seed: u32,
    cursor: Coord,
    /// Increments on every grid change (click or reset).
    revision: u32,
    /// Increments on reset.
    episode_id: u32,
    last_event: Option<ClearEvent>,
}

impl GameSession {
    /// Deal a grid from `config`. An unset seed deals from seed 1.
    pub fn new(config: GridConfig) -> Self {
        let mut rng = SimpleRng::new(config.seed.unwrap_or(1));
        let seed = rng.state();
        let grid = Grid::new(&config, &mut rng);
        Self::assemble(config, grid, rng, seed)
    }

    /// Start from a prepared grid. Resets deal from seed 1 with the full palette.
    pub fn with_grid(grid: Grid) -> Self {
        let config = GridConfig {
            width: grid.width(),
            height: grid.height(),
            colors: PALETTE.len() as u8,
            seed: None,
        };
        let rng = SimpleRng::new(1);
        let seed = rng.state();
        Self::assemble(config, grid, rng, seed)
    }

    fn assemble(config: GridConfig, grid: Grid, rng: SimpleRng, seed: u32) -> Self {
        Self {
            config,
            grid,
            rng,
            seed,
            cursor: Coord::default(),
            revision: 0,
            episode_id: 0,
            last_event: None,
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn cursor(&self) -> Coord {
        self.cursor
    }

    pub fn revision(&self) -> u32 {
        self.revision
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn last_event(&self) -> Option<&ClearEvent> {
        self.last_event.as_ref()
    }

    /// Take the last clear event (consumed by observers)
    pub fn take_last_event(&mut self) -> Option<ClearEvent> {
        self.last_event.take()
    }

    /// Click the block at `coord`.
    ///
    /// Out-of-bounds and already-cleared targets are ignored and return None.
    pub fn click(&mut self, coord: Coord) -> Option<ClearEvent> {
        if !self.grid.get(coord).is_some_and(|b| b.is_removable()) {
            return None;
        }

        let event = self.grid.handle_click(coord);
        self.revision = self.revision.wrapping_add(1);
        debug!(
            x = coord.x,
            y = coord.y,
            color = event.color.as_str(),
            cleared = event.cleared,
            remaining = self.grid.remaining(),
            revision = self.revision,
            "cleared region"
        );
        self.last_event = Some(event.clone());
        Some(event)
    }

    pub fn click_cursor(&mut self) -> Option<ClearEvent> {
        self.click(self.cursor)
    }

    /// Move the cursor; returns false (and stays put) at the boundary.
    pub fn move_cursor(&mut self, dx: i8, dy: i8) -> bool {
        match self
            .cursor
            .offset(dx, dy, self.grid.width(), self.grid.height())
        {
            Some(next) => {
                self.cursor = next;
                true
            }
            None => false,
        }
    }

    /// Place the cursor at `coord` if it is inside the grid.
    pub fn set_cursor(&mut self, coord: Coord) -> bool {
        if !self.grid.in_bounds(coord) {
            return false;
        }
        self.cursor = coord;
        true
    }

    /// Discard the grid and deal a fresh one with the same configuration.
    pub fn reset(&mut self) {
        self.seed = self.rng.state();
        self.grid = Grid::new(&self.config, &mut self.rng);
        self.episode_id = self.episode_id.wrapping_add(1);
        self.revision = self.revision.wrapping_add(1);
        self.last_event = None;
        debug!(
            episode_id = self.episode_id,
            seed = self.seed,
            "dealt new grid"
        );
    }

    /// Apply a game action. Returns true if anything changed.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::CursorLeft => self.move_cursor(-1, 0),
            GameAction::CursorRight => self.move_cursor(1, 0),
            GameAction::CursorUp => self.move_cursor(0, 1),
            GameAction::CursorDown => self.move_cursor(0, -1),
            GameAction::Click => self.click_cursor().is_some(),
            GameAction::Restart => {
                self.reset();
                true
            }
        }
    }

    pub fn snapshot_into(&self, out: &mut GridSnapshot) {
        out.width = self.grid.width();
        out.height = self.grid.height();
        self.grid.write_cells(&mut out.cells);
        out.cursor = self.cursor;
        out.revision = self.revision;
        out.episode_id = self.episode_id;
        out.seed = self.seed;
        out.remaining = self.grid.remaining() as u32;
    }

    pub fn snapshot(&self) -> GridSnapshot {
        let mut s = GridSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BlockColor;

    #[test]
    fn same_seed_deals_same_grid() {
        let a = GameSession::new(GridConfig::default().with_seed(99));
        let b = GameSession::new(GridConfig::default().with_seed(99));
        assert_eq!(a.grid(), b.grid());
    }

    #[test]
    fn click_bumps_revision_and_records_event() {
        let mut s = GameSession::with_grid(Grid::from_rows(&["oo", "by"]).unwrap());
        let ev = s.click(Coord::new(0, 1)).unwrap();
        assert_eq!(ev.cleared, 2);
        assert_eq!(s.revision(), 1);
        assert_eq!(s.last_event(), Some(&ev));
        assert_eq!(s.take_last_event(), Some(ev));
        assert!(s.last_event().is_none());
    }

    #[test]
    fn clicks_on_cleared_or_missing_blocks_are_ignored() {
        let mut s = GameSession::with_grid(Grid::from_rows(&[".o", "by"]).unwrap());
        assert!(s.click(Coord::new(0, 1)).is_none());
        assert!(s.click(Coord::new(7, 7)).is_none());
        assert_eq!(s.revision(), 0);
    }

    #[test]
    fn cursor_stays_inside() {
        let mut s = GameSession::with_grid(Grid::from_rows(&["oo", "by"]).unwrap());
        assert!(!s.apply_action(GameAction::CursorLeft));
        assert!(!s.apply_action(GameAction::CursorDown));
        assert!(s.apply_action(GameAction::CursorUp));
        assert!(s.apply_action(GameAction::CursorRight));
        assert_eq!(s.cursor(), Coord::new(1, 1));
        assert!(!s.apply_action(GameAction::CursorRight));
        assert!(!s.set_cursor(Coord::new(2, 0)));
    }

    #[test]
    fn click_action_uses_cursor() {
        let mut s = GameSession::with_grid(Grid::from_rows(&["oo", "by"]).unwrap());
        assert!(s.apply_action(GameAction::Click));
        // The blue block went; the orange above it fell into the cursor slot.
        assert_eq!(s.grid().block(Coord::new(0, 0)).color(), BlockColor::Orange);
        assert_eq!(s.grid().block(Coord::new(0, 1)).color(), BlockColor::Cleared);

        assert!(s.apply_action(GameAction::CursorUp));
        assert!(!s.apply_action(GameAction::Click));
    }

    #[test]
    fn reset_deals_fresh_removable_grid() {
        let mut s = GameSession::with_grid(Grid::from_rows(&["..", ".."]).unwrap());
        assert_eq!(s.grid().remaining(), 0);
        assert!(s.apply_action(GameAction::Restart));
        assert_eq!(s.grid().remaining(), 4);
        assert_eq!(s.episode_id(), 1);
        assert!(s.grid().blocks().all(|b| !b.color().is_sentinel()));
    }

    #[test]
    fn snapshot_reflects_session() {
        let mut s = GameSession::new(GridConfig::default().with_seed(5));
        s.click(Coord::new(4, 4));
        let snap = s.snapshot();
        assert_eq!(snap.width, 10);
        assert_eq!(snap.cells.len(), 100);
        assert_eq!(snap.revision, 1);
        assert_eq!(snap.remaining as usize, s.grid().remaining());
        assert_eq!(snap.seed, 5);
    }
}
