//! GameView: maps a `core::GridSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Grid row 0 is the bottom row, so it is drawn on the last board line.

use crate::core::{GridSnapshot, SnapshotCell};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::Coord;

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const CLEARED_BG: Rgb = Rgb::new(245, 245, 245);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Controller adapter status shown in the side panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdapterStatusView {
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Screen placement of the board frame (border included).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// A lightweight terminal renderer for the block grid.
pub struct GameView {
    /// Block width in terminal columns.
    cell_w: u16,
    /// Block height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    fn frame(&self, snap: &GridSnapshot, viewport: Viewport) -> Frame {
        let w = (snap.width as u16) * self.cell_w + 2;
        let h = (snap.height as u16) * self.cell_h + 2;
        let x = viewport.width.saturating_sub(w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
            AnchorY::Top => 0,
        };
        Frame { x, y, w, h }
    }

    /// Top-left terminal position of grid block `(x, y)`.
    fn block_origin(&self, snap: &GridSnapshot, frame: Frame, x: u8, y: u8) -> (u16, u16) {
        let screen_row = (snap.height - 1 - y) as u16;
        (
            frame.x + 1 + x as u16 * self.cell_w,
            frame.y + 1 + screen_row * self.cell_h,
        )
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when
    /// the terminal size changes.
    pub fn render_into(&self, snap: &GridSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_adapter(snap, None, viewport, fb);
    }

    pub fn render_into_with_adapter(
        &self,
        snap: &GridSnapshot,
        adapter: Option<&AdapterStatusView>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let frame = self.frame(snap, viewport);
        let border = CellStyle::plain(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        fb.fill_rect(
            frame.x + 1,
            frame.y + 1,
            frame.w - 2,
            frame.h - 2,
            ' ',
            CellStyle::plain(BOARD_BG, BOARD_BG),
        );
        self.draw_border(fb, frame, border);

        for y in 0..snap.height {
            for x in 0..snap.width {
                if let Some(cell) = snap.get(x, y) {
                    self.draw_block(fb, snap, frame, x, y, cell);
                }
            }
        }

        if snap.get(snap.cursor.x, snap.cursor.y).is_some() {
            self.draw_cursor(fb, snap, frame);
        }

        self.draw_side_panel(fb, snap, adapter, viewport, frame);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GridSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    pub fn render_with_adapter(
        &self,
        snap: &GridSnapshot,
        adapter: Option<&AdapterStatusView>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into_with_adapter(snap, adapter, viewport, &mut fb);
        fb
    }

    /// Grid coordinate under terminal position `(col, row)`, if any.
    ///
    /// Uses the same layout as rendering, so it must be called with the
    /// viewport the frame was drawn for.
    pub fn hit_test(&self, snap: &GridSnapshot, viewport: Viewport, col: u16, row: u16) -> Option<Coord> {
        let frame = self.frame(snap, viewport);
        let left = frame.x + 1;
        let top = frame.y + 1;
        if col < left || row < top {
            return None;
        }
        let bx = (col - left) / self.cell_w;
        let screen_row = (row - top) / self.cell_h;
        if bx >= snap.width as u16 || screen_row >= snap.height as u16 {
            return None;
        }
        Some(Coord::new(bx as u8, snap.height - 1 - screen_row as u8))
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
        let Frame { x, y, w, h } = frame;
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_block(
        &self,
        fb: &mut FrameBuffer,
        snap: &GridSnapshot,
        frame: Frame,
        x: u8,
        y: u8,
        cell: SnapshotCell,
    ) {
        let (px, py) = self.block_origin(snap, frame, x, y);
        if cell.removable {
            let style = CellStyle {
                fg: Rgb::from(cell.color),
                bg: BOARD_BG,
                bold: true,
                dim: false,
            };
            fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
        } else {
            // Cleared placeholder: a blank white tile.
            let style = CellStyle {
                fg: Rgb::new(200, 200, 200),
                bg: CLEARED_BG,
                bold: false,
                dim: true,
            };
            fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
        }
    }

    fn draw_cursor(&self, fb: &mut FrameBuffer, snap: &GridSnapshot, frame: Frame) {
        let Coord { x, y } = snap.cursor;
        let (px, py) = self.block_origin(snap, frame, x, y);
        let bg = match snap.get(x, y) {
            Some(cell) if cell.removable => Rgb::from(cell.color),
            _ => CLEARED_BG,
        };
        let style = CellStyle {
            fg: Rgb::new(0, 0, 0),
            bg,
            bold: true,
            dim: false,
        };
        let right = px + self.cell_w - 1;
        for dy in 0..self.cell_h {
            fb.put_char(px, py + dy, '[', style);
            fb.put_char(right, py + dy, ']', style);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GridSnapshot,
        adapter: Option<&AdapterStatusView>,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        let value = CellStyle::plain(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let hint = CellStyle { dim: true, ..value };

        let mut y = frame.y;
        fb.put_str(panel_x, y, "BLOCKS LEFT", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.remaining, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "GAME", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.episode_id + 1, value);
        y = y.saturating_add(2);

        for line in ["arrows move", "space click", "r restart", "q quit"] {
            fb.put_str(panel_x, y, line, hint);
            y = y.saturating_add(1);
        }

        y = y.saturating_add(1);
        fb.put_str(panel_x, y, "AI", label);
        y = y.saturating_add(1);
        if let Some(st) = adapter {
            fb.put_str(panel_x, y, "ON", value);
            fb.put_u32(panel_x + 3, y, st.port as u32, hint);
        } else {
            fb.put_str(panel_x, y, "OFF", value);
        }
    }
}
