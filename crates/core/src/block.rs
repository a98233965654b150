//! Block module - a single grid cell

use crate::types::{BlockColor, Coord};

/// One cell of the grid.
///
/// `x` is fixed at creation; `y` is only rewritten by compaction so that it
/// always matches the block's index in its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    x: u8,
    y: u8,
    color: BlockColor,
    removable: bool,
}

impl Block {
    /// Create an active block
    pub fn new(x: u8, y: u8, color: BlockColor) -> Self {
        Self {
            x,
            y,
            color,
            removable: !color.is_sentinel(),
        }
    }

    pub fn x(&self) -> u8 {
        self.x
    }

    pub fn y(&self) -> u8 {
        self.y
    }

    pub fn coord(&self) -> Coord {
        Coord::new(self.x, self.y)
    }

    pub fn color(&self) -> BlockColor {
        self.color
    }

    /// True while the block is an active, clickable tile
    pub fn is_removable(&self) -> bool {
        self.removable
    }

    pub fn set_color(&mut self, color: BlockColor) {
        self.color = color;
    }

    pub fn set_removable(&mut self, removable: bool) {
        self.removable = removable;
    }

    /// Turn the block into a cleared placeholder. Idempotent.
    pub fn clear(&mut self) {
        self.set_color(BlockColor::Cleared);
        self.set_removable(false);
    }

    pub(crate) fn set_row(&mut self, y: u8) {
        self.y = y;
    }
}
