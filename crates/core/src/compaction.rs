//! Compaction module - per-column gravity after a clear
//!
//! A column is split in one stable pass into active blocks and cleared
//! placeholders, then rebuilt as `active ++ cleared` with rows renumbered from
//! 0 (the bottom). Relative order inside each group never changes, and blocks
//! never move between columns.

use crate::block::Block;
use crate::grid::Grid;

impl Grid {
    /// Compact a single column.
    pub fn compact_column(&mut self, x: u8) {
        assert!(x < self.width, "column {} outside grid of width {}", x, self.width);

        let column = std::mem::take(&mut self.columns[x as usize]);
        let (mut reordered, cleared): (Vec<Block>, Vec<Block>) =
            column.into_iter().partition(|b| b.is_removable());
        reordered.extend(cleared);

        for (y, block) in reordered.iter_mut().enumerate() {
            block.set_row(y as u8);
        }
        self.columns[x as usize] = reordered;
    }

    pub(crate) fn compact_columns(&mut self, columns: &[u8]) {
        for &x in columns {
            self.compact_column(x);
        }
    }
}
