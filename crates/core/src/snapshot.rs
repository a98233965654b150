use crate::grid::Grid;
use crate::types::{BlockColor, Coord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SnapshotCell {
    pub color: BlockColor,
    pub removable: bool,
}

impl Default for SnapshotCell {
    fn default() -> Self {
        Self {
            color: BlockColor::Cleared,
            removable: false,
        }
    }
}

/// Read-only view of a session for renderers and remote controllers.
///
/// `cells` is row-major with row 0 at the bottom: `cells[y * width + x]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GridSnapshot {
    pub width: u8,
    pub height: u8,
    pub cells: Vec<SnapshotCell>,
    pub cursor: Coord,
    pub revision: u32,
    pub episode_id: u32,
    pub seed: u32,
    pub remaining: u32,
}

impl GridSnapshot {
    pub fn get(&self, x: u8, y: u8) -> Option<SnapshotCell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Colour codes row by row, top row first (the on-screen order)
    pub fn code_rows(&self) -> Vec<Vec<u8>> {
        (0..self.height)
            .rev()
            .map(|y| {
                (0..self.width)
                    .map(|x| self.get(x, y).map(|c| c.color.code()).unwrap_or(0))
                    .collect()
            })
            .collect()
    }
}

impl Grid {
    /// Write the per-cell state into `out`, reusing its allocation.
    pub fn write_cells(&self, out: &mut Vec<SnapshotCell>) {
        let width = self.width as usize;
        out.clear();
        out.resize(width * self.height as usize, SnapshotCell::default());
        for block in self.blocks() {
            out[block.y() as usize * width + block.x() as usize] = SnapshotCell {
                color: block.color(),
                removable: block.is_removable(),
            };
        }
    }
}
