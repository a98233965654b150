//! Region module - connected same-colour search
//!
//! Depth-first over an explicit stack with a visited bitmap, so the search
//! never recurses and terminates on the cyclic grid graph. Every candidate is
//! compared with the origin's colour, not its predecessor's, so the result is
//! the maximal connected set sharing that colour. Runs in O(width * height).

use crate::grid::Grid;
use crate::types::{BlockColor, Coord};

/// A connected set of same-coloured blocks. Always contains its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    color: BlockColor,
    /// Discovery order; the origin is first
    cells: Vec<Coord>,
}

impl Region {
    pub fn color(&self) -> BlockColor {
        self.color
    }

    pub fn origin(&self) -> Coord {
        self.cells[0]
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; kept alongside `len`
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.cells.contains(&coord)
    }

    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells.iter().copied()
    }
}

impl Grid {
    /// The maximal region of `origin`'s colour connected to `origin`.
    pub fn same_color_region(&self, origin: Coord) -> Region {
        let target = self.block(origin).color();
        let width = self.width as usize;
        let index = |c: Coord| c.y as usize * width + c.x as usize;

        let mut visited = vec![false; width * self.height as usize];
        let mut stack = vec![origin];
        let mut cells = Vec::new();
        visited[index(origin)] = true;

        while let Some(current) = stack.pop() {
            cells.push(current);
            for next in self.neighbour_coords(current) {
                let i = index(next);
                if visited[i] || self.block(next).color() != target {
                    continue;
                }
                visited[i] = true;
                stack.push(next);
            }
        }

        Region {
            color: target,
            cells,
        }
    }
}
