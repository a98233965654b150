//! Adjacency module - orthogonal neighbours of a block
//!
//! The lattice is a plain 4-neighbour grid; the only irregularity is the
//! boundary. A block is classified once by position:
//!
//! - **Corner**: on a horizontal and a vertical boundary, 2 neighbours
//! - **Edge**: on exactly one boundary, 3 neighbours
//! - **Interior**: 4 neighbours
//!
//! Corner classification is always tried before edge classification.
//! Neighbours come out in the fixed order above, right, below, left, skipping
//! directions the placement closes off. Colour and removability play no part.

use arrayvec::ArrayVec;

use crate::block::Block;
use crate::grid::Grid;
use crate::types::{Coord, Direction};

/// A grid boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    /// The direction that would cross this boundary
    pub fn outward(&self) -> Direction {
        match self {
            Side::Top => Direction::Above,
            Side::Right => Direction::Right,
            Side::Bottom => Direction::Below,
            Side::Left => Direction::Left,
        }
    }
}

/// Where a block sits relative to the grid boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    Corner { vertical: Side, horizontal: Side },
    Edge(Side),
    Interior,
}

impl Placement {
    /// Classify `coord` in a `width x height` grid (both at least 2).
    pub fn classify(coord: Coord, width: u8, height: u8) -> Placement {
        let vertical = if coord.y == 0 {
            Some(Side::Bottom)
        } else if coord.y == height - 1 {
            Some(Side::Top)
        } else {
            None
        };
        let horizontal = if coord.x == 0 {
            Some(Side::Left)
        } else if coord.x == width - 1 {
            Some(Side::Right)
        } else {
            None
        };

        match (vertical, horizontal) {
            (Some(vertical), Some(horizontal)) => Placement::Corner {
                vertical,
                horizontal,
            },
            (Some(side), None) | (None, Some(side)) => Placement::Edge(side),
            (None, None) => Placement::Interior,
        }
    }

    /// True if stepping in `dir` stays inside the grid
    pub fn is_open(&self, dir: Direction) -> bool {
        match self {
            Placement::Corner {
                vertical,
                horizontal,
            } => vertical.outward() != dir && horizontal.outward() != dir,
            Placement::Edge(side) => side.outward() != dir,
            Placement::Interior => true,
        }
    }

    /// 2 for corners, 3 for edges, 4 for interior blocks
    pub fn neighbour_count(&self) -> usize {
        match self {
            Placement::Corner { .. } => 2,
            Placement::Edge(_) => 3,
            Placement::Interior => 4,
        }
    }
}

/// Neighbouring coordinates of `coord`, above-right-below-left.
pub fn neighbour_coords(coord: Coord, width: u8, height: u8) -> ArrayVec<Coord, 4> {
    let placement = Placement::classify(coord, width, height);
    Direction::ALL
        .iter()
        .filter(|dir| placement.is_open(**dir))
        .map(|dir| {
            let (dx, dy) = dir.delta();
            Coord::new(
                (coord.x as i16 + dx as i16) as u8,
                (coord.y as i16 + dy as i16) as u8,
            )
        })
        .collect()
}

impl Grid {
    pub fn placement(&self, coord: Coord) -> Placement {
        Placement::classify(coord, self.width, self.height)
    }

    /// Neighbouring coordinates of an in-bounds `coord`
    pub fn neighbour_coords(&self, coord: Coord) -> ArrayVec<Coord, 4> {
        assert!(
            self.in_bounds(coord),
            "coordinate ({}, {}) outside {}x{} grid",
            coord.x,
            coord.y,
            self.width,
            self.height
        );
        neighbour_coords(coord, self.width, self.height)
    }

    /// Blocks orthogonally adjacent to `block`, above-right-below-left
    pub fn neighbours(&self, block: &Block) -> ArrayVec<&Block, 4> {
        self.neighbour_coords(block.coord())
            .into_iter()
            .map(|c| self.block(c))
            .collect()
    }
}
