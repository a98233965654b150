//! Grid module - owns every block and handles clicks
//!
//! Storage is column-major: `columns[x][y]`, with `y = 0` the bottom row.
//! Every in-bounds coordinate maps to exactly one block at all times. Blocks
//! are never removed from storage, only cleared in place and reordered
//! within their column by compaction.

use std::collections::BTreeSet;

use crate::block::Block;
use crate::config::GridConfig;
use crate::rng::ColorSource;
use crate::types::{BlockColor, Coord, MIN_GRID_DIM};

/// What a single click changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearEvent {
    /// The clicked coordinate (before compaction)
    pub origin: Coord,
    /// Colour of the cleared region
    pub color: BlockColor,
    /// Number of blocks cleared
    pub cleared: usize,
    /// Columns that were compacted, ascending
    pub columns: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub(crate) width: u8,
    pub(crate) height: u8,
    pub(crate) columns: Vec<Vec<Block>>,
    /// Working set of the click in progress; reset at the start of every click.
    pub(crate) flagged: BTreeSet<Coord>,
}

impl Grid {
    /// Deal a fresh grid: every block removable, colours drawn from `source`.
    ///
    /// Blocks are dealt column by column, bottom to top.
    pub fn new(config: &GridConfig, source: &mut impl ColorSource) -> Self {
        assert!(
            config.width >= MIN_GRID_DIM && config.height >= MIN_GRID_DIM,
            "grid must be at least {}x{}",
            MIN_GRID_DIM,
            MIN_GRID_DIM
        );
        let palette = config.palette();
        let columns = (0..config.width)
            .map(|x| {
                (0..config.height)
                    .map(|y| Block::new(x, y, source.next_color(palette)))
                    .collect()
            })
            .collect();

        Self {
            width: config.width,
            height: config.height,
            columns,
            flagged: BTreeSet::new(),
        }
    }

    /// Build a grid from a picture, top row first.
    ///
    /// Letters `o y b p` are palette colours and `.` is a cleared block.
    /// Whitespace is ignored. Returns None for ragged, unknown or too-small input.
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        let parsed: Vec<Vec<BlockColor>> = rows
            .iter()
            .map(|row| {
                row.chars()
                    .filter(|c| !c.is_whitespace())
                    .map(|c| BlockColor::from_str(c.encode_utf8(&mut [0; 4])))
                    .collect::<Option<Vec<_>>>()
            })
            .collect::<Option<Vec<_>>>()?;

        let height = parsed.len();
        let width = parsed.first()?.len();
        if parsed.iter().any(|row| row.len() != width)
            || width < MIN_GRID_DIM as usize
            || height < MIN_GRID_DIM as usize
            || width > u8::MAX as usize
            || height > u8::MAX as usize
        {
            return None;
        }

        let columns = (0..width)
            .map(|x| {
                (0..height)
                    .map(|y| {
                        let color = parsed[height - 1 - y][x];
                        Block::new(x as u8, y as u8, color)
                    })
                    .collect()
            })
            .collect();

        Some(Self {
            width: width as u8,
            height: height as u8,
            columns,
            flagged: BTreeSet::new(),
        })
    }

    /// Render back to the picture format accepted by [`Grid::from_rows`].
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.height)
            .rev()
            .map(|y| {
                (0..self.width)
                    .map(|x| self.columns[x as usize][y as usize].color().as_char())
                    .collect()
            })
            .collect()
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    /// Block at `coord`, or None if out of bounds
    pub fn get(&self, coord: Coord) -> Option<&Block> {
        self.columns
            .get(coord.x as usize)
            .and_then(|col| col.get(coord.y as usize))
    }

    /// Block at `coord`. Panics if `coord` is outside the grid.
    pub fn block(&self, coord: Coord) -> &Block {
        assert!(
            self.in_bounds(coord),
            "coordinate ({}, {}) outside {}x{} grid",
            coord.x,
            coord.y,
            self.width,
            self.height
        );
        &self.columns[coord.x as usize][coord.y as usize]
    }

    /// Blocks of column `x`, bottom first
    pub fn column(&self, x: u8) -> &[Block] {
        &self.columns[x as usize]
    }

    /// All blocks, column by column
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.columns.iter().flatten()
    }

    /// Number of blocks still in play
    pub fn remaining(&self) -> usize {
        self.blocks().filter(|b| b.is_removable()).count()
    }

    /// Blocks flagged by the most recent click
    pub fn flagged(&self) -> impl Iterator<Item = Coord> + '_ {
        self.flagged.iter().copied()
    }

    /// Clear the region containing `origin`, then compact the touched columns.
    ///
    /// Removability of `origin` is not re-checked; callers only forward clicks
    /// on active blocks. A region of one block is cleared like any other.
    pub fn handle_click(&mut self, origin: Coord) -> ClearEvent {
        self.flagged.clear();

        let region = self.same_color_region(origin);
        self.flagged.extend(region.iter());

        let Self {
            columns, flagged, ..
        } = self;
        for c in flagged.iter() {
            columns[c.x as usize][c.y as usize].clear();
        }

        // Flagged coordinates are sorted by column first.
        let mut touched: Vec<u8> = self.flagged.iter().map(|c| c.x).collect();
        touched.dedup();
        self.compact_columns(&touched);

        ClearEvent {
            origin,
            color: region.color(),
            cleared: self.flagged.len(),
            columns: touched,
        }
    }
}
