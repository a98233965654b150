//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core rules, terminal rendering, controller protocol).
//!
//! # Grid Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 10 rows (indexed 0-9, **bottom to top**)
//!
//! Row 0 is the bottom of a column. Gravity pulls active blocks toward row 0
//! and cleared placeholders rise to the top rows.
//!
//! # Palette
//!
//! | Colour | Hex | Code |
//! |--------|-----|------|
//! | `Cleared` (sentinel) | `#ffffff` | 0 |
//! | `Orange` | `#ff7e1c` | 1 |
//! | `Yellow` | `#ffce00` | 2 |
//! | `Blue` | `#66c9ff` | 3 |
//! | `Pink` | `#ff82c6` | 4 |
//!
//! # Examples
//!
//! ```
//! use block_grid_types::{BlockColor, Coord, GameAction, GRID_HEIGHT, GRID_WIDTH, PALETTE};
//!
//! assert_eq!(GRID_WIDTH, 10);
//! assert_eq!(GRID_HEIGHT, 10);
//! assert_eq!(PALETTE.len(), 4);
//!
//! // Parse from string (case-insensitive)
//! assert_eq!(BlockColor::from_str("Blue"), Some(BlockColor::Blue));
//! assert!(BlockColor::Cleared.is_sentinel());
//!
//! let c = Coord::new(3, 0);
//! assert_eq!((c.x, c.y), (3, 0));
//!
//! assert_eq!(GameAction::from_str("click"), Some(GameAction::Click));
//! ```

/// Default grid width in blocks (10 columns)
pub const GRID_WIDTH: u8 = 10;

/// Default grid height in blocks (10 rows)
pub const GRID_HEIGHT: u8 = 10;

/// Default number of playable colours drawn from [`PALETTE`]
pub const DEFAULT_COLORS: u8 = 4;

/// Smallest supported width/height.
///
/// Below this a block can sit on two opposite edges at once, which the
/// corner/edge/interior adjacency rule does not describe.
pub const MIN_GRID_DIM: u8 = 2;

/// Playable colours in draw order
pub const PALETTE: [BlockColor; 4] = [
    BlockColor::Orange,
    BlockColor::Yellow,
    BlockColor::Blue,
    BlockColor::Pink,
];

/// Colour of a block
///
/// `Cleared` is never drawn for a fresh block; it marks a removed block that
/// still occupies its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlockColor {
    Orange,
    Yellow,
    Blue,
    Pink,
    Cleared,
}

impl BlockColor {
    /// Parse colour from its wire name or letter (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use block_grid_types::BlockColor;
    ///
    /// assert_eq!(BlockColor::from_str("orange"), Some(BlockColor::Orange));
    /// assert_eq!(BlockColor::from_str("Y"), Some(BlockColor::Yellow));
    /// assert_eq!(BlockColor::from_str("white"), Some(BlockColor::Cleared));
    /// assert_eq!(BlockColor::from_str("green"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "orange" | "o" => Some(BlockColor::Orange),
            "yellow" | "y" => Some(BlockColor::Yellow),
            "blue" | "b" => Some(BlockColor::Blue),
            "pink" | "p" => Some(BlockColor::Pink),
            "cleared" | "white" | "." => Some(BlockColor::Cleared),
            _ => None,
        }
    }

    /// Single-character form used by grid pictures (`.` for cleared)
    pub fn as_char(&self) -> char {
        match self {
            BlockColor::Orange => 'o',
            BlockColor::Yellow => 'y',
            BlockColor::Blue => 'b',
            BlockColor::Pink => 'p',
            BlockColor::Cleared => '.',
        }
    }

    /// Lowercase wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockColor::Orange => "orange",
            BlockColor::Yellow => "yellow",
            BlockColor::Blue => "blue",
            BlockColor::Pink => "pink",
            BlockColor::Cleared => "cleared",
        }
    }

    /// Compact cell code: 0 for cleared, palette index + 1 otherwise
    pub fn code(&self) -> u8 {
        match self {
            BlockColor::Cleared => 0,
            BlockColor::Orange => 1,
            BlockColor::Yellow => 2,
            BlockColor::Blue => 3,
            BlockColor::Pink => 4,
        }
    }

    /// Inverse of [`BlockColor::code`]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(BlockColor::Cleared),
            1..=4 => Some(PALETTE[(code - 1) as usize]),
            _ => None,
        }
    }

    /// 24-bit display colour
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            BlockColor::Orange => (0xff, 0x7e, 0x1c),
            BlockColor::Yellow => (0xff, 0xce, 0x00),
            BlockColor::Blue => (0x66, 0xc9, 0xff),
            BlockColor::Pink => (0xff, 0x82, 0xc6),
            BlockColor::Cleared => (0xff, 0xff, 0xff),
        }
    }

    /// True for the placeholder colour of removed blocks
    pub fn is_sentinel(&self) -> bool {
        matches!(self, BlockColor::Cleared)
    }
}

/// Grid coordinate. `x` is the column, `y` the row counted from the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Coord {
    pub x: u8,
    pub y: u8,
}

impl Coord {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Offset by `(dx, dy)`, or None if the result would leave `width x height`
    pub fn offset(self, dx: i8, dy: i8, width: u8, height: u8) -> Option<Coord> {
        let x = self.x as i16 + dx as i16;
        let y = self.y as i16 + dy as i16;
        if x < 0 || y < 0 || x >= width as i16 || y >= height as i16 {
            return None;
        }
        Some(Coord::new(x as u8, y as u8))
    }
}

/// Orthogonal direction. [`Direction::ALL`] is the neighbour ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Above,
    Right,
    Below,
    Left,
}

impl Direction {
    /// Fixed priority: above, right, below, left
    pub const ALL: [Direction; 4] = [
        Direction::Above,
        Direction::Right,
        Direction::Below,
        Direction::Left,
    ];

    /// Unit step; `Above` is +y since row 0 is the bottom
    pub fn delta(&self) -> (i8, i8) {
        match self {
            Direction::Above => (0, 1),
            Direction::Right => (1, 0),
            Direction::Below => (0, -1),
            Direction::Left => (-1, 0),
        }
    }
}

/// Player actions that can be performed
///
/// These are produced by the keyboard mapping and the controller protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move the selection cursor one column left
    CursorLeft,
    /// Move the selection cursor one column right
    CursorRight,
    /// Move the selection cursor one row up
    CursorUp,
    /// Move the selection cursor one row down
    CursorDown,
    /// Click the block under the cursor
    Click,
    /// Discard the grid and deal a fresh one
    Restart,
}

impl GameAction {
    /// Parse action from camelCase string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use block_grid_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("cursorUp"), Some(GameAction::CursorUp));
    /// assert_eq!(GameAction::from_str("RESTART"), Some(GameAction::Restart));
    /// assert_eq!(GameAction::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cursorleft" => Some(GameAction::CursorLeft),
            "cursorright" => Some(GameAction::CursorRight),
            "cursorup" => Some(GameAction::CursorUp),
            "cursordown" => Some(GameAction::CursorDown),
            "click" => Some(GameAction::Click),
            "restart" | "reset" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::CursorLeft => "cursorLeft",
            GameAction::CursorRight => "cursorRight",
            GameAction::CursorUp => "cursorUp",
            GameAction::CursorDown => "cursorDown",
            GameAction::Click => "click",
            GameAction::Restart => "restart",
        }
    }
}
