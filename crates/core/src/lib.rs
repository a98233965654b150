//! Core rules module - pure, deterministic, and testable
//!
//! This crate contains the rules of the block grid: the grid data model,
//! orthogonal adjacency, the same-colour region flood fill, and the
//! post-removal gravity pass. It has no dependencies on UI, networking, or I/O:
//!
//! - **Deterministic**: the same seed deals the same grid
//! - **Testable**: grids can be built from text pictures
//! - **Single writer**: every click runs to completion before the next one
//!
//! # Module Structure
//!
//! - [`block`]: a single cell (position, colour, removable flag)
//! - [`grid`]: column-major block storage and click handling
//! - [`adjacency`]: corner / edge / interior neighbour rules
//! - [`region`]: connected same-colour region search
//! - [`compaction`]: stable per-column gravity
//! - [`rng`]: injectable colour sources
//! - [`config`]: grid dimensions and palette size
//! - [`session`]: the game controller that owns a grid
//! - [`snapshot`]: read model for renderers and controllers
//!
//! # Rules
//!
//! - Clicking a removable block clears it and every block of the same colour
//!   reachable through orthogonal neighbours of that colour.
//! - A lone block is cleared too; there is no minimum group size.
//! - Cleared blocks keep their slot with the `Cleared` colour and are never
//!   clickable again. Within each touched column, active blocks drop to the
//!   bottom and cleared ones rise to the top, each group keeping its order.
//!
//! # Example
//!
//! ```
//! use block_grid_core::{Grid, GameSession, GridConfig};
//! use block_grid_types::{BlockColor, Coord};
//!
//! let mut grid = Grid::from_rows(&[
//!     "bo",
//!     "oo",
//! ]).unwrap();
//!
//! let event = grid.handle_click(Coord::new(0, 0));
//! assert_eq!(event.cleared, 3);
//! // The blue block fell to the bottom of column 0.
//! assert_eq!(grid.block(Coord::new(0, 0)).color(), BlockColor::Blue);
//!
//! let session = GameSession::new(GridConfig::default().with_seed(7));
//! assert_eq!(session.grid().remaining(), 100);
//! ```

pub mod adjacency;
pub mod block;
pub mod compaction;
pub mod config;
pub mod grid;
pub mod region;
pub mod rng;
pub mod session;
pub mod snapshot;

pub use block_grid_types as types;

// Re-export commonly used types for convenience
pub use adjacency::{Placement, Side};
pub use block::Block;
pub use config::{ConfigError, GridConfig};
pub use grid::{ClearEvent, Grid};
pub use region::Region;
pub use rng::{ColorSource, ScriptedColors, SimpleRng};
pub use session::GameSession;
pub use snapshot::{GridSnapshot, SnapshotCell};
