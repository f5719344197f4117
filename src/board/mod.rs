//! The island board, its tiles and the water meter.
//!
//! ## Key Types
//!
//! - `Coord`: A cell on the 6×6 grid, with neighborhood helpers
//! - `TileId`: Stable identity 1–24 (names, shrines, extraction, start tiles)
//! - `Tile` / `TileStatus`: Per-cell state, Normal → Flooded → Sunk
//! - `Board`: The grid, the id↔coordinate bijection, shrine-loss detection
//! - `WaterMeter`: Flood level and derived flood-draw count

pub mod island;
pub mod layout;
pub mod tile;
pub mod water;

pub use island::{is_tile_permutation, Board, SinkOutcome};
pub use layout::{Coord, OffGrid, BLANK_CELLS, GRID_SIZE, PLAYABLE_CELLS};
pub use tile::{Tile, TileError, TileId, TileStatus};
pub use water::{WaterMeter, LETHAL_LEVEL, MAX_DIFFICULTY, MIN_LEVEL};
