//! # forbidden-island
//!
//! Rules engine for the cooperative board game Forbidden Island.
//!
//! ## Design Principles
//!
//! 1. **One owner**: `Engine` owns the board, both decks, the water meter
//!    and every adventurer record. Nothing else mutates them.
//!
//! 2. **Atomic commands**: Every command is validated in full before any
//!    state changes. A rejection carries a readable reason and leaves the
//!    game exactly as it was.
//!
//! 3. **Deterministic**: A seed fixes the roles, the tile layout and every
//!    shuffle. Decks and layout can also be fixed outright through
//!    `GameConfig`.
//!
//! ## Modules
//!
//! - `core`: Seats, commands, rejections, configuration, RNG
//! - `cards`: The generic deck, the treasure deck and the flood deck
//! - `board`: Grid geometry, tiles, the island board, the water meter
//! - `adventurers`: Roles, the adventurer record, movement legality
//! - `rules`: The turn/action engine and change notification
//!
//! ## Example
//!
//! ```
//! use forbidden_island::{Applied, Engine, GameConfig, Role};
//!
//! let config = GameConfig::new(2, 1)
//!     .with_seed(3)
//!     .with_roles(vec![Role::Engineer, Role::Messenger]);
//! let mut engine = Engine::new(config).unwrap();
//!
//! let first_move = engine.move_destinations()[0];
//! assert_eq!(engine.move_to(first_move), Ok(Applied::Done));
//! assert_eq!(engine.actions_consumed(), 1);
//! ```

pub mod adventurers;
pub mod board;
pub mod cards;
pub mod core;
pub mod rules;

pub use crate::core::{ActionRecord, Command, ConfigError, GameConfig, GameRng, Rejection, Seat, SeatMap};

pub use crate::cards::{CardKind, Figurine, FloodDeck, TreasureCard, TreasureDeck};

pub use crate::board::{Board, Coord, Tile, TileId, TileStatus, WaterMeter};

pub use crate::adventurers::{Adventurer, Role};

pub use crate::rules::{ActionBudget, Applied, ChangeListener, Engine, GameStatus, LossReason, Phase};
