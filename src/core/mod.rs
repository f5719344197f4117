//! Core types shared by every other module: seats, commands, rejections,
//! setup configuration and the deterministic RNG.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;

pub use action::{ActionRecord, Command};
pub use config::{ConfigError, GameConfig, MAX_PLAYERS, MIN_PLAYERS};
pub use error::Rejection;
pub use player::{Seat, SeatMap};
pub use rng::GameRng;
