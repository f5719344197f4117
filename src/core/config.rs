//! Game setup configuration.
//!
//! A `GameConfig` carries the two setup inputs (player count and
//! difficulty), the seed, and optional fixed inputs that replace the random
//! parts of setup. Fixed inputs make games reproducible and let tests stage
//! exact situations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::adventurers::Role;
use crate::board::{is_tile_permutation, TileId, MAX_DIFFICULTY, MIN_LEVEL};
use crate::cards::TreasureCard;

/// Fewest seats.
pub const MIN_PLAYERS: usize = 2;

/// Most seats.
pub const MAX_PLAYERS: usize = 4;

/// Setup inputs that cannot start a game.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("player count must be 2-4, got {0}")]
    InvalidPlayerCount(usize),

    #[error("difficulty must be 1-5, got {0}")]
    InvalidDifficulty(u8),

    #[error("{expected} roles needed, {got} given")]
    RoleCountMismatch { expected: usize, got: usize },

    #[error("role {0} assigned twice")]
    DuplicateRole(Role),

    #[error("tile layout must place each of tiles 1-24 exactly once")]
    InvalidLayout,

    #[error("treasure order must contain each of cards 0-27 exactly once")]
    InvalidTreasureOrder,

    #[error("flood order must contain each of tiles 1-24 exactly once")]
    InvalidFloodOrder,
}

/// Everything needed to set up a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of adventurers, 2–4.
    pub player_count: usize,

    /// Starting water level, 1–5.
    pub difficulty: u8,

    /// Seed for every random part of setup and play.
    pub seed: u64,

    /// Role for each seat in order. Drawn at random when `None`.
    pub roles: Option<Vec<Role>>,

    /// Tile id for each playable cell, row-major. Shuffled when `None`.
    pub tile_layout: Option<Vec<TileId>>,

    /// Treasure draw pile, top first. Shuffled when `None`.
    pub treasure_order: Option<Vec<TreasureCard>>,

    /// Flood draw pile, top first. Shuffled when `None`.
    pub flood_order: Option<Vec<TileId>>,
}

impl GameConfig {
    /// A random game with the given setup inputs and seed 0.
    #[must_use]
    pub fn new(player_count: usize, difficulty: u8) -> Self {
        Self {
            player_count,
            difficulty,
            seed: 0,
            roles: None,
            tile_layout: None,
            treasure_order: None,
            flood_order: None,
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Fix the roles. Also sets the player count.
    #[must_use]
    pub fn with_roles(mut self, roles: Vec<Role>) -> Self {
        self.player_count = roles.len();
        self.roles = Some(roles);
        self
    }

    #[must_use]
    pub fn with_tile_layout(mut self, layout: Vec<TileId>) -> Self {
        self.tile_layout = Some(layout);
        self
    }

    #[must_use]
    pub fn with_treasure_order(mut self, order: Vec<TreasureCard>) -> Self {
        self.treasure_order = Some(order);
        self
    }

    #[must_use]
    pub fn with_flood_order(mut self, order: Vec<TileId>) -> Self {
        self.flood_order = Some(order);
        self
    }

    /// Check every setup input.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(ConfigError::InvalidPlayerCount(self.player_count));
        }
        if !(MIN_LEVEL..=MAX_DIFFICULTY).contains(&self.difficulty) {
            return Err(ConfigError::InvalidDifficulty(self.difficulty));
        }

        if let Some(roles) = &self.roles {
            if roles.len() != self.player_count {
                return Err(ConfigError::RoleCountMismatch {
                    expected: self.player_count,
                    got: roles.len(),
                });
            }
            for (i, role) in roles.iter().enumerate() {
                if roles[..i].contains(role) {
                    return Err(ConfigError::DuplicateRole(*role));
                }
            }
        }

        if let Some(layout) = &self.tile_layout {
            if !is_tile_permutation(layout) {
                return Err(ConfigError::InvalidLayout);
            }
        }

        if let Some(order) = &self.treasure_order {
            let mut sorted = order.clone();
            sorted.sort_unstable();
            if !sorted.into_iter().eq(TreasureCard::all()) {
                return Err(ConfigError::InvalidTreasureOrder);
            }
        }

        if let Some(order) = &self.flood_order {
            if !is_tile_permutation(order) {
                return Err(ConfigError::InvalidFloodOrder);
            }
        }

        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(MIN_PLAYERS, MIN_LEVEL)
    }
}
