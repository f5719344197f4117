//! The water meter.

use serde::{Deserialize, Serialize};

/// Lowest level, the easiest difficulty.
pub const MIN_LEVEL: u8 = 1;

/// Highest starting difficulty.
pub const MAX_DIFFICULTY: u8 = 5;

/// Reaching this level loses the game.
pub const LETHAL_LEVEL: u8 = 10;

/// Flood level and the number of flood cards drawn per turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterMeter {
    level: u8,
}

impl WaterMeter {
    /// Meter starting at `level`, clamped into 1–10.
    #[must_use]
    pub fn new(level: u8) -> Self {
        Self {
            level: level.clamp(MIN_LEVEL, LETHAL_LEVEL),
        }
    }

    #[must_use]
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Flood cards drawn each Stage23 at the current level.
    #[must_use]
    pub fn flood_draw_count(&self) -> usize {
        match self.level {
            0..=2 => 2,
            3..=5 => 3,
            6..=7 => 4,
            _ => 5,
        }
    }

    /// Raise by one level. Returns true once the lethal level is reached.
    pub fn rise(&mut self) -> bool {
        self.level = (self.level + 1).min(LETHAL_LEVEL);
        self.is_maxed()
    }

    #[must_use]
    pub fn is_maxed(&self) -> bool {
        self.level >= LETHAL_LEVEL
    }
}

impl Default for WaterMeter {
    fn default() -> Self {
        Self::new(MIN_LEVEL)
    }
}
