//! Turn bookkeeping: the action budget, interruption frames, phases and
//! the game status.

use serde::{Deserialize, Serialize};

use crate::adventurers::Role;
use crate::cards::Figurine;
use crate::core::Seat;

/// Actions granted per normal turn.
pub const ACTIONS_PER_TURN: u8 = 3;

/// Actions a swimmer has already "used" when a rescue starts; one remains.
pub const RESCUE_ACTIONS_CONSUMED: u8 = 2;

/// Actions granted and consumed this turn.
///
/// The displayed action count is `consumed`. Bonus actions (the Engineer's
/// free shore-up) never touch the budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionBudget {
    granted: u8,
    consumed: u8,
}

impl ActionBudget {
    /// A fresh turn.
    #[must_use]
    pub const fn full() -> Self {
        Self {
            granted: ACTIONS_PER_TURN,
            consumed: 0,
        }
    }

    /// A swimmer's budget: a single move left.
    #[must_use]
    pub const fn rescue() -> Self {
        Self {
            granted: ACTIONS_PER_TURN,
            consumed: RESCUE_ACTIONS_CONSUMED,
        }
    }

    /// Nothing left to spend.
    #[must_use]
    pub const fn spent() -> Self {
        Self {
            granted: ACTIONS_PER_TURN,
            consumed: ACTIONS_PER_TURN,
        }
    }

    #[must_use]
    pub fn granted(&self) -> u8 {
        self.granted
    }

    #[must_use]
    pub fn consumed(&self) -> u8 {
        self.consumed
    }

    #[must_use]
    pub fn remaining(&self) -> u8 {
        self.granted.saturating_sub(self.consumed)
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    pub fn consume(&mut self) {
        self.consumed = self.consumed.saturating_add(1).min(self.granted);
    }

    pub fn exhaust(&mut self) {
        self.consumed = self.granted;
    }
}

impl Default for ActionBudget {
    fn default() -> Self {
        Self::full()
    }
}

/// Why the normal round is suspended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interruption {
    /// Adventurers in the water must swim to safety.
    Rescue,
    /// A card pass found the receiver's hand full.
    ForcedDiscard { receiver: Seat },
    /// `seat` took control to play a special card outside their turn.
    OutOfTurn { seat: Seat },
}

/// The suspended round, restored verbatim when the interruption ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundFrame {
    pub saved_seat: Seat,
    pub saved_budget: ActionBudget,
    pub reason: Interruption,
}

/// Where the turn stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Actions may be taken.
    Acting,
    /// Treasure and flood draws are done; the next advance ends the round.
    RoundEnd,
    /// A swimmer must move.
    Rescue,
    /// A receiver must discard (or the pass be cancelled).
    ForcedDiscard,
    /// Another seat may play a Sandbag or Helicopter Lift.
    OutOfTurn,
    Finished,
}

/// How a game ended in defeat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossReason {
    WaterMeterMaxed,
    ExtractionSunk,
    ShrineLost(Figurine),
    NoSwimDestination(Role),
}

impl std::fmt::Display for LossReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LossReason::WaterMeterMaxed => f.write_str("the water level reached the skull"),
            LossReason::ExtractionSunk => f.write_str("Fool's Landing sank"),
            LossReason::ShrineLost(figurine) => write!(f, "both shrines of the {figurine} sank"),
            LossReason::NoSwimDestination(role) => write!(f, "the {role} had nowhere to swim"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    InProgress,
    Won,
    Lost(LossReason),
}

impl GameStatus {
    #[must_use]
    pub fn is_finished(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// What a successful command led to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Applied {
    /// The command took effect; play continues as before.
    Done,
    /// A pass was suspended; `seat` must discard before play resumes.
    DiscardRequired { seat: Seat },
    /// Tiles sank under adventurers; `seat` swims first.
    RescueRequired { seat: Seat },
    /// Treasure and flood draws resolved; the next advance ends the round.
    DrawsResolved,
    /// The round ended and `next` acts.
    TurnEnded { next: Seat },
    /// The command ended the game.
    GameOver(GameStatus),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_counts() {
        let mut budget = ActionBudget::full();
        assert_eq!(budget.remaining(), 3);

        budget.consume();
        budget.consume();
        assert_eq!(budget.consumed(), 2);
        assert!(!budget.is_exhausted());

        budget.consume();
        budget.consume();
        assert_eq!(budget.consumed(), 3);
        assert!(budget.is_exhausted());
    }

    #[test]
    fn test_special_budgets() {
        assert_eq!(ActionBudget::rescue().remaining(), 1);
        assert_eq!(ActionBudget::rescue().consumed(), 2);
        assert!(ActionBudget::spent().is_exhausted());

        let mut budget = ActionBudget::full();
        budget.exhaust();
        assert_eq!(budget, ActionBudget::spent());
    }

    #[test]
    fn test_status() {
        assert!(!GameStatus::InProgress.is_finished());
        assert!(GameStatus::Won.is_finished());
        assert!(GameStatus::Lost(LossReason::ExtractionSunk).is_finished());
        assert_eq!(
            LossReason::ShrineLost(Figurine::Fire).to_string(),
            "both shrines of the Crystal of Fire sank"
        );
    }
}
