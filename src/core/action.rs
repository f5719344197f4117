//! Commands and the command history record.
//!
//! A `Command` is one player intent, with every selection the presentation
//! layer gathered spelled out: target tile, card, receiving seat. The engine
//! validates a command fully before it touches any state.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::Seat;
use crate::adventurers::Role;
use crate::board::Coord;
use crate::cards::TreasureCard;

/// A complete player intent.
///
/// ## Example
///
/// ```
/// use forbidden_island::board::Coord;
/// use forbidden_island::core::Command;
///
/// let target = Coord::new(2, 3).unwrap();
/// let step = Command::Move { target };
/// assert!(step.costs_action());
/// assert!(!Command::Reset.costs_action());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Move the actor to a tile.
    Move { target: Coord },

    /// Shore up a flooded tile. `None` means the pending target armed by
    /// the last move, else the actor's own tile.
    ShoreUp { target: Option<Coord> },

    /// Navigator relocates another adventurer along one or two steps.
    Navigate { adventurer: Role, path: SmallVec<[Coord; 2]> },

    /// Give a card to another seat.
    PassTo { receiver: Seat, card: TreasureCard },

    /// Capture the figurine of the shrine the actor stands on.
    Capture,

    /// Leave the island from Fool's Landing.
    LiftOff,

    /// Play a Sandbag or Helicopter Lift. Passengers ride along with a
    /// helicopter; they are ignored for a sandbag.
    SpecialAction {
        card: TreasureCard,
        target: Coord,
        passengers: SmallVec<[Seat; 3]>,
    },

    /// Hand control to another seat so they can play a Sandbag or
    /// Helicopter Lift out of turn. Naming the seat whose turn it is
    /// hands control back.
    SwitchPlayer { seat: Seat },

    /// Discard the selected cards.
    Discard { cards: SmallVec<[TreasureCard; 6]> },

    /// Clear pending selections.
    Reset,

    /// The "Next" button: run the automatic phases.
    Advance,
}

impl Command {
    /// Whether a successful command of this shape spends from the action
    /// budget (before role exceptions such as the Engineer's bonus).
    #[must_use]
    pub fn costs_action(&self) -> bool {
        matches!(
            self,
            Command::Move { .. }
                | Command::ShoreUp { .. }
                | Command::Navigate { .. }
                | Command::PassTo { .. }
                | Command::Capture
        )
    }

    /// Short label for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Command::Move { .. } => "move",
            Command::ShoreUp { .. } => "shore_up",
            Command::Navigate { .. } => "navigate",
            Command::PassTo { .. } => "pass_to",
            Command::Capture => "capture",
            Command::LiftOff => "lift_off",
            Command::SpecialAction { .. } => "special_action",
            Command::SwitchPlayer { .. } => "switch_player",
            Command::Discard { .. } => "discard",
            Command::Reset => "reset",
            Command::Advance => "advance",
        }
    }
}

/// A successful command with when and by whom it was issued.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The seat acting when the command ran (the temporary actor during a
    /// rescue, a forced discard or out-of-turn play).
    pub seat: Seat,

    pub command: Command,

    /// Turn number, starting at 1.
    pub turn: u32,

    /// Position in the whole game's history.
    pub sequence: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(seat: Seat, command: Command, turn: u32, sequence: u32) -> Self {
        Self {
            seat,
            command,
            turn,
            sequence,
        }
    }
}
