//! Command rejections.
//!
//! A rejection is a precondition failure: the command was not applied and
//! the game state is exactly as it was. None of these is fatal.

use thiserror::Error;

use super::player::Seat;
use crate::adventurers::Role;
use crate::board::{Coord, TileError};
use crate::cards::TreasureCard;

/// Why a command was not applied. `Display` is the user-facing reason.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("the game is over")]
    GameOver,

    #[error("no actions left this turn")]
    NoActionsRemaining,

    #[error("the action phase is over; press Next")]
    ActionPhaseOver,

    #[error("an adventurer must swim to safety first")]
    RescueInProgress,

    #[error("{seat} must discard down to the hand limit first")]
    DiscardPending { seat: Seat },

    #[error("{seat} is playing out of turn; only a Sandbag or Helicopter Lift can be used")]
    OutOfTurn { seat: Seat },

    #[error("{0} is already acting")]
    AlreadyActing(Seat),

    #[error("{target} is open sea")]
    OffBoard { target: Coord },

    #[error("cannot move to {target}")]
    IllegalMove { target: Coord },

    #[error("cannot shore up {target}")]
    IllegalShoreUp { target: Coord },

    #[error(transparent)]
    Tile(#[from] TileError),

    #[error("only the Navigator can move other adventurers")]
    NotNavigator,

    #[error("{0} is not in the game")]
    UnknownAdventurer(Role),

    #[error("the Navigator cannot navigate themself")]
    NavigateSelf,

    #[error("illegal navigation path")]
    IllegalNavigation,

    #[error("{0} is not in the game")]
    UnknownSeat(Seat),

    #[error("cannot pass a card to yourself")]
    PassToSelf,

    #[error("{receiver} is not on your tile")]
    NotCoLocated { receiver: Seat },

    #[error("{0} is not in hand")]
    CardNotHeld(TreasureCard),

    #[error("no treasure can be captured here")]
    CaptureUnavailable,

    #[error("lift-off needs everyone on Fool's Landing, all four treasures and a Helicopter Lift")]
    LiftOffUnavailable,

    #[error("{0} has no special action")]
    NotSpecialCard(TreasureCard),

    #[error("{target} cannot be reached by helicopter")]
    IllegalFlight { target: Coord },

    #[error("no cards selected")]
    EmptySelection,

    #[error("hand holds {held} cards; discard down to 5 first")]
    HandLimitExceeded { held: usize },
}
