//! The turn/action engine.
//!
//! `Engine` resolves player commands into board, deck and adventurer
//! mutations and runs the automatic phases of each turn:
//!
//! - **Acting**: up to three actions (move, shore up, navigate, pass,
//!   capture) plus free special actions and lift-off
//! - **Stage23**: draw two treasure cards, resolve Waters Rise, draw and
//!   apply flood cards
//! - **Round end**: enforce the hand limit, merge drawn cards, rotate seats
//!
//! A rescue, a forced discard or out-of-turn play suspends the round in a
//! single `RoundFrame` that is restored verbatim when the interruption ends.

pub mod commands;
pub mod engine;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod observer;
pub mod phases;
pub mod turn;

pub use engine::Engine;
pub use observer::ChangeListener;
pub use turn::{
    ActionBudget, Applied, GameStatus, Interruption, LossReason, Phase, RoundFrame, ACTIONS_PER_TURN,
    RESCUE_ACTIONS_CONSUMED,
};
