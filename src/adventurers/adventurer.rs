//! The common adventurer record.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::role::Role;
use crate::board::Coord;
use crate::cards::{Figurine, TreasureCard};
use crate::core::Seat;

/// Cards in hand. Holds a transient overflow past the hand limit.
pub type Hand = SmallVec<[TreasureCard; 8]>;

/// One adventurer on the island.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adventurer {
    role: Role,
    seat: Seat,
    position: Coord,
    hand: Hand,
    figurines: SmallVec<[Figurine; 4]>,
    /// Flooded tile this adventurer just moved onto, offered for shore-up.
    pending_shore_up: Option<Coord>,
    flight_used: bool,
    bonus_shore_ups_used: u8,
}

impl Adventurer {
    #[must_use]
    pub fn new(role: Role, seat: Seat, position: Coord) -> Self {
        Self {
            role,
            seat,
            position,
            hand: Hand::new(),
            figurines: SmallVec::new(),
            pending_shore_up: None,
            flight_used: false,
            bonus_shore_ups_used: 0,
        }
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn seat(&self) -> Seat {
        self.seat
    }

    #[must_use]
    pub fn position(&self) -> Coord {
        self.position
    }

    #[must_use]
    pub fn hand(&self) -> &[TreasureCard] {
        &self.hand
    }

    /// Figurines this adventurer captured, in capture order.
    #[must_use]
    pub fn figurines(&self) -> &[Figurine] {
        &self.figurines
    }

    #[must_use]
    pub fn pending_shore_up(&self) -> Option<Coord> {
        self.pending_shore_up
    }

    /// Pilot's flight is still available this turn.
    #[must_use]
    pub fn can_fly(&self) -> bool {
        self.role.capabilities().flight && !self.flight_used
    }

    /// Free shore-ups left this turn.
    #[must_use]
    pub fn bonus_shore_ups_left(&self) -> u8 {
        self.role
            .capabilities()
            .bonus_shore_ups
            .saturating_sub(self.bonus_shore_ups_used)
    }

    #[must_use]
    pub fn holds(&self, card: TreasureCard) -> bool {
        self.hand.contains(&card)
    }

    /// Treasure cards of `figurine` in hand.
    #[must_use]
    pub fn treasure_count(&self, figurine: Figurine) -> usize {
        self.hand.iter().filter(|c| c.figurine() == Some(figurine)).count()
    }

    #[must_use]
    pub fn has_helicopter_lift(&self) -> bool {
        self.hand.iter().any(|c| c.is_helicopter_lift())
    }

    pub(crate) fn set_position(&mut self, position: Coord) {
        self.position = position;
    }

    pub(crate) fn receive(&mut self, card: TreasureCard) {
        self.hand.push(card);
    }

    /// Remove one copy of `card`. False if it was not held.
    pub(crate) fn take(&mut self, card: TreasureCard) -> bool {
        match self.hand.iter().position(|&c| c == card) {
            Some(pos) => {
                self.hand.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Remove every card of `figurine` from hand and return them.
    pub(crate) fn take_treasures(&mut self, figurine: Figurine) -> Vec<TreasureCard> {
        let (taken, kept): (Vec<_>, Vec<_>) = self
            .hand
            .iter()
            .copied()
            .partition(|c| c.figurine() == Some(figurine));
        self.hand = kept.into_iter().collect();
        taken
    }

    pub(crate) fn add_figurine(&mut self, figurine: Figurine) {
        if !self.figurines.contains(&figurine) {
            self.figurines.push(figurine);
        }
    }

    pub(crate) fn set_pending_shore_up(&mut self, target: Option<Coord>) {
        self.pending_shore_up = target;
    }

    pub(crate) fn use_flight(&mut self) {
        self.flight_used = true;
    }

    pub(crate) fn use_bonus_shore_up(&mut self) {
        self.bonus_shore_ups_used = self.bonus_shore_ups_used.saturating_add(1);
    }

    /// Reset per-turn allowances at the end of the round.
    pub(crate) fn end_turn(&mut self) {
        self.flight_used = false;
        self.bonus_shore_ups_used = 0;
        self.pending_shore_up = None;
    }
}
