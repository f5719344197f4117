//! Command validation and execution.
//!
//! `check` is a pure function of the current state. `execute` assumes the
//! command passed `check` and performs every mutation it implies.

use smallvec::{smallvec, SmallVec};
use tracing::info;

use super::engine::Engine;
use super::turn::{ActionBudget, Applied, GameStatus, Interruption, RoundFrame};
use crate::adventurers::{movement, Role};
use crate::board::{Coord, TileId};
use crate::cards::{CardKind, Figurine, TreasureCard, CARDS_PER_CAPTURE, HAND_LIMIT};
use crate::core::{Command, Rejection, Seat};

impl Engine {
    /// Whether `command` would be accepted now, and if not, why.
    pub fn check(&self, command: &Command) -> Result<(), Rejection> {
        if self.status.is_finished() {
            return Err(Rejection::GameOver);
        }
        ensure_on_island(command)?;
        match command {
            Command::Move { target } => self.check_move(*target),
            Command::ShoreUp { target } => self.check_shore_up(*target).map(|_| ()),
            Command::Navigate { adventurer, path } => self.check_navigate(*adventurer, path),
            Command::PassTo { receiver, card } => self.check_pass(*receiver, *card),
            Command::Capture => self.check_capture().map(|_| ()),
            Command::LiftOff => self.check_lift_off(),
            Command::SpecialAction {
                card,
                target,
                passengers,
            } => self.check_special(*card, *target, passengers),
            Command::SwitchPlayer { seat } => self.check_switch(*seat),
            Command::Discard { cards } => self.check_discard(cards),
            Command::Reset => Ok(()),
            Command::Advance => self.check_advance(),
        }
    }

    pub(super) fn execute(&mut self, command: &Command) -> Result<Applied, Rejection> {
        match command {
            Command::Move { target } => self.execute_move(*target),
            Command::ShoreUp { target } => self.execute_shore_up(*target),
            Command::Navigate { adventurer, path } => {
                let seat = self.seat_of_role(*adventurer);
                match path.last() {
                    Some(&end) => self.relocate(seat, end, true),
                    None => return Err(Rejection::IllegalNavigation),
                }
                self.budget.consume();
                Ok(Applied::Done)
            }
            Command::PassTo { receiver, card } => Ok(self.execute_pass(*receiver, *card)),
            Command::Capture => self.execute_capture(),
            Command::LiftOff => {
                self.status = GameStatus::Won;
                info!(turn = self.turn, "lift-off: the team escaped the island");
                Ok(Applied::GameOver(self.status))
            }
            Command::SpecialAction {
                card,
                target,
                passengers,
            } => self.execute_special(*card, *target, passengers),
            Command::SwitchPlayer { seat } => Ok(self.execute_switch(*seat)),
            Command::Discard { cards } => Ok(self.execute_discard(cards)),
            Command::Reset => {
                for adventurer in self.adventurers.values_mut() {
                    adventurer.set_pending_shore_up(None);
                }
                Ok(Applied::Done)
            }
            Command::Advance => Ok(self.execute_advance()),
        }
    }

    // === Guards ===

    /// No rescue or forced discard is underway.
    fn ensure_normal_round(&self) -> Result<(), Rejection> {
        match self.frame.map(|f| f.reason) {
            Some(Interruption::Rescue) => Err(Rejection::RescueInProgress),
            Some(Interruption::ForcedDiscard { receiver }) => Err(Rejection::DiscardPending { seat: receiver }),
            Some(Interruption::OutOfTurn { seat }) => Err(Rejection::OutOfTurn { seat }),
            None => Ok(()),
        }
    }

    /// The action phase of a normal round.
    fn ensure_acting(&self) -> Result<(), Rejection> {
        self.ensure_normal_round()?;
        if self.stage23_done {
            return Err(Rejection::ActionPhaseOver);
        }
        Ok(())
    }

    fn ensure_action_available(&self) -> Result<(), Rejection> {
        self.ensure_acting()?;
        if self.budget.is_exhausted() {
            return Err(Rejection::NoActionsRemaining);
        }
        Ok(())
    }

    // === Move ===

    fn check_move(&self, target: Coord) -> Result<(), Rejection> {
        if !matches!(self.frame.map(|f| f.reason), Some(Interruption::Rescue)) {
            self.ensure_action_available()?;
        }
        if !self.move_destinations().contains(&target) {
            return Err(Rejection::IllegalMove { target });
        }
        Ok(())
    }

    fn execute_move(&mut self, target: Coord) -> Result<Applied, Rejection> {
        if matches!(self.frame.map(|f| f.reason), Some(Interruption::Rescue)) {
            return Ok(self.finish_swim(target));
        }

        let actor = self.actor();
        if actor.can_fly() && movement::needs_flight(&self.board, actor, target) {
            self.actor_mut().use_flight();
        }
        self.relocate(self.seat, target, true);
        self.budget.consume();
        Ok(Applied::Done)
    }

    /// Move an adventurer's pawn, arming a shore-up offer if `arm` and the
    /// destination is flooded.
    pub(super) fn relocate(&mut self, seat: Seat, target: Coord, arm: bool) {
        let adventurer = &mut self.adventurers[seat];
        let from = adventurer.position();
        let role = adventurer.role();
        adventurer.set_position(target);
        let pending = (arm && self.board.is_flooded(target)).then_some(target);
        adventurer.set_pending_shore_up(pending);
        self.board.relocate(role, from, target);
    }

    // === Shore up ===

    /// Resolve the target and say whether the Engineer's bonus pays for it.
    fn check_shore_up(&self, target: Option<Coord>) -> Result<(Coord, bool), Rejection> {
        self.ensure_acting()?;
        let actor = self.actor();
        let bonus = actor.bonus_shore_ups_left() > 0;
        if !bonus && self.budget.is_exhausted() {
            return Err(Rejection::NoActionsRemaining);
        }

        let target = target
            .or(actor.pending_shore_up())
            .unwrap_or(actor.position());
        if !movement::shore_up_targets(&self.board, actor).contains(&target) {
            return Err(Rejection::IllegalShoreUp { target });
        }
        Ok((target, bonus))
    }

    fn execute_shore_up(&mut self, target: Option<Coord>) -> Result<Applied, Rejection> {
        let (target, bonus) = self.check_shore_up(target)?;
        self.board.shore_up(target)?;

        let budget = &mut self.budget;
        let actor = &mut self.adventurers[self.seat];
        if bonus {
            actor.use_bonus_shore_up();
        } else {
            budget.consume();
        }
        if actor.pending_shore_up() == Some(target) {
            actor.set_pending_shore_up(None);
        }
        Ok(Applied::Done)
    }

    // === Navigate ===

    fn check_navigate(&self, adventurer: Role, path: &[Coord]) -> Result<(), Rejection> {
        self.ensure_action_available()?;
        let navigator = self.actor();
        if !navigator.role().capabilities().navigate {
            return Err(Rejection::NotNavigator);
        }
        if adventurer == navigator.role() {
            return Err(Rejection::NavigateSelf);
        }
        let seat = self
            .seat_of(adventurer)
            .ok_or(Rejection::UnknownAdventurer(adventurer))?;
        let from = self.adventurers[seat].position();
        if !movement::is_navigation_path(&self.board, from, path) {
            return Err(Rejection::IllegalNavigation);
        }
        Ok(())
    }

    // === Pass ===

    fn check_pass(&self, receiver: Seat, card: TreasureCard) -> Result<(), Rejection> {
        self.ensure_action_available()?;
        let giver = self.actor();
        let taker = self
            .adventurers
            .get(receiver)
            .ok_or(Rejection::UnknownSeat(receiver))?;
        if receiver == self.seat {
            return Err(Rejection::PassToSelf);
        }
        if !giver.holds(card) {
            return Err(Rejection::CardNotHeld(card));
        }
        if !giver.role().capabilities().remote_pass && giver.position() != taker.position() {
            return Err(Rejection::NotCoLocated { receiver });
        }
        Ok(())
    }

    fn execute_pass(&mut self, receiver: Seat, card: TreasureCard) -> Applied {
        if self.adventurers[receiver].hand().len() >= HAND_LIMIT {
            info!(%receiver, "receiver's hand is full; forced discard");
            self.frame = Some(RoundFrame {
                saved_seat: self.seat,
                saved_budget: self.budget,
                reason: Interruption::ForcedDiscard { receiver },
            });
            self.seat = receiver;
            self.budget = ActionBudget::spent();
            return Applied::DiscardRequired { seat: receiver };
        }

        self.actor_mut().take(card);
        self.adventurers[receiver].receive(card);
        self.budget.consume();
        Applied::Done
    }

    // === Capture ===

    fn check_capture(&self) -> Result<Figurine, Rejection> {
        self.ensure_action_available()?;
        let actor = self.actor();
        let figurine = self
            .board
            .id_at(actor.position())
            .and_then(TileId::shrine_of)
            .ok_or(Rejection::CaptureUnavailable)?;
        if self.board.is_captured(figurine) || actor.treasure_count(figurine) != CARDS_PER_CAPTURE {
            return Err(Rejection::CaptureUnavailable);
        }
        Ok(figurine)
    }

    fn execute_capture(&mut self) -> Result<Applied, Rejection> {
        let figurine = self.check_capture()?;
        let cards = self.actor_mut().take_treasures(figurine);
        for card in cards {
            self.treasure.discard(card);
        }
        self.board.mark_captured(figurine);
        self.actor_mut().add_figurine(figurine);
        self.budget.consume();
        info!(%figurine, seat = %self.seat, "treasure captured");
        Ok(Applied::Done)
    }

    // === Lift off ===

    fn check_lift_off(&self) -> Result<(), Rejection> {
        self.ensure_normal_round()?;
        let landing = self.board.coord_of(TileId::FOOLS_LANDING);
        let everyone_aboard = self.adventurers.values().all(|a| a.position() == landing);
        let has_lift = self.adventurers.values().any(|a| a.has_helicopter_lift());
        if self.board.extraction_exists()
            && everyone_aboard
            && self.captured_figurines().len() == Figurine::ALL.len()
            && has_lift
        {
            Ok(())
        } else {
            Err(Rejection::LiftOffUnavailable)
        }
    }

    // === Special action ===

    /// Special cards come from the actor's hand, and in a normal round
    /// also from the cards drawn this turn.
    fn check_special(&self, card: TreasureCard, target: Coord, passengers: &[Seat]) -> Result<(), Rejection> {
        let drawn_playable = match self.frame.map(|f| f.reason) {
            Some(Interruption::Rescue) => return Err(Rejection::RescueInProgress),
            Some(Interruption::ForcedDiscard { .. } | Interruption::OutOfTurn { .. }) => false,
            None => true,
        };
        if !self.actor().holds(card) && !(drawn_playable && self.displayed.contains(&card)) {
            return Err(Rejection::CardNotHeld(card));
        }
        match card.kind() {
            CardKind::Sandbag => {
                if !self.board.is_flooded(target) {
                    return Err(Rejection::IllegalShoreUp { target });
                }
            }
            CardKind::HelicopterLift => {
                if !self.board.exists(target) {
                    return Err(Rejection::IllegalFlight { target });
                }
                if let Some(&unknown) = passengers.iter().find(|&&s| self.adventurers.get(s).is_none()) {
                    return Err(Rejection::UnknownSeat(unknown));
                }
            }
            CardKind::Treasure(_) | CardKind::WatersRise => return Err(Rejection::NotSpecialCard(card)),
        }
        Ok(())
    }

    fn execute_special(&mut self, card: TreasureCard, target: Coord, passengers: &[Seat]) -> Result<Applied, Rejection> {
        if card.is_sandbag() {
            self.board.shore_up(target)?;
        } else {
            let mut riders = vec![self.seat];
            for &seat in passengers {
                if !riders.contains(&seat) {
                    riders.push(seat);
                }
            }
            for seat in riders {
                self.relocate(seat, target, false);
            }
        }

        let drawn = self
            .frame
            .is_none()
            .then(|| self.displayed.iter().position(|&c| c == card))
            .flatten();
        match drawn {
            Some(pos) => {
                self.displayed.remove(pos);
            }
            None => {
                self.actor_mut().take(card);
            }
        }
        self.treasure.discard(card);
        info!(%card, seat = %self.seat, "special card played");

        // Playing a card ends a forced discard or out-of-turn play.
        self.resume_round();
        Ok(Applied::Done)
    }

    // === Out-of-turn play ===

    fn check_switch(&self, seat: Seat) -> Result<(), Rejection> {
        self.adventurers.get(seat).ok_or(Rejection::UnknownSeat(seat))?;
        match self.frame {
            Some(RoundFrame {
                saved_seat,
                reason: Interruption::OutOfTurn { .. },
                ..
            }) if seat == saved_seat => Ok(()),
            _ => {
                self.ensure_normal_round()?;
                if seat == self.seat {
                    return Err(Rejection::AlreadyActing(seat));
                }
                Ok(())
            }
        }
    }

    fn execute_switch(&mut self, seat: Seat) -> Applied {
        if self.frame.is_some() {
            self.resume_round();
            return Applied::Done;
        }
        info!(%seat, turn_of = %self.seat, "playing out of turn");
        self.frame = Some(RoundFrame {
            saved_seat: self.seat,
            saved_budget: self.budget,
            reason: Interruption::OutOfTurn { seat },
        });
        self.seat = seat;
        self.budget = ActionBudget::spent();
        Applied::Done
    }

    // === Discard ===

    fn check_discard(&self, cards: &[TreasureCard]) -> Result<(), Rejection> {
        if cards.is_empty() {
            return Err(Rejection::EmptySelection);
        }
        let mut pool: Vec<TreasureCard> = match self.frame.map(|f| f.reason) {
            Some(Interruption::Rescue) => return Err(Rejection::RescueInProgress),
            Some(Interruption::OutOfTurn { seat }) => return Err(Rejection::OutOfTurn { seat }),
            Some(Interruption::ForcedDiscard { .. }) => self.actor().hand().to_vec(),
            None => self
                .actor()
                .hand()
                .iter()
                .chain(self.displayed.iter())
                .copied()
                .collect(),
        };
        for &card in cards {
            match pool.iter().position(|&c| c == card) {
                Some(pos) => {
                    pool.swap_remove(pos);
                }
                None => return Err(Rejection::CardNotHeld(card)),
            }
        }
        Ok(())
    }

    fn execute_discard(&mut self, cards: &[TreasureCard]) -> Applied {
        if let Some(RoundFrame {
            reason: Interruption::ForcedDiscard { .. },
            ..
        }) = self.frame
        {
            for &card in cards {
                self.actor_mut().take(card);
                self.treasure.discard(card);
            }
            self.resume_round();
            return Applied::Done;
        }

        for &card in cards {
            match self.displayed.iter().position(|&c| c == card) {
                Some(pos) => {
                    self.displayed.remove(pos);
                }
                None => {
                    self.actor_mut().take(card);
                }
            }
            self.treasure.discard(card);
        }
        self.rebalance_hand();
        Applied::Done
    }

    /// Fill the hand up to the limit from the displayed cards.
    fn rebalance_hand(&mut self) {
        while self.actor().hand().len() < HAND_LIMIT && !self.displayed.is_empty() {
            let card = self.displayed.remove(0);
            self.actor_mut().receive(card);
        }
    }

    // === Advance ===

    fn check_advance(&self) -> Result<(), Rejection> {
        match self.frame.map(|f| f.reason) {
            Some(Interruption::Rescue) => Err(Rejection::RescueInProgress),
            Some(Interruption::ForcedDiscard { .. } | Interruption::OutOfTurn { .. }) => Ok(()),
            None if !self.stage23_done => Ok(()),
            None => {
                let held = self.actor().hand().len() + self.displayed.len();
                if held > HAND_LIMIT {
                    Err(Rejection::HandLimitExceeded { held })
                } else {
                    Ok(())
                }
            }
        }
    }

    fn execute_advance(&mut self) -> Applied {
        if self.frame.is_some() {
            self.resume_round();
            return Applied::Done;
        }
        if self.stage23_done {
            self.end_round()
        } else {
            self.run_draws()
        }
    }
}

/// Every cell a command names must be part of the island silhouette.
fn ensure_on_island(command: &Command) -> Result<(), Rejection> {
    let named: SmallVec<[Coord; 2]> = match command {
        Command::Move { target } | Command::SpecialAction { target, .. } => smallvec![*target],
        Command::ShoreUp { target } => target.iter().copied().collect(),
        Command::Navigate { path, .. } => path.clone(),
        _ => SmallVec::new(),
    };
    match named.into_iter().find(|c| !c.is_playable()) {
        Some(target) => Err(Rejection::OffBoard { target }),
        None => Ok(()),
    }
}
