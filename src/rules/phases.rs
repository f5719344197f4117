//! The automatic parts of a turn: treasure and flood draws, rescue from the
//! water, round end, and the interruption frame.

use tracing::{info, warn};

use super::engine::Engine;
use super::turn::{ActionBudget, Applied, GameStatus, Interruption, LossReason, RoundFrame};
use crate::adventurers::movement;
use crate::board::Coord;
use crate::cards::TREASURE_DRAW_COUNT;

impl Engine {
    /// Draw treasure, resolve Waters Rise, then draw and apply flood cards.
    pub(super) fn run_draws(&mut self) -> Applied {
        for card in self.treasure.draw(TREASURE_DRAW_COUNT) {
            if card.is_waters_rise() {
                self.water.rise();
                self.flood.put_discard_on_top();
                self.treasure.discard(card);
                info!(level = self.water.level(), "waters rise");
            } else {
                self.displayed.push(card);
            }
        }
        if self.water.is_maxed() {
            return self.lose(LossReason::WaterMeterMaxed);
        }

        let mut extraction_lost = false;
        for id in self.flood.draw(self.water.flood_draw_count()) {
            let outcome = self.board.sink(id);
            if !outcome.removed() {
                self.flood.discard(id);
                continue;
            }
            self.flood.remove_permanently(id);
            extraction_lost |= outcome.extraction_lost();
            for role in outcome.evicted {
                if let Some(seat) = self.seat_of(role) {
                    info!(%role, tile = %id, "adventurer in the water");
                    self.water_queue.push_back(seat);
                }
            }
        }

        if extraction_lost {
            return self.lose(LossReason::ExtractionSunk);
        }
        if let Some(figurine) = self.board.lost_shrine() {
            return self.lose(LossReason::ShrineLost(figurine));
        }

        self.budget.exhaust();
        self.stage23_done = true;
        if self.water_queue.is_empty() {
            Applied::DrawsResolved
        } else {
            self.start_rescue()
        }
    }

    /// Suspend the round and hand control to the first swimmer.
    fn start_rescue(&mut self) -> Applied {
        let stranded = self
            .water_queue
            .iter()
            .map(|&seat| &self.adventurers[seat])
            .find(|a| movement::swim_destinations(&self.board, a).is_empty())
            .map(|a| a.role());
        if let Some(role) = stranded {
            return self.lose(LossReason::NoSwimDestination(role));
        }

        self.frame = Some(RoundFrame {
            saved_seat: self.seat,
            saved_budget: self.budget,
            reason: Interruption::Rescue,
        });
        self.begin_swim()
    }

    /// Make the front of the water queue the actor, or resume the round if
    /// nobody is left.
    fn begin_swim(&mut self) -> Applied {
        match self.water_queue.front() {
            Some(&seat) => {
                self.seat = seat;
                self.budget = ActionBudget::rescue();
                Applied::RescueRequired { seat }
            }
            None => {
                self.resume_round();
                Applied::Done
            }
        }
    }

    /// The current swimmer reaches `target`.
    pub(super) fn finish_swim(&mut self, target: Coord) -> Applied {
        let swimmer = &mut self.adventurers[self.seat];
        swimmer.set_position(target);
        swimmer.set_pending_shore_up(None);
        let role = swimmer.role();
        self.board.place(role, target);
        self.water_queue.pop_front();
        info!(%role, %target, "swam to safety");
        self.begin_swim()
    }

    /// Pop the interruption frame, restoring the saved seat and budget.
    pub(super) fn resume_round(&mut self) {
        if let Some(frame) = self.frame.take() {
            self.seat = frame.saved_seat;
            self.budget = frame.saved_budget;
            info!(seat = %self.seat, reason = ?frame.reason, "round resumed");
        }
    }

    /// Merge drawn cards into the hand and pass play to the next seat.
    pub(super) fn end_round(&mut self) -> Applied {
        let drawn = std::mem::take(&mut self.displayed);
        for card in drawn {
            self.actor_mut().receive(card);
        }

        if let Some(figurine) = self.board.lost_shrine() {
            return self.lose(LossReason::ShrineLost(figurine));
        }

        for adventurer in self.adventurers.values_mut() {
            adventurer.end_turn();
        }
        self.seat = self.seat.next(self.seat_count());
        self.turn += 1;
        self.budget = ActionBudget::full();
        self.stage23_done = false;
        info!(turn = self.turn, seat = %self.seat, "turn begins");
        Applied::TurnEnded { next: self.seat }
    }

    fn lose(&mut self, reason: LossReason) -> Applied {
        self.status = GameStatus::Lost(reason);
        warn!(turn = self.turn, %reason, "game lost");
        Applied::GameOver(self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adventurers::Role;
    use crate::board::{TileId, TileStatus, WaterMeter};
    use crate::cards::{Figurine, FloodDeck, TreasureCard, TreasureDeck, FLOOD_DECK_SIZE};
    use crate::core::{GameRng, Rejection, Seat};
    use crate::rules::fixtures::{set_hand, sink, staged, tile};
    use crate::rules::Phase;

    fn stack_flood(engine: &mut Engine, ids: &[u8]) {
        engine.flood = FloodDeck::stacked(ids.iter().copied().map(TileId).collect(), GameRng::new(0));
    }

    fn stack_treasure(engine: &mut Engine, ids: &[u8]) {
        engine.treasure = TreasureDeck::stacked(ids.iter().copied().map(TreasureCard).collect(), GameRng::new(0));
    }

    #[test]
    fn test_draws_then_round_end() {
        let mut engine = staged(&[Role::Diver, Role::Engineer]);

        assert_eq!(engine.advance_phase(), Ok(Applied::DrawsResolved));
        assert_eq!(engine.displayed_cards(), &[TreasureCard(4), TreasureCard(5)]);
        assert_eq!(engine.displayed_flood_cards(), &[TileId(1), TileId(2)]);
        assert!(engine.board().is_flooded(tile(1)));
        assert!(engine.board().is_flooded(tile(2)));
        assert_eq!(engine.phase(), Phase::RoundEnd);
        assert!(engine.budget().is_exhausted());
        assert_eq!(engine.move_to(tile(10)), Err(Rejection::ActionPhaseOver));

        assert_eq!(engine.advance_phase(), Ok(Applied::TurnEnded { next: Seat(1) }));
        let diver = engine.adventurer(Seat(0)).unwrap();
        assert_eq!(
            diver.hand(),
            &[TreasureCard(0), TreasureCard(1), TreasureCard(4), TreasureCard(5)]
        );
        assert!(engine.displayed_cards().is_empty());
        assert_eq!(engine.turn(), 2);
        assert_eq!(engine.current_seat(), Seat(1));
        assert_eq!(engine.phase(), Phase::Acting);
        assert_eq!(engine.actions_consumed(), 0);
    }

    #[test]
    fn test_displayed_sandbag_playable_before_round_end() {
        let mut engine = staged(&[Role::Diver, Role::Engineer]);
        stack_treasure(&mut engine, &[23, 6]);
        engine.advance_phase().unwrap();

        assert_eq!(engine.special_action(TreasureCard(23), tile(1), &[]), Ok(Applied::Done));
        assert_eq!(engine.tile(tile(1)).status(), TileStatus::Normal);
        assert_eq!(engine.displayed_cards(), &[TreasureCard(6)]);
    }

    #[test]
    fn test_round_end_enforces_hand_limit() {
        let mut engine = staged(&[Role::Diver, Role::Engineer]);
        set_hand(&mut engine, Seat(0), &[10, 11, 12, 13]);
        engine.advance_phase().unwrap();

        assert_eq!(engine.advance_phase(), Err(Rejection::HandLimitExceeded { held: 6 }));
        assert_eq!(engine.discard(&[TreasureCard(10)]), Ok(Applied::Done));
        assert_eq!(engine.actor().hand().len(), 5);
        assert!(engine.displayed_cards().is_empty());
        assert_eq!(engine.advance_phase(), Ok(Applied::TurnEnded { next: Seat(1) }));
    }

    #[test]
    fn test_waters_rise_raises_meter_and_resurfaces_discards() {
        let mut engine = staged(&[Role::Diver, Role::Engineer]);
        engine.water = WaterMeter::new(2);
        stack_treasure(&mut engine, &[25, 26]);

        assert_eq!(engine.advance_phase(), Ok(Applied::DrawsResolved));
        assert_eq!(engine.water_level(), 4);
        assert_eq!(engine.flood_draw_count(), 3);
        assert!(engine.displayed_cards().is_empty());
        assert_eq!(engine.treasure_deck().discard_pile(), &[TreasureCard(25), TreasureCard(26)]);

        // Only the six tiles flooded during setup were on top, so all three sink.
        let drawn = engine.displayed_flood_cards().to_vec();
        assert_eq!(drawn.len(), 3);
        assert!(drawn.iter().all(|id| (19..=24).contains(&id.raw())));
        assert_eq!(engine.removed_flood_cards().len(), 3);
        for id in drawn {
            assert_eq!(engine.board().tile_by_id(id).status(), TileStatus::Sunk);
        }

        let deck = engine.flood_deck();
        let total = deck.draw_pile().len() + deck.discard_pile().len() + deck.removed().len();
        assert_eq!(total, FLOOD_DECK_SIZE);
    }

    #[test]
    fn test_maxed_water_meter_loses() {
        let mut engine = staged(&[Role::Diver, Role::Engineer]);
        engine.water = WaterMeter::new(9);
        stack_treasure(&mut engine, &[25, 0]);

        let lost = GameStatus::Lost(LossReason::WaterMeterMaxed);
        assert_eq!(engine.advance_phase(), Ok(Applied::GameOver(lost)));
        assert_eq!(engine.status(), lost);
        assert_eq!(engine.phase(), Phase::Finished);
        assert_eq!(engine.advance_phase(), Err(Rejection::GameOver));
    }

    #[test]
    fn test_rescue_interrupts_round() {
        let mut engine = staged(&[Role::Diver, Role::Engineer, Role::Messenger]);
        sink(&mut engine, 10, 1);
        stack_flood(&mut engine, &[10, 1]);

        assert_eq!(engine.advance_phase(), Ok(Applied::RescueRequired { seat: Seat(1) }));
        assert_eq!(engine.phase(), Phase::Rescue);
        assert_eq!(engine.current_seat(), Seat(1));
        assert_eq!(engine.actions_consumed(), 2);
        assert!(engine.needs_rescue());
        assert_eq!(engine.tile(tile(10)).status(), TileStatus::Sunk);
        assert!(engine.tile(tile(10)).occupants().is_empty());
        assert_eq!(engine.removed_flood_cards(), &[TileId(10)]);

        let frame = engine.interruption().copied().unwrap();
        assert_eq!(frame.saved_seat, Seat(0));
        assert!(frame.saved_budget.is_exhausted());

        assert_eq!(engine.capture(), Err(Rejection::RescueInProgress));
        assert_eq!(engine.advance_phase(), Err(Rejection::RescueInProgress));
        assert_eq!(engine.discard(&[TreasureCard(2)]), Err(Rejection::RescueInProgress));
        assert_eq!(engine.move_to(tile(1)), Err(Rejection::IllegalMove { target: tile(1) }));
        assert_eq!(
            engine.move_destinations(),
            vec![tile(5), tile(9), tile(11), tile(16)]
        );

        assert_eq!(engine.move_to(tile(5)), Ok(Applied::Done));
        assert!(!engine.in_interruption());
        assert!(!engine.needs_rescue());
        assert_eq!(engine.phase(), Phase::RoundEnd);
        assert_eq!(engine.current_seat(), Seat(0));
        assert!(engine.budget().is_exhausted());
        assert_eq!(engine.adventurer(Seat(1)).unwrap().position(), tile(5));
        assert!(engine.tile(tile(5)).occupants().contains(&Role::Engineer));

        assert_eq!(engine.advance_phase(), Ok(Applied::TurnEnded { next: Seat(1) }));
    }

    #[test]
    fn test_swimmers_rescued_in_order() {
        let mut engine = staged(&[Role::Diver, Role::Engineer]);
        engine.relocate(Seat(0), tile(10), false);
        sink(&mut engine, 10, 1);
        stack_flood(&mut engine, &[10, 1]);

        assert_eq!(engine.advance_phase(), Ok(Applied::RescueRequired { seat: Seat(1) }));
        assert_eq!(engine.water_queue().collect::<Vec<_>>(), vec![Seat(1), Seat(0)]);

        assert_eq!(engine.move_to(tile(5)), Ok(Applied::RescueRequired { seat: Seat(0) }));
        assert_eq!(engine.current_seat(), Seat(0));
        assert!(engine.move_destinations().contains(&tile(9)));

        assert_eq!(engine.move_to(tile(9)), Ok(Applied::Done));
        assert_eq!(engine.phase(), Phase::RoundEnd);
        assert_eq!(engine.adventurer(Seat(0)).unwrap().position(), tile(9));
    }

    #[test]
    fn test_stranded_swimmer_loses() {
        let mut engine = staged(&[Role::Messenger, Role::Diver]);
        sink(&mut engine, 11, 2);
        sink(&mut engine, 18, 2);
        sink(&mut engine, 12, 1);
        stack_flood(&mut engine, &[12, 1]);

        let lost = GameStatus::Lost(LossReason::NoSwimDestination(Role::Messenger));
        assert_eq!(engine.advance_phase(), Ok(Applied::GameOver(lost)));
        assert!(engine.is_finished());
    }

    #[test]
    fn test_sunk_extraction_loses() {
        let mut engine = staged(&[Role::Diver, Role::Engineer]);
        sink(&mut engine, 14, 1);
        stack_flood(&mut engine, &[14, 1]);

        let lost = GameStatus::Lost(LossReason::ExtractionSunk);
        assert_eq!(engine.advance_phase(), Ok(Applied::GameOver(lost)));
        assert_eq!(engine.move_to(tile(10)), Err(Rejection::GameOver));
    }

    #[test]
    fn test_lost_shrines_lose() {
        let mut engine = staged(&[Role::Diver, Role::Engineer]);
        sink(&mut engine, 7, 2);
        sink(&mut engine, 8, 1);
        stack_flood(&mut engine, &[8, 1]);

        let lost = GameStatus::Lost(LossReason::ShrineLost(Figurine::Ocean));
        assert_eq!(engine.advance_phase(), Ok(Applied::GameOver(lost)));
    }

    #[test]
    fn test_captured_treasure_shrines_may_sink() {
        let mut engine = staged(&[Role::Diver, Role::Engineer]);
        engine.board.mark_captured(Figurine::Ocean);
        sink(&mut engine, 7, 2);
        sink(&mut engine, 8, 1);
        stack_flood(&mut engine, &[8, 1]);

        assert_eq!(engine.advance_phase(), Ok(Applied::DrawsResolved));
    }

    #[test]
    fn test_forced_discard_after_pass_to_full_hand() {
        let mut engine = staged(&[Role::Messenger, Role::Diver]);
        set_hand(&mut engine, Seat(0), &[20]);
        set_hand(&mut engine, Seat(1), &[10, 11, 12, 13, 14]);

        assert_eq!(
            engine.pass_to(Seat(1), TreasureCard(20)),
            Ok(Applied::DiscardRequired { seat: Seat(1) })
        );
        assert_eq!(engine.phase(), Phase::ForcedDiscard);
        assert_eq!(engine.current_seat(), Seat(1));
        assert_eq!(engine.actions_consumed(), 3);
        assert!(engine.adventurer(Seat(0)).unwrap().holds(TreasureCard(20)));
        assert_eq!(
            engine.move_to(tile(15)),
            Err(Rejection::DiscardPending { seat: Seat(1) })
        );
        assert_eq!(
            engine.discard(&[TreasureCard(20)]),
            Err(Rejection::CardNotHeld(TreasureCard(20)))
        );

        assert_eq!(engine.discard(&[TreasureCard(10)]), Ok(Applied::Done));
        assert_eq!(engine.phase(), Phase::Acting);
        assert_eq!(engine.current_seat(), Seat(0));
        assert_eq!(engine.actions_consumed(), 0);
        assert_eq!(engine.adventurer(Seat(1)).unwrap().hand().len(), 4);
        assert!(engine.adventurer(Seat(0)).unwrap().holds(TreasureCard(20)));
        assert_eq!(engine.treasure_deck().discard_pile(), &[TreasureCard(10)]);

        assert_eq!(engine.pass_to(Seat(1), TreasureCard(20)), Ok(Applied::Done));
        assert_eq!(engine.adventurer(Seat(1)).unwrap().hand().len(), 5);
        assert_eq!(engine.actions_consumed(), 1);
    }

    #[test]
    fn test_forced_discard_receiver_plays_special_card() {
        let mut engine = staged(&[Role::Messenger, Role::Diver]);
        set_hand(&mut engine, Seat(0), &[20]);
        set_hand(&mut engine, Seat(1), &[23, 11, 12, 13, 14]);
        engine.pass_to(Seat(1), TreasureCard(20)).unwrap();

        assert_eq!(engine.special_action(TreasureCard(23), tile(19), &[]), Ok(Applied::Done));
        assert_eq!(engine.tile(tile(19)).status(), TileStatus::Normal);
        assert_eq!(engine.phase(), Phase::Acting);
        assert_eq!(engine.current_seat(), Seat(0));
        assert_eq!(engine.actions_consumed(), 0);
        assert_eq!(engine.adventurer(Seat(1)).unwrap().hand().len(), 4);
        assert_eq!(engine.treasure_deck().discard_pile(), &[TreasureCard(23)]);

        assert_eq!(engine.pass_to(Seat(1), TreasureCard(20)), Ok(Applied::Done));
    }

    #[test]
    fn test_out_of_turn_helicopter_after_draws() {
        let mut engine = staged(&[Role::Diver, Role::Engineer]);
        set_hand(&mut engine, Seat(1), &[20]);
        engine.advance_phase().unwrap();

        assert_eq!(engine.switch_player(Seat(1)), Ok(Applied::Done));
        assert_eq!(engine.phase(), Phase::OutOfTurn);
        // Cards drawn this turn belong to the turn's owner.
        assert_eq!(engine.discard(&[TreasureCard(4)]), Err(Rejection::OutOfTurn { seat: Seat(1) }));

        let landing = tile(TileId::FOOLS_LANDING.raw());
        assert_eq!(engine.special_action(TreasureCard(20), landing, &[Seat(0)]), Ok(Applied::Done));
        assert_eq!(engine.adventurer(Seat(0)).unwrap().position(), landing);
        assert_eq!(engine.adventurer(Seat(1)).unwrap().position(), landing);

        assert_eq!(engine.phase(), Phase::RoundEnd);
        assert_eq!(engine.current_seat(), Seat(0));
        assert_eq!(engine.displayed_cards(), &[TreasureCard(4), TreasureCard(5)]);
        assert_eq!(engine.advance_phase(), Ok(Applied::TurnEnded { next: Seat(1) }));
    }

    #[test]
    fn test_advance_cancels_suspended_pass() {
        let mut engine = staged(&[Role::Messenger, Role::Diver]);
        set_hand(&mut engine, Seat(0), &[20]);
        set_hand(&mut engine, Seat(1), &[10, 11, 12, 13, 14]);
        engine.pass_to(Seat(1), TreasureCard(20)).unwrap();

        assert_eq!(engine.advance_phase(), Ok(Applied::Done));
        assert_eq!(engine.phase(), Phase::Acting);
        assert_eq!(engine.current_seat(), Seat(0));
        assert_eq!(engine.actions_consumed(), 0);
        assert_eq!(engine.adventurer(Seat(1)).unwrap().hand().len(), 5);
    }
}
