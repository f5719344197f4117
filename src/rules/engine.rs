//! The engine aggregate: setup, the query surface, and command dispatch.
//!
//! `Engine` owns every piece of game state. Board, decks and adventurer
//! records are only ever mutated from inside the engine, one command at a
//! time; each command is fully validated by [`Engine::check`] before any
//! mutation happens.

use im::Vector;
use smallvec::{smallvec, SmallVec};
use std::collections::VecDeque;
use tracing::{debug, info};

use super::observer::ChangeListener;
use super::turn::{ActionBudget, Applied, GameStatus, Interruption, Phase, RoundFrame};
use crate::adventurers::{movement, Adventurer, Role};
use crate::board::{Board, Coord, Tile, TileId, WaterMeter};
use crate::cards::{Figurine, FloodDeck, TreasureCard, TreasureDeck, HAND_LIMIT, SETUP_FLOOD_DRAW, STARTING_HAND_SIZE};
use crate::core::rng::streams;
use crate::core::{ActionRecord, Command, ConfigError, GameConfig, GameRng, Rejection, Seat, SeatMap};

/// A game of Forbidden Island in progress.
///
/// ## Example
///
/// ```
/// use forbidden_island::rules::Phase;
/// use forbidden_island::{Engine, GameConfig};
///
/// let mut engine = Engine::new(GameConfig::new(2, 2).with_seed(7)).unwrap();
/// assert_eq!(engine.actions_consumed(), 0);
///
/// // Skip the remaining actions and run the treasure and flood draws
/// engine.advance_phase().unwrap();
/// assert_ne!(engine.phase(), Phase::Acting);
/// ```
pub struct Engine {
    pub(super) config: GameConfig,
    pub(super) board: Board,
    pub(super) treasure: TreasureDeck,
    pub(super) flood: FloodDeck,
    pub(super) water: WaterMeter,
    pub(super) adventurers: SeatMap<Adventurer>,
    pub(super) seat: Seat,
    pub(super) budget: ActionBudget,
    pub(super) stage23_done: bool,
    /// Treasure cards drawn this turn, not yet merged into the hand.
    pub(super) displayed: SmallVec<[TreasureCard; 4]>,
    /// Seats in the water, in rescue order.
    pub(super) water_queue: VecDeque<Seat>,
    pub(super) frame: Option<RoundFrame>,
    pub(super) status: GameStatus,
    pub(super) turn: u32,
    history: Vector<ActionRecord>,
    listeners: Vec<Box<dyn ChangeListener>>,
}

impl Engine {
    /// Set up a new game.
    ///
    /// Roles are drawn, tiles laid out, decks shuffled (each from its own
    /// seeded stream unless fixed by the config), six tiles flooded and two
    /// cards dealt to every seat.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = GameRng::new(config.seed);

        let roles = match &config.roles {
            Some(roles) => roles.clone(),
            None => {
                let mut pool = Role::ALL.to_vec();
                rng.for_context(streams::ROLES).shuffle(&mut pool);
                pool.truncate(config.player_count);
                pool
            }
        };

        let mut board = match &config.tile_layout {
            Some(layout) => Board::from_layout(layout).ok_or(ConfigError::InvalidLayout)?,
            None => Board::shuffled(&mut rng.for_context(streams::LAYOUT)),
        };

        let treasure_rng = rng.for_context(streams::TREASURE);
        let mut treasure = match &config.treasure_order {
            Some(order) => TreasureDeck::stacked(order.clone(), treasure_rng),
            None => TreasureDeck::shuffled(treasure_rng),
        };

        let flood_rng = rng.for_context(streams::FLOOD);
        let mut flood = match &config.flood_order {
            Some(order) => FloodDeck::stacked(order.clone(), flood_rng),
            None => FloodDeck::shuffled(flood_rng),
        };

        let adventurers = SeatMap::from_vec(
            roles
                .iter()
                .zip(Seat::all(roles.len()))
                .map(|(&role, seat)| {
                    let start = board.coord_of(TileId::starting_tile(role));
                    board.place(role, start);
                    let mut adventurer = Adventurer::new(role, seat, start);
                    for card in treasure.draw_excluding_rise_cards(STARTING_HAND_SIZE) {
                        adventurer.receive(card);
                    }
                    adventurer
                })
                .collect(),
        );

        for id in flood.draw(SETUP_FLOOD_DRAW) {
            board.sink(id);
            flood.discard(id);
        }

        info!(
            seed = config.seed,
            players = config.player_count,
            difficulty = config.difficulty,
            roles = ?roles,
            "game set up"
        );

        Ok(Self {
            water: WaterMeter::new(config.difficulty),
            config,
            board,
            treasure,
            flood,
            adventurers,
            seat: Seat(0),
            budget: ActionBudget::full(),
            stage23_done: false,
            displayed: SmallVec::new(),
            water_queue: VecDeque::new(),
            frame: None,
            status: GameStatus::InProgress,
            turn: 1,
            history: Vector::new(),
            listeners: Vec::new(),
        })
    }

    /// Register a listener, called after every successful command.
    pub fn subscribe(&mut self, listener: impl ChangeListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // === Commands ===

    /// Validate and apply one command.
    ///
    /// On success the command is recorded and every listener notified. A
    /// rejection leaves the game untouched.
    pub fn apply(&mut self, command: Command) -> Result<Applied, Rejection> {
        if let Err(rejection) = self.check(&command) {
            debug!(command = command.name(), seat = %self.seat, %rejection, "command rejected");
            return Err(rejection);
        }

        let actor = self.seat;
        let applied = self.execute(&command)?;
        debug!(command = command.name(), seat = %actor, ?applied, "command applied");

        let sequence = self.history.len() as u32;
        self.history
            .push_back(ActionRecord::new(actor, command, self.turn, sequence));
        for listener in &mut self.listeners {
            listener.state_changed();
        }
        Ok(applied)
    }

    /// Move the actor, or swim during a rescue. Rejects with
    /// `IllegalMove` unless `target` is among [`Engine::move_destinations`].
    pub fn move_to(&mut self, target: Coord) -> Result<Applied, Rejection> {
        self.apply(Command::Move { target })
    }

    /// Shore up `target`, or the pending/own tile when `None`. Rejects with
    /// `IllegalShoreUp` for a tile that is not flooded or out of reach.
    pub fn shore_up(&mut self, target: Option<Coord>) -> Result<Applied, Rejection> {
        self.apply(Command::ShoreUp { target })
    }

    /// Navigator moves another adventurer. Rejects with `NotNavigator`,
    /// `NavigateSelf` or `IllegalNavigation`.
    pub fn navigate(&mut self, adventurer: Role, path: &[Coord]) -> Result<Applied, Rejection> {
        self.apply(Command::Navigate {
            adventurer,
            path: SmallVec::from_slice(path),
        })
    }

    /// Give a card away. Rejects with `NotCoLocated` unless the actor is the
    /// Messenger or shares the receiver's tile. A full receiving hand
    /// yields `Applied::DiscardRequired`.
    pub fn pass_to(&mut self, receiver: Seat, card: TreasureCard) -> Result<Applied, Rejection> {
        self.apply(Command::PassTo { receiver, card })
    }

    /// Capture the shrine's figurine. Rejects with `CaptureUnavailable`.
    pub fn capture(&mut self) -> Result<Applied, Rejection> {
        self.apply(Command::Capture)
    }

    /// Win from Fool's Landing. Rejects with `LiftOffUnavailable`.
    pub fn lift_off(&mut self) -> Result<Applied, Rejection> {
        self.apply(Command::LiftOff)
    }

    /// Play a Sandbag on `target`, or fly the actor and `passengers` there
    /// with a Helicopter Lift. Rejects with `CardNotHeld`, `NotSpecialCard`,
    /// `IllegalShoreUp` or `IllegalFlight`.
    pub fn special_action(
        &mut self,
        card: TreasureCard,
        target: Coord,
        passengers: &[Seat],
    ) -> Result<Applied, Rejection> {
        self.apply(Command::SpecialAction {
            card,
            target,
            passengers: SmallVec::from_slice(passengers),
        })
    }

    /// Discard cards from hand or from this turn's draw. Rejects with
    /// `EmptySelection` or `CardNotHeld`.
    pub fn discard(&mut self, cards: &[TreasureCard]) -> Result<Applied, Rejection> {
        self.apply(Command::Discard {
            cards: SmallVec::from_slice(cards),
        })
    }

    /// Drop pending selections. Only `GameOver` rejects it.
    pub fn reset(&mut self) -> Result<Applied, Rejection> {
        self.apply(Command::Reset)
    }

    /// Let `seat` play a special card outside their turn, or hand control
    /// back to the seat whose turn it is. Rejects with `AlreadyActing`,
    /// `UnknownSeat` or an interruption in progress.
    pub fn switch_player(&mut self, seat: Seat) -> Result<Applied, Rejection> {
        self.apply(Command::SwitchPlayer { seat })
    }

    /// The "Next" button.
    pub fn advance_phase(&mut self) -> Result<Applied, Rejection> {
        self.apply(Command::Advance)
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    /// The seat that acts now (the temporary actor during an interruption).
    #[must_use]
    pub fn current_seat(&self) -> Seat {
        self.seat
    }

    /// Turn number, starting at 1.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn budget(&self) -> ActionBudget {
        self.budget
    }

    /// The action count shown to players.
    #[must_use]
    pub fn actions_consumed(&self) -> u8 {
        self.budget.consumed()
    }

    #[must_use]
    pub fn actions_remaining(&self) -> u8 {
        self.budget.remaining()
    }

    #[must_use]
    pub fn stage23_done(&self) -> bool {
        self.stage23_done
    }

    /// Someone is in the water.
    #[must_use]
    pub fn needs_rescue(&self) -> bool {
        !self.water_queue.is_empty()
    }

    /// Seats still awaiting rescue, current swimmer first.
    pub fn water_queue(&self) -> impl Iterator<Item = Seat> + '_ {
        self.water_queue.iter().copied()
    }

    #[must_use]
    pub fn in_interruption(&self) -> bool {
        self.frame.is_some()
    }

    #[must_use]
    pub fn interruption(&self) -> Option<&RoundFrame> {
        self.frame.as_ref()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.status.is_finished() {
            return Phase::Finished;
        }
        match self.frame.map(|f| f.reason) {
            Some(Interruption::Rescue) => Phase::Rescue,
            Some(Interruption::ForcedDiscard { .. }) => Phase::ForcedDiscard,
            Some(Interruption::OutOfTurn { .. }) => Phase::OutOfTurn,
            None if self.stage23_done => Phase::RoundEnd,
            None => Phase::Acting,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn tile(&self, coord: Coord) -> &Tile {
        self.board.tile(coord)
    }

    #[must_use]
    pub fn water_meter(&self) -> WaterMeter {
        self.water
    }

    #[must_use]
    pub fn water_level(&self) -> u8 {
        self.water.level()
    }

    #[must_use]
    pub fn flood_draw_count(&self) -> usize {
        self.water.flood_draw_count()
    }

    #[must_use]
    pub fn seat_count(&self) -> usize {
        self.adventurers.seat_count()
    }

    #[must_use]
    pub fn adventurer(&self, seat: Seat) -> Option<&Adventurer> {
        self.adventurers.get(seat)
    }

    pub fn adventurers(&self) -> impl Iterator<Item = &Adventurer> {
        self.adventurers.values()
    }

    /// The adventurer acting now.
    #[must_use]
    pub fn actor(&self) -> &Adventurer {
        &self.adventurers[self.seat]
    }

    #[must_use]
    pub fn seat_of(&self, role: Role) -> Option<Seat> {
        self.adventurers
            .iter()
            .find(|(_, a)| a.role() == role)
            .map(|(seat, _)| seat)
    }

    /// Figurines collected by the whole team, in fixed order.
    #[must_use]
    pub fn captured_figurines(&self) -> SmallVec<[Figurine; 4]> {
        Figurine::ALL
            .into_iter()
            .filter(|&f| self.adventurers.values().any(|a| a.figurines().contains(&f)))
            .collect()
    }

    /// Treasure cards drawn this turn and not yet taken into hand.
    #[must_use]
    pub fn displayed_cards(&self) -> &[TreasureCard] {
        &self.displayed
    }

    /// Flood cards revealed by the latest flood draw.
    #[must_use]
    pub fn displayed_flood_cards(&self) -> &[TileId] {
        self.flood.last_drawn()
    }

    /// Flood cards whose tiles have sunk.
    #[must_use]
    pub fn removed_flood_cards(&self) -> &[TileId] {
        self.flood.removed()
    }

    #[must_use]
    pub fn treasure_deck(&self) -> &TreasureDeck {
        &self.treasure
    }

    #[must_use]
    pub fn flood_deck(&self) -> &FloodDeck {
        &self.flood
    }

    /// Every successful command so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    /// Where the actor may move now. Empty when moving is not allowed.
    #[must_use]
    pub fn move_destinations(&self) -> Vec<Coord> {
        let actor = self.actor();
        match self.frame.map(|f| f.reason) {
            Some(Interruption::Rescue) => movement::swim_destinations(&self.board, actor),
            Some(Interruption::ForcedDiscard { .. } | Interruption::OutOfTurn { .. }) => Vec::new(),
            None if self.stage23_done || self.budget.is_exhausted() => Vec::new(),
            None => movement::move_destinations(&self.board, actor),
        }
    }

    /// Tiles the actor may shore up now.
    #[must_use]
    pub fn shore_up_targets(&self) -> Vec<Coord> {
        let actor = self.actor();
        let can_pay = !self.budget.is_exhausted() || actor.bonus_shore_ups_left() > 0;
        if self.frame.is_some() || self.stage23_done || !can_pay {
            return Vec::new();
        }
        movement::shore_up_targets(&self.board, actor)
    }

    /// Where the adventurer at `seat` could swim from where they stand.
    #[must_use]
    pub fn swim_destinations(&self, seat: Seat) -> Vec<Coord> {
        self.adventurers
            .get(seat)
            .map(|a| movement::swim_destinations(&self.board, a))
            .unwrap_or_default()
    }

    /// Every command the current actor could issue successfully now.
    ///
    /// Multi-card discards and helicopter passenger sets are represented
    /// by their single-card and no-passenger forms.
    #[must_use]
    pub fn legal_commands(&self) -> Vec<Command> {
        if self.status.is_finished() {
            return Vec::new();
        }

        let actor = self.actor();
        let mut candidates = Vec::new();

        for target in self.move_destinations() {
            candidates.push(Command::Move { target });
        }
        for target in movement::shore_up_targets(&self.board, actor) {
            candidates.push(Command::ShoreUp { target: Some(target) });
        }

        if actor.role().capabilities().navigate {
            for other in self.adventurers.values().filter(|a| a.seat() != actor.seat()) {
                let from = other.position();
                for first in movement::navigation_steps(&self.board, from) {
                    candidates.push(Command::Navigate {
                        adventurer: other.role(),
                        path: smallvec![first],
                    });
                    for second in movement::navigation_steps(&self.board, first) {
                        if second != from {
                            candidates.push(Command::Navigate {
                                adventurer: other.role(),
                                path: smallvec![first, second],
                            });
                        }
                    }
                }
            }
        }

        for &card in actor.hand() {
            for receiver in Seat::all(self.seat_count()) {
                candidates.push(Command::PassTo { receiver, card });
            }
        }
        candidates.push(Command::Capture);
        candidates.push(Command::LiftOff);

        let playable = actor.hand().iter().chain(self.displayed.iter());
        for &card in playable {
            if card.is_sandbag() {
                for target in self.board.flooded() {
                    candidates.push(Command::SpecialAction {
                        card,
                        target,
                        passengers: SmallVec::new(),
                    });
                }
            } else if card.is_helicopter_lift() {
                for target in self.board.existing().filter(|&c| c != actor.position()) {
                    candidates.push(Command::SpecialAction {
                        card,
                        target,
                        passengers: SmallVec::new(),
                    });
                }
            }
        }

        for seat in Seat::all(self.seat_count()) {
            candidates.push(Command::SwitchPlayer { seat });
        }

        let discard_from: Vec<TreasureCard> = match self.frame.map(|f| f.reason) {
            Some(Interruption::ForcedDiscard { .. }) => actor.hand().to_vec(),
            _ if actor.hand().len() + self.displayed.len() > HAND_LIMIT => {
                actor.hand().iter().chain(self.displayed.iter()).copied().collect()
            }
            _ => Vec::new(),
        };
        for card in discard_from {
            candidates.push(Command::Discard { cards: smallvec![card] });
        }

        candidates.push(Command::Advance);

        candidates.retain(|command| self.check(command).is_ok());
        candidates
    }

    // === Internal helpers shared by the command and phase modules ===

    pub(super) fn actor_mut(&mut self) -> &mut Adventurer {
        &mut self.adventurers[self.seat]
    }

    pub(super) fn seat_of_role(&self, role: Role) -> Seat {
        self.seat_of(role).unwrap_or(self.seat)
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("turn", &self.turn)
            .field("seat", &self.seat)
            .field("budget", &self.budget)
            .field("phase", &self.phase())
            .field("water_level", &self.water.level())
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}
