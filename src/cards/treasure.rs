//! Treasure cards and the treasure deck.
//!
//! ## Card identities
//!
//! | Ids   | Kind                         |
//! |-------|------------------------------|
//! | 0–19  | Treasure, five per figurine  |
//! | 20–22 | Helicopter Lift              |
//! | 23–24 | Sandbag                      |
//! | 25–27 | Waters Rise                  |

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::deck::Deck;
use crate::core::GameRng;

/// Number of treasure card identifiers.
pub const TREASURE_DECK_SIZE: usize = 28;

/// Cards drawn by the active adventurer in Stage23.
pub const TREASURE_DRAW_COUNT: usize = 2;

/// Cards dealt to every adventurer at setup.
pub const STARTING_HAND_SIZE: usize = 2;

/// Hand limit enforced at round end and on card passes.
pub const HAND_LIMIT: usize = 5;

/// Treasure cards of one figurine needed for a capture.
pub const CARDS_PER_CAPTURE: usize = 4;

/// One of the four treasure figurines, in fixed order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Figurine {
    Earth,
    Wind,
    Fire,
    Ocean,
}

impl Figurine {
    /// All figurines in order.
    pub const ALL: [Figurine; 4] = [Figurine::Earth, Figurine::Wind, Figurine::Fire, Figurine::Ocean];

    /// 0-based position in [`Figurine::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Figurine::Earth => "Earth Stone",
            Figurine::Wind => "Statue of the Wind",
            Figurine::Fire => "Crystal of Fire",
            Figurine::Ocean => "Ocean's Chalice",
        }
    }
}

impl std::fmt::Display for Figurine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What a treasure card does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    /// Collect four to capture the figurine.
    Treasure(Figurine),
    /// Free relocation of one or more adventurers; also needed for lift-off.
    HelicopterLift,
    /// Free shore-up of any flooded tile.
    Sandbag,
    /// Raises the water meter when drawn.
    WatersRise,
}

/// A treasure card identifier, 0–27.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TreasureCard(pub u8);

impl TreasureCard {
    /// Create a card; `None` outside 0–27.
    #[must_use]
    pub fn new(id: u8) -> Option<Self> {
        (usize::from(id) < TREASURE_DECK_SIZE).then_some(Self(id))
    }

    /// Get the raw id.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// All 28 cards in id order.
    pub fn all() -> impl Iterator<Item = TreasureCard> {
        (0..TREASURE_DECK_SIZE as u8).map(TreasureCard)
    }

    /// Classify the card.
    #[must_use]
    pub fn kind(self) -> CardKind {
        match self.0 {
            0..=19 => CardKind::Treasure(Figurine::ALL[usize::from(self.0 / 5)]),
            20..=22 => CardKind::HelicopterLift,
            23..=24 => CardKind::Sandbag,
            _ => CardKind::WatersRise,
        }
    }

    /// The figurine this card counts toward, if it is a treasure card.
    #[must_use]
    pub fn figurine(self) -> Option<Figurine> {
        match self.kind() {
            CardKind::Treasure(figurine) => Some(figurine),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_waters_rise(self) -> bool {
        self.kind() == CardKind::WatersRise
    }

    #[must_use]
    pub fn is_helicopter_lift(self) -> bool {
        self.kind() == CardKind::HelicopterLift
    }

    #[must_use]
    pub fn is_sandbag(self) -> bool {
        self.kind() == CardKind::Sandbag
    }
}

impl std::fmt::Display for TreasureCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind() {
            CardKind::Treasure(figurine) => write!(f, "{} #{}", figurine, self.0),
            CardKind::HelicopterLift => write!(f, "Helicopter Lift #{}", self.0),
            CardKind::Sandbag => write!(f, "Sandbag #{}", self.0),
            CardKind::WatersRise => write!(f, "Waters Rise! #{}", self.0),
        }
    }
}

/// The shared treasure deck.
#[derive(Clone, Debug)]
pub struct TreasureDeck {
    deck: Deck<TreasureCard>,
}

impl TreasureDeck {
    /// A freshly shuffled deck of all 28 cards.
    #[must_use]
    pub fn shuffled(mut rng: GameRng) -> Self {
        let mut cards: Vec<_> = TreasureCard::all().collect();
        rng.shuffle(&mut cards);
        Self::stacked(cards, rng)
    }

    /// A deck whose draw pile is exactly `cards`, top first.
    #[must_use]
    pub fn stacked(cards: Vec<TreasureCard>, rng: GameRng) -> Self {
        Self {
            deck: Deck::new(cards, rng),
        }
    }

    /// Draw up to `n` cards, recycling the discard pile when short.
    pub fn draw(&mut self, n: usize) -> Vec<TreasureCard> {
        self.deck.draw(n)
    }

    /// Draw `n` ordinary cards for the opening deal.
    ///
    /// Waters Rise cards met on the way are set aside into the discard pile;
    /// if any were set aside they are shuffled back into the draw pile
    /// before returning.
    pub fn draw_excluding_rise_cards(&mut self, n: usize) -> Vec<TreasureCard> {
        self.deck.recycle_if_short(n);

        let mut dealt = Vec::with_capacity(n);
        let mut set_aside = false;
        while dealt.len() < n {
            let Some(card) = self.deck.take_top() else {
                break;
            };
            if card.is_waters_rise() {
                debug!(%card, "set aside during opening deal");
                self.deck.discard(card);
                set_aside = true;
            } else {
                dealt.push(card);
            }
        }

        if set_aside {
            self.deck.shuffle_discard_into_pile();
        }
        dealt
    }

    /// Put a card on the discard pile.
    pub fn discard(&mut self, card: TreasureCard) {
        self.deck.discard(card);
    }

    /// Cards left in the draw pile.
    #[must_use]
    pub fn draw_pile(&self) -> &[TreasureCard] {
        self.deck.draw_pile()
    }

    /// Cards in the discard pile.
    #[must_use]
    pub fn discard_pile(&self) -> &[TreasureCard] {
        self.deck.discard_pile()
    }
}
