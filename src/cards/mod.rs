//! Card system: the generic deck and the two concrete decks.
//!
//! ## Key Types
//!
//! - `Deck`: Draw pile + discard pile with reshuffle-on-underflow
//! - `TreasureCard` / `CardKind` / `Figurine`: Treasure card identities
//! - `TreasureDeck`: 28 cards, opening deal skips Waters Rise
//! - `FloodDeck`: 24 cards, one per tile; sunk tiles' cards leave the game
//!
//! Decks own their piles privately; callers move cards only through the
//! operations exposed here.

pub mod deck;
pub mod flood;
pub mod treasure;

pub use deck::Deck;
pub use flood::{FloodDeck, FLOOD_DECK_SIZE, SETUP_FLOOD_DRAW};
pub use treasure::{
    CardKind, Figurine, TreasureCard, TreasureDeck, CARDS_PER_CAPTURE, HAND_LIMIT, STARTING_HAND_SIZE,
    TREASURE_DECK_SIZE, TREASURE_DRAW_COUNT,
};
