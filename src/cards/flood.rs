//! The flood deck: one card per playable tile.

use tracing::debug;

use super::deck::Deck;
use crate::board::TileId;
use crate::core::GameRng;

/// Number of flood cards.
pub const FLOOD_DECK_SIZE: usize = 24;

/// Flood cards drawn during setup, before the water meter takes over.
pub const SETUP_FLOOD_DRAW: usize = 6;

/// The flood deck.
///
/// Drawn cards are in flight until the caller either discards them or, when
/// their tile has fully sunk, removes them permanently.
#[derive(Clone, Debug)]
pub struct FloodDeck {
    deck: Deck<TileId>,
    last_drawn: Vec<TileId>,
    removed: Vec<TileId>,
}

impl FloodDeck {
    /// A freshly shuffled deck of all 24 tiles.
    #[must_use]
    pub fn shuffled(mut rng: GameRng) -> Self {
        let mut cards: Vec<_> = TileId::all().collect();
        rng.shuffle(&mut cards);
        Self::stacked(cards, rng)
    }

    /// A deck whose draw pile is exactly `cards`, top first.
    #[must_use]
    pub fn stacked(cards: Vec<TileId>, rng: GameRng) -> Self {
        Self {
            deck: Deck::new(cards, rng),
            last_drawn: Vec::new(),
            removed: Vec::new(),
        }
    }

    /// Draw up to `n` cards, recycling the discard pile when short.
    pub fn draw(&mut self, n: usize) -> Vec<TileId> {
        let drawn = self.deck.draw(n);
        self.last_drawn.clone_from(&drawn);
        drawn
    }

    /// Put a drawn card on the discard pile.
    pub fn discard(&mut self, card: TileId) {
        self.deck.discard(card);
    }

    /// Waters Rise: shuffle the discard pile back on top of the draw pile.
    pub fn put_discard_on_top(&mut self) {
        debug!(cards = self.deck.discard_pile().len(), "flood discards back on top");
        self.deck.put_discard_on_top();
    }

    /// Take a card out of the game because its tile has sunk.
    ///
    /// The card is deleted from whichever pile holds it (an in-flight card
    /// is in neither) and never returns.
    pub fn remove_permanently(&mut self, card: TileId) {
        if self.removed.contains(&card) {
            return;
        }
        self.deck.remove(card);
        self.removed.push(card);
    }

    /// Cards revealed by the most recent draw.
    #[must_use]
    pub fn last_drawn(&self) -> &[TileId] {
        &self.last_drawn
    }

    /// Cards removed from the game, in removal order.
    #[must_use]
    pub fn removed(&self) -> &[TileId] {
        &self.removed
    }

    /// Cards left in the draw pile, top first.
    #[must_use]
    pub fn draw_pile(&self) -> &[TileId] {
        self.deck.draw_pile()
    }

    /// Cards in the discard pile.
    #[must_use]
    pub fn discard_pile(&self) -> &[TileId] {
        self.deck.discard_pile()
    }
}
