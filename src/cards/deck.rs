//! Generic draw/discard container shared by both decks.
//!
//! Index 0 of the draw pile is the top. Recycled discards go to the bottom;
//! `put_discard_on_top` puts them on top instead.

use tracing::trace;

use crate::core::GameRng;

/// A draw pile and a discard pile with a private shuffle stream.
///
/// Cards only ever move between the two piles or out to the caller, so the
/// combined count is conserved by every operation here.
#[derive(Clone, Debug)]
pub struct Deck<C> {
    draw_pile: Vec<C>,
    discard_pile: Vec<C>,
    rng: GameRng,
}

impl<C: Copy + PartialEq + std::fmt::Debug> Deck<C> {
    /// Create a deck with `draw_pile` as given (top first) and no discards.
    #[must_use]
    pub fn new(draw_pile: Vec<C>, rng: GameRng) -> Self {
        Self {
            draw_pile,
            discard_pile: Vec::new(),
            rng,
        }
    }

    /// If fewer than `n` cards remain, shuffle the discard pile and place it
    /// under the draw pile.
    pub fn recycle_if_short(&mut self, n: usize) {
        if self.draw_pile.len() < n && !self.discard_pile.is_empty() {
            trace!(remaining = self.draw_pile.len(), recycled = self.discard_pile.len(), "reshuffling discards");
            self.rng.shuffle(&mut self.discard_pile);
            self.draw_pile.append(&mut self.discard_pile);
        }
    }

    /// Remove and return up to `n` cards from the top.
    ///
    /// Fewer than `n` are returned only when both piles together hold
    /// fewer than `n`.
    pub fn draw(&mut self, n: usize) -> Vec<C> {
        self.recycle_if_short(n);
        let take = n.min(self.draw_pile.len());
        self.draw_pile.drain(..take).collect()
    }

    /// Remove the top card without recycling.
    pub fn take_top(&mut self) -> Option<C> {
        if self.draw_pile.is_empty() {
            None
        } else {
            Some(self.draw_pile.remove(0))
        }
    }

    /// Append to the discard pile.
    pub fn discard(&mut self, card: C) {
        self.discard_pile.push(card);
    }

    /// Shuffle the discard pile and place it on top of the draw pile.
    pub fn put_discard_on_top(&mut self) {
        if self.discard_pile.is_empty() {
            return;
        }
        self.rng.shuffle(&mut self.discard_pile);
        let mut pile = std::mem::take(&mut self.discard_pile);
        pile.append(&mut self.draw_pile);
        self.draw_pile = pile;
    }

    /// Move the discard pile into the draw pile and shuffle everything.
    pub fn shuffle_discard_into_pile(&mut self) {
        self.draw_pile.append(&mut self.discard_pile);
        self.rng.shuffle(&mut self.draw_pile);
    }

    /// Delete one copy of `card` from whichever pile holds it.
    ///
    /// Returns false if neither pile contains it.
    pub fn remove(&mut self, card: C) -> bool {
        for pile in [&mut self.draw_pile, &mut self.discard_pile] {
            if let Some(pos) = pile.iter().position(|&c| c == card) {
                pile.remove(pos);
                return true;
            }
        }
        false
    }

    /// Cards in the draw pile, top first.
    #[must_use]
    pub fn draw_pile(&self) -> &[C] {
        &self.draw_pile
    }

    /// Cards in the discard pile, oldest first.
    #[must_use]
    pub fn discard_pile(&self) -> &[C] {
        &self.discard_pile
    }

    /// Cards held by the deck across both piles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.draw_pile.len() + self.discard_pile.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
