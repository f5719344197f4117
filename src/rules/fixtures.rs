//! Staged games for unit tests.
//!
//! Tiles are laid out in id order, Waters Rise cards sit at the bottom of
//! the treasure deck, and setup floods tiles 19–24 (the bottom two rows).
//! Later flood draws take tiles 1, 2, 3 … in order.

use super::engine::Engine;
use crate::adventurers::Role;
use crate::board::{Board, Coord, TileId};
use crate::cards::TreasureCard;
use crate::core::{GameConfig, Seat};

pub(crate) fn staged(roles: &[Role]) -> Engine {
    let mut treasure: Vec<_> = TreasureCard::all().filter(|c| !c.is_waters_rise()).collect();
    treasure.extend(TreasureCard::all().filter(|c| c.is_waters_rise()));

    let mut flood: Vec<_> = (19..=24).map(TileId).collect();
    flood.extend((1..=18).map(TileId));

    let config = GameConfig::new(roles.len(), 1)
        .with_seed(1)
        .with_roles(roles.to_vec())
        .with_tile_layout(TileId::all().collect())
        .with_treasure_order(treasure)
        .with_flood_order(flood);
    Engine::new(config).expect("staged config is valid")
}

/// Where tile `id` lies in the staged layout.
pub(crate) fn tile(id: u8) -> Coord {
    Board::ordered().coord_of(TileId(id))
}

/// Replace a hand outright.
pub(crate) fn set_hand(engine: &mut Engine, seat: Seat, ids: &[u8]) {
    let adventurer = &mut engine.adventurers[seat];
    let held = adventurer.hand().to_vec();
    for card in held {
        adventurer.take(card);
    }
    for &id in ids {
        adventurer.receive(TreasureCard(id));
    }
}

/// Advance a tile `stages` times.
pub(crate) fn sink(engine: &mut Engine, id: u8, stages: usize) {
    for _ in 0..stages {
        engine.board.sink(TileId(id));
    }
}
