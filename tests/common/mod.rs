//! Shared builders for integration tests.
//!
//! A staged game lays tiles out in id order and stacks both decks, so
//! every draw is known in advance.

#![allow(dead_code)]

use forbidden_island::{Board, Coord, Engine, GameConfig, Role, TileId, TreasureCard};

/// Build a game with fixed roles and stacked decks.
///
/// `treasure_top` is dealt and drawn first; the remaining cards follow in
/// id order with the Waters Rise cards last. `flood_top` is drawn first
/// (six of them flood during setup); the remaining tiles follow in id
/// order.
pub fn staged(roles: &[Role], treasure_top: &[u8], flood_top: &[u8]) -> Engine {
    staged_at(1, roles, treasure_top, flood_top)
}

/// [`staged`] with the water meter starting at `difficulty`.
pub fn staged_at(difficulty: u8, roles: &[Role], treasure_top: &[u8], flood_top: &[u8]) -> Engine {
    let mut treasure: Vec<TreasureCard> = treasure_top.iter().copied().map(TreasureCard).collect();
    let rest = TreasureCard::all().filter(|c| !treasure.contains(c));
    let (rise, ordinary): (Vec<_>, Vec<_>) = rest.partition(|c| c.is_waters_rise());
    treasure.extend(ordinary);
    treasure.extend(rise);

    let mut flood: Vec<TileId> = flood_top.iter().copied().map(TileId).collect();
    let rest: Vec<_> = TileId::all().filter(|id| !flood.contains(id)).collect();
    flood.extend(rest);

    let config = GameConfig::new(roles.len(), difficulty)
        .with_seed(1)
        .with_roles(roles.to_vec())
        .with_tile_layout(TileId::all().collect())
        .with_treasure_order(treasure)
        .with_flood_order(flood);
    Engine::new(config).unwrap()
}

/// Setup floods the bottom two rows.
pub const BOTTOM_ROWS: [u8; 6] = [19, 20, 21, 22, 23, 24];

/// Where tile `id` lies in a staged game.
pub fn tile(id: u8) -> Coord {
    Board::ordered().coord_of(TileId(id))
}

pub fn cards(ids: &[u8]) -> Vec<TreasureCard> {
    ids.iter().copied().map(TreasureCard).collect()
}
