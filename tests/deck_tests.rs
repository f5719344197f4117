//! Deck behaviour under arbitrary sequences of operations.

use proptest::prelude::*;

use forbidden_island::{FloodDeck, GameRng, TileId, TreasureCard, TreasureDeck};

#[derive(Clone, Debug)]
enum FloodOp {
    Draw(usize),
    DiscardHeld,
    RemoveHeld,
    Resurface,
}

fn flood_op() -> impl Strategy<Value = FloodOp> {
    prop_oneof![
        (1usize..=5).prop_map(FloodOp::Draw),
        Just(FloodOp::DiscardHeld),
        Just(FloodOp::RemoveHeld),
        Just(FloodOp::Resurface),
    ]
}

proptest! {
    /// Every flood card is always in exactly one place: a pile, the
    /// caller's hands, or the removed list.
    #[test]
    fn prop_flood_cards_conserved(seed in any::<u64>(), ops in prop::collection::vec(flood_op(), 0..80)) {
        let mut deck = FloodDeck::shuffled(GameRng::new(seed));
        let mut out: Vec<TileId> = Vec::new();

        for op in ops {
            match op {
                FloodOp::Draw(n) => {
                    let drawn = deck.draw(n);
                    prop_assert!(drawn.len() <= n);
                    prop_assert_eq!(deck.last_drawn(), drawn.as_slice());
                    out.extend(drawn);
                }
                FloodOp::DiscardHeld => {
                    if let Some(id) = out.pop() {
                        deck.discard(id);
                    }
                }
                FloodOp::RemoveHeld => {
                    if let Some(id) = out.pop() {
                        deck.remove_permanently(id);
                    }
                }
                FloodOp::Resurface => deck.put_discard_on_top(),
            }

            let total = deck.draw_pile().len() + deck.discard_pile().len() + deck.removed().len() + out.len();
            prop_assert_eq!(total, 24);

            let mut seen: Vec<TileId> = deck
                .draw_pile()
                .iter()
                .chain(deck.discard_pile())
                .chain(deck.removed())
                .chain(&out)
                .copied()
                .collect();
            seen.sort();
            prop_assert!(seen.into_iter().eq(TileId::all()));
        }
    }

    /// Removed cards never come back, even through reshuffles.
    #[test]
    fn prop_removed_cards_stay_removed(seed in any::<u64>(), removed in prop::collection::btree_set(1u8..=24, 1..10)) {
        let mut deck = FloodDeck::shuffled(GameRng::new(seed));
        for &id in &removed {
            deck.remove_permanently(TileId(id));
        }

        for _ in 0..20 {
            for id in deck.draw(3) {
                prop_assert!(!removed.contains(&id.raw()));
                deck.discard(id);
            }
            deck.put_discard_on_top();
        }
        prop_assert_eq!(deck.removed().len(), removed.len());
    }

    /// The opening deal never hands out a Waters Rise card, wherever they sit.
    #[test]
    fn prop_opening_deal_skips_rise_cards(seed in any::<u64>()) {
        let mut deck = TreasureDeck::shuffled(GameRng::new(seed));
        let mut dealt = Vec::new();
        for _ in 0..4 {
            let hand = deck.draw_excluding_rise_cards(2);
            prop_assert_eq!(hand.len(), 2);
            prop_assert!(hand.iter().all(|c| !c.is_waters_rise()));
            dealt.extend(hand);
        }
        prop_assert_eq!(dealt.len() + deck.draw_pile().len() + deck.discard_pile().len(), 28);
        prop_assert!(deck.discard_pile().is_empty());
    }
}

#[test]
fn test_treasure_deck_recycles_discards() {
    let order: Vec<_> = TreasureCard::all().collect();
    let mut deck = TreasureDeck::stacked(order, GameRng::new(3));

    let first = deck.draw(27);
    for card in first {
        deck.discard(card);
    }
    let drawn = deck.draw(2);
    assert_eq!(drawn.len(), 2);
    assert_eq!(drawn[0], TreasureCard(27));
    assert_eq!(deck.draw_pile().len() + deck.discard_pile().len(), 26);
    assert!(deck.discard_pile().is_empty());
}

#[test]
fn test_flood_deck_resurfaces_discards_on_top() {
    let order: Vec<_> = TileId::all().collect();
    let mut deck = FloodDeck::stacked(order, GameRng::new(5));
    for id in deck.draw(4) {
        deck.discard(id);
    }
    deck.put_discard_on_top();

    let mut top: Vec<_> = deck.draw(4).into_iter().map(TileId::raw).collect();
    top.sort();
    assert_eq!(top, vec![1, 2, 3, 4]);
    assert_eq!(deck.draw(1), vec![TileId(5)]);
}
