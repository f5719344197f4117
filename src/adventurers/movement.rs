//! Movement legality per role.
//!
//! Every function here is a pure query over the board and an adventurer
//! record. Results are sorted row-major and free of duplicates.

use rustc_hash::FxHashSet;
use std::collections::VecDeque;

use super::adventurer::Adventurer;
use crate::board::{Board, Coord};

fn sorted(set: FxHashSet<Coord>) -> Vec<Coord> {
    let mut out: Vec<_> = set.into_iter().collect();
    out.sort_unstable();
    out
}

/// Existing neighbors of `from`, plus diagonals when `diagonal`.
fn adjacent_existing(board: &Board, from: Coord, diagonal: bool) -> impl Iterator<Item = Coord> + '_ {
    from.neighbors(diagonal).filter(move |&c| board.exists(c))
}

/// Existing tiles reachable by swimming through sunk, blank or flooded
/// cells, 4-directionally. Includes ordinary 4-neighbors.
#[must_use]
pub fn dive_reach(board: &Board, from: Coord) -> Vec<Coord> {
    let mut visited = FxHashSet::default();
    let mut reach = FxHashSet::default();
    let mut queue = VecDeque::from([from]);
    visited.insert(from);

    while let Some(cell) = queue.pop_front() {
        for next in cell.orthogonal() {
            if !visited.insert(next) {
                continue;
            }
            let tile = board.tile(next);
            if tile.exists() {
                reach.insert(next);
            }
            if !tile.exists() || tile.is_flooded() {
                queue.push_back(next);
            }
        }
    }
    reach.remove(&from);
    sorted(reach)
}

/// Existing tiles closest to `from` by straight-line distance.
#[must_use]
pub fn nearest_existing(board: &Board, from: Coord) -> Vec<Coord> {
    let candidates: Vec<_> = board.existing().filter(|&c| c != from).collect();
    let Some(best) = candidates.iter().map(|c| c.distance_squared(from)).min() else {
        return Vec::new();
    };
    candidates
        .into_iter()
        .filter(|c| c.distance_squared(from) == best)
        .collect()
}

/// Tiles reachable with an ordinary step for this role, ignoring flight.
#[must_use]
pub fn step_destinations(board: &Board, adventurer: &Adventurer) -> Vec<Coord> {
    let caps = adventurer.role().capabilities();
    let from = adventurer.position();
    let mut set: FxHashSet<Coord> = adjacent_existing(board, from, caps.diagonal).collect();
    if caps.dive {
        set.extend(dive_reach(board, from));
    }
    sorted(set)
}

/// Every tile a move action may target.
#[must_use]
pub fn move_destinations(board: &Board, adventurer: &Adventurer) -> Vec<Coord> {
    if adventurer.can_fly() {
        let from = adventurer.position();
        return board.existing().filter(|&c| c != from).collect();
    }
    step_destinations(board, adventurer)
}

/// Whether reaching `target` uses the Pilot's flight.
#[must_use]
pub fn needs_flight(board: &Board, adventurer: &Adventurer, target: Coord) -> bool {
    !step_destinations(board, adventurer).contains(&target)
}

/// Flooded tiles this adventurer may shore up: own tile and neighbors.
#[must_use]
pub fn shore_up_targets(board: &Board, adventurer: &Adventurer) -> Vec<Coord> {
    let from = adventurer.position();
    let diagonal = adventurer.role().capabilities().diagonal;
    let mut set: FxHashSet<Coord> = from.neighbors(diagonal).filter(|&c| board.is_flooded(c)).collect();
    if board.is_flooded(from) {
        set.insert(from);
    }
    sorted(set)
}

/// One Navigator step for another adventurer standing at `from`.
#[must_use]
pub fn navigation_steps(board: &Board, from: Coord) -> Vec<Coord> {
    sorted(adjacent_existing(board, from, false).collect())
}

/// Whether `path` is a legal Navigator relocation starting at `from`.
#[must_use]
pub fn is_navigation_path(board: &Board, from: Coord, path: &[Coord]) -> bool {
    if path.is_empty() || path.len() > 2 {
        return false;
    }
    let mut at = from;
    for &step in path {
        if !at.is_orthogonal_to(step) || !board.exists(step) {
            return false;
        }
        at = step;
    }
    true
}

/// Where an adventurer in the water may swim to.
///
/// Pilot: any existing tile. Diver: the nearest existing tiles. Explorer:
/// existing 8-neighbors. Everyone else: existing 4-neighbors.
#[must_use]
pub fn swim_destinations(board: &Board, adventurer: &Adventurer) -> Vec<Coord> {
    let caps = adventurer.role().capabilities();
    let from = adventurer.position();
    if caps.flight {
        board.existing().filter(|&c| c != from).collect()
    } else if caps.dive {
        nearest_existing(board, from)
    } else {
        sorted(adjacent_existing(board, from, caps.diagonal).collect())
    }
}
