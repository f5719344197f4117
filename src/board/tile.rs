//! Tile identities and per-cell tile state.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::adventurers::Role;
use crate::cards::Figurine;

use super::layout::PLAYABLE_CELLS;

/// Island names, indexed by `id - 1`.
const TILE_NAMES: [&str; PLAYABLE_CELLS] = [
    "Temple of the Moon",
    "Temple of the Sun",
    "Howling Garden",
    "Whispering Garden",
    "Cave of Embers",
    "Cave of Shadows",
    "Coral Palace",
    "Tidal Palace",
    "Iron Gate",
    "Bronze Gate",
    "Copper Gate",
    "Silver Gate",
    "Gold Gate",
    "Fool's Landing",
    "Breakers Bridge",
    "Cliffs of Abandon",
    "Crimson Forest",
    "Dunes of Deception",
    "Lost Lagoon",
    "Misty Marsh",
    "Observatory",
    "Phantom Rock",
    "Twilight Hollow",
    "Watchtower",
];

/// Stable identity of a playable tile, 1–24.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId(pub u8);

impl TileId {
    /// The extraction tile.
    pub const FOOLS_LANDING: TileId = TileId(14);

    /// Create a tile id; `None` outside 1–24.
    #[must_use]
    pub fn new(id: u8) -> Option<Self> {
        (1..=PLAYABLE_CELLS as u8).contains(&id).then_some(Self(id))
    }

    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// All 24 tile ids in order.
    pub fn all() -> impl Iterator<Item = TileId> {
        (1..=PLAYABLE_CELLS as u8).map(TileId)
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        TILE_NAMES
            .get(usize::from(self.0).wrapping_sub(1))
            .copied()
            .unwrap_or("Unknown")
    }

    /// The figurine whose shrine this tile is, if any.
    #[must_use]
    pub fn shrine_of(self) -> Option<Figurine> {
        match self.0 {
            1..=8 => Some(Figurine::ALL[usize::from((self.0 - 1) / 2)]),
            _ => None,
        }
    }

    /// The two shrine tiles of a figurine.
    #[must_use]
    pub fn shrines(figurine: Figurine) -> [TileId; 2] {
        let first = figurine.index() as u8 * 2 + 1;
        [TileId(first), TileId(first + 1)]
    }

    #[must_use]
    pub fn is_extraction(self) -> bool {
        self == Self::FOOLS_LANDING
    }

    /// Where a role stands at the start of the game.
    #[must_use]
    pub fn starting_tile(role: Role) -> TileId {
        TileId(role.id() + 9)
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name(), self.0)
    }
}

/// How far a tile has sunk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileStatus {
    #[default]
    Normal,
    Flooded,
    Sunk,
}

/// Board-level failures. The engine turns these into rejections.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TileError {
    #[error("cell {0} holds no tile")]
    Blank(super::Coord),
    #[error("{0} has sunk")]
    Sunk(TileId),
    #[error("{0} is not flooded")]
    NotFlooded(TileId),
}

/// One grid cell.
///
/// Blank cells have no id and never exist. A playable tile exists until its
/// status reaches `Sunk`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    id: Option<TileId>,
    status: TileStatus,
    captured: bool,
    occupants: SmallVec<[Role; 4]>,
}

impl Tile {
    /// A permanently empty sea cell.
    #[must_use]
    pub fn blank() -> Self {
        Self::default()
    }

    /// A fresh, dry tile.
    #[must_use]
    pub fn playable(id: TileId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn id(&self) -> Option<TileId> {
        self.id
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.id.is_none()
    }

    #[must_use]
    pub fn status(&self) -> TileStatus {
        self.status
    }

    /// Playable and not yet sunk.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.id.is_some() && self.status != TileStatus::Sunk
    }

    #[must_use]
    pub fn is_flooded(&self) -> bool {
        self.exists() && self.status == TileStatus::Flooded
    }

    /// Whether the treasure of this shrine has already been taken.
    #[must_use]
    pub fn is_captured(&self) -> bool {
        self.captured
    }

    #[must_use]
    pub fn occupants(&self) -> &[Role] {
        &self.occupants
    }

    pub(super) fn advance(&mut self) {
        self.status = match self.status {
            TileStatus::Normal => TileStatus::Flooded,
            TileStatus::Flooded | TileStatus::Sunk => TileStatus::Sunk,
        };
    }

    pub(super) fn dry(&mut self) {
        self.status = TileStatus::Normal;
    }

    pub(super) fn mark_captured(&mut self) {
        self.captured = true;
    }

    pub(super) fn add_occupant(&mut self, role: Role) {
        if !self.occupants.contains(&role) {
            self.occupants.push(role);
        }
    }

    pub(super) fn remove_occupant(&mut self, role: Role) {
        self.occupants.retain(|r| *r != role);
    }

    pub(super) fn take_occupants(&mut self) -> SmallVec<[Role; 4]> {
        std::mem::take(&mut self.occupants)
    }
}
