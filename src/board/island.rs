//! The island: a 6×6 grid of tiles with a fixed id↔coordinate mapping.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace};

use super::layout::{Coord, GRID_SIZE, PLAYABLE_CELLS};
use super::tile::{Tile, TileError, TileId, TileStatus};
use crate::adventurers::Role;
use crate::cards::Figurine;
use crate::core::GameRng;

/// What a single `sink` call did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SinkOutcome {
    pub tile: TileId,
    pub previous: TileStatus,
    pub status: TileStatus,
    /// Occupants washed off a tile that just sank. Empty unless `removed`.
    pub evicted: SmallVec<[Role; 4]>,
}

impl SinkOutcome {
    /// The tile went from Flooded to Sunk in this call.
    #[must_use]
    pub fn removed(&self) -> bool {
        self.previous == TileStatus::Flooded && self.status == TileStatus::Sunk
    }

    /// The extraction tile is gone.
    #[must_use]
    pub fn extraction_lost(&self) -> bool {
        self.removed() && self.tile.is_extraction()
    }
}

/// The game board.
///
/// The board records where occupants stand, never who they are beyond
/// their role.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: Vec<Tile>,
    /// Coordinate of tile `id`, at index `id - 1`.
    positions: Vec<Coord>,
}

impl Board {
    /// Build a board from the tile id of each playable cell, row-major.
    ///
    /// Returns `None` unless `layout` is a permutation of 1–24.
    #[must_use]
    pub fn from_layout(layout: &[TileId]) -> Option<Self> {
        if !is_tile_permutation(layout) {
            return None;
        }

        let mut cells = vec![Tile::blank(); GRID_SIZE * GRID_SIZE];
        let mut positions = vec![Coord::ORIGIN; PLAYABLE_CELLS];
        for (coord, &id) in Coord::playable().zip(layout) {
            cells[coord.flat()] = Tile::playable(id);
            positions[usize::from(id.raw()) - 1] = coord;
        }
        Some(Self { cells, positions })
    }

    /// Board with tile ids shuffled onto the playable cells.
    #[must_use]
    pub fn shuffled(rng: &mut GameRng) -> Self {
        let mut layout: Vec<_> = TileId::all().collect();
        rng.shuffle(&mut layout);
        Self::from_layout(&layout).unwrap_or_else(Self::ordered)
    }

    /// Board with tile ids in row-major order.
    #[must_use]
    pub fn ordered() -> Self {
        let mut cells = vec![Tile::blank(); GRID_SIZE * GRID_SIZE];
        let mut positions = Vec::with_capacity(PLAYABLE_CELLS);
        for (coord, id) in Coord::playable().zip(TileId::all()) {
            cells[coord.flat()] = Tile::playable(id);
            positions.push(coord);
        }
        Self { cells, positions }
    }

    /// The tile at a cell.
    #[must_use]
    pub fn tile(&self, coord: Coord) -> &Tile {
        &self.cells[coord.flat()]
    }

    /// The tile with a given id.
    #[must_use]
    pub fn tile_by_id(&self, id: TileId) -> &Tile {
        self.tile(self.coord_of(id))
    }

    /// Where tile `id` lies.
    #[must_use]
    pub fn coord_of(&self, id: TileId) -> Coord {
        self.positions[usize::from(id.raw()) - 1]
    }

    /// Tile id at a cell, `None` for blank cells.
    #[must_use]
    pub fn id_at(&self, coord: Coord) -> Option<TileId> {
        self.tile(coord).id()
    }

    #[must_use]
    pub fn exists(&self, coord: Coord) -> bool {
        self.tile(coord).exists()
    }

    #[must_use]
    pub fn is_flooded(&self, coord: Coord) -> bool {
        self.tile(coord).is_flooded()
    }

    /// All 36 cells with their tiles, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, &Tile)> {
        Coord::all().map(move |c| (c, self.tile(c)))
    }

    /// Cells whose tile still exists.
    pub fn existing(&self) -> impl Iterator<Item = Coord> + '_ {
        Coord::all().filter(move |&c| self.exists(c))
    }

    /// Cells whose tile is currently flooded.
    pub fn flooded(&self) -> impl Iterator<Item = Coord> + '_ {
        Coord::all().filter(move |&c| self.is_flooded(c))
    }

    /// Advance a tile one stage.
    ///
    /// Normal becomes Flooded. Flooded becomes Sunk and evicts everyone on
    /// it. A Sunk tile is left alone.
    pub fn sink(&mut self, id: TileId) -> SinkOutcome {
        let coord = self.coord_of(id);
        let tile = &mut self.cells[coord.flat()];
        let before = tile.status();
        if before == TileStatus::Sunk {
            return SinkOutcome {
                tile: id,
                previous: before,
                status: before,
                evicted: SmallVec::new(),
            };
        }

        tile.advance();
        let evicted = if tile.status() == TileStatus::Sunk {
            tile.take_occupants()
        } else {
            SmallVec::new()
        };
        debug!(tile = %id, status = ?tile.status(), evicted = evicted.len(), "tile sinks");

        SinkOutcome {
            tile: id,
            previous: before,
            status: tile.status(),
            evicted,
        }
    }

    /// Flooded back to Normal.
    pub fn shore_up(&mut self, coord: Coord) -> Result<(), TileError> {
        let tile = &mut self.cells[coord.flat()];
        let id = tile.id().ok_or(TileError::Blank(coord))?;
        match tile.status() {
            TileStatus::Flooded => {
                tile.dry();
                trace!(tile = %id, "shored up");
                Ok(())
            }
            TileStatus::Normal => {
                debug!(tile = %id, "shore-up on a dry tile");
                Err(TileError::NotFlooded(id))
            }
            TileStatus::Sunk => Err(TileError::Sunk(id)),
        }
    }

    /// Whether a figurine has already been captured.
    #[must_use]
    pub fn is_captured(&self, figurine: Figurine) -> bool {
        let [first, _] = TileId::shrines(figurine);
        self.tile_by_id(first).is_captured()
    }

    /// Flag both shrines of a figurine as captured.
    pub fn mark_captured(&mut self, figurine: Figurine) {
        for id in TileId::shrines(figurine) {
            let coord = self.coord_of(id);
            self.cells[coord.flat()].mark_captured();
        }
    }

    /// The first uncaptured figurine whose shrines have both sunk.
    #[must_use]
    pub fn lost_shrine(&self) -> Option<Figurine> {
        Figurine::ALL.into_iter().find(|&figurine| {
            !self.is_captured(figurine)
                && TileId::shrines(figurine)
                    .iter()
                    .all(|&id| !self.tile_by_id(id).exists())
        })
    }

    /// Whether any shrine has been lost.
    #[must_use]
    pub fn is_shrine_lost(&self) -> bool {
        self.lost_shrine().is_some()
    }

    /// Whether the extraction tile still exists.
    #[must_use]
    pub fn extraction_exists(&self) -> bool {
        self.tile_by_id(TileId::FOOLS_LANDING).exists()
    }

    /// Record `role` as standing at `coord`.
    pub fn place(&mut self, role: Role, coord: Coord) {
        self.cells[coord.flat()].add_occupant(role);
    }

    /// Move an occupant between cells.
    pub fn relocate(&mut self, role: Role, from: Coord, to: Coord) {
        self.cells[from.flat()].remove_occupant(role);
        self.cells[to.flat()].add_occupant(role);
    }
}

/// Whether `ids` is exactly the tiles 1–24 in some order.
#[must_use]
pub fn is_tile_permutation(ids: &[TileId]) -> bool {
    let mut sorted = ids.to_vec();
    sorted.sort_unstable();
    sorted.into_iter().eq(TileId::all())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(row: u8, col: u8) -> Coord {
        Coord::new(row, col).unwrap()
    }

    #[test]
    fn test_ordered_mapping_is_bijective() {
        let board = Board::ordered();
        for id in TileId::all() {
            let coord = board.coord_of(id);
            assert_eq!(board.id_at(coord), Some(id));
        }
        assert_eq!(board.id_at(c(0, 0)), None);
        assert_eq!(board.id_at(c(0, 2)), Some(TileId(1)));
        assert_eq!(board.existing().count(), PLAYABLE_CELLS);
    }

    #[test]
    fn test_from_layout_rejects_duplicates() {
        let mut layout: Vec<_> = TileId::all().collect();
        layout[3] = TileId(1);
        assert!(Board::from_layout(&layout).is_none());
        assert!(Board::from_layout(&layout[..20]).is_none());
    }

    #[test]
    fn test_shuffled_covers_all_tiles() {
        let board = Board::shuffled(&mut GameRng::new(5));
        let mut ids: Vec<_> = board.cells().filter_map(|(_, t)| t.id()).collect();
        ids.sort();
        assert_eq!(ids, TileId::all().collect::<Vec<_>>());
    }

    #[test]
    fn test_sink_evicts_occupants() {
        let mut board = Board::ordered();
        let id = TileId(9);
        let at = board.coord_of(id);
        board.place(Role::Diver, at);
        board.place(Role::Pilot, at);

        let first = board.sink(id);
        assert!(!first.removed());
        assert!(first.evicted.is_empty());
        assert_eq!(board.tile(at).occupants().len(), 2);

        let second = board.sink(id);
        assert!(second.removed());
        assert_eq!(second.evicted.as_slice(), &[Role::Diver, Role::Pilot]);
        assert!(board.tile(at).occupants().is_empty());
        assert!(!board.exists(at));
    }

    #[test]
    fn test_extraction_lost() {
        let mut board = Board::ordered();
        board.sink(TileId::FOOLS_LANDING);
        let outcome = board.sink(TileId::FOOLS_LANDING);
        assert!(outcome.extraction_lost());
        assert!(!board.extraction_exists());
    }

    #[test]
    fn test_shore_up_only_flooded() {
        let mut board = Board::ordered();
        let id = TileId(17);
        let at = board.coord_of(id);

        assert_eq!(board.shore_up(at), Err(TileError::NotFlooded(id)));
        board.sink(id);
        assert_eq!(board.shore_up(at), Ok(()));
        assert_eq!(board.tile(at).status(), TileStatus::Normal);

        board.sink(id);
        board.sink(id);
        assert_eq!(board.shore_up(at), Err(TileError::Sunk(id)));
        assert_eq!(board.shore_up(c(0, 0)), Err(TileError::Blank(c(0, 0))));
    }

    #[test]
    fn test_shrine_loss_needs_both_tiles() {
        let mut board = Board::ordered();
        for _ in 0..2 {
            board.sink(TileId(5));
        }
        assert_eq!(board.lost_shrine(), None);

        for _ in 0..2 {
            board.sink(TileId(6));
        }
        assert_eq!(board.lost_shrine(), Some(Figurine::Fire));
    }

    #[test]
    fn test_captured_shrine_is_not_lost() {
        let mut board = Board::ordered();
        board.mark_captured(Figurine::Ocean);
        for id in TileId::shrines(Figurine::Ocean) {
            board.sink(id);
            board.sink(id);
        }
        assert!(board.is_captured(Figurine::Ocean));
        assert!(!board.is_shrine_lost());
    }

    #[test]
    fn test_relocate_updates_occupants() {
        let mut board = Board::ordered();
        board.place(Role::Engineer, c(2, 2));
        board.relocate(Role::Engineer, c(2, 2), c(2, 3));
        assert!(board.tile(c(2, 2)).occupants().is_empty());
        assert_eq!(board.tile(c(2, 3)).occupants(), &[Role::Engineer]);
    }
}
