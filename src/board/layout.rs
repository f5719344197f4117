//! Grid geometry: coordinates, the fixed island silhouette, neighborhoods.
//!
//! The island is a 6×6 grid. Twelve cells are permanently blank (sea), the
//! remaining 24 cells hold the playable tiles in row-major order.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Width and height of the grid.
pub const GRID_SIZE: usize = 6;

/// Number of playable cells (and tiles).
pub const PLAYABLE_CELLS: usize = 24;

/// Flat indices (`row * 6 + col`) of the permanently blank cells.
pub const BLANK_CELLS: [usize; 12] = [0, 1, 4, 5, 6, 11, 24, 29, 30, 31, 34, 35];

/// A row/column pair that does not name a grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("({row}, {col}) is off the 6x6 grid")]
pub struct OffGrid {
    pub row: u8,
    pub col: u8,
}

/// A cell on the grid.
///
/// Always within the 6×6 range: the only constructors are [`Coord::new`],
/// [`Coord::from_flat`] and a deserializer that applies the same check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCoord")]
pub struct Coord {
    row: u8,
    col: u8,
}

#[derive(Deserialize)]
struct RawCoord {
    row: u8,
    col: u8,
}

impl TryFrom<RawCoord> for Coord {
    type Error = OffGrid;

    fn try_from(raw: RawCoord) -> Result<Self, Self::Error> {
        Coord::new(raw.row, raw.col).ok_or(OffGrid {
            row: raw.row,
            col: raw.col,
        })
    }
}

impl Coord {
    /// The top-left cell.
    pub const ORIGIN: Coord = Coord { row: 0, col: 0 };

    /// Create a coordinate. Callers outside the 6×6 range get `None`.
    #[must_use]
    pub fn new(row: u8, col: u8) -> Option<Self> {
        ((row as usize) < GRID_SIZE && (col as usize) < GRID_SIZE).then_some(Self { row, col })
    }

    /// Coordinate from a flat row-major index.
    #[must_use]
    pub fn from_flat(index: usize) -> Option<Self> {
        (index < GRID_SIZE * GRID_SIZE).then(|| Self {
            row: (index / GRID_SIZE) as u8,
            col: (index % GRID_SIZE) as u8,
        })
    }

    #[must_use]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[must_use]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Flat row-major index.
    #[must_use]
    pub const fn flat(self) -> usize {
        self.row as usize * GRID_SIZE + self.col as usize
    }

    /// Whether the cell is part of the island silhouette.
    #[must_use]
    pub fn is_playable(self) -> bool {
        !BLANK_CELLS.contains(&self.flat())
    }

    fn offset(self, d_row: i8, d_col: i8) -> Option<Coord> {
        let row = u8::try_from(i16::from(self.row) + i16::from(d_row)).ok()?;
        let col = u8::try_from(i16::from(self.col) + i16::from(d_col)).ok()?;
        Coord::new(row, col)
    }

    /// Up, down, left and right neighbors that lie on the grid.
    pub fn orthogonal(self) -> impl Iterator<Item = Coord> {
        [(-1, 0), (1, 0), (0, -1), (0, 1)]
            .into_iter()
            .filter_map(move |(r, c)| self.offset(r, c))
    }

    /// The four diagonal neighbors that lie on the grid.
    pub fn diagonal(self) -> impl Iterator<Item = Coord> {
        [(-1, -1), (-1, 1), (1, -1), (1, 1)]
            .into_iter()
            .filter_map(move |(r, c)| self.offset(r, c))
    }

    /// Orthogonal neighbors, plus diagonals when `with_diagonals`.
    pub fn neighbors(self, with_diagonals: bool) -> impl Iterator<Item = Coord> {
        let diagonals = with_diagonals.then(|| self.diagonal()).into_iter().flatten();
        self.orthogonal().chain(diagonals)
    }

    /// Orthogonally adjacent (Manhattan distance 1).
    #[must_use]
    pub fn is_orthogonal_to(self, other: Coord) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }

    /// Diagonally adjacent.
    #[must_use]
    pub fn is_diagonal_to(self, other: Coord) -> bool {
        self.row.abs_diff(other.row) == 1 && self.col.abs_diff(other.col) == 1
    }

    /// Squared Euclidean distance; enough to compare distances exactly.
    #[must_use]
    pub fn distance_squared(self, other: Coord) -> u32 {
        let dr = u32::from(self.row.abs_diff(other.row));
        let dc = u32::from(self.col.abs_diff(other.col));
        dr * dr + dc * dc
    }

    /// All 36 cells in row-major order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..GRID_SIZE * GRID_SIZE).filter_map(Coord::from_flat)
    }

    /// The 24 playable cells in row-major order.
    pub fn playable() -> impl Iterator<Item = Coord> {
        Coord::all().filter(|c| c.is_playable())
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.row, self.col)
    }
}
