//! Seat identification and per-seat data storage.
//!
//! ## Seat
//!
//! Type-safe seating position. Seat order is the round-robin turn order and
//! is independent of the adventurer's role identity.
//!
//! ## SeatMap
//!
//! Per-seat data storage backed by `Vec` for O(1) access.
//! Supports iteration and indexing by `Seat`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Seating position, 0-based. The first player to act sits at `Seat(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Seat(pub u8);

impl Seat {
    /// Create a new seat.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat that acts after this one at a table of `seat_count`.
    #[must_use]
    pub fn next(self, seat_count: usize) -> Seat {
        Seat(((self.index() + 1) % seat_count) as u8)
    }

    /// Iterate over all seats for a table of `seat_count`.
    ///
    /// ```
    /// use forbidden_island::core::Seat;
    ///
    /// let seats: Vec<_> = Seat::all(3).collect();
    /// assert_eq!(seats, vec![Seat::new(0), Seat::new(1), Seat::new(2)]);
    /// ```
    pub fn all(seat_count: usize) -> impl Iterator<Item = Seat> {
        (0..seat_count as u8).map(Seat)
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat {}", self.0 + 1)
    }
}

/// Per-seat data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use forbidden_island::core::{Seat, SeatMap};
///
/// let mut hands: SeatMap<Vec<u8>> = SeatMap::with_default(2);
/// hands[Seat::new(1)].push(7);
///
/// assert!(hands[Seat::new(0)].is_empty());
/// assert_eq!(hands[Seat::new(1)], vec![7]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeatMap<T> {
    data: Vec<T>,
}

impl<T> SeatMap<T> {
    /// Create a new SeatMap with values from a factory function.
    pub fn new(seat_count: usize, factory: impl FnMut(Seat) -> T) -> Self {
        let data = Seat::all(seat_count).map(factory).collect();
        Self { data }
    }

    /// Build from values already in seat order.
    #[must_use]
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Create a new SeatMap with default values.
    pub fn with_default(seat_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(seat_count, |_| T::default())
    }

    /// Number of seats.
    #[must_use]
    pub fn seat_count(&self) -> usize {
        self.data.len()
    }

    /// Get a seat's data, or `None` when the seat is not at the table.
    #[must_use]
    pub fn get(&self, seat: Seat) -> Option<&T> {
        self.data.get(seat.index())
    }

    /// Get a seat's data mutably, or `None` when the seat is not at the table.
    pub fn get_mut(&mut self, seat: Seat) -> Option<&mut T> {
        self.data.get_mut(seat.index())
    }

    /// Iterate over (Seat, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Seat, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (Seat(i as u8), v))
    }

    /// Iterate over all values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Iterate mutably over all values in seat order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.data.iter_mut()
    }
}

impl<T> Index<Seat> for SeatMap<T> {
    type Output = T;

    fn index(&self, seat: Seat) -> &Self::Output {
        &self.data[seat.index()]
    }
}

impl<T> IndexMut<Seat> for SeatMap<T> {
    fn index_mut(&mut self, seat: Seat) -> &mut Self::Output {
        &mut self.data[seat.index()]
    }
}
