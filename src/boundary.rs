//! Lattice coordinates and the edge rules that keep walkers on the grid.

use std::fmt;

use rand::distributions::{Distribution, Standard};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A cell on the lattice, addressed as `(row, col)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the four lattice moves. The discriminants are the draw values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Row minus one.
    Up = 0,
    /// Column minus one.
    Left = 1,
    /// Row plus one.
    Down = 2,
    /// Column plus one.
    Right = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Left, Direction::Down, Direction::Right];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl Distribution<Direction> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Direction {
        Direction::ALL[rng.gen_range(0..Direction::ALL.len())]
    }
}

/// How a coordinate that would leave the grid is brought back onto it.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryMode {
    /// Opposite edges are joined (torus).
    #[default]
    Periodic,
    /// Walkers bounce to the second cell from the edge.
    Mirror,
}

impl BoundaryMode {
    /// Smallest grid on which this mode is well defined.
    pub fn min_grid_size(self) -> usize {
        match self {
            BoundaryMode::Periodic => 1,
            BoundaryMode::Mirror => 3,
        }
    }

    /// Candidate cell for a walker at `from` moving in `direction`.
    ///
    /// Only the coordinate named by the direction changes. `grid_size` must
    /// be at least [`min_grid_size`](Self::min_grid_size).
    pub fn next_position(self, from: Position, direction: Direction, grid_size: usize) -> Position {
        debug_assert!(grid_size >= self.min_grid_size());
        let last = grid_size - 1;
        let Position { row, col } = from;

        match direction {
            Direction::Up => Position::new(self.decrement(row, last), col),
            Direction::Left => Position::new(row, self.decrement(col, last)),
            Direction::Down => Position::new(self.increment(row, last), col),
            Direction::Right => Position::new(row, self.increment(col, last)),
        }
    }

    fn decrement(self, value: usize, last: usize) -> usize {
        match (self, value) {
            (BoundaryMode::Periodic, 0) => last,
            (BoundaryMode::Mirror, 0) => 1,
            _ => value - 1,
        }
    }

    fn increment(self, value: usize, last: usize) -> usize {
        if value != last {
            return value + 1;
        }
        match self {
            BoundaryMode::Periodic => 0,
            BoundaryMode::Mirror => last.saturating_sub(1),
        }
    }
}

impl fmt::Display for BoundaryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryMode::Periodic => f.write_str("Periodic"),
            BoundaryMode::Mirror => f.write_str("Mirror"),
        }
    }
}
