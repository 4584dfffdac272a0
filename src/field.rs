//! The walker population and its occupancy grid.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::boundary::{BoundaryMode, Direction, Position};
use crate::config::{validate_lattice, SimulationConfig};
use crate::error::{ConfigError, FieldError, FieldResult};

/// How initial cells are drawn when two walkers land on the same one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementPolicy {
    /// Keep the draw. Both walkers share the cell and the grid counts it once.
    #[default]
    AllowOverlap,
    /// Redraw until an empty cell comes up.
    RejectOverlap,
}

/// Side length of the square grid for a requested population size.
///
/// `isqrt(isqrt(n)^2)`, which always equals `isqrt(n)`.
pub fn grid_size_for(population: usize) -> usize {
    let side = isqrt(population);
    isqrt(side * side)
}

fn isqrt(n: usize) -> usize {
    let mut root = (n as f64).sqrt() as usize;
    while root.checked_mul(root).map_or(true, |sq| sq > n) {
        root -= 1;
    }
    while (root + 1).checked_mul(root + 1).is_some_and(|sq| sq <= n) {
        root += 1;
    }
    root
}

/// A square lattice of walkers that each try one move per tick.
///
/// Walkers are updated one at a time in index order and every accepted move
/// is written to the grid immediately, so later walkers see the cells that
/// earlier walkers vacated or took during the same tick.
#[derive(Debug, Clone)]
pub struct WalkerField {
    grid_size: usize,
    boundary: BoundaryMode,
    /// Row-major occupancy flags.
    cells: Vec<bool>,
    walkers: Vec<Position>,
    rng: ChaCha8Rng,
    ticks: u64,
}

impl WalkerField {
    /// Build a field from a config, seeding the generator from `config.seed`
    /// or from OS entropy when unset.
    pub fn new(config: &SimulationConfig) -> FieldResult<Self> {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// Build a field that draws from the given generator.
    pub fn with_rng(config: &SimulationConfig, rng: ChaCha8Rng) -> FieldResult<Self> {
        let grid_size = grid_size_for(config.population);
        validate_lattice(grid_size, config.walkers, config.boundary)?;

        let mut field = Self::empty(grid_size, config.boundary, config.walkers, rng);
        for _ in 0..config.walkers {
            let position = field.draw_start(config.placement);
            field.place(position);
        }

        debug!(
            grid_size,
            walkers = config.walkers,
            occupied = field.occupied_count(),
            boundary = %config.boundary,
            "walker field initialised"
        );
        Ok(field)
    }

    /// Build a field with explicit starting cells. Duplicates are kept, like
    /// overlapping random placement.
    pub fn from_positions(
        grid_size: usize,
        boundary: BoundaryMode,
        positions: &[Position],
        rng: ChaCha8Rng,
    ) -> FieldResult<Self> {
        validate_lattice(grid_size, positions.len(), boundary)?;
        if let Some(&position) = positions
            .iter()
            .find(|p| p.row >= grid_size || p.col >= grid_size)
        {
            return Err(ConfigError::PositionOutOfRange { position, grid_size }.into());
        }

        let mut field = Self::empty(grid_size, boundary, positions.len(), rng);
        for &position in positions {
            field.place(position);
        }
        Ok(field)
    }

    fn empty(grid_size: usize, boundary: BoundaryMode, walkers: usize, rng: ChaCha8Rng) -> Self {
        Self {
            grid_size,
            boundary,
            cells: vec![false; grid_size * grid_size],
            walkers: Vec::with_capacity(walkers),
            rng,
            ticks: 0,
        }
    }

    fn draw_start(&mut self, placement: PlacementPolicy) -> Position {
        loop {
            let row = self.rng.gen_range(0..self.grid_size);
            let col = self.rng.gen_range(0..self.grid_size);
            let position = Position::new(row, col);
            match placement {
                PlacementPolicy::RejectOverlap if self.is_occupied(position) => continue,
                _ => return position,
            }
        }
    }

    fn place(&mut self, position: Position) {
        let index = self.index(position);
        self.cells[index] = true;
        self.walkers.push(position);
    }

    #[inline]
    fn index(&self, position: Position) -> usize {
        position.row * self.grid_size + position.col
    }

    /// Advance every walker by one tick, drawing each direction from the
    /// field's generator.
    pub fn step(&mut self) {
        let directions: Vec<Direction> = (0..self.walkers.len()).map(|_| self.rng.gen()).collect();
        self.apply(&directions);
    }

    /// Advance every walker by one tick using `directions[i]` for walker `i`.
    pub fn step_with_directions(&mut self, directions: &[Direction]) -> FieldResult<()> {
        if directions.len() != self.walkers.len() {
            return Err(FieldError::DirectionCountMismatch {
                expected: self.walkers.len(),
                actual: directions.len(),
            });
        }
        self.apply(directions);
        Ok(())
    }

    fn apply(&mut self, directions: &[Direction]) {
        let mut moved = 0usize;
        for (walker, &direction) in directions.iter().enumerate() {
            let from = self.walkers[walker];
            let to = self.boundary.next_position(from, direction, self.grid_size);
            let target = self.index(to);

            if self.cells[target] {
                trace!(walker, %from, ?direction, "blocked");
                continue;
            }
            let source = self.index(from);
            self.cells[target] = true;
            self.cells[source] = false;
            self.walkers[walker] = to;
            moved += 1;
        }

        self.ticks += 1;
        debug!(
            tick = self.ticks,
            moved,
            blocked = self.walkers.len() - moved,
            "tick complete"
        );
    }

    /// Current cell of walker 0.
    pub fn first_walker_position(&self) -> Position {
        self.walkers[0]
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn boundary(&self) -> BoundaryMode {
        self.boundary
    }

    pub fn walker_count(&self) -> usize {
        self.walkers.len()
    }

    /// Walker positions, indexed by walker.
    pub fn positions(&self) -> &[Position] {
        &self.walkers
    }

    /// Number of ticks applied so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_occupied(&self, position: Position) -> bool {
        position.row < self.grid_size
            && position.col < self.grid_size
            && self.cells[self.index(position)]
    }

    /// Number of cells flagged as occupied. Can be lower than the walker count
    /// when walkers started on a shared cell.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&occupied| occupied).count()
    }

    /// Occupancy flags row by row, row 0 first.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells.chunks(self.grid_size)
    }
}
