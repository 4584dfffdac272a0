//! Random walkers on a square lattice with periodic or mirror edges.
//!
//! [`WalkerField`] owns the occupancy grid, the walker positions and a seeded
//! generator. A driver calls [`WalkerField::step`] once per tick and reads the
//! grid plus [`WalkerField::first_walker_position`] back out for rendering.

pub mod boundary;
pub mod config;
pub mod constants;
pub mod error;
pub mod field;
pub mod trajectory;

pub use boundary::{BoundaryMode, Direction, Position};
pub use config::SimulationConfig;
pub use error::{ConfigError, FieldError, FieldResult};
pub use field::{grid_size_for, PlacementPolicy, WalkerField};
pub use trajectory::Trajectory;
