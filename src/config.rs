//! Run parameters for a walker simulation.
//!
//! Values come from three layers: built-in defaults, an optional JSON file and
//! command line overrides applied by the binary.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::boundary::BoundaryMode;
use crate::constants::*;
use crate::error::ConfigError;
use crate::field::{grid_size_for, PlacementPolicy};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Requested population size; the grid side is its integer square root.
    pub population: usize,
    pub walkers: usize,
    pub boundary: BoundaryMode,
    pub placement: PlacementPolicy,
    /// Number of ticks a run lasts.
    pub iterations: u32,
    /// Playback speed in `[0, 1]`; the delay between ticks is `1 - speed` seconds.
    pub speed: f32,
    /// Seed for the walker generator. `None` draws one from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            population: DEFAULT_POPULATION,
            walkers: DEFAULT_WALKERS,
            boundary: BoundaryMode::Periodic,
            placement: PlacementPolicy::AllowOverlap,
            iterations: DEFAULT_ITERATIONS,
            speed: DEFAULT_SPEED,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Load a JSON config file. Missing fields keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = serde_json::from_str(contents)?;
        Ok(config)
    }

    pub fn grid_size(&self) -> usize {
        grid_size_for(self.population)
    }

    /// Time the viewer waits between two ticks.
    pub fn step_delay(&self) -> Duration {
        Duration::from_secs_f32((1.0 - self.speed).clamp(0.0, 1.0))
    }

    /// Check everything a run needs: the lattice itself plus the driver's
    /// population range, iteration count and speed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_POPULATION..=MAX_POPULATION).contains(&self.population) {
            return Err(ConfigError::PopulationOutOfRange {
                value: self.population,
                min: MIN_POPULATION,
                max: MAX_POPULATION,
            });
        }
        if self.iterations == 0 {
            return Err(ConfigError::NoIterations);
        }
        if !(0.0..=1.0).contains(&self.speed) {
            return Err(ConfigError::SpeedOutOfRange(self.speed));
        }
        validate_lattice(self.grid_size(), self.walkers, self.boundary)
    }
}

/// Checks shared by every way of building a field.
pub(crate) fn validate_lattice(
    grid_size: usize,
    walkers: usize,
    boundary: BoundaryMode,
) -> Result<(), ConfigError> {
    if grid_size == 0 {
        return Err(ConfigError::EmptyPopulation);
    }
    if walkers == 0 {
        return Err(ConfigError::NoWalkers);
    }
    if walkers > grid_size * grid_size {
        return Err(ConfigError::TooManyWalkers { walkers, grid_size });
    }
    if grid_size < boundary.min_grid_size() {
        return Err(ConfigError::MirrorGridTooSmall { grid_size });
    }
    Ok(())
}
