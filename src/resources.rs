use bevy::prelude::*;
use lattice_walkers::constants::{PANEL_GAP, PANEL_SIZE};
use lattice_walkers::{FieldResult, Position, SimulationConfig, Trajectory, WalkerField};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The running field plus walker 0's trail.
#[derive(Resource)]
pub struct Simulation {
    pub field: WalkerField,
    pub trajectory: Trajectory,
}

impl Simulation {
    pub fn new(field: WalkerField) -> Self {
        let trajectory = Trajectory::starting_at(field.first_walker_position());
        Self { field, trajectory }
    }

    /// Fresh field for a reset, seeded from the viewer's generator.
    pub fn reseeded(config: &SimulationConfig, rng: &mut SimulationRng) -> FieldResult<Self> {
        let child = ChaCha8Rng::seed_from_u64(rng.0.gen());
        Ok(Self::new(WalkerField::with_rng(config, child)?))
    }

    pub fn advance(&mut self) {
        self.field.step();
        self.trajectory.record(self.field.first_walker_position());
    }
}

#[derive(Resource)]
pub struct SimulationSettings(pub SimulationConfig);

/// Seeds the field built on every reset.
#[derive(Resource)]
pub struct SimulationRng(pub ChaCha8Rng);

impl SimulationRng {
    pub fn from_config(config: &SimulationConfig) -> Self {
        match config.seed {
            Some(seed) => SimulationRng(ChaCha8Rng::seed_from_u64(seed)),
            None => SimulationRng(ChaCha8Rng::from_entropy()),
        }
    }
}

#[derive(Resource)]
pub struct RunState {
    pub running: bool,
    pub step: u32,
    pub iterations: u32,
    /// `None` when speed is 1.0 and ticks run every frame.
    pub pacing: Option<Timer>,
}

impl RunState {
    pub fn new(config: &SimulationConfig) -> Self {
        let delay = config.step_delay();
        Self {
            running: false,
            step: 0,
            iterations: config.iterations,
            pacing: (!delay.is_zero()).then(|| Timer::new(delay, TimerMode::Repeating)),
        }
    }

    pub fn finished(&self) -> bool {
        self.step >= self.iterations
    }

    pub fn rewind(&mut self) {
        self.running = false;
        self.step = 0;
        if let Some(timer) = self.pacing.as_mut() {
            timer.reset();
        }
    }
}

/// Screen placement of the occupancy panel (left) and trajectory panel (right).
#[derive(Resource, Clone, Copy)]
pub struct PanelLayout {
    pub cell_size: f32,
    pub grid_origin: Vec2,
    pub trajectory_origin: Vec2,
}

impl PanelLayout {
    pub fn new(grid_size: usize) -> Self {
        let offset = (PANEL_SIZE + PANEL_GAP) / 2.0;
        let half = PANEL_SIZE / 2.0;
        Self {
            cell_size: PANEL_SIZE / grid_size as f32,
            grid_origin: Vec2::new(-offset - half, -half - 20.0),
            trajectory_origin: Vec2::new(offset - half, -half - 20.0),
        }
    }

    /// Row 0 is drawn at the bottom, column 0 on the left.
    pub fn cell_center(&self, origin: Vec2, position: Position) -> Vec2 {
        origin
            + Vec2::new(
                (position.col as f32 + 0.5) * self.cell_size,
                (position.row as f32 + 0.5) * self.cell_size,
            )
    }

    pub fn panel_center(origin: Vec2) -> Vec2 {
        origin + Vec2::splat(PANEL_SIZE / 2.0)
    }
}
