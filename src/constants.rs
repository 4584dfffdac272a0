// Simulation defaults, matching the original parameter panel.
pub const DEFAULT_POPULATION: usize = 4900;
pub const MIN_POPULATION: usize = 5;
pub const MAX_POPULATION: usize = 10_000;
pub const DEFAULT_WALKERS: usize = 1;
pub const DEFAULT_ITERATIONS: u32 = 10;
pub const DEFAULT_SPEED: f32 = 1.0;

// Viewer layout, in logical pixels.
pub const WINDOW_WIDTH: f32 = 1200.0;
pub const WINDOW_HEIGHT: f32 = 700.0;
pub const PANEL_SIZE: f32 = 520.0;
pub const PANEL_GAP: f32 = 80.0;
pub const TRAJECTORY_MARKER_SCALE: f32 = 0.6;
