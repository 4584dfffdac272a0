use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use bevy::prelude::*;
use clap::Parser;
use lattice_walkers::constants::{WINDOW_HEIGHT, WINDOW_WIDTH};
use lattice_walkers::{
    BoundaryMode, ConfigError, PlacementPolicy, Position, SimulationConfig, WalkerField,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

mod resources;
mod systems;

use resources::*;
use systems::*;

// ==================== Command Line ====================
#[derive(Parser, Debug)]
#[command(name = "lattice-walkers")]
#[command(version)]
#[command(about = "Random walkers on a square lattice with periodic or mirror edges")]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Population size, the grid side is its integer square root
    #[arg(short = 'n', long)]
    population: Option<usize>,

    /// Number of walkers
    #[arg(short, long)]
    walkers: Option<usize>,

    /// Boundary conditions
    #[arg(short, long, value_enum)]
    boundary: Option<BoundaryMode>,

    /// Number of iterations per run
    #[arg(short, long)]
    iterations: Option<u32>,

    /// Playback speed between 0.0 and 1.0
    #[arg(long)]
    speed: Option<f32>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Redraw starting cells that are already taken
    #[arg(long)]
    reject_overlap: bool,

    /// Print one JSON line per step instead of opening a window
    #[arg(long)]
    headless: bool,
}

impl Cli {
    fn resolve(&self) -> Result<SimulationConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::from_file(path)?,
            None => SimulationConfig::default(),
        };

        if let Some(population) = self.population {
            config.population = population;
        }
        if let Some(walkers) = self.walkers {
            config.walkers = walkers;
        }
        if let Some(boundary) = self.boundary {
            config.boundary = boundary;
        }
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        if let Some(speed) = self.speed {
            config.speed = speed;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.reject_overlap {
            config.placement = PlacementPolicy::RejectOverlap;
        }

        config.validate()?;
        Ok(config)
    }
}

// ==================== Main App Setup ====================
fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.headless {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(io::stderr)
            .init();
    }

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let result = if cli.headless {
        run_headless(&config)
    } else {
        run_viewer(config)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_viewer(config: SimulationConfig) -> Result<(), Box<dyn Error>> {
    let simulation = Simulation::new(WalkerField::new(&config)?);
    let layout = PanelLayout::new(simulation.field.grid_size());

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Random Walk model".into(),
                resolution: (WINDOW_WIDTH, WINDOW_HEIGHT).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::srgb(0.08, 0.08, 0.1)))
        .insert_resource(SimulationRng::from_config(&config))
        .insert_resource(RunState::new(&config))
        .insert_resource(SimulationSettings(config))
        .insert_resource(simulation)
        .insert_resource(layout)
        .add_systems(Startup, (setup, setup_ui))
        .add_systems(Update, (
            // Input systems
            handle_button_clicks,
            keyboard_controls,

            // Simulation systems
            advance_simulation,

            // Rendering systems
            paint_cells,
            draw_trajectory,
            update_status_text,
        ).chain())
        .run();

    Ok(())
}

// ==================== Headless Runner ====================
#[derive(Serialize)]
struct StepReport {
    step: u32,
    first_walker: Position,
    occupied: usize,
}

impl StepReport {
    fn of(step: u32, field: &WalkerField) -> Self {
        Self {
            step,
            first_walker: field.first_walker_position(),
            occupied: field.occupied_count(),
        }
    }
}

fn run_headless(config: &SimulationConfig) -> Result<(), Box<dyn Error>> {
    let mut field = WalkerField::new(config)?;
    info!(
        grid_size = field.grid_size(),
        walkers = field.walker_count(),
        boundary = %field.boundary(),
        iterations = config.iterations,
        "headless run started"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, &StepReport::of(0, &field))?;

    for step in 1..=config.iterations {
        field.step();
        write_report(&mut out, &StepReport::of(step, &field))?;
    }
    out.flush()?;

    info!(ticks = field.ticks(), occupied = field.occupied_count(), "headless run complete");
    Ok(())
}

fn write_report<W: Write>(out: &mut W, report: &StepReport) -> Result<(), Box<dyn Error>> {
    serde_json::to_writer(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "lattice-walkers",
            "-n",
            "100",
            "-w",
            "12",
            "--boundary",
            "mirror",
            "--seed",
            "5",
            "--reject-overlap",
        ]);
        let config = cli.resolve().unwrap();
        assert_eq!(config.grid_size(), 10);
        assert_eq!(config.walkers, 12);
        assert_eq!(config.boundary, BoundaryMode::Mirror);
        assert_eq!(config.seed, Some(5));
        assert_eq!(config.placement, PlacementPolicy::RejectOverlap);
        assert_eq!(config.iterations, 10);
    }

    #[test]
    fn invalid_flags_are_rejected() {
        let cli = Cli::parse_from(["lattice-walkers", "--speed", "2.0"]);
        assert!(matches!(cli.resolve(), Err(ConfigError::SpeedOutOfRange(_))));
    }

    #[test]
    fn headless_report_is_one_json_line() {
        let config = SimulationConfig {
            population: 16,
            walkers: 2,
            seed: Some(3),
            ..Default::default()
        };
        let field = WalkerField::new(&config).unwrap();
        let mut buffer = Vec::new();
        write_report(&mut buffer, &StepReport::of(0, &field)).unwrap();

        let line = String::from_utf8(buffer).unwrap();
        assert!(line.ends_with('\n'));
        let value: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
        assert_eq!(value["step"], 0);
        assert_eq!(value["first_walker"]["row"], field.first_walker_position().row);
        assert_eq!(value["occupied"], field.occupied_count());
    }
}
