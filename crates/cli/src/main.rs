//! `lbm2d`: lid-driven cavity flow with the lattice Boltzmann method.
//!
//! Runs the cavity until the velocity field reaches steady state or the step
//! limit is hit, writing VTK snapshots to the output directory along the way.

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;
use lbm2d_cli::{CavityConfig, CollisionKind, WallKind, cavity};
use lbm2d_core::Observer;
use lbm2d_observers::{Progress, SteadyState, VtkWriter};
use lbm2d_solvers::simulation::{Action, Event, Status};
use tracing::{Level, info, warn};

/// Lid-driven cavity solver
#[derive(Debug, Parser)]
#[command(name = "lbm2d")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Lid-driven cavity flow with the lattice Boltzmann method", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory for VTK files
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Maximum number of steps
    #[arg(short, long)]
    steps: Option<usize>,

    /// Collision model
    #[arg(long, value_enum)]
    collision: Option<CollisionKind>,

    /// Bounceback scheme for the walls
    #[arg(long, value_enum)]
    walls: Option<WallKind>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

impl Cli {
    /// Loads the config file, if any, and applies the command-line overrides.
    fn resolve_config(&self) -> Result<CavityConfig> {
        let mut config = match &self.config {
            Some(path) => CavityConfig::load(path)?,
            None => CavityConfig::default(),
        };
        if let Some(output) = &self.output {
            config.output.clone_from(output);
        }
        if let Some(steps) = self.steps {
            config.max_steps = Some(steps);
        }
        if let Some(collision) = self.collision {
            config.collision = collision;
        }
        if let Some(walls) = self.walls {
            config.walls = walls;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!("failed to initialize logging: {err}"))?;

    let config = cli.resolve_config()?;
    run(&config)
}

fn run(config: &CavityConfig) -> Result<()> {
    let mut simulation = cavity::build(config)?;

    let interval = config.output_interval();
    let mut progress = Progress::new(interval);
    let mut vtk = VtkWriter::new(&config.output, *simulation.topology(), interval)?;
    let mut steady = SteadyState::new(config.tolerance, interval);

    let solution = simulation.run(config.max_steps(), |event: &Event<'_>| -> Option<Action> {
        let _: Option<Action> = progress.observe(event);
        let write: Option<Action> = vtk.observe(event);
        let converged: Option<Action> = steady.observe(event);
        write.or(converged)
    })?;

    let step = simulation.steps_taken();
    match (solution.status, steady.converged_at()) {
        (_, Some(at)) => info!("steady state after {at} steps"),
        (Status::Complete, None) => warn!(
            "no steady state after {step} steps, last change {:.3e}",
            steady.last_error().unwrap_or(f64::NAN)
        ),
        (Status::StoppedByObserver, None) => {}
    }

    let files = vtk.finish_with(step, simulation.field())?;
    info!("wrote {} VTK files to {}", files.len(), config.output.display());
    Ok(())
}
