use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use clap::ValueEnum;
use lbm2d_solvers::{CollisionModel, boundary::BouncebackScheme};
use serde::{Deserialize, Serialize};

/// Collision model selectable from the command line and config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionKind {
    Bgk,
    #[default]
    Mrt,
}

impl From<CollisionKind> for CollisionModel {
    fn from(kind: CollisionKind) -> Self {
        match kind {
            CollisionKind::Bgk => Self::Bgk,
            CollisionKind::Mrt => Self::Mrt,
        }
    }
}

/// Bounceback scheme used for the cavity walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum WallKind {
    FullWay,
    #[default]
    HalfWay,
}

impl From<WallKind> for BouncebackScheme {
    fn from(kind: WallKind) -> Self {
        match kind {
            WallKind::FullWay => Self::FullWay,
            WallKind::HalfWay => Self::HalfWay,
        }
    }
}

/// Configuration of a lid-driven cavity run.
///
/// Every field is optional in the TOML file and falls back to its default.
///
/// ```toml
/// nx = 128
/// ny = 64
/// viscosity = 0.02
/// lid_velocity = [0.1, 0.0]
/// collision = "bgk"
/// walls = "full-way"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CavityConfig {
    /// Nodes along x.
    pub nx: usize,

    /// Nodes along y.
    pub ny: usize,

    pub time_step: f64,

    /// Space step, `sqrt(time_step)` if unset.
    pub space_step: Option<f64>,

    /// Initial density at every node.
    pub density: f64,

    /// Kinematic viscosity.
    pub viscosity: f64,

    /// Velocity of the top lid.
    pub lid_velocity: [f64; 2],

    pub collision: CollisionKind,

    pub walls: WallKind,

    /// Steady-state tolerance on the per-step change in velocity.
    pub tolerance: f64,

    /// Steps between outputs and steady-state checks, `nx / 8` if unset.
    pub output_interval: Option<usize>,

    /// Step limit, `nx` if unset.
    pub max_steps: Option<usize>,

    /// Directory for VTK output.
    pub output: PathBuf,
}

impl Default for CavityConfig {
    fn default() -> Self {
        Self {
            nx: 256,
            ny: 256,
            time_step: 1.0,
            space_step: None,
            density: 1.0,
            viscosity: 1.0 / 18.0,
            lid_velocity: [0.3, 0.0],
            collision: CollisionKind::default(),
            walls: WallKind::default(),
            tolerance: 1.0e-3,
            output_interval: None,
            max_steps: None,
            output: PathBuf::from("vtk_fluid"),
        }
    }
}

impl CavityConfig {
    /// Loads a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or has unknown fields.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Checks the values the solver itself does not validate.
    ///
    /// # Errors
    ///
    /// Returns an error if the density or tolerance is not a positive finite
    /// number.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.density.is_finite() && self.density > 0.0,
            "density must be positive, got {}",
            self.density
        );
        ensure!(
            self.tolerance.is_finite() && self.tolerance > 0.0,
            "tolerance must be positive, got {}",
            self.tolerance
        );
        Ok(())
    }

    #[must_use]
    pub fn space_step(&self) -> f64 {
        self.space_step.unwrap_or_else(|| self.time_step.sqrt())
    }

    #[must_use]
    pub fn output_interval(&self) -> usize {
        self.output_interval.unwrap_or(self.nx / 8).max(1)
    }

    #[must_use]
    pub fn max_steps(&self) -> usize {
        self.max_steps.unwrap_or(self.nx)
    }
}
