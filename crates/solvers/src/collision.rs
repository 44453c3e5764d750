//! Collision operators for the D2Q9 lattice.
//!
//! A [`Collision`] owns the per-node density, the equilibrium distribution,
//! and the set of nodes excluded from relaxation. It relaxes the distribution
//! grid toward equilibrium using one of two models:
//!
//! - [`CollisionModel::Bgk`]: single relaxation time,
//!   `f_i ← f_i + (f_i^eq − f_i) / τ`
//! - [`CollisionModel::Mrt`]: multiple relaxation times, relaxing each
//!   moment of the distribution at its own rate (see [`MrtRates`])
//!
//! Both models share the relaxation time
//!
//! ```text
//! τ = 0.5 + ν / (cs² · dt)
//! ```
//!
//! and both leave nodes registered with [`Collision::add_node_to_skip`]
//! untouched.

mod bgk;
mod error;
mod mrt;

pub use error::Error;
pub use mrt::MrtRates;

use lbm2d_core::{D2Q9, Distribution, FluidField, Q, Topology, moments};

/// Relaxation times closer to 0.5 than this are reported as likely unstable.
const TAU_STABILITY_MARGIN: f64 = 0.51;

/// The collision model used to relax the distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionModel {
    /// Single relaxation time (Bhatnagar-Gross-Krook).
    Bgk,

    /// Multiple relaxation times in moment space.
    Mrt,
}

/// Initial density of the lattice.
#[derive(Debug, Clone, PartialEq)]
pub enum InitialDensity {
    /// The same density at every node.
    Uniform(f64),

    /// One density per node, in node order.
    PerNode(Vec<f64>),
}

impl From<f64> for InitialDensity {
    fn from(rho: f64) -> Self {
        Self::Uniform(rho)
    }
}

impl From<Vec<f64>> for InitialDensity {
    fn from(rho: Vec<f64>) -> Self {
        Self::PerNode(rho)
    }
}

/// Model-specific relaxation state.
#[derive(Debug, Clone)]
enum Relaxation {
    Bgk,
    Mrt {
        rates: MrtRates,
        equilibrium_moments: Vec<Distribution>,
    },
}

/// Collision operator: equilibrium, relaxation, and macroscopic properties.
#[derive(Debug, Clone)]
pub struct Collision {
    lattice: D2Q9,
    cs_sqr: f64,
    tau: f64,
    relaxation: Relaxation,
    density: Vec<f64>,
    equilibrium: Vec<Distribution>,
    skip: Vec<bool>,
}

impl Collision {
    /// Creates a collision operator.
    ///
    /// The equilibrium distribution is left at zero until the first call to
    /// [`compute_equilibrium`](Self::compute_equilibrium).
    ///
    /// # Errors
    ///
    /// Returns an error if the topology is not D2Q9, if a per-node density does
    /// not cover every node, or if the kinematic viscosity does not yield a
    /// relaxation time above 0.5.
    pub fn new(
        topology: &Topology,
        model: CollisionModel,
        kinematic_viscosity: f64,
        initial_density: impl Into<InitialDensity>,
    ) -> Result<Self, Error> {
        if !topology.is_d2q9() {
            return Err(Error::UnsupportedLattice {
                dimensions: topology.dimensions(),
                directions: topology.directions(),
            });
        }

        let lattice = topology.d2q9_lattice();
        let cs_sqr = lattice.sound_speed_sqr();
        let tau = 0.5 + kinematic_viscosity / (cs_sqr * topology.time_step());
        if !kinematic_viscosity.is_finite() || kinematic_viscosity <= 0.0 || !tau.is_finite() {
            return Err(Error::DegenerateRelaxation {
                viscosity: kinematic_viscosity,
                tau,
            });
        }
        if tau < TAU_STABILITY_MARGIN {
            log::warn!("relaxation time {tau} is close to 0.5, the run may be unstable");
        }

        let nodes = topology.node_count();
        let density = match initial_density.into() {
            InitialDensity::Uniform(rho) => vec![rho; nodes],
            InitialDensity::PerNode(rho) if rho.len() == nodes => rho,
            InitialDensity::PerNode(rho) => {
                return Err(Error::DensityLength {
                    expected: nodes,
                    actual: rho.len(),
                });
            }
        };

        let relaxation = match model {
            CollisionModel::Bgk => Relaxation::Bgk,
            CollisionModel::Mrt => Relaxation::Mrt {
                rates: MrtRates::new(tau),
                equilibrium_moments: vec![[0.0; Q]; nodes],
            },
        };
        log::debug!("{model:?} collision on {nodes} nodes with tau = {tau}");

        Ok(Self {
            lattice,
            cs_sqr,
            tau,
            relaxation,
            density,
            equilibrium: vec![[0.0; Q]; nodes],
            skip: vec![false; nodes],
        })
    }

    /// Creates a BGK collision operator.
    ///
    /// # Errors
    ///
    /// See [`Collision::new`].
    pub fn bgk(
        topology: &Topology,
        kinematic_viscosity: f64,
        initial_density: impl Into<InitialDensity>,
    ) -> Result<Self, Error> {
        Self::new(topology, CollisionModel::Bgk, kinematic_viscosity, initial_density)
    }

    /// Creates an MRT collision operator.
    ///
    /// # Errors
    ///
    /// See [`Collision::new`].
    pub fn mrt(
        topology: &Topology,
        kinematic_viscosity: f64,
        initial_density: impl Into<InitialDensity>,
    ) -> Result<Self, Error> {
        Self::new(topology, CollisionModel::Mrt, kinematic_viscosity, initial_density)
    }

    /// Returns the collision model.
    #[must_use]
    pub fn model(&self) -> CollisionModel {
        match self.relaxation {
            Relaxation::Bgk => CollisionModel::Bgk,
            Relaxation::Mrt { .. } => CollisionModel::Mrt,
        }
    }

    /// Returns the relaxation time `τ`.
    #[must_use]
    pub fn tau(&self) -> f64 {
        self.tau
    }

    /// Returns the MRT relaxation rates, or `None` for BGK.
    #[must_use]
    pub fn mrt_rates(&self) -> Option<&MrtRates> {
        match &self.relaxation {
            Relaxation::Bgk => None,
            Relaxation::Mrt { rates, .. } => Some(rates),
        }
    }

    /// Returns the scaled velocity set.
    #[must_use]
    pub fn lattice(&self) -> &D2Q9 {
        &self.lattice
    }

    /// Returns the density at each node, as of the last macroscopic update.
    #[must_use]
    pub fn density(&self) -> &[f64] {
        &self.density
    }

    /// Returns the equilibrium distribution at each node.
    #[must_use]
    pub fn equilibrium(&self) -> &[Distribution] {
        &self.equilibrium
    }

    /// Returns `true` if node `n` is excluded from relaxation.
    #[must_use]
    pub fn is_skipped(&self, n: usize) -> bool {
        self.skip[n]
    }

    /// Permanently excludes node `n` from relaxation.
    ///
    /// # Panics
    ///
    /// Panics if `n` is not a node of the lattice.
    pub fn add_node_to_skip(&mut self, n: usize) {
        self.skip[n] = true;
    }

    /// Computes the equilibrium distribution at every node.
    ///
    /// Uses the current density and the velocity in `field`. For MRT, the
    /// equilibrium moments used by the next [`collide`](Self::collide) are
    /// computed as well. Nodes beyond the end of `field` keep their previous
    /// equilibrium.
    pub fn compute_equilibrium(&mut self, field: &FluidField) {
        for ((eq, &rho), &u) in self
            .equilibrium
            .iter_mut()
            .zip(&self.density)
            .zip(&field.velocity)
        {
            *eq = self.lattice.equilibrium(rho, u);
        }

        if let Relaxation::Mrt {
            equilibrium_moments,
            ..
        } = &mut self.relaxation
        {
            for ((m_eq, &rho), &u) in equilibrium_moments
                .iter_mut()
                .zip(&self.density)
                .zip(&field.velocity)
            {
                *m_eq = mrt::equilibrium_moments(rho, u);
            }
        }
    }

    /// Returns the density (zeroth moment) of every node in `df`.
    #[must_use]
    pub fn compute_density(&self, df: &[Distribution]) -> Vec<f64> {
        df.iter().map(moments::zeroth_moment).collect()
    }

    /// Returns the velocity (first moment over density) of every node in `df`.
    ///
    /// The stored density must already be consistent with `df`; it is not
    /// recomputed here.
    #[must_use]
    pub fn compute_velocity(&self, df: &[Distribution]) -> Vec<[f64; 2]> {
        df.iter()
            .zip(&self.density)
            .map(|(node, &rho)| {
                let [jx, jy] = moments::first_moment(node, self.lattice.velocities());
                [jx / rho, jy / rho]
            })
            .collect()
    }

    /// Recomputes density, pressure, and velocity from `df`.
    ///
    /// The density is stored in the operator; pressure and velocity are
    /// written into `field`. BGK reports `p = ρ cs²`, MRT reports the
    /// relative pressure `p = cs² (ρ − 1)`.
    pub fn compute_macroscopic_properties(&mut self, df: &[Distribution], field: &mut FluidField) {
        self.density = self.compute_density(df);
        field.pressure = self
            .density
            .iter()
            .map(|&rho| self.pressure(rho))
            .collect();
        field.velocity = self.compute_velocity(df);
    }

    /// Relaxes every non-skipped node of `df` toward equilibrium.
    ///
    /// # Panics
    ///
    /// Panics if `df` covers more nodes than the lattice.
    pub fn collide(&self, df: &mut [Distribution]) {
        match &self.relaxation {
            Relaxation::Bgk => {
                for (n, (node, eq)) in df.iter_mut().zip(&self.equilibrium).enumerate() {
                    if !self.skip[n] {
                        bgk::relax(node, eq, self.tau);
                    }
                }
            }
            Relaxation::Mrt {
                rates,
                equilibrium_moments,
            } => {
                for (n, (node, m_eq)) in df.iter_mut().zip(equilibrium_moments).enumerate() {
                    if !self.skip[n] {
                        mrt::relax(node, m_eq, rates);
                    }
                }
            }
        }
    }

    fn pressure(&self, rho: f64) -> f64 {
        match self.relaxation {
            Relaxation::Bgk => rho * self.cs_sqr,
            Relaxation::Mrt { .. } => self.cs_sqr * (rho - 1.0),
        }
    }
}
