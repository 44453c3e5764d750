use lbm2d_core::{
    Distribution, Topology,
    lattice::dir::{E, N, NE, NW, S, SE, SW, W},
};

use super::{
    Context, Error, Pass, locate,
    placement::{Corner, Placement, Side},
};

/// What a Zou/He node prescribes.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Condition {
    Velocity([f64; 2]),
    Density(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ZouHeNode {
    x: usize,
    y: usize,
    n: usize,
    condition: Condition,
}

/// Zou/He velocity and density boundary nodes.
///
/// After streaming, each node reconstructs its density from the known
/// distribution components and the prescribed normal velocity (or its
/// normal velocity from a prescribed density), then sets the unknown
/// components so the node carries the prescribed macroscopic state.
///
/// Corner nodes take their density as the mean of the two adjacent edge
/// neighbors and back-solve the rest component so the node sums to it.
#[derive(Debug, Clone)]
pub struct ZouHe {
    nx: usize,
    ny: usize,
    speed: f64,
    beta1: f64,
    beta2: f64,
    beta3: f64,
    normal_flow: bool,
    nodes: Vec<ZouHeNode>,
}

impl ZouHe {
    /// Creates an empty set of Zou/He nodes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedLattice`] if the topology is not D2Q9.
    pub fn new(topology: &Topology) -> Result<Self, Error> {
        super::check_lattice(topology)?;
        let c = topology.lattice_speed();
        let cs_sqr = c * c / 3.0;
        let beta1 = c / (9.0 * cs_sqr);
        let beta2 = 0.5 / c;
        Ok(Self {
            nx: topology.nx(),
            ny: topology.ny(),
            speed: c,
            beta1,
            beta2,
            beta3: beta2 - beta1,
            normal_flow: false,
            nodes: Vec::new(),
        })
    }

    /// Adds a node at `(x, y)` with prescribed velocity `u`.
    ///
    /// The position is only classified at update time, so a node inside the
    /// domain is accepted here and rejected by the first update.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeOutOfBounds`] if the node is not on the grid.
    pub fn add_node(&mut self, x: usize, y: usize, u: [f64; 2]) -> Result<(), Error> {
        let n = locate(x, y, self.nx, self.ny)?;
        self.nodes.push(ZouHeNode {
            x,
            y,
            n,
            condition: Condition::Velocity(u),
        });
        Ok(())
    }

    /// Adds a node at `(x, y)` with prescribed density `rho`.
    ///
    /// The normal velocity is solved from the known components and the
    /// tangential velocity is zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeOutOfBounds`] if the node is not on the grid, or
    /// [`Error::UnsupportedDensityCorner`] if it is a corner of the domain.
    pub fn add_density_node(&mut self, x: usize, y: usize, rho: f64) -> Result<(), Error> {
        let n = locate(x, y, self.nx, self.ny)?;
        if let Some(Placement::Corner(_)) = Placement::classify(x, y, self.nx, self.ny) {
            return Err(Error::UnsupportedDensityCorner { x, y });
        }
        self.nodes.push(ZouHeNode {
            x,
            y,
            n,
            condition: Condition::Density(rho),
        });
        Ok(())
    }

    /// Switches edge velocity nodes to outlet behavior.
    ///
    /// From now on each edge node uses the velocity of its interior neighbor
    /// along the normal instead of its prescribed velocity. Corner and density
    /// nodes are unaffected. Calling this more than once has no further effect.
    pub fn toggle_normal_flow(&mut self) {
        self.normal_flow = true;
    }

    /// Returns the grid size `(nx, ny)` the nodes were built for.
    #[must_use]
    pub fn grid(&self) -> (usize, usize) {
        (self.nx, self.ny)
    }

    #[must_use]
    pub fn is_normal_flow(&self) -> bool {
        self.normal_flow
    }

    /// Returns the linear indices of the nodes, in the order added.
    pub fn nodes(&self) -> impl Iterator<Item = usize> + '_ {
        self.nodes.iter().map(|node| node.n)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(super) fn update(
        &self,
        df: &mut [Distribution],
        pass: Pass,
        ctx: &Context<'_>,
    ) -> Result<(), Error> {
        if pass == Pass::Stream {
            return Ok(());
        }

        for node in &self.nodes {
            match Placement::classify(node.x, node.y, self.nx, self.ny) {
                Some(Placement::Side(side)) => self.update_side(df, node, side, ctx),
                Some(Placement::Corner(corner)) => {
                    let Condition::Velocity(u) = node.condition else {
                        return Err(Error::UnsupportedDensityCorner {
                            x: node.x,
                            y: node.y,
                        });
                    };
                    self.update_corner(df, node.n, corner, u, ctx.density);
                }
                None => {
                    return Err(Error::InvalidBoundaryGeometry {
                        x: node.x,
                        y: node.y,
                    });
                }
            }
        }
        Ok(())
    }

    fn update_side(&self, df: &mut [Distribution], node: &ZouHeNode, side: Side, ctx: &Context<'_>) {
        let c = self.speed;
        let n = node.n;
        let f = &mut df[n];

        // Density-weighted sum of the known components and the outward sign
        // of the normal velocity in `ρ = known / (1 + sign · u_n / c)`.
        let (known, sign, normal_axis) = match side {
            Side::Right => (f[0] + f[N] + f[S] + 2.0 * (f[E] + f[NE] + f[SE]), 1.0, 0),
            Side::Top => (f[0] + f[E] + f[W] + 2.0 * (f[N] + f[NE] + f[NW]), 1.0, 1),
            Side::Left => (f[0] + f[N] + f[S] + 2.0 * (f[W] + f[NW] + f[SW]), -1.0, 0),
            Side::Bottom => (f[0] + f[E] + f[W] + 2.0 * (f[S] + f[SW] + f[SE]), -1.0, 1),
        };

        let (rho, u) = match node.condition {
            Condition::Velocity(u) => {
                let u = if self.normal_flow {
                    ctx.velocity[self.interior_neighbor(n, side)]
                } else {
                    u
                };
                (known / (1.0 + sign * u[normal_axis] / c), u)
            }
            Condition::Density(rho) => {
                let mut u = [0.0; 2];
                u[normal_axis] = sign * c * (known / rho - 1.0);
                (rho, u)
            }
        };

        let (b1, b2, b3) = (self.beta1, self.beta2, self.beta3);
        let [rux, ruy] = [rho * u[0], rho * u[1]];
        match side {
            Side::Right => {
                let diff = 0.5 * (f[S] - f[N]);
                f[W] = f[E] - 2.0 * b1 * rux;
                f[NW] = f[SE] + diff - b3 * rux + b2 * ruy;
                f[SW] = f[NE] - diff - b3 * rux - b2 * ruy;
            }
            Side::Top => {
                let diff = 0.5 * (f[E] - f[W]);
                f[S] = f[N] - 2.0 * b1 * ruy;
                f[SW] = f[NE] + diff - b2 * rux - b3 * ruy;
                f[SE] = f[NW] - diff + b2 * rux - b3 * ruy;
            }
            Side::Left => {
                let diff = 0.5 * (f[S] - f[N]);
                f[E] = f[W] + 2.0 * b1 * rux;
                f[NE] = f[SW] + diff + b3 * rux + b2 * ruy;
                f[SE] = f[NW] - diff + b3 * rux - b2 * ruy;
            }
            Side::Bottom => {
                let diff = 0.5 * (f[W] - f[E]);
                f[N] = f[S] + 2.0 * b1 * ruy;
                f[NE] = f[SW] + diff + b2 * rux + b3 * ruy;
                f[NW] = f[SE] - diff - b2 * rux + b3 * ruy;
            }
        }
    }

    fn update_corner(
        &self,
        df: &mut [Distribution],
        n: usize,
        corner: Corner,
        u: [f64; 2],
        density: &[f64],
    ) {
        let nx = self.nx;
        let (vertical, horizontal) = match corner {
            Corner::BottomLeft => (n + nx, n + 1),
            Corner::BottomRight => (n + nx, n - 1),
            Corner::TopLeft => (n - nx, n + 1),
            Corner::TopRight => (n - nx, n - 1),
        };
        let rho = 0.5 * (density[vertical] + density[horizontal]);

        let (b1, b3) = (self.beta1, self.beta3);
        let [rux, ruy] = [rho * u[0], rho * u[1]];
        let f = &mut df[n];
        match corner {
            Corner::BottomLeft => {
                f[E] = f[W] + 2.0 * b1 * rux;
                f[N] = f[S] + 2.0 * b1 * ruy;
                f[NE] = f[SW] + 0.5 * b1 * rux + 0.5 * b1 * ruy;
                f[NW] = -0.5 * b3 * rux + 0.5 * b3 * ruy;
                f[SE] = 0.5 * b3 * rux - 0.5 * b3 * ruy;
            }
            Corner::BottomRight => {
                f[W] = f[E] - 2.0 * b1 * rux;
                f[N] = f[S] + 2.0 * b1 * ruy;
                f[NW] = f[SE] - 0.5 * b1 * rux + 0.5 * b1 * ruy;
                f[NE] = 0.5 * b3 * rux + 0.5 * b3 * ruy;
                f[SW] = -0.5 * b3 * rux - 0.5 * b3 * ruy;
            }
            Corner::TopLeft => {
                f[E] = f[W] + 2.0 * b1 * rux;
                f[S] = f[N] - 2.0 * b1 * ruy;
                f[SE] = f[NW] + 0.5 * b1 * rux - 0.5 * b1 * ruy;
                f[NE] = 0.5 * b3 * rux + 0.5 * b3 * ruy;
                f[SW] = -0.5 * b3 * rux - 0.5 * b3 * ruy;
            }
            Corner::TopRight => {
                f[W] = f[E] - 2.0 * b1 * rux;
                f[S] = f[N] - 2.0 * b1 * ruy;
                f[SW] = f[NE] - 0.5 * b1 * rux - 0.5 * b1 * ruy;
                f[NW] = -0.5 * b3 * rux + 0.5 * b3 * ruy;
                f[SE] = 0.5 * b3 * rux - 0.5 * b3 * ruy;
            }
        }
        f[0] = rho - f[1..].iter().sum::<f64>();
    }

    fn interior_neighbor(&self, n: usize, side: Side) -> usize {
        match side {
            Side::Right => n - 1,
            Side::Top => n - self.nx,
            Side::Left => n + 1,
            Side::Bottom => n + self.nx,
        }
    }
}
