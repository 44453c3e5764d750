use lbm2d_core::{Distribution, Q, Topology, lattice::OPPOSITE};

use super::{Error, Pass, locate, placement::Edges};

/// How a bounceback wall reflects the distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BouncebackScheme {
    /// The wall sits on the node itself.
    ///
    /// Wall nodes are excluded from collision and their distribution is
    /// reversed before streaming.
    FullWay,

    /// The wall sits halfway between the node and the outside of the domain.
    ///
    /// Wall nodes still collide. Their post-collision distribution is cached
    /// before streaming and reflected into the directions streamed in from
    /// outside.
    HalfWay,
}

#[derive(Debug, Clone)]
struct WallNode {
    n: usize,
    edges: Edges,
    cached: Distribution,
}

/// A set of no-slip bounceback wall nodes.
#[derive(Debug, Clone)]
pub struct Bounceback {
    scheme: BouncebackScheme,
    nx: usize,
    ny: usize,
    nodes: Vec<WallNode>,
}

impl Bounceback {
    /// Creates an empty bounceback wall.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedLattice`] if the topology is not D2Q9.
    pub fn new(topology: &Topology, scheme: BouncebackScheme) -> Result<Self, Error> {
        super::check_lattice(topology)?;
        Ok(Self {
            scheme,
            nx: topology.nx(),
            ny: topology.ny(),
            nodes: Vec::new(),
        })
    }

    /// Creates an empty full-way bounceback wall.
    ///
    /// # Errors
    ///
    /// See [`Bounceback::new`].
    pub fn full_way(topology: &Topology) -> Result<Self, Error> {
        Self::new(topology, BouncebackScheme::FullWay)
    }

    /// Creates an empty half-way bounceback wall.
    ///
    /// # Errors
    ///
    /// See [`Bounceback::new`].
    pub fn half_way(topology: &Topology) -> Result<Self, Error> {
        Self::new(topology, BouncebackScheme::HalfWay)
    }

    /// Returns the grid size `(nx, ny)` the wall was built for.
    #[must_use]
    pub fn grid(&self) -> (usize, usize) {
        (self.nx, self.ny)
    }

    #[must_use]
    pub fn scheme(&self) -> BouncebackScheme {
        self.scheme
    }

    /// Adds the wall node at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeOutOfBounds`] if the node is not on the grid.
    pub fn add_node(&mut self, x: usize, y: usize) -> Result<(), Error> {
        let n = locate(x, y, self.nx, self.ny)?;
        self.nodes.push(WallNode {
            n,
            edges: Edges::of(x, y, self.nx, self.ny),
            cached: [0.0; Q],
        });
        Ok(())
    }

    /// Returns the linear indices of the wall nodes, in the order added.
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

    pub(super) fn update(&mut self, df: &mut [Distribution], pass: Pass) {
        match pass {
            Pass::Node => {
                for node in &mut self.nodes {
                    let f = &mut df[node.n];
                    if self.scheme == BouncebackScheme::FullWay {
                        reverse(f);
                    }
                    node.cached = *f;
                }
            }
            Pass::Stream => {
                for node in &self.nodes {
                    let f = &mut df[node.n];
                    for (d, value) in f.iter_mut().enumerate().skip(1) {
                        if node.edges.is_unknown(d) {
                            *value = node.cached[OPPOSITE[d]];
                        }
                    }
                }
            }
        }
    }
}

/// Swaps every direction with its opposite.
fn reverse(f: &mut Distribution) {
    let before = *f;
    *f = std::array::from_fn(|d| before[OPPOSITE[d]]);
}
