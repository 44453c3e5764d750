//! Boundary nodes.
//!
//! A [`Boundary`] is a set of nodes sharing one boundary condition. Each kind
//! declares whether it must run before streaming and whether it modifies the
//! streamed distribution, and the driver calls [`Boundary::update`] in the
//! matching [`Pass`]:
//!
//! | Kind                    | Pre-stream | During stream | Runs after streaming |
//! |-------------------------|------------|---------------|----------------------|
//! | Full-way bounceback     | reverse, cache | fill from cache | no |
//! | Half-way bounceback     | cache      | fill from cache | no                 |
//! | Zou/He                  | no         | no            | reconstruct unknowns |

mod bounceback;
mod error;
mod placement;
mod zou_he;

pub use bounceback::{Bounceback, BouncebackScheme};
pub use error::Error;
pub use zou_he::ZouHe;

use lbm2d_core::{Distribution, Topology};

/// Which of a boundary's two updates to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// The node update: before streaming for pre-stream boundaries, after
    /// streaming for all others.
    Node,

    /// The update of values streamed in from outside the domain.
    Stream,
}

/// Macroscopic state from the end of the previous step.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub density: &'a [f64],
    pub velocity: &'a [[f64; 2]],
}

/// A set of boundary nodes sharing one boundary condition.
#[derive(Debug, Clone)]
pub enum Boundary {
    Bounceback(Bounceback),
    ZouHe(ZouHe),
}

impl Boundary {
    /// Returns `true` if the node update must run before streaming.
    #[must_use]
    pub fn is_prestream(&self) -> bool {
        matches!(self, Self::Bounceback(_))
    }

    /// Returns `true` if the boundary modifies values streamed in from
    /// outside the domain.
    #[must_use]
    pub fn is_during_stream(&self) -> bool {
        matches!(self, Self::Bounceback(_))
    }

    /// Updates the boundary nodes of `df`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBoundaryGeometry`] if a Zou/He node is neither
    /// on a side nor a corner of the domain.
    pub fn update(
        &mut self,
        df: &mut [Distribution],
        pass: Pass,
        ctx: &Context<'_>,
    ) -> Result<(), Error> {
        match self {
            Self::Bounceback(wall) => {
                wall.update(df, pass);
                Ok(())
            }
            Self::ZouHe(zou_he) => zou_he.update(df, pass, ctx),
        }
    }

    /// Returns the grid size `(nx, ny)` the boundary was built for.
    #[must_use]
    pub fn grid(&self) -> (usize, usize) {
        match self {
            Self::Bounceback(wall) => wall.grid(),
            Self::ZouHe(zou_he) => zou_he.grid(),
        }
    }

    /// Returns the nodes that must be excluded from collision.
    #[must_use]
    pub fn solid_nodes(&self) -> Vec<usize> {
        match self {
            Self::Bounceback(wall) if wall.scheme() == BouncebackScheme::FullWay => {
                wall.nodes().collect()
            }
            _ => Vec::new(),
        }
    }

    /// Returns the linear indices of all nodes, in the order added.
    #[must_use]
    pub fn nodes(&self) -> Vec<usize> {
        match self {
            Self::Bounceback(wall) => wall.nodes().collect(),
            Self::ZouHe(zou_he) => zou_he.nodes().collect(),
        }
    }
}

impl From<Bounceback> for Boundary {
    fn from(wall: Bounceback) -> Self {
        Self::Bounceback(wall)
    }
}

impl From<ZouHe> for Boundary {
    fn from(zou_he: ZouHe) -> Self {
        Self::ZouHe(zou_he)
    }
}

fn check_lattice(topology: &Topology) -> Result<(), Error> {
    if topology.is_d2q9() {
        Ok(())
    } else {
        Err(Error::UnsupportedLattice {
            dimensions: topology.dimensions(),
            directions: topology.directions(),
        })
    }
}

/// Returns the linear index of `(x, y)`, or an error if it is off the grid.
fn locate(x: usize, y: usize, nx: usize, ny: usize) -> Result<usize, Error> {
    if x < nx && y < ny {
        Ok(y * nx + x)
    } else {
        Err(Error::NodeOutOfBounds { x, y, nx, ny })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topology() -> Topology {
        Topology::d2q9(4, 4, 1.0, 1.0).unwrap()
    }

    #[test]
    fn phase_flags_by_kind() {
        let full = Boundary::from(Bounceback::full_way(&topology()).unwrap());
        let half = Boundary::from(Bounceback::half_way(&topology()).unwrap());
        let zou_he = Boundary::from(ZouHe::new(&topology()).unwrap());

        assert!(full.is_prestream() && full.is_during_stream());
        assert!(half.is_prestream() && half.is_during_stream());
        assert!(!zou_he.is_prestream() && !zou_he.is_during_stream());
    }

    #[test]
    fn only_full_way_nodes_are_solid() {
        let mut full = Bounceback::full_way(&topology()).unwrap();
        let mut half = Bounceback::half_way(&topology()).unwrap();
        for x in 0..4 {
            full.add_node(x, 0).unwrap();
            half.add_node(x, 3).unwrap();
        }

        assert_eq!(Boundary::from(full).solid_nodes(), vec![0, 1, 2, 3]);

        let half = Boundary::from(half);
        assert!(half.solid_nodes().is_empty());
        assert_eq!(half.nodes(), vec![12, 13, 14, 15]);
    }

    #[test]
    fn grid_comes_from_the_topology() {
        let topology = Topology::d2q9(5, 3, 1.0, 1.0).unwrap();
        let wall = Boundary::from(Bounceback::half_way(&topology).unwrap());
        let zou_he = Boundary::from(ZouHe::new(&topology).unwrap());

        assert_eq!(wall.grid(), (5, 3));
        assert_eq!(zou_he.grid(), (5, 3));
    }

    #[test]
    fn rejects_non_d2q9_topology() {
        let topology = Topology::new_3d(3, 3, 3, 3, 27, 1.0, 1.0).unwrap();
        assert!(matches!(
            Bounceback::full_way(&topology),
            Err(Error::UnsupportedLattice { .. })
        ));
        assert!(matches!(
            ZouHe::new(&topology),
            Err(Error::UnsupportedLattice { .. })
        ));
    }
}
