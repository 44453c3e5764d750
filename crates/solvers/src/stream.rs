//! Streaming operator for the D2Q9 lattice.
//!
//! Streaming moves each distribution value one node along its direction:
//! after streaming, node `x` holds in direction `d` the value that node
//! `x − e_d` held before. Values that would arrive from outside the domain
//! are left unchanged, to be overwritten by a boundary node.
//!
//! Streaming is never done in place. [`Stream::stream_into`] writes into a
//! second buffer so the driver can double-buffer, and [`Stream::stream`]
//! returns a fresh grid.

use lbm2d_core::{Distribution, Topology, lattice::OFFSETS};
use thiserror::Error;

/// Errors that can occur when constructing a streaming operator.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("streaming requires a D2Q9 lattice, got {dimensions} dimensions and {directions} directions")]
    UnsupportedLattice { dimensions: usize, directions: usize },
}

/// Non-periodic D2Q9 streaming operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stream {
    nx: usize,
    ny: usize,
}

impl Stream {
    /// Creates a streaming operator for the topology.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedLattice`] if the topology is not D2Q9.
    pub fn new(topology: &Topology) -> Result<Self, Error> {
        if !topology.is_d2q9() {
            return Err(Error::UnsupportedLattice {
                dimensions: topology.dimensions(),
                directions: topology.directions(),
            });
        }
        Ok(Self {
            nx: topology.nx(),
            ny: topology.ny(),
        })
    }

    /// Returns the grid size `(nx, ny)` the operator streams over.
    #[must_use]
    pub fn grid(&self) -> (usize, usize) {
        (self.nx, self.ny)
    }

    /// Returns a new grid holding the streamed distribution.
    #[must_use]
    pub fn stream(&self, df: &[Distribution]) -> Vec<Distribution> {
        let mut streamed = df.to_vec();
        self.stream_into(df, &mut streamed);
        streamed
    }

    /// Streams `src` into `dst`.
    ///
    /// Every value of `dst` is overwritten: the rest direction and every
    /// direction with no upstream neighbor are copied from the same node of
    /// `src`.
    ///
    /// # Panics
    ///
    /// Panics if either grid does not have exactly `nx * ny` nodes.
    pub fn stream_into(&self, src: &[Distribution], dst: &mut [Distribution]) {
        let (nx, ny) = (self.nx, self.ny);
        assert_eq!(src.len(), nx * ny, "source grid does not match topology");
        assert_eq!(dst.len(), nx * ny, "destination grid does not match topology");

        for y in 0..ny {
            for x in 0..nx {
                let n = y * nx + x;
                dst[n] = src[n];
                for (d, [ox, oy]) in OFFSETS.iter().enumerate().skip(1) {
                    if let Some(from) = upstream(x, y, *ox, *oy, nx, ny) {
                        dst[n][d] = src[from][d];
                    }
                }
            }
        }
    }
}

/// Returns the index of the node a particle moving by `(ox, oy)` came from,
/// or `None` if it came from outside the domain.
fn upstream(x: usize, y: usize, ox: isize, oy: isize, nx: usize, ny: usize) -> Option<usize> {
    let from_x = x.checked_add_signed(-ox).filter(|&fx| fx < nx)?;
    let from_y = y.checked_add_signed(-oy).filter(|&fy| fy < ny)?;
    Some(from_y * nx + from_x)
}

#[cfg(test)]
mod tests {
    use super::*;

    use lbm2d_core::{Q, lattice::dir};

    /// Grid where every value encodes its node and direction: `100 n + d`.
    #[allow(clippy::cast_precision_loss)]
    fn labelled(nodes: usize) -> Vec<Distribution> {
        (0..nodes)
            .map(|n| std::array::from_fn(|d| (100 * n + d) as f64))
            .collect()
    }

    #[allow(clippy::cast_precision_loss)]
    fn label(n: usize, d: usize) -> f64 {
        (100 * n + d) as f64
    }

    #[test]
    fn interior_node_receives_from_all_neighbors() {
        let topology = Topology::d2q9(3, 3, 1.0, 1.0).unwrap();
        let stream = Stream::new(&topology).unwrap();
        let streamed = stream.stream(&labelled(9));

        // Centre node (1, 1) is n = 4.
        let centre = streamed[4];
        assert_eq!(centre[dir::REST], label(4, dir::REST));
        assert_eq!(centre[dir::E], label(3, dir::E));
        assert_eq!(centre[dir::N], label(1, dir::N));
        assert_eq!(centre[dir::W], label(5, dir::W));
        assert_eq!(centre[dir::S], label(7, dir::S));
        assert_eq!(centre[dir::NE], label(0, dir::NE));
        assert_eq!(centre[dir::NW], label(2, dir::NW));
        assert_eq!(centre[dir::SW], label(8, dir::SW));
        assert_eq!(centre[dir::SE], label(6, dir::SE));
    }

    #[test]
    fn edge_values_from_outside_are_unchanged() {
        let topology = Topology::d2q9(3, 3, 1.0, 1.0).unwrap();
        let stream = Stream::new(&topology).unwrap();
        let streamed = stream.stream(&labelled(9));

        // Bottom-left corner keeps everything that would come from below or left.
        let corner = streamed[0];
        for d in [dir::E, dir::N, dir::NE, dir::NW, dir::SE] {
            assert_eq!(corner[d], label(0, d));
        }
        assert_eq!(corner[dir::W], label(1, dir::W));
        assert_eq!(corner[dir::S], label(3, dir::S));
        assert_eq!(corner[dir::SW], label(4, dir::SW));
    }

    #[test]
    fn non_square_grid_uses_y_extent() {
        // A 4 x 2 grid: rows are 4 nodes long and there are only 2 rows.
        let topology = Topology::d2q9(4, 2, 1.0, 1.0).unwrap();
        let stream = Stream::new(&topology).unwrap();
        let streamed = stream.stream(&labelled(8));

        // Node (2, 1) is on the top row: N comes from (2, 0), S is kept.
        let n = topology.index(2, 1);
        assert_eq!(streamed[n][dir::N], label(topology.index(2, 0), dir::N));
        assert_eq!(streamed[n][dir::S], label(n, dir::S));
        assert_eq!(streamed[n][dir::NE], label(topology.index(1, 0), dir::NE));

        // A 2 x 4 grid: every node is streamed, including the upper rows.
        let topology = Topology::d2q9(2, 4, 1.0, 1.0).unwrap();
        let stream = Stream::new(&topology).unwrap();
        let streamed = stream.stream(&labelled(8));

        let n = topology.index(0, 3);
        assert_eq!(streamed[n][dir::N], label(topology.index(0, 2), dir::N));
        assert_eq!(streamed[n][dir::NW], label(topology.index(1, 2), dir::NW));
    }

    #[test]
    fn every_value_moves_to_its_downstream_node() {
        let topology = Topology::d2q9(5, 4, 1.0, 1.0).unwrap();
        let stream = Stream::new(&topology).unwrap();
        let before = labelled(20);
        let after = stream.stream(&before);

        for n in 0..topology.node_count() {
            let (x, y) = topology.coordinates(n);
            for (d, [ox, oy]) in OFFSETS.iter().enumerate().skip(1) {
                // A value leaving the domain is simply dropped.
                if let Some(to) = upstream(x, y, -ox, -oy, 5, 4) {
                    assert_eq!(after[to][d], before[n][d]);
                }
                // A node with nothing arriving keeps its own value.
                if upstream(x, y, *ox, *oy, 5, 4).is_none() {
                    assert_eq!(after[n][d], before[n][d]);
                }
            }
            assert_eq!(after[n][dir::REST], before[n][dir::REST]);
        }
    }

    #[test]
    fn stream_into_overwrites_destination() {
        let topology = Topology::d2q9(2, 2, 1.0, 1.0).unwrap();
        let stream = Stream::new(&topology).unwrap();
        let src = labelled(4);
        let mut dst = vec![[f64::NAN; Q]; 4];

        stream.stream_into(&src, &mut dst);

        assert!(dst.iter().flatten().all(|v| v.is_finite()));
        assert_eq!(dst, stream.stream(&src));
    }

    #[test]
    fn grid_keeps_axis_order() {
        let topology = Topology::d2q9(6, 2, 1.0, 1.0).unwrap();
        assert_eq!(Stream::new(&topology).unwrap().grid(), (6, 2));
    }

    #[test]
    fn rejects_non_d2q9_topology() {
        let topology = Topology::new(4, 4, 2, 5, 1.0, 1.0).unwrap();
        assert_eq!(
            Stream::new(&topology),
            Err(Error::UnsupportedLattice {
                dimensions: 2,
                directions: 5
            })
        );
    }
}
