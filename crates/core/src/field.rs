use crate::Topology;

/// Macroscopic state of the fluid: pressure and velocity at every node.
///
/// Both sequences are indexed identically to the distribution grid, so they
/// can be written out directly in node order. The pressure is empty until the
/// first macroscopic update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FluidField {
    /// Pressure per node.
    pub pressure: Vec<f64>,

    /// Velocity `[u_x, u_y]` per node.
    pub velocity: Vec<[f64; 2]>,
}

impl FluidField {
    /// Creates a field with the same velocity at every node of the topology.
    #[must_use]
    pub fn uniform(topology: &Topology, velocity: [f64; 2]) -> Self {
        Self {
            pressure: Vec::new(),
            velocity: vec![velocity; topology.node_count()],
        }
    }

    /// Creates a field from a per-node velocity sequence.
    #[must_use]
    pub fn from_velocity(velocity: Vec<[f64; 2]>) -> Self {
        Self {
            pressure: Vec::new(),
            velocity,
        }
    }

    /// Returns the number of nodes the field covers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.velocity.len()
    }

    /// Returns `true` if the field covers no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.velocity.is_empty()
    }

    /// Returns the largest velocity magnitude in the field.
    #[must_use]
    pub fn max_speed(&self) -> f64 {
        self.velocity
            .iter()
            .map(|[ux, uy]| ux.hypot(*uy))
            .fold(0.0, f64::max)
    }
}
