use lbm2d_core::FluidField;

/// Event emitted by the simulation run loop.
///
/// The first event of a run reports the state before the run's first step.
/// Later events are emitted after each step.
#[derive(Debug, Clone, Copy)]
pub struct Event<'a> {
    /// Number of steps the simulation has taken in total.
    pub step: usize,

    /// Pressure and velocity at every node.
    pub field: &'a FluidField,

    /// Density at every node.
    pub density: &'a [f64],
}
