/// Control actions supported by the simulation run loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the run early and return the steps taken so far.
    StopEarly,
}
