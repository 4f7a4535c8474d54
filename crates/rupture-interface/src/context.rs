//! Execution context passed to interfaces during a Runge–Kutta stage.
//!
//! [`InterfaceContext`] provides read access to the fields arriving from
//! the block layer, write access to the solved boundary state, and the
//! stage clock.

use rupture_core::{BoundaryReader, BoundaryWriter};

/// Execution context passed to each interface's `calc_df()`.
///
/// Uses dynamic dispatch (`&dyn BoundaryReader`, `&mut dyn BoundaryWriter`)
/// to keep the [`Interface`](crate::Interface) trait object-safe while
/// supporting mock-based testing.
pub struct InterfaceContext<'a> {
    boundary: &'a dyn BoundaryReader,
    solved: &'a mut dyn BoundaryWriter,
    time: f64,
    step: u64,
    stage: usize,
}

impl<'a> InterfaceContext<'a> {
    /// Construct a new stage context.
    ///
    /// Typically called by the driver, not by interfaces directly.
    /// For testing, construct with the mocks from `rupture-test-utils`.
    pub fn new(
        boundary: &'a dyn BoundaryReader,
        solved: &'a mut dyn BoundaryWriter,
        time: f64,
        step: u64,
        stage: usize,
    ) -> Self {
        Self {
            boundary,
            solved,
            time,
            step,
            stage,
        }
    }

    /// Fields arriving at the interface from both blocks.
    pub fn boundary(&self) -> &dyn BoundaryReader {
        self.boundary
    }

    /// Sink for the solved boundary state.
    pub fn solved(&mut self) -> &mut dyn BoundaryWriter {
        self.solved
    }

    /// Simulation time of this stage.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Index of the time step being taken.
    pub fn step(&self) -> u64 {
        self.step
    }

    /// Index of the stage within the step.
    pub fn stage(&self) -> usize {
        self.stage
    }
}
