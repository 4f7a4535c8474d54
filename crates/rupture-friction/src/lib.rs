//! Interface conditions for Rupture simulations.
//!
//! Provides the three interface kinds a fault model is built from:
//! frictional faults, perfectly bonded contacts and traction-free
//! cracks, along with the friction laws and the root solve that couples
//! a law to the radiation-damping relation of the adjoining blocks.
//!
//! # Stage order (each Runge–Kutta stage)
//!
//! 1. [`FrictionInterface`] reads both faces, adds the [`LoadSet`] and
//!    solves [`solve_fs`] at every point.
//! 2. The solved [`InterfaceFields`](rupture_core::InterfaceFields) go
//!    back to the block layer through the stage context.
//! 3. `update` commits slip and state.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod characteristic;
pub mod free;
pub mod friction_interface;
pub mod frictionless;
pub mod input;
pub mod law;
pub mod load;
pub mod locked;
pub mod point;
pub mod rate_state;
pub mod slip_weakening;
pub mod solve;

pub use characteristic::{face_velocities, stress_transfer, StressTransfer};
pub use free::FreeInterface;
pub use friction_interface::{
    FrictionInterface, FrictionInterfaceBuilder, DEFAULT_FRONT_THRESHOLD,
};
pub use frictionless::Frictionless;
pub use input::{interface_from_input, interface_marker, LAW_KEYWORDS};
pub use law::{FrictionLaw, ParamField, StrengthInput};
pub use load::{LoadPerturbation, LoadSet};
pub use locked::LockedInterface;
pub use point::PointState;
pub use rate_state::{RateAndState, RateStateParams, StateEvolution};
pub use slip_weakening::{SlipWeakening, SlipWeakeningBuilder, SlipWeakeningParams};
pub use solve::{solve_fs, BoundaryChar, SlipPhase, MAX_ITERATIONS, SOLVE_TOLERANCE};
