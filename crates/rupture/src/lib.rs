//! Rupture: fault-interface mechanics for finite-difference dynamic
//! rupture simulations.
//!
//! This is the top-level facade crate that re-exports the public API of
//! every Rupture sub-crate.
//!
//! # Quick start
//!
//! ```rust
//! use rupture::prelude::*;
//!
//! let geometry = InterfaceGeometry::single_block(BlockId(0), [4, 4]).unwrap();
//! let fault = FrictionInterface::builder()
//!     .name("fault")
//!     .mode(FaultMode::ThreeD)
//!     .geometry(geometry)
//!     .law(Box::new(
//!         SlipWeakening::builder().mus(0.677).mud(0.525).dc(0.4).build().unwrap(),
//!     ))
//!     .loads(LoadSet::new(LocalVector::new(-120.0, 70.0, 0.0)))
//!     .build()
//!     .unwrap();
//! assert_eq!(fault.point_count(), 16);
//!
//! let config = SimulationConfig::new("tpv5", 100, 1e-3).with_interface(Box::new(fault));
//! assert!(config.validate().is_ok());
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `rupture-core` | IDs, local-frame fields, geometry, errors, input scanner, traits |
//! | [`arena`] | `rupture-arena` | Per-point state arena |
//! | [`interface`] | `rupture-interface` | `Interface` trait and stage context |
//! | [`friction`] | `rupture-friction` | Friction laws, interface solvers, loads, input sections |
//! | [`output`] | `rupture-output` | Output units and lists |
//! | [`engine`] | `rupture-engine` | Runge–Kutta driver and abort point |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and errors (`rupture-core`).
pub use rupture_core as types;

/// Per-point state storage (`rupture-arena`).
pub use rupture_arena as arena;

/// The interface contract and stage context (`rupture-interface`).
pub use rupture_interface as interface;

/// Friction laws and interface conditions (`rupture-friction`).
pub use rupture_friction as friction;

/// Windowed binary output (`rupture-output`).
pub use rupture_output as output;

/// The time-stepping driver (`rupture-engine`).
pub use rupture_engine as engine;

/// Common imports for typical Rupture usage.
///
/// ```rust
/// use rupture::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use rupture_core::{
        BlockId, BlockLayer, BoundaryFieldPair, BoundaryFields, BoundaryReader, BoundaryWriter,
        FaultMode, FieldSource, FieldView, Impedance, InputFile, InterfaceFields,
        InterfaceGeometry, InterfaceId, LocalVector, PointKey,
    };

    // Errors
    pub use rupture_core::{BlockError, ConfigError, InterfaceError, SolveError};

    // Interfaces
    pub use rupture_interface::{Interface, InterfaceContext, InterfaceKind, PhaseCensus};

    // Friction
    pub use rupture_friction::{
        interface_from_input, FreeInterface, FrictionInterface, FrictionLaw, Frictionless,
        LoadPerturbation, LoadSet, LockedInterface, RateAndState, RateStateParams, SlipPhase,
        SlipWeakening, StateEvolution,
    };

    // Output
    pub use rupture_output::{OutputError, OutputList};

    // Engine
    pub use rupture_engine::{
        run_or_abort, RunError, SerialCommunicator, Simulation, SimulationConfig, StepMetrics,
    };
}
