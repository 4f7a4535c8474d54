//! Benchmark profiles for the Rupture interface solve.
//!
//! - [`reference_fault`]: 100x100 slip-weakening fault (10K points)
//! - [`rate_state_fault`]: same geometry with aging-law rate and state
//! - [`stressed_pair`]: incoming fields loading a point to a given shear

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rupture_core::{
    BlockId, BoundaryFieldPair, BoundaryFields, FaultMode, Impedance, InterfaceGeometry,
    InterfaceId, LocalVector, PointKey,
};
use rupture_friction::{
    FrictionInterface, LoadSet, RateAndState, RateStateParams, SlipWeakening, StateEvolution,
};

/// Edge length of the reference fault.
pub const REFERENCE_EDGE: usize = 100;

fn geometry(edge: usize) -> InterfaceGeometry {
    InterfaceGeometry::single_block(BlockId(0), [edge, edge]).unwrap()
}

/// Every point key of a square single-block fault.
pub fn fault_keys(edge: usize) -> Vec<PointKey> {
    geometry(edge).points().map(|(key, _)| key).collect()
}

/// A 3D slip-weakening fault under 120 MPa compression and 70 MPa
/// background shear.
pub fn reference_fault(edge: usize) -> FrictionInterface {
    FrictionInterface::builder()
        .name("fault")
        .id(InterfaceId(0))
        .mode(FaultMode::ThreeD)
        .geometry(geometry(edge))
        .law(Box::new(
            SlipWeakening::builder()
                .mus(0.677)
                .mud(0.525)
                .dc(0.4)
                .build()
                .unwrap(),
        ))
        .loads(LoadSet::new(LocalVector::new(-120.0, 70.0, 0.0)))
        .build()
        .unwrap()
}

/// The reference geometry with an aging-law rate-and-state fault.
pub fn rate_state_fault(edge: usize) -> FrictionInterface {
    FrictionInterface::builder()
        .name("fault")
        .id(InterfaceId(0))
        .mode(FaultMode::ThreeD)
        .geometry(geometry(edge))
        .law(Box::new(
            RateAndState::uniform(
                RateStateParams {
                    a: 0.008,
                    b: 0.012,
                    v0: 1e-6,
                    f0: 0.6,
                    l: 0.02,
                    psi0: 0.6,
                },
                StateEvolution::Aging,
            )
            .unwrap(),
        ))
        .loads(LoadSet::new(LocalVector::new(-120.0, 70.0, 0.0)))
        .build()
        .unwrap()
}

/// Incoming fields adding `shear` along strike, with granite-like
/// impedances on both sides.
pub fn stressed_pair(shear: f64) -> BoundaryFieldPair {
    let s = LocalVector::new(0.0, shear, 0.0);
    let z = Impedance::new(16.0, 9.2);
    BoundaryFieldPair {
        minus: BoundaryFields::new(LocalVector::ZERO, s),
        plus: BoundaryFields::new(LocalVector::ZERO, s),
        z_minus: z,
        z_plus: z,
    }
}
