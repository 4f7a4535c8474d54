//! End-to-end single-point scenarios through the full interface solve.
//!
//! One grid point under 10 MPa compression with static friction 0.6
//! (strength 6 MPa), S impedances 9 and 18 (radiation damping 6).

use rupture_core::{
    BlockId, BoundaryFieldPair, BoundaryFields, FaultMode, Impedance, InterfaceGeometry,
    InterfaceId, LocalVector, PointKey,
};
use rupture_friction::{FrictionInterface, SlipPhase, SlipWeakening};
use rupture_interface::{Interface, InterfaceContext};
use rupture_test_utils::{MockBoundaryReader, MockBoundaryWriter};

const IFACE: InterfaceId = InterfaceId(0);

fn point() -> PointKey {
    PointKey::new(BlockId(0), 0, 0)
}

fn fault(mode: FaultMode) -> FrictionInterface {
    FrictionInterface::builder()
        .name("fault")
        .id(IFACE)
        .mode(mode)
        .geometry(InterfaceGeometry::single_block(BlockId(0), [1, 1]).unwrap())
        .law(Box::new(
            SlipWeakening::builder()
                .mus(0.6)
                .mud(0.4)
                .dc(0.4)
                .build()
                .unwrap(),
        ))
        .build()
        .unwrap()
}

fn incoming(shear: f64) -> BoundaryFieldPair {
    let s = LocalVector::new(-10.0, shear, 0.0);
    BoundaryFieldPair {
        minus: BoundaryFields::new(LocalVector::ZERO, s),
        plus: BoundaryFields::new(LocalVector::ZERO, s),
        z_minus: Impedance::new(18.0, 9.0),
        z_plus: Impedance::new(36.0, 18.0),
    }
}

fn run_stage(iface: &mut FrictionInterface, shear: f64) -> MockBoundaryWriter {
    let mut reader = MockBoundaryReader::new();
    reader.set_pair(IFACE, point(), incoming(shear));
    let mut writer = MockBoundaryWriter::new();
    let mut ctx = InterfaceContext::new(&reader, &mut writer, 0.0, 0, 0);
    iface.scale_df(0.0);
    iface.calc_df(1e-3, &mut ctx).unwrap();
    iface.update(1.0).unwrap();
    writer
}

#[test]
fn scenario_a_below_strength_stays_locked() {
    let mut iface = fault(FaultMode::InPlane);
    let writer = run_stage(&mut iface, 5.0);

    let p = iface.point(&point()).unwrap();
    assert_eq!(p.phase, SlipPhase::Locked);
    assert_eq!(p.v, 0.0);
    assert!((p.s - 5.0).abs() < 1e-12);
    assert_eq!(p.sn, -10.0);
    assert_eq!(p.u, 0.0);

    let solved = writer.get(IFACE, point()).unwrap();
    assert_eq!(solved.velocity_jump().t2, 0.0);
    assert!((solved.minus.s.t2 - 5.0).abs() < 1e-12);
}

#[test]
fn scenario_b_above_strength_slips_at_damped_rate() {
    let mut iface = fault(FaultMode::InPlane);
    let writer = run_stage(&mut iface, 8.0);

    let eta = 9.0 * 18.0 / (9.0 + 18.0);
    let p = iface.point(&point()).unwrap();
    assert_eq!(p.phase, SlipPhase::Slipping);
    assert!((p.s - 6.0).abs() < 1e-12);
    assert!((p.v - (8.0 - 6.0) / eta).abs() < 1e-12);
    assert!((p.u - 1e-3 * (8.0 - 6.0) / eta).abs() < 1e-15);

    let solved = writer.get(IFACE, point()).unwrap();
    assert!((solved.velocity_jump().t2 - p.v).abs() < 1e-12);
    assert!((solved.plus.s.t2 - 6.0).abs() < 1e-12);
}

#[test]
fn scenario_b_in_three_dimensions_follows_the_shear_direction() {
    let mut iface = fault(FaultMode::ThreeD);
    let mut reader = MockBoundaryReader::new();
    let mut pair = incoming(0.0);
    // |shear| = 8 split 3-4-5 between strike and dip.
    pair.minus.s = LocalVector::new(-10.0, 4.8, 6.4);
    pair.plus.s = pair.minus.s;
    reader.set_pair(IFACE, point(), pair);
    let mut writer = MockBoundaryWriter::new();
    let mut ctx = InterfaceContext::new(&reader, &mut writer, 0.0, 0, 0);
    iface.scale_df(0.0);
    iface.calc_df(1e-3, &mut ctx).unwrap();
    iface.update(1.0).unwrap();

    let p = iface.point(&point()).unwrap();
    assert!((p.s - 6.0).abs() < 1e-12);
    assert!((p.s2 - 3.6).abs() < 1e-12);
    assert!((p.s3 - 4.8).abs() < 1e-12);
    assert!((p.v2 / p.v - 0.6).abs() < 1e-12);
    assert!((p.v3 / p.v - 0.8).abs() < 1e-12);
}

#[test]
fn slip_accumulates_over_repeated_steps() {
    let mut iface = fault(FaultMode::InPlane);
    let mut last = 0.0;
    for _ in 0..5 {
        run_stage(&mut iface, 8.0);
        let u = iface.point(&point()).unwrap().u;
        assert!(u > last);
        last = u;
    }
}
