//! Property tests of the interface solve over random incoming fields.

use proptest::prelude::*;

use rupture_core::{
    BlockId, BoundaryFieldPair, BoundaryFields, FaultMode, Impedance, InterfaceGeometry,
    InterfaceId, LocalVector, PointKey,
};
use rupture_friction::{
    solve_fs, FrictionInterface, FrictionLaw, RateAndState, RateStateParams, SlipPhase,
    SlipWeakening, StateEvolution, StrengthInput,
};
use rupture_interface::{Interface, InterfaceContext};
use rupture_test_utils::{MockBoundaryReader, MockBoundaryWriter};

const IFACE: InterfaceId = InterfaceId(0);

fn slip_weakening() -> SlipWeakening {
    SlipWeakening::builder()
        .mus(0.6)
        .mud(0.3)
        .dc(0.5)
        .build()
        .unwrap()
}

fn local() -> impl Strategy<Value = LocalVector> {
    (-20.0f64..20.0, -20.0f64..20.0, -20.0f64..20.0)
        .prop_map(|(n, t2, t3)| LocalVector::new(n, t2, t3))
}

fn pair() -> impl Strategy<Value = BoundaryFieldPair> {
    (
        local(),
        local(),
        local(),
        local(),
        1.0f64..40.0,
        1.0f64..40.0,
    )
        .prop_map(|(vm, sm, vp, sp, zm, zp)| BoundaryFieldPair {
            minus: BoundaryFields::new(vm * 0.1, sm),
            plus: BoundaryFields::new(vp * 0.1, sp),
            z_minus: Impedance::new(zm * 1.7, zm),
            z_plus: Impedance::new(zp * 1.7, zp),
        })
}

proptest! {
    #[test]
    fn solved_state_respects_the_strength(
        phi in 0.0f64..50.0,
        eta in 0.1f64..20.0,
        compression in -5.0f64..20.0,
        slip in 0.0f64..2.0,
    ) {
        let law = slip_weakening();
        let input = StrengthInput { compression, slip, state: 0.0, time: 0.0, slot: 0 };
        let bc = solve_fs(phi, eta, &law, &input).unwrap();
        let strength = if compression > 0.0 { law.strength(&input, 0.0) } else { 0.0 };
        prop_assert!(bc.v >= 0.0);
        if bc.v == 0.0 {
            prop_assert!(bc.tau <= strength + 1e-12);
        } else {
            prop_assert!((bc.tau - strength).abs() <= 1e-9 * strength.max(1.0));
        }
        if strength > 0.0 && phi < strength {
            prop_assert_eq!(bc.v, 0.0);
            prop_assert_eq!(bc.phase, SlipPhase::Locked);
        }
        prop_assert!((bc.tau - (phi - eta * bc.v)).abs() <= 1e-9 * phi.max(1.0));
    }

    #[test]
    fn rate_state_solve_lands_on_the_strength_curve(
        phi in 1e-3f64..100.0,
        eta in 0.5f64..20.0,
        compression in 1.0f64..50.0,
        psi in 0.4f64..0.9,
    ) {
        let law = RateAndState::uniform(
            RateStateParams { a: 0.01, b: 0.014, v0: 1e-6, f0: 0.6, l: 0.02, psi0: 0.6 },
            StateEvolution::Aging,
        ).unwrap();
        let input = StrengthInput { compression, slip: 0.0, state: psi, time: 0.0, slot: 0 };
        let bc = solve_fs(phi, eta, &law, &input).unwrap();
        prop_assert!(bc.v > 0.0);
        prop_assert!(bc.v <= phi / eta);
        let strength = law.strength(&input, bc.v);
        prop_assert!((bc.tau - strength).abs() <= 1e-8 * phi.max(1.0));
    }

    #[test]
    fn slip_never_decreases_and_output_is_idempotent(
        pairs in proptest::collection::vec(pair(), 1..12),
    ) {
        let mut iface = FrictionInterface::builder()
            .name("fault")
            .id(IFACE)
            .mode(FaultMode::ThreeD)
            .geometry(InterfaceGeometry::single_block(BlockId(0), [1, 1]).unwrap())
            .law(Box::new(slip_weakening()))
            .build()
            .unwrap();
        let key = PointKey::new(BlockId(0), 0, 0);
        let mut last_u = 0.0;
        for (step, pair) in pairs.into_iter().enumerate() {
            let mut reader = MockBoundaryReader::new();
            reader.set_pair(IFACE, key, pair);
            let mut writer = MockBoundaryWriter::new();
            let time = step as f64 * 1e-2;
            let mut ctx = InterfaceContext::new(&reader, &mut writer, time, step as u64, 0);
            iface.scale_df(0.0);
            iface.calc_df(1e-2, &mut ctx).unwrap();
            iface.update(1.0).unwrap();

            let p = iface.point(&key).unwrap();
            prop_assert!(p.v >= 0.0);
            prop_assert!(p.u >= last_u);
            last_u = p.u;

            iface.write_fields();
            let first: Vec<Vec<f64>> = ["U", "V", "S", "Sn", "trup"]
                .iter()
                .map(|f| iface.fields().field(f).unwrap().data.to_vec())
                .collect();
            iface.write_fields();
            for (f, data) in ["U", "V", "S", "Sn", "trup"].iter().zip(&first) {
                prop_assert_eq!(iface.fields().field(f).unwrap().data, &data[..]);
            }
        }
    }
}
