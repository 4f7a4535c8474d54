//! The friction solve: radiation-damping line against the strength curve.
//!
//! Given the stress-transfer functional `phi` (the traction the point
//! would carry if locked), the radiation damping `eta` and a friction
//! law, find the shear traction `tau` and slip rate `v >= 0` with
//!
//! ```text
//! tau = phi - eta * v
//! tau = strength(v)        if v > 0
//! tau <= strength(0)       if v = 0
//! ```
//!
//! Zero or tensile effective normal stress collapses the strength, so the
//! point slips stress-free.

use rupture_core::SolveError;

use crate::law::{FrictionLaw, StrengthInput};

/// Relative tolerance of the iterative solve.
pub const SOLVE_TOLERANCE: f64 = 1e-12;

/// Iteration cap of the iterative solve.
pub const MAX_ITERATIONS: u32 = 100;

/// Regime of a point after the friction solve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlipPhase {
    /// Shear below strength, no slip.
    Locked,
    /// Traction on the strength curve, positive slip rate.
    Slipping,
}

/// Solved shear traction and slip rate at one point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundaryChar {
    /// Shear traction magnitude.
    pub tau: f64,
    /// Slip rate magnitude.
    pub v: f64,
    /// Resulting regime.
    pub phase: SlipPhase,
}

impl BoundaryChar {
    fn locked(phi: f64) -> Self {
        Self {
            tau: phi,
            v: 0.0,
            phase: SlipPhase::Locked,
        }
    }

    fn slipping(phi: f64, eta: f64, v: f64) -> Self {
        Self {
            tau: phi - eta * v,
            v,
            phase: SlipPhase::Slipping,
        }
    }
}

/// Solve for shear traction and slip rate.
///
/// `phi >= 0` is the shear stress-transfer magnitude, `eta > 0` the
/// radiation damping and `input.compression` the effective compressive
/// normal stress.
///
/// # Errors
///
/// Returns [`SolveError::NoConvergence`] if the iterative solve for a
/// rate-dependent law does not converge within [`MAX_ITERATIONS`].
pub fn solve_fs(
    phi: f64,
    eta: f64,
    law: &dyn FrictionLaw,
    input: &StrengthInput,
) -> Result<BoundaryChar, SolveError> {
    debug_assert!(eta > 0.0, "radiation damping must be positive");
    if input.compression <= 0.0 {
        return Ok(if phi > 0.0 {
            BoundaryChar::slipping(phi, eta, phi / eta)
        } else {
            BoundaryChar::locked(phi)
        });
    }

    if !law.is_rate_dependent() {
        let strength = law.strength(input, 0.0);
        if phi <= strength {
            return Ok(BoundaryChar::locked(phi));
        }
        return Ok(BoundaryChar::slipping(phi, eta, (phi - strength) / eta));
    }

    let residual = |v: f64| phi - eta * v - law.strength(input, v);
    if residual(0.0) <= 0.0 {
        return Ok(BoundaryChar::locked(phi));
    }

    // g(0) > 0 and g(phi / eta) = -strength <= 0 bracket the root.
    let mut lo = 0.0;
    let mut hi = phi / eta;
    if residual(hi) >= 0.0 {
        return Ok(BoundaryChar::slipping(phi, eta, hi));
    }

    let mut v = bisect(lo, hi);
    let mut g = residual(v);
    for _ in 0..MAX_ITERATIONS {
        if g.abs() <= SOLVE_TOLERANCE * phi {
            return Ok(BoundaryChar::slipping(phi, eta, v));
        }
        if g > 0.0 {
            lo = v;
        } else {
            hi = v;
        }
        let slope = -eta - law.d_strength_dv(input, v);
        let newton = v - g / slope;
        let next = if slope < 0.0 && newton > lo && newton < hi {
            newton
        } else {
            bisect(lo, hi)
        };
        let step = (next - v).abs();
        v = next;
        g = residual(v);
        if g.abs() <= SOLVE_TOLERANCE * phi || step <= SOLVE_TOLERANCE * v {
            return Ok(BoundaryChar::slipping(phi, eta, v));
        }
    }
    Err(SolveError::NoConvergence {
        iterations: MAX_ITERATIONS,
        residual: g.abs(),
    })
}

/// Midpoint of a bracket, geometric while the bracket spans orders of
/// magnitude. Slip rates at the root can be many decades below `phi / eta`.
fn bisect(lo: f64, hi: f64) -> f64 {
    let floor = lo.max(f64::MIN_POSITIVE);
    if hi > 4.0 * floor {
        (floor * hi).sqrt()
    } else {
        0.5 * (lo + hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frictionless::Frictionless;
    use crate::rate_state::{RateAndState, RateStateParams, StateEvolution};
    use crate::slip_weakening::SlipWeakening;

    fn input(compression: f64) -> StrengthInput {
        StrengthInput {
            compression,
            slip: 0.0,
            state: 0.6,
            time: 0.0,
            slot: 0,
        }
    }

    fn static_law() -> SlipWeakening {
        SlipWeakening::builder()
            .mus(0.6)
            .mud(0.4)
            .dc(1.0)
            .build()
            .unwrap()
    }

    fn rate_state() -> RateAndState {
        RateAndState::uniform(
            RateStateParams {
                a: 0.01,
                b: 0.014,
                v0: 1e-6,
                f0: 0.6,
                l: 0.02,
                psi0: 0.6,
            },
            StateEvolution::Aging,
        )
        .unwrap()
    }

    #[test]
    fn below_strength_is_locked() {
        let bc = solve_fs(5.0, 6.0, &static_law(), &input(10.0)).unwrap();
        assert_eq!(bc, BoundaryChar::locked(5.0));
    }

    #[test]
    fn exactly_at_strength_is_locked() {
        let bc = solve_fs(6.0, 6.0, &static_law(), &input(10.0)).unwrap();
        assert_eq!(bc.phase, SlipPhase::Locked);
        assert_eq!(bc.v, 0.0);
    }

    #[test]
    fn above_strength_slips_on_the_strength_curve() {
        let bc = solve_fs(8.0, 6.0, &static_law(), &input(10.0)).unwrap();
        assert_eq!(bc.phase, SlipPhase::Slipping);
        assert!((bc.tau - 6.0).abs() < 1e-12);
        assert!((bc.v - 2.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn tension_slips_stress_free() {
        let bc = solve_fs(3.0, 6.0, &static_law(), &input(0.0)).unwrap();
        assert_eq!(bc.tau, 0.0);
        assert!((bc.v - 0.5).abs() < 1e-12);
        let bc = solve_fs(3.0, 6.0, &static_law(), &input(-4.0)).unwrap();
        assert_eq!(bc.tau, 0.0);
    }

    #[test]
    fn frictionless_slips_under_any_shear() {
        let bc = solve_fs(1.2, 4.0, &Frictionless, &input(10.0)).unwrap();
        assert_eq!(bc.tau, 0.0);
        assert!((bc.v - 0.3).abs() < 1e-12);
        let bc = solve_fs(0.0, 4.0, &Frictionless, &input(10.0)).unwrap();
        assert_eq!(bc.phase, SlipPhase::Locked);
    }

    #[test]
    fn rate_state_root_satisfies_both_equations() {
        let law = rate_state();
        let inp = input(10.0);
        for phi in [1e-3, 0.5, 5.0, 7.0, 50.0] {
            let bc = solve_fs(phi, 6.0, &law, &inp).unwrap();
            assert_eq!(bc.phase, SlipPhase::Slipping);
            assert!(bc.v > 0.0);
            let strength = law.strength(&inp, bc.v);
            assert!(
                (bc.tau - strength).abs() <= 1e-9 * phi.max(1.0),
                "phi = {phi}: tau {} vs strength {strength}",
                bc.tau
            );
            assert!((bc.tau - (phi - 6.0 * bc.v)).abs() <= 1e-12 * phi.max(1.0));
        }
    }

    #[test]
    fn bisect_is_geometric_across_decades() {
        assert!((bisect(1e-10, 1e-2) - 1e-6).abs() < 1e-18);
        assert_eq!(bisect(1.0, 2.0), 1.5);
        assert!(bisect(0.0, 1.0) > 0.0);
    }

    #[test]
    fn rate_state_without_shear_is_locked() {
        let bc = solve_fs(0.0, 6.0, &rate_state(), &input(10.0)).unwrap();
        assert_eq!(bc, BoundaryChar::locked(0.0));
    }
}
