//! Per-point friction state.

use rupture_core::{InterfaceFields, LocalVector};

use crate::solve::SlipPhase;

/// Slip history, tractions and Runge–Kutta accumulators of one point.
#[derive(Clone, Debug, PartialEq)]
pub struct PointState {
    /// Cumulative slip magnitude.
    pub u: f64,
    /// Cumulative slip along strike.
    pub u2: f64,
    /// Cumulative slip along dip.
    pub u3: f64,
    /// Slip rate magnitude.
    pub v: f64,
    /// Slip rate along strike.
    pub v2: f64,
    /// Slip rate along dip.
    pub v3: f64,
    /// Total normal traction (load included).
    pub sn: f64,
    /// Total shear traction along strike.
    pub s2: f64,
    /// Total shear traction along dip.
    pub s3: f64,
    /// Total shear traction magnitude.
    pub s: f64,
    /// Friction law state variable.
    pub psi: f64,
    /// Accumulated slip magnitude increment.
    pub du: f64,
    /// Accumulated strike slip increment.
    pub du2: f64,
    /// Accumulated dip slip increment.
    pub du3: f64,
    /// Accumulated state increment.
    pub dpsi: f64,
    /// Regime after the latest solve.
    pub phase: SlipPhase,
    /// First time the slip rate exceeded the rupture-front threshold.
    pub rupture_time: Option<f64>,
    /// Solved face fields from the latest solve.
    pub solved: InterfaceFields,
}

impl PointState {
    /// A point at rest with state variable `psi`.
    pub fn new(psi: f64) -> Self {
        Self {
            u: 0.0,
            u2: 0.0,
            u3: 0.0,
            v: 0.0,
            v2: 0.0,
            v3: 0.0,
            sn: 0.0,
            s2: 0.0,
            s3: 0.0,
            s: 0.0,
            psi,
            du: 0.0,
            du2: 0.0,
            du3: 0.0,
            dpsi: 0.0,
            phase: SlipPhase::Locked,
            rupture_time: None,
            solved: InterfaceFields::default(),
        }
    }

    /// Multiply every accumulator by `a`.
    pub fn scale(&mut self, a: f64) {
        self.du *= a;
        self.du2 *= a;
        self.du3 *= a;
        self.dpsi *= a;
    }

    /// Add `dt` times the current rates to the accumulators.
    pub fn accumulate(&mut self, dt: f64, state_rate: f64) {
        self.du += dt * self.v;
        self.du2 += dt * self.v2;
        self.du3 += dt * self.v3;
        self.dpsi += dt * state_rate;
    }

    /// Commit `b` times the accumulators.
    pub fn commit(&mut self, b: f64) {
        self.u += b * self.du;
        self.u2 += b * self.du2;
        self.u3 += b * self.du3;
        self.psi += b * self.dpsi;
    }

    /// Store the solved tractions and slip rates.
    pub fn set_solution(&mut self, traction: LocalVector, slip_rate: LocalVector, v: f64) {
        self.sn = traction.n;
        self.s2 = traction.t2;
        self.s3 = traction.t3;
        self.s = traction.shear_magnitude();
        self.v = v;
        self.v2 = slip_rate.t2;
        self.v3 = slip_rate.t3;
    }

    /// Record the rupture time if the front has just arrived.
    ///
    /// Returns `true` on the first crossing only.
    pub fn mark_front(&mut self, time: f64, threshold: f64) -> bool {
        if self.rupture_time.is_none() && self.v > threshold {
            self.rupture_time = Some(time);
            return true;
        }
        false
    }

    /// Name of the first non-finite committed quantity, if any.
    pub fn first_non_finite(&self) -> Option<&'static str> {
        [
            (self.u, "slip"),
            (self.u2, "strike slip"),
            (self.u3, "dip slip"),
            (self.psi, "state variable"),
        ]
        .into_iter()
        .find(|(x, _)| !x.is_finite())
        .map(|(_, name)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_storage_cycle_integrates_the_rate() {
        let mut p = PointState::new(0.0);
        p.v = 2.0;
        p.v2 = 2.0;
        p.scale(0.0);
        p.accumulate(0.5, 0.1);
        p.commit(1.0);
        assert_eq!(p.u, 1.0);
        assert_eq!(p.u2, 1.0);
        assert!((p.psi - 0.05).abs() < 1e-15);
    }

    #[test]
    fn front_is_marked_once() {
        let mut p = PointState::new(0.0);
        p.v = 1e-4;
        assert!(!p.mark_front(0.1, 1e-3));
        p.v = 1.0;
        assert!(p.mark_front(0.2, 1e-3));
        assert!(!p.mark_front(0.3, 1e-3));
        assert_eq!(p.rupture_time, Some(0.2));
    }

    #[test]
    fn non_finite_slip_is_named() {
        let mut p = PointState::new(0.0);
        assert_eq!(p.first_non_finite(), None);
        p.u3 = f64::NAN;
        assert_eq!(p.first_non_finite(), Some("dip slip"));
    }
}
