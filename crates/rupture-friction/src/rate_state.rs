//! Rate-and-state friction with aging or slip state evolution.
//!
//! Regularised friction coefficient, with state variable `psi`:
//!
//! ```text
//! f(v, psi) = a * asinh(v / (2 v0) * exp(psi / a))
//! strength  = f * compression
//! ```
//!
//! State evolution:
//!
//! ```text
//! aging: dpsi/dt = b v0 / l * (exp((f0 - psi) / b) - v / v0)
//! slip:  dpsi/dt = -v / l * (f - f0 + (b - a) ln(v / v0))
//! ```
//!
//! Strength depends on `v`, so the friction solve is iterative.

use rupture_core::ConfigError;

use crate::law::{FrictionLaw, ParamField, StrengthInput};

/// Which state evolution law is used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateEvolution {
    /// Aging (Dieterich) law: state heals in stationary contact.
    Aging,
    /// Slip (Ruina) law: state evolves only with slip.
    Slip,
}

impl StateEvolution {
    /// Parse an input-file keyword.
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "aging" => Some(Self::Aging),
            "slip" => Some(Self::Slip),
            _ => None,
        }
    }
}

/// Rate-and-state parameters at one point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RateStateParams {
    /// Direct effect.
    pub a: f64,
    /// Evolution effect.
    pub b: f64,
    /// Reference slip rate.
    pub v0: f64,
    /// Steady-state friction coefficient at `v0`.
    pub f0: f64,
    /// State evolution distance.
    pub l: f64,
    /// Initial state variable.
    pub psi0: f64,
}

impl RateStateParams {
    /// Build from an input-file row: `a b v0 f0 l psi0`.
    pub fn from_values(values: &[f64]) -> Result<Self, String> {
        let p = match *values {
            [a, b, v0, f0, l, psi0] => Self {
                a,
                b,
                v0,
                f0,
                l,
                psi0,
            },
            _ => {
                return Err(format!(
                    "rate and state expects 6 parameters, got {}",
                    values.len()
                ))
            }
        };
        p.validate()?;
        Ok(p)
    }

    /// Check parameter ranges.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any value is non-finite or `a`, `b`, `v0`, `l`
    /// are not strictly positive.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [("a", self.a), ("b", self.b), ("v0", self.v0), ("l", self.l)] {
            if !(value > 0.0) || !value.is_finite() {
                return Err(format!("{name} must be finite and > 0, got {value}"));
            }
        }
        if !self.f0.is_finite() {
            return Err(format!("f0 must be finite, got {}", self.f0));
        }
        if !self.psi0.is_finite() {
            return Err(format!("psi0 must be finite, got {}", self.psi0));
        }
        Ok(())
    }

    fn scaled_rate(&self, psi: f64) -> f64 {
        (psi / self.a).exp() / (2.0 * self.v0)
    }

    /// Friction coefficient at slip rate `v` and state `psi`.
    pub fn coefficient(&self, v: f64, psi: f64) -> f64 {
        self.a * (v * self.scaled_rate(psi)).asinh()
    }

    /// Derivative of the coefficient with respect to `v`.
    pub fn d_coefficient_dv(&self, v: f64, psi: f64) -> f64 {
        let k = self.scaled_rate(psi);
        let x = v * k;
        self.a * k / (1.0 + x * x).sqrt()
    }
}

/// Rate-and-state friction law.
#[derive(Clone, Debug, PartialEq)]
pub struct RateAndState {
    params: ParamField<RateStateParams>,
    evolution: StateEvolution,
}

impl RateAndState {
    /// A uniform law.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a parameter is out of range.
    pub fn uniform(params: RateStateParams, evolution: StateEvolution) -> Result<Self, String> {
        params.validate()?;
        Ok(Self {
            params: ParamField::Uniform(params),
            evolution,
        })
    }

    /// A law with one parameter set per point.
    ///
    /// # Errors
    ///
    /// Returns `Err` naming the first invalid entry.
    pub fn per_point(
        params: Vec<RateStateParams>,
        evolution: StateEvolution,
    ) -> Result<Self, String> {
        for (slot, p) in params.iter().enumerate() {
            p.validate().map_err(|e| format!("point {slot}: {e}"))?;
        }
        Ok(Self {
            params: ParamField::PerPoint(params),
            evolution,
        })
    }

    /// The state evolution law.
    pub fn evolution(&self) -> StateEvolution {
        self.evolution
    }

    /// Parameters of the point in `slot`.
    pub fn params(&self, slot: usize) -> &RateStateParams {
        self.params.get(slot)
    }
}

impl FrictionLaw for RateAndState {
    fn name(&self) -> &str {
        match self.evolution {
            StateEvolution::Aging => "ratestate_aging",
            StateEvolution::Slip => "ratestate_slip",
        }
    }

    fn is_rate_dependent(&self) -> bool {
        true
    }

    fn strength(&self, input: &StrengthInput, v: f64) -> f64 {
        let p = self.params.get(input.slot);
        p.coefficient(v, input.state) * input.compression
    }

    fn d_strength_dv(&self, input: &StrengthInput, v: f64) -> f64 {
        let p = self.params.get(input.slot);
        p.d_coefficient_dv(v, input.state) * input.compression
    }

    fn state_rate(&self, input: &StrengthInput, v: f64) -> f64 {
        let p = self.params.get(input.slot);
        let psi = input.state;
        match self.evolution {
            StateEvolution::Aging => p.b * p.v0 / p.l * (((p.f0 - psi) / p.b).exp() - v / p.v0),
            StateEvolution::Slip => {
                if v <= 0.0 {
                    return 0.0;
                }
                let f = p.coefficient(v, psi);
                -v / p.l * (f - p.f0 + (p.b - p.a) * (v / p.v0).ln())
            }
        }
    }

    fn initial_state(&self, slot: usize) -> f64 {
        self.params.get(slot).psi0
    }

    fn check_points(&self, points: usize) -> Result<(), ConfigError> {
        self.params.check_points(self.name(), points)
    }
}
