//! Linear slip-weakening friction with optional forced time weakening.
//!
//! The friction coefficient drops linearly from `mus` to `mud` over the
//! slip distance `dc`:
//!
//! ```text
//! f_t = 0                         t < trup
//!     = min((t - trup) / tc, 1)   t >= trup   (1 if tc == 0)
//! mu  = mus - (mus - mud) * max(min(U / dc, 1), f_t)
//! strength = c0 + mu * compression
//! ```
//!
//! The forced term nucleates rupture by weakening a patch on a schedule
//! regardless of slip. Strength does not depend on slip rate, so the
//! friction solve is closed-form.
//!
//! Constructed via the builder pattern: [`SlipWeakening::builder`].

use rupture_core::ConfigError;

use crate::law::{FrictionLaw, ParamField, StrengthInput};

/// Slip-weakening parameters at one point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlipWeakeningParams {
    /// Static friction coefficient.
    pub mus: f64,
    /// Dynamic friction coefficient.
    pub mud: f64,
    /// Critical slip distance.
    pub dc: f64,
    /// Cohesion.
    pub c0: f64,
    /// Forced weakening start time (`f64::INFINITY` disables it).
    pub trup: f64,
    /// Forced weakening duration.
    pub tc: f64,
}

impl SlipWeakeningParams {
    /// Parameters without cohesion or forced weakening.
    pub fn new(mus: f64, mud: f64, dc: f64) -> Self {
        Self {
            mus,
            mud,
            dc,
            c0: 0.0,
            trup: f64::INFINITY,
            tc: 0.0,
        }
    }

    /// Build from an input-file row: `mus mud dc [c0 trup tc]`.
    pub fn from_values(values: &[f64]) -> Result<Self, String> {
        let p = match *values {
            [mus, mud, dc] => Self::new(mus, mud, dc),
            [mus, mud, dc, c0, trup, tc] => Self {
                mus,
                mud,
                dc,
                c0,
                trup,
                tc,
            },
            _ => {
                return Err(format!(
                    "slip weakening expects 3 or 6 parameters, got {}",
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
    /// Returns `Err` if any coefficient is non-finite, `mus < mud`,
    /// `mud < 0`, `dc <= 0`, `c0 < 0`, `tc < 0`, or `trup` is NaN.
    pub fn validate(&self) -> Result<(), String> {
        if !self.mud.is_finite() || self.mud < 0.0 {
            return Err(format!("mud must be finite and >= 0, got {}", self.mud));
        }
        if !self.mus.is_finite() || self.mus < self.mud {
            return Err(format!(
                "mus must be finite and >= mud ({}), got {}",
                self.mud, self.mus
            ));
        }
        if !(self.dc > 0.0) || !self.dc.is_finite() {
            return Err(format!("dc must be finite and > 0, got {}", self.dc));
        }
        if !self.c0.is_finite() || self.c0 < 0.0 {
            return Err(format!("c0 must be finite and >= 0, got {}", self.c0));
        }
        if self.trup.is_nan() {
            return Err("trup must not be NaN".to_string());
        }
        if !self.tc.is_finite() || self.tc < 0.0 {
            return Err(format!("tc must be finite and >= 0, got {}", self.tc));
        }
        Ok(())
    }

    /// Forced weakening fraction at time `t`.
    pub fn forced_fraction(&self, t: f64) -> f64 {
        if t < self.trup {
            0.0
        } else if self.tc == 0.0 {
            1.0
        } else {
            ((t - self.trup) / self.tc).min(1.0)
        }
    }

    /// Friction coefficient after slip `u` at time `t`.
    pub fn coefficient(&self, u: f64, t: f64) -> f64 {
        let weakening = (u / self.dc).min(1.0).max(self.forced_fraction(t));
        self.mus - (self.mus - self.mud) * weakening
    }
}

/// Linear slip-weakening friction law.
#[derive(Clone, Debug, PartialEq)]
pub struct SlipWeakening {
    params: ParamField<SlipWeakeningParams>,
}

/// Builder for a uniform [`SlipWeakening`] law.
///
/// Required fields: `mus`, `mud` and `dc`.
pub struct SlipWeakeningBuilder {
    mus: Option<f64>,
    mud: Option<f64>,
    dc: Option<f64>,
    c0: f64,
    trup: f64,
    tc: f64,
}

impl SlipWeakening {
    /// Create a new builder for a uniform law.
    pub fn builder() -> SlipWeakeningBuilder {
        SlipWeakeningBuilder {
            mus: None,
            mud: None,
            dc: None,
            c0: 0.0,
            trup: f64::INFINITY,
            tc: 0.0,
        }
    }

    /// A law with one parameter set per point.
    ///
    /// # Errors
    ///
    /// Returns `Err` naming the first invalid entry.
    pub fn per_point(params: Vec<SlipWeakeningParams>) -> Result<Self, String> {
        for (slot, p) in params.iter().enumerate() {
            p.validate().map_err(|e| format!("point {slot}: {e}"))?;
        }
        Ok(Self {
            params: ParamField::PerPoint(params),
        })
    }

    /// A uniform law from already-validated parameters.
    pub fn uniform(params: SlipWeakeningParams) -> Result<Self, String> {
        params.validate()?;
        Ok(Self {
            params: ParamField::Uniform(params),
        })
    }

    /// Parameters of the point in `slot`.
    pub fn params(&self, slot: usize) -> &SlipWeakeningParams {
        self.params.get(slot)
    }
}

impl SlipWeakeningBuilder {
    /// Static friction coefficient. Must be >= `mud`.
    pub fn mus(mut self, mus: f64) -> Self {
        self.mus = Some(mus);
        self
    }

    /// Dynamic friction coefficient. Must be >= 0.
    pub fn mud(mut self, mud: f64) -> Self {
        self.mud = Some(mud);
        self
    }

    /// Critical slip distance. Must be > 0.
    pub fn dc(mut self, dc: f64) -> Self {
        self.dc = Some(dc);
        self
    }

    /// Cohesion (default: 0.0). Must be >= 0.
    pub fn cohesion(mut self, c0: f64) -> Self {
        self.c0 = c0;
        self
    }

    /// Force weakening from `trup` over duration `tc` (default: never).
    pub fn forced_rupture(mut self, trup: f64, tc: f64) -> Self {
        self.trup = trup;
        self.tc = tc;
        self
    }

    /// Build the law, validating all configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a required coefficient is missing or any
    /// parameter is out of range (see [`SlipWeakeningParams::validate`]).
    pub fn build(self) -> Result<SlipWeakening, String> {
        let params = SlipWeakeningParams {
            mus: self.mus.ok_or_else(|| "mus is required".to_string())?,
            mud: self.mud.ok_or_else(|| "mud is required".to_string())?,
            dc: self.dc.ok_or_else(|| "dc is required".to_string())?,
            c0: self.c0,
            trup: self.trup,
            tc: self.tc,
        };
        SlipWeakening::uniform(params)
    }
}

impl FrictionLaw for SlipWeakening {
    fn name(&self) -> &str {
        "slipweak"
    }

    fn strength(&self, input: &StrengthInput, _v: f64) -> f64 {
        let p = self.params.get(input.slot);
        p.c0 + p.coefficient(input.slip, input.time) * input.compression
    }

    fn check_points(&self, points: usize) -> Result<(), ConfigError> {
        self.params.check_points(self.name(), points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(slip: f64, time: f64) -> StrengthInput {
        StrengthInput {
            compression: 10.0,
            slip,
            state: 0.0,
            time,
            slot: 0,
        }
    }

    fn law() -> SlipWeakening {
        SlipWeakening::builder()
            .mus(0.6)
            .mud(0.4)
            .dc(0.5)
            .build()
            .unwrap()
    }

    #[test]
    fn strength_weakens_linearly_then_saturates() {
        let law = law();
        assert!((law.strength(&input(0.0, 0.0), 0.0) - 6.0).abs() < 1e-12);
        assert!((law.strength(&input(0.25, 0.0), 0.0) - 5.0).abs() < 1e-12);
        assert!((law.strength(&input(0.5, 0.0), 0.0) - 4.0).abs() < 1e-12);
        assert!((law.strength(&input(3.0, 0.0), 0.0) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn cohesion_adds_to_strength() {
        let law = SlipWeakening::builder()
            .mus(0.6)
            .mud(0.4)
            .dc(0.5)
            .cohesion(1.5)
            .build()
            .unwrap();
        assert!((law.strength(&input(0.0, 0.0), 0.0) - 7.5).abs() < 1e-12);
    }

    #[test]
    fn forced_weakening_ramps_over_tc() {
        let p = SlipWeakeningParams {
            trup: 1.0,
            tc: 2.0,
            ..SlipWeakeningParams::new(0.6, 0.4, 0.5)
        };
        assert_eq!(p.forced_fraction(0.5), 0.0);
        assert_eq!(p.forced_fraction(2.0), 0.5);
        assert_eq!(p.forced_fraction(10.0), 1.0);
        // Slip weakening still wins when larger.
        assert!((p.coefficient(0.5, 1.5) - 0.4).abs() < 1e-12);
        assert!((p.coefficient(0.0, 2.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn instant_forced_weakening_when_tc_is_zero() {
        let p = SlipWeakeningParams {
            trup: 0.0,
            tc: 0.0,
            ..SlipWeakeningParams::new(0.6, 0.4, 0.5)
        };
        assert_eq!(p.coefficient(0.0, 0.0), 0.4);
    }

    #[test]
    fn builder_rejects_missing_mus() {
        let result = SlipWeakening::builder().mud(0.4).dc(0.5).build();
        assert!(result.unwrap_err().contains("mus"));
    }

    #[test]
    fn builder_rejects_mus_below_mud() {
        let result = SlipWeakening::builder().mus(0.3).mud(0.4).dc(0.5).build();
        assert!(result.unwrap_err().contains("mus"));
    }

    #[test]
    fn builder_rejects_zero_dc() {
        let result = SlipWeakening::builder().mus(0.6).mud(0.4).dc(0.0).build();
        assert!(result.unwrap_err().contains("dc"));
    }

    #[test]
    fn builder_rejects_nan_dc() {
        let result = SlipWeakening::builder()
            .mus(0.6)
            .mud(0.4)
            .dc(f64::NAN)
            .build();
        assert!(result.unwrap_err().contains("dc"));
    }

    #[test]
    fn from_values_accepts_three_or_six() {
        assert!(SlipWeakeningParams::from_values(&[0.6, 0.4, 0.5]).is_ok());
        let p = SlipWeakeningParams::from_values(&[0.6, 0.4, 0.5, 0.0, 1e9, 0.0]).unwrap();
        assert_eq!(p.trup, 1e9);
        assert!(SlipWeakeningParams::from_values(&[0.6, 0.4]).is_err());
    }

    #[test]
    fn per_point_reports_bad_slot() {
        let err = SlipWeakening::per_point(vec![
            SlipWeakeningParams::new(0.6, 0.4, 0.5),
            SlipWeakeningParams::new(0.6, 0.4, -1.0),
        ])
        .unwrap_err();
        assert!(err.starts_with("point 1"));
    }
}
