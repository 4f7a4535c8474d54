//! The [`FrictionLaw`] trait and shared parameter plumbing.
//!
//! A friction law maps the effective compressive normal stress, the
//! slip history and an optional state variable to a shear strength. Laws
//! whose strength depends on the slip rate are solved iteratively by
//! [`solve_fs`](crate::solve_fs); rate-independent laws in closed form.

use std::fmt;

use rupture_core::ConfigError;

/// Everything a friction law may depend on at one point and stage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrengthInput {
    /// Effective compressive normal stress (`-Sn`, positive in compression).
    pub compression: f64,
    /// Cumulative slip magnitude `U`.
    pub slip: f64,
    /// Law state variable `psi`.
    pub state: f64,
    /// Stage time.
    pub time: f64,
    /// Arena slot of the point, indexing per-point parameters.
    pub slot: usize,
}

/// A frictional constitutive law.
///
/// # Object safety
///
/// This trait is object-safe; interfaces hold their law as
/// `Box<dyn FrictionLaw>`.
pub trait FrictionLaw: Send + Sync + fmt::Debug {
    /// Short name, used in logs and input files.
    fn name(&self) -> &str;

    /// Whether [`strength`](FrictionLaw::strength) depends on `v`.
    ///
    /// Default: `false`.
    fn is_rate_dependent(&self) -> bool {
        false
    }

    /// Shear strength at slip rate `v >= 0`.
    fn strength(&self, input: &StrengthInput, v: f64) -> f64;

    /// Derivative of the strength with respect to `v`.
    ///
    /// Only called for rate-dependent laws. Default: `0.0`.
    fn d_strength_dv(&self, _input: &StrengthInput, _v: f64) -> f64 {
        0.0
    }

    /// Rate of change of the state variable at slip rate `v`.
    ///
    /// Default: `0.0` (no state evolution).
    fn state_rate(&self, _input: &StrengthInput, _v: f64) -> f64 {
        0.0
    }

    /// Initial state variable of the point in `slot`.
    ///
    /// Default: `0.0`.
    fn initial_state(&self, _slot: usize) -> f64 {
        0.0
    }

    /// Check that per-point parameters cover exactly `points` points.
    fn check_points(&self, points: usize) -> Result<(), ConfigError>;
}

/// Parameters that are either uniform or given per point.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamField<P> {
    /// Same parameters everywhere.
    Uniform(P),
    /// One parameter set per arena slot.
    PerPoint(Vec<P>),
}

impl<P> ParamField<P> {
    /// Parameters of the point in `slot`.
    ///
    /// `slot` must be in range for per-point parameters; construction
    /// checks this through [`FrictionLaw::check_points`].
    pub fn get(&self, slot: usize) -> &P {
        match self {
            Self::Uniform(p) => p,
            Self::PerPoint(v) => &v[slot],
        }
    }

    /// Number of per-point entries, or `None` if uniform.
    pub fn per_point_len(&self) -> Option<usize> {
        match self {
            Self::Uniform(_) => None,
            Self::PerPoint(v) => Some(v.len()),
        }
    }

    /// Every parameter set held.
    pub fn iter(&self) -> impl Iterator<Item = &P> {
        let (single, many) = match self {
            Self::Uniform(p) => (Some(p), &[][..]),
            Self::PerPoint(v) => (None, v.as_slice()),
        };
        single.into_iter().chain(many.iter())
    }

    /// Check the per-point length against the interface point count.
    pub fn check_points(&self, law: &str, points: usize) -> Result<(), ConfigError> {
        match self.per_point_len() {
            Some(n) if n != points => Err(ConfigError::InvalidParameter {
                reason: format!("{law}: {n} per-point parameter sets for {points} points"),
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_answers_every_slot() {
        let f = ParamField::Uniform(3.0);
        assert_eq!(*f.get(0), 3.0);
        assert_eq!(*f.get(1000), 3.0);
        assert_eq!(f.per_point_len(), None);
        assert!(f.check_points("law", 7).is_ok());
    }

    #[test]
    fn per_point_length_is_checked() {
        let f = ParamField::PerPoint(vec![1.0, 2.0]);
        assert_eq!(*f.get(1), 2.0);
        assert!(f.check_points("law", 2).is_ok());
        assert!(matches!(
            f.check_points("law", 3),
            Err(ConfigError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn iter_visits_all_sets() {
        assert_eq!(ParamField::Uniform(1).iter().count(), 1);
        assert_eq!(ParamField::PerPoint(vec![1, 2, 3]).iter().sum::<i32>(), 6);
    }
}
