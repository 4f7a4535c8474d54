//! A law with zero strength everywhere.

use rupture_core::ConfigError;

use crate::law::{FrictionLaw, StrengthInput};

/// Zero shear strength: the fault slips freely under any shear load.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Frictionless;

impl FrictionLaw for Frictionless {
    fn name(&self) -> &str {
        "frictionless"
    }

    fn strength(&self, _input: &StrengthInput, _v: f64) -> f64 {
        0.0
    }

    fn check_points(&self, _points: usize) -> Result<(), ConfigError> {
        Ok(())
    }
}
