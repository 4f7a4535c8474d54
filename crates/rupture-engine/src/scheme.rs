//! Williamson low-storage Runge–Kutta schemes.
//!
//! A step of `s` stages keeps one accumulator per state variable. Stage
//! `k` scales the accumulator by `A[k]`, adds `dt` times the rate at
//! `t + C[k] dt`, then commits `B[k]` times the accumulator.

use rupture_core::ConfigError;
use smallvec::SmallVec;

/// Coefficients of one stage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stage {
    /// Accumulator scale applied before the rate evaluation.
    pub a: f64,
    /// Weight of the accumulator in the update.
    pub b: f64,
    /// Stage time offset as a fraction of `dt`.
    pub c: f64,
}

/// A low-storage Runge–Kutta scheme of order 1 to 4.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeScheme {
    order: u8,
    stages: SmallVec<[Stage; 5]>,
}

impl TimeScheme {
    /// The scheme of the given order.
    ///
    /// Order 4 is the five-stage Carpenter–Kennedy scheme.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameter`] for an order outside
    /// `1..=4`.
    pub fn low_storage(order: u8) -> Result<Self, ConfigError> {
        let (a, b, c): (&[f64], &[f64], &[f64]) = match order {
            1 => (&[0.0], &[1.0], &[0.0]),
            2 => (&[0.0, -1.0], &[1.0, 0.5], &[0.0, 1.0]),
            3 => (
                &[0.0, -5.0 / 9.0, -153.0 / 128.0],
                &[1.0 / 3.0, 15.0 / 16.0, 8.0 / 15.0],
                &[0.0, 1.0 / 3.0, 3.0 / 4.0],
            ),
            4 => (
                &[
                    0.0,
                    -567_301_805_773.0 / 1_357_537_059_087.0,
                    -2_404_267_990_393.0 / 2_016_746_695_238.0,
                    -3_550_918_686_646.0 / 2_091_501_179_385.0,
                    -1_275_806_237_668.0 / 842_570_457_699.0,
                ],
                &[
                    1_432_997_174_477.0 / 9_575_080_441_755.0,
                    5_161_836_677_717.0 / 13_612_068_292_357.0,
                    1_720_146_321_549.0 / 2_090_206_949_498.0,
                    3_134_564_353_537.0 / 4_481_467_310_338.0,
                    2_277_821_191_437.0 / 14_882_151_754_819.0,
                ],
                &[
                    0.0,
                    1_432_997_174_477.0 / 9_575_080_441_755.0,
                    2_526_269_341_429.0 / 6_820_363_962_896.0,
                    2_006_345_519_317.0 / 3_224_310_063_776.0,
                    2_802_321_613_138.0 / 2_924_317_926_251.0,
                ],
            ),
            _ => {
                return Err(ConfigError::InvalidParameter {
                    reason: format!("Runge-Kutta order must be 1 to 4, got {order}"),
                })
            }
        };
        let stages = a
            .iter()
            .zip(b)
            .zip(c)
            .map(|((&a, &b), &c)| Stage { a, b, c })
            .collect();
        Ok(Self { order, stages })
    }

    /// Order of accuracy.
    pub fn order(&self) -> u8 {
        self.order
    }

    /// Stages in execution order.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }
}
