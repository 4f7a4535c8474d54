//! Local-frame boundary field types, fault modes, and field views.
//!
//! All interface quantities are expressed in the interface's local frame:
//! one normal component `n` (pointing from the minus block into the plus
//! block) and two tangential components `t2` (along strike) and `t3`
//! (along dip). Tractions are positive in tension, so compressive normal
//! traction is negative.

use std::ops::{Add, Mul, Neg, Sub};

/// A vector in the interface's local (normal, strike, dip) frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LocalVector {
    /// Normal component.
    pub n: f64,
    /// First tangential (along-strike) component.
    pub t2: f64,
    /// Second tangential (along-dip) component.
    pub t3: f64,
}

impl LocalVector {
    /// The zero vector.
    pub const ZERO: Self = Self {
        n: 0.0,
        t2: 0.0,
        t3: 0.0,
    };

    /// Construct from components.
    pub const fn new(n: f64, t2: f64, t3: f64) -> Self {
        Self { n, t2, t3 }
    }

    /// `true` if every component is finite.
    pub fn is_finite(&self) -> bool {
        self.n.is_finite() && self.t2.is_finite() && self.t3.is_finite()
    }

    /// Magnitude of the tangential part.
    pub fn shear_magnitude(&self) -> f64 {
        self.t2.hypot(self.t3)
    }
}

impl Add for LocalVector {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.n + rhs.n, self.t2 + rhs.t2, self.t3 + rhs.t3)
    }
}

impl Sub for LocalVector {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.n - rhs.n, self.t2 - rhs.t2, self.t3 - rhs.t3)
    }
}

impl Mul<f64> for LocalVector {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.n * rhs, self.t2 * rhs, self.t3 * rhs)
    }
}

impl Neg for LocalVector {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.n, -self.t2, -self.t3)
    }
}

/// Particle velocity and traction on one face of the interface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundaryFields {
    /// Particle velocity.
    pub v: LocalVector,
    /// Traction.
    pub s: LocalVector,
}

impl BoundaryFields {
    /// Construct from velocity and traction.
    pub const fn new(v: LocalVector, s: LocalVector) -> Self {
        Self { v, s }
    }
}

/// Material impedances of one side of the interface.
///
/// `zp` (density times P-wave speed) damps the normal component and
/// `zs` (density times S-wave speed) the tangential components.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Impedance {
    /// P-wave impedance.
    pub zp: f64,
    /// S-wave impedance.
    pub zs: f64,
}

impl Impedance {
    /// Construct from P and S impedances.
    pub const fn new(zp: f64, zs: f64) -> Self {
        Self { zp, zs }
    }

    /// `true` if both impedances are finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.zp.is_finite() && self.zs.is_finite() && self.zp > 0.0 && self.zs > 0.0
    }
}

/// The two-sided field state arriving at one interface grid point.
///
/// Assembled fresh for every `calc_df` call from the adjoining blocks'
/// current fields. Never persisted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundaryFieldPair {
    /// Fields on the minus face (block 1).
    pub minus: BoundaryFields,
    /// Fields on the plus face (block 2).
    pub plus: BoundaryFields,
    /// Impedances of the minus side.
    pub z_minus: Impedance,
    /// Impedances of the plus side.
    pub z_plus: Impedance,
}

impl BoundaryFieldPair {
    /// Name of the first non-finite field value, if any.
    pub fn first_non_finite(&self) -> Option<&'static str> {
        let checks = [
            (self.minus.v.is_finite(), "minus velocity"),
            (self.minus.s.is_finite(), "minus traction"),
            (self.plus.v.is_finite(), "plus velocity"),
            (self.plus.s.is_finite(), "plus traction"),
        ];
        checks.iter().find(|(ok, _)| !ok).map(|(_, name)| *name)
    }
}

/// Solved boundary state handed back to the block layer.
///
/// Carries the velocity and traction that each face must satisfy after
/// the interface condition has been enforced.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InterfaceFields {
    /// Solved fields on the minus face.
    pub minus: BoundaryFields,
    /// Solved fields on the plus face.
    pub plus: BoundaryFields,
}

impl InterfaceFields {
    /// `true` if every component on both faces is finite.
    pub fn is_finite(&self) -> bool {
        self.minus.v.is_finite()
            && self.minus.s.is_finite()
            && self.plus.v.is_finite()
            && self.plus.s.is_finite()
    }

    /// Velocity jump across the interface (`plus - minus`).
    pub fn velocity_jump(&self) -> LocalVector {
        self.plus.v - self.minus.v
    }
}

/// Which field components exist for a given problem dimension and mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaultMode {
    /// 2D in-plane (mode II): normal and along-strike components.
    InPlane,
    /// 2D anti-plane (mode III): along-dip component only. The normal
    /// direction is not coupled; normal stress comes from the load alone.
    AntiPlane,
    /// 3D: normal and both tangential components.
    ThreeD,
}

impl FaultMode {
    /// Whether the normal component is solved.
    pub fn has_normal(self) -> bool {
        !matches!(self, Self::AntiPlane)
    }

    /// Whether the along-strike component is active.
    pub fn has_t2(self) -> bool {
        !matches!(self, Self::AntiPlane)
    }

    /// Whether the along-dip component is active.
    pub fn has_t3(self) -> bool {
        !matches!(self, Self::InPlane)
    }

    /// Zero the components this mode does not carry.
    pub fn mask(self, v: LocalVector) -> LocalVector {
        LocalVector::new(
            if self.has_normal() { v.n } else { 0.0 },
            if self.has_t2() { v.t2 } else { 0.0 },
            if self.has_t3() { v.t3 } else { 0.0 },
        )
    }
}

/// Read-only view of a field laid out row-major over a 3D shape.
///
/// Interface fields use `shape = [n1, n2, 1]`.
#[derive(Clone, Copy, Debug)]
pub struct FieldView<'a> {
    /// Flat data, `shape[0] * shape[1] * shape[2]` values.
    pub data: &'a [f64],
    /// Extent along each axis.
    pub shape: [usize; 3],
}

impl<'a> FieldView<'a> {
    /// Value at `(x0, x1, x2)`, or `None` if out of bounds.
    pub fn get(&self, x0: usize, x1: usize, x2: usize) -> Option<f64> {
        if x0 >= self.shape[0] || x1 >= self.shape[1] || x2 >= self.shape[2] {
            return None;
        }
        self.data
            .get((x0 * self.shape[1] + x1) * self.shape[2] + x2)
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_vector_arithmetic() {
        let a = LocalVector::new(1.0, 2.0, 3.0);
        let b = LocalVector::new(0.5, -1.0, 1.0);
        assert_eq!(a + b, LocalVector::new(1.5, 1.0, 4.0));
        assert_eq!(a - b, LocalVector::new(0.5, 3.0, 2.0));
        assert_eq!(a * 2.0, LocalVector::new(2.0, 4.0, 6.0));
        assert_eq!(-a, LocalVector::new(-1.0, -2.0, -3.0));
        assert_eq!(LocalVector::new(9.0, 3.0, 4.0).shear_magnitude(), 5.0);
    }

    #[test]
    fn pair_reports_first_non_finite_field() {
        let z = Impedance::new(10.0, 5.0);
        let mut pair = BoundaryFieldPair {
            minus: BoundaryFields::default(),
            plus: BoundaryFields::default(),
            z_minus: z,
            z_plus: z,
        };
        assert_eq!(pair.first_non_finite(), None);
        pair.plus.s.t2 = f64::NAN;
        assert_eq!(pair.first_non_finite(), Some("plus traction"));
    }

    #[test]
    fn impedance_validity() {
        assert!(Impedance::new(1.0, 1.0).is_valid());
        assert!(!Impedance::new(0.0, 1.0).is_valid());
        assert!(!Impedance::new(1.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn fault_mode_masks_inactive_components() {
        let v = LocalVector::new(1.0, 2.0, 3.0);
        assert_eq!(FaultMode::InPlane.mask(v), LocalVector::new(1.0, 2.0, 0.0));
        assert_eq!(FaultMode::AntiPlane.mask(v), LocalVector::new(0.0, 0.0, 3.0));
        assert_eq!(FaultMode::ThreeD.mask(v), v);
    }

    #[test]
    fn field_view_indexes_row_major() {
        let data: Vec<f64> = (0..6).map(f64::from).collect();
        let view = FieldView {
            data: &data,
            shape: [2, 3, 1],
        };
        assert_eq!(view.get(0, 0, 0), Some(0.0));
        assert_eq!(view.get(1, 2, 0), Some(5.0));
        assert_eq!(view.get(2, 0, 0), None);
    }
}
