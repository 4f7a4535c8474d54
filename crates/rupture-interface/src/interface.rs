//! The [`Interface`] trait, [`InterfaceKind`] and [`PhaseCensus`].
//!
//! An interface is the internal boundary between two blocks of the
//! finite-difference grid. Every Runge–Kutta stage it receives the fields
//! arriving from both sides, enforces its condition (friction, perfect
//! bonding, or free surfaces), hands the admissible boundary state back
//! to the block layer, and advances whatever state it owns.

use rupture_core::{FieldSource, InterfaceError, InterfaceId};

use crate::context::InterfaceContext;

/// Which interface condition an [`Interface`] enforces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InterfaceKind {
    /// Frictional fault: slip allowed once shear reaches strength.
    Friction,
    /// Perfectly bonded contact: velocity and traction continuous.
    Locked,
    /// Traction-free on both faces.
    Free,
}

impl InterfaceKind {
    /// Keyword used for this kind in input files.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Friction => "friction",
            Self::Locked => "locked",
            Self::Free => "free",
        }
    }

    /// Parse an input-file keyword.
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "friction" => Some(Self::Friction),
            "locked" => Some(Self::Locked),
            "free" => Some(Self::Free),
            _ => None,
        }
    }
}

/// Count of interface points by slip phase after the latest stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PhaseCensus {
    /// Points whose shear stayed below strength.
    pub locked: usize,
    /// Points slipping at a positive rate.
    pub slipping: usize,
    /// Points that have passed the rupture-front threshold at least once.
    pub ruptured: usize,
}

impl PhaseCensus {
    /// Number of points counted.
    pub fn total(&self) -> usize {
        self.locked + self.slipping
    }
}

/// An interface condition, advanced in lockstep with the block layer.
///
/// # Stage protocol
///
/// For each stage of a low-storage Runge–Kutta step the driver calls, in
/// order: `scale_df(A)`, `calc_df(dt, ctx)`, `update(B)`. Stage times
/// passed through the context never decrease. Implementations may check
/// the protocol with a [`StageGuard`](crate::StageGuard) in debug builds.
///
/// # Object safety
///
/// This trait is object-safe; the driver stores interfaces as
/// `Vec<Box<dyn Interface>>`.
pub trait Interface: Send + 'static {
    /// Unique name, used to qualify output fields and in error reports.
    fn name(&self) -> &str;

    /// Position of this interface in the input file.
    fn id(&self) -> InterfaceId;

    /// Which condition this interface enforces.
    fn kind(&self) -> InterfaceKind;

    /// Multiply every rate accumulator by `a`.
    fn scale_df(&mut self, a: f64);

    /// Enforce the interface condition at every point for one stage and
    /// add `dt` times the resulting rates to the accumulators.
    ///
    /// Solved boundary fields are written to `ctx.solved()`.
    fn calc_df(&mut self, dt: f64, ctx: &mut InterfaceContext<'_>) -> Result<(), InterfaceError>;

    /// Commit `b` times the accumulators into the state.
    fn update(&mut self, b: f64) -> Result<(), InterfaceError>;

    /// Refresh the output field buffers from the current state.
    ///
    /// Idempotent; called before every output pass.
    fn write_fields(&mut self);

    /// The output field buffers.
    fn fields(&self) -> &dyn FieldSource;

    /// Points by phase after the latest `calc_df`.
    fn census(&self) -> PhaseCensus;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_round_trip() {
        for kind in [
            InterfaceKind::Friction,
            InterfaceKind::Locked,
            InterfaceKind::Free,
        ] {
            assert_eq!(InterfaceKind::from_keyword(kind.keyword()), Some(kind));
        }
        assert_eq!(InterfaceKind::from_keyword("glued"), None);
    }

    #[test]
    fn census_total_ignores_ruptured_overlap() {
        let c = PhaseCensus {
            locked: 3,
            slipping: 2,
            ruptured: 4,
        };
        assert_eq!(c.total(), 5);
    }
}
