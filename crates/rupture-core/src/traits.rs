//! Core abstraction traits for boundary field exchange and field access.

use crate::error::BlockError;
use crate::field::{BoundaryFieldPair, FieldView, InterfaceFields};
use crate::id::{InterfaceId, PointKey};

/// Read-only access to the fields arriving at interface points.
///
/// Implemented by the block layer. Called once per point per
/// `calc_df`; returns `None` if the point is not known to the block
/// layer for this interface.
pub trait BoundaryReader {
    /// The current two-sided field state at `key` on interface `iface`.
    fn pair(&self, iface: InterfaceId, key: PointKey) -> Option<BoundaryFieldPair>;
}

/// Sink for solved interface fields.
///
/// Implemented by the block layer, which imposes the solved velocity and
/// traction on each face through its boundary treatment.
pub trait BoundaryWriter {
    /// Hand back the solved fields at `key` on interface `iface`.
    fn write(&mut self, iface: InterfaceId, key: PointKey, fields: &InterfaceFields);
}

/// Read-only access to named output fields.
///
/// Decouples output extraction from the storage owning the data: the
/// output list reads through `&dyn FieldSource` whether the field lives
/// in an interface's buffers or in the block layer.
pub trait FieldSource {
    /// View of the field called `name`, or `None` if unknown.
    fn field(&self, name: &str) -> Option<FieldView<'_>>;

    /// Every field name this source can provide.
    fn field_names(&self) -> Vec<&str>;
}

/// A source with no fields.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyFieldSource;

impl FieldSource for EmptyFieldSource {
    fn field(&self, _name: &str) -> Option<FieldView<'_>> {
        None
    }

    fn field_names(&self) -> Vec<&str> {
        Vec::new()
    }
}

/// The bulk finite-difference block layer, as seen by the driver.
///
/// Owns the volume fields, the boundary treatment that imposes solved
/// interface fields, and neighbour communication. The driver advances it
/// in lockstep with the interfaces using the same stage protocol.
pub trait BlockLayer: Send {
    /// Exchange ghost and boundary data with neighbouring processes.
    ///
    /// Blocking. Must complete before any interface reads boundary
    /// fields for the stage.
    fn exchange(&mut self) -> Result<(), BlockError>;

    /// Multiply every bulk rate accumulator by `a`.
    fn scale_df(&mut self, a: f64);

    /// Add `dt` times the bulk rates at stage time `time`.
    fn calc_df(&mut self, dt: f64, time: f64) -> Result<(), BlockError>;

    /// Commit `b` times the accumulators into the bulk fields.
    fn update(&mut self, b: f64) -> Result<(), BlockError>;

    /// Split borrow of the boundary reader and the solved-field writer.
    fn boundary_io(&mut self) -> (&dyn BoundaryReader, &mut dyn BoundaryWriter);

    /// Volume output fields.
    fn fields(&self) -> &dyn FieldSource;
}
