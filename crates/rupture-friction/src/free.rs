//! Traction-free interface.

use rupture_core::{
    BoundaryFields, EmptyFieldSource, FaultMode, FieldSource, InterfaceError, InterfaceFields,
    InterfaceGeometry, InterfaceId, LocalVector, PointKey,
};
use rupture_interface::{Interface, InterfaceContext, InterfaceKind, PhaseCensus, StageGuard};

use crate::characteristic::{checked_pair, face_velocities};

/// An interface whose faces are both stress free.
///
/// Each face reflects its incoming wave independently of the other.
pub struct FreeInterface {
    name: String,
    id: InterfaceId,
    mode: FaultMode,
    keys: Vec<PointKey>,
    guard: StageGuard,
}

impl FreeInterface {
    /// A free interface over `geometry`.
    pub fn new(
        name: impl Into<String>,
        id: InterfaceId,
        mode: FaultMode,
        geometry: &InterfaceGeometry,
    ) -> Self {
        let name = name.into();
        let keys: Vec<PointKey> = geometry.points().map(|(key, _)| key).collect();
        tracing::info!(interface = %name, points = keys.len(), "free interface ready");
        Self {
            name,
            id,
            mode,
            keys,
            guard: StageGuard::new(),
        }
    }
}

impl Interface for FreeInterface {
    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> InterfaceId {
        self.id
    }

    fn kind(&self) -> InterfaceKind {
        InterfaceKind::Free
    }

    fn scale_df(&mut self, _a: f64) {}

    fn calc_df(&mut self, _dt: f64, ctx: &mut InterfaceContext<'_>) -> Result<(), InterfaceError> {
        self.guard.on_calc_df(ctx.time());
        for &key in &self.keys {
            let pair = checked_pair(ctx, &self.name, self.id, key)?;
            let (v_minus, v_plus) = face_velocities(&pair, LocalVector::ZERO);
            let fields = InterfaceFields {
                minus: BoundaryFields::new(self.mode.mask(v_minus), LocalVector::ZERO),
                plus: BoundaryFields::new(self.mode.mask(v_plus), LocalVector::ZERO),
            };
            ctx.solved().write(self.id, key, &fields);
        }
        Ok(())
    }

    fn update(&mut self, _b: f64) -> Result<(), InterfaceError> {
        self.guard.on_update();
        Ok(())
    }

    fn write_fields(&mut self) {}

    fn fields(&self) -> &dyn FieldSource {
        &EmptyFieldSource
    }

    // Free faces carry no friction, so no point is counted.
    fn census(&self) -> PhaseCensus {
        PhaseCensus::default()
    }
}
