//! Perfectly bonded interface: traction and velocity continuous.

use rupture_core::{
    BoundaryFields, EmptyFieldSource, FaultMode, FieldSource, InterfaceError, InterfaceFields,
    InterfaceGeometry, InterfaceId, PointKey,
};
use rupture_interface::{Interface, InterfaceContext, InterfaceKind, PhaseCensus, StageGuard};

use crate::characteristic::{checked_pair, face_velocities, stress_transfer};

/// An interface that never slips or opens.
///
/// The traction is the locked stress-transfer functional in every
/// component, so both faces move together.
pub struct LockedInterface {
    name: String,
    id: InterfaceId,
    mode: FaultMode,
    keys: Vec<PointKey>,
    guard: StageGuard,
}

impl LockedInterface {
    /// A bonded interface over `geometry`.
    pub fn new(
        name: impl Into<String>,
        id: InterfaceId,
        mode: FaultMode,
        geometry: &InterfaceGeometry,
    ) -> Self {
        let name = name.into();
        let keys: Vec<PointKey> = geometry.points().map(|(key, _)| key).collect();
        tracing::info!(interface = %name, points = keys.len(), "locked interface ready");
        Self {
            name,
            id,
            mode,
            keys,
            guard: StageGuard::new(),
        }
    }
}

impl Interface for LockedInterface {
    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> InterfaceId {
        self.id
    }

    fn kind(&self) -> InterfaceKind {
        InterfaceKind::Locked
    }

    fn scale_df(&mut self, _a: f64) {}

    fn calc_df(&mut self, _dt: f64, ctx: &mut InterfaceContext<'_>) -> Result<(), InterfaceError> {
        self.guard.on_calc_df(ctx.time());
        for &key in &self.keys {
            let pair = checked_pair(ctx, &self.name, self.id, key)?;
            let s = self.mode.mask(stress_transfer(&pair).phi);
            let (v_minus, v_plus) = face_velocities(&pair, s);
            let fields = InterfaceFields {
                minus: BoundaryFields::new(self.mode.mask(v_minus), s),
                plus: BoundaryFields::new(self.mode.mask(v_plus), s),
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

    fn census(&self) -> PhaseCensus {
        PhaseCensus {
            locked: self.keys.len(),
            ..PhaseCensus::default()
        }
    }
}
