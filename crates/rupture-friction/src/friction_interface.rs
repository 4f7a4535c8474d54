//! Frictional fault interface.
//!
//! Each stage, every point reads the fields arriving from both blocks,
//! adds the imposed load, resolves the normal direction (faces stay in
//! contact unless the total normal traction would be tensile) and then
//! intersects the radiation-damping line with the friction law's
//! strength along the direction of the locked shear traction.
//!
//! Constructed via the builder pattern: [`FrictionInterface::builder`].

use rupture_arena::{FieldStore, PointArena};
use rupture_core::{
    BoundaryFieldPair, BoundaryFields, ConfigError, FaultMode, FieldSource, InterfaceError,
    InterfaceFields, InterfaceGeometry, InterfaceId, LocalVector, PointKey,
};
use rupture_interface::{Interface, InterfaceContext, InterfaceKind, PhaseCensus, StageGuard};

use crate::characteristic::{checked_pair, face_velocities, stress_transfer};
use crate::law::{FrictionLaw, StrengthInput};
use crate::load::LoadSet;
use crate::point::PointState;
use crate::solve::{solve_fs, SlipPhase};

/// Slip rate above which a point counts as ruptured.
pub const DEFAULT_FRONT_THRESHOLD: f64 = 1e-3;

/// Output fields, in the order they are declared in the field store.
const OUTPUT_FIELDS: [(&str, fn(&PointState) -> f64); 12] = [
    ("U", |p| p.u),
    ("U2", |p| p.u2),
    ("U3", |p| p.u3),
    ("V", |p| p.v),
    ("V2", |p| p.v2),
    ("V3", |p| p.v3),
    ("S", |p| p.s),
    ("S2", |p| p.s2),
    ("S3", |p| p.s3),
    ("Sn", |p| p.sn),
    ("psi", |p| p.psi),
    ("trup", |p| p.rupture_time.unwrap_or(-1.0)),
];

/// Outcome of the interface solve at one point.
struct PointSolution {
    traction: LocalVector,
    slip_rate: LocalVector,
    v: f64,
    phase: SlipPhase,
    state_rate: f64,
    fields: InterfaceFields,
}

/// A frictional interface between two blocks.
pub struct FrictionInterface {
    name: String,
    id: InterfaceId,
    mode: FaultMode,
    geometry: InterfaceGeometry,
    law: Box<dyn FrictionLaw>,
    loads: LoadSet,
    front_threshold: f64,
    points: PointArena<PointState>,
    flat: Vec<usize>,
    store: FieldStore,
    guard: StageGuard,
    census: PhaseCensus,
    time: f64,
    step: u64,
}

/// Builder for [`FrictionInterface`].
///
/// Required fields: `name`, `geometry` and `law`.
pub struct FrictionInterfaceBuilder {
    name: Option<String>,
    id: InterfaceId,
    mode: FaultMode,
    geometry: Option<InterfaceGeometry>,
    law: Option<Box<dyn FrictionLaw>>,
    loads: LoadSet,
    front_threshold: f64,
}

impl FrictionInterface {
    /// Create a new builder.
    pub fn builder() -> FrictionInterfaceBuilder {
        FrictionInterfaceBuilder {
            name: None,
            id: InterfaceId(0),
            mode: FaultMode::ThreeD,
            geometry: None,
            law: None,
            loads: LoadSet::default(),
            front_threshold: DEFAULT_FRONT_THRESHOLD,
        }
    }

    /// Active field components.
    pub fn mode(&self) -> FaultMode {
        self.mode
    }

    /// The friction law.
    pub fn law(&self) -> &dyn FrictionLaw {
        self.law.as_ref()
    }

    /// Imposed loads.
    pub fn loads(&self) -> &LoadSet {
        &self.loads
    }

    /// Point layout.
    pub fn geometry(&self) -> &InterfaceGeometry {
        &self.geometry
    }

    /// Number of interface points.
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// State of the point `key`.
    pub fn point(&self, key: &PointKey) -> Option<&PointState> {
        self.points.get_by_key(key)
    }

    fn non_finite(&self, point: PointKey, quantity: &'static str) -> InterfaceError {
        InterfaceError::NonFinite {
            interface: self.name.clone(),
            point,
            quantity,
            time: self.time,
            step: self.step,
        }
    }

    /// Enforce the interface condition at one point.
    fn solve_point(
        &self,
        key: PointKey,
        slot: usize,
        point: &PointState,
        pair: &BoundaryFieldPair,
        load: LocalVector,
    ) -> Result<PointSolution, InterfaceError> {
        let st = stress_transfer(pair);
        let phi = self.mode.mask(st.phi + load);

        // Normal direction: contact unless the total traction is tensile.
        let (sn, vn) = if !self.mode.has_normal() {
            (load.n, 0.0)
        } else if phi.n > 0.0 {
            (0.0, phi.n / st.eta_n)
        } else {
            (phi.n, 0.0)
        };

        let input = StrengthInput {
            compression: (-sn).max(0.0),
            slip: point.u,
            state: point.psi,
            time: self.time,
            slot,
        };
        let phi_shear = phi.shear_magnitude();
        let bc = solve_fs(phi_shear, st.eta_s, self.law.as_ref(), &input).map_err(|reason| {
            InterfaceError::Solve {
                interface: self.name.clone(),
                point: key,
                reason,
            }
        })?;

        let (d2, d3) = if phi_shear > 0.0 {
            (phi.t2 / phi_shear, phi.t3 / phi_shear)
        } else {
            (0.0, 0.0)
        };
        let traction = LocalVector::new(sn, bc.tau * d2, bc.tau * d3);
        let slip_rate = LocalVector::new(vn, bc.v * d2, bc.v * d3);
        if !traction.is_finite() {
            return Err(self.non_finite(key, "traction"));
        }
        if !slip_rate.is_finite() {
            return Err(self.non_finite(key, "slip rate"));
        }

        let field_traction = self.mode.mask(traction - load);
        let (v_minus, v_plus) = face_velocities(pair, field_traction);
        let fields = InterfaceFields {
            minus: BoundaryFields::new(self.mode.mask(v_minus), field_traction),
            plus: BoundaryFields::new(self.mode.mask(v_plus), field_traction),
        };
        if !fields.is_finite() {
            return Err(self.non_finite(key, "face velocity"));
        }

        let state_rate = self.law.state_rate(&input, bc.v);
        if !state_rate.is_finite() {
            return Err(self.non_finite(key, "state rate"));
        }
        Ok(PointSolution {
            traction,
            slip_rate,
            v: bc.v,
            phase: bc.phase,
            state_rate,
            fields,
        })
    }
}

impl FrictionInterfaceBuilder {
    /// Interface name. Must be non-empty.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Interface index (default: 0).
    pub fn id(mut self, id: InterfaceId) -> Self {
        self.id = id;
        self
    }

    /// Active field components (default: [`FaultMode::ThreeD`]).
    pub fn mode(mut self, mode: FaultMode) -> Self {
        self.mode = mode;
        self
    }

    /// Point layout.
    pub fn geometry(mut self, geometry: InterfaceGeometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    /// Friction law.
    pub fn law(mut self, law: Box<dyn FrictionLaw>) -> Self {
        self.law = Some(law);
        self
    }

    /// Imposed loads (default: none).
    pub fn loads(mut self, loads: LoadSet) -> Self {
        self.loads = loads;
        self
    }

    /// Rupture-front slip-rate threshold (default:
    /// [`DEFAULT_FRONT_THRESHOLD`]). Must be finite and > 0.
    pub fn front_threshold(mut self, threshold: f64) -> Self {
        self.front_threshold = threshold;
        self
    }

    /// Build the interface, validating all configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameter`] if a required field is
    /// missing, the threshold or background load is out of range, or the
    /// law's per-point parameters do not match the point count.
    pub fn build(self) -> Result<FrictionInterface, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidParameter { reason };
        let name = self
            .name
            .filter(|n| !n.is_empty())
            .ok_or_else(|| invalid("interface name is required".to_string()))?;
        let geometry = self
            .geometry
            .ok_or_else(|| invalid(format!("interface '{name}': geometry is required")))?;
        let law = self
            .law
            .ok_or_else(|| invalid(format!("interface '{name}': friction law is required")))?;
        if !(self.front_threshold > 0.0) || !self.front_threshold.is_finite() {
            return Err(invalid(format!(
                "interface '{name}': front threshold must be finite and > 0, got {}",
                self.front_threshold
            )));
        }
        if !self.loads.background().is_finite() {
            return Err(invalid(format!(
                "interface '{name}': background traction must be finite"
            )));
        }
        law.check_points(geometry.point_count())?;

        let points = PointArena::from_keys(geometry.points().map(|(key, _)| key), |slot, _| {
            PointState::new(law.initial_state(slot.index()))
        })?;
        let flat: Vec<usize> = geometry
            .points()
            .map(|(_, global)| geometry.flat_index(global))
            .collect();
        let [n1, n2] = geometry.shape();
        let names: Vec<&str> = OUTPUT_FIELDS.iter().map(|(n, _)| *n).collect();
        let mut store = FieldStore::new([n1, n2, 1], &names)?;
        if let Some(trup) = store.write("trup") {
            trup.fill(-1.0);
        }

        tracing::info!(
            interface = %name,
            points = points.len(),
            law = law.name(),
            mode = ?self.mode,
            loads = self.loads.perturbation_count(),
            "friction interface ready"
        );
        Ok(FrictionInterface {
            name,
            id: self.id,
            mode: self.mode,
            geometry,
            law,
            loads: self.loads,
            front_threshold: self.front_threshold,
            points,
            flat,
            store,
            guard: StageGuard::new(),
            census: PhaseCensus::default(),
            time: 0.0,
            step: 0,
        })
    }
}

impl Interface for FrictionInterface {
    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> InterfaceId {
        self.id
    }

    fn kind(&self) -> InterfaceKind {
        InterfaceKind::Friction
    }

    fn scale_df(&mut self, a: f64) {
        for point in self.points.values_mut() {
            point.scale(a);
        }
    }

    fn calc_df(&mut self, dt: f64, ctx: &mut InterfaceContext<'_>) -> Result<(), InterfaceError> {
        self.guard.on_calc_df(ctx.time());
        self.time = ctx.time();
        self.step = ctx.step();
        let load = self.loads.at(self.time);

        let keys: Vec<PointKey> = self.points.iter().map(|(_, key, _)| key).collect();
        let mut census = PhaseCensus::default();
        for (slot, key) in keys.into_iter().enumerate() {
            let pair = checked_pair(ctx, &self.name, self.id, key)?;
            let Some(point) = self.points.get_by_key(&key) else {
                continue;
            };
            let sol = self.solve_point(key, slot, point, &pair, load)?;
            ctx.solved().write(self.id, key, &sol.fields);

            let (time, threshold) = (self.time, self.front_threshold);
            let Some(point) = self.points.get_by_key_mut(&key) else {
                continue;
            };
            if point.phase != sol.phase {
                tracing::trace!(
                    interface = %self.name,
                    point = %key,
                    from = ?point.phase,
                    to = ?sol.phase,
                    time,
                    "phase change"
                );
            }
            point.set_solution(sol.traction, sol.slip_rate, sol.v);
            point.phase = sol.phase;
            point.solved = sol.fields;
            point.accumulate(dt, sol.state_rate);
            if point.mark_front(time, threshold) {
                tracing::trace!(interface = %self.name, point = %key, time, "rupture front");
            }
            match point.phase {
                SlipPhase::Locked => census.locked += 1,
                SlipPhase::Slipping => census.slipping += 1,
            }
            if point.rupture_time.is_some() {
                census.ruptured += 1;
            }
        }
        self.census = census;
        Ok(())
    }

    fn update(&mut self, b: f64) -> Result<(), InterfaceError> {
        self.guard.on_update();
        let mut bad = None;
        for (_, key, point) in self.points.iter_mut() {
            point.commit(b);
            if bad.is_none() {
                if let Some(quantity) = point.first_non_finite() {
                    bad = Some((key, quantity));
                }
            }
        }
        match bad {
            Some((key, quantity)) => Err(self.non_finite(key, quantity)),
            None => Ok(()),
        }
    }

    fn write_fields(&mut self) {
        for (name, get) in OUTPUT_FIELDS {
            let Some(buf) = self.store.write(name) else {
                continue;
            };
            for (handle, _, point) in self.points.iter() {
                buf[self.flat[handle.index()]] = get(point);
            }
        }
    }

    fn fields(&self) -> &dyn FieldSource {
        &self.store
    }

    fn census(&self) -> PhaseCensus {
        self.census
    }
}
