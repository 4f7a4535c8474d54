//! Reusable interface test fixtures.
//!
//! - [`RecordingInterface`] integrates a polynomial-in-time rate and
//!   records every stage call.
//! - [`FailingInterface`] fails deterministically after N stages.

use rupture_core::{BlockId, EmptyFieldSource, FieldSource, InterfaceError, InterfaceId, PointKey};
use rupture_interface::{Interface, InterfaceContext, InterfaceKind, PhaseCensus};

use crate::MockFieldSource;

/// One call received by a [`RecordingInterface`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StageCall {
    ScaleDf(f64),
    CalcDf { dt: f64, time: f64, stage: usize },
    Update(f64),
}

/// Integrates `du/dt = c0 + c1 t + c2 t^2 + ...` with the low-storage
/// protocol and records the calls it receives.
///
/// Exposes the integrated value as field `u` of shape `[1, 1, 1]`.
pub struct RecordingInterface {
    pub name: String,
    pub id: InterfaceId,
    coeffs: Vec<f64>,
    u: f64,
    du: f64,
    calls: Vec<StageCall>,
    fields: MockFieldSource,
}

impl RecordingInterface {
    /// A recorder with a zero rate.
    pub fn new(name: impl Into<String>, id: u32) -> Self {
        let mut fields = MockFieldSource::new();
        fields.set_field("u", [1, 1, 1], vec![0.0]);
        Self {
            name: name.into(),
            id: InterfaceId(id),
            coeffs: Vec::new(),
            u: 0.0,
            du: 0.0,
            calls: Vec::new(),
            fields,
        }
    }

    /// Set the rate polynomial coefficients, lowest order first.
    pub fn with_rate(mut self, coeffs: &[f64]) -> Self {
        self.coeffs = coeffs.to_vec();
        self
    }

    /// The integrated value.
    pub fn value(&self) -> f64 {
        self.u
    }

    /// Every call received, in order.
    pub fn calls(&self) -> &[StageCall] {
        &self.calls
    }

    fn rate(&self, t: f64) -> f64 {
        self.coeffs.iter().rev().fold(0.0, |acc, c| acc * t + c)
    }
}

impl Interface for RecordingInterface {
    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> InterfaceId {
        self.id
    }

    fn kind(&self) -> InterfaceKind {
        InterfaceKind::Locked
    }

    fn scale_df(&mut self, a: f64) {
        self.calls.push(StageCall::ScaleDf(a));
        self.du *= a;
    }

    fn calc_df(&mut self, dt: f64, ctx: &mut InterfaceContext<'_>) -> Result<(), InterfaceError> {
        self.calls.push(StageCall::CalcDf {
            dt,
            time: ctx.time(),
            stage: ctx.stage(),
        });
        self.du += dt * self.rate(ctx.time());
        Ok(())
    }

    fn update(&mut self, b: f64) -> Result<(), InterfaceError> {
        self.calls.push(StageCall::Update(b));
        self.u += b * self.du;
        Ok(())
    }

    fn write_fields(&mut self) {
        if let Some(data) = self.fields.data_mut("u") {
            data[0] = self.u;
        }
    }

    fn fields(&self) -> &dyn FieldSource {
        &self.fields
    }

    fn census(&self) -> PhaseCensus {
        PhaseCensus {
            locked: 1,
            ..PhaseCensus::default()
        }
    }
}

/// Fails deterministically after a configurable number of successful
/// `calc_df` calls.
///
/// Useful for testing error propagation to the abort point.
pub struct FailingInterface {
    pub name: String,
    pub id: InterfaceId,
    pub succeed_count: usize,
    calls: usize,
}

impl FailingInterface {
    /// An interface that succeeds `succeed_count` times then fails.
    pub fn new(name: impl Into<String>, id: u32, succeed_count: usize) -> Self {
        Self {
            name: name.into(),
            id: InterfaceId(id),
            succeed_count,
            calls: 0,
        }
    }

    /// How many times `calc_df` has been called.
    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl Interface for FailingInterface {
    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> InterfaceId {
        self.id
    }

    fn kind(&self) -> InterfaceKind {
        InterfaceKind::Friction
    }

    fn scale_df(&mut self, _a: f64) {}

    fn calc_df(&mut self, _dt: f64, ctx: &mut InterfaceContext<'_>) -> Result<(), InterfaceError> {
        let n = self.calls;
        self.calls += 1;
        if n >= self.succeed_count {
            return Err(InterfaceError::NonFinite {
                interface: self.name.clone(),
                point: PointKey::new(BlockId(0), 0, 0),
                quantity: "slip rate",
                time: ctx.time(),
                step: ctx.step(),
            });
        }
        Ok(())
    }

    fn update(&mut self, _b: f64) -> Result<(), InterfaceError> {
        Ok(())
    }

    fn write_fields(&mut self) {}

    fn fields(&self) -> &dyn FieldSource {
        &EmptyFieldSource
    }

    fn census(&self) -> PhaseCensus {
        PhaseCensus::default()
    }
}
