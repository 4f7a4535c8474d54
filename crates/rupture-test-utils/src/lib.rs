//! Test utilities and mock types for Rupture development.
//!
//! Provides mock implementations of core traits ([`BoundaryReader`],
//! [`BoundaryWriter`], [`FieldSource`], [`BlockLayer`]) and reusable
//! interface fixtures in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::collections::HashMap;

use rupture_core::{
    BlockError, BlockLayer, BoundaryFieldPair, BoundaryFields, BoundaryReader, BoundaryWriter,
    FieldSource, FieldView, Impedance, InterfaceFields, InterfaceId, LocalVector, PointKey,
};

pub use fixtures::{FailingInterface, RecordingInterface, StageCall};

/// A boundary pair with equal impedances on both sides.
///
/// `zs` is the S impedance; the P impedance is set to twice it.
pub fn symmetric_pair(
    v_minus: LocalVector,
    s_minus: LocalVector,
    v_plus: LocalVector,
    s_plus: LocalVector,
    zs: f64,
) -> BoundaryFieldPair {
    let z = Impedance::new(2.0 * zs, zs);
    BoundaryFieldPair {
        minus: BoundaryFields::new(v_minus, s_minus),
        plus: BoundaryFields::new(v_plus, s_plus),
        z_minus: z,
        z_plus: z,
    }
}

/// Mock implementation of [`BoundaryReader`].
///
/// Backed by a `HashMap<(InterfaceId, PointKey), BoundaryFieldPair>`.
/// Pre-populate with [`set_pair`](MockBoundaryReader::set_pair) before
/// passing to code under test.
#[derive(Default)]
pub struct MockBoundaryReader {
    pairs: HashMap<(InterfaceId, PointKey), BoundaryFieldPair>,
}

impl MockBoundaryReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pair returned for one point.
    pub fn set_pair(&mut self, iface: InterfaceId, key: PointKey, pair: BoundaryFieldPair) {
        self.pairs.insert((iface, key), pair);
    }

    /// Set the same pair for every key.
    pub fn set_uniform(
        &mut self,
        iface: InterfaceId,
        keys: impl IntoIterator<Item = PointKey>,
        pair: BoundaryFieldPair,
    ) {
        for key in keys {
            self.set_pair(iface, key, pair);
        }
    }

    /// Remove the pair for one point.
    pub fn remove(&mut self, iface: InterfaceId, key: PointKey) {
        self.pairs.remove(&(iface, key));
    }
}

impl BoundaryReader for MockBoundaryReader {
    fn pair(&self, iface: InterfaceId, key: PointKey) -> Option<BoundaryFieldPair> {
        self.pairs.get(&(iface, key)).copied()
    }
}

/// Mock implementation of [`BoundaryWriter`].
///
/// Keeps the last fields written per point. Inspect results with
/// [`get`](MockBoundaryWriter::get).
#[derive(Default)]
pub struct MockBoundaryWriter {
    solved: HashMap<(InterfaceId, PointKey), InterfaceFields>,
    writes: usize,
}

impl MockBoundaryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last fields written for a point.
    pub fn get(&self, iface: InterfaceId, key: PointKey) -> Option<&InterfaceFields> {
        self.solved.get(&(iface, key))
    }

    /// Total number of `write` calls.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl BoundaryWriter for MockBoundaryWriter {
    fn write(&mut self, iface: InterfaceId, key: PointKey, fields: &InterfaceFields) {
        self.writes += 1;
        self.solved.insert((iface, key), *fields);
    }
}

/// Mock implementation of [`FieldSource`].
///
/// Backed by a `HashMap<String, (Vec<f64>, [usize; 3])>`.
#[derive(Default)]
pub struct MockFieldSource {
    fields: HashMap<String, (Vec<f64>, [usize; 3])>,
}

impl MockFieldSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a field.
    ///
    /// # Panics
    ///
    /// If `data.len()` does not match `shape`.
    pub fn set_field(&mut self, name: impl Into<String>, shape: [usize; 3], data: Vec<f64>) {
        assert_eq!(
            data.len(),
            shape.iter().product::<usize>(),
            "field data does not match shape"
        );
        self.fields.insert(name.into(), (data, shape));
    }

    /// Mutable data of an existing field.
    pub fn data_mut(&mut self, name: &str) -> Option<&mut [f64]> {
        self.fields.get_mut(name).map(|(d, _)| d.as_mut_slice())
    }
}

impl FieldSource for MockFieldSource {
    fn field(&self, name: &str) -> Option<FieldView<'_>> {
        self.fields
            .get(name)
            .map(|(data, shape)| FieldView { data, shape: *shape })
    }

    fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fields.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// One call received by a [`MockBlockLayer`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BlockCall {
    Exchange,
    ScaleDf(f64),
    CalcDf { dt: f64, time: f64 },
    Update(f64),
}

/// Mock implementation of [`BlockLayer`].
///
/// Serves fixed boundary pairs from [`boundary`](MockBlockLayer::boundary),
/// collects solved fields in [`solved`](MockBlockLayer::solved), and
/// records every stage call. Optionally fails the n-th exchange.
#[derive(Default)]
pub struct MockBlockLayer {
    pub boundary: MockBoundaryReader,
    pub solved: MockBoundaryWriter,
    pub fields: MockFieldSource,
    calls: Vec<BlockCall>,
    fail_exchange_at: Option<usize>,
    exchanges: usize,
}

impl MockBlockLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the exchange with zero-based index `n` fail.
    pub fn fail_exchange_at(mut self, n: usize) -> Self {
        self.fail_exchange_at = Some(n);
        self
    }

    /// Every call received, in order.
    pub fn calls(&self) -> &[BlockCall] {
        &self.calls
    }
}

impl BlockLayer for MockBlockLayer {
    fn exchange(&mut self) -> Result<(), BlockError> {
        let n = self.exchanges;
        self.exchanges += 1;
        self.calls.push(BlockCall::Exchange);
        if self.fail_exchange_at == Some(n) {
            return Err(BlockError::ExchangeFailed {
                reason: format!("deliberate failure at exchange {n}"),
            });
        }
        Ok(())
    }

    fn scale_df(&mut self, a: f64) {
        self.calls.push(BlockCall::ScaleDf(a));
    }

    fn calc_df(&mut self, dt: f64, time: f64) -> Result<(), BlockError> {
        self.calls.push(BlockCall::CalcDf { dt, time });
        Ok(())
    }

    fn update(&mut self, b: f64) -> Result<(), BlockError> {
        self.calls.push(BlockCall::Update(b));
        Ok(())
    }

    fn boundary_io(&mut self) -> (&dyn BoundaryReader, &mut dyn BoundaryWriter) {
        (&self.boundary, &mut self.solved)
    }

    fn fields(&self) -> &dyn FieldSource {
        &self.fields
    }
}
