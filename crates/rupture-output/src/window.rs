//! Time and space windows of an output unit.

/// An inclusive, strided index range along one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AxisWindow {
    /// First index.
    pub min: usize,
    /// Last index that may be written (inclusive).
    pub max: usize,
    /// Step between written indices.
    pub stride: usize,
}

impl AxisWindow {
    /// Construct from bounds and stride.
    pub const fn new(min: usize, max: usize, stride: usize) -> Self {
        Self { min, max, stride }
    }

    /// Number of indices visited.
    pub fn count(&self) -> usize {
        if self.stride == 0 || self.max < self.min {
            return 0;
        }
        (self.max - self.min) / self.stride + 1
    }

    /// The visited indices, ascending.
    pub fn indices(&self) -> impl Iterator<Item = usize> {
        (self.min..=self.max).step_by(self.stride.max(1))
    }

    /// Largest index actually visited.
    pub fn last(&self) -> usize {
        self.min + self.count().saturating_sub(1) * self.stride
    }

    fn validate(&self, what: &str) -> Result<(), String> {
        if self.stride == 0 {
            return Err(format!("{what} stride must be > 0"));
        }
        if self.min > self.max {
            return Err(format!(
                "{what} minimum {} exceeds maximum {}",
                self.min, self.max
            ));
        }
        Ok(())
    }
}

/// When and where an output unit samples its field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputWindow {
    /// Time-step window.
    pub time: AxisWindow,
    /// Spatial windows along the field's three axes.
    pub space: [AxisWindow; 3],
}

impl OutputWindow {
    /// Check every stride is positive and every range is ordered.
    ///
    /// # Errors
    ///
    /// Returns `Err` describing the first bad range.
    pub fn validate(&self) -> Result<(), String> {
        self.time.validate("time")?;
        for (axis, w) in self.space.iter().enumerate() {
            w.validate(&format!("axis {axis}"))?;
        }
        Ok(())
    }

    /// Whether step `tstep` is sampled.
    pub fn samples_step(&self, tstep: usize) -> bool {
        tstep >= self.time.min
            && tstep <= self.time.max
            && (tstep - self.time.min) % self.time.stride.max(1) == 0
    }

    /// Number of values written per sampled step.
    pub fn points_per_step(&self) -> usize {
        self.space.iter().map(AxisWindow::count).product()
    }

    /// Clamp the last time step to `nt`.
    ///
    /// A window starting after `nt` comes back with `time.min >
    /// time.max` and samples no step.
    pub fn clamp_steps(mut self, nt: usize) -> Self {
        self.time.max = self.time.max.min(nt);
        self
    }
}
