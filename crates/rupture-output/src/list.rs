//! The ordered list of output units declared in an input file.

use std::path::{Path, PathBuf};

use rupture_core::{ConfigError, FieldSource, InputFile};

use crate::error::OutputError;
use crate::unit::OutputUnit;
use crate::window::{AxisWindow, OutputWindow};

/// Marker line opening the output declarations.
pub const OUTPUT_MARKER: &str = "[rupture.outputlist]";

/// Tokens on a declaration's field line: the field name followed by
/// time, axis 0, axis 1 and axis 2 windows as `min max stride`.
const DECLARATION_TOKENS: usize = 13;

/// Every declared output unit, in declaration order.
#[derive(Debug, Default)]
pub struct OutputList {
    units: Vec<OutputUnit>,
}

impl OutputList {
    /// An empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the output declarations from the input file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, and the
    /// errors of [`parse`](OutputList::parse) otherwise.
    pub fn from_input(
        path: impl AsRef<Path>,
        problem: &str,
        data_dir: impl AsRef<Path>,
        nt: usize,
    ) -> Result<Self, ConfigError> {
        let input = InputFile::from_path(path)?;
        Self::parse(&input, problem, data_dir, nt)
    }

    /// Parse the `[rupture.outputlist]` section of `input`.
    ///
    /// Time windows are clamped to `nt`; a window starting after `nt`
    /// is an error.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingSection`] if the marker is absent,
    /// [`ConfigError::UnexpectedEof`] if a name line has no field line,
    /// and [`ConfigError::Parse`] for a malformed field line or an
    /// invalid window.
    pub fn parse(
        input: &InputFile,
        problem: &str,
        data_dir: impl AsRef<Path>,
        nt: usize,
    ) -> Result<Self, ConfigError> {
        let data_dir: PathBuf = data_dir.as_ref().to_path_buf();
        let mut section = input.section(OUTPUT_MARKER)?;
        let mut list = Self::new();
        while let Some((_, name_line)) = section.next_line() {
            let name = name_line.split_whitespace().next().unwrap_or(name_line);
            let (line, text) = section.expect_line()?;
            let mut tokens = text.split_whitespace();
            let field = tokens.next().unwrap_or_default();
            let rest: Vec<&str> = tokens.collect();
            let values: Vec<usize> = section.parse_tokens(line, &rest.join(" "), None)?;
            if values.len() + 1 != DECLARATION_TOKENS {
                return Err(section.error_at(
                    line,
                    format!(
                        "expected {DECLARATION_TOKENS} values (field and four windows), found {}",
                        values.len() + 1
                    ),
                ));
            }
            let axis = |at: usize| AxisWindow::new(values[at], values[at + 1], values[at + 2]);
            let window = OutputWindow {
                time: axis(0),
                space: [axis(3), axis(6), axis(9)],
            };
            window
                .validate()
                .map_err(|reason| section.error_at(line, format!("output '{name}': {reason}")))?;
            let window = window.clamp_steps(nt);
            if window.time.min > window.time.max {
                return Err(section.error_at(
                    line,
                    format!(
                        "output '{name}': first step {} is past the last step {nt}",
                        window.time.min
                    ),
                ));
            }
            list.units.push(OutputUnit::new(problem, &data_dir, name, field, window));
        }
        tracing::info!(source = input.source(), units = list.len(), "output list read");
        Ok(list)
    }

    /// Append a unit.
    pub fn push(&mut self, unit: OutputUnit) {
        self.units.push(unit);
    }

    /// Number of units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether no unit is declared.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Units in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &OutputUnit> {
        self.units.iter()
    }

    /// Check every unit resolves its field within bounds.
    ///
    /// # Errors
    ///
    /// Returns the first unit's [`OutputError`].
    pub fn check(&self, source: &dyn FieldSource) -> Result<(), OutputError> {
        self.units.iter().try_for_each(|u| u.check(source).map(|_| ()))
    }

    /// Let every unit sample step `tstep`.
    ///
    /// # Errors
    ///
    /// Returns the first unit's [`OutputError`].
    pub fn write_list(
        &mut self,
        tstep: usize,
        dt: f64,
        source: &dyn FieldSource,
    ) -> Result<(), OutputError> {
        for unit in &mut self.units {
            unit.write_unit(tstep, dt, source)?;
        }
        Ok(())
    }

    /// Close every unit, writing its metadata.
    ///
    /// Every unit is closed even if an earlier one fails; the first
    /// failure is returned.
    ///
    /// # Errors
    ///
    /// Returns the first unit's [`OutputError`].
    pub fn close_list(&mut self) -> Result<(), OutputError> {
        let mut first = None;
        for unit in &mut self.units {
            if let Err(e) = unit.close_file() {
                tracing::error!(unit = unit.name(), error = %e, "output close failed");
                first.get_or_insert(e);
            }
        }
        first.map_or(Ok(()), Err)
    }
}
