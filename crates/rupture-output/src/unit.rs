//! A single output unit: one field, one window, three files.
//!
//! File layout under `{data_dir}`:
//!
//! ```text
//! {problem}_{name}_{field}.dat   samples, little-endian f64, row-major window
//! {problem}_{name}_t.dat         sample times, little-endian f64
//! {problem}_{name}.o             text metadata, written at close
//! ```
//!
//! Data files are created on the first sampled step and appended to on
//! every later one.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use rupture_core::{FieldSource, FieldView};

use crate::error::OutputError;
use crate::window::OutputWindow;

struct UnitFiles {
    data: BufWriter<File>,
    times: BufWriter<File>,
}

/// One declared output: a field sampled over a time and space window.
pub struct OutputUnit {
    name: String,
    field: String,
    window: OutputWindow,
    prefix: PathBuf,
    files: Option<UnitFiles>,
    count: usize,
    closed: bool,
}

impl OutputUnit {
    /// A unit writing under `data_dir` with file names prefixed by
    /// `{problem}_{name}`.
    pub fn new(
        problem: &str,
        data_dir: impl AsRef<Path>,
        name: impl Into<String>,
        field: impl Into<String>,
        window: OutputWindow,
    ) -> Self {
        let name = name.into();
        let prefix = data_dir.as_ref().join(format!("{problem}_{name}"));
        Self {
            name,
            field: field.into(),
            window,
            prefix,
            files: None,
            count: 0,
            closed: false,
        }
    }

    /// Unit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sampled field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Time and space window.
    pub fn window(&self) -> &OutputWindow {
        &self.window
    }

    /// Number of steps written so far.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether the data files are open.
    pub fn is_open(&self) -> bool {
        self.files.is_some()
    }

    fn with_suffix(&self, suffix: &str) -> PathBuf {
        let mut name = self.prefix.as_os_str().to_owned();
        name.push(suffix);
        PathBuf::from(name)
    }

    /// Path of the sample file.
    pub fn data_path(&self) -> PathBuf {
        self.with_suffix(&format!("_{}.dat", self.field))
    }

    /// Path of the time file.
    pub fn time_path(&self) -> PathBuf {
        self.with_suffix("_t.dat")
    }

    /// Path of the metadata file.
    pub fn metadata_path(&self) -> PathBuf {
        self.with_suffix(".o")
    }

    /// Resolve the field and check the window fits inside it.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::UnknownField`] or
    /// [`OutputError::WindowOutOfBounds`].
    pub fn check<'s>(&self, source: &'s dyn FieldSource) -> Result<FieldView<'s>, OutputError> {
        let view = source
            .field(&self.field)
            .ok_or_else(|| OutputError::UnknownField {
                unit: self.name.clone(),
                field: self.field.clone(),
            })?;
        for (axis, w) in self.window.space.iter().enumerate() {
            if w.last() >= view.shape[axis] {
                return Err(OutputError::WindowOutOfBounds {
                    unit: self.name.clone(),
                    axis,
                    max: w.last(),
                    extent: view.shape[axis],
                });
            }
        }
        Ok(view)
    }

    fn open(&mut self) -> Result<&mut UnitFiles, OutputError> {
        if self.files.is_none() {
            let create = |path: PathBuf| {
                File::create(&path)
                    .map(BufWriter::new)
                    .map_err(|e| OutputError::io(&path, &e))
            };
            let data = create(self.data_path())?;
            let times = create(self.time_path())?;
            tracing::debug!(unit = %self.name, path = %self.data_path().display(), "output opened");
            self.files = Some(UnitFiles { data, times });
        }
        let path = self.data_path().display().to_string();
        self.files.as_mut().ok_or_else(|| OutputError::Io {
            path,
            reason: "output file not open".to_string(),
        })
    }

    /// Append the windowed field if step `tstep` is sampled.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`check`](OutputUnit::check), or
    /// [`OutputError::Io`] if a file cannot be created or written.
    pub fn write_unit(
        &mut self,
        tstep: usize,
        dt: f64,
        source: &dyn FieldSource,
    ) -> Result<(), OutputError> {
        if self.closed || !self.window.samples_step(tstep) {
            return Ok(());
        }
        let view = self.check(source)?;
        let [_, n1, n2] = view.shape;
        let [w0, w1, w2] = self.window.space;
        let mut buf = Vec::with_capacity(self.window.points_per_step() * 8);
        for i in w0.indices() {
            for j in w1.indices() {
                for k in w2.indices() {
                    let value = view.data[(i * n1 + j) * n2 + k];
                    buf.extend_from_slice(&value.to_le_bytes());
                }
            }
        }
        let time = tstep as f64 * dt;

        let (data_path, time_path) = (self.data_path(), self.time_path());
        let files = self.open()?;
        files
            .data
            .write_all(&buf)
            .map_err(|e| OutputError::io(&data_path, &e))?;
        files
            .times
            .write_all(&time.to_le_bytes())
            .map_err(|e| OutputError::io(&time_path, &e))?;
        self.count += 1;
        Ok(())
    }

    /// Flush and close the data files and write the metadata file.
    ///
    /// Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::Io`] if flushing or writing fails.
    pub fn close_file(&mut self) -> Result<(), OutputError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        if let Some(mut files) = self.files.take() {
            files
                .data
                .flush()
                .map_err(|e| OutputError::io(&self.data_path(), &e))?;
            files
                .times
                .flush()
                .map_err(|e| OutputError::io(&self.time_path(), &e))?;
        }
        let path = self.metadata_path();
        std::fs::write(&path, self.metadata()).map_err(|e| OutputError::io(&path, &e))?;
        tracing::info!(unit = %self.name, field = %self.field, steps = self.count, "output closed");
        Ok(())
    }

    /// Text of the metadata file.
    pub fn metadata(&self) -> String {
        let w = &self.window;
        let mut text = format!(
            "field {}\nnt {}\nt {} {} {}\n",
            self.field, self.count, w.time.min, w.time.max, w.time.stride
        );
        for (axis, x) in w.space.iter().enumerate() {
            text.push_str(&format!(
                "x{axis} {} {} {} {}\n",
                x.min,
                x.max,
                x.stride,
                x.count()
            ));
        }
        text.push_str("endian little\n");
        text
    }
}

impl std::fmt::Debug for OutputUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputUnit")
            .field("name", &self.name)
            .field("field", &self.field)
            .field("window", &self.window)
            .field("count", &self.count)
            .field("open", &self.is_open())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::AxisWindow;
    use rupture_test_utils::MockFieldSource;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("rupture-unit-{tag}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn window(time: AxisWindow, x0: AxisWindow) -> OutputWindow {
        OutputWindow {
            time,
            space: [x0, AxisWindow::new(0, 0, 1), AxisWindow::new(0, 0, 1)],
        }
    }

    fn source() -> MockFieldSource {
        let mut src = MockFieldSource::new();
        src.set_field("U", [4, 1, 1], vec![1.0, 2.0, 3.0, 4.0]);
        src
    }

    fn read_f64(path: &Path) -> Vec<f64> {
        std::fs::read(path)
            .unwrap()
            .chunks_exact(8)
            .map(|c| f64::from_le_bytes(c.try_into().unwrap()))
            .collect()
    }

    #[test]
    fn samples_window_and_times() {
        let dir = temp_dir("samples");
        let mut unit = OutputUnit::new(
            "prob",
            &dir,
            "slip",
            "U",
            window(AxisWindow::new(0, 4, 2), AxisWindow::new(1, 3, 2)),
        );
        let src = source();
        for t in 0..=4 {
            unit.write_unit(t, 0.5, &src).unwrap();
        }
        unit.close_file().unwrap();
        assert_eq!(unit.count(), 3);
        assert_eq!(unit.data_path(), dir.join("prob_slip_U.dat"));
        assert_eq!(read_f64(&unit.data_path()), vec![2.0, 4.0, 2.0, 4.0, 2.0, 4.0]);
        assert_eq!(read_f64(&unit.time_path()), vec![0.0, 1.0, 2.0]);
        let meta = std::fs::read_to_string(dir.join("prob_slip.o")).unwrap();
        assert!(meta.starts_with("field U\nnt 3\n"));
        assert!(meta.contains("x0 1 3 2 2\n"));
    }

    #[test]
    fn file_is_not_created_before_first_sample() {
        let dir = temp_dir("lazy");
        let mut unit = OutputUnit::new(
            "prob",
            &dir,
            "late",
            "U",
            window(AxisWindow::new(5, 9, 1), AxisWindow::new(0, 0, 1)),
        );
        unit.write_unit(0, 1.0, &source()).unwrap();
        assert!(!unit.is_open());
        unit.write_unit(5, 1.0, &source()).unwrap();
        assert!(unit.is_open());
    }

    #[test]
    fn later_samples_append_to_the_open_files() {
        let dir = temp_dir("append");
        let mut unit = OutputUnit::new(
            "prob",
            &dir,
            "grow",
            "U",
            window(AxisWindow::new(0, 2, 1), AxisWindow::new(0, 0, 1)),
        );
        let src = source();
        unit.write_unit(0, 1.0, &src).unwrap();
        unit.write_unit(1, 1.0, &src).unwrap();
        assert!(unit.is_open());
        unit.write_unit(2, 1.0, &src).unwrap();
        unit.close_file().unwrap();
        assert_eq!(read_f64(&unit.data_path()), vec![1.0, 1.0, 1.0]);
        assert_eq!(read_f64(&unit.time_path()), vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn unknown_field_and_oversized_window_are_errors() {
        let dir = temp_dir("errors");
        let unit = OutputUnit::new(
            "prob",
            &dir,
            "bad",
            "V",
            window(AxisWindow::new(0, 0, 1), AxisWindow::new(0, 0, 1)),
        );
        assert_eq!(
            unit.check(&source()).unwrap_err(),
            OutputError::UnknownField {
                unit: "bad".into(),
                field: "V".into()
            }
        );
        let unit = OutputUnit::new(
            "prob",
            &dir,
            "wide",
            "U",
            window(AxisWindow::new(0, 0, 1), AxisWindow::new(0, 4, 1)),
        );
        assert!(matches!(
            unit.check(&source()).unwrap_err(),
            OutputError::WindowOutOfBounds {
                axis: 0,
                max: 4,
                extent: 4,
                ..
            }
        ));
    }

    #[test]
    fn close_is_idempotent_and_stops_writing() {
        let dir = temp_dir("close");
        let mut unit = OutputUnit::new(
            "prob",
            &dir,
            "once",
            "U",
            window(AxisWindow::new(0, 10, 1), AxisWindow::new(0, 0, 1)),
        );
        unit.write_unit(0, 1.0, &source()).unwrap();
        unit.close_file().unwrap();
        unit.close_file().unwrap();
        unit.write_unit(1, 1.0, &source()).unwrap();
        assert_eq!(unit.count(), 1);
    }
}
