//! Externally imposed interface loads.
//!
//! A [`LoadPerturbation`] is a tabulated traction time series read from a
//! companion file. A [`LoadSet`] adds any number of them to a uniform
//! background traction (the initial stress state on the fault).
//!
//! # File format
//!
//! ```text
//! # t     sn     s2    s3
//! 0.0    0.0    0.0   0.0
//! 1.0    0.0    2.5   0.0
//! 2.0    0.0    2.5   0.0
//! ```
//!
//! Times must be strictly increasing. `#` starts a comment; blank lines
//! are ignored.

use std::path::Path;

use rupture_core::{ConfigError, LocalVector};
use smallvec::SmallVec;

/// A tabulated traction time series with clamped linear interpolation.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadPerturbation {
    times: Vec<f64>,
    values: Vec<LocalVector>,
}

impl LoadPerturbation {
    /// Build from records.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameter`] if `records` is empty,
    /// holds a non-finite value, or times are not strictly increasing.
    pub fn from_records(records: Vec<(f64, LocalVector)>) -> Result<Self, ConfigError> {
        if records.is_empty() {
            return Err(ConfigError::InvalidParameter {
                reason: "load perturbation has no records".to_string(),
            });
        }
        for (i, (t, v)) in records.iter().enumerate() {
            if !t.is_finite() || !v.is_finite() {
                return Err(ConfigError::InvalidParameter {
                    reason: format!("load perturbation record {i} is not finite"),
                });
            }
        }
        if let Some(i) = records.windows(2).position(|w| w[1].0 <= w[0].0) {
            return Err(ConfigError::InvalidParameter {
                reason: format!(
                    "load perturbation time {} at record {} does not increase",
                    records[i + 1].0,
                    i + 1
                ),
            });
        }
        let (times, values) = records.into_iter().unzip();
        Ok(Self { times, values })
    }

    /// Read a load file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or the
    /// errors of [`parse`](LoadPerturbation::parse).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::parse(&path.display().to_string(), &text)
    }

    /// Parse load-file text. `source` names it in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for a line without exactly four
    /// numbers or with times out of order, and
    /// [`ConfigError::InvalidParameter`] for an empty table.
    pub fn parse(source: &str, text: &str) -> Result<Self, ConfigError> {
        let mut records: Vec<(f64, LocalVector)> = Vec::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = match raw.find('#') {
                Some(at) => &raw[..at],
                None => raw,
            };
            if line.trim().is_empty() {
                continue;
            }
            let parse_err = |reason: String| ConfigError::Parse {
                source: source.to_string(),
                line: idx + 1,
                reason,
            };
            let values: Vec<f64> = line
                .split_whitespace()
                .map(|tok| {
                    tok.parse::<f64>()
                        .map_err(|_| parse_err(format!("cannot parse '{tok}'")))
                })
                .collect::<Result<_, _>>()?;
            let [t, sn, s2, s3] = values[..] else {
                return Err(parse_err(format!(
                    "expected 4 values (t sn s2 s3), found {}",
                    values.len()
                )));
            };
            if let Some(&(prev, _)) = records.last() {
                if t <= prev {
                    return Err(parse_err(format!(
                        "time {t} does not increase (previous {prev})"
                    )));
                }
            }
            records.push((t, LocalVector::new(sn, s2, s3)));
        }
        Self::from_records(records)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether the table is empty (never true after construction).
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// First and last tabulated time.
    pub fn time_range(&self) -> (f64, f64) {
        match (self.times.first(), self.times.last()) {
            (Some(&a), Some(&b)) => (a, b),
            _ => (0.0, 0.0),
        }
    }

    /// Traction at time `t`.
    ///
    /// - `t` at or before the first time: first value (clamped).
    /// - `t` at or after the last time: last value (clamped).
    /// - `t` equal to a tabulated time: that value.
    /// - Otherwise: linear interpolation between the bracketing records.
    pub fn at(&self, t: f64) -> LocalVector {
        let (Some(&first), Some(&last)) = (self.times.first(), self.times.last()) else {
            return LocalVector::ZERO;
        };
        if t <= first {
            return self.values[0];
        }
        if t >= last {
            return self.values[self.values.len() - 1];
        }
        // First index with time > t; t lies in [times[hi-1], times[hi]).
        let hi = self.times.partition_point(|&ti| ti <= t);
        let lo = hi - 1;
        if self.times[lo] == t {
            return self.values[lo];
        }
        let w = (t - self.times[lo]) / (self.times[hi] - self.times[lo]);
        self.values[lo] * (1.0 - w) + self.values[hi] * w
    }
}

/// Background traction plus any number of perturbations.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoadSet {
    background: LocalVector,
    perturbations: SmallVec<[LoadPerturbation; 2]>,
}

impl LoadSet {
    /// A set with only a background traction.
    pub fn new(background: LocalVector) -> Self {
        Self {
            background,
            perturbations: SmallVec::new(),
        }
    }

    /// Add a perturbation.
    pub fn with_perturbation(mut self, load: LoadPerturbation) -> Self {
        self.perturbations.push(load);
        self
    }

    /// The background traction.
    pub fn background(&self) -> LocalVector {
        self.background
    }

    /// Number of perturbations.
    pub fn perturbation_count(&self) -> usize {
        self.perturbations.len()
    }

    /// Total load at time `t`.
    pub fn at(&self, t: f64) -> LocalVector {
        self.perturbations
            .iter()
            .fold(self.background, |acc, p| acc + p.at(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TABLE: &str = "\
# ramp shear up then hold
0.0  -1.0  0.0  0.0
1.0  -1.0  2.0  0.0

2.0  -1.0  2.0  4.0  # hold
";

    #[test]
    fn endpoints_are_exact_and_clamped() {
        let load = LoadPerturbation::parse("table", TABLE).unwrap();
        assert_eq!(load.len(), 3);
        assert_eq!(load.at(0.0), LocalVector::new(-1.0, 0.0, 0.0));
        assert_eq!(load.at(-5.0), LocalVector::new(-1.0, 0.0, 0.0));
        assert_eq!(load.at(2.0), LocalVector::new(-1.0, 2.0, 4.0));
        assert_eq!(load.at(100.0), LocalVector::new(-1.0, 2.0, 4.0));
    }

    #[test]
    fn tabulated_times_are_exact() {
        let load = LoadPerturbation::parse("table", TABLE).unwrap();
        assert_eq!(load.at(1.0), LocalVector::new(-1.0, 2.0, 0.0));
    }

    #[test]
    fn interior_interpolates_linearly() {
        let load = LoadPerturbation::parse("table", TABLE).unwrap();
        let v = load.at(0.25);
        assert!((v.t2 - 0.5).abs() < 1e-12);
        let v = load.at(1.5);
        assert!((v.t3 - 2.0).abs() < 1e-12);
        assert_eq!(v.n, -1.0);
    }

    #[test]
    fn malformed_line_reports_location() {
        let err = LoadPerturbation::parse("bad.dat", "0.0 1.0 2.0 3.0\n1.0 oops 0 0\n").unwrap_err();
        assert_eq!(
            err,
            ConfigError::Parse {
                source: "bad.dat".into(),
                line: 2,
                reason: "cannot parse 'oops'".into(),
            }
        );
    }

    #[test]
    fn wrong_column_count_rejected() {
        let err = LoadPerturbation::parse("bad.dat", "0.0 1.0 2.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { line: 1, .. }));
    }

    #[test]
    fn non_increasing_time_rejected() {
        let err = LoadPerturbation::parse("bad.dat", "0 0 0 0\n1 0 0 0\n1 0 0 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { line: 3, .. }));
    }

    #[test]
    fn empty_table_rejected() {
        let err = LoadPerturbation::parse("empty.dat", "# nothing\n\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidParameter { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = LoadPerturbation::from_path("/nonexistent/load.dat").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn load_set_sums_background_and_perturbations() {
        let a = LoadPerturbation::parse("a", "0 0 1 0\n").unwrap();
        let b = LoadPerturbation::parse("b", "0 0 2 0\n").unwrap();
        let set = LoadSet::new(LocalVector::new(-10.0, 5.0, 0.0))
            .with_perturbation(a)
            .with_perturbation(b);
        assert_eq!(set.perturbation_count(), 2);
        assert_eq!(set.at(3.0), LocalVector::new(-10.0, 8.0, 0.0));
    }

    proptest! {
        #[test]
        fn interpolation_stays_within_bracketing_values(
            steps in proptest::collection::vec((0.01f64..10.0, -100.0f64..100.0), 1..20),
            frac in 0.0f64..1.0,
        ) {
            let mut t = 0.0;
            let mut records = Vec::new();
            for (dt, s) in &steps {
                records.push((t, LocalVector::new(0.0, *s, 0.0)));
                t += dt;
            }
            let load = LoadPerturbation::from_records(records.clone()).unwrap();
            for (ti, v) in &records {
                prop_assert_eq!(load.at(*ti), *v);
            }
            let (t0, t1) = load.time_range();
            let q = t0 + frac * (t1 - t0);
            let lo = records.iter().map(|r| r.1.t2).fold(f64::INFINITY, f64::min);
            let hi = records.iter().map(|r| r.1.t2).fold(f64::NEG_INFINITY, f64::max);
            let got = load.at(q).t2;
            prop_assert!(got >= lo - 1e-9 && got <= hi + 1e-9);
        }
    }
}
