//! Debug-mode checking of the stage protocol.
//!
//! [`StageGuard`] records, in debug builds, whether `calc_df` has run
//! since the last `update` and the time of the latest stage. Violations
//! are assertion failures. Release builds pay zero overhead.

/// Tracks the `calc_df` / `update` ordering of one interface.
#[derive(Clone, Debug, Default)]
pub struct StageGuard {
    #[cfg(debug_assertions)]
    pending: bool,
    #[cfg(debug_assertions)]
    last_time: Option<f64>,
}

impl StageGuard {
    /// Create a guard with no stage recorded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a `calc_df` at stage time `time`.
    ///
    /// # Panics
    ///
    /// In debug builds, if `time` is earlier than the previous stage.
    pub fn on_calc_df(
        &mut self,
        #[cfg_attr(not(debug_assertions), allow(unused_variables))] time: f64,
    ) {
        #[cfg(debug_assertions)]
        {
            if let Some(last) = self.last_time {
                assert!(
                    time >= last,
                    "calc_df called with decreasing time: {time} after {last}"
                );
            }
            self.last_time = Some(time);
            self.pending = true;
        }
    }

    /// Record an `update`.
    ///
    /// # Panics
    ///
    /// In debug builds, if no `calc_df` has run since the last `update`.
    pub fn on_update(&mut self) {
        #[cfg(debug_assertions)]
        {
            assert!(self.pending, "update called without a preceding calc_df");
            self.pending = false;
        }
    }

    /// Whether a `calc_df` is awaiting its `update` (always `false` in
    /// release builds).
    pub fn is_pending(&self) -> bool {
        #[cfg(debug_assertions)]
        {
            self.pending
        }
        #[cfg(not(debug_assertions))]
        {
            false
        }
    }
}
