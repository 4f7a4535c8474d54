//! Per-step timing and phase metrics.

use rupture_interface::PhaseCensus;

/// What one [`Simulation::step`](crate::Simulation::step) did and how
/// long it took.
///
/// Durations are in microseconds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepMetrics {
    /// Index of the completed step (1 after the first step).
    pub step: u64,
    /// Simulation time at the end of the step.
    pub time: f64,
    /// Wall-clock time for the whole step.
    pub total_us: u64,
    /// Time spent in block exchanges.
    pub exchange_us: u64,
    /// Time spent in bulk stage operations.
    pub block_us: u64,
    /// Per-interface time across all stages: `(name, microseconds)`.
    pub interface_us: Vec<(String, u64)>,
    /// Point phases summed over every interface after the last stage.
    pub census: PhaseCensus,
}

impl StepMetrics {
    /// Time spent in all interfaces.
    pub fn interfaces_total_us(&self) -> u64 {
        self.interface_us.iter().map(|(_, us)| us).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = StepMetrics::default();
        assert_eq!(m.step, 0);
        assert_eq!(m.total_us, 0);
        assert!(m.interface_us.is_empty());
        assert_eq!(m.census, PhaseCensus::default());
    }

    #[test]
    fn interface_times_sum() {
        let m = StepMetrics {
            interface_us: vec![("fault".into(), 40), ("bond".into(), 2)],
            ..StepMetrics::default()
        };
        assert_eq!(m.interfaces_total_us(), 42);
    }
}
