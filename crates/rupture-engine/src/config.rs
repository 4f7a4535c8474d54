//! Simulation configuration and its validation.
//!
//! [`SimulationConfig`] is the input to
//! [`Simulation::new`](crate::Simulation::new). [`validate()`](SimulationConfig::validate)
//! checks it once at startup; nothing is re-checked per step.

use rupture_core::ConfigError;
use rupture_interface::{validate_interfaces, Interface};
use rupture_output::OutputList;

use crate::scheme::TimeScheme;

/// Default Runge–Kutta order.
pub const DEFAULT_RK_ORDER: u8 = 4;

/// Everything the driver needs besides the block layer.
pub struct SimulationConfig {
    /// Problem name, used as the output file prefix.
    pub problem: String,
    /// Number of time steps to take.
    pub nt: usize,
    /// Time step.
    pub dt: f64,
    /// Order of the low-storage Runge–Kutta scheme (1 to 4). Default: 4.
    pub rk_order: u8,
    /// Interfaces, advanced in this order every stage.
    pub interfaces: Vec<Box<dyn Interface>>,
    /// Declared outputs.
    pub outputs: OutputList,
}

impl SimulationConfig {
    /// A configuration with no interfaces, no outputs and the default
    /// scheme.
    pub fn new(problem: impl Into<String>, nt: usize, dt: f64) -> Self {
        Self {
            problem: problem.into(),
            nt,
            dt,
            rk_order: DEFAULT_RK_ORDER,
            interfaces: Vec::new(),
            outputs: OutputList::new(),
        }
    }

    /// Append an interface.
    pub fn with_interface(mut self, iface: Box<dyn Interface>) -> Self {
        self.interfaces.push(iface);
        self
    }

    /// Set the output list.
    pub fn with_outputs(mut self, outputs: OutputList) -> Self {
        self.outputs = outputs;
        self
    }

    /// Set the Runge–Kutta order.
    pub fn with_rk_order(mut self, order: u8) -> Self {
        self.rk_order = order;
        self
    }

    /// Check every structural invariant.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameter`] if `problem` is empty,
    /// `nt` is zero, `dt` is not finite and positive, the order is
    /// unsupported, or interface names or IDs collide.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.problem.trim().is_empty() {
            return Err(ConfigError::InvalidParameter {
                reason: "problem name must not be empty".to_string(),
            });
        }
        if self.nt == 0 {
            return Err(ConfigError::InvalidParameter {
                reason: "nt must be at least 1".to_string(),
            });
        }
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                reason: format!("dt must be finite and positive, got {}", self.dt),
            });
        }
        TimeScheme::low_storage(self.rk_order)?;
        validate_interfaces(&self.interfaces).map_err(|e| ConfigError::InvalidParameter {
            reason: e.to_string(),
        })?;
        Ok(())
    }
}

impl std::fmt::Debug for SimulationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.interfaces.iter().map(|i| i.name()).collect();
        f.debug_struct("SimulationConfig")
            .field("problem", &self.problem)
            .field("nt", &self.nt)
            .field("dt", &self.dt)
            .field("rk_order", &self.rk_order)
            .field("interfaces", &names)
            .field("outputs", &self.outputs.len())
            .finish()
    }
}
