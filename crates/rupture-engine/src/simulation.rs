//! The time-stepping driver.
//!
//! [`Simulation`] advances the block layer and every interface in
//! lockstep through the stages of a low-storage Runge–Kutta scheme and
//! samples the output list between steps.
//!
//! # Ownership model
//!
//! `Simulation` is [`Send`] but not shared: all mutation goes through
//! `&mut self`, and interfaces borrow the block layer's boundary reader
//! and writer only for the duration of one `calc_df` call.

use std::time::Instant;

use rupture_core::BlockLayer;
use rupture_interface::{Interface, InterfaceContext, PhaseCensus};
use rupture_output::OutputList;

use crate::catalog::FieldCatalog;
use crate::config::SimulationConfig;
use crate::error::RunError;
use crate::metrics::StepMetrics;
use crate::scheme::TimeScheme;

/// A configured run over a block layer `B`.
pub struct Simulation<B: BlockLayer> {
    problem: String,
    nt: usize,
    dt: f64,
    scheme: TimeScheme,
    block: B,
    interfaces: Vec<Box<dyn Interface>>,
    outputs: OutputList,
    time: f64,
    step: u64,
    last_metrics: StepMetrics,
}

impl<B: BlockLayer> Simulation<B> {
    /// Validate `config` and take ownership of the block layer.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`SimulationConfig::validate`].
    pub fn new(config: SimulationConfig, block: B) -> Result<Self, RunError> {
        config.validate()?;
        let scheme = TimeScheme::low_storage(config.rk_order)?;
        tracing::info!(
            problem = %config.problem,
            nt = config.nt,
            dt = config.dt,
            order = scheme.order(),
            interfaces = config.interfaces.len(),
            outputs = config.outputs.len(),
            "simulation configured"
        );
        Ok(Self {
            problem: config.problem,
            nt: config.nt,
            dt: config.dt,
            scheme,
            block,
            interfaces: config.interfaces,
            outputs: config.outputs,
            time: 0.0,
            step: 0,
            last_metrics: StepMetrics::default(),
        })
    }

    /// Problem name.
    pub fn problem(&self) -> &str {
        &self.problem
    }

    /// Current simulation time.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Number of completed steps.
    pub fn step_count(&self) -> u64 {
        self.step
    }

    /// The time integration scheme.
    pub fn scheme(&self) -> &TimeScheme {
        &self.scheme
    }

    /// The block layer.
    pub fn block(&self) -> &B {
        &self.block
    }

    /// The interfaces, in stage order.
    pub fn interfaces(&self) -> &[Box<dyn Interface>] {
        &self.interfaces
    }

    /// The output list.
    pub fn outputs(&self) -> &OutputList {
        &self.outputs
    }

    /// Metrics of the most recent step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// Point phases summed over every interface.
    pub fn census(&self) -> PhaseCensus {
        self.interfaces
            .iter()
            .map(|i| i.census())
            .fold(PhaseCensus::default(), |acc, c| PhaseCensus {
                locked: acc.locked + c.locked,
                slipping: acc.slipping + c.slipping,
                ruptured: acc.ruptured + c.ruptured,
            })
    }

    /// Take one time step.
    ///
    /// Each stage exchanges block data, then scales, evaluates and
    /// commits the block layer and every interface in order.
    ///
    /// # Errors
    ///
    /// The first block or interface failure ends the step.
    pub fn step(&mut self) -> Result<StepMetrics, RunError> {
        let step_start = Instant::now();
        let mut exchange_us = 0;
        let mut block_us = 0;
        let mut interface_us: Vec<(String, u64)> = self
            .interfaces
            .iter()
            .map(|i| (i.name().to_string(), 0))
            .collect();

        for (stage, st) in self.scheme.stages().iter().enumerate() {
            let stage_time = self.time + st.c * self.dt;

            let t = Instant::now();
            self.block.exchange()?;
            exchange_us += t.elapsed().as_micros() as u64;

            let t = Instant::now();
            self.block.scale_df(st.a);
            self.block.calc_df(self.dt, stage_time)?;
            block_us += t.elapsed().as_micros() as u64;

            {
                let (boundary, solved) = self.block.boundary_io();
                for (iface, us) in self.interfaces.iter_mut().zip(&mut interface_us) {
                    let t = Instant::now();
                    iface.scale_df(st.a);
                    let mut ctx =
                        InterfaceContext::new(boundary, &mut *solved, stage_time, self.step, stage);
                    iface
                        .calc_df(self.dt, &mut ctx)
                        .map_err(|reason| RunError::Interface {
                            name: iface.name().to_string(),
                            reason,
                        })?;
                    us.1 += t.elapsed().as_micros() as u64;
                }
            }

            let t = Instant::now();
            self.block.update(st.b)?;
            block_us += t.elapsed().as_micros() as u64;

            for (iface, us) in self.interfaces.iter_mut().zip(&mut interface_us) {
                let t = Instant::now();
                iface.update(st.b).map_err(|reason| RunError::Interface {
                    name: iface.name().to_string(),
                    reason,
                })?;
                us.1 += t.elapsed().as_micros() as u64;
            }
        }

        self.step += 1;
        self.time = self.step as f64 * self.dt;

        let metrics = StepMetrics {
            step: self.step,
            time: self.time,
            total_us: step_start.elapsed().as_micros() as u64,
            exchange_us,
            block_us,
            interface_us,
            census: self.census(),
        };
        tracing::debug!(
            step = metrics.step,
            time = metrics.time,
            total_us = metrics.total_us,
            slipping = metrics.census.slipping,
            "step complete"
        );
        self.last_metrics = metrics.clone();
        Ok(metrics)
    }

    /// Refresh every interface's field buffers.
    pub fn write_fields(&mut self) {
        for iface in &mut self.interfaces {
            iface.write_fields();
        }
    }

    /// The catalog of every field the output list may name.
    pub fn catalog(&self) -> FieldCatalog<'_> {
        catalog_of(&self.block, &self.interfaces)
    }

    /// Check every output unit against the current fields.
    ///
    /// # Errors
    ///
    /// Returns the first unit's [`OutputError`](rupture_output::OutputError).
    pub fn check_outputs(&mut self) -> Result<(), RunError> {
        self.write_fields();
        self.outputs.check(&self.catalog())?;
        Ok(())
    }

    /// Refresh interface fields and let the output list sample the
    /// current step.
    ///
    /// # Errors
    ///
    /// Returns the first unit's [`OutputError`](rupture_output::OutputError).
    pub fn write_output(&mut self) -> Result<(), RunError> {
        self.write_fields();
        let catalog = catalog_of(&self.block, &self.interfaces);
        self.outputs
            .write_list(self.step as usize, self.dt, &catalog)?;
        Ok(())
    }

    /// Close the output list, flushing every unit and writing its
    /// metadata. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns the first unit's [`OutputError`](rupture_output::OutputError).
    pub fn close_outputs(&mut self) -> Result<(), RunError> {
        self.outputs.close_list()?;
        Ok(())
    }

    /// Run every remaining step, writing output before the first step
    /// and after each one, then close the output list.
    ///
    /// # Errors
    ///
    /// The first failure ends the run and leaves the output list open;
    /// call [`close_outputs`](Simulation::close_outputs) to keep what was
    /// written.
    pub fn run(&mut self) -> Result<(), RunError> {
        let start = Instant::now();
        if self.step == 0 {
            self.check_outputs()?;
            self.write_output()?;
        }
        while (self.step as usize) < self.nt {
            self.step()?;
            self.write_output()?;
        }
        self.close_outputs()?;
        let census = self.census();
        tracing::info!(
            problem = %self.problem,
            steps = self.step,
            time = self.time,
            ruptured = census.ruptured,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "run complete"
        );
        Ok(())
    }
}

fn catalog_of<'a, B: BlockLayer>(
    block: &'a B,
    interfaces: &'a [Box<dyn Interface>],
) -> FieldCatalog<'a> {
    interfaces
        .iter()
        .fold(FieldCatalog::new(block.fields()), |cat, iface| {
            cat.with_interface(iface.name(), iface.fields())
        })
}

impl<B: BlockLayer> std::fmt::Debug for Simulation<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("problem", &self.problem)
            .field("nt", &self.nt)
            .field("dt", &self.dt)
            .field("step", &self.step)
            .field("time", &self.time)
            .finish()
    }
}

// Compile-time assertion: Simulation is Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check<B: BlockLayer>() {
        assert_send::<Simulation<B>>();
    }
};
