//! Process topology and the single collective abort point.

use std::error::Error;
use std::io::{self, Write};

use rupture_core::BlockLayer;

use crate::error::RunError;
use crate::simulation::Simulation;

/// The collective layer seen by the driver.
pub trait Communicator {
    /// This process's rank.
    fn rank(&self) -> usize;

    /// Number of processes.
    fn size(&self) -> usize;

    /// Terminate every process with exit status `code`.
    fn abort(&self, code: i32) -> !;
}

/// A single-process run.
#[derive(Clone, Copy, Debug, Default)]
pub struct SerialCommunicator;

impl Communicator for SerialCommunicator {
    fn rank(&self) -> usize {
        0
    }

    fn size(&self) -> usize {
        1
    }

    fn abort(&self, code: i32) -> ! {
        std::process::exit(code)
    }
}

/// Run `sim` to completion, aborting every process if it fails.
///
/// This is the only place a run is terminated; everything below it
/// returns errors. The failure is reported on standard error.
pub fn run_or_abort<B: BlockLayer, C: Communicator>(sim: &mut Simulation<B>, comm: &C) {
    run_or_abort_with(sim, comm, &mut io::stderr());
}

/// [`run_or_abort`] with the failure report written to `report`.
///
/// On failure the output list is closed first, so samples written
/// before the failure reach disk with their metadata.
pub fn run_or_abort_with<B: BlockLayer, C: Communicator, W: Write>(
    sim: &mut Simulation<B>,
    comm: &C,
    report: &mut W,
) {
    let Err(e) = sim.run() else {
        return;
    };
    tracing::error!(
        rank = comm.rank(),
        size = comm.size(),
        step = sim.step_count(),
        time = sim.time(),
        error = %e,
        "run failed, aborting"
    );
    if let Err(close) = sim.close_outputs() {
        tracing::error!(error = %close, "output close failed during abort");
    }
    if let Err(write_err) = write_failure(report, comm, sim.step_count(), sim.time(), &e) {
        tracing::error!(error = %write_err, "cannot write failure report");
    }
    comm.abort(1);
}

/// Write a fatal run error and its causes, one per line.
fn write_failure<W: Write, C: Communicator>(
    out: &mut W,
    comm: &C,
    step: u64,
    time: f64,
    err: &RunError,
) -> io::Result<()> {
    writeln!(
        out,
        "rupture: rank {} of {}: run failed at step {step} (t = {time}): {err}",
        comm.rank(),
        comm.size()
    )?;
    let mut cause = err.source();
    while let Some(c) = cause {
        writeln!(out, "  caused by: {c}")?;
        cause = c.source();
    }
    out.flush()
}
