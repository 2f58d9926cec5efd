//! Sequential four-phase sweep over a catalog.
//!
//! Every invocation is echoed to the sink and flushed before its process is
//! launched, then run to completion before the next one is built. Child
//! failures are recorded and never stop the sweep. Only a failed write of the
//! echo line itself aborts.

use std::io::Write;

use anyhow::{Context, Result};

use crate::catalog::Catalog;
use crate::exec::Executor;
use crate::invocation::{Invocation, Phase, SweepOptions};
use crate::plan::phase_invocations;
use crate::report::{InvocationRecord, SweepReport};

pub struct Orchestrator<E, W> {
    catalog: Catalog,
    options: SweepOptions,
    executor: E,
    echo: W,
    records: Vec<InvocationRecord>,
}

impl<E: Executor, W: Write> Orchestrator<E, W> {
    pub fn new(catalog: Catalog, options: SweepOptions, executor: E, echo: W) -> Self {
        Self {
            catalog,
            options,
            executor,
            echo,
            records: Vec::new(),
        }
    }

    /// `<name>_ro -i` for every read-only structure.
    pub fn run_read_only_init_phase(&mut self) -> Result<()> {
        self.run_phase(Phase::ReadOnlyInit)
    }

    /// `<name><suffix> -i` for every structure and persistence variant.
    pub fn run_full_init_phase(&mut self) -> Result<()> {
        self.run_phase(Phase::FullInit)
    }

    /// `<name>_ro`, plus `-n <iterations>` for list-family structures.
    pub fn run_read_only_main_phase(&mut self) -> Result<()> {
        self.run_phase(Phase::ReadOnlyMain)
    }

    /// `<name><suffix>`, plus `-n <iterations>` for list-family structures.
    pub fn run_full_main_phase(&mut self) -> Result<()> {
        self.run_phase(Phase::FullMain)
    }

    /// Runs all four phases in their fixed order and returns the report.
    pub fn run(mut self) -> Result<SweepReport> {
        self.run_read_only_init_phase()?;
        self.run_full_init_phase()?;
        self.run_read_only_main_phase()?;
        self.run_full_main_phase()?;
        Ok(self.into_report())
    }

    pub fn records(&self) -> &[InvocationRecord] {
        &self.records
    }

    pub fn into_report(self) -> SweepReport {
        SweepReport::new(self.records)
    }

    fn run_phase(&mut self, phase: Phase) -> Result<()> {
        let invocations = phase_invocations(&self.catalog, &self.options, phase);
        tracing::info!("starting {} phase ({} invocations)", phase, invocations.len());
        for invocation in invocations {
            self.dispatch(&invocation)?;
        }
        Ok(())
    }

    fn dispatch(&mut self, invocation: &Invocation) -> Result<()> {
        let line = invocation.command_line();
        writeln!(self.echo, "{}", line).with_context(|| format!("echo '{}'", line))?;
        self.echo.flush().context("flush echoed command")?;

        let outcome = self.executor.execute(invocation);
        tracing::debug!(
            "{} finished in {:?} with {:?}",
            line,
            outcome.duration,
            outcome.state
        );

        let sequence = self.records.len();
        self.records.push(InvocationRecord::new(sequence, invocation, outcome));
        Ok(())
    }
}
