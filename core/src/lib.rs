//! Sanity-check sweeps over precompiled data-structure benchmarks.
//!
//! A [`Catalog`] names the structures and persistence builds, a [`SweepPlan`]
//! expands it into ordered [`Invocation`]s, and the [`Orchestrator`] echoes and
//! runs them one at a time, collecting a [`SweepReport`].

pub mod catalog;
pub mod config;
pub mod exec;
pub mod invocation;
pub mod orchestrator;
pub mod plan;
pub mod report;

#[cfg(test)]
mod invocation_test;
#[cfg(test)]
mod report_test;

pub use catalog::{Catalog, PersistenceVariant, Structure};
pub use config::SweepConfig;
pub use exec::{DryRunExecutor, ExecutionOutcome, Executor, ExitState, ProcessExecutor};
pub use invocation::{Invocation, Phase, SweepOptions};
pub use orchestrator::Orchestrator;
pub use plan::SweepPlan;
pub use report::{InvocationRecord, Summary, SweepReport};
