use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::PersistenceVariant;
use crate::exec::{ExecutionOutcome, ExitState};
use crate::invocation::{Invocation, Phase};

/// Outcome of one invocation, in the order it was issued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationRecord {
    pub sequence: usize,
    pub phase: Phase,
    pub structure: String,
    pub variant: Option<PersistenceVariant>,
    pub command: String,
    pub status: ExitState,
    pub duration_ms: f64,
}

impl InvocationRecord {
    pub fn new(sequence: usize, invocation: &Invocation, outcome: ExecutionOutcome) -> Self {
        Self {
            sequence,
            phase: invocation.phase(),
            structure: invocation.structure().to_string(),
            variant: invocation.variant(),
            command: invocation.command_line(),
            status: outcome.state,
            duration_ms: outcome.duration.as_secs_f64() * 1000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub attempted: usize,
    pub succeeded: usize,
    /// Nonzero exit or killed by a signal.
    pub failed: usize,
    pub launch_failed: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    pub generated_at: String,
    pub records: Vec<InvocationRecord>,
}

impl SweepReport {
    pub fn new(records: Vec<InvocationRecord>) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            records,
        }
    }

    pub fn summary(&self) -> Summary {
        let mut summary = Summary {
            attempted: self.records.len(),
            ..Summary::default()
        };
        for record in &self.records {
            match &record.status {
                ExitState::Exited { code: 0 } => summary.succeeded += 1,
                ExitState::Exited { .. } | ExitState::Terminated { .. } => summary.failed += 1,
                ExitState::LaunchFailed { .. } => summary.launch_failed += 1,
                ExitState::Skipped => summary.skipped += 1,
            }
        }
        summary
    }

    /// Records that neither succeeded nor were skipped.
    pub fn failures(&self) -> impl Iterator<Item = &InvocationRecord> + '_ {
        self.records
            .iter()
            .filter(|r| !r.status.is_success() && r.status != ExitState::Skipped)
    }

    pub fn command_lines(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.command.as_str()).collect()
    }

    /// CSV for a `.csv` path, pretty JSON for anything else.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let is_csv = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);
        if is_csv { self.write_csv(path) } else { self.write_json(path) }
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self).with_context(|| format!("write {}", path.display()))?;
        writer.flush().with_context(|| format!("flush {}", path.display()))
    }

    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "sequence,phase,structure,variant,command,state,exit_code,signal,duration_ms")?;
        for record in &self.records {
            let (state, code, signal) = match &record.status {
                ExitState::Exited { code } => ("exited", code.to_string(), String::new()),
                ExitState::Terminated { signal } => (
                    "terminated",
                    String::new(),
                    signal.map(|s| s.to_string()).unwrap_or_default(),
                ),
                ExitState::LaunchFailed { .. } => ("launch_failed", String::new(), String::new()),
                ExitState::Skipped => ("skipped", String::new(), String::new()),
            };
            writeln!(
                writer,
                "{},{},{},{},{},{},{},{},{:.3}",
                record.sequence,
                record.phase.key(),
                csv_field(&record.structure),
                record.variant.map(|v| v.suffix()).unwrap_or(""),
                csv_field(&record.command),
                state,
                code,
                signal,
                record.duration_ms
            )?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn csv_field(raw: &str) -> String {
    if raw.contains([',', '"', '\n']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}
