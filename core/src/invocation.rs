use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::catalog::{PersistenceVariant, Structure};

pub const INIT_FLAG: &str = "-i";
pub const ITERATIONS_FLAG: &str = "-n";
pub const DEFAULT_LIST_ITERATIONS: u32 = 100;

/// Sweep phases, declared in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    ReadOnlyInit,
    FullInit,
    ReadOnlyMain,
    FullMain,
}

impl Phase {
    pub const ALL: [Phase; 4] = [Phase::ReadOnlyInit, Phase::FullInit, Phase::ReadOnlyMain, Phase::FullMain];

    pub fn is_init(self) -> bool {
        matches!(self, Phase::ReadOnlyInit | Phase::FullInit)
    }

    pub fn is_read_only(self) -> bool {
        matches!(self, Phase::ReadOnlyInit | Phase::ReadOnlyMain)
    }

    /// Stable identifier used in reports.
    pub fn key(self) -> &'static str {
        match self {
            Phase::ReadOnlyInit => "read_only_init",
            Phase::FullInit => "full_init",
            Phase::ReadOnlyMain => "read_only_main",
            Phase::FullMain => "full_main",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::ReadOnlyInit => "read-only init",
            Phase::FullInit => "full init",
            Phase::ReadOnlyMain => "read-only main",
            Phase::FullMain => "full main",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Knobs that shape every invocation of a sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepOptions {
    /// Directory the benchmark executables live in.
    pub bin_dir: PathBuf,
    /// Value passed with `-n` to list-family main runs.
    pub list_iterations: u32,
}

impl Default for SweepOptions {
    fn default() -> Self {
        Self {
            bin_dir: PathBuf::from("."),
            list_iterations: DEFAULT_LIST_ITERATIONS,
        }
    }
}

/// A single benchmark command: built once, echoed, executed, then dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    phase: Phase,
    structure: String,
    variant: Option<PersistenceVariant>,
    program: PathBuf,
    args: Vec<String>,
}

impl Invocation {
    /// `<name>_ro`, never carrying a persistence suffix.
    pub fn read_only(structure: &Structure, phase: Phase, options: &SweepOptions) -> Self {
        debug_assert!(phase.is_read_only());
        Self::build(phase, structure, None, structure.read_only_executable(), options)
    }

    /// `<name><suffix>` for one persistence build.
    pub fn persistent(structure: &Structure, variant: PersistenceVariant, phase: Phase, options: &SweepOptions) -> Self {
        debug_assert!(!phase.is_read_only());
        Self::build(
            phase,
            structure,
            Some(variant),
            structure.variant_executable(variant),
            options,
        )
    }

    fn build(
        phase: Phase,
        structure: &Structure,
        variant: Option<PersistenceVariant>,
        executable: String,
        options: &SweepOptions,
    ) -> Self {
        let mut args = Vec::new();
        if phase.is_init() {
            args.push(INIT_FLAG.to_string());
        } else if structure.list_family {
            args.push(ITERATIONS_FLAG.to_string());
            args.push(options.list_iterations.to_string());
        }

        Self {
            phase,
            structure: structure.name.clone(),
            variant,
            program: options.bin_dir.join(executable),
            args,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn structure(&self) -> &str {
        &self.structure
    }

    pub fn variant(&self) -> Option<PersistenceVariant> {
        self.variant
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The exact line echoed before the process is launched.
    pub fn command_line(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}
