use std::io;
use std::path::PathBuf;
use std::sync::Once;

use anyhow::Context;
use clap::Parser;
use sweep_core::{DryRunExecutor, Orchestrator, ProcessExecutor, SweepConfig, SweepReport};

#[cfg(test)]
mod main_test;

static TRACE_INIT: Once = Once::new();
const DEFAULT_TRACE_FILTER: &str = "sweep_core=info,sanity_sweep=info";

#[derive(Debug, Parser)]
#[command(
    name = "sanity-sweep",
    author,
    version,
    about = "Run init and main sanity checks across every benchmark build",
    long_about = None
)]
struct CliArgs {
    /// Catalog/options file (TOML, JSON or YAML)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory holding the benchmark executables
    #[arg(long, value_name = "DIR")]
    bin_dir: Option<PathBuf>,

    /// Value passed with `-n` to list-family main runs
    #[arg(long, value_name = "N")]
    iterations: Option<u32>,

    /// Echo every command without launching it
    #[arg(long)]
    dry_run: bool,

    /// Write per-invocation outcomes here (`.csv` for CSV, JSON otherwise)
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,
}

/// What `SWEEP_LOG` asks for.
#[derive(Debug, PartialEq, Eq)]
enum TraceSetting {
    Off,
    /// Enabled without a filter: use `RUST_LOG` or the default filter.
    On,
    Filter(String),
}

fn trace_setting(raw: &str) -> TraceSetting {
    let value = raw.trim();
    match value.to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "off" => TraceSetting::Off,
        "1" | "true" | "on" => TraceSetting::On,
        _ => TraceSetting::Filter(value.to_string()),
    }
}

// Logs go to stderr so stdout only carries echoed commands and benchmark output.
fn maybe_init_tracing() {
    let Ok(raw) = std::env::var("SWEEP_LOG") else {
        return;
    };
    let filter_expr = match trace_setting(&raw) {
        TraceSetting::Off => return,
        TraceSetting::On => std::env::var("RUST_LOG").ok(),
        TraceSetting::Filter(expr) => Some(expr),
    };

    TRACE_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let filter = filter_expr
            .and_then(|expr| EnvFilter::try_new(expr).ok())
            .unwrap_or_else(|| EnvFilter::new(DEFAULT_TRACE_FILTER));
        let _ = fmt().with_writer(std::io::stderr).with_env_filter(filter).try_init();
    });
}

fn load_config(args: &CliArgs) -> anyhow::Result<SweepConfig> {
    let mut config = match &args.config {
        Some(path) => SweepConfig::load(path)?,
        None => SweepConfig::default(),
    };
    if let Some(dir) = &args.bin_dir {
        config.bin_dir = Some(dir.clone());
    }
    if let Some(n) = args.iterations {
        config.list_iterations = Some(n);
    }
    Ok(config)
}

fn run(args: &CliArgs) -> anyhow::Result<SweepReport> {
    let config = load_config(args)?;
    let catalog = config.catalog()?;
    let options = config.options();
    tracing::info!(
        "sweeping {} structures x {} variants from {}",
        catalog.structures().len(),
        catalog.persistence().len(),
        options.bin_dir.display()
    );

    let stdout = io::stdout();
    if args.dry_run {
        Orchestrator::new(catalog, options, DryRunExecutor, stdout.lock()).run()
    } else {
        Orchestrator::new(catalog, options, ProcessExecutor, stdout.lock()).run()
    }
}

fn main() -> anyhow::Result<()> {
    maybe_init_tracing();

    let args = CliArgs::parse();
    let report = run(&args)?;

    let summary = report.summary();
    tracing::info!(
        "sweep finished: {} attempted, {} succeeded, {} failed, {} not launched",
        summary.attempted,
        summary.succeeded,
        summary.failed,
        summary.launch_failed
    );

    if let Some(path) = &args.report {
        report
            .write_to(path)
            .with_context(|| format!("Failed to write report '{}'", path.display()))?;
    }
    Ok(())
}
