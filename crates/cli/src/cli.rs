use std::path::PathBuf;

use clap::Parser;
use vitals_core::Config;
use vitals_notify::Priority;

/// Patient vital-sign monitor.
///
/// Ingests `patientID,timestamp,label,value` feeds into an in-memory store
/// and sweeps every patient through the alert rules on a fixed interval.
#[derive(Parser, Debug)]
#[command(name = "vitals-monitor", version, about)]
pub struct CliArgs {
    /// Config profile (keys are looked up as `{PROFILE}_{KEY}` first)
    #[arg(long, env = "VITALS_PROFILE", default_value = "")]
    pub profile: String,

    /// Input files or directories (default: VITALS_INPUT_DIR)
    #[arg(long = "input", short = 'i')]
    pub inputs: Vec<PathBuf>,

    /// Alert catalogue YAML (default: ALERT_CATALOG_PATH, else built-in)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Seconds between sweeps (default: SWEEP_INTERVAL_SECS)
    #[arg(long)]
    pub interval: Option<u64>,

    /// Keep ingesting lines from stdin while sweeping
    #[arg(long)]
    pub stdin: bool,

    /// Run a single sweep after ingestion and exit
    #[arg(long)]
    pub once: bool,

    /// Priority tag prefixed to logged alerts: low, medium, high, critical
    #[arg(long)]
    pub priority: Option<Priority>,

    /// Also print each alert as a JSON line on stdout
    #[arg(long)]
    pub json: bool,

    /// Print the resolved config and rule list as JSON and exit
    #[arg(long)]
    pub print_config: bool,
}

impl CliArgs {
    /// Layer explicit flags over the environment-derived config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(dir) = self.inputs.first() {
            config.ingest.input_dir = Some(dir.clone());
        }
        if let Some(path) = &self.catalog {
            config.rules.catalog_path = Some(path.clone());
        }
        if let Some(secs) = self.interval {
            config.rules.sweep_interval_secs = secs;
        }
        if self.stdin {
            config.ingest.read_stdin = true;
        }
    }

    /// Paths to ingest before the first sweep.
    pub fn input_paths(&self, config: &Config) -> Vec<PathBuf> {
        if !self.inputs.is_empty() {
            return self.inputs.clone();
        }
        config.ingest.input_dir.iter().cloned().collect()
    }
}
