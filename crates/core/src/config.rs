use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_u64(profile: &str, key: &str, default: u64) -> u64 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_bool(profile: &str, key: &str, default: bool) -> bool {
    match profiled_env_opt(profile, key).as_deref() {
        Some("true") | Some("1") | Some("yes") => true,
        Some("false") | Some("0") | Some("no") => false,
        _ => default,
    }
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub ingest: IngestConfig,
    pub rules: RulesConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `VITALS_PROFILE`. When set (e.g. `WARD3`), every
    /// key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("VITALS_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            ingest: IngestConfig::from_env_profiled(p),
            rules: RulesConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rules.sweep_interval_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "SWEEP_INTERVAL_SECS",
                reason: "must be at least 1 second".to_string(),
            });
        }
        Ok(())
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  ingest:  input_dir={}, stdin={}",
            self.ingest
                .input_dir
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(none)".to_string()),
            self.ingest.read_stdin
        );
        tracing::info!(
            "  rules:   catalog={}, sweep_interval={}s",
            self.rules
                .catalog_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(built-in)".to_string()),
            self.rules.sweep_interval_secs
        );
    }

    /// Structured view for `--print-config`.
    pub fn summary(&self) -> serde_json::Value {
        serde_json::json!({
            "profile": self.profile_label(),
            "ingest": {
                "input_dir": self.ingest.input_dir,
                "read_stdin": self.ingest.read_stdin,
            },
            "rules": {
                "catalog_path": self.rules.catalog_path,
                "sweep_interval_secs": self.rules.sweep_interval_secs,
            },
        })
    }
}

// ── Ingest ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Directory of `.csv`/`.txt` measurement files read at startup.
    pub input_dir: Option<PathBuf>,
    /// Keep reading wire lines from stdin while sweeping.
    pub read_stdin: bool,
}

impl IngestConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            input_dir: profiled_env_opt(p, "VITALS_INPUT_DIR").map(PathBuf::from),
            read_stdin: profiled_env_bool(p, "VITALS_READ_STDIN", false),
        }
    }
}

// ── Rules ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Alert catalogue YAML; built-in thresholds when unset.
    pub catalog_path: Option<PathBuf>,
    pub sweep_interval_secs: u64,
}

impl RulesConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            catalog_path: profiled_env_opt(p, "ALERT_CATALOG_PATH").map(PathBuf::from),
            sweep_interval_secs: profiled_env_u64(p, "SWEEP_INTERVAL_SECS", 10),
        }
    }
}
