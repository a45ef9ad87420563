mod cli;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{Interval, MissedTickBehavior};
use tracing::{info, warn};

use vitals_core::config::load_dotenv;
use vitals_core::{Alert, Config};
use vitals_ingest::{input_files, read_file, read_stream, IngestSummary};
use vitals_notify::{AlertSink, ChannelSink, Dispatcher, LogSink};
use vitals_rules::loader::load_catalog_or_builtin;
use vitals_rules::RuleEngine;
use vitals_storage::PatientRegistry;

use crate::cli::CliArgs;

#[tokio::main]
async fn main() -> Result<()> {
    load_dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = CliArgs::parse();

    let mut config = Config::for_profile(&args.profile);
    args.apply(&mut config);
    config.validate().context("invalid configuration")?;
    config.log_summary();

    let catalog = load_catalog_or_builtin(config.rules.catalog_path.as_deref())
        .context("failed to load alert catalogue")?;
    let rules = catalog.compile();

    if args.print_config {
        let view = serde_json::json!({
            "config": config.summary(),
            "catalog": catalog.metadata.id,
            "rules": rules,
        });
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    if rules.is_empty() {
        warn!(catalog_id = %catalog.metadata.id, "alert catalogue is disabled, no rules will run");
    }

    // ── Sinks ───────────────────────────────────────────────────────

    let mut log_sink = LogSink::new();
    if let Some(priority) = args.priority {
        log_sink = log_sink.with_priority(priority);
    }
    let mut dispatcher = Dispatcher::empty().with(Arc::new(log_sink));
    let json_task = if args.json {
        let (sink, rx) = ChannelSink::new();
        dispatcher.add(Arc::new(sink));
        Some(tokio::spawn(print_json_lines(rx)))
    } else {
        None
    };
    let sink: Arc<dyn AlertSink> = Arc::new(dispatcher);

    // ── Ingestion ───────────────────────────────────────────────────

    let registry = Arc::new(PatientRegistry::new());
    let engine = Arc::new(RuleEngine::with_rules(registry.clone(), sink, rules));

    let inputs = args.input_paths(&config);
    let summary = ingest_inputs(&inputs, &registry).await?;
    info!(
        files = inputs.len(),
        accepted = summary.accepted,
        duplicates = summary.duplicates,
        malformed = summary.malformed,
        patients = registry.len(),
        "initial ingestion complete"
    );

    let mut stdin_task = config.ingest.read_stdin.then(|| spawn_stdin(registry.clone()));

    // ── Sweeps ──────────────────────────────────────────────────────

    if args.once {
        if let Some(task) = stdin_task.take() {
            task.await.context("stdin ingestion task panicked")?;
        }
        sweep(&engine).await?;
    } else {
        let mut ticker = sweep_ticker(config.rules.sweep_interval_secs);
        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = ticker.tick() => sweep(&engine).await?,
                _ = &mut shutdown => {
                    info!("shutdown requested");
                    break;
                }
            }
        }
    }

    // Dropping the engine closes the channel sink so the printer drains and exits.
    drop(engine);
    if let Some(task) = json_task {
        task.await.context("alert printer task panicked")?;
    }

    info!(
        patients = registry.len(),
        records = registry.record_count(),
        "monitor stopped"
    );

    // A blocking stdin read cannot be cancelled and would hold the runtime open.
    if stdin_task.is_some_and(|task| !task.is_finished()) {
        std::process::exit(0);
    }
    Ok(())
}

/// Ingest every file under `inputs` concurrently, one blocking task per file.
async fn ingest_inputs(inputs: &[PathBuf], registry: &Arc<PatientRegistry>) -> Result<IngestSummary> {
    let mut files = Vec::new();
    for input in inputs {
        let found = input_files(input)
            .with_context(|| format!("failed to list inputs under {}", input.display()))?;
        files.extend(found);
    }

    let mut tasks = JoinSet::new();
    for path in files {
        let registry = registry.clone();
        tasks.spawn_blocking(move || {
            read_file(&path, &registry).with_context(|| format!("failed to ingest {}", path.display()))
        });
    }

    let mut total = IngestSummary::default();
    while let Some(joined) = tasks.join_next().await {
        total += joined.context("ingestion task panicked")??;
    }
    Ok(total)
}

fn spawn_stdin(registry: Arc<PatientRegistry>) -> JoinHandle<()> {
    info!("reading measurements from stdin");
    tokio::task::spawn_blocking(move || {
        match read_stream(std::io::stdin().lock(), &registry) {
            Ok(summary) => info!(
                accepted = summary.accepted,
                duplicates = summary.duplicates,
                malformed = summary.malformed,
                "stdin closed"
            ),
            Err(e) => warn!(error = %e, "stdin ingestion stopped"),
        }
    })
}

/// A sweep that overruns its slot pushes the next one back instead of
/// triggering catch-up sweeps.
fn sweep_ticker(interval_secs: u64) -> Interval {
    let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

async fn sweep(engine: &Arc<RuleEngine>) -> Result<()> {
    let engine = engine.clone();
    let summary = tokio::task::spawn_blocking(move || engine.evaluate_all())
        .await
        .context("sweep task panicked")?;
    info!(patients = summary.patients, alerts = summary.alerts, "sweep finished");
    Ok(())
}

async fn print_json_lines(mut rx: tokio::sync::mpsc::UnboundedReceiver<Alert>) {
    while let Some(alert) = rx.recv().await {
        match serde_json::to_string(&alert) {
            Ok(line) => println!("{line}"),
            Err(e) => warn!(error = %e, "failed to encode alert"),
        }
    }
}
