//! faultline demo: a small worker group whose jobs sometimes panic.
//!
//! Every job runs through `go_async`, so a panicking job ends up as an
//! ordinary `Err` in the report stream instead of taking its worker down.

mod job;
mod worker;

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use faultline_core::{CaptureConfig, FaultCapture};
use tokio::sync::{Mutex, mpsc};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::job::{Job, JobError};
use crate::worker::WorkerGroup;

#[derive(Debug, Parser)]
#[command(name = "faultline", about = "Run jobs that may panic and report each outcome")]
struct Args {
    /// Number of concurrent workers.
    #[arg(long, default_value_t = 4)]
    workers: usize,

    /// Number of jobs to enqueue.
    #[arg(long, default_value_t = 12)]
    jobs: u64,

    /// TOML file with capture settings (`trace_limit`, `capture_backtrace`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print captured panics as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Default)]
struct Summary {
    succeeded: usize,
    rejected: usize,
    panicked: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_thread_names(true)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => CaptureConfig::load(path)?,
        None => CaptureConfig::default(),
    };
    info!(?config, "capture settings");
    if FaultCapture::from_config(config).install_global().is_err() {
        warn!("fault capture was already initialised; keeping the existing settings");
    }

    // (A) ジョブを積む
    let jobs: VecDeque<Job> = (0..args.jobs).map(Job::new).collect();
    let queue = Arc::new(Mutex::new(jobs));

    // (B) worker を起動
    let (tx, mut rx) = mpsc::unbounded_channel();
    let group = WorkerGroup::spawn(args.workers.max(1), queue, tx);

    // (C) 結果を集める（全 worker が終わると channel が閉じる）
    let mut summary = Summary::default();
    loop {
        let report = tokio::select! {
            report = rx.recv() => report,
            _ = tokio::signal::ctrl_c() => {
                warn!("interrupted; finishing in-flight jobs");
                group.request_shutdown();
                continue;
            }
        };
        let Some(report) = report else {
            break;
        };

        match report.outcome {
            Ok(value) => {
                summary.succeeded += 1;
                info!(worker_id = report.worker_id, job_id = report.job_id, value, "job succeeded");
            }
            Err(JobError::Panicked(fault)) => {
                summary.panicked += 1;
                error!(
                    worker_id = report.worker_id,
                    job_id = report.job_id,
                    at = %fault.time(),
                    truncated = fault.is_truncated(),
                    "{fault}"
                );
                if args.json {
                    println!("{}", serde_json::to_string_pretty(&fault)?);
                }
            }
            Err(err) => {
                summary.rejected += 1;
                warn!(worker_id = report.worker_id, job_id = report.job_id, "{err}");
            }
        }
    }

    group.shutdown_and_join().await;

    info!(
        succeeded = summary.succeeded,
        rejected = summary.rejected,
        panicked = summary.panicked,
        "all jobs finished"
    );
    Ok(())
}
