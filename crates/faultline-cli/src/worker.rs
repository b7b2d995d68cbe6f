use std::collections::VecDeque;
use std::sync::Arc;

use faultline_core::go_async;
use tokio::sync::{Mutex, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::job::{Job, JobError};

/// Result of one job, sent back to the collector.
#[derive(Debug)]
pub struct JobReport {
    pub worker_id: usize,
    pub job_id: u64,
    pub outcome: Result<u64, JobError>,
}

/// Worker group handle.
/// - `request_shutdown()` で新しいジョブを取らなくなる
/// - キューが空になってもワーカーは終了する
/// - `join()` で全ワーカーの終了を待てる
pub struct WorkerGroup {
    shutdown_tx: watch::Sender<bool>,
    joins: Vec<JoinHandle<()>>,
}

impl WorkerGroup {
    /// Spawn `n` workers pulling from `queue` and reporting on `reports`.
    pub fn spawn(
        n: usize,
        queue: Arc<Mutex<VecDeque<Job>>>,
        reports: mpsc::UnboundedSender<JobReport>,
    ) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let mut joins = Vec::with_capacity(n);
        for worker_id in 0..n {
            let q = Arc::clone(&queue);
            let tx = reports.clone();
            let mut rx = shutdown_rx.clone();

            let join = tokio::spawn(async move {
                worker_loop(worker_id, q, tx, &mut rx).await;
            });
            joins.push(join);
        }

        Self { shutdown_tx, joins }
    }

    /// Request shutdown for all workers.
    /// In-flight jobs finish; no new jobs are taken.
    pub fn request_shutdown(&self) {
        // ignore send error: receivers may already be dropped
        let _ = self.shutdown_tx.send(true);
    }

    /// Wait for every worker to drain the queue and exit.
    pub async fn join(self) {
        for j in self.joins {
            if let Err(e) = j.await {
                // ワーカー自体が panic することはない想定（ジョブは go_async で包む）
                warn!("worker task ended abnormally: {e}");
            }
        }
    }

    /// Shutdown and wait for all workers.
    pub async fn shutdown_and_join(self) {
        self.request_shutdown();
        self.join().await;
    }
}

async fn worker_loop(
    worker_id: usize,
    queue: Arc<Mutex<VecDeque<Job>>>,
    reports: mpsc::UnboundedSender<JobReport>,
    shutdown_rx: &mut watch::Receiver<bool>,
) {
    loop {
        // shutdown が来ていたら抜ける
        if *shutdown_rx.borrow() {
            debug!(worker_id, "shutdown requested");
            break;
        }

        // ロックは pop の間だけ（ロック跨ぎ await しない）
        let Some(job) = queue.lock().await.pop_front() else {
            debug!(worker_id, "queue drained");
            break;
        };

        info!(worker_id, job_id = job.id, kind = ?job.kind, "running job");
        let outcome = go_async(job.run()).await;

        let report = JobReport {
            worker_id,
            job_id: job.id,
            outcome,
        };
        if reports.send(report).is_err() {
            // collector がいないなら続ける意味がない
            break;
        }
    }
}
