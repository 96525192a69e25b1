//! Fixed-size pool of download workers

use crate::download::worker::{run_worker, WorkerSettings};
use crate::download::WorkQueue;
use crate::output::DownloadStats;
use reqwest::Client;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// A running set of download workers sharing one queue
pub struct DownloadPool {
    queue: WorkQueue,
    handles: Vec<JoinHandle<()>>,
}

impl DownloadPool {
    /// Spawns `size` workers consuming from `queue`
    pub fn start(
        size: usize,
        queue: WorkQueue,
        client: Client,
        settings: WorkerSettings,
        stats: Arc<DownloadStats>,
    ) -> Self {
        let settings = Arc::new(settings);
        let handles = (0..size)
            .map(|worker_id| {
                tokio::spawn(run_worker(
                    worker_id,
                    queue.clone(),
                    client.clone(),
                    Arc::clone(&settings),
                    Arc::clone(&stats),
                ))
            })
            .collect();

        tracing::debug!("Started {} download workers", size);
        Self { queue, handles }
    }

    /// Number of workers in the pool
    pub fn size(&self) -> usize {
        self.handles.len()
    }

    /// Signals every worker to stop once the work ahead of it is done
    pub fn shutdown(&self) {
        self.queue.put_shutdown(self.size());
    }

    /// Waits for the queue to drain and every worker to exit
    pub async fn join(self) {
        self.queue.join().await;
        for handle in self.handles {
            if let Err(e) = handle.await {
                tracing::error!("Download worker panicked: {}", e);
            }
        }
    }
}
