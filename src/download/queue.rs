//! Shared work queue between the page walker and the download workers
//!
//! An unbounded FIFO with one producer and many consumers. Every item taken
//! with [`WorkQueue::get`] must be acknowledged with [`WorkQueue::task_done`];
//! [`WorkQueue::join`] waits until every item ever put has been acknowledged.

use crate::download::{QueueItem, WorkItem};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex, Notify};

struct Inner {
    sender: mpsc::UnboundedSender<QueueItem>,
    receiver: Mutex<mpsc::UnboundedReceiver<QueueItem>>,
    unfinished: AtomicUsize,
    drained: Notify,
}

/// Cloneable handle to the shared queue
#[derive(Clone)]
pub struct WorkQueue {
    inner: Arc<Inner>,
}

impl WorkQueue {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            inner: Arc::new(Inner {
                sender,
                receiver: Mutex::new(receiver),
                unfinished: AtomicUsize::new(0),
                drained: Notify::new(),
            }),
        }
    }

    /// Appends an item to the back of the queue
    pub fn put(&self, item: QueueItem) {
        self.inner.unfinished.fetch_add(1, Ordering::SeqCst);
        // The queue owns a receiver for as long as it has a sender, so the
        // channel cannot be closed here
        if self.inner.sender.send(item).is_err() {
            self.task_done();
        }
    }

    /// Appends a photo to download
    pub fn put_work(&self, item: WorkItem) {
        self.put(QueueItem::Work(item));
    }

    /// Appends one shutdown marker per worker
    pub fn put_shutdown(&self, count: usize) {
        for _ in 0..count {
            self.put(QueueItem::Shutdown);
        }
    }

    /// Takes the next item, waiting until one is available
    pub async fn get(&self) -> QueueItem {
        let mut receiver = self.inner.receiver.lock().await;
        receiver.recv().await.unwrap_or(QueueItem::Shutdown)
    }

    /// Acknowledges one item taken with `get`
    pub fn task_done(&self) {
        let previous = self
            .inner
            .unfinished
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));

        match previous {
            Ok(1) => self.inner.drained.notify_waiters(),
            Ok(_) => {}
            Err(_) => tracing::warn!("task_done called more times than items were queued"),
        }
    }

    /// Number of items put but not yet acknowledged
    pub fn unfinished(&self) -> usize {
        self.inner.unfinished.load(Ordering::SeqCst)
    }

    /// Waits until every queued item has been acknowledged
    pub async fn join(&self) {
        loop {
            let drained = self.inner.drained.notified();
            if self.unfinished() == 0 {
                return;
            }
            drained.await;
        }
    }
}

impl Default for WorkQueue {
    fn default() -> Self {
        Self::new()
    }
}
