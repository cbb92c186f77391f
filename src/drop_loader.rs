use std::future::Future;
use std::io;
use std::path::PathBuf;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::thread;

use futures::channel::oneshot;
use futures::task::noop_waker_ref;

use crate::events::FileBlob;

type BatchFuture = Pin<Box<dyn Future<Output = io::Result<Vec<FileBlob>>>>>;

struct PendingBatch<T> {
    future: BatchFuture,
    tag: Option<T>,
}

/// Loads dropped file batches off the event thread
///
/// Each path gets its own reader thread fulfilling a oneshot channel; a joined
/// future awaits the receivers in drop order, so completion order never
/// reorders the result. `poll` drives every pending batch once with a noop
/// waker and is meant to be called from each `poll_events` cycle — a batch
/// that is still reading simply stays pending until a later cycle.
///
/// Batches are all-or-nothing: the first failed read aborts the join and the
/// partial results are discarded. There is no cancellation.
pub struct DropLoader<T> {
    pending: Vec<PendingBatch<T>>,
}

impl<T> DropLoader<T> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Start reading a batch of dropped paths, remembering `tag` for delivery
    pub fn begin(&mut self, paths: Vec<PathBuf>, tag: T) {
        let receivers: Vec<oneshot::Receiver<io::Result<FileBlob>>> = paths
            .into_iter()
            .map(|path| {
                let (sender, receiver) = oneshot::channel();
                thread::spawn(move || {
                    let result = std::fs::read(&path).map(|data| FileBlob { path, data });
                    let _ = sender.send(result);
                });
                receiver
            })
            .collect();

        let future = async move {
            let mut blobs = Vec::with_capacity(receivers.len());
            for receiver in receivers {
                match receiver.await {
                    Ok(Ok(blob)) => blobs.push(blob),
                    Ok(Err(err)) => return Err(err),
                    Err(oneshot::Canceled) => {
                        return Err(io::Error::other("file reader exited before sending"))
                    }
                }
            }
            Ok(blobs)
        };

        self.pending.push(PendingBatch {
            future: Box::pin(future),
            tag: Some(tag),
        });
    }

    pub fn pending_batches(&self) -> usize {
        self.pending.len()
    }

    /// Poll every pending batch once, returning those that finished
    pub fn poll(&mut self) -> Vec<(T, io::Result<Vec<FileBlob>>)> {
        let mut cx = Context::from_waker(noop_waker_ref());
        let mut completed = Vec::new();
        self.pending.retain_mut(|batch| {
            match batch.future.as_mut().poll(&mut cx) {
                Poll::Ready(result) => {
                    if let Some(tag) = batch.tag.take() {
                        completed.push((tag, result));
                    }
                    false
                }
                Poll::Pending => true,
            }
        });
        completed
    }
}

impl<T> Default for DropLoader<T> {
    fn default() -> Self {
        Self::new()
    }
}
