//! Latest-request-wins fetch lifecycle.
//!
//! List views refetch whenever their inputs change. Each new submission
//! aborts the one still in flight, so a slow response for an old search term
//! can never overwrite the result for the current one. Free-text search
//! submissions wait out a debounce window first; if the user keeps typing the
//! pending fetch is aborted before it touches the network.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::errors::ClientError;

pub struct LatestRequest<T> {
    debounce: Duration,
    generation: u64,
    inflight: Option<JoinHandle<Result<T, ClientError>>>,
}

impl<T: Send + 'static> LatestRequest<T> {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            generation: 0,
            inflight: None,
        }
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Incremented on every submission.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start `fut`, superseding whatever is in flight. With `debounced` set
    /// the request sleeps for the debounce window before running.
    pub fn submit<F>(&mut self, debounced: bool, fut: F) -> u64
    where
        F: Future<Output = Result<T, ClientError>> + Send + 'static,
    {
        self.cancel();
        self.generation += 1;
        let delay = if debounced { self.debounce } else { Duration::ZERO };
        let generation = self.generation;
        self.inflight = Some(tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            tracing::trace!(generation, "fetch started");
            fut.await
        }));
        generation
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.inflight.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.inflight.is_some()
    }

    /// Wait for the current request. `None` when nothing is pending.
    ///
    /// Cancel-safe: dropping this future leaves the request running, and a
    /// later `settle` picks it up.
    pub async fn settle(&mut self) -> Option<Result<T, ClientError>> {
        let handle = self.inflight.as_mut()?;
        let joined = handle.await;
        self.inflight = None;
        Some(match joined {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(ClientError::Cancelled),
            Err(e) => Err(ClientError::Network(format!("fetch task failed: {}", e))),
        })
    }
}

impl<T> Drop for LatestRequest<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.inflight.take() {
            handle.abort();
        }
    }
}
