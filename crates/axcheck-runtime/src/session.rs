//! Query session - dispatches named queries off the caller's thread.
//!
//! A session owns the facade and a cancellation token. Listing queries run
//! on the blocking pool because registry traversal latency is unbounded; the
//! enabled check and unrecognized methods are answered inline. Each dispatch
//! returns a one-shot receiver that is completed exactly once, or dropped
//! without a value when the session is shut down first.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

use axcheck_core::{Channel, QueryFacade, QueryRequest, QueryResponse};

/// Errors surfaced to callers awaiting a session reply.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The session was shut down before the query delivered a reply.
    #[error("Query cancelled: session closed")]
    Cancelled,
}

/// Owner of all in-flight queries for one caller.
pub struct QuerySession {
    facade: Arc<QueryFacade>,
    cancel_token: CancellationToken,
    tracker: TaskTracker,
}

impl QuerySession {
    /// Create a session over a facade.
    pub fn new(facade: Arc<QueryFacade>) -> Self {
        Self {
            facade,
            cancel_token: CancellationToken::new(),
            tracker: TaskTracker::new(),
        }
    }

    /// Access the facade.
    pub fn facade(&self) -> &QueryFacade {
        &self.facade
    }

    /// Whether [`QuerySession::shutdown`] has been called.
    pub fn is_closed(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    /// Number of dispatched queries still running.
    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    /// Dispatch a method on a channel.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn dispatch(&self, channel: Channel, method: &str) -> oneshot::Receiver<QueryResponse> {
        match QueryRequest::route(channel, method) {
            Some(request) => self.dispatch_request(request),
            None => {
                debug!(%channel, method, "Method not implemented on channel");
                self.reply_inline(QueryResponse::NotImplemented)
            }
        }
    }

    /// Dispatch a recognized request.
    pub fn dispatch_request(&self, request: QueryRequest) -> oneshot::Receiver<QueryResponse> {
        if self.is_closed() {
            debug!(%request, "Session closed, dropping query");
            let (_tx, rx) = oneshot::channel();
            return rx;
        }

        if request.is_inline() {
            return self.reply_inline(self.facade.execute(request));
        }

        let (tx, rx) = oneshot::channel();
        let facade = Arc::clone(&self.facade);
        let cancel_token = self.cancel_token.clone();

        self.tracker.spawn(async move {
            let work = tokio::task::spawn_blocking(move || facade.execute(request));

            tokio::select! {
                biased;
                () = cancel_token.cancelled() => {
                    debug!(%request, "Query cancelled before completion");
                }
                joined = work => {
                    let response = joined.unwrap_or_else(|e| {
                        warn!(%request, error = %e, "Query worker failed");
                        QueryResponse::error(format!("query worker failed: {e}"))
                    });
                    if cancel_token.is_cancelled() {
                        debug!(%request, "Session closed during query, discarding result");
                    } else if tx.send(response).is_err() {
                        debug!(%request, "Caller dropped before reply");
                    }
                }
            }
        });

        rx
    }

    /// Dispatch and wait for the reply.
    pub async fn call(
        &self,
        channel: Channel,
        method: &str,
    ) -> Result<QueryResponse, SessionError> {
        self.dispatch(channel, method)
            .await
            .map_err(|_| SessionError::Cancelled)
    }

    /// Dispatch a recognized request and wait for the reply.
    pub async fn call_request(&self, request: QueryRequest) -> Result<QueryResponse, SessionError> {
        self.dispatch_request(request)
            .await
            .map_err(|_| SessionError::Cancelled)
    }

    /// Cancel outstanding queries and wait for their tasks to finish.
    ///
    /// Blocking work already running is left to complete on the pool; its
    /// result is discarded.
    pub async fn shutdown(&self) {
        let pending = self.tracker.len();
        self.cancel_token.cancel();
        self.tracker.close();
        self.tracker.wait().await;
        info!(pending, "Query session shut down");
    }

    fn reply_inline(&self, response: QueryResponse) -> oneshot::Receiver<QueryResponse> {
        let (tx, rx) = oneshot::channel();
        if !self.is_closed() {
            // The receiver is still held locally, so this cannot fail.
            let _ = tx.send(response);
        }
        rx
    }
}

impl Drop for QuerySession {
    fn drop(&mut self) {
        // Cancel all queries on drop
        self.cancel_token.cancel();
    }
}
