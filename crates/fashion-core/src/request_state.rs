use std::{
    future::Future,
    sync::{Arc, Mutex, MutexGuard},
};

use futures::future::{BoxFuture, FutureExt};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::ApiError;

/// Visible request state of one feature instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum RequestState<T> {
    Idle,
    Loading,
    Success(T),
    Failed(ApiError),
}

impl<T> RequestState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }
}

/// What happened to a submission once its operation resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The result became the visible state.
    Applied,
    /// A newer submission was issued first; the result was dropped.
    Superseded,
}

type BoundOperation<P, T> =
    Arc<dyn Fn(P) -> BoxFuture<'static, Result<T, ApiError>> + Send + Sync>;

struct Ledger<P> {
    ticket: u64,
    last_params: Option<P>,
}

/// Per-feature state container bound to exactly one transport operation.
///
/// Every submission re-enters `Loading` and takes a fresh ticket. Only the
/// holder of the latest ticket may write a terminal state, so results that
/// land out of order are dropped instead of overwriting newer ones.
pub struct RequestController<P, T> {
    feature: &'static str,
    operation: BoundOperation<P, T>,
    ledger: Mutex<Ledger<P>>,
    state_tx: watch::Sender<RequestState<T>>,
}

impl<P, T> RequestController<P, T>
where
    P: Clone + Send + 'static,
    T: Clone + Send + Sync + 'static,
{
    /// Bind a controller to `operation`, starting in `Idle`.
    pub fn new<F, Fut>(feature: &'static str, operation: F) -> Self
    where
        F: Fn(P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let (state_tx, _) = watch::channel(RequestState::Idle);
        Self {
            feature,
            operation: Arc::new(move |params| operation(params).boxed()),
            ledger: Mutex::new(Ledger {
                ticket: 0,
                last_params: None,
            }),
            state_tx,
        }
    }

    pub fn feature(&self) -> &'static str {
        self.feature
    }

    /// Snapshot of the visible state.
    pub fn state(&self) -> RequestState<T> {
        self.state_tx.borrow().clone()
    }

    /// Receiver notified on every visible state change.
    pub fn subscribe(&self) -> watch::Receiver<RequestState<T>> {
        self.state_tx.subscribe()
    }

    /// Parameters of the most recent submission, if any.
    pub fn last_submission(&self) -> Option<P> {
        self.ledger().last_params.clone()
    }

    /// Issue a submission and wait for its operation to resolve.
    pub async fn submit(&self, params: P) -> SubmitOutcome {
        let ticket = {
            let mut ledger = self.ledger();
            ledger.ticket += 1;
            ledger.last_params = Some(params.clone());
            self.state_tx.send_replace(RequestState::Loading);
            ledger.ticket
        };
        debug!(feature = self.feature, ticket, "submission issued");

        let result = (self.operation)(params).await;

        let ledger = self.ledger();
        if ledger.ticket != ticket {
            debug!(
                feature = self.feature,
                ticket,
                current = ledger.ticket,
                "discarding superseded result"
            );
            return SubmitOutcome::Superseded;
        }

        let next = match result {
            Ok(data) => RequestState::Success(data),
            Err(err) => {
                warn!(
                    feature = self.feature,
                    ticket,
                    code = err.code.as_deref().unwrap_or("-"),
                    error = %err.message,
                    "submission failed"
                );
                RequestState::Failed(err)
            }
        };
        self.state_tx.send_replace(next);
        drop(ledger);

        SubmitOutcome::Applied
    }

    /// Replay the last submission; `None` when nothing was submitted yet.
    pub async fn retry(&self) -> Option<SubmitOutcome> {
        let params = self.last_submission()?;
        debug!(feature = self.feature, "retrying last submission");
        Some(self.submit(params).await)
    }

    fn ledger(&self) -> MutexGuard<'_, Ledger<P>> {
        // Ledger writes are single assignments; a poisoned lock is still consistent.
        self.ledger
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
