use std::{future::Future, time::Duration};

use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{error::ApiError, types::HealthState};

/// Default period between health probes.
pub const DEFAULT_HEALTH_INTERVAL: Duration = Duration::from_secs(30);

/// Background backend-reachability poller.
///
/// The polling task is the only writer of [`HealthState`]; readers hold
/// `watch` receivers. The state is `Checking` until the first probe lands and
/// afterwards only ever flips between `Online` and `Offline`.
#[derive(Debug)]
pub struct HealthMonitor {
    state_rx: watch::Receiver<HealthState>,
    stop: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl HealthMonitor {
    /// Spawn the poller: one probe now, then one per `period`.
    pub fn start<F, Fut, T>(probe: F, period: Duration) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
        T: Send + 'static,
    {
        let (state_tx, state_rx) = watch::channel(HealthState::Checking);
        let stop = CancellationToken::new();
        let stop_child = stop.child_token();
        let period = period.max(Duration::from_millis(1));

        let task = tokio::spawn(async move {
            let mut ticker = time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = stop_child.cancelled() => break,
                    _ = ticker.tick() => {}
                }

                let result = tokio::select! {
                    _ = stop_child.cancelled() => break,
                    result = probe() => result,
                };

                let next = match result {
                    Ok(_) => HealthState::Online,
                    Err(err) => {
                        debug!(
                            code = err.code.as_deref().unwrap_or("-"),
                            error = %err.message,
                            "health probe failed"
                        );
                        HealthState::Offline
                    }
                };

                state_tx.send_if_modified(|current| {
                    if *current == next {
                        return false;
                    }
                    info!(from = ?*current, to = ?next, "backend health changed");
                    *current = next;
                    true
                });
            }

            debug!("health monitor stopped");
        });

        Self {
            state_rx,
            stop,
            task: Some(task),
        }
    }

    /// Latest known state.
    pub fn state(&self) -> HealthState {
        *self.state_rx.borrow()
    }

    /// Receiver notified whenever the state changes.
    pub fn subscribe(&self) -> watch::Receiver<HealthState> {
        self.state_rx.clone()
    }

    /// Stop polling and wait for the task to finish. No probe runs afterwards.
    pub async fn stop(mut self) {
        self.stop.cancel();
        if let Some(task) = self.task.take()
            && let Err(err) = task.await
        {
            warn!(error = %err, "health monitor task ended abnormally");
        }
    }
}

impl Drop for HealthMonitor {
    fn drop(&mut self) {
        self.stop.cancel();
    }
}
