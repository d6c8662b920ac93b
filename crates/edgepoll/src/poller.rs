// Polling scheduler: one task per entity.
//
// Each task is the sole writer of its entity (the entity runs no
// internal locking), publishes every observed state into a watch
// channel, and stops when the shared cancellation token fires.

use std::fmt::Display;
use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use edgepoll_api::Entity;

/// Drive one entity at a fixed cadence until cancelled.
///
/// Polls immediately on startup so entities leave their "unknown"
/// default without waiting a full interval, then ticks at `period`.
/// State transitions are logged at info; every poll result (changed or
/// not) is published to `tx`.
pub async fn poll_task<E>(
    mut entity: E,
    period: Duration,
    cancel: CancellationToken,
    tx: watch::Sender<E::State>,
) where
    E: Entity,
    E::State: Clone + PartialEq + Display,
{
    entity.update().await;
    let mut last = entity.state();
    info!(entity = entity.name(), state = %last, "initial state");
    let _ = tx.send(last.clone());

    if !entity.should_poll() {
        debug!(entity = entity.name(), "polling disabled");
        return;
    }

    let mut interval = tokio::time::interval(period);
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                entity.update().await;
                let state = entity.state();
                if state != last {
                    info!(entity = entity.name(), from = %last, to = %state, "state changed");
                    last = state.clone();
                }
                let _ = tx.send(state);
            }
        }
    }
}
