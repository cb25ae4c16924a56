// Scheduled polling task with start/stop lifecycle
use crate::application::poller::Poller;
use crate::domain::range::RangeSpec;
use anyhow::Context;
use std::time::Duration;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(30);

pub struct PollingTask;

impl PollingTask {
    /// Refreshes immediately, then once per `interval` until stopped.
    pub fn start(poller: Poller, range: RangeSpec, interval: Duration) -> PollingHandle {
        let (range_tx, range_rx) = watch::channel(range);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let task = tokio::spawn(run(poller, range_rx, shutdown_rx, interval));

        PollingHandle {
            range_tx,
            shutdown_tx,
            task,
        }
    }
}

pub struct PollingHandle {
    range_tx: watch::Sender<RangeSpec>,
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<Poller>,
}

impl PollingHandle {
    /// Switch ranges; the new range is fetched right away.
    pub fn set_range(&self, range: RangeSpec) {
        self.range_tx.send_replace(range);
    }

    pub fn range(&self) -> RangeSpec {
        *self.range_tx.borrow()
    }

    /// Stop after the in-flight cycle, if any, and hand the poller back.
    pub async fn stop(self) -> anyhow::Result<Poller> {
        let _ = self.shutdown_tx.send(());
        self.task.await.context("Polling task panicked")
    }
}

async fn run(
    mut poller: Poller,
    mut range_rx: watch::Receiver<RangeSpec>,
    mut shutdown_rx: oneshot::Receiver<()>,
    interval: Duration,
) -> Poller {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown_rx => break,
            changed = range_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let range = *range_rx.borrow_and_update();
                tracing::info!(%range, "Range changed");
                poller.refresh(range).await;
                ticker.reset();
            }
            _ = ticker.tick() => {
                let range = *range_rx.borrow();
                poller.refresh(range).await;
            }
        }
    }

    tracing::debug!("Polling task stopped");
    poller
}
