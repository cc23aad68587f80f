use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use tokio::{
    select,
    sync::Notify,
    task::JoinSet,
    time::{self, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;

use crate::{EventBus, Monitor};

/// Start gate shared by all monitor tasks. The flag is checked after the
/// `notified()` future is created, so a start racing with task spawn cannot
/// lose the wakeup.
struct StartGate {
    notify: Notify,
    started: AtomicBool,
}

/// Drives registered monitors, one Tokio task per monitor, each on its own
/// poll interval, all publishing to a shared [`EventBus`].
///
/// Tasks are spawned at registration but idle until [`start`](Self::start);
/// monitors registered after `start` begin polling immediately. On
/// [`stop`](Self::stop) every task is cancelled between polls, closes its
/// monitor on the way out (connections are released even when shutdown
/// races a poll), and is awaited.
///
/// Each monitor exclusively owns its connection state; the bus is the only
/// shared object.
///
/// # Example
///
/// ```ignore
/// let bus = Arc::new(EventBus::new());
/// bus.subscribe(Tracer);
///
/// let mut scheduler = Scheduler::new(bus);
/// scheduler.add_monitor("worker", process_monitor, Duration::from_secs(5));
/// scheduler.start();
/// // ...
/// scheduler.stop().await;
/// ```
pub struct Scheduler {
    bus: Arc<EventBus>,
    tasks: JoinSet<()>,
    gate: Arc<StartGate>,
    cancel_token: CancellationToken,
}

impl Scheduler {
    /// Must be called from within a Tokio runtime; monitor tasks are
    /// spawned on it.
    pub fn new(bus: Arc<EventBus>) -> Self {
        Self {
            bus,
            tasks: JoinSet::new(),
            gate: Arc::new(StartGate {
                notify: Notify::new(),
                started: AtomicBool::new(false),
            }),
            cancel_token: CancellationToken::new(),
        }
    }

    /// The bus every registered monitor publishes to.
    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    /// Register a monitor to be polled every `interval`.
    ///
    /// `name` only labels the task in logs; identity lives in the monitor's
    /// own target descriptor.
    pub fn add_monitor<M>(&mut self, name: &str, mut monitor: M, interval: Duration)
    where
        M: Monitor + 'static,
    {
        let name = name.to_string();
        let gate = self.gate.clone();
        let token = self.cancel_token.clone();

        self.tasks.spawn(async move {
            loop {
                let notified = gate.notify.notified();
                if gate.started.load(Ordering::Acquire) {
                    break;
                }
                select! {
                    _ = token.cancelled() => {
                        // Never started; still release whatever the monitor holds.
                        monitor.close().await;
                        return;
                    }
                    _ = notified => {}
                }
            }

            let mut ticker = time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => monitor.poll().await,
                }
            }

            monitor.close().await;
            tracing::debug!(monitor = %name, "monitor task stopped");
        });
    }

    /// Release all registered monitor tasks to begin polling.
    pub fn start(&self) {
        self.gate.started.store(true, Ordering::Release);
        self.gate.notify.notify_waiters();
        tracing::info!(monitors = self.tasks.len(), "scheduler started");
    }

    /// Cancel polling, close every monitor, and wait for all tasks to
    /// finish. Consumes the scheduler, preventing use after shutdown.
    pub async fn stop(mut self) {
        self.cancel_token.cancel();
        while self.tasks.join_next().await.is_some() {}
        tracing::info!("scheduler stopped");
    }

    /// Number of registered monitor tasks still running.
    pub fn monitor_count(&self) -> usize {
        self.tasks.len()
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        // Wake gated tasks into the cancelled branch so they close their
        // monitors instead of idling forever.
        self.cancel_token.cancel();
    }
}
