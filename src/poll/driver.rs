//! Tokio driver for [`PollScheduler`].
//!
//! Each poller is one task. Fetches run as separate tasks so a slow server
//! never blocks commands; a fetch cannot be aborted once issued, but its
//! result only reaches the screen if the scheduler still accepts it.

use std::future::Future;
use std::pin::Pin;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Sleep};
use tracing::{debug, info};

use caninewatch_client::FeedError;

use super::scheduler::{Cadence, Completion, Generation, PollScheduler};

/// Commands accepted by a running poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollCommand {
    Refresh,
    Stop,
}

/// One applied fetch result.
#[derive(Debug, Clone)]
pub struct PollUpdate<T> {
    pub generation: Generation,
    pub result: Result<T, FeedError>,
}

/// Control handle for a spawned poller. Dropping it tears the poller down.
#[derive(Debug)]
pub struct PollHandle {
    label: String,
    commands: mpsc::UnboundedSender<PollCommand>,
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Ask for a fetch now. Coalesced if one is already running.
    pub fn refresh(&self) {
        let _ = self.commands.send(PollCommand::Refresh);
    }

    /// Tear the poller down. Pending timers are cancelled and any result
    /// still in flight is discarded.
    pub fn stop(&self) {
        let _ = self.commands.send(PollCommand::Stop);
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the driver task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Spawn a poller that runs `fetch` according to `cadence`.
///
/// The first fetch starts immediately. Applied results arrive on the
/// returned receiver in issue order; the receiver closes once the poller
/// has stopped.
pub fn spawn_poller<T, F, Fut>(
    label: &str,
    cadence: Cadence,
    fetch: F,
) -> (PollHandle, mpsc::UnboundedReceiver<PollUpdate<T>>)
where
    T: Send + 'static,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, FeedError>> + Send + 'static,
{
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (update_tx, update_rx) = mpsc::unbounded_channel();

    let task = tokio::spawn(run(
        label.to_string(),
        cadence,
        fetch,
        command_rx,
        update_tx,
    ));

    let handle = PollHandle {
        label: label.to_string(),
        commands: command_tx,
        task,
    };

    (handle, update_rx)
}

async fn run<T, F, Fut>(
    label: String,
    cadence: Cadence,
    fetch: F,
    mut commands: mpsc::UnboundedReceiver<PollCommand>,
    updates: mpsc::UnboundedSender<PollUpdate<T>>,
) where
    T: Send + 'static,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, FeedError>> + Send + 'static,
{
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<(Generation, Result<T, FeedError>)>();
    let mut scheduler = PollScheduler::new(cadence);
    let mut timer: Option<Pin<Box<Sleep>>> = None;

    let start = |generation: Generation| {
        debug!(poller = %label, %generation, "fetch issued");
        let request = fetch();
        let done = done_tx.clone();
        tokio::spawn(async move {
            let result = request.await;
            // The driver may be gone; then the result is simply dropped.
            let _ = done.send((generation, result));
        });
    };

    info!(poller = %label, ?cadence, "poller started");
    if let Some(generation) = scheduler.activate() {
        start(generation);
    }

    loop {
        // Commands first: a queued stop beats a completion queued beside it.
        tokio::select! {
            biased;

            command = commands.recv() => match command {
                Some(PollCommand::Refresh) => {
                    if let Some(generation) = scheduler.request_refresh() {
                        timer = None;
                        start(generation);
                    }
                }
                Some(PollCommand::Stop) | None => {
                    scheduler.stop();
                    break;
                }
            },
            Some((generation, result)) = done_rx.recv() => match scheduler.complete(generation) {
                Completion::Apply { rearm } => {
                    if updates.send(PollUpdate { generation, result }).is_err() {
                        // Nobody is listening any more.
                        scheduler.stop();
                        break;
                    }
                    timer = rearm.map(|delay| Box::pin(sleep(delay)));
                }
                Completion::Discard => {}
            },
            _ = tick(&mut timer) => {
                timer = None;
                if let Some(generation) = scheduler.timer_elapsed() {
                    start(generation);
                }
            }
        }
    }

    info!(poller = %label, "poller stopped");
}

/// Resolves when the armed timer fires; pends forever when none is armed.
async fn tick(timer: &mut Option<Pin<Box<Sleep>>>) {
    match timer {
        Some(sleep) => sleep.as_mut().await,
        None => std::future::pending().await,
    }
}
