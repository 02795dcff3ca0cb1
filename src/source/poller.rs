//! Screen-side view of a running poller.

use tokio::sync::mpsc;

use caninewatch_client::FeedError;

use crate::poll::{PollHandle, PollUpdate};

/// Non-blocking receiver for one screen's poll results.
///
/// The UI loop calls [`PollSource::poll`] every frame; it never waits on
/// the network. Dropping the source tears its poller down.
#[derive(Debug)]
pub struct PollSource<T> {
    handle: PollHandle,
    receiver: mpsc::UnboundedReceiver<PollUpdate<T>>,
    last_error: Option<String>,
    in_progress: bool,
}

impl<T> PollSource<T> {
    pub fn new(handle: PollHandle, receiver: mpsc::UnboundedReceiver<PollUpdate<T>>) -> Self {
        Self {
            handle,
            receiver,
            last_error: None,
            // The first fetch starts as soon as the poller is spawned.
            in_progress: true,
        }
    }

    /// Take the next applied result, if one arrived.
    pub fn poll(&mut self) -> Option<Result<T, FeedError>> {
        match self.receiver.try_recv() {
            Ok(update) => {
                self.in_progress = false;
                self.last_error = update.result.as_ref().err().map(ToString::to_string);
                Some(update.result)
            }
            Err(mpsc::error::TryRecvError::Empty) => None,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                self.in_progress = false;
                None
            }
        }
    }

    /// Ask for a fetch now.
    pub fn refresh(&mut self) {
        self.in_progress = true;
        self.handle.refresh();
    }

    /// Whether a result is still expected.
    pub fn is_loading(&self) -> bool {
        self.in_progress
    }

    pub fn description(&self) -> &str {
        self.handle.label()
    }

    /// The error of the last applied result, if it failed.
    pub fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
