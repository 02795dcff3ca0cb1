//! Refresh scheduling.
//!
//! - [`scheduler`]: the pure state machine (Idle, Polling, Scheduled, Stopped)
//!   with generation tags and refresh coalescing
//! - [`driver`]: a tokio task per screen that feeds the state machine with
//!   commands, fetch completions and timer ticks

pub mod driver;
pub mod scheduler;

pub use driver::{spawn_poller, PollCommand, PollHandle, PollUpdate};
pub use scheduler::{Cadence, Completion, Generation, PollScheduler, PollState};
