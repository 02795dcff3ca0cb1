//! The poll state machine.
//!
//! [`PollScheduler`] owns no timers and does no I/O. It only decides, for
//! each event, whether a fetch should start and whether a finished fetch
//! may be applied. The tokio driver in [`super::driver`] feeds it events.
//!
//! ```text
//!            activate / refresh
//!   Idle ─────────────────────────▶ Polling ◀──────────────┐
//!    ▲                                │                     │ timer / refresh
//!    │ complete (on demand)           │ complete (periodic) │
//!    └────────────────────────────────┴───────▶ Scheduled ──┘
//!
//!   any state ── stop ──▶ Stopped (terminal)
//! ```

use std::fmt;
use std::time::Duration;

use tracing::debug;

/// How often a screen refreshes on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// Re-fetch this long after each completed fetch.
    Every(Duration),
    /// Only fetch when asked.
    OnDemand,
}

/// Scheduler state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Idle,
    Polling,
    Scheduled,
    Stopped,
}

/// Tag identifying one issued fetch. Strictly increasing per scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen={}", self.0)
    }
}

/// What to do with a finished fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Apply the result, then arm a timer if a delay is given.
    Apply { rearm: Option<Duration> },
    /// The result is stale or the scheduler stopped; drop it.
    Discard,
}

/// Poll state machine for one screen.
#[derive(Debug, Clone)]
pub struct PollScheduler {
    state: PollState,
    cadence: Cadence,
    last_issued: u64,
    in_flight: Option<Generation>,
}

impl PollScheduler {
    pub fn new(cadence: Cadence) -> Self {
        Self {
            state: PollState::Idle,
            cadence,
            last_issued: 0,
            in_flight: None,
        }
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    pub fn cadence(&self) -> Cadence {
        self.cadence
    }

    /// The fetch currently awaited, if any.
    pub fn in_flight(&self) -> Option<Generation> {
        self.in_flight
    }

    /// First fetch when a screen becomes active. Only valid from `Idle`.
    pub fn activate(&mut self) -> Option<Generation> {
        match self.state {
            PollState::Idle => Some(self.issue()),
            _ => None,
        }
    }

    /// Manual refresh.
    ///
    /// Starts a fetch from `Idle` or `Scheduled` (cancelling the pending
    /// delay). While a fetch is already in flight the request is coalesced
    /// into it and nothing new is issued.
    pub fn request_refresh(&mut self) -> Option<Generation> {
        match self.state {
            PollState::Idle | PollState::Scheduled => Some(self.issue()),
            PollState::Polling => {
                debug!(in_flight = ?self.in_flight, "refresh coalesced into in-flight fetch");
                None
            }
            PollState::Stopped => None,
        }
    }

    /// The re-trigger delay elapsed. Ignored unless a delay was pending.
    pub fn timer_elapsed(&mut self) -> Option<Generation> {
        match self.state {
            PollState::Scheduled => Some(self.issue()),
            _ => None,
        }
    }

    /// A fetch finished, successfully or not.
    pub fn complete(&mut self, generation: Generation) -> Completion {
        if self.state != PollState::Polling || self.in_flight != Some(generation) {
            debug!(%generation, state = ?self.state, "discarding stale fetch result");
            return Completion::Discard;
        }

        self.in_flight = None;
        match self.cadence {
            Cadence::Every(delay) => {
                self.state = PollState::Scheduled;
                Completion::Apply { rearm: Some(delay) }
            }
            Cadence::OnDemand => {
                self.state = PollState::Idle;
                Completion::Apply { rearm: None }
            }
        }
    }

    /// Tear down. Terminal: every later event is ignored.
    pub fn stop(&mut self) {
        self.state = PollState::Stopped;
        self.in_flight = None;
    }

    fn issue(&mut self) -> Generation {
        self.last_issued += 1;
        let generation = Generation(self.last_issued);
        self.in_flight = Some(generation);
        self.state = PollState::Polling;
        generation
    }
}
