//! Local decision logic over fetched data.
//!
//! Everything here is synchronous and pure: classification, alert
//! resolution and bookkeeping run over data that has already arrived.
//!
//! ## Submodules
//!
//! - [`thresholds`]: Local temperature/activity tiers and severity precedence
//! - [`alerts`]: Resolving raw alert records into display-ready [`Alert`](caninewatch_types::Alert)s
//! - [`history`]: Recent readings for sparklines
//! - [`duration`]: Parsing and formatting of refresh intervals (e.g., "10s", "500ms")
//! - [`fertility`]: Preparing fertility prediction requests
//!
//! ## Data Flow
//!
//! ```text
//! SensorReading ──▶ thresholds::classify() ──▶ LocalTier ─┐
//!                                                          ├─▶ effective_severity()
//! HealthAssessment.severity ───────────────────────────────┘
//!
//! alert records (JSON) ──▶ alerts::aggregate() ──▶ AlertSet (malformed records skipped)
//! ```

pub mod alerts;
pub mod duration;
pub mod fertility;
pub mod history;
pub mod thresholds;

pub use alerts::{aggregate, resolve_severity, AlertSet, MalformedAlert};
pub use history::History;
pub use thresholds::{
    classify, effective_severity, ActivityBand, CriticalBand, LocalTier, SeverityBasis,
    TemperatureBand, TierFlag,
};
