//! # caninewatch-client
//!
//! The network boundary of the canine monitoring pipeline.
//!
//! [`SensorFeed`] is the contract the rest of the system consumes: latest
//! readings, alert records, server-side health checks, fertility predictions,
//! heat-cycle history, dog profiles and the breed list. [`HttpFeed`] is the
//! implementation that talks to the backend's JSON API.
//!
//! Every call returns either a complete result or a [`FeedError`]. Timeouts
//! and unreachable hosts share [`FailureKind::Unreachable`], and an empty
//! result is "no data yet", never an error.
//!
//! ## Features
//!
//! - `http` (default): the reqwest-backed [`HttpFeed`]
//!
//! ## Example
//!
//! ```rust,no_run
//! use caninewatch_client::{HttpFeed, SensorFeed};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let feed = HttpFeed::builder().build()?;
//!
//!     let batch = feed.fetch_alerts(10).await?;
//!     println!("{} alert records", batch.count);
//!     Ok(())
//! }
//! ```

pub mod error;
mod envelope;
mod feed;
pub mod validate;

#[cfg(feature = "http")]
pub mod http;

pub use error::{FailureKind, FeedError};
pub use feed::{AlertBatch, SensorFeed};

#[cfg(feature = "http")]
pub use http::{HttpFeed, HttpFeedBuilder};

// Re-export types for convenience
pub use caninewatch_types as types;
