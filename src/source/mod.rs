//! Where screen data comes from.
//!
//! - [`FixtureFeed`]: a [`SensorFeed`](caninewatch_client::SensorFeed) backed
//!   by a JSON file, for demos and offline use
//! - [`PollSource`]: the non-blocking, per-screen end of a poller

mod fixture;
mod poller;

pub use fixture::FixtureFeed;
pub use poller::PollSource;
