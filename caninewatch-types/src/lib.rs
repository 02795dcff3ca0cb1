//! # caninewatch-types
//!
//! Core types for canine health monitoring. This crate defines the records
//! exchanged with the monitoring backend: sensor readings, health
//! assessments, alerts with their emergencies, fertility predictions and
//! dog profiles.
//!
//! ## Design Goals
//!
//! - **No required dependencies**: The types work without a serialization framework
//! - **Optional serialization**: Enable the `serde` feature to (de)serialize
//!   the backend's snake_case JSON format
//! - **Lenient decoding**: Fields the backend may omit decode to their defaults,
//!   mirroring what a permissive JSON client would do
//!
//! ## Features
//!
//! - `serde`: JSON serialization via serde
//!
//! ## Example
//!
//! ```rust
//! use caninewatch_types::{SensorReading, Severity};
//!
//! let reading = SensorReading {
//!     dog_name: "Max".to_string(),
//!     temperature: 38.6,
//!     activity_percent: 55,
//!     ..Default::default()
//! };
//!
//! // 0.0/0.0 is the backend's "no GPS fix" sentinel
//! assert!(reading.location().is_none());
//! assert_eq!("High".parse::<Severity>().unwrap(), Severity::High);
//! ```

mod alert;
mod fertility;
mod health;
mod profile;
mod reading;
mod severity;

#[cfg(feature = "serde")]
mod lenient;

pub use alert::*;
pub use fertility::*;
pub use health::*;
pub use profile::*;
pub use reading::*;
pub use severity::*;
