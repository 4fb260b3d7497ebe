//!
//! Logger of the checkout form crates.
//!

pub mod config;
pub mod setup;
pub mod types;

pub use setup::{setup, TelemetryGuard};
pub use tracing::{debug, error, event as log, info, trace, warn};
pub use tracing_attributes::instrument;
pub use types::Tag;

pub use self::config::Config;
