//! Types.

use serde::Deserialize;
use strum::{Display, EnumString};
pub use tracing::{
    field::{Field, Visit},
    Level, Value,
};

/// Category and tag of log event.
///
/// Don't hesitate to add your variant if it is missing here.
#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum Tag {
    /// General.
    #[default]
    General,

    /// Fetching the public key used by the BIN lookup service.
    KeyFetch,
    /// Remote BIN lookup.
    BinLookup,
    /// Local, pattern based card brand detection.
    FallbackLookup,
    /// Security code field policy changes.
    SecurityCodePolicy,

    /// Payment component construction.
    ComponentBuild,
    /// Payment component submission.
    Submission,
}
