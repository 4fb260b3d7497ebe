//! Enumerations shared by the checkout form crates.

pub mod enums;

pub use enums::*;
