//!
//! Current environment related stuff.
//!

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Parent dir where Cargo.toml is stored
pub const CARGO_MANIFEST_DIR: &str = "CARGO_MANIFEST_DIR";
/// Env variable that sets Development/Sandbox/Production env
pub const RUN_ENV: &str = "RUN_ENV";
/// Prefix of environment variables overriding values from config files
pub const ENV_PREFIX: &str = "CHECKOUT";

///
/// Current environment.
///
#[derive(
    Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Display, EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Env {
    /// Development environment.
    #[default]
    Development,
    /// Sandbox environment.
    Sandbox,
    /// Production environment.
    Production,
}

impl Env {
    /// File name of the config file for this environment, e.g. `development.toml`.
    pub fn config_file_name(self) -> String {
        format!("{self}.toml")
    }
}

/// Current environment. Read from `RUN_ENV`, defaulting to development in debug builds and
/// production otherwise.
pub fn which() -> Env {
    #[cfg(debug_assertions)]
    let default_env = Env::Development;
    #[cfg(not(debug_assertions))]
    let default_env = Env::Production;

    std::env::var(RUN_ENV).map_or_else(|_| default_env, |v| v.parse().unwrap_or(default_env))
}

///
/// Base path to look for config and logs directories.
/// The `config/` and `logs/` directories live at the workspace root, two levels above the
/// manifest of any member crate. Falls back to the current directory when not run by cargo.
///
pub fn workspace_path() -> PathBuf {
    if let Ok(manifest_dir) = std::env::var(CARGO_MANIFEST_DIR) {
        let mut path = PathBuf::from(manifest_dir);
        path.pop();
        path.pop();
        path
    } else {
        PathBuf::from(".")
    }
}

/// Path of the config file for the current environment.
pub fn config_path() -> PathBuf {
    let mut path = workspace_path();
    path.push("config");
    path.push(which().config_file_name());
    path
}

///
/// Service name deduced from name of the crate.
///
/// Example: `payment_methods`.
///
#[macro_export]
macro_rules! service_name {
    () => {
        env!("CARGO_CRATE_NAME")
    };
}
