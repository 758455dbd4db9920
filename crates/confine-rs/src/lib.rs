//! Typed configuration loading for confine-rs.
//!
//! This crate re-exports the loader and validator crates and provides a small
//! logging initializer for binaries.
//!
//! ```no_run
//! use confine_rs::{AsNode, Constraint, Schema, Validate};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Settings {
//!     endpoint: String,
//!     workers: u8,
//! }
//!
//! impl Validate for Settings {
//!     fn describe(schema: &mut Schema<Self>) {
//!         schema
//!             .field("endpoint", |s| s.endpoint.as_node(), &[Constraint::NotBlank])
//!             .field("workers", |s| s.workers.as_node(), &[Constraint::range(1.0, 16.0)]);
//!     }
//! }
//!
//! let settings: Settings = confine_rs::read_configuration("settings.yml")?;
//! # Ok::<(), confine_rs::ConfigError>(())
//! ```

/// Re-export for convenience.
pub use confine_rs_config as config;
/// Re-export for convenience.
pub use confine_rs_validate as validate;

pub use confine_rs_config::{
    ConfigError, ConfigFormat, ConfigLoader, Environment, MapEnvironment, ProcessEnv,
    read_configuration, read_configuration_from,
};
pub use confine_rs_validate::{
    AsNode, Constraint, Node, Schema, Validate, ValidationError, Validator, Violation,
    ViolationKind,
};

#[inline]
/// Initialize logging using env_logger if the "logging" feature is enabled.
///
/// This is a no-op if the feature is not enabled. Binaries are still expected
/// to call this early in startup so loader output is wired up.
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        let _ = env_logger::try_init();
    }
}
