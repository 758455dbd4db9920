//! Configuration loading with environment interpolation and validation.
//!
//! Raw text is read from a file or stream, `${NAME}` tokens are replaced from
//! the environment, the result is deserialized into the caller's type and the
//! object graph is validated before it is returned.

mod error;
mod format;
mod interpolate;
mod loader;

/// Public error type returned by config loading APIs.
pub use error::ConfigError;
/// Document formats understood by the loader.
pub use format::{ConfigFormat, deserialize};
/// Environment sources and token substitution.
pub use interpolate::{
    Environment, InterpolationError, MapEnvironment, ProcessEnv, TOKEN_PATTERN, interpolate,
};
/// Loader and convenience entry points.
pub use loader::{ConfigLoader, read_configuration, read_configuration_from};
