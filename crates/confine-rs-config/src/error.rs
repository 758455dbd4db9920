//! Error types for config loading and validation.

use crate::interpolate::InterpolationError;
use confine_rs_validate::{AccessError, ValidationError, Violation};
use thiserror::Error;

/// Errors returned while loading or validating config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the config source failed.
    #[error("failed to read config from {from}: {source}")]
    Read {
        from: String,
        #[source]
        source: std::io::Error,
    },
    /// A `${NAME}` token could not be resolved.
    #[error("failed to interpolate config: {0}")]
    Interpolation(#[from] InterpolationError),
    /// The document could not be decoded into the target type.
    #[error("failed to parse config from {from}: {message}")]
    Parse { from: String, message: String },
    /// The document decoded to nothing.
    #[error("config from {from} produced no configuration")]
    EmptyDocument { from: String },
    /// A declared field could not be read.
    #[error("failed to access config field: {0}")]
    Access(#[from] AccessError),
    /// A field constraint was violated.
    #[error("invalid config at {path}: {0}", path = .0.path)]
    Validation(Violation),
    /// The object graph refers back to itself.
    #[error("invalid config: cyclic structure at {path} ('{owner}')")]
    Cycle { owner: &'static str, path: String },
}

impl ConfigError {
    /// Whether this error is a constraint violation in otherwise readable
    /// config.
    pub fn is_validation(&self) -> bool {
        matches!(self, ConfigError::Validation(_))
    }

    /// The violation, when this error is a constraint failure.
    pub fn violation(&self) -> Option<&Violation> {
        match self {
            ConfigError::Validation(violation) => Some(violation),
            _ => None,
        }
    }
}

impl From<ValidationError> for ConfigError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::Violation(violation) => ConfigError::Validation(violation),
            ValidationError::Access(err) => ConfigError::Access(err),
            ValidationError::Cycle { owner, path } => ConfigError::Cycle { owner, path },
        }
    }
}
