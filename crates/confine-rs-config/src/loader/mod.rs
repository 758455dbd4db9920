//! Read, interpolate, deserialize and validate a configuration document.
//!
//! Each load is a straight pipeline on the calling thread. Any stage failing
//! ends the load; there is no partial result.

#[cfg(test)]
mod tests;

use crate::format::{self, ConfigFormat};
use crate::interpolate::{Environment, ProcessEnv, interpolate};
use crate::ConfigError;
use confine_rs_validate::{Validate, Validator};
use log::{debug, info};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Label used for documents read from an anonymous stream.
const STREAM_LABEL: &str = "input stream";

/// Loads typed, validated configuration.
///
/// The loader owns its [`Validator`] and [`Environment`]; nothing is shared
/// between loads, so one loader may serve many calls.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader<E = ProcessEnv> {
    validator: Validator,
    env: E,
    format: Option<ConfigFormat>,
}

impl ConfigLoader<ProcessEnv> {
    /// Loader backed by the process environment and a default validator.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: Environment> ConfigLoader<E> {
    /// Resolve `${NAME}` tokens from `env` instead.
    pub fn with_environment<F: Environment>(self, env: F) -> ConfigLoader<F> {
        ConfigLoader {
            validator: self.validator,
            env,
            format: self.format,
        }
    }

    /// Use a specific validator.
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    /// Force a document format instead of detecting it from the file name.
    pub fn with_format(mut self, format: ConfigFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Load configuration from a file.
    pub fn load_from_path<T>(&self, path: impl AsRef<Path>) -> Result<T, ConfigError>
    where
        T: DeserializeOwned + Validate,
    {
        let path = path.as_ref();
        let from = format!("file '{}'", path.display());
        info!("loading config from path: {}", path.display());
        let file = File::open(path).map_err(|source| ConfigError::Read {
            from: from.clone(),
            source,
        })?;
        let format = self
            .format
            .unwrap_or_else(|| ConfigFormat::from_path(path));
        self.load(file, &from, format)
    }

    /// Load configuration from a readable stream.
    pub fn load_from_reader<T, R>(&self, reader: R) -> Result<T, ConfigError>
    where
        T: DeserializeOwned + Validate,
        R: Read,
    {
        info!("loading config from {STREAM_LABEL}");
        self.load(reader, STREAM_LABEL, self.format.unwrap_or_default())
    }

    /// Load configuration from raw document contents.
    pub fn load_from_str<T>(&self, contents: &str) -> Result<T, ConfigError>
    where
        T: DeserializeOwned + Validate,
    {
        debug!("loading config from raw contents (len={})", contents.len());
        self.parse(contents, "raw contents", self.format.unwrap_or_default())
    }

    fn load<T, R>(&self, reader: R, from: &str, format: ConfigFormat) -> Result<T, ConfigError>
    where
        T: DeserializeOwned + Validate,
        R: Read,
    {
        let mut raw = String::new();
        BufReader::new(reader)
            .read_to_string(&mut raw)
            .map_err(|source| ConfigError::Read {
                from: from.to_string(),
                source,
            })?;
        self.parse(&raw, from, format)
    }

    fn parse<T>(&self, raw: &str, from: &str, format: ConfigFormat) -> Result<T, ConfigError>
    where
        T: DeserializeOwned + Validate,
    {
        let text = interpolate(raw, &self.env)?;
        debug!(
            "interpolated config from {from} (len={}, format={:?})",
            text.len(),
            format
        );
        let config: T = format::deserialize(&text, format, from)?;
        self.validator.validate(&config)?;
        info!("config loaded from {from}");
        Ok(config)
    }
}

/// Read and validate a configuration file using the process environment.
pub fn read_configuration<T>(path: impl AsRef<Path>) -> Result<T, ConfigError>
where
    T: DeserializeOwned + Validate,
{
    ConfigLoader::new().load_from_path(path)
}

/// Read and validate a YAML configuration stream using the process
/// environment.
pub fn read_configuration_from<T, R>(reader: R) -> Result<T, ConfigError>
where
    T: DeserializeOwned + Validate,
    R: Read,
{
    ConfigLoader::new().load_from_reader(reader)
}
