//! Document formats and the typed deserialization boundary.

use crate::ConfigError;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Structured document formats accepted by the loader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML documents.
    #[default]
    Yaml,
    /// JSON5 documents (plain JSON included).
    Json5,
}

impl ConfigFormat {
    /// Pick a format from a file extension, falling back to YAML.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json5") | Some("json") => ConfigFormat::Json5,
            _ => ConfigFormat::Yaml,
        }
    }
}

/// Decode interpolated text into `T`.
///
/// A document that holds no value (empty, comments only, or an explicit
/// null) is reported as [`ConfigError::EmptyDocument`] rather than decoded.
pub fn deserialize<T: DeserializeOwned>(
    text: &str,
    format: ConfigFormat,
    from: &str,
) -> Result<T, ConfigError> {
    if is_blank_document(text, format) {
        return Err(empty(from));
    }
    match format {
        ConfigFormat::Yaml => {
            let value: serde_yaml::Value =
                serde_yaml::from_str(text).map_err(|err| parse_failed(from, err))?;
            if value.is_null() {
                return Err(empty(from));
            }
            serde_yaml::from_value(value).map_err(|err| parse_failed(from, err))
        }
        ConfigFormat::Json5 => {
            let value: serde_json::Value =
                json5::from_str(text).map_err(|err| parse_failed(from, err))?;
            if value.is_null() {
                return Err(empty(from));
            }
            serde_json::from_value(value).map_err(|err| parse_failed(from, err))
        }
    }
}

/// Whether the text carries nothing but whitespace, comments and YAML
/// document markers.
fn is_blank_document(text: &str, format: ConfigFormat) -> bool {
    match format {
        ConfigFormat::Yaml => text.lines().all(|line| {
            let line = line.trim();
            line.is_empty() || line.starts_with('#') || line == "---"
        }),
        ConfigFormat::Json5 => is_blank_json5(text),
    }
}

/// Whitespace, `//` line comments and closed `/* */` block comments only.
fn is_blank_json5(text: &str) -> bool {
    let mut rest = text.trim_start();
    while !rest.is_empty() {
        if let Some(comment) = rest.strip_prefix("//") {
            rest = comment.split_once('\n').map_or("", |(_, tail)| tail);
        } else if let Some(comment) = rest.strip_prefix("/*") {
            let Some((_, tail)) = comment.split_once("*/") else {
                return false;
            };
            rest = tail;
        } else {
            return false;
        }
        rest = rest.trim_start();
    }
    true
}

fn empty(from: &str) -> ConfigError {
    ConfigError::EmptyDocument {
        from: from.to_string(),
    }
}

fn parse_failed(from: &str, err: impl std::fmt::Display) -> ConfigError {
    ConfigError::Parse {
        from: from.to_string(),
        message: err.to_string(),
    }
}
