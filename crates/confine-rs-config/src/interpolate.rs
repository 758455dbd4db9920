//! `${NAME}` substitution from an environment source.

use log::trace;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use thiserror::Error;

/// Token syntax: `${` followed by one or more ASCII letters or underscores and `}`.
pub const TOKEN_PATTERN: &str = r"\$\{([A-Za-z_]+)\}";

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TOKEN_PATTERN).expect("token pattern is a valid regex"));

/// Errors raised while substituting environment references.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpolationError {
    /// A referenced variable is not set.
    #[error("missing environment variable '{name}' (line {line})")]
    MissingVariable { name: String, line: usize },
}

/// A source of variable values.
pub trait Environment {
    /// Value of `name`, or `None` when unset.
    fn var(&self, name: &str) -> Option<String>;
}

impl<E: Environment + ?Sized> Environment for &E {
    fn var(&self, name: &str) -> Option<String> {
        (**self).var(name)
    }
}

/// Reads variables from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// In-memory variable set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnvironment {
    vars: HashMap<String, String>,
}

impl MapEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a variable.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnvironment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

impl Environment for MapEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// Replace every `${NAME}` token in `text` with the value from `env`.
///
/// Text is processed line by line and line terminators are kept as they are.
/// Each token is resolved independently and substituted values are not
/// scanned again. The first unresolved token fails the whole call.
pub fn interpolate<E: Environment + ?Sized>(
    text: &str,
    env: &E,
) -> Result<String, InterpolationError> {
    let mut output = String::with_capacity(text.len());
    for (idx, line) in text.split_inclusive('\n').enumerate() {
        let mut copied = 0;
        for captures in TOKEN.captures_iter(line) {
            let (Some(token), Some(name)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            let value = env
                .var(name.as_str())
                .ok_or_else(|| InterpolationError::MissingVariable {
                    name: name.as_str().to_string(),
                    line: idx + 1,
                })?;
            trace!("substituted ${{{}}} on line {}", name.as_str(), idx + 1);
            output.push_str(&line[copied..token.start()]);
            output.push_str(&value);
            copied = token.end();
        }
        output.push_str(&line[copied..]);
    }
    Ok(output)
}
