//! Minimal flat configuration fixture.

use confine_rs_validate::{AsNode, Constraint, Schema, Validate};
use serde::Deserialize;

/// A valid YAML document for [`SampleConfig`].
pub const VALID_SAMPLE_YAML: &str = "string: Some String\ninteger: 5\nbool: true\n";

/// A YAML document for [`SampleConfig`] whose `integer` is below its minimum.
pub const INVALID_SAMPLE_YAML: &str = "string: Some String\ninteger: 3\nbool: false\n";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SampleConfig {
    #[serde(default)]
    pub string: Option<String>,
    pub integer: i64,
    #[serde(default)]
    pub bool: bool,
}

impl Validate for SampleConfig {
    fn describe(schema: &mut Schema<Self>) {
        schema
            .field("string", |c| c.string.as_node(), &[Constraint::NotBlank])
            .field("integer", |c| c.integer.as_node(), &[Constraint::at_least(4.0)])
            .field("bool", |c| c.bool.as_node(), &[]);
    }
}
