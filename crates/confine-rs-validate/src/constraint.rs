//! Field-level constraint descriptors and their evaluation.

use crate::error::ViolationKind;
use crate::node::Node;

/// A declarative rule attached to a single field.
///
/// Every constraint implies presence: an absent value fails with
/// [`ViolationKind::Absent`] before any kind-specific check runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constraint {
    /// Value must be present.
    Required,
    /// String must contain at least one non-whitespace character.
    NotBlank,
    /// Sequence or mapping must contain at least one element.
    NotEmpty,
    /// Number must lie within `[min, max]`, both ends inclusive.
    Range { min: f64, max: f64 },
    /// Sequence length must lie within `[min, max]`, both ends inclusive.
    Size { min: usize, max: usize },
}

impl Constraint {
    /// Inclusive numeric range.
    pub const fn range(min: f64, max: f64) -> Self {
        Constraint::Range { min, max }
    }

    /// Numeric lower bound with no upper bound.
    pub const fn at_least(min: f64) -> Self {
        Constraint::Range { min, max: f64::MAX }
    }

    /// Numeric upper bound with no lower bound.
    pub const fn at_most(max: f64) -> Self {
        Constraint::Range { min: f64::MIN, max }
    }

    /// Inclusive sequence length range.
    pub const fn size(min: usize, max: usize) -> Self {
        Constraint::Size { min, max }
    }

    /// Minimum sequence length.
    pub const fn min_size(min: usize) -> Self {
        Constraint::Size {
            min,
            max: usize::MAX,
        }
    }

    /// Maximum sequence length.
    pub const fn max_size(max: usize) -> Self {
        Constraint::Size { min: 0, max }
    }

    /// Short name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Constraint::Required => "required",
            Constraint::NotBlank => "not_blank",
            Constraint::NotEmpty => "not_empty",
            Constraint::Range { .. } => "range",
            Constraint::Size { .. } => "size",
        }
    }

    /// Check a present value against this constraint.
    ///
    /// Presence is not re-checked here; callers go through [`evaluate`].
    pub fn check(&self, node: &Node<'_>) -> Result<(), ViolationKind> {
        match *self {
            Constraint::Required => Ok(()),
            Constraint::NotBlank => match node {
                Node::Str(value) if value.trim().is_empty() => Err(ViolationKind::Blank),
                Node::Str(_) => Ok(()),
                other => Err(self.mismatch("string", other)),
            },
            Constraint::NotEmpty => match node.len() {
                Some(0) => Err(ViolationKind::Empty),
                Some(_) => Ok(()),
                None => Err(self.mismatch("sequence or mapping", node)),
            },
            Constraint::Range { min, max } => {
                let Some(actual) = node.as_f64() else {
                    return Err(self.mismatch("number", node));
                };
                if within(node, min, max, actual) {
                    Ok(())
                } else {
                    Err(ViolationKind::OutOfRange { min, max, actual })
                }
            }
            Constraint::Size { min, max } => {
                let Node::Seq(items) = node else {
                    return Err(self.mismatch("sequence", node));
                };
                let actual = items.len();
                if (min..=max).contains(&actual) {
                    Ok(())
                } else {
                    Err(ViolationKind::SizeOutOfRange { min, max, actual })
                }
            }
        }
    }

    fn mismatch(&self, expected: &'static str, found: &Node<'_>) -> ViolationKind {
        ViolationKind::TypeMismatch {
            constraint: self.name(),
            expected,
            found: found.shape(),
        }
    }
}

/// Inclusive range test. Integers are compared exactly when both bounds are
/// whole numbers; the casts saturate, so open-ended bounds still hold.
fn within(node: &Node<'_>, min: f64, max: f64, actual: f64) -> bool {
    match node.as_i128() {
        Some(value) if min.fract() == 0.0 && max.fract() == 0.0 => {
            min as i128 <= value && value <= max as i128
        }
        // NaN fails both comparisons.
        _ => min <= actual && actual <= max,
    }
}

/// Evaluate a field's constraints against its value.
///
/// Presence is checked first whenever any constraint is declared, then the
/// remaining constraints run in declaration order. The first failure wins.
pub fn evaluate(constraints: &[Constraint], node: &Node<'_>) -> Result<(), ViolationKind> {
    if constraints.is_empty() {
        return Ok(());
    }
    if node.is_absent() {
        return Err(ViolationKind::Absent);
    }
    for constraint in constraints {
        constraint.check(node)?;
    }
    Ok(())
}
