//! Error types for field access and graph validation.

use crate::node::Shape;
use std::fmt;
use thiserror::Error;

/// Boxed error returned by computed field getters.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Reason a single constraint rejected a value.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationKind {
    /// Value was absent.
    Absent,
    /// String was empty or whitespace only.
    Blank,
    /// Sequence or mapping had no elements.
    Empty,
    /// Number fell outside the declared range.
    OutOfRange { min: f64, max: f64, actual: f64 },
    /// Sequence length fell outside the declared range.
    SizeOutOfRange {
        min: usize,
        max: usize,
        actual: usize,
    },
    /// Constraint was declared on a field of the wrong shape.
    TypeMismatch {
        constraint: &'static str,
        expected: &'static str,
        found: Shape,
    },
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::Absent => f.write_str("must not be absent"),
            ViolationKind::Blank => f.write_str("must not be blank"),
            ViolationKind::Empty => f.write_str("must not be empty"),
            ViolationKind::OutOfRange { min, max, actual } => {
                if *max == f64::MAX {
                    write!(f, "must be at least {min} (was {actual})")
                } else if *min == f64::MIN {
                    write!(f, "must be at most {max} (was {actual})")
                } else {
                    write!(f, "must be between {min} and {max} (was {actual})")
                }
            }
            ViolationKind::SizeOutOfRange { min, max, actual } => {
                if *max == usize::MAX {
                    write!(f, "must have at least {min} entries (has {actual})")
                } else {
                    write!(
                        f,
                        "must have between {min} and {max} entries (has {actual})"
                    )
                }
            }
            ViolationKind::TypeMismatch {
                constraint,
                expected,
                found,
            } => write!(
                f,
                "declares '{constraint}' which expects a {expected} value, found {found}"
            ),
        }
    }
}

/// The first constraint failure found while walking a graph.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("field '{field}' on '{owner}' {kind}")]
pub struct Violation {
    /// Name of the offending field.
    pub field: &'static str,
    /// Simple name of the type that declares the field.
    pub owner: &'static str,
    /// Dotted path from the root, e.g. `servers[1].host`.
    pub path: String,
    /// What went wrong.
    pub kind: ViolationKind,
}

/// Errors raised while reading a declared field.
#[derive(Debug, Error)]
pub enum AccessError {
    /// A computed getter failed.
    #[error("error reading field '{field}' on '{owner}': {source}")]
    Failed {
        field: &'static str,
        owner: &'static str,
        #[source]
        source: BoxError,
    },
    /// No field with that name is registered on the type.
    #[error("field '{field}' is not declared on '{owner}'")]
    UnknownField { field: String, owner: &'static str },
}

/// Errors returned by [`Validator`](crate::Validator).
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A constraint was violated.
    #[error(transparent)]
    Violation(#[from] Violation),
    /// A field could not be read.
    #[error(transparent)]
    Access(#[from] AccessError),
    /// An object was reached again while still being validated.
    #[error("cyclic structure at {path}: '{owner}' contains itself")]
    Cycle { owner: &'static str, path: String },
}

impl ValidationError {
    /// The violation, when this error is a constraint failure.
    pub fn violation(&self) -> Option<&Violation> {
        match self {
            ValidationError::Violation(violation) => Some(violation),
            _ => None,
        }
    }
}
