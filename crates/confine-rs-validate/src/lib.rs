//! Constraint-driven validation for configuration object graphs.
//!
//! Configuration types register a field table through [`Validate`]. A
//! [`Validator`] then walks the graph rooted at a value, checking each
//! field's [`Constraint`]s and recursing into nested objects, sequences and
//! mappings. The first violation aborts the walk.

mod accessor;
mod constraint;
mod error;
mod node;
mod schema;
mod walker;

/// Field getters and the uniform read operation.
pub use accessor::{Accessor, read_field};
/// Constraint descriptors and their evaluation.
pub use constraint::{Constraint, evaluate};
/// Access and validation errors.
pub use error::{AccessError, BoxError, ValidationError, Violation, ViolationKind};
/// Node views over configuration values.
pub use node::{AsNode, Node, Shape};
/// Field tables and type-erased objects.
pub use schema::{FieldDef, FieldSpec, Object, Schema, Validate};
/// Graph walker.
pub use walker::Validator;
