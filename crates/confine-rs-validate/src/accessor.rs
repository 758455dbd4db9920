//! Uniform read access to declared fields.

use crate::error::{AccessError, BoxError};
use crate::node::Node;
use crate::schema::FieldDef;

/// How a field's value is obtained from its owning instance.
pub enum Accessor<T> {
    /// Plain read of stored data; cannot fail.
    Direct(for<'a> fn(&'a T) -> Node<'a>),
    /// Derived or fallible getter.
    Computed(for<'a> fn(&'a T) -> Result<Node<'a>, BoxError>),
}

impl<T> Clone for Accessor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Accessor<T> {}

/// Read `field` from `instance`, wrapping getter failures with the field name
/// and owning type.
pub fn read_field<'a, T>(
    field: &FieldDef<T>,
    owner: &'static str,
    instance: &'a T,
) -> Result<Node<'a>, AccessError> {
    match field.accessor() {
        Accessor::Direct(read) => Ok(read(instance)),
        Accessor::Computed(read) => read(instance).map_err(|source| AccessError::Failed {
            field: field.name(),
            owner,
            source,
        }),
    }
}
