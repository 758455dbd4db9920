//! Per-type field tables.
//!
//! A configuration type opts into validation by implementing [`Validate`] and
//! registering each field with its getter and constraints. Registration order
//! is the order the walker visits fields in.

use crate::accessor::{self, Accessor};
use crate::constraint::Constraint;
use crate::error::{AccessError, BoxError, ValidationError};
use crate::node::Node;

/// Implemented by configuration types that carry field constraints.
///
/// ```
/// use confine_rs_validate::{AsNode, Constraint, Schema, Validate};
///
/// struct Listener {
///     host: String,
///     port: u16,
/// }
///
/// impl Validate for Listener {
///     fn describe(schema: &mut Schema<Self>) {
///         schema
///             .field("host", |l| l.host.as_node(), &[Constraint::NotBlank])
///             .field("port", |l| l.port.as_node(), &[Constraint::range(1.0, 65535.0)]);
///     }
/// }
/// ```
pub trait Validate: Sized {
    /// Register this type's fields.
    fn describe(schema: &mut Schema<Self>);

    /// Build the field table for this type.
    fn schema() -> Schema<Self> {
        let mut schema = Schema::new();
        Self::describe(&mut schema);
        schema
    }
}

/// Name and constraints of one registered field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    name: &'static str,
    constraints: Vec<Constraint>,
}

impl FieldSpec {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }
}

/// One entry of a field table.
pub struct FieldDef<T> {
    spec: FieldSpec,
    accessor: Accessor<T>,
}

impl<T> FieldDef<T> {
    pub fn name(&self) -> &'static str {
        self.spec.name
    }

    pub fn spec(&self) -> &FieldSpec {
        &self.spec
    }

    pub fn accessor(&self) -> Accessor<T> {
        self.accessor
    }
}

/// Ordered field table for a configuration type.
pub struct Schema<T> {
    type_name: &'static str,
    fields: Vec<FieldDef<T>>,
}

impl<T> Schema<T> {
    /// Empty table named after `T`'s simple type name.
    pub fn new() -> Self {
        Self {
            type_name: simple_type_name(std::any::type_name::<T>()),
            fields: Vec::new(),
        }
    }

    /// Override the type name used in violations.
    pub fn named(&mut self, type_name: &'static str) -> &mut Self {
        self.type_name = type_name;
        self
    }

    /// Register a field read directly from stored data.
    pub fn field(
        &mut self,
        name: &'static str,
        read: for<'a> fn(&'a T) -> Node<'a>,
        constraints: &[Constraint],
    ) -> &mut Self {
        self.push(name, Accessor::Direct(read), constraints)
    }

    /// Register a field backed by a fallible getter.
    pub fn computed(
        &mut self,
        name: &'static str,
        read: for<'a> fn(&'a T) -> Result<Node<'a>, BoxError>,
        constraints: &[Constraint],
    ) -> &mut Self {
        self.push(name, Accessor::Computed(read), constraints)
    }

    fn push(
        &mut self,
        name: &'static str,
        accessor: Accessor<T>,
        constraints: &[Constraint],
    ) -> &mut Self {
        self.fields.push(FieldDef {
            spec: FieldSpec {
                name,
                constraints: constraints.to_vec(),
            },
            accessor,
        });
        self
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn fields(&self) -> &[FieldDef<T>] {
        &self.fields
    }

    /// Find a registered field by name.
    pub fn field_def(&self, name: &str) -> Option<&FieldDef<T>> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Read a registered field.
    pub fn get<'a>(&self, field: &FieldDef<T>, instance: &'a T) -> Result<Node<'a>, AccessError> {
        accessor::read_field(field, self.type_name, instance)
    }

    /// Read a field by name.
    pub fn get_by_name<'a>(&self, instance: &'a T, name: &str) -> Result<Node<'a>, AccessError> {
        let field = self
            .field_def(name)
            .ok_or_else(|| AccessError::UnknownField {
                field: name.to_string(),
                owner: self.type_name,
            })?;
        self.get(field, instance)
    }
}

impl<T> Default for Schema<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Type-erased view of a validatable object, so graphs can mix arbitrary
/// configuration types.
pub trait Object {
    /// Name used in violations. Builds the field table, so keep it off hot
    /// paths.
    fn type_name(&self) -> &'static str;

    /// Fully qualified name of the runtime type, generic arguments included.
    fn qualified_type_name(&self) -> &'static str;

    /// Visit every registered field in declaration order, stopping at the
    /// first error returned by `visit`.
    fn for_each_field<'a>(
        &'a self,
        visit: &mut dyn FnMut(
            &'static str,
            &FieldSpec,
            Result<Node<'a>, AccessError>,
        ) -> Result<(), ValidationError>,
    ) -> Result<(), ValidationError>;
}

impl<T: Validate> Object for T {
    fn type_name(&self) -> &'static str {
        T::schema().type_name()
    }

    fn qualified_type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn for_each_field<'a>(
        &'a self,
        visit: &mut dyn FnMut(
            &'static str,
            &FieldSpec,
            Result<Node<'a>, AccessError>,
        ) -> Result<(), ValidationError>,
    ) -> Result<(), ValidationError> {
        let schema = T::schema();
        for field in schema.fields() {
            visit(schema.type_name(), field.spec(), schema.get(field, self))?;
        }
        Ok(())
    }
}

/// Strip the module path and generic arguments from a type name.
fn simple_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
