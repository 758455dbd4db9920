//! Recursive, fail-fast validation of configuration object graphs.

use crate::constraint;
use crate::error::{AccessError, ValidationError, Violation};
use crate::node::Node;
use crate::schema::{FieldSpec, Object, Validate};
use log::{debug, trace};

/// Walks an object graph and checks every registered field constraint.
///
/// The walk stops at the first violation. Graphs are assumed to be acyclic;
/// a self-referencing graph recurses without bound unless cycle detection is
/// enabled with [`Validator::with_cycle_detection`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    detect_cycles: bool,
}

impl Validator {
    /// Validator with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Track objects on the current descent path and fail with
    /// [`ValidationError::Cycle`] when one is reached again.
    pub fn with_cycle_detection(mut self, enabled: bool) -> Self {
        self.detect_cycles = enabled;
        self
    }

    /// Validate a typed root object.
    pub fn validate<T: Validate>(&self, root: &T) -> Result<(), ValidationError> {
        self.validate_node(&Node::object(root))
    }

    /// Validate any node, typed object or otherwise.
    pub fn validate_node(&self, node: &Node<'_>) -> Result<(), ValidationError> {
        debug!("validating config graph (root={})", node.shape());
        let mut walk = Walk {
            detect_cycles: self.detect_cycles,
            path: Vec::new(),
            ancestors: Vec::new(),
        };
        let result = walk.node(node);
        match &result {
            Ok(()) => debug!("config graph is valid"),
            Err(err) => debug!("config graph rejected: {err}"),
        }
        result
    }
}

/// One step in the path from the root to the current node.
enum Segment {
    Field(&'static str),
    Index(usize),
    Key(String),
}

/// State for a single validation call.
struct Walk {
    detect_cycles: bool,
    path: Vec<Segment>,
    ancestors: Vec<(usize, &'static str)>,
}

impl Walk {
    fn node(&mut self, node: &Node<'_>) -> Result<(), ValidationError> {
        match node {
            Node::Absent
            | Node::Bool(_)
            | Node::Int(_)
            | Node::UInt(_)
            | Node::Float(_)
            | Node::Str(_)
            | Node::Enum(_) => Ok(()),
            Node::Seq(items) => {
                for (idx, item) in items.iter().enumerate() {
                    self.path.push(Segment::Index(idx));
                    let result = self.node(item);
                    self.path.pop();
                    result?;
                }
                Ok(())
            }
            Node::Map(entries) => {
                for (key, value) in entries {
                    self.path.push(Segment::Key(key.clone()));
                    let result = self.node(value);
                    self.path.pop();
                    result?;
                }
                Ok(())
            }
            Node::Object(object) => self.object(*object),
        }
    }

    fn object(&mut self, object: &dyn Object) -> Result<(), ValidationError> {
        // A field at offset zero shares its owner's address, so identity
        // needs the qualified type as well.
        let identity = if self.detect_cycles {
            let identity = (
                std::ptr::from_ref(object).cast::<()>() as usize,
                object.qualified_type_name(),
            );
            if self.ancestors.contains(&identity) {
                return Err(ValidationError::Cycle {
                    owner: object.type_name(),
                    path: self.render_path(),
                });
            }
            self.ancestors.push(identity);
            true
        } else {
            false
        };

        trace!("entering object at {}", self.render_path());
        let result = object.for_each_field(
            &mut |owner, spec, value| self.field(owner, spec, value),
        );

        if identity {
            self.ancestors.pop();
        }
        result
    }

    fn field(
        &mut self,
        owner: &'static str,
        spec: &FieldSpec,
        value: Result<Node<'_>, AccessError>,
    ) -> Result<(), ValidationError> {
        let node = value?;
        self.path.push(Segment::Field(spec.name()));
        let result = self.check_field(owner, spec, &node);
        self.path.pop();
        result
    }

    fn check_field(
        &mut self,
        owner: &'static str,
        spec: &FieldSpec,
        node: &Node<'_>,
    ) -> Result<(), ValidationError> {
        if let Err(kind) = constraint::evaluate(spec.constraints(), node) {
            return Err(Violation {
                field: spec.name(),
                owner,
                path: self.render_path(),
                kind,
            }
            .into());
        }
        if node.is_absent() {
            return Ok(());
        }
        self.node(node)
    }

    fn render_path(&self) -> String {
        let mut rendered = String::new();
        for segment in &self.path {
            match segment {
                Segment::Field(name) => {
                    if !rendered.is_empty() {
                        rendered.push('.');
                    }
                    rendered.push_str(name);
                }
                Segment::Key(key) => {
                    if !rendered.is_empty() {
                        rendered.push('.');
                    }
                    rendered.push_str(key);
                }
                Segment::Index(idx) => {
                    rendered.push('[');
                    rendered.push_str(&idx.to_string());
                    rendered.push(']');
                }
            }
        }
        if rendered.is_empty() {
            "root".to_string()
        } else {
            rendered
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::Constraint;
    use crate::error::ViolationKind;
    use crate::node::AsNode;
    use crate::schema::Schema;
    use pretty_assertions::assert_eq;
    use std::cell::OnceCell;
    use std::rc::Rc;

    struct Leaf {
        name: Option<String>,
    }

    impl Validate for Leaf {
        fn describe(schema: &mut Schema<Self>) {
            schema.field("name", |l| l.name.as_node(), &[Constraint::NotBlank]);
        }
    }

    struct Branch {
        leaves: Vec<Leaf>,
    }

    impl Validate for Branch {
        fn describe(schema: &mut Schema<Self>) {
            schema.field("leaves", |b| b.leaves.as_node(), &[]);
        }
    }

    struct Ring {
        next: OnceCell<Rc<Ring>>,
    }

    impl Validate for Ring {
        fn describe(schema: &mut Schema<Self>) {
            schema.named("RingNode").field(
                "next",
                |r| match r.next.get() {
                    Some(next) => next.as_node(),
                    None => Node::Absent,
                },
                &[],
            );
        }
    }

    struct Wrapper<T> {
        inner: T,
    }

    impl<T: AsNode> Validate for Wrapper<T> {
        fn describe(schema: &mut Schema<Self>) {
            schema.field("inner", |w| w.inner.as_node(), &[Constraint::Required]);
        }
    }

    mod outer {
        use super::*;

        pub struct Config {
            pub inner: inner::Config,
        }

        impl Validate for Config {
            fn describe(schema: &mut Schema<Self>) {
                schema.field("inner", |c| c.inner.as_node(), &[]);
            }
        }

        pub mod inner {
            use super::*;

            pub struct Config {
                pub port: u16,
            }

            impl Validate for Config {
                fn describe(schema: &mut Schema<Self>) {
                    schema.field("port", |c| c.port.as_node(), &[Constraint::at_least(1.0)]);
                }
            }
        }
    }

    fn leaf(name: Option<&str>) -> Leaf {
        Leaf {
            name: name.map(str::to_string),
        }
    }

    #[test]
    fn scalars_and_absent_roots_are_valid() {
        let validator = Validator::new();
        assert!(validator.validate_node(&Node::Absent).is_ok());
        assert!(validator.validate_node(&42u8.as_node()).is_ok());
        assert!(validator.validate_node(&Node::Enum("Info")).is_ok());
    }

    #[test]
    fn sequence_paths_include_index() {
        let branch = Branch {
            leaves: vec![leaf(Some("a")), leaf(Some("  ")), leaf(None)],
        };
        let err = Validator::new().validate(&branch).unwrap_err();
        let violation = err.violation().expect("violation");
        assert_eq!(violation.field, "name");
        assert_eq!(violation.owner, "Leaf");
        assert_eq!(violation.path, "leaves[1].name");
        assert_eq!(violation.kind, ViolationKind::Blank);
    }

    #[test]
    fn bare_sequence_root_is_walked() {
        let leaves = vec![leaf(Some("ok")), leaf(None)];
        let err = Validator::new().validate_node(&leaves.as_node()).unwrap_err();
        let violation = err.violation().expect("violation");
        assert_eq!(violation.path, "[1].name");
        assert_eq!(violation.kind, ViolationKind::Absent);
    }

    #[test]
    fn acyclic_ring_passes_with_detection() {
        let tail = Rc::new(Ring {
            next: OnceCell::new(),
        });
        let head = Ring {
            next: OnceCell::from(tail),
        };
        let validator = Validator::new().with_cycle_detection(true);
        assert!(validator.validate(&head).is_ok());
    }

    #[test]
    fn nested_objects_sharing_an_address_are_not_cycles() {
        let validator = Validator::new().with_cycle_detection(true);
        let nested = Wrapper {
            inner: Wrapper { inner: 1u8 },
        };
        assert!(validator.validate(&nested).is_ok());

        let same_name = outer::Config {
            inner: outer::inner::Config { port: 0 },
        };
        let err = validator.validate(&same_name).unwrap_err();
        let violation = err.violation().expect("violation");
        assert_eq!(violation.path, "inner.port");
        assert_eq!(violation.owner, "Config");
    }

    #[test]
    fn cycle_detection_reports_cycle() {
        let ring = Rc::new(Ring {
            next: OnceCell::new(),
        });
        let _ = ring.next.set(Rc::clone(&ring));

        let validator = Validator::new().with_cycle_detection(true);
        let err = validator.validate(ring.as_ref()).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::Cycle {
                owner: "RingNode",
                ref path,
            } if path == "next"
        ));
    }
}
