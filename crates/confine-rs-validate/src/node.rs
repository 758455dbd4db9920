//! Borrowed node views over configuration values.
//!
//! The walker never inspects user types directly. Every value it meets is
//! first projected into a [`Node`], a closed set of shapes that can be matched
//! exhaustively.

use crate::schema::{Object, Validate};
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;
use std::hash::BuildHasher;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;

/// A borrowed view of a single value in a configuration object graph.
#[derive(Clone)]
pub enum Node<'a> {
    /// No value present (`None`, YAML `~`, an omitted optional key).
    Absent,
    /// Boolean scalar.
    Bool(bool),
    /// Signed integer scalar.
    Int(i64),
    /// Unsigned integer scalar.
    UInt(u64),
    /// Floating point scalar.
    Float(f64),
    /// String scalar.
    Str(Cow<'a, str>),
    /// Enumerated constant, identified by its variant name.
    Enum(&'static str),
    /// Nested typed object with a registered field table.
    Object(&'a dyn Object),
    /// Ordered sequence of nodes.
    Seq(Vec<Node<'a>>),
    /// Mapping entries in the container's iteration order. Keys are rendered
    /// for error paths only and are never validated.
    Map(Vec<(String, Node<'a>)>),
}

/// Shape tag for a [`Node`], used when reporting type mismatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Absent,
    Bool,
    Number,
    String,
    Enum,
    Object,
    Sequence,
    Mapping,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Shape::Absent => "absent",
            Shape::Bool => "bool",
            Shape::Number => "number",
            Shape::String => "string",
            Shape::Enum => "enum",
            Shape::Object => "object",
            Shape::Sequence => "sequence",
            Shape::Mapping => "mapping",
        };
        f.write_str(name)
    }
}

impl<'a> Node<'a> {
    /// View a typed configuration object as a node.
    pub fn object<T: Validate>(value: &'a T) -> Self {
        Node::Object(value)
    }

    /// Whether the node represents a missing value.
    pub fn is_absent(&self) -> bool {
        matches!(self, Node::Absent)
    }

    /// Shape tag of this node.
    pub fn shape(&self) -> Shape {
        match self {
            Node::Absent => Shape::Absent,
            Node::Bool(_) => Shape::Bool,
            Node::Int(_) | Node::UInt(_) | Node::Float(_) => Shape::Number,
            Node::Str(_) => Shape::String,
            Node::Enum(_) => Shape::Enum,
            Node::Object(_) => Shape::Object,
            Node::Seq(_) => Shape::Sequence,
            Node::Map(_) => Shape::Mapping,
        }
    }

    /// Element count for sequences and mappings.
    pub fn len(&self) -> Option<usize> {
        match self {
            Node::Seq(items) => Some(items.len()),
            Node::Map(entries) => Some(entries.len()),
            _ => None,
        }
    }

    /// Integer value, for exact comparisons. `None` for floats.
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Node::Int(value) => Some(i128::from(*value)),
            Node::UInt(value) => Some(i128::from(*value)),
            _ => None,
        }
    }

    /// Numeric value widened to `f64`. Integers beyond 2^53 lose precision.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Node::Int(value) => Some(*value as f64),
            Node::UInt(value) => Some(*value as f64),
            Node::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// String contents for string nodes.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Str(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Absent => f.write_str("Absent"),
            Node::Bool(value) => f.debug_tuple("Bool").field(value).finish(),
            Node::Int(value) => f.debug_tuple("Int").field(value).finish(),
            Node::UInt(value) => f.debug_tuple("UInt").field(value).finish(),
            Node::Float(value) => f.debug_tuple("Float").field(value).finish(),
            Node::Str(value) => f.debug_tuple("Str").field(value).finish(),
            Node::Enum(value) => f.debug_tuple("Enum").field(value).finish(),
            Node::Object(object) => f.debug_tuple("Object").field(&object.type_name()).finish(),
            Node::Seq(items) => f.debug_tuple("Seq").field(items).finish(),
            Node::Map(entries) => f.debug_tuple("Map").field(entries).finish(),
        }
    }
}

/// Conversion from a Rust value into a [`Node`] view.
///
/// Implemented for scalars, strings, paths, standard collections and every
/// type that implements [`Validate`]. Enumerations implement it by hand,
/// usually returning [`Node::Enum`].
pub trait AsNode {
    fn as_node(&self) -> Node<'_>;
}

impl<T: Validate> AsNode for T {
    fn as_node(&self) -> Node<'_> {
        Node::Object(self)
    }
}

macro_rules! signed_as_node {
    ($($ty:ty),*) => {
        $(impl AsNode for $ty {
            fn as_node(&self) -> Node<'_> {
                Node::Int(*self as i64)
            }
        })*
    };
}

macro_rules! unsigned_as_node {
    ($($ty:ty),*) => {
        $(impl AsNode for $ty {
            fn as_node(&self) -> Node<'_> {
                Node::UInt(*self as u64)
            }
        })*
    };
}

signed_as_node!(i8, i16, i32, i64, isize);
unsigned_as_node!(u8, u16, u32, u64, usize);

impl AsNode for f32 {
    fn as_node(&self) -> Node<'_> {
        Node::Float(f64::from(*self))
    }
}

impl AsNode for f64 {
    fn as_node(&self) -> Node<'_> {
        Node::Float(*self)
    }
}

impl AsNode for bool {
    fn as_node(&self) -> Node<'_> {
        Node::Bool(*self)
    }
}

impl AsNode for str {
    fn as_node(&self) -> Node<'_> {
        Node::Str(Cow::Borrowed(self))
    }
}

impl AsNode for String {
    fn as_node(&self) -> Node<'_> {
        Node::Str(Cow::Borrowed(self.as_str()))
    }
}

impl AsNode for Path {
    fn as_node(&self) -> Node<'_> {
        Node::Str(self.to_string_lossy())
    }
}

impl AsNode for PathBuf {
    fn as_node(&self) -> Node<'_> {
        self.as_path().as_node()
    }
}

impl<T: AsNode> AsNode for Option<T> {
    fn as_node(&self) -> Node<'_> {
        match self {
            Some(value) => value.as_node(),
            None => Node::Absent,
        }
    }
}

impl<T: AsNode + ?Sized> AsNode for Arc<T> {
    fn as_node(&self) -> Node<'_> {
        T::as_node(self)
    }
}

impl<T: AsNode + ?Sized> AsNode for Rc<T> {
    fn as_node(&self) -> Node<'_> {
        T::as_node(self)
    }
}

impl<T: AsNode> AsNode for [T] {
    fn as_node(&self) -> Node<'_> {
        Node::Seq(self.iter().map(AsNode::as_node).collect())
    }
}

impl<T: AsNode> AsNode for Vec<T> {
    fn as_node(&self) -> Node<'_> {
        self.as_slice().as_node()
    }
}

impl<T: AsNode> AsNode for VecDeque<T> {
    fn as_node(&self) -> Node<'_> {
        Node::Seq(self.iter().map(AsNode::as_node).collect())
    }
}

impl<T: AsNode, S: BuildHasher> AsNode for HashSet<T, S> {
    fn as_node(&self) -> Node<'_> {
        Node::Seq(self.iter().map(AsNode::as_node).collect())
    }
}

impl<T: AsNode> AsNode for BTreeSet<T> {
    fn as_node(&self) -> Node<'_> {
        Node::Seq(self.iter().map(AsNode::as_node).collect())
    }
}

impl<K: fmt::Display, V: AsNode, S: BuildHasher> AsNode for HashMap<K, V, S> {
    fn as_node(&self) -> Node<'_> {
        Node::Map(
            self.iter()
                .map(|(key, value)| (key.to_string(), value.as_node()))
                .collect(),
        )
    }
}

impl<K: fmt::Display, V: AsNode> AsNode for BTreeMap<K, V> {
    fn as_node(&self) -> Node<'_> {
        Node::Map(
            self.iter()
                .map(|(key, value)| (key.to_string(), value.as_node()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn option_maps_none_to_absent() {
        let missing: Option<String> = None;
        assert!(missing.as_node().is_absent());
        let present = Some("db".to_string());
        assert_eq!(present.as_node().as_str(), Some("db"));
    }

    #[test]
    fn numbers_widen_to_f64() {
        assert_eq!(7u16.as_node().as_f64(), Some(7.0));
        assert_eq!((-3i32).as_node().as_f64(), Some(-3.0));
        assert_eq!(1.5f32.as_node().as_f64(), Some(1.5));
        assert_eq!("7".as_node().as_f64(), None);
    }

    #[test]
    fn collections_report_length_and_shape() {
        let list = vec![1u8, 2, 3];
        let node = list.as_node();
        assert_eq!(node.shape(), Shape::Sequence);
        assert_eq!(node.len(), Some(3));

        let mut map = BTreeMap::new();
        map.insert("a", 1);
        let node = map.as_node();
        assert_eq!(node.shape(), Shape::Mapping);
        assert_eq!(node.len(), Some(1));
        assert_eq!(true.as_node().len(), None);
    }

    #[test]
    fn mapping_preserves_btree_order() {
        let mut map = BTreeMap::new();
        map.insert("zeta", 1u32);
        map.insert("alpha", 2u32);
        let Node::Map(entries) = map.as_node() else {
            panic!("expected mapping");
        };
        let keys = entries.into_iter().map(|(key, _)| key).collect::<Vec<_>>();
        assert_eq!(keys, vec!["alpha".to_string(), "zeta".to_string()]);
    }

    #[test]
    fn paths_render_as_strings() {
        let path = PathBuf::from("/etc/app.yml");
        assert_eq!(path.as_node().as_str(), Some("/etc/app.yml"));
    }
}
