use super::error::*;

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ptr;

/// The type of an attribute value.
///
/// `User` refers to a type declared in a [`Schematic`]'s user type namespace, and is resolved
/// through that namespace whenever a value is checked against it.
///
/// [`Schematic`]: ./struct.Schematic.html
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeValue {
    Bool,
    Int,
    String,
    Array(Box<TypeValue>),
    User(String),
}

impl TypeValue {
    /// Names that are always bound in the user type namespace and cannot be redefined.
    pub const BUILTIN_NAMES: [&'static str; 3] = ["Bool", "Int", "String"];

    pub fn builtin(name: &str) -> Option<TypeValue> {
        match name {
            "Bool" => Some(TypeValue::Bool),
            "Int" => Some(TypeValue::Int),
            "String" => Some(TypeValue::String),
            _ => None,
        }
    }
}

impl fmt::Display for TypeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeValue::Bool => write!(f, "Bool"),
            TypeValue::Int => write!(f, "Int"),
            TypeValue::String => write!(f, "String"),
            TypeValue::Array(element) => write!(f, "Array<{}>", element),
            TypeValue::User(name) => write!(f, "{}", name),
        }
    }
}

pub type AttributeSchema = BTreeMap<String, TypeValue>;

pub(crate) fn collect_unique<V: Clone>(
    what: &'static str,
    entries: &[(&str, V)],
) -> Result<BTreeMap<String, V>, SchematicError> {
    let mut map = BTreeMap::new();
    for (name, value) in entries {
        if map.insert(name.to_string(), value.clone()).is_some() {
            return Err(SchematicError::MultipleDefinition {
                namespace: what,
                name: name.to_string(),
            });
        }
    }
    Ok(map)
}

/// Declares the attributes carried by every port of this type.
#[derive(Debug)]
pub struct PortType {
    pub(crate) attributes: AttributeSchema,
}

impl PortType {
    pub fn attributes(&self) -> &AttributeSchema {
        &self.attributes
    }
}

/// Declares the attributes and the fixed set of named ports of a node.
#[derive(Debug)]
pub struct NodeType<'a> {
    pub(crate) attributes: AttributeSchema,
    pub(crate) ports: BTreeMap<String, &'a PortType>,
}

impl<'a> NodeType<'a> {
    pub fn attributes(&self) -> &AttributeSchema {
        &self.attributes
    }

    pub fn ports(&self) -> impl Iterator<Item = (&str, &'a PortType)> + '_ {
        self.ports.iter().map(|(name, &port_type)| (name.as_str(), port_type))
    }

    pub fn port(&self, name: &str) -> Option<&'a PortType> {
        self.ports.get(name).copied()
    }
}

#[derive(Debug)]
pub struct ConnectionType {
    pub(crate) attributes: AttributeSchema,
}

impl ConnectionType {
    pub fn attributes(&self) -> &AttributeSchema {
        &self.attributes
    }
}

#[derive(Debug)]
pub struct ConstraintType {
    pub(crate) attributes: AttributeSchema,
}

impl ConstraintType {
    pub fn attributes(&self) -> &AttributeSchema {
        &self.attributes
    }
}

// Two declarations are the same type only if they are the same declaration.
macro_rules! identity_by_declaration {
    ($($t:ty),*) => {
        $(
            impl<'a> Eq for &'a $t {}

            impl<'a> Hash for &'a $t {
                fn hash<H: Hasher>(&self, state: &mut H) {
                    state.write_usize(*self as *const _ as usize)
                }
            }

            impl<'a> PartialEq for &'a $t {
                fn eq(&self, other: &Self) -> bool {
                    ptr::eq(*self, *other)
                }
            }
        )*
    };
}

identity_by_declaration!(PortType, ConnectionType, ConstraintType);

impl<'a> Eq for &'a NodeType<'a> {}

impl<'a> Hash for &'a NodeType<'a> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(*self as *const _ as usize)
    }
}

impl<'a> PartialEq for &'a NodeType<'a> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(*self, *other)
    }
}
