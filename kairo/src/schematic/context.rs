use super::error::*;
use super::types::*;

use typed_arena::Arena;

/// A top-level owner for type declarations.
///
/// Declarations created through a `Context` live as long as it does, and are referred to by
/// [`Schematic`]s as plain references. Two declarations are the same type only if they are the
/// same object, even if their schemas are identical.
///
/// # Examples
///
/// ```
/// use kairo::schematic::*;
///
/// let c = Context::new();
///
/// let digital_in = c.port_type(&[]).unwrap();
/// let digital_out = c.port_type(&[]).unwrap();
/// let buffer = c
///     .node_type(&[], &[("in", digital_in), ("out", digital_out)])
///     .unwrap();
/// assert_eq!(buffer.ports().count(), 2);
/// ```
///
/// [`Schematic`]: ./struct.Schematic.html
#[must_use]
pub struct Context<'a> {
    port_type_arena: Arena<PortType>,
    node_type_arena: Arena<NodeType<'a>>,
    connection_type_arena: Arena<ConnectionType>,
    constraint_type_arena: Arena<ConstraintType>,
}

impl<'a> Context<'a> {
    /// Creates a new, empty `Context`.
    pub fn new() -> Context<'a> {
        Context {
            port_type_arena: Arena::new(),
            node_type_arena: Arena::new(),
            connection_type_arena: Arena::new(),
            constraint_type_arena: Arena::new(),
        }
    }

    pub fn port_type(
        &'a self,
        attributes: &[(&str, TypeValue)],
    ) -> Result<&'a PortType, SchematicError> {
        let attributes = collect_unique("port type attributes", attributes)?;
        Ok(self.port_type_arena.alloc(PortType { attributes }))
    }

    /// Declares a node type with the given attribute schema and named ports.
    pub fn node_type(
        &'a self,
        attributes: &[(&str, TypeValue)],
        ports: &[(&str, &'a PortType)],
    ) -> Result<&'a NodeType<'a>, SchematicError> {
        let attributes = collect_unique("node type attributes", attributes)?;
        let ports = collect_unique("node type ports", ports)?;
        Ok(self.node_type_arena.alloc(NodeType { attributes, ports }))
    }

    pub fn connection_type(
        &'a self,
        attributes: &[(&str, TypeValue)],
    ) -> Result<&'a ConnectionType, SchematicError> {
        let attributes = collect_unique("connection type attributes", attributes)?;
        Ok(self.connection_type_arena.alloc(ConnectionType { attributes }))
    }

    pub fn constraint_type(
        &'a self,
        attributes: &[(&str, TypeValue)],
    ) -> Result<&'a ConstraintType, SchematicError> {
        let attributes = collect_unique("constraint type attributes", attributes)?;
        Ok(self.constraint_type_arena.alloc(ConstraintType { attributes }))
    }
}

impl<'a> Default for Context<'a> {
    fn default() -> Self {
        Self::new()
    }
}
