use super::attributes::*;
use super::connection::*;
use super::error::*;
use super::node::*;
use super::types::*;
use super::value::*;

use indexmap::IndexMap;
use la_arena::Arena;

use std::collections::BTreeMap;
use std::ops::Index;

/// A complete, flat circuit description: type namespaces plus named node, connection and
/// constraint instances.
///
/// Each of the five type namespaces is independent, so the same name may be declared once in
/// each. Nodes, ports and connections are stored in arenas and addressed by [`NodeId`],
/// [`PortId`] and [`ConnectionId`]; iteration follows declaration order.
///
/// # Examples
///
/// ```
/// use kairo::schematic::*;
///
/// let c = Context::new();
/// let mut s = Schematic::new("top");
///
/// let digital_in = c.port_type(&[]).unwrap();
/// let digital_out = c.port_type(&[]).unwrap();
/// s.add_port_type("digitalIn", digital_in).unwrap();
/// s.add_port_type("digitalOut", digital_out).unwrap();
///
/// let input_pin = c.node_type(&[], &[("out", digital_out)]).unwrap();
/// s.add_node_type("inputPin", input_pin).unwrap();
///
/// let in0 = s.add_node("in0", input_pin, &[]).unwrap();
/// assert_eq!(s[in0].name(), "in0");
/// assert_eq!(s.node_type_name(input_pin), Some("inputPin"));
/// ```
///
/// [`NodeId`]: ./type.NodeId.html
/// [`PortId`]: ./type.PortId.html
/// [`ConnectionId`]: ./type.ConnectionId.html
#[derive(Debug)]
pub struct Schematic<'a> {
    name: String,

    user_types: UserTypes,
    port_types: BTreeMap<String, &'a PortType>,
    node_types: BTreeMap<String, &'a NodeType<'a>>,
    connection_types: BTreeMap<String, &'a ConnectionType>,
    constraint_types: BTreeMap<String, &'a ConstraintType>,

    nodes: Arena<NodeValue<'a>>,
    ports: Arena<PortValue<'a>>,
    connections: Arena<ConnectionValue<'a>>,
    constraints: IndexMap<String, ConstraintValue<'a>>,

    node_names: BTreeMap<String, NodeId<'a>>,
    connection_names: BTreeMap<String, ConnectionId<'a>>,
}

impl<'a> Schematic<'a> {
    pub fn new(name: impl Into<String>) -> Schematic<'a> {
        Schematic {
            name: name.into(),

            user_types: UserTypes::new(),
            port_types: BTreeMap::new(),
            node_types: BTreeMap::new(),
            connection_types: BTreeMap::new(),
            constraint_types: BTreeMap::new(),

            nodes: Arena::new(),
            ports: Arena::new(),
            connections: Arena::new(),
            constraints: IndexMap::new(),

            node_names: BTreeMap::new(),
            connection_names: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Binds `name` to `ty` in the user type namespace.
    ///
    /// `ty` may only mention user types that are already declared, and the built-in names
    /// `Bool`, `Int` and `String` can't be redefined.
    pub fn add_user_type(
        &mut self,
        name: impl Into<String>,
        ty: TypeValue,
    ) -> Result<(), SchematicError> {
        let name = name.into();
        if TypeValue::BUILTIN_NAMES.contains(&name.as_str()) || self.user_types.contains_key(&name)
        {
            return Err(SchematicError::MultipleDefinition {
                namespace: "user types",
                name,
            });
        }
        check_declared(&ty, &self.user_types)?;
        self.user_types.insert(name, ty);
        Ok(())
    }

    pub fn user_type(&self, name: &str) -> Result<TypeValue, SchematicError> {
        if let Some(ty) = TypeValue::builtin(name) {
            return Ok(ty);
        }
        self.user_types
            .get(name)
            .cloned()
            .ok_or_else(|| SchematicError::undeclared(name, "in user types"))
    }

    pub fn add_port_type(
        &mut self,
        name: impl Into<String>,
        port_type: &'a PortType,
    ) -> Result<(), SchematicError> {
        self.check_schema(port_type.attributes())?;
        insert_unique(&mut self.port_types, "port types", name.into(), port_type)
    }

    pub fn add_node_type(
        &mut self,
        name: impl Into<String>,
        node_type: &'a NodeType<'a>,
    ) -> Result<(), SchematicError> {
        self.check_schema(node_type.attributes())?;
        insert_unique(&mut self.node_types, "node types", name.into(), node_type)
    }

    pub fn add_connection_type(
        &mut self,
        name: impl Into<String>,
        connection_type: &'a ConnectionType,
    ) -> Result<(), SchematicError> {
        self.check_schema(connection_type.attributes())?;
        insert_unique(
            &mut self.connection_types,
            "connection types",
            name.into(),
            connection_type,
        )
    }

    pub fn add_constraint_type(
        &mut self,
        name: impl Into<String>,
        constraint_type: &'a ConstraintType,
    ) -> Result<(), SchematicError> {
        self.check_schema(constraint_type.attributes())?;
        insert_unique(
            &mut self.constraint_types,
            "constraint types",
            name.into(),
            constraint_type,
        )
    }

    fn check_schema(&self, schema: &AttributeSchema) -> Result<(), SchematicError> {
        for ty in schema.values() {
            check_declared(ty, &self.user_types)?;
        }
        Ok(())
    }

    pub fn port_type(&self, name: &str) -> Result<&'a PortType, SchematicError> {
        lookup(&self.port_types, name, "in port types")
    }

    pub fn node_type(&self, name: &str) -> Result<&'a NodeType<'a>, SchematicError> {
        lookup(&self.node_types, name, "in node types")
    }

    pub fn connection_type(&self, name: &str) -> Result<&'a ConnectionType, SchematicError> {
        lookup(&self.connection_types, name, "in connection types")
    }

    pub fn constraint_type(&self, name: &str) -> Result<&'a ConstraintType, SchematicError> {
        lookup(&self.constraint_types, name, "in constraint types")
    }

    /// Returns the name `node_type` is registered under, if it's registered at all.
    pub fn node_type_name(&self, node_type: &'a NodeType<'a>) -> Option<&str> {
        reverse_lookup(&self.node_types, node_type)
    }

    pub fn port_type_name(&self, port_type: &'a PortType) -> Option<&str> {
        reverse_lookup(&self.port_types, port_type)
    }

    pub fn connection_type_name(&self, connection_type: &'a ConnectionType) -> Option<&str> {
        reverse_lookup(&self.connection_types, connection_type)
    }

    /// Instantiates `node_type` as a node called `name`, creating one port per declared port.
    ///
    /// `attributes` must provide exactly the attributes declared by `node_type`. Ports get no
    /// attribute values, so their types must not declare any; use
    /// [`add_node_with_port_attributes`](#method.add_node_with_port_attributes) otherwise.
    pub fn add_node(
        &mut self,
        name: impl Into<String>,
        node_type: &'a NodeType<'a>,
        attributes: &[(&str, Value)],
    ) -> Result<NodeId<'a>, SchematicError> {
        self.add_node_with_port_attributes(name, node_type, attributes, &[])
    }

    pub fn add_node_with_port_attributes(
        &mut self,
        name: impl Into<String>,
        node_type: &'a NodeType<'a>,
        attributes: &[(&str, Value)],
        port_attributes: &[(&str, &[(&str, Value)])],
    ) -> Result<NodeId<'a>, SchematicError> {
        let name = name.into();
        if self.node_names.contains_key(&name) {
            return Err(SchematicError::MultipleAssignment { kind: "node", name });
        }

        let attributes = Attributes::validate(node_type.attributes(), attributes, &self.user_types)?;

        for (port_name, _) in port_attributes {
            if node_type.port(port_name).is_none() {
                return Err(SchematicError::undeclared(
                    *port_name,
                    format!("in ports of node '{}'", name),
                ));
            }
        }
        let mut validated_ports = Vec::new();
        for (port_name, port_type) in node_type.ports() {
            let values = port_attributes
                .iter()
                .find(|(n, _)| *n == port_name)
                .map(|(_, values)| *values)
                .unwrap_or(&[]);
            let port_attrs =
                Attributes::validate(port_type.attributes(), values, &self.user_types)?;
            validated_ports.push((port_name, port_type, port_attrs));
        }

        let node = self.nodes.alloc(NodeValue {
            name: name.clone(),
            node_type,
            attributes,
            ports: BTreeMap::new(),
        });
        for (port_name, port_type, attributes) in validated_ports {
            let port = self.ports.alloc(PortValue {
                name: port_name.to_string(),
                port_type,
                node,
                attributes,
            });
            self.nodes[node].ports.insert(port_name.to_string(), port);
        }
        self.node_names.insert(name, node);

        Ok(node)
    }

    pub fn add_connection(
        &mut self,
        name: impl Into<String>,
        connection_type: &'a ConnectionType,
        from: PortId<'a>,
        to: PortId<'a>,
        attributes: &[(&str, Value)],
    ) -> Result<ConnectionId<'a>, SchematicError> {
        let name = name.into();
        if self.connection_names.contains_key(&name) {
            return Err(SchematicError::MultipleAssignment {
                kind: "connection",
                name,
            });
        }

        let attributes =
            Attributes::validate(connection_type.attributes(), attributes, &self.user_types)?;
        let connection = self.connections.alloc(ConnectionValue {
            name: name.clone(),
            connection_type,
            from,
            to,
            attributes,
        });
        self.connection_names.insert(name, connection);

        Ok(connection)
    }

    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        constraint_type: &'a ConstraintType,
        attributes: &[(&str, Value)],
    ) -> Result<(), SchematicError> {
        let name = name.into();
        if self.constraints.contains_key(&name) {
            return Err(SchematicError::MultipleAssignment {
                kind: "constraint",
                name,
            });
        }

        let attributes =
            Attributes::validate(constraint_type.attributes(), attributes, &self.user_types)?;
        self.constraints.insert(
            name.clone(),
            ConstraintValue {
                name,
                constraint_type,
                attributes,
            },
        );

        Ok(())
    }

    pub fn node(&self, name: &str) -> Result<NodeId<'a>, SchematicError> {
        self.node_names
            .get(name)
            .copied()
            .ok_or_else(|| SchematicError::undeclared(name, "in nodes"))
    }

    pub fn connection(&self, name: &str) -> Result<ConnectionId<'a>, SchematicError> {
        self.connection_names
            .get(name)
            .copied()
            .ok_or_else(|| SchematicError::undeclared(name, "in connections"))
    }

    pub fn constraint(&self, name: &str) -> Result<&ConstraintValue<'a>, SchematicError> {
        self.constraints
            .get(name)
            .ok_or_else(|| SchematicError::undeclared(name, "in constraints"))
    }

    /// Looks up the port called `name` on `node`.
    pub fn port(&self, node: NodeId<'a>, name: &str) -> Result<PortId<'a>, SchematicError> {
        let node = &self.nodes[node];
        node.port(name).ok_or_else(|| {
            SchematicError::undeclared(name, format!("in ports of node '{}'", node.name))
        })
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId<'a>, &NodeValue<'a>)> + '_ {
        self.nodes.iter()
    }

    pub fn ports(&self) -> impl Iterator<Item = (PortId<'a>, &PortValue<'a>)> + '_ {
        self.ports.iter()
    }

    pub fn connections(
        &self,
    ) -> impl Iterator<Item = (ConnectionId<'a>, &ConnectionValue<'a>)> + '_ {
        self.connections.iter()
    }

    pub fn constraints(&self) -> impl Iterator<Item = &ConstraintValue<'a>> + '_ {
        self.constraints.values()
    }

    /// Formats a port as `node:port`, the way ports are referred to in diagnostics.
    pub fn port_path(&self, port: PortId<'a>) -> String {
        let port = &self.ports[port];
        format!("{}:{}", self.nodes[port.node].name, port.name)
    }
}

impl<'a> Index<NodeId<'a>> for Schematic<'a> {
    type Output = NodeValue<'a>;

    fn index(&self, index: NodeId<'a>) -> &Self::Output {
        &self.nodes[index]
    }
}

impl<'a> Index<PortId<'a>> for Schematic<'a> {
    type Output = PortValue<'a>;

    fn index(&self, index: PortId<'a>) -> &Self::Output {
        &self.ports[index]
    }
}

impl<'a> Index<ConnectionId<'a>> for Schematic<'a> {
    type Output = ConnectionValue<'a>;

    fn index(&self, index: ConnectionId<'a>) -> &Self::Output {
        &self.connections[index]
    }
}

fn insert_unique<T>(
    map: &mut BTreeMap<String, T>,
    namespace: &'static str,
    name: String,
    value: T,
) -> Result<(), SchematicError> {
    if map.contains_key(&name) {
        return Err(SchematicError::MultipleDefinition { namespace, name });
    }
    map.insert(name, value);
    Ok(())
}

fn lookup<T: Copy>(
    map: &BTreeMap<String, T>,
    name: &str,
    context: &str,
) -> Result<T, SchematicError> {
    map.get(name)
        .copied()
        .ok_or_else(|| SchematicError::undeclared(name, context))
}

fn reverse_lookup<'m, T: PartialEq + Copy>(
    map: &'m BTreeMap<String, T>,
    value: T,
) -> Option<&'m str> {
    map.iter()
        .find(|(_, v)| **v == value)
        .map(|(name, _)| name.as_str())
}
