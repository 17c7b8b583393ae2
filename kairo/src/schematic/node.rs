use super::attributes::*;
use super::types::*;

use la_arena::Idx;

use std::collections::BTreeMap;

pub type NodeId<'a> = Idx<NodeValue<'a>>;
pub type PortId<'a> = Idx<PortValue<'a>>;

/// An instance of a [`NodeType`], created by [`Schematic::add_node`].
///
/// A node owns one port per port declared by its type. Ports are created together with the node
/// and never change afterwards.
///
/// [`NodeType`]: ./struct.NodeType.html
/// [`Schematic::add_node`]: ./struct.Schematic.html#method.add_node
#[derive(Debug)]
pub struct NodeValue<'a> {
    pub(crate) name: String,
    pub(crate) node_type: &'a NodeType<'a>,
    pub(crate) attributes: Attributes,
    pub(crate) ports: BTreeMap<String, PortId<'a>>,
}

impl<'a> NodeValue<'a> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn node_type(&self) -> &'a NodeType<'a> {
        self.node_type
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn ports(&self) -> impl Iterator<Item = (&str, PortId<'a>)> + '_ {
        self.ports.iter().map(|(name, &port)| (name.as_str(), port))
    }

    pub fn port(&self, name: &str) -> Option<PortId<'a>> {
        self.ports.get(name).copied()
    }
}

/// A port of a node. Ports know which node they belong to, but not what they're connected to.
#[derive(Debug)]
pub struct PortValue<'a> {
    pub(crate) name: String,
    pub(crate) port_type: &'a PortType,
    pub(crate) node: NodeId<'a>,
    pub(crate) attributes: Attributes,
}

impl<'a> PortValue<'a> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn port_type(&self) -> &'a PortType {
        self.port_type
    }

    pub fn node(&self) -> NodeId<'a> {
        self.node
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}
