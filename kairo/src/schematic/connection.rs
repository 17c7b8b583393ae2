use super::attributes::*;
use super::node::*;
use super::types::*;

use la_arena::Idx;

pub type ConnectionId<'a> = Idx<ConnectionValue<'a>>;

/// A directed, typed edge between two ports.
#[derive(Debug)]
pub struct ConnectionValue<'a> {
    pub(crate) name: String,
    pub(crate) connection_type: &'a ConnectionType,
    pub(crate) from: PortId<'a>,
    pub(crate) to: PortId<'a>,
    pub(crate) attributes: Attributes,
}

impl<'a> ConnectionValue<'a> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn connection_type(&self) -> &'a ConnectionType {
        self.connection_type
    }

    pub fn from(&self) -> PortId<'a> {
        self.from
    }

    pub fn to(&self) -> PortId<'a> {
        self.to
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}

/// A named, typed constraint. Constraints are carried through the pipeline but not interpreted.
#[derive(Debug)]
pub struct ConstraintValue<'a> {
    pub(crate) name: String,
    pub(crate) constraint_type: &'a ConstraintType,
    pub(crate) attributes: Attributes,
}

impl<'a> ConstraintValue<'a> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn constraint_type(&self) -> &'a ConstraintType {
        self.constraint_type
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}
