use super::error::*;

use crate::schematic::PortId;

use indexmap::IndexSet;
use la_arena::Idx;

pub type NetId<'a> = Idx<Net<'a>>;

/// A set of ports that are electrically the same point.
#[derive(Debug)]
pub struct Net<'a> {
    name: String,
    ports: IndexSet<PortId<'a>>,
}

impl<'a> Net<'a> {
    pub(crate) fn new(name: impl Into<String>) -> Net<'a> {
        Net {
            name: name.into(),
            ports: IndexSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ports of this net, in the order they joined it.
    pub fn ports(&self) -> impl Iterator<Item = PortId<'a>> + '_ {
        self.ports.iter().copied()
    }

    pub fn contains(&self, port: PortId<'a>) -> bool {
        self.ports.contains(&port)
    }

    pub fn len(&self) -> usize {
        self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    pub(crate) fn add_port(&mut self, port: PortId<'a>) -> Result<(), NetlistError> {
        if !self.ports.insert(port) {
            return Err(NetlistError::Internal(format!(
                "port added to net '{}' twice",
                self.name
            )));
        }
        Ok(())
    }
}
