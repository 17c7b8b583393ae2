//! Reconstruction of electrical nets from pairwise wire connections.

mod error;
mod net;

pub use error::*;
pub use net::*;

use crate::schematic::*;

use la_arena::{Arena, ArenaMap};
use tracing::debug;

use std::ops::Index;

/// A wire connection whose endpoints already belonged to two different nets when it was
/// processed. Such nets are not merged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnmergedConnection<'a> {
    pub connection: ConnectionId<'a>,
    pub from_net: NetId<'a>,
    pub to_net: NetId<'a>,
}

/// The nets of a [`Schematic`], plus a lookup from each wired port to its net.
///
/// Built once by [`Netlist::build`] and never modified afterwards.
///
/// [`Schematic`]: ../schematic/struct.Schematic.html
/// [`Netlist::build`]: #method.build
pub struct Netlist<'a> {
    digital_in: &'a PortType,
    digital_out: &'a PortType,

    nets: Arena<Net<'a>>,
    connected_net: ArenaMap<PortId<'a>, NetId<'a>>,
    unmerged: Vec<UnmergedConnection<'a>>,
}

impl<'a> Netlist<'a> {
    /// Validates the digital wiring vocabulary of `schematic` and groups its ports into nets.
    ///
    /// Connections are processed in declaration order. A connection between two unassigned ports
    /// creates a net named `n_<connection>`; a connection with one assigned endpoint adds the
    /// other endpoint to that net; a connection whose endpoints are both assigned leaves the
    /// nets as they are, and is recorded as [unmerged](#method.unmerged) if they differ.
    ///
    /// # Examples
    ///
    /// ```
    /// use kairo::netlist::*;
    /// use kairo::schematic::*;
    ///
    /// let c = Context::new();
    /// let types = DigitalTypes::new(&c).unwrap();
    /// let mut s = Schematic::new("top");
    /// types.declare(&mut s).unwrap();
    ///
    /// let in0 = types.input_pin(&mut s, "in0").unwrap();
    /// let out0 = types.output_pin(&mut s, "out0").unwrap();
    /// types.wire(&mut s, "c0", (in0, "out"), (out0, "in")).unwrap();
    ///
    /// let netlist = Netlist::build(&s).unwrap();
    /// let net = netlist.net_by_name("n_c0").unwrap();
    /// assert_eq!(netlist[net].len(), 2);
    /// ```
    pub fn build(schematic: &Schematic<'a>) -> Result<Netlist<'a>, NetlistError> {
        require(schematic, "port types", &[DIGITAL_IN, DIGITAL_OUT], |s, name| {
            s.port_type(name).is_ok()
        })?;
        require(schematic, "node types", &[INPUT_PIN, OUTPUT_PIN], |s, name| {
            s.node_type(name).is_ok()
        })?;
        require(schematic, "connection types", &[DIGITAL_WIRE], |s, name| {
            s.connection_type(name).is_ok()
        })?;

        let digital_in = schematic
            .port_type(DIGITAL_IN)
            .map_err(|e| NetlistError::Internal(e.to_string()))?;
        let digital_out = schematic
            .port_type(DIGITAL_OUT)
            .map_err(|e| NetlistError::Internal(e.to_string()))?;
        let digital_wire = schematic
            .connection_type(DIGITAL_WIRE)
            .map_err(|e| NetlistError::Internal(e.to_string()))?;

        for (_, node) in schematic.nodes() {
            if schematic.node_type_name(node.node_type()).is_none() {
                return Err(NetlistError::UnknownNodeType {
                    node: node.name().to_string(),
                });
            }
        }

        let mut netlist = Netlist {
            digital_in,
            digital_out,

            nets: Arena::new(),
            connected_net: ArenaMap::default(),
            unmerged: Vec::new(),
        };

        for (id, connection) in schematic.connections() {
            let actual = schematic
                .connection_type_name(connection.connection_type())
                .ok_or_else(|| NetlistError::UnknownConnectionType {
                    connection: connection.name().to_string(),
                })?;
            if connection.connection_type() != digital_wire {
                return Err(NetlistError::ConnectionTypeMismatch {
                    connection: connection.name().to_string(),
                    actual: actual.to_string(),
                });
            }

            for (side, port) in [
                (Endpoint::From, connection.from()),
                (Endpoint::To, connection.to()),
            ] {
                if !netlist.is_digital(schematic, port) {
                    return Err(NetlistError::EndpointTypeMismatch {
                        connection: connection.name().to_string(),
                        side,
                        actual: schematic
                            .port_type_name(schematic[port].port_type())
                            .unwrap_or("<unregistered>")
                            .to_string(),
                    });
                }
            }

            netlist.connect(schematic, id)?;
        }

        debug!(
            nets = netlist.nets.len(),
            unmerged = netlist.unmerged.len(),
            "built netlist for '{}'",
            schematic.name()
        );

        Ok(netlist)
    }

    fn connect(
        &mut self,
        schematic: &Schematic<'a>,
        id: ConnectionId<'a>,
    ) -> Result<(), NetlistError> {
        let connection = &schematic[id];
        let (from, to) = (connection.from(), connection.to());

        match (self.connected_net(from), self.connected_net(to)) {
            (None, None) => {
                let net = self.nets.alloc(Net::new(format!("n_{}", connection.name())));
                self.assign(net, from)?;
                if to != from {
                    self.assign(net, to)?;
                }
                debug!(
                    "created net '{}' for {} -> {}",
                    self.nets[net].name(),
                    schematic.port_path(from),
                    schematic.port_path(to)
                );
            }
            (Some(net), None) => self.assign(net, to)?,
            (None, Some(net)) => self.assign(net, from)?,
            (Some(from_net), Some(to_net)) => {
                if from_net != to_net {
                    debug!(
                        "connection '{}' joins nets '{}' and '{}', which are left unmerged",
                        connection.name(),
                        self.nets[from_net].name(),
                        self.nets[to_net].name()
                    );
                    self.unmerged.push(UnmergedConnection {
                        connection: id,
                        from_net,
                        to_net,
                    });
                }
            }
        }

        Ok(())
    }

    fn assign(&mut self, net: NetId<'a>, port: PortId<'a>) -> Result<(), NetlistError> {
        self.nets[net].add_port(port)?;
        self.connected_net.insert(port, net);
        Ok(())
    }

    fn is_digital(&self, schematic: &Schematic<'a>, port: PortId<'a>) -> bool {
        let port_type = schematic[port].port_type();
        port_type == self.digital_in || port_type == self.digital_out
    }

    pub fn is_input(&self, schematic: &Schematic<'a>, port: PortId<'a>) -> bool {
        schematic[port].port_type() == self.digital_in
    }

    pub fn is_output(&self, schematic: &Schematic<'a>, port: PortId<'a>) -> bool {
        schematic[port].port_type() == self.digital_out
    }

    pub fn nets(&self) -> impl Iterator<Item = (NetId<'a>, &Net<'a>)> + '_ {
        self.nets.iter()
    }

    /// Returns the net `port` belongs to, or `None` if it isn't wired to anything.
    pub fn connected_net(&self, port: PortId<'a>) -> Option<NetId<'a>> {
        self.connected_net.get(port).copied()
    }

    pub fn net_by_name(&self, name: &str) -> Option<NetId<'a>> {
        self.nets
            .iter()
            .find(|(_, net)| net.name() == name)
            .map(|(id, _)| id)
    }

    /// Connections that joined two already-distinct nets, in declaration order.
    pub fn unmerged(&self) -> &[UnmergedConnection<'a>] {
        &self.unmerged
    }

    /// All `digitalOut` ports of `net`.
    pub fn drivers(&self, schematic: &Schematic<'a>, net: NetId<'a>) -> Vec<PortId<'a>> {
        self.nets[net]
            .ports()
            .filter(|&port| self.is_output(schematic, port))
            .collect()
    }

    /// The single `digitalOut` port of `net`. Anything other than exactly one driver is an
    /// internal error, since the design rule checks are expected to have ruled that out.
    pub fn driver(
        &self,
        schematic: &Schematic<'a>,
        net: NetId<'a>,
    ) -> Result<PortId<'a>, NetlistError> {
        match self.drivers(schematic, net).as_slice() {
            [driver] => Ok(*driver),
            [] => Err(NetlistError::Internal(format!(
                "undriven net '{}'",
                self.nets[net].name()
            ))),
            drivers => Err(NetlistError::Internal(format!(
                "net '{}' has {} drivers",
                self.nets[net].name(),
                drivers.len()
            ))),
        }
    }
}

impl<'a> Index<NetId<'a>> for Netlist<'a> {
    type Output = Net<'a>;

    fn index(&self, index: NetId<'a>) -> &Self::Output {
        &self.nets[index]
    }
}

fn require<'a>(
    schematic: &Schematic<'a>,
    category: &'static str,
    names: &[&'static str],
    is_declared: impl Fn(&Schematic<'a>, &str) -> bool,
) -> Result<(), NetlistError> {
    let missing: Vec<_> = names
        .iter()
        .copied()
        .filter(|name| !is_declared(schematic, name))
        .collect();
    if !missing.is_empty() {
        return Err(NetlistError::MissingTypes { category, missing });
    }
    Ok(())
}
