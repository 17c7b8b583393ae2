use super::escape::*;
use super::ir::*;
use super::Error;

use crate::netlist::{NetId, Netlist};
use crate::schematic::*;

use indexmap::IndexSet;
use tracing::{debug, warn};

use std::collections::HashSet;

/// What the generator knows how to do with a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Primitive {
    InputPin,
    OutputPin,
    Register(RegisterParams),
    Unsupported,
}

pub(crate) struct Compiler<'s, 'a> {
    schematic: &'s Schematic<'a>,
    netlist: &'s Netlist<'a>,

    input_pin: &'a NodeType<'a>,
    output_pin: &'a NodeType<'a>,
    register: &'a NodeType<'a>,
}

impl<'s, 'a> Compiler<'s, 'a> {
    pub fn new(schematic: &'s Schematic<'a>, netlist: &'s Netlist<'a>) -> Result<Self, Error> {
        Ok(Compiler {
            schematic,
            netlist,

            input_pin: schematic.node_type(INPUT_PIN)?,
            output_pin: schematic.node_type(OUTPUT_PIN)?,
            register: schematic.node_type(REGISTER)?,
        })
    }

    pub fn classify(&self, node: &NodeValue<'a>) -> Result<Primitive, Error> {
        let node_type = node.node_type();
        Ok(if node_type == self.input_pin {
            Primitive::InputPin
        } else if node_type == self.output_pin {
            Primitive::OutputPin
        } else if node_type == self.register {
            Primitive::Register(RegisterParams::from_node(node)?)
        } else {
            Primitive::Unsupported
        })
    }

    pub fn compile(&self) -> Result<Entity, Error> {
        let mut inputs = Vec::new();
        let mut input_nets = IndexSet::new();
        let mut outputs = Vec::new();
        let mut internal = Vec::new();

        for (id, node) in self.schematic.nodes() {
            let primitive = self.classify(node)?;
            debug!("node '{}' is {:?}", node.name(), primitive);

            match primitive {
                Primitive::InputPin => match self.node_net(id, "out")? {
                    Some(net) => {
                        if input_nets.insert(net) {
                            inputs.push((node.name(), net));
                        } else {
                            warn!(
                                "input pin '{}' drives a net that already has an input pin, skipping",
                                node.name()
                            );
                        }
                    }
                    None => warn!("input pin '{}' is not connected, skipping", node.name()),
                },
                Primitive::OutputPin => match self.node_net(id, "in")? {
                    Some(net) => outputs.push((node.name(), net)),
                    None => warn!("output pin '{}' is not connected, skipping", node.name()),
                },
                _ => internal.push((id, primitive)),
            }
        }

        let mut signal_nets = input_nets.clone();
        for &(id, _) in internal.iter() {
            for (_, port) in self.schematic[id].ports() {
                if let Some(net) = self.netlist.connected_net(port) {
                    signal_nets.insert(net);
                }
            }
        }
        for &(_, net) in outputs.iter() {
            signal_nets.insert(net);
        }

        let mut ports = Vec::new();
        for &(name, _) in inputs.iter() {
            ports.push(PortDecl {
                name: port_identifier(name),
                direction: Direction::In,
            });
        }
        for &(name, _) in outputs.iter() {
            ports.push(PortDecl {
                name: port_identifier(name),
                direction: Direction::Out,
            });
        }

        let mut signals = Vec::new();
        for &net in signal_nets.iter() {
            signals.push(SignalDecl {
                name: self.net_identifier(net),
                initial_value: self.initial_value(net)?,
            });
        }

        let mut statements = Vec::new();
        for &(name, net) in inputs.iter() {
            statements.push(Statement::Assign {
                target: self.net_identifier(net),
                source: port_identifier(name),
            });
        }
        for &(name, net) in outputs.iter() {
            statements.push(Statement::Assign {
                target: port_identifier(name),
                source: self.net_identifier(net),
            });
        }
        for &(id, primitive) in internal.iter() {
            let node = &self.schematic[id];
            match primitive {
                Primitive::Register(params) => {
                    if let Some(process) = self.register_process(id, params)? {
                        statements.push(Statement::Process(process));
                    }
                }
                _ => {
                    return Err(Error::UnsupportedNode {
                        node: node.name().to_string(),
                    })
                }
            }
        }

        // Ports, signals and process labels share one declarative region.
        let mut declared = HashSet::new();
        let labels = statements.iter().filter_map(|statement| match statement {
            Statement::Process(process) => Some(&process.label),
            _ => None,
        });
        for name in ports
            .iter()
            .map(|port| &port.name)
            .chain(signals.iter().map(|signal| &signal.name))
            .chain(labels)
        {
            if !declared.insert(identifier_key(name)) {
                return Err(Error::DuplicateIdentifier {
                    identifier: name.clone(),
                });
            }
        }

        Ok(Entity {
            name: escape_identifier(self.schematic.name()),
            ports,
            signals,
            statements,
        })
    }

    fn node_net(&self, node: NodeId<'a>, port: &str) -> Result<Option<NetId<'a>>, Error> {
        let port = self.schematic.port(node, port)?;
        Ok(self.netlist.connected_net(port))
    }

    fn net_identifier(&self, net: NetId<'a>) -> String {
        escape_identifier(self.netlist[net].name())
    }

    /// A net driven by a register starts out at the register's initial value.
    fn initial_value(&self, net: NetId<'a>) -> Result<Option<bool>, Error> {
        let driver = self.netlist.driver(self.schematic, net)?;
        let node = &self.schematic[self.schematic[driver].node()];
        Ok(match self.classify(node)? {
            Primitive::Register(params) => Some(params.initial_value),
            _ => None,
        })
    }

    fn register_process(
        &self,
        id: NodeId<'a>,
        params: RegisterParams,
    ) -> Result<Option<Process>, Error> {
        let node = &self.schematic[id];

        let output = match self.node_net(id, "out")? {
            Some(net) => self.net_identifier(net),
            None => {
                warn!("output of register '{}' is not connected, skipping", node.name());
                return Ok(None);
            }
        };
        let input_net = |port: &str| -> Result<String, Error> {
            let net = self.node_net(id, port)?.ok_or_else(|| {
                Error::Internal(format!(
                    "port '{}' of register '{}' is not connected",
                    port,
                    node.name()
                ))
            })?;
            Ok(self.net_identifier(net))
        };
        let data = input_net("in")?;
        let clock = input_net("clock")?;
        let reset = input_net("reset")?;

        let edge = if params.clock_active_high {
            Cond::RisingEdge(clock.clone())
        } else {
            Cond::FallingEdge(clock.clone())
        };
        let reset_active = || Cond::Equals {
            name: reset.clone(),
            value: params.reset_active_high,
        };
        let reset_value = || {
            vec![Sequential::Assign {
                target: output.clone(),
                expr: Expr::Bit(params.initial_value),
            }]
        };
        let load = || {
            vec![Sequential::Assign {
                target: output.clone(),
                expr: Expr::Ref(data.clone()),
            }]
        };

        let body = if params.reset_asynchronous {
            Sequential::If {
                branches: vec![(reset_active(), reset_value()), (edge, load())],
                otherwise: Vec::new(),
            }
        } else {
            Sequential::If {
                branches: vec![(
                    edge,
                    vec![Sequential::If {
                        branches: vec![(reset_active(), reset_value())],
                        otherwise: load(),
                    }],
                )],
                otherwise: Vec::new(),
            }
        };

        Ok(Some(Process {
            label: escape_identifier(&format!("register_{}", node.name())),
            sensitivity: vec![clock, reset, data],
            body: vec![body],
        }))
    }
}
