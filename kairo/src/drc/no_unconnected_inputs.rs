use super::check::*;

use crate::netlist::Netlist;
use crate::schematic::Schematic;

/// Fails if any `digitalIn` port of any node isn't part of a net.
pub struct NoUnconnectedInputs<'s, 'a> {
    schematic: &'s Schematic<'a>,
    netlist: &'s Netlist<'a>,
    state: CheckState,
}

impl<'s, 'a> NoUnconnectedInputs<'s, 'a> {
    pub const NAME: &'static str = "no unconnected inputs";

    pub fn new(schematic: &'s Schematic<'a>, netlist: &'s Netlist<'a>) -> Self {
        NoUnconnectedInputs {
            schematic,
            netlist,
            state: CheckState::NotRun,
        }
    }
}

impl<'s, 'a> Check for NoUnconnectedInputs<'s, 'a> {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn run(&mut self) -> Result<bool, DrcError> {
        let (schematic, netlist) = (self.schematic, self.netlist);
        let violations = self.state.run_with(Self::NAME, || {
            let mut violations = Vec::new();
            for (_, node) in schematic.nodes() {
                for (port_name, port) in node.ports() {
                    if netlist.is_input(schematic, port) && netlist.connected_net(port).is_none()
                    {
                        violations.push(Violation::UnconnectedInput {
                            node: node.name().to_string(),
                            port: port_name.to_string(),
                        });
                    }
                }
            }
            Ok(violations)
        })?;
        Ok(violations.is_empty())
    }

    fn violations(&self) -> &[Violation] {
        self.state.violations()
    }
}
