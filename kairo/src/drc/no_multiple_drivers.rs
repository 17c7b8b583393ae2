use super::check::*;

use crate::netlist::Netlist;
use crate::schematic::Schematic;

/// Fails if any net is driven by more than one `digitalOut` port.
pub struct NoMultipleDrivers<'s, 'a> {
    schematic: &'s Schematic<'a>,
    netlist: &'s Netlist<'a>,
    state: CheckState,
}

impl<'s, 'a> NoMultipleDrivers<'s, 'a> {
    pub const NAME: &'static str = "no multiple drivers";

    pub fn new(schematic: &'s Schematic<'a>, netlist: &'s Netlist<'a>) -> Self {
        NoMultipleDrivers {
            schematic,
            netlist,
            state: CheckState::NotRun,
        }
    }
}

impl<'s, 'a> Check for NoMultipleDrivers<'s, 'a> {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn run(&mut self) -> Result<bool, DrcError> {
        let (schematic, netlist) = (self.schematic, self.netlist);
        let violations = self.state.run_with(Self::NAME, || {
            Ok(netlist
                .nets()
                .filter_map(|(id, net)| {
                    let drivers = netlist.drivers(schematic, id);
                    (drivers.len() > 1).then(|| Violation::MultipleDrivers {
                        net: net.name().to_string(),
                        drivers: drivers
                            .into_iter()
                            .map(|port| schematic.port_path(port))
                            .collect(),
                    })
                })
                .collect())
        })?;
        Ok(violations.is_empty())
    }

    fn violations(&self) -> &[Violation] {
        self.state.violations()
    }
}
