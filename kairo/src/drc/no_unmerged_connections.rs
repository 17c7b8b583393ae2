use super::check::*;

use crate::netlist::Netlist;
use crate::schematic::Schematic;

/// Fails if a wire connection joined two ports that already belonged to different nets.
///
/// This check is advisory: such connections are kept as separate nets, which is usually not what
/// the author meant, but code can still be generated for them.
pub struct NoUnmergedConnections<'s, 'a> {
    schematic: &'s Schematic<'a>,
    netlist: &'s Netlist<'a>,
    state: CheckState,
}

impl<'s, 'a> NoUnmergedConnections<'s, 'a> {
    pub const NAME: &'static str = "no unmerged connections";

    pub fn new(schematic: &'s Schematic<'a>, netlist: &'s Netlist<'a>) -> Self {
        NoUnmergedConnections {
            schematic,
            netlist,
            state: CheckState::NotRun,
        }
    }
}

impl<'s, 'a> Check for NoUnmergedConnections<'s, 'a> {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn run(&mut self) -> Result<bool, DrcError> {
        let (schematic, netlist) = (self.schematic, self.netlist);
        let violations = self.state.run_with(Self::NAME, || {
            Ok(netlist
                .unmerged()
                .iter()
                .map(|unmerged| Violation::UnmergedConnection {
                    connection: schematic[unmerged.connection].name().to_string(),
                    from_net: netlist[unmerged.from_net].name().to_string(),
                    to_net: netlist[unmerged.to_net].name().to_string(),
                })
                .collect())
        })?;
        Ok(violations.is_empty())
    }

    fn violations(&self) -> &[Violation] {
        self.state.violations()
    }
}
