//! Structural design rule checks over a schematic and its netlist.

mod check;
mod no_multiple_drivers;
mod no_unconnected_inputs;
mod no_unmerged_connections;

pub use check::*;
pub use no_multiple_drivers::*;
pub use no_unconnected_inputs::*;
pub use no_unmerged_connections::*;

/// Runs every check in `checks` and collects the ones that failed.
pub fn run_checks(checks: &mut [&mut dyn Check]) -> Result<Vec<CheckFailure>, DrcError> {
    let mut failures = Vec::new();
    for check in checks.iter_mut() {
        if !check.run()? {
            failures.push(CheckFailure {
                check: check.name(),
                violations: check.violations().to_vec(),
            });
        }
    }
    Ok(failures)
}
