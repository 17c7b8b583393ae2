use thiserror::Error;

use std::fmt;

/// A structural property that a schematic and its netlist must satisfy.
///
/// The verdict is computed on the first call to [`run`](#tymethod.run) and cached; later calls
/// return the cached verdict.
pub trait Check {
    fn name(&self) -> &'static str;

    /// Returns `true` if the check passes.
    fn run(&mut self) -> Result<bool, DrcError>;

    /// What the check found wrong. Empty until [`run`](#tymethod.run) has completed.
    fn violations(&self) -> &[Violation];
}

#[derive(Debug, Error)]
pub enum DrcError {
    #[error("internal error: design rule check '{check}' produced no result")]
    NoResult { check: &'static str },
}

/// A single finding of a design rule check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Violation {
    MultipleDrivers { net: String, drivers: Vec<String> },
    UnconnectedInput { node: String, port: String },
    UnmergedConnection {
        connection: String,
        from_net: String,
        to_net: String,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::MultipleDrivers { net, drivers } => {
                write!(f, "net '{}' is driven by {}", net, drivers.join(", "))
            }
            Violation::UnconnectedInput { node, port } => {
                write!(f, "input port '{}:{}' is not connected", node, port)
            }
            Violation::UnmergedConnection {
                connection,
                from_net,
                to_net,
            } => write!(
                f,
                "connection '{}' joins nets '{}' and '{}' without merging them",
                connection, from_net, to_net
            ),
        }
    }
}

/// Memoized verdict of a check.
#[derive(Debug, Default)]
pub enum CheckState {
    #[default]
    NotRun,
    Running,
    Done(Vec<Violation>),
}

impl CheckState {
    /// Runs `verify` the first time it's called and caches what it finds.
    ///
    /// If an earlier `verify` never completed, the state is left as `Running`, and every later
    /// call fails.
    pub fn run_with<F>(&mut self, check: &'static str, verify: F) -> Result<&[Violation], DrcError>
    where
        F: FnOnce() -> Result<Vec<Violation>, DrcError>,
    {
        if let CheckState::NotRun = self {
            *self = CheckState::Running;
            let violations = verify()?;
            *self = CheckState::Done(violations);
        }

        match self {
            CheckState::Done(violations) => Ok(violations),
            _ => Err(DrcError::NoResult { check }),
        }
    }

    pub fn violations(&self) -> &[Violation] {
        match self {
            CheckState::Done(violations) => violations,
            _ => &[],
        }
    }
}

/// A check that did not pass, with everything it found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckFailure {
    pub check: &'static str,
    pub violations: Vec<Violation>,
}

impl fmt::Display for CheckFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.check)?;
        for (i, violation) in self.violations.iter().enumerate() {
            write!(f, "{} {}", if i == 0 { ":" } else { ";" }, violation)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_is_computed_once() {
        let mut state = CheckState::default();
        let mut calls = 0;

        for _ in 0..3 {
            let violations = state
                .run_with("test", || {
                    calls += 1;
                    Ok(vec![Violation::UnconnectedInput {
                        node: "out0".into(),
                        port: "in".into(),
                    }])
                })
                .unwrap();
            assert_eq!(violations.len(), 1);
        }

        assert_eq!(calls, 1);
        assert_eq!(state.violations().len(), 1);
    }

    #[test]
    fn interrupted_run_is_an_internal_error() {
        let mut state = CheckState::default();

        let first = state.run_with("test", || Err(DrcError::NoResult { check: "inner" }));
        assert!(first.is_err());
        assert!(matches!(state, CheckState::Running));

        let e = state.run_with("test", || Ok(Vec::new())).unwrap_err();
        assert_eq!(
            e.to_string(),
            "internal error: design rule check 'test' produced no result"
        );
        assert!(state.violations().is_empty());
    }

    #[test]
    fn failure_lists_its_violations() {
        let failure = CheckFailure {
            check: "no multiple drivers",
            violations: vec![Violation::MultipleDrivers {
                net: "n_c0".into(),
                drivers: vec!["in0:out".into(), "in1:out".into()],
            }],
        };
        assert_eq!(
            failure.to_string(),
            "no multiple drivers: net 'n_c0' is driven by in0:out, in1:out"
        );
    }
}
