use thiserror::Error;

use std::fmt;

/// Which end of a connection an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    From,
    To,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::From => write!(f, "from"),
            Endpoint::To => write!(f, "to"),
        }
    }
}

#[derive(Debug, Error)]
pub enum NetlistError {
    #[error("schematic is missing required {category}: {}", .missing.join(", "))]
    MissingTypes {
        category: &'static str,
        missing: Vec<&'static str>,
    },
    #[error("node '{node}' has unknown type")]
    UnknownNodeType { node: String },
    #[error("connection '{connection}' has unknown type")]
    UnknownConnectionType { connection: String },
    #[error("connection '{connection}' has type '{actual}', expected 'digitalWire'")]
    ConnectionTypeMismatch { connection: String, actual: String },
    #[error("'{side}' endpoint of connection '{connection}' has type '{actual}', expected 'digitalIn' or 'digitalOut'")]
    EndpointTypeMismatch {
        connection: String,
        side: Endpoint,
        actual: String,
    },
    #[error("internal error: {0}")]
    Internal(String),
}
