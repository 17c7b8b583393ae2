//! The typed circuit description consumed by the rest of the pipeline.

mod attributes;
mod connection;
mod context;
mod design;
mod digital;
mod error;
mod node;
mod types;
mod value;

pub use attributes::{Attributes, UserTypes};
pub use connection::*;
pub use context::*;
pub use design::*;
pub use digital::*;
pub use error::*;
pub use node::*;
pub use types::{AttributeSchema, ConnectionType, ConstraintType, NodeType, PortType, TypeValue};
pub use value::*;
