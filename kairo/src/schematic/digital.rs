use super::connection::*;
use super::context::*;
use super::design::*;
use super::error::*;
use super::node::*;
use super::types::*;
use super::value::*;

pub const DIGITAL_IN: &str = "digitalIn";
pub const DIGITAL_OUT: &str = "digitalOut";
pub const DIGITAL_WIRE: &str = "digitalWire";
pub const INPUT_PIN: &str = "inputPin";
pub const OUTPUT_PIN: &str = "outputPin";
pub const REGISTER: &str = "register";

pub const INITIAL_VALUE: &str = "initialValue";
pub const RESET_ACTIVE_HIGH: &str = "resetActiveHigh";
pub const RESET_ASYNCHRONOUS: &str = "resetAsynchronous";
pub const CLOCK_ACTIVE_HIGH: &str = "clockActiveHigh";

/// Behavior of a `register` node, as given by its four Bool attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegisterParams {
    pub initial_value: bool,
    pub reset_active_high: bool,
    pub reset_asynchronous: bool,
    pub clock_active_high: bool,
}

impl RegisterParams {
    pub fn from_node(node: &NodeValue<'_>) -> Result<RegisterParams, SchematicError> {
        let attributes = node.attributes();
        Ok(RegisterParams {
            initial_value: attributes.get_bool(INITIAL_VALUE)?,
            reset_active_high: attributes.get_bool(RESET_ACTIVE_HIGH)?,
            reset_asynchronous: attributes.get_bool(RESET_ASYNCHRONOUS)?,
            clock_active_high: attributes.get_bool(CLOCK_ACTIVE_HIGH)?,
        })
    }

    pub fn to_attributes(self) -> [(&'static str, Value); 4] {
        [
            (INITIAL_VALUE, Value::Bool(self.initial_value)),
            (RESET_ACTIVE_HIGH, Value::Bool(self.reset_active_high)),
            (RESET_ASYNCHRONOUS, Value::Bool(self.reset_asynchronous)),
            (CLOCK_ACTIVE_HIGH, Value::Bool(self.clock_active_high)),
        ]
    }
}

impl Default for RegisterParams {
    fn default() -> Self {
        RegisterParams {
            initial_value: false,
            reset_active_high: true,
            reset_asynchronous: false,
            clock_active_high: true,
        }
    }
}

/// The standard digital vocabulary: `digitalIn`/`digitalOut` ports, `digitalWire` connections,
/// and `inputPin`, `outputPin` and `register` nodes.
///
/// # Examples
///
/// ```
/// use kairo::schematic::*;
///
/// let c = Context::new();
/// let types = DigitalTypes::new(&c).unwrap();
///
/// let mut s = Schematic::new("passthrough");
/// types.declare(&mut s).unwrap();
///
/// let in0 = types.input_pin(&mut s, "in0").unwrap();
/// let out0 = types.output_pin(&mut s, "out0").unwrap();
/// types.wire(&mut s, "c0", (in0, "out"), (out0, "in")).unwrap();
/// ```
pub struct DigitalTypes<'a> {
    pub digital_in: &'a PortType,
    pub digital_out: &'a PortType,
    pub digital_wire: &'a ConnectionType,
    pub input_pin: &'a NodeType<'a>,
    pub output_pin: &'a NodeType<'a>,
    pub register: &'a NodeType<'a>,
}

impl<'a> DigitalTypes<'a> {
    pub fn new(c: &'a Context<'a>) -> Result<DigitalTypes<'a>, SchematicError> {
        let digital_in = c.port_type(&[])?;
        let digital_out = c.port_type(&[])?;
        let digital_wire = c.connection_type(&[])?;
        let input_pin = c.node_type(&[], &[("out", digital_out)])?;
        let output_pin = c.node_type(&[], &[("in", digital_in)])?;
        let register = c.node_type(
            &[
                (INITIAL_VALUE, TypeValue::Bool),
                (RESET_ACTIVE_HIGH, TypeValue::Bool),
                (RESET_ASYNCHRONOUS, TypeValue::Bool),
                (CLOCK_ACTIVE_HIGH, TypeValue::Bool),
            ],
            &[
                ("in", digital_in),
                ("clock", digital_in),
                ("reset", digital_in),
                ("out", digital_out),
            ],
        )?;

        Ok(DigitalTypes {
            digital_in,
            digital_out,
            digital_wire,
            input_pin,
            output_pin,
            register,
        })
    }

    /// Registers every type of the vocabulary under its standard name.
    pub fn declare(&self, s: &mut Schematic<'a>) -> Result<(), SchematicError> {
        s.add_port_type(DIGITAL_IN, self.digital_in)?;
        s.add_port_type(DIGITAL_OUT, self.digital_out)?;
        s.add_connection_type(DIGITAL_WIRE, self.digital_wire)?;
        s.add_node_type(INPUT_PIN, self.input_pin)?;
        s.add_node_type(OUTPUT_PIN, self.output_pin)?;
        s.add_node_type(REGISTER, self.register)
    }

    pub fn input_pin(
        &self,
        s: &mut Schematic<'a>,
        name: &str,
    ) -> Result<NodeId<'a>, SchematicError> {
        s.add_node(name, self.input_pin, &[])
    }

    pub fn output_pin(
        &self,
        s: &mut Schematic<'a>,
        name: &str,
    ) -> Result<NodeId<'a>, SchematicError> {
        s.add_node(name, self.output_pin, &[])
    }

    pub fn register(
        &self,
        s: &mut Schematic<'a>,
        name: &str,
        params: RegisterParams,
    ) -> Result<NodeId<'a>, SchematicError> {
        s.add_node(name, self.register, &params.to_attributes())
    }

    /// Connects `from.0`'s port `from.1` to `to.0`'s port `to.1` with a `digitalWire`.
    pub fn wire(
        &self,
        s: &mut Schematic<'a>,
        name: &str,
        from: (NodeId<'a>, &str),
        to: (NodeId<'a>, &str),
    ) -> Result<ConnectionId<'a>, SchematicError> {
        let from = s.port(from.0, from.1)?;
        let to = s.port(to.0, to.1)?;
        s.add_connection(name, self.digital_wire, from, to, &[])
    }
}
