//! VHDL code generation.

mod compiler;
mod escape;
mod ir;

pub use compiler::Primitive;
pub use escape::{escape_identifier, is_basic_identifier, port_identifier};

use compiler::Compiler;

use crate::code_writer::{self, CodeWriter};
use crate::netlist::{Netlist, NetlistError};
use crate::schematic::{Schematic, SchematicError};

use thiserror::Error;
use tracing::debug;

use std::io::Write;

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not generate code for node '{node}' of unknown type")]
    UnsupportedNode { node: String },
    #[error("identifier {identifier} is declared more than once")]
    DuplicateIdentifier { identifier: String },
    #[error(transparent)]
    Schematic(#[from] SchematicError),
    #[error(transparent)]
    Netlist(#[from] NetlistError),
    #[error("internal error: {0}")]
    Internal(String),
    #[error(transparent)]
    CodeWriter(#[from] code_writer::Error),
}

/// Writes `schematic` as a single VHDL entity with an `rtl` architecture.
///
/// Input and output pins become the entity's ports, every net used inside the design becomes a
/// signal, and each register becomes a clocked process.
///
/// # Examples
///
/// ```
/// use kairo::netlist::Netlist;
/// use kairo::schematic::*;
/// use kairo::vhdl;
///
/// let c = Context::new();
/// let types = DigitalTypes::new(&c).unwrap();
/// let mut s = Schematic::new("passthrough");
/// types.declare(&mut s).unwrap();
///
/// let in0 = types.input_pin(&mut s, "in0").unwrap();
/// let out0 = types.output_pin(&mut s, "out0").unwrap();
/// types.wire(&mut s, "c0", (in0, "out"), (out0, "in")).unwrap();
///
/// let netlist = Netlist::build(&s).unwrap();
/// let mut code = Vec::new();
/// vhdl::generate(&s, &netlist, &mut code).unwrap();
///
/// let code = String::from_utf8(code).unwrap();
/// assert!(code.contains("in0 : in std_logic;"));
/// assert!(code.contains("out0 : out std_logic"));
/// ```
pub fn generate<W: Write>(
    schematic: &Schematic<'_>,
    netlist: &Netlist<'_>,
    w: W,
) -> Result<(), Error> {
    let entity = Compiler::new(schematic, netlist)?.compile()?;
    debug!(
        ports = entity.ports.len(),
        signals = entity.signals.len(),
        statements = entity.statements.len(),
        "compiled entity {}",
        entity.name
    );

    let mut w = CodeWriter::new(w);
    entity.write(&mut w)?;
    w.finish()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::schematic::*;

    fn render(s: &Schematic<'_>) -> Result<String, Error> {
        let netlist = Netlist::build(s)?;
        let mut code = Vec::new();
        generate(s, &netlist, &mut code)?;
        Ok(String::from_utf8(code).unwrap())
    }

    fn register_design<'a>(
        c: &'a Context<'a>,
        params: RegisterParams,
    ) -> Schematic<'a> {
        let types = DigitalTypes::new(c).unwrap();
        let mut s = Schematic::new("reg");
        types.declare(&mut s).unwrap();

        let d = types.input_pin(&mut s, "d").unwrap();
        let clk = types.input_pin(&mut s, "clk").unwrap();
        let rst = types.input_pin(&mut s, "rst").unwrap();
        let r = types.register(&mut s, "r", params).unwrap();
        let q = types.output_pin(&mut s, "q").unwrap();

        types.wire(&mut s, "w_d", (d, "out"), (r, "in")).unwrap();
        types.wire(&mut s, "w_clk", (clk, "out"), (r, "clock")).unwrap();
        types.wire(&mut s, "w_rst", (rst, "out"), (r, "reset")).unwrap();
        types.wire(&mut s, "w_q", (r, "out"), (q, "in")).unwrap();

        s
    }

    #[test]
    fn passthrough() {
        let c = Context::new();
        let types = DigitalTypes::new(&c).unwrap();
        let mut s = Schematic::new("test");
        types.declare(&mut s).unwrap();

        let in0 = types.input_pin(&mut s, "in0").unwrap();
        let out0 = types.output_pin(&mut s, "out0").unwrap();
        types.wire(&mut s, "c0", (in0, "out"), (out0, "in")).unwrap();

        assert_eq!(
            render(&s).unwrap(),
            concat!(
                "library IEEE;\n",
                "use IEEE.std_logic_1164.all;\n",
                "\n",
                "entity \\test\\ is\n",
                "    port (\n",
                "        in0 : in std_logic;\n",
                "        out0 : out std_logic\n",
                "    );\n",
                "end \\test\\;\n",
                "\n",
                "architecture rtl of \\test\\ is\n",
                "    signal \\n_c0\\ : std_logic;\n",
                "begin\n",
                "    \\n_c0\\ <= in0;\n",
                "    out0 <= \\n_c0\\;\n",
                "end rtl;\n",
            )
        );
    }

    #[test]
    fn asynchronous_reset_register() {
        let c = Context::new();
        let s = register_design(
            &c,
            RegisterParams {
                initial_value: true,
                reset_active_high: true,
                reset_asynchronous: true,
                clock_active_high: true,
            },
        );

        let code = render(&s).unwrap();
        assert!(code.contains("    signal \\n_w_q\\ : std_logic := '1';\n"));
        assert!(code.contains(concat!(
            "    \\register_r\\ : process (\\n_w_clk\\, \\n_w_rst\\, \\n_w_d\\)\n",
            "    begin\n",
            "        if (\\n_w_rst\\ = '1') then\n",
            "            \\n_w_q\\ <= '1';\n",
            "        elsif rising_edge(\\n_w_clk\\) then\n",
            "            \\n_w_q\\ <= \\n_w_d\\;\n",
            "        end if;\n",
            "    end process;\n",
        )));
    }

    #[test]
    fn synchronous_reset_register() {
        let c = Context::new();
        let s = register_design(
            &c,
            RegisterParams {
                initial_value: false,
                reset_active_high: false,
                reset_asynchronous: false,
                clock_active_high: false,
            },
        );

        let code = render(&s).unwrap();
        assert!(code.contains("    signal \\n_w_q\\ : std_logic := '0';\n"));
        assert!(code.contains(concat!(
            "        if falling_edge(\\n_w_clk\\) then\n",
            "            if (\\n_w_rst\\ = '0') then\n",
            "                \\n_w_q\\ <= '0';\n",
            "            else\n",
            "                \\n_w_q\\ <= \\n_w_d\\;\n",
            "            end if;\n",
            "        end if;\n",
        )));
    }

    #[test]
    fn input_nets_have_no_initial_value() {
        let c = Context::new();
        let s = register_design(&c, RegisterParams::default());

        let code = render(&s).unwrap();
        assert!(code.contains("    signal \\n_w_d\\ : std_logic;\n"));
        assert!(code.contains("    signal \\n_w_clk\\ : std_logic;\n"));
    }

    #[test]
    fn reserved_pin_names_are_escaped() {
        let c = Context::new();
        let types = DigitalTypes::new(&c).unwrap();
        let mut s = Schematic::new("test");
        types.declare(&mut s).unwrap();

        let a = types.input_pin(&mut s, "in").unwrap();
        let b = types.output_pin(&mut s, "out").unwrap();
        types.wire(&mut s, "c0", (a, "out"), (b, "in")).unwrap();

        let code = render(&s).unwrap();
        assert!(code.contains("        \\in\\ : in std_logic;\n"));
        assert!(code.contains("        \\out\\ : out std_logic\n"));
    }

    #[test]
    fn unknown_internal_node_is_unsupported() {
        let c = Context::new();
        let types = DigitalTypes::new(&c).unwrap();
        let mut s = Schematic::new("test");
        types.declare(&mut s).unwrap();

        let inverter = c
            .node_type(&[], &[("in", types.digital_in), ("out", types.digital_out)])
            .unwrap();
        s.add_node_type("inverter", inverter).unwrap();
        s.add_node("inv", inverter, &[]).unwrap();

        let e = render(&s).unwrap_err();
        assert!(matches!(e, Error::UnsupportedNode { ref node } if node == "inv"));
        assert_eq!(
            e.to_string(),
            "could not generate code for node 'inv' of unknown type"
        );
    }

    #[test]
    fn missing_register_type_is_an_error() {
        let c = Context::new();
        let types = DigitalTypes::new(&c).unwrap();
        let mut s = Schematic::new("test");
        s.add_port_type(DIGITAL_IN, types.digital_in).unwrap();
        s.add_port_type(DIGITAL_OUT, types.digital_out).unwrap();
        s.add_connection_type(DIGITAL_WIRE, types.digital_wire).unwrap();
        s.add_node_type(INPUT_PIN, types.input_pin).unwrap();
        s.add_node_type(OUTPUT_PIN, types.output_pin).unwrap();

        let e = render(&s).unwrap_err();
        assert_eq!(e.to_string(), "undeclared identifier 'register' in node types");
    }

    #[test]
    fn unconnected_pins_are_skipped() {
        let c = Context::new();
        let types = DigitalTypes::new(&c).unwrap();
        let mut s = Schematic::new("test");
        types.declare(&mut s).unwrap();

        types.input_pin(&mut s, "in0").unwrap();
        types.output_pin(&mut s, "out0").unwrap();

        let code = render(&s).unwrap();
        assert!(!code.contains("in0"));
        assert!(!code.contains("out0"));
    }

    #[test]
    fn undriven_net_is_an_internal_error() {
        let c = Context::new();
        let types = DigitalTypes::new(&c).unwrap();
        let mut s = Schematic::new("test");
        types.declare(&mut s).unwrap();

        let out0 = types.output_pin(&mut s, "out0").unwrap();
        let out1 = types.output_pin(&mut s, "out1").unwrap();
        types.wire(&mut s, "c0", (out0, "in"), (out1, "in")).unwrap();

        let e = render(&s).unwrap_err();
        assert!(e.to_string().starts_with("internal error: "));
    }

    #[test]
    fn register_with_unconnected_clock_is_an_internal_error() {
        let c = Context::new();
        let types = DigitalTypes::new(&c).unwrap();
        let mut s = Schematic::new("test");
        types.declare(&mut s).unwrap();

        let d = types.input_pin(&mut s, "d").unwrap();
        let r = types.register(&mut s, "r", RegisterParams::default()).unwrap();
        let q = types.output_pin(&mut s, "q").unwrap();
        types.wire(&mut s, "w_d", (d, "out"), (r, "in")).unwrap();
        types.wire(&mut s, "w_q", (r, "out"), (q, "in")).unwrap();

        let e = render(&s).unwrap_err();
        assert_eq!(
            e.to_string(),
            "internal error: port 'clock' of register 'r' is not connected"
        );
    }

    #[test]
    fn pin_named_like_a_net_is_rejected() {
        let c = Context::new();
        let types = DigitalTypes::new(&c).unwrap();
        let mut s = Schematic::new("test");
        types.declare(&mut s).unwrap();

        let a = types.input_pin(&mut s, "n_a b").unwrap();
        let b = types.output_pin(&mut s, "out0").unwrap();
        types.wire(&mut s, "a b", (a, "out"), (b, "in")).unwrap();

        let e = render(&s).unwrap_err();
        assert!(matches!(e, Error::DuplicateIdentifier { ref identifier } if identifier == "\\n_a b\\"));
        assert_eq!(e.to_string(), "identifier \\n_a b\\ is declared more than once");
    }

    #[test]
    fn pins_differing_only_in_case_are_rejected() {
        let c = Context::new();
        let types = DigitalTypes::new(&c).unwrap();
        let mut s = Schematic::new("test");
        types.declare(&mut s).unwrap();

        let upper = types.input_pin(&mut s, "A").unwrap();
        let lower = types.input_pin(&mut s, "a").unwrap();
        let out0 = types.output_pin(&mut s, "out0").unwrap();
        let out1 = types.output_pin(&mut s, "out1").unwrap();
        types.wire(&mut s, "c0", (upper, "out"), (out0, "in")).unwrap();
        types.wire(&mut s, "c1", (lower, "out"), (out1, "in")).unwrap();

        assert!(matches!(
            render(&s),
            Err(Error::DuplicateIdentifier { ref identifier }) if identifier == "a"
        ));
    }

    #[test]
    fn pin_named_like_a_process_is_rejected() {
        let c = Context::new();
        let types = DigitalTypes::new(&c).unwrap();
        let mut s = Schematic::new("test");
        types.declare(&mut s).unwrap();

        let d = types.input_pin(&mut s, "d").unwrap();
        let clk = types.input_pin(&mut s, "clk").unwrap();
        let rst = types.input_pin(&mut s, "rst").unwrap();
        let r = types.register(&mut s, "r x", RegisterParams::default()).unwrap();
        let q = types.output_pin(&mut s, "q").unwrap();
        types.wire(&mut s, "w_d", (d, "out"), (r, "in")).unwrap();
        types.wire(&mut s, "w_clk", (clk, "out"), (r, "clock")).unwrap();
        types.wire(&mut s, "w_rst", (rst, "out"), (r, "reset")).unwrap();
        types.wire(&mut s, "w_q", (r, "out"), (q, "in")).unwrap();
        assert!(render(&s).is_ok());

        let clash = types.output_pin(&mut s, "register_r x").unwrap();
        types.wire(&mut s, "w_clash", (r, "out"), (clash, "in")).unwrap();
        assert!(matches!(
            render(&s),
            Err(Error::DuplicateIdentifier { ref identifier }) if identifier == "\\register_r x\\"
        ));
    }

    #[test]
    fn distinct_names_in_different_case_spaces_are_accepted() {
        let c = Context::new();
        let types = DigitalTypes::new(&c).unwrap();
        let mut s = Schematic::new("test");
        types.declare(&mut s).unwrap();

        // `\n_c0\` (the net) and `N_C0` (the pin) are different identifiers.
        let a = types.input_pin(&mut s, "N_C0").unwrap();
        let b = types.output_pin(&mut s, "out0").unwrap();
        types.wire(&mut s, "c0", (a, "out"), (b, "in")).unwrap();

        let code = render(&s).unwrap();
        assert!(code.contains("N_C0 : in std_logic"));
        assert!(code.contains("signal \\n_c0\\ : std_logic;"));
    }
}
