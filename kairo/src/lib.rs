//! A digital [HDL](https://en.wikipedia.org/wiki/Hardware_description_language) backend.
//!
//! kairo takes a [`Schematic`] (typed nodes with typed ports, joined by typed pairwise
//! connections), reconstructs its [nets](netlist/struct.Netlist.html), runs
//! [design rule checks](drc/index.html) over them, and emits a single flat
//! [VHDL](vhdl/fn.generate.html) entity, including clocked processes for registers.
//!
//! # Usage
//!
//! ```toml
//! [dependencies]
//! kairo = "0.1"
//! ```
//!
//! # Examples
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use kairo::netlist::Netlist;
//! use kairo::schematic::*;
//! use kairo::vhdl;
//!
//! // Create a context, which owns all type declarations
//! let c = Context::new();
//!
//! // Declare the standard digital vocabulary in a new schematic
//! let types = DigitalTypes::new(&c)?;
//! let mut s = Schematic::new("delay");
//! types.declare(&mut s)?;
//!
//! // A register between an input pin and an output pin
//! let d = types.input_pin(&mut s, "d")?;
//! let clk = types.input_pin(&mut s, "clk")?;
//! let rst = types.input_pin(&mut s, "rst")?;
//! let r = types.register(&mut s, "r", RegisterParams::default())?;
//! let q = types.output_pin(&mut s, "q")?;
//! types.wire(&mut s, "w_d", (d, "out"), (r, "in"))?;
//! types.wire(&mut s, "w_clk", (clk, "out"), (r, "clock"))?;
//! types.wire(&mut s, "w_rst", (rst, "out"), (r, "reset"))?;
//! types.wire(&mut s, "w_q", (r, "out"), (q, "in"))?;
//!
//! // Generate VHDL code
//! let netlist = Netlist::build(&s)?;
//! vhdl::generate(&s, &netlist, std::io::stdout())?;
//! # Ok(())
//! # }
//! ```
//!
//! To write a checked `.vhd` file in one step, use
//! [`backend::generate_output_products`](backend/fn.generate_output_products.html).
//!
//! [`Schematic`]: ./schematic/struct.Schematic.html

// Must be kept up-to-date with version in Cargo.toml
#![doc(html_root_url = "https://docs.rs/kairo/0.1.0")]

mod code_writer;
pub mod backend;
pub mod drc;
pub mod netlist;
pub mod schematic;
pub mod serialization;
pub mod vhdl;
