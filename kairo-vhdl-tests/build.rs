use kairo::backend::{self, Options};
use kairo::schematic::*;
use kairo::serialization::{self, SerializationError};

use std::env;

#[derive(Debug)]
enum Error {
    Schematic(SchematicError),
    Serialization(SerializationError),
    Backend(backend::Error),
}

impl From<SchematicError> for Error {
    fn from(error: SchematicError) -> Error {
        Error::Schematic(error)
    }
}

impl From<SerializationError> for Error {
    fn from(error: SerializationError) -> Error {
        Error::Serialization(error)
    }
}

impl From<backend::Error> for Error {
    fn from(error: backend::Error) -> Error {
        Error::Backend(error)
    }
}

fn main() -> Result<(), Error> {
    println!("cargo:rerun-if-changed=../demos/register.json");

    let out_dir = env::var("OUT_DIR").unwrap();
    let options = Options::default().with_output_dir(&out_dir);

    let c = Context::new();
    let types = DigitalTypes::new(&c)?;

    backend::generate_output_products(&passthrough(&types)?, &options)?;
    backend::generate_output_products(&fanout(&types)?, &options)?;
    backend::generate_output_products(
        &register(
            &types,
            "async_reset_high",
            RegisterParams {
                initial_value: true,
                reset_active_high: true,
                reset_asynchronous: true,
                clock_active_high: true,
            },
        )?,
        &options,
    )?;
    backend::generate_output_products(
        &register(
            &types,
            "sync_reset_low",
            RegisterParams {
                initial_value: false,
                reset_active_high: false,
                reset_asynchronous: false,
                clock_active_high: true,
            },
        )?,
        &options,
    )?;
    backend::generate_output_products(
        &register(
            &types,
            "falling_edge",
            RegisterParams {
                initial_value: false,
                reset_active_high: true,
                reset_asynchronous: true,
                clock_active_high: false,
            },
        )?,
        &options,
    )?;
    backend::generate_output_products(&shift_register(&types)?, &options)?;
    backend::generate_output_products(&awkward_names(&types)?, &options)?;

    let demo = serialization::deserialize(&c, include_str!("../demos/register.json"))?;
    backend::generate_output_products(&demo, &options)?;

    Ok(())
}

fn schematic<'a>(types: &DigitalTypes<'a>, name: &str) -> Result<Schematic<'a>, Error> {
    let mut s = Schematic::new(name);
    types.declare(&mut s)?;
    Ok(s)
}

fn passthrough<'a>(types: &DigitalTypes<'a>) -> Result<Schematic<'a>, Error> {
    let mut s = schematic(types, "passthrough")?;

    let in0 = types.input_pin(&mut s, "in0")?;
    let out0 = types.output_pin(&mut s, "out0")?;
    types.wire(&mut s, "c0", (in0, "out"), (out0, "in"))?;

    Ok(s)
}

fn fanout<'a>(types: &DigitalTypes<'a>) -> Result<Schematic<'a>, Error> {
    let mut s = schematic(types, "fanout")?;

    let in0 = types.input_pin(&mut s, "in0")?;
    let out0 = types.output_pin(&mut s, "out0")?;
    let out1 = types.output_pin(&mut s, "out1")?;
    let out2 = types.output_pin(&mut s, "out2")?;
    types.wire(&mut s, "c0", (in0, "out"), (out0, "in"))?;
    types.wire(&mut s, "c1", (out0, "in"), (out1, "in"))?;
    types.wire(&mut s, "c2", (in0, "out"), (out2, "in"))?;

    Ok(s)
}

fn register<'a>(
    types: &DigitalTypes<'a>,
    name: &str,
    params: RegisterParams,
) -> Result<Schematic<'a>, Error> {
    let mut s = schematic(types, name)?;

    let d = types.input_pin(&mut s, "d")?;
    let clk = types.input_pin(&mut s, "clk")?;
    let rst = types.input_pin(&mut s, "rst")?;
    let r = types.register(&mut s, "r", params)?;
    let q = types.output_pin(&mut s, "q")?;
    types.wire(&mut s, "w_d", (d, "out"), (r, "in"))?;
    types.wire(&mut s, "w_clk", (clk, "out"), (r, "clock"))?;
    types.wire(&mut s, "w_rst", (rst, "out"), (r, "reset"))?;
    types.wire(&mut s, "w_q", (r, "out"), (q, "in"))?;

    Ok(s)
}

fn shift_register<'a>(types: &DigitalTypes<'a>) -> Result<Schematic<'a>, Error> {
    let mut s = schematic(types, "shift_register")?;

    let d = types.input_pin(&mut s, "d")?;
    let clk = types.input_pin(&mut s, "clk")?;
    let rst = types.input_pin(&mut s, "rst")?;
    let r0 = types.register(
        &mut s,
        "r0",
        RegisterParams {
            initial_value: true,
            ..RegisterParams::default()
        },
    )?;
    let r1 = types.register(&mut s, "r1", RegisterParams::default())?;
    let q = types.output_pin(&mut s, "q")?;

    types.wire(&mut s, "w_d", (d, "out"), (r0, "in"))?;
    types.wire(&mut s, "w_clk", (clk, "out"), (r0, "clock"))?;
    types.wire(&mut s, "w_clk1", (r0, "clock"), (r1, "clock"))?;
    types.wire(&mut s, "w_rst", (rst, "out"), (r0, "reset"))?;
    types.wire(&mut s, "w_rst1", (rst, "out"), (r1, "reset"))?;
    types.wire(&mut s, "w_mid", (r0, "out"), (r1, "in"))?;
    types.wire(&mut s, "w_q", (r1, "out"), (q, "in"))?;

    Ok(s)
}

fn awkward_names<'a>(types: &DigitalTypes<'a>) -> Result<Schematic<'a>, Error> {
    let mut s = schematic(types, "awkward_names")?;

    let a = types.input_pin(&mut s, "in")?;
    let b = types.output_pin(&mut s, "data out")?;
    types.wire(&mut s, "c0", (a, "out"), (b, "in"))?;

    Ok(s)
}
