use kairo::backend::{self, Options, TargetHdl};
use kairo::schematic::Context;
use kairo::serialization;

use clap::Parser;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

/// Generate HDL source from a schematic.
#[derive(clap::Parser, Debug)]
#[clap(version, about)]
struct Args {
    /// Target HDL.
    #[arg(long = "hdl", value_parser = TargetHdl::from_str)]
    hdl: Option<TargetHdl>,

    /// Directory output products are written to.
    #[arg(short = 'o', long = "output", default_value = ".")]
    output: PathBuf,

    /// Generate code even if design rule checks fail.
    #[arg(long = "no-checks")]
    no_checks: bool,

    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Schematic to compile, in JSON form.
    input: Option<PathBuf>,
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let target = args.hdl.unwrap_or_else(|| {
        warn!("no HDL specified, defaulting to {}", TargetHdl::default());
        TargetHdl::default()
    });

    let input = match args.input {
        Some(input) => input,
        None => {
            warn!("no input files, nothing to do");
            return ExitCode::SUCCESS;
        }
    };

    let text = match fs::read_to_string(&input) {
        Ok(text) => text,
        Err(e) => {
            error!(
                "error while building schematic: could not read '{}': {}",
                input.display(),
                e
            );
            return ExitCode::FAILURE;
        }
    };

    let context = Context::new();
    let schematic = match serialization::deserialize(&context, &text) {
        Ok(schematic) => schematic,
        Err(e) => {
            error!("error while building schematic: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let options = Options::default()
        .with_output_dir(args.output)
        .with_run_checks(!args.no_checks)
        .with_target(target);
    match backend::generate_output_products(&schematic, &options) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("error while generating code: {}", e);
            ExitCode::FAILURE
        }
    }
}
