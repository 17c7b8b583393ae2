//! The full pipeline from schematic to HDL source file.

use crate::drc::{self, Check, CheckFailure, DrcError};
use crate::drc::{NoMultipleDrivers, NoUnconnectedInputs, NoUnmergedConnections};
use crate::netlist::{Netlist, NetlistError};
use crate::schematic::Schematic;
use crate::vhdl;

use thiserror::Error;
use tracing::{debug, info, warn};

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// The language output products are written in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TargetHdl {
    #[default]
    Vhdl,
}

impl TargetHdl {
    pub fn file_extension(self) -> &'static str {
        match self {
            TargetHdl::Vhdl => "vhd",
        }
    }
}

impl FromStr for TargetHdl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "vhdl" => Ok(TargetHdl::Vhdl),
            _ => Err(Error::UnknownTarget(s.to_string())),
        }
    }
}

impl fmt::Display for TargetHdl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetHdl::Vhdl => write!(f, "VHDL"),
        }
    }
}

/// Settings for [`generate_output_products`](fn.generate_output_products.html).
///
/// # Examples
///
/// ```
/// use kairo::backend::{Options, TargetHdl};
///
/// let options = Options::default()
///     .with_output_dir("build")
///     .with_run_checks(false);
/// assert_eq!(options.target(), TargetHdl::Vhdl);
/// assert!(!options.run_checks());
/// ```
#[derive(Clone, Debug)]
pub struct Options {
    output_dir: PathBuf,
    run_checks: bool,
    target: TargetHdl,
}

impl Options {
    pub fn with_output_dir(self, output_dir: impl Into<PathBuf>) -> Options {
        Options {
            output_dir: output_dir.into(),
            ..self
        }
    }

    /// Whether failing design rule checks block code generation.
    pub fn with_run_checks(self, run_checks: bool) -> Options {
        Options { run_checks, ..self }
    }

    pub fn with_target(self, target: TargetHdl) -> Options {
        Options { target, ..self }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn run_checks(&self) -> bool {
        self.run_checks
    }

    pub fn target(&self) -> TargetHdl {
        self.target
    }
}

impl Default for Options {
    fn default() -> Self {
        Options {
            output_dir: PathBuf::from("."),
            run_checks: true,
            target: TargetHdl::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown HDL '{0}'")]
    UnknownTarget(String),
    #[error("output directory '{}' does not exist", .0.display())]
    OutputDirMissing(PathBuf),
    #[error("output directory '{}' is not a directory", .0.display())]
    OutputDirNotADirectory(PathBuf),
    #[error("output directory '{}' is not writable", .0.display())]
    OutputDirReadOnly(PathBuf),
    #[error("schematic name '{0}' cannot be used as a file name")]
    InvalidFileName(String),
    #[error("design rule checks failed: {}", describe_failures(.failures))]
    ChecksFailed { failures: Vec<CheckFailure> },
    #[error(transparent)]
    Netlist(#[from] NetlistError),
    #[error(transparent)]
    Drc(#[from] DrcError),
    #[error(transparent)]
    Vhdl(#[from] vhdl::Error),
    #[error("could not write '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn describe_failures(failures: &[CheckFailure]) -> String {
    failures
        .iter()
        .map(|failure| failure.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

fn check_output_dir(dir: &Path) -> Result<(), Error> {
    let metadata = match fs::metadata(dir) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(Error::OutputDirMissing(dir.to_path_buf()))
        }
        Err(source) => {
            return Err(Error::Io {
                path: dir.to_path_buf(),
                source,
            })
        }
    };
    if !metadata.is_dir() {
        return Err(Error::OutputDirNotADirectory(dir.to_path_buf()));
    }
    // Mode bits alone don't account for ownership, so try to create a file.
    match tempfile::Builder::new().prefix(".kairo").tempfile_in(dir) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            Err(Error::OutputDirReadOnly(dir.to_path_buf()))
        }
        Err(source) => Err(Error::Io {
            path: dir.to_path_buf(),
            source,
        }),
    }
}

fn check_file_stem(name: &str) -> Result<(), Error> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(Error::InvalidFileName(name.to_string()));
    }
    Ok(())
}

/// Builds the netlist of `schematic`, checks it, and writes `<name>.<ext>` into the output
/// directory. Returns the path of the written file.
///
/// The source is rendered fully before the file is created, so a failure never leaves a partial
/// file behind.
///
/// # Examples
///
/// ```
/// use kairo::backend::{self, Options};
/// use kairo::schematic::*;
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
/// let dir = std::env::temp_dir();
/// let path = backend::generate_output_products(&s, &Options::default().with_output_dir(&dir))
///     .unwrap();
/// assert_eq!(path, dir.join("passthrough.vhd"));
/// ```
pub fn generate_output_products(
    schematic: &Schematic<'_>,
    options: &Options,
) -> Result<PathBuf, Error> {
    check_file_stem(schematic.name())?;
    check_output_dir(&options.output_dir)?;
    info!(
        "generating {} for '{}' in {}",
        options.target,
        schematic.name(),
        options.output_dir.display()
    );

    let netlist = Netlist::build(schematic)?;
    info!("netlist built with {} net(s)", netlist.nets().count());

    if options.run_checks {
        let mut no_multiple_drivers = NoMultipleDrivers::new(schematic, &netlist);
        let mut no_unconnected_inputs = NoUnconnectedInputs::new(schematic, &netlist);
        let mut checks: [&mut dyn Check; 2] =
            [&mut no_multiple_drivers, &mut no_unconnected_inputs];
        let failures = drc::run_checks(&mut checks)?;
        if !failures.is_empty() {
            return Err(Error::ChecksFailed { failures });
        }
        info!("design rule checks passed");
    } else {
        warn!("design rule checks are disabled");
    }

    let mut no_unmerged_connections = NoUnmergedConnections::new(schematic, &netlist);
    if !no_unmerged_connections.run()? {
        for violation in no_unmerged_connections.violations() {
            warn!("{}", violation);
        }
    }

    let mut code = Vec::new();
    match options.target {
        TargetHdl::Vhdl => vhdl::generate(schematic, &netlist, &mut code)?,
    }
    debug!("rendered {} byte(s)", code.len());

    let path = options.output_dir.join(format!(
        "{}.{}",
        schematic.name(),
        options.target.file_extension()
    ));
    fs::write(&path, &code).map_err(|source| Error::Io {
        path: path.clone(),
        source,
    })?;
    info!("wrote {}", path.display());

    Ok(path)
}
