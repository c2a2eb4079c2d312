//! Shared pieces of the `stl2obj` and `obj2stl` converters.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser};
use meshweld::{
    io::{obj, stl, MeshFormat, StlEncoding},
    weld::{WeldOptions, DEFAULT_TOLERANCE},
};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Logging verbosity flags.
#[derive(Args, Clone, Copy, Debug, Default)]
pub struct Verbosity {
    /// Log more, repeat for more detail (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Verbosity {
    /// Returns the log level directive selected by the flags.
    pub const fn directive(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Installs a subscriber writing log events to stderr.
///
/// `RUST_LOG` takes precedence over the verbosity flags when it is set.
pub fn init_logging(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Returns `output`, or `input` with the extension of `format` if it is `None`.
pub fn output_path(input: &Path, output: Option<&Path>, format: MeshFormat) -> PathBuf {
    output.map_or_else(
        || input.with_extension(format.extension()),
        Path::to_path_buf,
    )
}

/// Parses a welding tolerance, a finite and non-negative squared distance.
pub fn parse_tolerance(value: &str) -> Result<f64, String> {
    let tolerance: f64 = value
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;

    if tolerance.is_finite() && tolerance >= 0.0 {
        Ok(tolerance)
    } else {
        Err(format!("`{value}` is not a finite non-negative squared distance"))
    }
}

/// Converts a binary or ASCII STL file to OBJ, welding coincident vertices
#[derive(Parser, Debug)]
#[command(name = "stl2obj", version)]
pub struct Stl2Obj {
    /// STL file to read
    pub input: PathBuf,

    /// OBJ file to write [default: INPUT with the obj extension]
    pub output: Option<PathBuf>,

    /// Keep every triangle corner as its own vertex
    #[arg(long)]
    pub no_merge: bool,

    /// Largest squared distance between welded vertices
    #[arg(
        short,
        long,
        value_name = "SQUARED_DISTANCE",
        default_value_t = DEFAULT_TOLERANCE,
        value_parser = parse_tolerance,
    )]
    pub tolerance: f64,

    #[command(flatten)]
    pub verbosity: Verbosity,
}

impl Stl2Obj {
    /// Returns the welding options selected by the flags.
    pub const fn weld_options(&self) -> WeldOptions {
        WeldOptions {
            merge: !self.no_merge,
            tolerance: self.tolerance,
        }
    }

    /// Runs the conversion.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read or the output cannot be written.
    pub fn run(&self) -> Result<()> {
        let output = output_path(&self.input, self.output.as_deref(), MeshFormat::Obj);

        let mesh = stl::load_stl(&self.input, &self.weld_options())
            .with_context(|| format!("failed to read {}", self.input.display()))?;
        obj::save_obj(&mesh, &output)
            .with_context(|| format!("failed to write {}", output.display()))?;

        info!(
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            "converted {} to {}",
            self.input.display(),
            output.display()
        );

        Ok(())
    }
}

/// Converts an OBJ file to STL
#[derive(Parser, Debug)]
#[command(name = "obj2stl", version)]
pub struct Obj2Stl {
    /// OBJ file to read
    pub input: PathBuf,

    /// STL file to write [default: INPUT with the stl extension]
    pub output: Option<PathBuf>,

    /// Write an ASCII STL instead of a binary one
    #[arg(long)]
    pub ascii: bool,

    #[command(flatten)]
    pub verbosity: Verbosity,
}

impl Obj2Stl {
    /// Returns the STL encoding selected by the flags.
    pub const fn encoding(&self) -> StlEncoding {
        if self.ascii {
            StlEncoding::Ascii
        } else {
            StlEncoding::Binary
        }
    }

    /// Runs the conversion.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read or the output cannot be written.
    pub fn run(&self) -> Result<()> {
        let output = output_path(&self.input, self.output.as_deref(), MeshFormat::Stl);

        let mesh = obj::load_obj(&self.input)
            .with_context(|| format!("failed to read {}", self.input.display()))?;
        stl::save_stl(&mesh, &output, self.encoding())
            .with_context(|| format!("failed to write {}", output.display()))?;

        info!(
            faces = mesh.face_count(),
            "converted {} to {}",
            self.input.display(),
            output.display()
        );

        Ok(())
    }
}
