//! STL volume calculator.
//!
//! Loads a binary or ASCII STL model and reports its bounding box, surface
//! area, volume and the printed mass in a range of materials.
//!
//! # Usage
//!
//! - `volume-calc part.stl` - full analysis, mass for every material
//! - `volume-calc part.stl --calculation volume --material 11` - volume and
//!   mass in one material
//! - `volume-calc part.stl --calculation area` - surface area only
//! - `volume-calc --list-materials` - print the material table
//!
//! Add `--output-format json` for machine-readable output and `-v` (or
//! `RUST_LOG`) for diagnostics on stderr.

mod materials;
mod report;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use mesh_measure::{InfillFraction, MeasureOptions, measure_mesh};
use mesh_types::{DEFAULT_EDGE_DECIMALS, EdgePrecision};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::report::{Calculation, Report, Unit};

/// Calculate properties of 3D models.
///
/// By default, calculates all properties and the mass in every material.
#[derive(Parser, Debug)]
#[command(name = "volume-calc")]
#[command(version, long_about = None)]
struct Cli {
    /// Path to the STL file (binary or ASCII)
    #[arg(name = "FILE", required_unless_present = "list_materials")]
    file: Option<PathBuf>,

    /// Run a single calculation instead of the full analysis
    #[arg(long, value_enum)]
    calculation: Option<Calculation>,

    /// Unit for volume display
    #[arg(long, value_enum, default_value_t = Unit::Cm)]
    unit: Unit,

    /// Material ID for the single volume calculation (see --list-materials)
    #[arg(
        long,
        default_value_t = materials::DEFAULT_MATERIAL_ID,
        value_parser = clap::value_parser!(u8).range(1..=21)
    )]
    material: u8,

    /// Infill percentage used for mass estimates
    #[arg(long, default_value_t = 100.0)]
    infill: f64,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    output_format: OutputFormat,

    /// Decimal places kept when matching vertices of shared edges
    #[arg(
        long,
        default_value_t = DEFAULT_EDGE_DECIMALS,
        value_parser = clap::value_parser!(u32).range(0..=9)
    )]
    edge_precision: u32,

    /// List all available materials and exit
    #[arg(long)]
    list_materials: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&cli, &mut out)?;
    out.flush()?;
    Ok(())
}

fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    if cli.list_materials {
        match cli.output_format {
            OutputFormat::Table => materials::write_table(out)?,
            OutputFormat::Json => materials::write_json(out)?,
        }
        return Ok(());
    }

    let path = cli
        .file
        .as_deref()
        .context("a FILE is required unless --list-materials is used")?;
    let material = materials::get(cli.material)
        .with_context(|| format!("unknown material id {}", cli.material))?;
    let infill = InfillFraction::from_percent(cli.infill)?;

    let model = mesh_io::load_stl(path)
        .with_context(|| format!("failed to load {}", path.display()))?;

    let options =
        MeasureOptions::default().with_edge_precision(EdgePrecision::new(cli.edge_precision));
    let props = measure_mesh(&model.mesh, &options);
    info!(
        volume_cm3 = props.volume.volume_cm3,
        surface_area_cm2 = props.surface_area_cm2,
        watertight = props.watertight.is_watertight,
        "Analysis complete"
    );

    let report = Report::build(cli.calculation, path, &model, &props, material, infill);
    match cli.output_format {
        OutputFormat::Table => report.write_table(cli.unit, out)?,
        OutputFormat::Json => report.write_json(out)?,
    }
    Ok(())
}

/// Install the stderr log subscriber. `RUST_LOG` overrides `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
