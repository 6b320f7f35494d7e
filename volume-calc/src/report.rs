//! Result assembly and rendering (table or JSON).

use std::io::{self, Write};
use std::path::Path;

use clap::ValueEnum;
use mesh_io::StlModel;
use mesh_measure::{InfillFraction, MassEstimate, MeshProperties};
use mesh_types::BoundingBox;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::materials::{MATERIALS, Material};

/// Unit used to display volumes in table output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Unit {
    /// Cubic centimeters.
    #[default]
    Cm,
    /// Cubic inches.
    Inch,
}

/// Which figures to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Calculation {
    /// Volume and mass for one material.
    Volume,
    /// Surface area only.
    Area,
}

/// Source file details.
#[derive(Debug, Clone, Serialize)]
pub struct FileInfo {
    pub filename: String,
    pub file_size_kb: f64,
    pub encoding: &'static str,
    pub skipped_facets: usize,
}

/// Geometric properties of the model.
#[derive(Debug, Clone, Serialize)]
pub struct ModelSummary {
    pub triangle_count: usize,
    pub bounding_box_cm: BoundingBox,
    pub surface_area_cm2: f64,
    pub volume_cm3: f64,
    pub volume_inch3: f64,
    pub watertight: bool,
}

/// Mass of the model in one material.
#[derive(Debug, Clone, Serialize)]
pub struct MaterialMass {
    pub id: u8,
    pub name: &'static str,
    pub density_g_cm3: f64,
    pub mass_g: f64,
    pub solid_mass_g: f64,
}

impl MaterialMass {
    fn new(material: &Material, volume_cm3: f64, infill: InfillFraction) -> Self {
        let estimate = MassEstimate::new(volume_cm3, material.density_g_cm3, infill);
        Self {
            id: material.id,
            name: material.name,
            density_g_cm3: material.density_g_cm3,
            mass_g: estimate.at_infill_g,
            solid_mass_g: estimate.solid_g,
        }
    }
}

/// Everything printed for one run.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "calculation", rename_all = "snake_case")]
pub enum Report {
    /// Default mode: all properties and a mass for every material.
    Full {
        file: FileInfo,
        model: ModelSummary,
        infill_percent: f64,
        mass_estimates: Vec<MaterialMass>,
        warnings: Vec<String>,
    },
    /// Volume and mass for the selected material.
    Volume {
        file: FileInfo,
        bounding_box_cm: BoundingBox,
        volume_cm3: f64,
        volume_inch3: f64,
        infill_percent: f64,
        material: MaterialMass,
        warnings: Vec<String>,
    },
    /// Surface area only.
    Area {
        file: FileInfo,
        bounding_box_cm: BoundingBox,
        surface_area_cm2: f64,
        warnings: Vec<String>,
    },
}

impl Report {
    /// Assemble the report for `calculation` (`None` for the full analysis).
    pub fn build(
        calculation: Option<Calculation>,
        path: &Path,
        model: &StlModel,
        props: &MeshProperties,
        material: &Material,
        infill: InfillFraction,
    ) -> Self {
        let file = file_info(path, model);
        let warnings = collect_warnings(model, props);
        let volume_cm3 = props.volume.volume_cm3;

        match calculation {
            None => Self::Full {
                file,
                model: ModelSummary {
                    triangle_count: props.triangle_count,
                    bounding_box_cm: props.bounding_box,
                    surface_area_cm2: props.surface_area_cm2,
                    volume_cm3,
                    volume_inch3: props.volume.volume_inch3(),
                    watertight: props.watertight.is_watertight,
                },
                infill_percent: infill.percent(),
                mass_estimates: MATERIALS
                    .iter()
                    .map(|m| MaterialMass::new(m, volume_cm3, infill))
                    .collect(),
                warnings,
            },
            Some(Calculation::Volume) => Self::Volume {
                file,
                bounding_box_cm: props.bounding_box,
                volume_cm3,
                volume_inch3: props.volume.volume_inch3(),
                infill_percent: infill.percent(),
                material: MaterialMass::new(material, volume_cm3, infill),
                warnings,
            },
            Some(Calculation::Area) => Self::Area {
                file,
                bounding_box_cm: props.bounding_box,
                surface_area_cm2: props.surface_area_cm2,
                warnings,
            },
        }
    }

    /// Warnings attached to the report.
    pub fn warnings(&self) -> &[String] {
        match self {
            Self::Full { warnings, .. }
            | Self::Volume { warnings, .. }
            | Self::Area { warnings, .. } => warnings,
        }
    }

    /// Print as pretty JSON.
    pub fn write_json<W: Write>(&self, out: &mut W) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)
    }

    /// Print as a human-readable table.
    pub fn write_table<W: Write>(&self, unit: Unit, out: &mut W) -> io::Result<()> {
        match self {
            Self::Full {
                file,
                model,
                infill_percent,
                mass_estimates,
                ..
            } => {
                title(out, &format!("Model Analysis: {}", file.filename))?;
                row(out, "File Size", &format!("{:.2} KB", file.file_size_kb))?;
                row(out, "Encoding", file.encoding)?;
                row(out, "Triangles", &group_thousands(model.triangle_count))?;
                row(out, "Bounding Box (cm)", &format_bbox(&model.bounding_box_cm))?;
                row(out, "Surface Area", &format!("{:.4} cm²", model.surface_area_cm2))?;
                row(
                    out,
                    "Volume",
                    &format_volume(model.volume_cm3, model.volume_inch3, unit),
                )?;
                row(out, "Watertight", if model.watertight { "Yes" } else { "No" })?;
                writeln!(out)?;

                title(
                    out,
                    &format!("Mass Estimates for All Materials ({infill_percent:.0}% infill)"),
                )?;
                writeln!(
                    out,
                    "{}",
                    format!(
                        "{:>4}  {:<20} {:>16} {:>14} {:>14}",
                        "ID", "Material Name", "Density (g/cm³)", "Mass (g)", "Solid (g)"
                    )
                    .magenta()
                    .bold()
                )?;
                for m in mass_estimates {
                    writeln!(
                        out,
                        "{:>4}  {:<20} {:>16.3} {:>14.3} {:>14.3}",
                        m.id, m.name, m.density_g_cm3, m.mass_g, m.solid_mass_g
                    )?;
                }
            }
            Self::Volume {
                bounding_box_cm,
                volume_cm3,
                volume_inch3,
                infill_percent,
                material,
                ..
            } => {
                title(out, "Volume & Mass Calculation")?;
                row(out, "Bounding Box (cm)", &format_bbox(bounding_box_cm))?;
                row(out, "Volume", &format_volume(*volume_cm3, *volume_inch3, unit))?;
                row(
                    out,
                    "Material",
                    &format!("{} (ID: {})", material.name, material.id),
                )?;
                row(out, "Infill", &format!("{infill_percent:.0}%"))?;
                row(out, "Mass", &format!("{:.3} g", material.mass_g))?;
            }
            Self::Area {
                bounding_box_cm,
                surface_area_cm2,
                ..
            } => {
                title(out, "Surface Area Calculation")?;
                row(out, "Bounding Box (cm)", &format_bbox(bounding_box_cm))?;
                row(out, "Surface Area", &format!("{surface_area_cm2:.4} cm²"))?;
            }
        }

        for warning in self.warnings() {
            writeln!(out, "{} {warning}", "Warning:".yellow().bold())?;
        }
        Ok(())
    }
}

fn file_info(path: &Path, model: &StlModel) -> FileInfo {
    let filename = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

    #[allow(clippy::cast_precision_loss)]
    // Precision: exact for any file below 2^53 bytes
    let file_size_kb = model.file_size as f64 / 1024.0;

    FileInfo {
        filename,
        file_size_kb,
        encoding: model.encoding.as_str(),
        skipped_facets: model.skipped_facets,
    }
}

fn collect_warnings(model: &StlModel, props: &MeshProperties) -> Vec<String> {
    let mut warnings = Vec::new();
    if model.skipped_facets > 0 {
        warnings.push(format!(
            "{} malformed ASCII facet(s) were skipped",
            model.skipped_facets
        ));
    }
    warnings.extend(props.warnings.iter().map(ToString::to_string));
    warnings
}

fn title<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    writeln!(out, "{}", text.cyan().bold())
}

fn row<W: Write>(out: &mut W, label: &str, value: &str) -> io::Result<()> {
    writeln!(out, "  {:<20} {value}", label.dimmed())
}

fn format_bbox(bbox: &BoundingBox) -> String {
    format!(
        "W: {:.2}, D: {:.2}, H: {:.2}",
        bbox.width, bbox.depth, bbox.height
    )
}

fn format_volume(volume_cm3: f64, volume_inch3: f64, unit: Unit) -> String {
    match unit {
        Unit::Cm => format!("{volume_cm3:.4} cm³"),
        Unit::Inch => format!("{volume_inch3:.4} inch³"),
    }
}

/// `1234567` as `1,234,567`.
fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
