//! Built-in material densities.

use std::io::{self, Write};

use owo_colors::OwoColorize;
use serde::Serialize;

/// A printable material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Material {
    /// Stable identifier used on the command line.
    pub id: u8,
    /// Display name.
    pub name: &'static str,
    /// Density in g/cm³.
    pub density_g_cm3: f64,
}

const fn material(id: u8, name: &'static str, density_g_cm3: f64) -> Material {
    Material {
        id,
        name,
        density_g_cm3,
    }
}

/// Material used when none is requested (PLA).
pub const DEFAULT_MATERIAL_ID: u8 = 1;

/// Every known material, ordered from most to least common.
pub static MATERIALS: [Material; 21] = [
    material(1, "PLA", 1.25),
    material(2, "PETG", 1.27),
    material(3, "ABS", 1.02),
    material(4, "Resin", 1.2),
    material(5, "TPU (Rubber-like)", 1.2),
    material(6, "Polyamide_SLS", 0.95),
    material(7, "Polyamide_MJF", 1.01),
    material(8, "Plexiglass", 1.18),
    material(9, "Alumide", 1.36),
    material(10, "Carbon Steel", 7.80),
    material(11, "Steel", 7.86),
    material(12, "Aluminum", 2.698),
    material(13, "Titanium", 4.41),
    material(14, "Brass", 8.6),
    material(15, "Bronze", 9.0),
    material(16, "Copper", 9.0),
    material(17, "Silver", 10.26),
    material(18, "Gold_14K", 13.6),
    material(19, "Gold_18K", 15.6),
    material(20, "3k CFRP", 1.79),
    material(21, "Red Oak", 5.70),
];

/// Look up a material by id.
#[must_use]
pub fn get(id: u8) -> Option<&'static Material> {
    MATERIALS.iter().find(|m| m.id == id)
}

/// Print the material table.
pub fn write_table<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "Available 3D Printing Materials".bold())?;
    writeln!(
        out,
        "{}",
        format!("{:>4}  {:<20} {:>16}", "ID", "Name", "Density (g/cm³)")
            .magenta()
            .bold()
    )?;
    for m in &MATERIALS {
        writeln!(out, "{:>4}  {:<20} {:>16.3}", m.id, m.name, m.density_g_cm3)?;
    }
    Ok(())
}

/// Print the material table as JSON.
pub fn write_json<W: Write>(out: &mut W) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, &MATERIALS)?;
    writeln!(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_one_through_twenty_one() {
        assert_eq!(MATERIALS.len(), 21);
        for (i, m) in MATERIALS.iter().enumerate() {
            assert_eq!(usize::from(m.id), i + 1, "{} is out of order", m.name);
        }
    }

    #[test]
    fn default_is_pla() {
        let pla = get(DEFAULT_MATERIAL_ID).unwrap();
        assert_eq!(pla.name, "PLA");
        assert_eq!(pla.density_g_cm3, 1.25);
    }

    #[test]
    fn lookup() {
        assert_eq!(get(12).unwrap().density_g_cm3, 2.698);
        assert_eq!(get(21).unwrap().name, "Red Oak");
        assert!(get(0).is_none());
        assert!(get(22).is_none());
    }

    #[test]
    fn densities_are_positive() {
        assert!(MATERIALS.iter().all(|m| m.density_g_cm3 > 0.0));
    }

    #[test]
    fn table_lists_every_material() {
        let mut out = Vec::new();
        write_table(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("TPU (Rubber-like)"));
        assert!(text.contains("10.260"));
        assert_eq!(text.lines().count(), 2 + MATERIALS.len());
    }

    #[test]
    fn json_round_trips_through_serde_json() {
        let mut out = Vec::new();
        write_json(&mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let list = value.as_array().unwrap();
        assert_eq!(list.len(), 21);
        assert_eq!(list[0]["name"], "PLA");
        assert_eq!(list[2]["density_g_cm3"], 1.02);
    }
}
