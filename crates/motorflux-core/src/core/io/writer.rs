use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// One row of the per-bin flux profile of a dihedral.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinRecord {
    pub bin: usize,
    pub angle_degrees: f64,
    pub unbound_energy: f64,
    pub bound_energy: f64,
    pub unbound_population: f64,
    pub bound_population: f64,
    pub flux_unbound: f64,
    pub flux_bound: f64,
    pub flux_total: f64,
    pub flux_intersurface: f64,
}

/// One row per dihedral in a batch summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRecord {
    pub name: String,
    pub bins: usize,
    pub dt: f64,
    pub intrasurface_flux: f64,
    pub peak_flux: f64,
    pub intersurface_flux: f64,
    pub power: Option<f64>,
}

/// Writes `records` as CSV with a header row taken from the field names.
pub fn write_records<T: Serialize>(
    records: &[T],
    writer: impl Write,
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_records_to_path<T: Serialize>(
    records: &[T],
    path: &Path,
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_path(path)?;
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}
