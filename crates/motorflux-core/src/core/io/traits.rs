use crate::core::models::histogram::{Histogram, HistogramError};
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistogramIoError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid number on line {line}: '{value}'")]
    Parse { line: usize, value: String },
    #[error("Line {line} has no column {column}")]
    MissingColumn { line: usize, column: usize },
    #[error("Invalid histogram: {0}")]
    Invalid(#[from] HistogramError),
}

/// Defines the interface for reading per-bin values of a dihedral from a text format.
///
/// Implementors only parse the raw column of values; validation as a [`Histogram`] and the
/// path-based helpers are shared.
pub trait HistogramFile {
    /// The error type for read operations.
    type Error: Error + From<io::Error> + From<HistogramError>;

    /// Reads the raw per-bin values from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if a record cannot be parsed.
    fn read_values(reader: &mut impl BufRead) -> Result<Vec<f64>, Self::Error>;

    /// Reads a population histogram from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or the values are not a valid [`Histogram`].
    fn read_from(reader: &mut impl BufRead) -> Result<Histogram, Self::Error> {
        let values = Self::read_values(reader)?;
        Ok(Histogram::new(values)?)
    }

    /// Reads a population histogram from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Histogram, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Reads raw per-bin values, such as precomputed energies, from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_values_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<f64>, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_values(&mut reader)
    }
}

pub(crate) fn parse_value(field: &str, line: usize) -> Result<f64, HistogramIoError> {
    field.trim().parse().map_err(|_| HistogramIoError::Parse {
        line,
        value: field.to_string(),
    })
}
