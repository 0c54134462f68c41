use super::columns::ColumnHistogramFile;
use super::comma::CommaHistogramFile;
use super::traits::{HistogramFile, HistogramIoError};
use crate::core::models::histogram::Histogram;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown {kind} '{value}'")]
pub struct UnknownNameError {
    pub kind: &'static str,
    pub value: String,
}

/// Origin of the unbound/bound histogram pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataSource {
    /// Protein kinase A, apo vs. ATP·Mg²⁺.
    Pka,
    /// Protein kinase A with the surfaces reversed and averaged.
    PkaReversed,
    /// Adenylate kinase, apo (4AKE) vs. Ap5A (3HPQ).
    Adk,
    /// HIV protease, apo (1HHP) vs. substrate (1KJF).
    Hiv,
    /// Histograms or energies supplied explicitly.
    Manual,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Pka => "pka",
            DataSource::PkaReversed => "pka-reversed",
            DataSource::Adk => "adk",
            DataSource::Hiv => "hiv",
            DataSource::Manual => "manual",
        }
    }

    /// Directory layout of this data set below the data root, if it has one.
    pub fn layout(&self) -> Option<SourceLayout> {
        match self {
            DataSource::Pka => Some(SourceLayout {
                directory: "pka-md-data",
                unbound_dir: "apo",
                bound_dir: "atpmg",
                unbound_suffix: "_chi_pop_hist_targ.txt",
                bound_suffix: "_chi_pop_hist_ref.txt",
                format: HistogramFormat::Comma,
            }),
            DataSource::PkaReversed => Some(SourceLayout {
                directory: "pka-md-reversed-and-averaged",
                unbound_dir: "apo",
                bound_dir: "atpmg",
                unbound_suffix: "_chi_pop_hist_targ.txt",
                bound_suffix: "_chi_pop_hist_ref.txt",
                format: HistogramFormat::Comma,
            }),
            DataSource::Adk => Some(SourceLayout {
                directory: "adenylate-kinase",
                unbound_dir: "AdKDihedHist_apo-4ake",
                bound_dir: "AdKDihedHist_ap5-3hpq",
                unbound_suffix: ".dat",
                bound_suffix: ".dat",
                format: HistogramFormat::Columns,
            }),
            DataSource::Hiv => Some(SourceLayout {
                directory: "hiv-protease",
                unbound_dir: "1hhp_apo",
                bound_dir: "1kjf_p1p6",
                unbound_suffix: ".dat",
                bound_suffix: ".dat",
                format: HistogramFormat::Columns,
            }),
            DataSource::Manual => None,
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataSource {
    type Err = UnknownNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pka" | "pka_md_data" | "pka-md-data" => Ok(DataSource::Pka),
            "pka-reversed" | "pka_reversed" => Ok(DataSource::PkaReversed),
            "adk" | "adk_md_data" | "adk-md-data" => Ok(DataSource::Adk),
            "hiv" | "hiv_md_data" | "hiv-md-data" => Ok(DataSource::Hiv),
            "manual" => Ok(DataSource::Manual),
            _ => Err(UnknownNameError {
                kind: "data source",
                value: s.to_string(),
            }),
        }
    }
}

/// Text format of a histogram file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HistogramFormat {
    /// See [`CommaHistogramFile`].
    Comma,
    /// See [`ColumnHistogramFile`].
    Columns,
}

impl HistogramFormat {
    pub fn read_path(&self, path: &Path) -> Result<Histogram, HistogramIoError> {
        match self {
            HistogramFormat::Comma => CommaHistogramFile::read_from_path(path),
            HistogramFormat::Columns => ColumnHistogramFile::read_from_path(path),
        }
    }

    pub fn read_values_path(&self, path: &Path) -> Result<Vec<f64>, HistogramIoError> {
        match self {
            HistogramFormat::Comma => CommaHistogramFile::read_values_from_path(path),
            HistogramFormat::Columns => ColumnHistogramFile::read_values_from_path(path),
        }
    }
}

impl FromStr for HistogramFormat {
    type Err = UnknownNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "comma" | "csv" => Ok(HistogramFormat::Comma),
            "columns" | "dat" | "whitespace" => Ok(HistogramFormat::Columns),
            _ => Err(UnknownNameError {
                kind: "histogram format",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLayout {
    pub directory: &'static str,
    pub unbound_dir: &'static str,
    pub bound_dir: &'static str,
    pub unbound_suffix: &'static str,
    pub bound_suffix: &'static str,
    pub format: HistogramFormat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistogramPaths {
    pub unbound: PathBuf,
    pub bound: PathBuf,
    pub format: HistogramFormat,
}

impl SourceLayout {
    pub fn paths(&self, root: &Path, name: &str) -> HistogramPaths {
        let base = root.join(self.directory);
        HistogramPaths {
            unbound: base
                .join(self.unbound_dir)
                .join(format!("{}{}", name, self.unbound_suffix)),
            bound: base
                .join(self.bound_dir)
                .join(format!("{}{}", name, self.bound_suffix)),
            format: self.format,
        }
    }

    /// Dihedral names that have both an unbound and a bound histogram below `root`.
    ///
    /// Names are returned sorted.
    pub fn discover_names(&self, root: &Path) -> io::Result<Vec<String>> {
        let unbound_dir = root.join(self.directory).join(self.unbound_dir);
        let mut names = Vec::new();
        for entry in fs::read_dir(&unbound_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let file_name = entry.file_name();
            let Some(name) = file_name
                .to_str()
                .and_then(|f| f.strip_suffix(self.unbound_suffix))
            else {
                continue;
            };
            if name.is_empty() || !self.paths(root, name).bound.is_file() {
                continue;
            }
            names.push(name.to_string());
        }
        names.sort();
        names.dedup();
        Ok(names)
    }
}
