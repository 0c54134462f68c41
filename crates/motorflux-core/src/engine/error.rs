use super::config::ConfigError;
use crate::core::io::traits::HistogramIoError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read histogram '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: HistogramIoError,
    },

    #[error("Unbound surface has {unbound} bins but bound surface has {bound}")]
    BinMismatch { unbound: usize, bound: usize },

    #[error("At least 3 bins are required, got {bins}")]
    TooFewBins { bins: usize },

    #[error("Transition matrix has no unique steady state")]
    Singular,

    #[error("Non-finite values encountered in {0}")]
    NonFinite(&'static str),

    #[error("Failed to list dihedrals in '{path}': {source}", path = path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
