use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum HistogramError {
    #[error("Histogram has no bins")]
    Empty,
    #[error("Invalid population {value} in bin {bin}")]
    InvalidValue { bin: usize, value: f64 },
    #[error("Histogram is zero in every bin")]
    AllZero,
}

/// Equilibrium population histogram of a dihedral angle.
///
/// Values are raw counts or probabilities; only their relative size matters. Every value is
/// finite and non-negative, and at least one bin is populated.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    counts: Vec<f64>,
}

impl Histogram {
    pub fn new(counts: Vec<f64>) -> Result<Self, HistogramError> {
        if counts.is_empty() {
            return Err(HistogramError::Empty);
        }
        if let Some((bin, &value)) = counts
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(HistogramError::InvalidValue { bin, value });
        }
        if counts.iter().all(|&v| v == 0.0) {
            return Err(HistogramError::AllZero);
        }
        Ok(Self { counts })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.counts
    }

    pub fn total(&self) -> f64 {
        self.counts.iter().sum()
    }

    /// Populations normalized to unit sum.
    pub fn normalized(&self) -> Vec<f64> {
        let total = self.total();
        self.counts.iter().map(|c| c / total).collect()
    }
}
