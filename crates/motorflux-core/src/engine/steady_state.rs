use super::error::EngineError;
use super::transition::TransitionMatrix;
use nalgebra::{DMatrix, DVector};
use tracing::debug;

/// Stationary distribution over the `2n` states of a [`TransitionMatrix`].
#[derive(Debug, Clone, PartialEq)]
pub struct SteadyState {
    population: Vec<f64>,
    bins: usize,
}

impl SteadyState {
    /// Solves `π·T = π` with `Σπ = 1`.
    ///
    /// The balance equations `(Tᵀ − I)π = 0` are rank deficient by one, so the last of them is
    /// replaced by the normalization before the LU solve.
    pub fn solve(tm: &TransitionMatrix) -> Result<Self, EngineError> {
        let states = tm.states();
        let mut system = tm.probabilities().transpose() - DMatrix::<f64>::identity(states, states);
        system.row_mut(states - 1).fill(1.0);
        let mut rhs = DVector::<f64>::zeros(states);
        rhs[states - 1] = 1.0;

        let solution = system.lu().solve(&rhs).ok_or(EngineError::Singular)?;
        if solution.iter().any(|p| !p.is_finite()) {
            return Err(EngineError::NonFinite("steady state"));
        }
        let state = Self::from_population(solution.iter().copied().collect(), tm.bins())?;
        debug!(
            unbound = state.unbound().iter().sum::<f64>(),
            bound = state.bound().iter().sum::<f64>(),
            "Solved steady state."
        );
        Ok(state)
    }

    /// Wraps an arbitrary population over `2 * bins` states, taking magnitudes and normalizing.
    pub fn from_population(population: Vec<f64>, bins: usize) -> Result<Self, EngineError> {
        if population.len() != 2 * bins {
            return Err(EngineError::BinMismatch {
                unbound: bins,
                bound: population.len().saturating_sub(bins),
            });
        }
        let magnitudes: Vec<f64> = population.iter().map(|p| p.abs()).collect();
        let total: f64 = magnitudes.iter().sum();
        if !(total.is_finite() && total > 0.0) {
            return Err(EngineError::Singular);
        }
        Ok(Self {
            population: magnitudes.into_iter().map(|p| p / total).collect(),
            bins,
        })
    }

    pub fn values(&self) -> &[f64] {
        &self.population
    }

    pub fn unbound(&self) -> &[f64] {
        &self.population[..self.bins]
    }

    pub fn bound(&self) -> &[f64] {
        &self.population[self.bins..]
    }

    pub fn bins(&self) -> usize {
        self.bins
    }
}
