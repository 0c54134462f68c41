use super::transition::TransitionMatrix;
use nalgebra::DVector;
use tracing::debug;

/// Width, in bins, of the initial Gaussian population.
const INITIAL_SIGMA: f64 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Propagation {
    /// Population after the last step.
    pub population: Vec<f64>,
    /// Mean squared displacement in deg² from bin `n/2`, before the first step and after each.
    pub msd: Vec<f64>,
    /// Centre of mass in state index units, before the first step and after each.
    pub center_of_mass: Vec<f64>,
}

impl Propagation {
    pub fn iterations(&self) -> usize {
        self.msd.len().saturating_sub(1)
    }
}

/// Normalized Gaussian over the `2n` states centred on bin `n/2`.
pub fn initial_population(bins: usize) -> Vec<f64> {
    let mu = bins as f64 / 2.0;
    let weights: Vec<f64> = (0..2 * bins)
        .map(|x| (-(x as f64 - mu).powi(2) / (2.0 * INITIAL_SIGMA * INITIAL_SIGMA)).exp())
        .collect();
    let total: f64 = weights.iter().sum();
    weights.into_iter().map(|w| w / total).collect()
}

fn mean_squared_displacement(population: &DVector<f64>, bins: usize) -> f64 {
    let mu = bins as f64 / 2.0;
    let width = 360.0 / bins as f64;
    population
        .iter()
        .enumerate()
        .map(|(x, p)| p * ((x as f64 - mu) * width).powi(2))
        .sum()
}

fn center_of_mass(population: &DVector<f64>) -> f64 {
    let total = population.sum();
    if total == 0.0 {
        return 0.0;
    }
    population
        .iter()
        .enumerate()
        .map(|(x, p)| x as f64 * p)
        .sum::<f64>()
        / total
}

/// Applies `p ← p·T` to the initial population `iterations` times.
pub fn propagate(tm: &TransitionMatrix, iterations: usize) -> Propagation {
    let bins = tm.bins();
    let mut population = DVector::from_vec(initial_population(bins));
    let mut msd = Vec::with_capacity(iterations + 1);
    let mut com = Vec::with_capacity(iterations + 1);
    msd.push(mean_squared_displacement(&population, bins));
    com.push(center_of_mass(&population));

    for step in 0..iterations {
        population = tm.probabilities().tr_mul(&population);
        msd.push(mean_squared_displacement(&population, bins));
        com.push(center_of_mass(&population));
        debug!(step = step + 1, msd = msd[step + 1], "Propagated population.");
    }

    Propagation {
        population: population.iter().copied().collect(),
        msd,
        center_of_mass: com,
    }
}
