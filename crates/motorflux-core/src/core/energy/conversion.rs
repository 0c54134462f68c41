use super::smoothing::gaussian_filter;
use crate::core::models::histogram::Histogram;
use crate::core::models::surface::EnergySurface;

const SMOOTHING_SIGMA: f64 = 1.0;

/// Converts a population histogram into a free-energy surface, `E = −kT ln p`.
///
/// The histogram is smoothed first, then any bin left at exactly zero takes the smallest
/// non-zero smoothed value so the logarithm stays finite.
pub fn population_to_energy(histogram: &Histogram, kt: f64) -> EnergySurface {
    let mut smoothed = gaussian_filter(histogram.values(), SMOOTHING_SIGMA);

    let floor = smoothed
        .iter()
        .copied()
        .filter(|&v| v != 0.0)
        .fold(f64::INFINITY, f64::min);
    for value in smoothed.iter_mut() {
        if *value == 0.0 {
            *value = floor;
        }
    }

    let total: f64 = smoothed.iter().sum();
    EnergySurface::new(smoothed.iter().map(|p| -kt * (p / total).ln()).collect())
}

/// Normalized equilibrium density `exp(−E/kT) / Z` of a single surface.
pub fn boltzmann(surface: &EnergySurface, kt: f64) -> Vec<f64> {
    // Shifting by the minimum keeps the exponentials in range; it cancels in the ratio.
    let min = surface.values().iter().copied().fold(f64::INFINITY, f64::min);
    let weights: Vec<f64> = surface
        .values()
        .iter()
        .map(|e| (-(e - min) / kt).exp())
        .collect();
    let z: f64 = weights.iter().sum();
    weights.into_iter().map(|w| w / z).collect()
}
