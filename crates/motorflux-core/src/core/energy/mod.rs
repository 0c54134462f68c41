//! Conversion of sampled populations into free-energy surfaces.
//!
//! Histograms coming out of MD are noisy and often contain empty bins. They are smoothed with
//! a unit-width Gaussian, empty bins are filled with the smallest populated value, and the
//! normalized result is turned into `−kT ln p`.

pub mod conversion;
pub mod smoothing;

pub use conversion::{boltzmann, population_to_energy};
pub use smoothing::gaussian_filter;
