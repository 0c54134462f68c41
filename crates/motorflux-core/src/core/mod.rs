//! # Core Module
//!
//! The stateless foundation of motorflux.
//!
//! - **Data Models** ([`models`]) - Population histograms, periodic energy surfaces and the
//!   linear load applied across a full rotation
//! - **Energy Conversion** ([`energy`]) - Gaussian smoothing, population to free energy and
//!   Boltzmann densities
//! - **Kinetics** ([`kinetics`]) - Nearest-neighbour intrasurface rates and the
//!   binding/catalysis rates that couple the two surfaces
//! - **File I/O** ([`io`]) - Histogram readers for the supported data set layouts and CSV
//!   writers for results

pub mod energy;
pub mod io;
pub mod kinetics;
pub mod models;
