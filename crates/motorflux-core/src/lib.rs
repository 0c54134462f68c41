//! # motorflux Core Library
//!
//! Computes the directional (intrasurface) and intersurface probability flux of a single
//! protein dihedral from two equilibrium population histograms, one sampled without substrate
//! (unbound) and one with substrate (bound).
//!
//! ## Architectural Philosophy
//!
//! The library keeps the same three-layer split throughout:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Histogram`, `EnergySurface`),
//!   pure numerical kernels (smoothing, energy conversion, rate construction) and the
//!   histogram file readers and result writers.
//!
//! - **[`engine`]: The Logic Core.** Configuration, errors, the scaled transition matrix,
//!   the steady-state solver, flux evaluation and population propagation.
//!
//! - **[`workflows`]: The Public API.** `simulate` runs the whole pipeline for one dihedral,
//!   `batch` fans it out over many dihedrals of a data set.

pub mod core;
pub mod engine;
pub mod workflows;
