//! # Core Models Module
//!
//! Data structures shared by every stage of the flux pipeline.
//!
//! ## Key Components
//!
//! - [`histogram`] - Equilibrium population histogram of one dihedral over periodic bins
//! - [`surface`] - Free-energy surface over the same bins, plus the linear [`surface::LoadFunction`]
//!   used to model an applied mechanical load
//!
//! Bins always span one full rotation (−π..π), so bin `n` is bin `0` again. Surfaces wrap;
//! the load does not.

pub mod histogram;
pub mod surface;
