//! # Engine Module
//!
//! The stateful part of the flux calculation: everything between two energy surfaces and the
//! per-bin flux profile.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Data source, kinetic parameters, load and propagation
//!   settings, assembled through [`config::SimulationConfigBuilder`]
//! - **Transition Matrix** ([`transition`]) - Composition of the two-surface rate matrix and
//!   its scaling into a row-stochastic matrix with time step `dt`
//! - **Steady State** ([`steady_state`]) - Stationary distribution of the scaled matrix
//! - **Flux** ([`flux`]) - Net probability flux between neighbouring bins and between surfaces
//! - **Propagation** ([`propagation`]) - Repeated application of the transition matrix to an
//!   initial population
//! - **Progress Monitoring** ([`progress`]) - Phase and task events for front ends
//! - **Error Handling** ([`error`]) - Engine-level error type

pub mod config;
pub mod error;
pub mod flux;
pub mod progress;
pub mod propagation;
pub mod steady_state;
pub mod transition;
