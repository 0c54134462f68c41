//! # Workflows Module
//!
//! Top-level entry points that run the whole flux pipeline for one dihedral or many.
//!
//! ## Architecture
//!
//! - **Simulation Workflow** ([`simulate`]) - Loads the unbound and bound inputs, builds both
//!   energy surfaces, composes and scales the transition matrix, solves the steady state and
//!   computes the flux, optionally propagating an initial population as well.
//! - **Batch Workflow** ([`batch`]) - Runs the simulation for a list of dihedrals sharing one
//!   configuration, in parallel when the `parallel` feature is enabled, and collects their
//!   summaries.
//!
//! Both report progress through [`crate::engine::progress::ProgressReporter`] and return
//! [`crate::engine::error::EngineError`] for anything that stops a single simulation.

pub mod batch;
pub mod simulate;
