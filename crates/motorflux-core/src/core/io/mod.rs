//! Reading population histograms and writing flux results.
//!
//! Histograms are produced by an external trajectory-analysis tool in one of two plain-text
//! layouts. Both are read through the [`traits::HistogramFile`] interface. [`layout`] knows
//! where each supported data set keeps its unbound and bound histograms; [`writer`] emits
//! per-bin profiles and per-dihedral summaries as CSV.

pub mod columns;
pub mod comma;
pub mod layout;
pub mod traits;
pub mod writer;
