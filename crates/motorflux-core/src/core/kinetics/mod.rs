//! Rate constants of the two-surface kinetic model.
//!
//! Each surface is a ring of bins connected to its nearest neighbours by diffusive hops
//! ([`rates::intrasurface_rates`]). Bin `i` of the unbound surface is additionally connected to
//! bin `i` of the bound surface by substrate binding and by release or catalysis
//! ([`rates::intersurface_rates`]).

pub mod rates;

pub use rates::{
    IntersurfaceParams, IntersurfaceRates, intersurface_rates, intrasurface_prefactor,
    intrasurface_rates,
};
