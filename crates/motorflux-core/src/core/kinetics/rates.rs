use crate::core::models::surface::{EnergySurface, LoadFunction};
use nalgebra::DMatrix;
use serde::Serialize;

/// Parameters of the binding/catalysis step that couples the two surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IntersurfaceParams {
    /// Intersurface prefactor `C`, per molar per second.
    pub prefactor: f64,
    /// Free energy subtracted from the bound surface, kcal/mol.
    pub offset: f64,
    /// Catalytic rate `k_cat`, per second.
    pub catalytic_rate: f64,
    /// Substrate concentration `[S]`, molar.
    pub substrate_concentration: f64,
}

/// Per-bin rates between the surfaces, in s⁻¹.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersurfaceRates {
    /// Unbound → bound.
    pub binding: Vec<f64>,
    /// Bound → unbound, release plus catalysis.
    pub release: Vec<f64>,
}

/// Diffusive hop prefactor `D / Δθ²` for a ring of `bins` bins, with `D` in deg²/s.
#[inline]
pub fn intrasurface_prefactor(diffusion: f64, bins: usize) -> f64 {
    let width = 360.0 / bins as f64;
    diffusion / (width * width)
}

/// Nearest-neighbour rate matrix on one periodic surface.
///
/// `k(i→j) = A · exp(−(E(j) − E(i)) / 2kT)` for `j = i ± 1`, where energies are taken at
/// unwrapped positions with the load added. The left neighbour of bin 0 sits at position −1 and
/// the right neighbour of bin `n−1` at position `n`, so a load tilts the boundary hops just like
/// the interior ones. The diagonal is left at zero.
pub fn intrasurface_rates(
    surface: &EnergySurface,
    prefactor: f64,
    kt: f64,
    load: &LoadFunction,
) -> DMatrix<f64> {
    let n = surface.bins();
    let mut rates = DMatrix::zeros(n, n);
    let hop = |from: isize, to: isize| {
        let delta = surface.loaded_energy(to, load) - surface.loaded_energy(from, load);
        prefactor * (-delta / (2.0 * kt)).exp()
    };

    for i in 0..n as isize {
        let forward = surface.wrap(i + 1);
        let backward = surface.wrap(i - 1);
        rates[(i as usize, forward)] = hop(i, i + 1);
        rates[(i as usize, backward)] = hop(i, i - 1);
    }
    rates
}

/// Binding and release rates between bin `i` of the unbound and bound surfaces.
///
/// Binding is `C·[S]` everywhere; release is `C·exp(−(U(i) − B(i)) / kT) + k_cat`.
pub fn intersurface_rates(
    unbound: &EnergySurface,
    bound: &EnergySurface,
    params: &IntersurfaceParams,
    kt: f64,
) -> IntersurfaceRates {
    let binding = vec![params.prefactor * params.substrate_concentration; unbound.bins()];
    let release = unbound
        .values()
        .iter()
        .zip(bound.values())
        .map(|(u, b)| params.prefactor * (-(u - b) / kt).exp() + params.catalytic_rate)
        .collect();
    IntersurfaceRates { binding, release }
}
