use super::transition::TransitionMatrix;
use serde::Serialize;

/// Net probability flux of a population under a [`TransitionMatrix`], in cycles per second.
///
/// `unbound[i]` and `bound[i]` are the flux from bin `i` to bin `i + 1` (wrapping) on each
/// surface; `intersurface[i]` is the flux from unbound bin `i` to bound bin `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct FluxProfile {
    pub unbound: Vec<f64>,
    pub bound: Vec<f64>,
    pub intersurface: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FluxSummary {
    /// Mean of the summed per-bin flux on both surfaces.
    pub intrasurface: f64,
    /// Largest absolute per-bin flux on either surface.
    pub peak: f64,
    /// Mean unbound → bound flux.
    pub intersurface: f64,
    /// Load slope times the intrasurface flux, when a load is applied.
    pub power: Option<f64>,
}

impl FluxProfile {
    pub fn compute(population: &[f64], tm: &TransitionMatrix) -> Self {
        let n = tm.bins();
        let net = |from: usize, to: usize| {
            population[from] * tm.rate(from, to) - population[to] * tm.rate(to, from)
        };

        let mut unbound = Vec::with_capacity(n);
        let mut bound = Vec::with_capacity(n);
        let mut intersurface = Vec::with_capacity(n);
        for i in 0..n {
            let next = (i + 1) % n;
            unbound.push(net(i, next));
            bound.push(net(i + n, next + n));
            intersurface.push(net(i, i + n));
        }

        Self {
            unbound,
            bound,
            intersurface,
        }
    }

    pub fn bins(&self) -> usize {
        self.unbound.len()
    }

    /// Per-bin flux summed over both surfaces.
    pub fn total(&self) -> Vec<f64> {
        self.unbound
            .iter()
            .zip(&self.bound)
            .map(|(u, b)| u + b)
            .collect()
    }

    pub fn summarize(&self, load_slope: f64) -> FluxSummary {
        let intrasurface = mean(&self.total());
        let peak = self
            .unbound
            .iter()
            .chain(&self.bound)
            .map(|f| f.abs())
            .fold(0.0, f64::max);
        FluxSummary {
            intrasurface,
            peak,
            intersurface: mean(&self.intersurface),
            power: (load_slope != 0.0).then(|| load_slope * intrasurface),
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::kinetics::{IntersurfaceParams, intersurface_rates, intrasurface_rates};
    use crate::core::models::surface::{EnergySurface, LoadFunction};
    use crate::engine::steady_state::SteadyState;

    const KT: f64 = 0.6;

    fn steady_flux(
        unbound: &EnergySurface,
        bound: &EnergySurface,
        k_cat: f64,
        load: &LoadFunction,
    ) -> FluxProfile {
        let params = IntersurfaceParams {
            prefactor: 1e6,
            offset: 0.0,
            catalytic_rate: k_cat,
            substrate_concentration: 2e-3,
        };
        let u = intrasurface_rates(unbound, 1e4, KT, load);
        let b = intrasurface_rates(bound, 1e4, KT, load);
        let ub = intersurface_rates(unbound, bound, &params, KT);
        let tm = TransitionMatrix::compose(&u, &b, &ub).unwrap();
        let state = SteadyState::solve(&tm).unwrap();
        FluxProfile::compute(state.values(), &tm)
    }

    fn asymmetric_surfaces() -> (EnergySurface, EnergySurface) {
        (
            EnergySurface::new(vec![0.0, 1.0, 2.0, 1.5, 0.5, 0.2]),
            EnergySurface::new(vec![-0.5, -2.0, 0.5, 0.0, 1.0, -1.0]),
        )
    }

    #[test]
    fn detailed_balance_gives_zero_flux_without_catalysis() {
        let (unbound, bound) = asymmetric_surfaces();
        let flux = steady_flux(&unbound, &bound, 0.0, &LoadFunction::none());
        let summary = flux.summarize(0.0);
        // Individual hop terms are of order 1e3 s⁻¹; their differences must cancel.
        assert!(summary.intrasurface.abs() < 1e-3);
        assert!(summary.peak < 1e-3);
        assert!(summary.intersurface.abs() < 1e-3);
        assert!(summary.power.is_none());
    }

    #[test]
    fn steady_state_flux_is_conserved_at_every_bin() {
        let (unbound, bound) = asymmetric_surfaces();
        let flux = steady_flux(&unbound, &bound, 200.0, &LoadFunction::none());
        let n = flux.bins();
        let scale = flux.summarize(0.0).peak.max(1e-12);
        for i in 0..n {
            let prev = (i + n - 1) % n;
            let unbound_balance = flux.unbound[prev] - flux.unbound[i] - flux.intersurface[i];
            let bound_balance = flux.bound[prev] - flux.bound[i] + flux.intersurface[i];
            assert!(unbound_balance.abs() / scale < 1e-4);
            assert!(bound_balance.abs() / scale < 1e-4);
        }
    }

    #[test]
    fn catalysis_drives_circulation_with_no_net_transfer() {
        let (unbound, bound) = asymmetric_surfaces();
        let flux = steady_flux(&unbound, &bound, 200.0, &LoadFunction::none());
        let summary = flux.summarize(0.0);
        assert!(summary.peak > 1e-3);
        assert!(summary.intersurface.abs() / summary.peak < 1e-4);
        assert!(flux.intersurface.iter().any(|f| f.abs() / summary.peak > 1e-3));
    }

    #[test]
    fn positive_load_on_flat_surfaces_drives_negative_flux() {
        let flat = EnergySurface::new(vec![0.0; 6]);
        let load = LoadFunction::new(1.0);
        let flux = steady_flux(&flat, &flat, 0.0, &load);
        let summary = flux.summarize(load.slope);
        assert!(summary.intrasurface < 0.0);
        assert_eq!(summary.power, Some(load.slope * summary.intrasurface));
        assert!(summary.power.unwrap() < 0.0);
    }

    #[test]
    fn flux_is_conserved_at_preset_diffusion_scale() {
        use crate::core::kinetics::intrasurface_prefactor;
        use crate::engine::config::{DEFAULT_DIFFUSION, DataSource, intersurface_preset};
        use std::f64::consts::TAU;

        let n = 60;
        let phase = |i: usize| TAU * i as f64 / n as f64;
        let unbound = EnergySurface::new((0..n).map(|i| 2.0 * phase(i).cos()).collect());
        let params = intersurface_preset(DataSource::Pka).unwrap();
        let bound = EnergySurface::new((0..n).map(|i| 1.5 * (phase(i) + 1.0).sin()).collect())
            .shifted(params.offset);

        let prefactor = intrasurface_prefactor(DEFAULT_DIFFUSION, n);
        let load = LoadFunction::none();
        let u = intrasurface_rates(&unbound, prefactor, KT, &load);
        let b = intrasurface_rates(&bound, prefactor, KT, &load);
        let ub = intersurface_rates(&unbound, &bound, &params, KT);
        let tm = TransitionMatrix::compose(&u, &b, &ub).unwrap();
        assert!((tm.dt() - 1e-12).abs() < 1e-24);

        let state = SteadyState::solve(&tm).unwrap();
        let flux = FluxProfile::compute(state.values(), &tm);
        // Hop terms are ~1e9 per bin here, so the balance below relies on heavy cancellation.
        let peak = flux.summarize(0.0).peak;
        assert!(peak > 1.0);
        for i in 0..n {
            let prev = (i + n - 1) % n;
            let unbound_balance = flux.unbound[prev] - flux.unbound[i] - flux.intersurface[i];
            let bound_balance = flux.bound[prev] - flux.bound[i] + flux.intersurface[i];
            assert!(unbound_balance.abs() / peak < 1e-4);
            assert!(bound_balance.abs() / peak < 1e-4);
        }
    }

    #[test]
    fn total_sums_both_surfaces() {
        let flux = FluxProfile {
            unbound: vec![1.0, -2.0],
            bound: vec![0.5, 0.5],
            intersurface: vec![0.0, 1.0],
        };
        assert_eq!(flux.total(), vec![1.5, -1.5]);
        let summary = flux.summarize(2.0);
        assert_eq!(summary.intrasurface, 0.0);
        assert_eq!(summary.peak, 2.0);
        assert_eq!(summary.intersurface, 0.5);
        assert_eq!(summary.power, Some(0.0));
    }
}
