use super::error::EngineError;
use crate::core::kinetics::IntersurfaceRates;
use nalgebra::DMatrix;
use tracing::{debug, warn};

/// Row-stochastic transition matrix over the `2n` states of the two coupled surfaces.
///
/// States `0..n` are the unbound bins and `n..2n` the bound bins. Entry `(i, j)` is the
/// probability of moving from `i` to `j` within one time step `dt`.
#[derive(Debug, Clone)]
pub struct TransitionMatrix {
    probabilities: DMatrix<f64>,
    dt: f64,
    bins: usize,
}

/// Lays the four rate blocks out in one `2n × 2n` matrix with a zero diagonal.
pub fn compose_rates(
    unbound: &DMatrix<f64>,
    bound: &DMatrix<f64>,
    intersurface: &IntersurfaceRates,
) -> Result<DMatrix<f64>, EngineError> {
    let n = unbound.nrows();
    if bound.nrows() != n {
        return Err(EngineError::BinMismatch {
            unbound: n,
            bound: bound.nrows(),
        });
    }
    if intersurface.binding.len() != n || intersurface.release.len() != n {
        return Err(EngineError::BinMismatch {
            unbound: n,
            bound: intersurface.release.len(),
        });
    }

    let mut rates = DMatrix::zeros(2 * n, 2 * n);
    rates.view_mut((0, 0), (n, n)).copy_from(unbound);
    rates.view_mut((n, n), (n, n)).copy_from(bound);
    for i in 0..n {
        rates[(i, i + n)] = intersurface.binding[i];
        rates[(i + n, i)] = intersurface.release[i];
    }
    Ok(rates)
}

impl TransitionMatrix {
    /// Composes the rate blocks and scales them into probabilities.
    pub fn compose(
        unbound: &DMatrix<f64>,
        bound: &DMatrix<f64>,
        intersurface: &IntersurfaceRates,
    ) -> Result<Self, EngineError> {
        let rates = compose_rates(unbound, bound, intersurface)?;
        Self::from_rates(rates)
    }

    /// Scales a rate matrix by the largest power of ten that keeps every row below one.
    ///
    /// `dt = 10^−(m+1)` with `m = trunc(log10(max row sum))`. The diagonal of the rate matrix is
    /// ignored and replaced by the probability of staying put.
    pub fn from_rates(mut rates: DMatrix<f64>) -> Result<Self, EngineError> {
        let states = rates.nrows();
        if states % 2 != 0 || rates.ncols() != states {
            return Err(EngineError::BinMismatch {
                unbound: states / 2,
                bound: states - states / 2,
            });
        }
        if rates.iter().any(|r| !r.is_finite()) {
            return Err(EngineError::NonFinite("rate matrix"));
        }
        for i in 0..states {
            rates[(i, i)] = 0.0;
        }

        let max_row_sum = rates
            .row_iter()
            .map(|row| row.sum())
            .fold(f64::NEG_INFINITY, f64::max);
        if !(max_row_sum.is_finite() && max_row_sum > 0.0) {
            return Err(EngineError::NonFinite("rate matrix row sums"));
        }
        let exponent = max_row_sum.log10().trunc() as i32;
        let dt = 10f64.powi(-(exponent + 1));

        let mut probabilities = rates * dt;
        let mut overflowing = 0;
        for i in 0..states {
            let row_sum = probabilities.row(i).sum();
            if row_sum > 1.0 {
                overflowing += 1;
            }
            probabilities[(i, i)] = 1.0 - row_sum;
        }
        if overflowing > 0 {
            warn!(
                rows = overflowing,
                "Row sums unexpectedly greater than 1 after scaling."
            );
        }
        debug!(dt, max_row_sum, states, "Scaled transition matrix.");

        Ok(Self {
            probabilities,
            dt,
            bins: states / 2,
        })
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn probabilities(&self) -> &DMatrix<f64> {
        &self.probabilities
    }

    /// Rate in s⁻¹ from state `from` to state `to`; only meaningful off the diagonal.
    #[inline]
    pub fn rate(&self, from: usize, to: usize) -> f64 {
        self.probabilities[(from, to)] / self.dt
    }

    /// Bins per surface.
    pub fn bins(&self) -> usize {
        self.bins
    }

    pub fn states(&self) -> usize {
        2 * self.bins
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::kinetics::{IntersurfaceParams, intersurface_rates, intrasurface_rates};
    use crate::core::models::surface::{EnergySurface, LoadFunction};

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    fn example_matrix() -> TransitionMatrix {
        let unbound = EnergySurface::new(vec![0.0, 0.5, 1.0, 0.3]);
        let bound = EnergySurface::new(vec![-1.0, -0.2, 0.4, -0.5]);
        let params = IntersurfaceParams {
            prefactor: 1e6,
            offset: 0.0,
            catalytic_rate: 100.0,
            substrate_concentration: 2e-3,
        };
        let load = LoadFunction::none();
        let u = intrasurface_rates(&unbound, 1e5, 0.6, &load);
        let b = intrasurface_rates(&bound, 1e5, 0.6, &load);
        let ub = intersurface_rates(&unbound, &bound, &params, 0.6);
        TransitionMatrix::compose(&u, &b, &ub).unwrap()
    }

    #[test]
    fn compose_places_blocks_and_intersurface_rates() {
        let u = DMatrix::from_element(3, 3, 1.0);
        let b = DMatrix::from_element(3, 3, 2.0);
        let ub = IntersurfaceRates {
            binding: vec![3.0; 3],
            release: vec![4.0, 5.0, 6.0],
        };
        let rates = compose_rates(&u, &b, &ub).unwrap();
        assert_eq!(rates.nrows(), 6);
        assert_eq!(rates[(0, 1)], 1.0);
        assert_eq!(rates[(4, 5)], 2.0);
        assert_eq!(rates[(1, 4)], 3.0);
        assert_eq!(rates[(5, 2)], 6.0);
        assert_eq!(rates[(0, 4)], 0.0);
        assert_eq!(rates[(3, 1)], 0.0);
    }

    #[test]
    fn compose_rejects_mismatched_blocks() {
        let u = DMatrix::zeros(3, 3);
        let b = DMatrix::zeros(4, 4);
        let ub = IntersurfaceRates {
            binding: vec![0.0; 3],
            release: vec![0.0; 3],
        };
        assert!(matches!(
            compose_rates(&u, &b, &ub),
            Err(EngineError::BinMismatch { unbound: 3, bound: 4 })
        ));
    }

    #[test]
    fn dt_truncates_exponent_of_largest_row_sum() {
        let mut rates = DMatrix::zeros(4, 4);
        rates[(0, 1)] = 450.0;
        rates[(1, 0)] = 20.0;
        let tm = TransitionMatrix::from_rates(rates).unwrap();
        assert!(f64_approx_equal(tm.dt(), 1e-3));
        assert!(f64_approx_equal(tm.probabilities()[(0, 1)], 0.45));
        assert!(f64_approx_equal(tm.probabilities()[(0, 0)], 0.55));
    }

    #[test]
    fn dt_for_sub_unit_rates_truncates_toward_zero() {
        let mut rates = DMatrix::zeros(2, 2);
        rates[(0, 1)] = 0.05;
        let tm = TransitionMatrix::from_rates(rates).unwrap();
        // log10(0.05) = -1.3 truncates to -1, so dt = 10^0.
        assert!(f64_approx_equal(tm.dt(), 1.0));
        assert!(f64_approx_equal(tm.probabilities()[(0, 0)], 0.95));
    }

    #[test]
    fn scaled_matrix_is_row_stochastic() {
        let tm = example_matrix();
        assert_eq!(tm.bins(), 4);
        assert_eq!(tm.states(), 8);
        for row in tm.probabilities().row_iter() {
            assert!(f64_approx_equal(row.sum(), 1.0));
            assert!(row.iter().all(|&p| (0.0..=1.0).contains(&p)));
        }
    }

    #[test]
    fn rate_recovers_unscaled_values() {
        let tm = example_matrix();
        assert!(f64_approx_equal(tm.rate(0, 4), 1e6 * 2e-3));
        let release = 1e6 * (-(0.0 - -1.0) / 0.6f64).exp() + 100.0;
        assert!(f64_approx_equal(tm.rate(4, 0), release));
    }

    #[test]
    fn non_finite_rates_are_rejected() {
        let mut rates = DMatrix::zeros(2, 2);
        rates[(0, 1)] = f64::INFINITY;
        assert!(matches!(
            TransitionMatrix::from_rates(rates),
            Err(EngineError::NonFinite(_))
        ));
        assert!(matches!(
            TransitionMatrix::from_rates(DMatrix::zeros(2, 2)),
            Err(EngineError::NonFinite(_))
        ));
    }
}
