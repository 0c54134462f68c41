const TRUNCATE: f64 = 4.0;

/// One-dimensional Gaussian smoothing with reflecting boundaries.
///
/// The kernel is truncated at `4σ` (radius `⌊4σ + 0.5⌋`) and normalized to unit weight. Samples
/// outside the data are mirrored about the edge, `(d c b a | a b c d | d c b a)`, so the
/// total population is preserved.
pub fn gaussian_filter(values: &[f64], sigma: f64) -> Vec<f64> {
    let n = values.len();
    if n == 0 || sigma <= 0.0 {
        return values.to_vec();
    }

    let weights = gaussian_kernel(sigma);
    let radius = (weights.len() / 2) as isize;

    (0..n as isize)
        .map(|i| {
            weights
                .iter()
                .enumerate()
                .map(|(k, w)| w * values[reflect(i + k as isize - radius, n)])
                .sum()
        })
        .collect()
}

fn gaussian_kernel(sigma: f64) -> Vec<f64> {
    let radius = (TRUNCATE * sigma + 0.5) as isize;
    let raw: Vec<f64> = (-radius..=radius)
        .map(|x| (-0.5 * (x as f64 / sigma).powi(2)).exp())
        .collect();
    let total: f64 = raw.iter().sum();
    raw.into_iter().map(|w| w / total).collect()
}

#[inline]
fn reflect(index: isize, len: usize) -> usize {
    let period = 2 * len as isize;
    let folded = index.rem_euclid(period) as usize;
    if folded < len {
        folded
    } else {
        2 * len - 1 - folded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn reflect_mirrors_about_half_sample_edges() {
        assert_eq!(reflect(-1, 4), 0);
        assert_eq!(reflect(-2, 4), 1);
        assert_eq!(reflect(4, 4), 3);
        assert_eq!(reflect(5, 4), 2);
        assert_eq!(reflect(8, 4), 0);
        assert_eq!(reflect(2, 4), 2);
    }

    #[test]
    fn kernel_has_radius_four_for_unit_sigma_and_sums_to_one() {
        let kernel = gaussian_kernel(1.0);
        assert_eq!(kernel.len(), 9);
        assert!(f64_approx_equal(kernel.iter().sum::<f64>(), 1.0));
        assert!(f64_approx_equal(kernel[0], kernel[8]));
        assert!(kernel[4] > kernel[3]);
    }

    #[test]
    fn constant_signal_is_unchanged() {
        let smoothed = gaussian_filter(&[2.5; 7], 1.0);
        for value in smoothed {
            assert!(f64_approx_equal(value, 2.5));
        }
    }

    #[test]
    fn smoothing_preserves_total_population() {
        let values = [0.0, 10.0, 0.0, 0.0, 3.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 7.0];
        let smoothed = gaussian_filter(&values, 1.0);
        let before: f64 = values.iter().sum();
        let after: f64 = smoothed.iter().sum();
        assert!((before - after).abs() < 1e-9);
    }

    #[test]
    fn spike_spreads_symmetrically() {
        let mut values = vec![0.0; 21];
        values[10] = 1.0;
        let smoothed = gaussian_filter(&values, 1.0);
        let kernel = gaussian_kernel(1.0);
        for offset in 0..=4 {
            assert!(f64_approx_equal(smoothed[10 + offset], kernel[4 + offset]));
            assert!(f64_approx_equal(smoothed[10 - offset], kernel[4 - offset]));
        }
        assert_eq!(smoothed[0], 0.0);
    }

    #[test]
    fn empty_input_returns_empty_output() {
        assert!(gaussian_filter(&[], 1.0).is_empty());
    }
}
