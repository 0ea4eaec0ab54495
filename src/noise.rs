use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generates reproducible uniform noise scaled to the data.
///
/// Each sample is `fraction * max|data| * u` with `u` drawn from `[0, 1)`.
/// The same `seed` always produces the same noise. A NaN datum makes the
/// maximum, and so every noise sample, NaN.
#[must_use]
pub fn uniform_noise(data: &[f64], fraction: f64, seed: u64) -> Vec<f64> {
    let amplitude = fraction * max_abs(data);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    data.iter()
        .map(|_| amplitude * rng.gen::<f64>())
        .collect()
}

fn max_abs(data: &[f64]) -> f64 {
    data.iter().fold(0.0f64, |acc, v| {
        if acc.is_nan() || v.is_nan() {
            f64::NAN
        } else {
            acc.max(v.abs())
        }
    })
}

/// Adds [`uniform_noise`] to `data`.
#[must_use]
pub fn with_noise(data: &[f64], fraction: f64, seed: u64) -> Vec<f64> {
    data.iter()
        .zip(uniform_noise(data, fraction, seed))
        .map(|(d, n)| d + n)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_by_fraction_of_max_anomaly() {
        let data = [0.5, -2.0, 1.0, 0.0];
        let noise = uniform_noise(&data, 0.01, 737);
        assert_eq!(noise.len(), 4);
        assert!(noise.iter().all(|&n| (0.0..0.02).contains(&n)));
    }

    #[test]
    fn same_seed_same_noise() {
        let data = [1.0; 16];
        assert_eq!(uniform_noise(&data, 0.01, 737), uniform_noise(&data, 0.01, 737));
        assert_ne!(uniform_noise(&data, 0.01, 737), uniform_noise(&data, 0.01, 738));
    }

    #[test]
    fn empty_and_zero_data() {
        assert!(uniform_noise(&[], 0.01, 1).is_empty());
        assert!(uniform_noise(&[0.0; 3], 0.01, 1).iter().all(|&n| n == 0.0));
    }

    #[test]
    fn nan_datum_poisons_the_amplitude() {
        let noise = uniform_noise(&[1.0, f64::NAN, -3.0], 0.01, 737);
        assert_eq!(noise.len(), 3);
        assert!(noise.iter().all(|n| n.is_nan()));
    }

    #[test]
    fn noisy_data_stays_close() {
        let data = [3.0, -1.0];
        let noisy = with_noise(&data, 0.01, 737);
        assert!((noisy[0] - 3.0).abs() < 0.03);
        assert!((noisy[1] + 1.0).abs() < 0.03);
    }
}
