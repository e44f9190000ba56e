#![forbid(unsafe_code)]

//! Random input arrays.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Length used when nothing else is configured.
pub const DEFAULT_ARRAY_LEN: usize = 30;

/// `n` independent uniform values in `[0, 1)` from the thread RNG.
#[must_use]
pub fn generate_array(n: usize) -> Vec<f64> {
    generate_array_with(&mut rand::rng(), n)
}

/// `n` independent uniform values in `[0, 1)` drawn from `rng`.
pub fn generate_array_with<R: Rng>(rng: &mut R, n: usize) -> Vec<f64> {
    (0..n).map(|_| rng.random::<f64>()).collect()
}

/// Reproducible RNG for `--seed` style runs.
#[must_use]
pub fn seeded_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// Whether `values` is in non-decreasing order.
#[must_use]
pub fn is_sorted<T: PartialOrd>(values: &[T]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1])
}
