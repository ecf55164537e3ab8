//! Random source used to pick reviewers.

use std::sync::{Mutex, PoisonError};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
pub trait RandomService: Send + Sync {
    /// Pick `amount` distinct indices in `0..len` (fewer if `len` is smaller).
    fn choose_indices(&self, len: usize, amount: usize) -> Vec<usize>;
}

/// Process-lifetime generator, seeded once.
pub struct SeededRandomService {
    rng: Mutex<ChaCha8Rng>,
}

impl SeededRandomService {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }
}

impl RandomService for SeededRandomService {
    fn choose_indices(&self, len: usize, amount: usize) -> Vec<usize> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rand::seq::index::sample(&mut *rng, len, amount.min(len)).into_vec()
    }
}
