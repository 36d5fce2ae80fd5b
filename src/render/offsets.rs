//! Randomized draw order for incremental strategies.
//!
//! Visiting columns (or scatter passes) in shuffled order makes a partially
//! rendered waveform look evenly sampled instead of sweeping left to right.

/// Source of uniformly distributed indices.
pub trait OffsetRng {
    /// Return an index in `0..bound`. `bound` is never zero.
    fn below(&mut self, bound: usize) -> usize;
}

impl OffsetRng for fastrand::Rng {
    fn below(&mut self, bound: usize) -> usize {
        self.usize(..bound)
    }
}

/// Generator that keeps offsets in ascending order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unshuffled;

impl OffsetRng for Unshuffled {
    fn below(&mut self, bound: usize) -> usize {
        bound - 1
    }
}

/// Return a permutation of `0..n` (Fisher–Yates).
pub fn random_offsets(n: usize, rng: &mut dyn OffsetRng) -> Vec<usize> {
    let mut offsets: Vec<usize> = (0..n).collect();
    for i in (1..n).rev() {
        let j = rng.below(i + 1);
        offsets.swap(i, j);
    }
    offsets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_a_permutation() {
        let mut rng = fastrand::Rng::with_seed(7);
        let mut offsets = random_offsets(257, &mut rng);
        offsets.sort_unstable();
        assert_eq!(offsets, (0..257).collect::<Vec<_>>());
    }

    #[test]
    fn same_seed_same_order() {
        let a = random_offsets(64, &mut fastrand::Rng::with_seed(42));
        let b = random_offsets(64, &mut fastrand::Rng::with_seed(42));
        assert_eq!(a, b);
    }

    #[test]
    fn unshuffled_is_identity() {
        assert_eq!(random_offsets(5, &mut Unshuffled), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn empty_and_single() {
        assert!(random_offsets(0, &mut Unshuffled).is_empty());
        assert_eq!(random_offsets(1, &mut fastrand::Rng::with_seed(1)), vec![0]);
    }
}
