//! Uniform random selection helpers for building study and quiz rounds.
//!
//! Every function takes the random source as an argument, so callers decide between an entropy-seeded
//! generator in the app and a fixed-seed generator in tests.
//!
//! # Example
//!
//! ```
//! use card_sampler::{pick_excluding, sample_distinct};
//! use rand::SeedableRng;
//!
//! let words = ["casa", "perro", "gato", "libro"];
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//!
//! let picked = pick_excluding(&words, &mut rng, |w| *w == "casa").unwrap();
//! assert_ne!(*picked, "casa");
//!
//! let others = sample_distinct(&words, 3, &mut rng, |w| *w == "casa");
//! assert_eq!(others.len(), 3);
//! ```

use rand::Rng;
use rand::seq::SliceRandom;

/// Pick one item uniformly at random from the items for which `exclude` returns false.
///
/// Returns `None` if every item is excluded (or there are no items).
pub fn pick_excluding<'a, T, R, F>(items: &'a [T], rng: &mut R, exclude: F) -> Option<&'a T>
where
    R: Rng + ?Sized,
    F: Fn(&T) -> bool,
{
    let candidates: Vec<&T> = items.iter().filter(|item| !exclude(item)).collect();
    candidates.choose(rng).copied()
}

/// Sample up to `count` distinct items (by position) uniformly, without replacement,
/// from the items for which `exclude` returns false. The result is in random order.
///
/// When fewer than `count` candidates exist, all of them are returned (shuffled).
pub fn sample_distinct<'a, T, R, F>(
    items: &'a [T],
    count: usize,
    rng: &mut R,
    exclude: F,
) -> Vec<&'a T>
where
    R: Rng + ?Sized,
    F: Fn(&T) -> bool,
{
    let candidates: Vec<&T> = items.iter().filter(|item| !exclude(item)).collect();
    candidates.choose_multiple(rng, count).copied().collect()
}

/// Shuffle `items` in place and hand them back.
pub fn shuffled<T, R>(mut items: Vec<T>, rng: &mut R) -> Vec<T>
where
    R: Rng + ?Sized,
{
    items.shuffle(rng);
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::{BTreeMap, BTreeSet};

    #[test]
    fn test_pick_never_returns_excluded() {
        let items = [1, 2, 3, 4, 5];
        for seed in 0..200 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let picked = pick_excluding(&items, &mut rng, |i| *i == 3).unwrap();
            assert_ne!(*picked, 3);
        }
    }

    #[test]
    fn test_pick_single_candidate_is_deterministic() {
        let items = [1, 2];
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            assert_eq!(pick_excluding(&items, &mut rng, |i| *i == 1), Some(&2));
        }
    }

    #[test]
    fn test_pick_empty_pool() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let items: [u32; 0] = [];
        assert_eq!(pick_excluding(&items, &mut rng, |_| false), None);
        assert_eq!(pick_excluding(&[1], &mut rng, |i| *i == 1), None);
    }

    #[test]
    fn test_pick_is_roughly_uniform() {
        let items = ["a", "b", "c", "d"];
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut counts: BTreeMap<&str, u32> = BTreeMap::new();

        let draws = 9000;
        for _ in 0..draws {
            let picked = pick_excluding(&items, &mut rng, |s| *s == "d").unwrap();
            *counts.entry(*picked).or_default() += 1;
        }

        assert_eq!(counts.len(), 3);
        // Each of the 3 candidates should get about a third of the draws (within 10%)
        for (item, count) in counts {
            assert!(
                (2700..=3300).contains(&count),
                "{item} was picked {count} times out of {draws}"
            );
        }
    }

    #[test]
    fn test_sample_distinct_caps_at_pool_size() {
        let items = [10, 20, 30];
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let sampled = sample_distinct(&items, 5, &mut rng, |i| *i == 10);
        let unique: BTreeSet<_> = sampled.iter().copied().collect();
        assert_eq!(sampled.len(), 2);
        assert_eq!(unique, BTreeSet::from([&20, &30]));
    }

    #[test]
    fn test_sample_distinct_has_no_repeats() {
        let items: Vec<u32> = (0..20).collect();
        for seed in 0..100 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let sampled = sample_distinct(&items, 3, &mut rng, |i| *i == 0);
            let unique: BTreeSet<_> = sampled.iter().collect();
            assert_eq!(sampled.len(), 3);
            assert_eq!(unique.len(), 3);
            assert!(!sampled.contains(&&0));
        }
    }

    #[test]
    fn test_shuffled_keeps_items() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut result = shuffled(vec![1, 2, 3, 4], &mut rng);
        result.sort();
        assert_eq!(result, vec![1, 2, 3, 4]);
    }
}
