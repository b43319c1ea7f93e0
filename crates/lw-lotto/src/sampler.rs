//! Drawing distinct numbers without replacement.

use rand::RngExt;

use crate::LottoError;

/// Draw `count` distinct numbers from `1..=max`, in draw order.
///
/// Uses rejection sampling: a uniform draw that repeats an earlier value is
/// discarded and drawn again. Cheap while `count` is small relative to `max`,
/// which holds for lottery fields such as 5 of 50.
///
/// # Errors
///
/// Returns [`LottoError::InvalidRange`] if `count > max`.
pub fn sample<R: RngExt>(rng: &mut R, count: usize, max: u32) -> Result<Vec<u32>, LottoError> {
    if !u32::try_from(count).is_ok_and(|c| c <= max) {
        return Err(LottoError::InvalidRange { count, max });
    }

    let mut drawn = Vec::with_capacity(count);
    while drawn.len() < count {
        let n = rng.random_range(1..=max);
        if !drawn.contains(&n) {
            drawn.push(n);
        }
    }
    Ok(drawn)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn seeded() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn assert_valid_draw(draw: &[u32], count: usize, max: u32) {
        assert_eq!(draw.len(), count);
        assert!(draw.iter().all(|n| (1..=max).contains(n)), "{draw:?}");
        let mut sorted = draw.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), count, "duplicates in {draw:?}");
    }

    #[test]
    fn test_sample_lottery_fields() {
        let mut rng = seeded();

        for _ in 0..200 {
            assert_valid_draw(&sample(&mut rng, 5, 50).unwrap(), 5, 50);
            assert_valid_draw(&sample(&mut rng, 2, 10).unwrap(), 2, 10);
        }
    }

    #[test]
    fn test_sample_full_range_is_permutation() {
        let mut rng = seeded();

        let mut draw = sample(&mut rng, 10, 10).unwrap();
        draw.sort_unstable();

        assert_eq!(draw, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_sample_zero_count_is_empty() {
        let mut rng = seeded();

        assert!(sample(&mut rng, 0, 50).unwrap().is_empty());
        assert!(sample(&mut rng, 0, 0).unwrap().is_empty());
    }

    #[test]
    fn test_sample_count_above_max_fails() {
        let mut rng = seeded();

        assert_eq!(
            sample(&mut rng, 6, 5),
            Err(LottoError::InvalidRange { count: 6, max: 5 })
        );
        assert_eq!(
            sample(&mut rng, 1, 0),
            Err(LottoError::InvalidRange { count: 1, max: 0 })
        );
    }

    #[test]
    fn test_sample_is_reproducible_with_same_seed() {
        let first = sample(&mut seeded(), 5, 50).unwrap();
        let second = sample(&mut seeded(), 5, 50).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_sample_keeps_draw_order() {
        // With a range this large, a sorted 20-value draw is vanishingly unlikely.
        let draw = sample(&mut seeded(), 20, 1_000_000).unwrap();
        let mut sorted = draw.clone();
        sorted.sort_unstable();

        assert_ne!(draw, sorted);
    }
}
