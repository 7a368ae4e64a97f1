use super::RandomSource;

/// In-place Fisher–Yates shuffle, scanning from the end.
///
/// Draws exactly `len - 1` values from `rng` (none for slices shorter than two).
pub fn shuffle<T, R: RandomSource + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = (rng.next_f64() * (i + 1) as f64).floor() as usize;
        items.swap(i, j.min(i));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SeededRandom;

    struct CountingSource {
        inner: SeededRandom,
        draws: usize,
    }

    impl RandomSource for CountingSource {
        fn next_f64(&mut self) -> f64 {
            self.draws += 1;
            self.inner.next_f64()
        }
    }

    #[test]
    fn test_is_permutation() {
        for len in 0..40 {
            let original: Vec<usize> = (0..len).collect();
            let mut shuffled = original.clone();
            shuffle(&mut shuffled, &mut SeededRandom::new(len as u64 * 31 + 7));

            let mut sorted = shuffled.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, original);
        }
    }

    #[test]
    fn test_draw_count() {
        for len in [0usize, 1, 2, 10] {
            let mut source = CountingSource {
                inner: SeededRandom::new(9),
                draws: 0,
            };
            let mut items: Vec<usize> = (0..len).collect();
            shuffle(&mut items, &mut source);
            assert_eq!(source.draws, len.saturating_sub(1));
        }
    }

    #[test]
    fn test_two_elements() {
        // Seed 42 draws 0.886 -> j = 1, no swap; seed 1 draws 0.251 -> j = 0, swap.
        let mut items = ['a', 'b'];
        shuffle(&mut items, &mut SeededRandom::new(42));
        assert_eq!(items, ['a', 'b']);

        let mut items = ['a', 'b'];
        shuffle(&mut items, &mut SeededRandom::new(1));
        assert_eq!(items, ['b', 'a']);
    }

    #[test]
    fn test_reproducible() {
        let mut a: Vec<u32> = (0..25).collect();
        let mut b = a.clone();
        shuffle(&mut a, &mut SeededRandom::new(1234));
        shuffle(&mut b, &mut SeededRandom::new(1234));
        assert_eq!(a, b);
    }
}
