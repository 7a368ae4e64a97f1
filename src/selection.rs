//! Picking the subset of a bank to present.

use crate::models::{Question, QuestionCount, QuestionOrder};
use crate::random::{shuffle, SeededRandom};

/// Choose `count` questions from `all` in the given order.
///
/// Random order samples without replacement using a generator seeded from
/// `seed`; sequential order takes the leading questions and ignores `seed`.
/// Counts larger than the bank are clamped.
pub fn select(
    all: &[Question],
    count: QuestionCount,
    order: QuestionOrder,
    seed: u64,
) -> Vec<Question> {
    let size = count.resolve(all.len());

    match order {
        QuestionOrder::Random => {
            let mut indices: Vec<usize> = (0..all.len()).collect();
            shuffle(&mut indices, &mut SeededRandom::new(seed));
            indices[..size].iter().map(|&i| all[i].clone()).collect()
        }
        QuestionOrder::Sequential => all[..size].to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank(n: u32) -> Vec<Question> {
        (1..=n)
            .map(|i| Question::true_false(format!("Q{}", i), i % 2 == 0).with_id(i))
            .collect()
    }

    #[test]
    fn test_size_invariant() {
        for len in 0..12 {
            let all = bank(len);
            for requested in 0..15 {
                for order in [QuestionOrder::Random, QuestionOrder::Sequential] {
                    let picked = select(&all, QuestionCount::Limit(requested), order, 99);
                    assert_eq!(picked.len(), requested.min(len as usize));
                }
            }
            assert_eq!(
                select(&all, QuestionCount::All, QuestionOrder::Random, 5).len(),
                len as usize
            );
        }
    }

    #[test]
    fn test_sequential_ignores_seed() {
        let all = bank(10);
        let a = select(&all, QuestionCount::Limit(4), QuestionOrder::Sequential, 1);
        let b = select(&all, QuestionCount::Limit(4), QuestionOrder::Sequential, 1_000_000);
        assert_eq!(a, all[..4].to_vec());
        assert_eq!(a, b);
    }

    #[test]
    fn test_clamped_sequential() {
        let all = bank(3);
        let picked = select(&all, QuestionCount::Limit(10), QuestionOrder::Sequential, 1);
        assert_eq!(picked, all);
    }

    #[test]
    fn test_random_reproducible_per_seed() {
        let all = bank(10);
        let first = select(&all, QuestionCount::Limit(5), QuestionOrder::Random, 42);
        let again = select(&all, QuestionCount::Limit(5), QuestionOrder::Random, 42);
        let other = select(&all, QuestionCount::Limit(5), QuestionOrder::Random, 43);
        assert_eq!(first, again);
        assert_ne!(first, other);
    }

    #[test]
    fn test_random_samples_without_replacement() {
        let all = bank(20);
        let picked = select(&all, QuestionCount::All, QuestionOrder::Random, 2024);
        let mut ids: Vec<u32> = picked.iter().filter_map(|q| q.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=20).collect::<Vec<_>>());
    }

    #[test]
    fn test_input_untouched() {
        let all = bank(6);
        let snapshot = all.clone();
        let _ = select(&all, QuestionCount::All, QuestionOrder::Random, 3);
        assert_eq!(all, snapshot);
    }
}
