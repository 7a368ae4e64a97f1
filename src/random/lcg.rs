/// A source of uniform floats in `[0, 1)`.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

/// Linear congruential generator with the classic 9301/49297/233280 constants.
///
/// Not suitable for anything security related. The constants are kept so a
/// given seed reproduces the same question order everywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRandom {
    state: u64,
}

impl SeededRandom {
    pub const MULTIPLIER: u64 = 9301;
    pub const INCREMENT: u64 = 49297;
    pub const MODULUS: u64 = 233280;

    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Current internal state (the last value produced, scaled by the modulus).
    pub fn state(&self) -> u64 {
        self.state
    }

    fn advance(&mut self) -> u64 {
        // Reducing first keeps the product far below u64::MAX for any seed.
        self.state = ((self.state % Self::MODULUS) * Self::MULTIPLIER + Self::INCREMENT)
            % Self::MODULUS;
        self.state
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        self.advance() as f64 / Self::MODULUS as f64
    }
}

/// The generator never runs out.
impl Iterator for SeededRandom {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_sequence() {
        let mut rng = SeededRandom::new(42);
        assert_eq!(rng.next_f64(), 206659.0 / 233280.0);
        assert_eq!(rng.state(), 206659);
        assert_eq!(rng.next_f64(), 190736.0 / 233280.0);
        assert_eq!(rng.state(), 190736);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let a: Vec<f64> = SeededRandom::new(1_700_000_000_000).take(50).collect();
        let b: Vec<f64> = SeededRandom::new(1_700_000_000_000).take(50).collect();
        assert_eq!(a, b);

        let c: Vec<f64> = SeededRandom::new(1_700_000_000_001).take(50).collect();
        assert_ne!(a, c);
    }

    #[test]
    fn test_values_in_unit_interval() {
        for seed in [0, 1, 42, 233_279, 233_280, u64::MAX] {
            for value in SeededRandom::new(seed).take(1000) {
                assert!((0.0..1.0).contains(&value), "seed {} produced {}", seed, value);
            }
        }
    }

    #[test]
    fn test_large_seed_matches_reduced_seed() {
        let big: Vec<f64> = SeededRandom::new(233_280 * 5 + 17).take(10).collect();
        let small: Vec<f64> = SeededRandom::new(17).take(10).collect();
        assert_eq!(big, small);
    }
}
