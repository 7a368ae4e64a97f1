//! Deterministic randomness for question selection.
//!
//! Every draw comes from an explicit generator value owned by the caller, so
//! two runs with the same seed pick and order the same questions.

mod lcg;
mod shuffle;

pub use lcg::{RandomSource, SeededRandom};
pub use shuffle::shuffle;
