//! Question sets compiled into the binary.

use crate::models::Question;

use super::parser::parse_questions;

const BANK: &str = include_str!("../../assets/preguntas.txt");
const FALLBACK_TRUE_FALSE: &str = include_str!("../../assets/fallback_truefalse.json");
const FALLBACK_MULTIPLE_CHOICE: &str = include_str!("../../assets/fallback_multiplechoice.json");

/// Number of fallback questions quoted as style examples in generation prompts.
pub const SAMPLE_SIZE: usize = 5;

/// The default true/false bank, used when no bank file can be read.
pub fn bank() -> Vec<Question> {
    parse_questions(BANK)
}

pub fn fallback_true_false() -> Vec<Question> {
    parse_questions(FALLBACK_TRUE_FALSE)
}

pub fn fallback_multiple_choice() -> Vec<Question> {
    parse_questions(FALLBACK_MULTIPLE_CHOICE)
}

pub fn sample_questions() -> Vec<Question> {
    let mut samples = fallback_true_false();
    samples.truncate(SAMPLE_SIZE);
    samples
}
