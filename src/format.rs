//! Coercion between true/false and multiple-choice questions.
//!
//! One rule applies everywhere: a multiple-choice `correct_answer` is the
//! literal text of the right option, never a letter.

use crate::models::{FALSE_ANSWER, NUM_OPTIONS, Question, QuestionFormat, TRUE_ANSWER};
use crate::random::{shuffle, RandomSource};

/// Options offered when a true/false statement is asked as multiple choice.
pub const TRUE_FALSE_OPTIONS: [&str; NUM_OPTIONS] = [
    "Verdadero, esta afirmación es correcta",
    "Falso, esta afirmación es incorrecta",
    "No se puede determinar con la información dada",
    "La afirmación es parcialmente correcta",
];

/// Filler options for a free-form answer that arrived without options.
pub const DISTRACTORS: [&str; 8] = [
    "Esta opción es incorrecta",
    "Esta opción también es incorrecta",
    "Ninguna de las anteriores es correcta",
    "Esta alternativa no es válida",
    "Esta respuesta es falsa",
    "Esta opción no es la correcta",
    "Esta alternativa es errónea",
    "Esta no es la respuesta correcta",
];

/// Bring `question` into `format`, leaving already conforming questions alone.
pub fn conform<R: RandomSource + ?Sized>(
    question: Question,
    format: QuestionFormat,
    rng: &mut R,
) -> Question {
    match format {
        QuestionFormat::MultipleChoice if !question.is_multiple_choice() => {
            to_multiple_choice(question, rng)
        }
        QuestionFormat::TrueFalse if !question.is_true_false() => to_true_false(question),
        _ => question,
    }
}

/// Convert to a four-option question whose answer is one of the options.
///
/// `rng` is only drawn from when a free-form answer has to be mixed in with
/// generic distractors.
pub fn to_multiple_choice<R: RandomSource + ?Sized>(question: Question, rng: &mut R) -> Question {
    if question.is_multiple_choice() {
        return question;
    }

    if let Some(answer) = lettered_option(&question) {
        return Question {
            correct_answer: Some(answer),
            ..question
        };
    }

    let (options, correct_answer) = match question.correct_answer.as_deref() {
        Some(TRUE_ANSWER) => (owned(&TRUE_FALSE_OPTIONS), Some(TRUE_FALSE_OPTIONS[0].to_string())),
        Some(FALSE_ANSWER) => (owned(&TRUE_FALSE_OPTIONS), Some(TRUE_FALSE_OPTIONS[1].to_string())),
        Some(answer) => (mix_with_distractors(answer, rng), Some(answer.to_string())),
        None => (owned(&TRUE_FALSE_OPTIONS), None),
    };

    Question {
        options: Some(options),
        correct_answer,
        ..question
    }
}

/// Convert to a true/false question, reading affirmative answers as "V".
pub fn to_true_false(question: Question) -> Question {
    let is_true = question.correct_answer.as_deref().is_some_and(is_affirmative);
    let answer = if is_true { TRUE_ANSWER } else { FALSE_ANSWER };

    Question {
        correct_answer: Some(answer.to_string()),
        options: None,
        ..question
    }
}

fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    matches!(answer.as_str(), "v" | "a" | "si" | "sí")
        || answer.contains("verdadero")
        || answer.contains("true")
}

/// Resolve a letter answer ("A".."D") against four existing options.
fn lettered_option(question: &Question) -> Option<String> {
    let options = question.options.as_ref().filter(|o| o.len() == NUM_OPTIONS)?;
    let answer = question.correct_answer.as_deref()?.trim();

    let mut chars = answer.chars();
    let letter = chars.next()?.to_ascii_uppercase();
    if chars.next().is_some() || !('A'..='D').contains(&letter) {
        return None;
    }

    options.get((letter as u8 - b'A') as usize).cloned()
}

fn mix_with_distractors<R: RandomSource + ?Sized>(answer: &str, rng: &mut R) -> Vec<String> {
    let mut distractors = DISTRACTORS;
    shuffle(&mut distractors, rng);

    let position = ((rng.next_f64() * NUM_OPTIONS as f64).floor() as usize).min(NUM_OPTIONS - 1);
    let mut options: Vec<String> = distractors[..NUM_OPTIONS - 1]
        .iter()
        .map(|d| d.to_string())
        .collect();
    options.insert(position, answer.to_string());
    options
}

fn owned(options: &[&str]) -> Vec<String> {
    options.iter().map(|o| o.to_string()).collect()
}
