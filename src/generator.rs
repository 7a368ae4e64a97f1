//! LLM-backed question generation with an offline fallback.

use log::{info, warn};

use crate::data::builtin;
use crate::format::conform;
use crate::llm::{prompts, GeminiClient};
use crate::models::{Question, QuestionCount, QuestionFormat};
use crate::random::{shuffle, RandomSource, SeededRandom};

/// Questions generated when the caller asks for "all".
pub const AI_DEFAULT_COUNT: usize = 10;
/// Upper bound on the questions a single request may generate.
pub const AI_MAX_COUNT: usize = 50;

/// Produce `count` questions in `format`.
///
/// The LLM is asked first when a client is configured. Anything it fails to
/// deliver is made up from the built-in fallback set, so this never returns
/// fewer questions than requested, up to [`AI_MAX_COUNT`].
pub async fn generate_questions(
    llm: Option<&GeminiClient>,
    count: QuestionCount,
    format: QuestionFormat,
    seed: u64,
) -> Vec<Question> {
    let wanted = match count {
        QuestionCount::All => AI_DEFAULT_COUNT,
        QuestionCount::Limit(n) if n > AI_MAX_COUNT => {
            warn!("Requested {} questions, generating {}", n, AI_MAX_COUNT);
            AI_MAX_COUNT
        }
        QuestionCount::Limit(n) => n,
    };
    let mut rng = SeededRandom::new(seed);

    let generated = match llm {
        Some(client) => request_questions(client, wanted, format, seed).await,
        None => Vec::new(),
    };

    let generated = if generated.is_empty() {
        info!("Using {} fallback questions ({})", wanted, format);
        fallback_questions(wanted, format, &mut rng)
    } else {
        info!("LLM produced {} questions", generated.len());
        generated
    };

    finalize(generated, wanted, format, &mut rng)
}

async fn request_questions(
    client: &GeminiClient,
    count: usize,
    format: QuestionFormat,
    seed: u64,
) -> Vec<Question> {
    let prompt = prompts::question_prompt(count, format, &builtin::sample_questions(), seed);

    match client.generate(&prompt, Some(seed)).await {
        Ok(reply) => {
            let questions = prompts::extract_questions(&reply);
            if questions.is_empty() {
                warn!("No questions found in the LLM reply");
            }
            questions
        }
        Err(e) => {
            warn!("Question generation failed: {}", e);
            Vec::new()
        }
    }
}

/// Built-in questions in `format`, shuffled and cycled to `count`.
///
/// Each copy gets a random variant number so repeated questions stay
/// distinguishable.
pub fn fallback_questions<R: RandomSource + ?Sized>(
    count: usize,
    format: QuestionFormat,
    rng: &mut R,
) -> Vec<Question> {
    let mut pool = match format {
        QuestionFormat::TrueFalse => builtin::fallback_true_false(),
        QuestionFormat::MultipleChoice => builtin::fallback_multiple_choice(),
    };
    if pool.is_empty() {
        return Vec::new();
    }
    shuffle(&mut pool, rng);

    (0..count)
        .map(|i| {
            let base = &pool[i % pool.len()];
            let variant = (rng.next_f64() * 1000.0).floor() as u32;
            Question {
                id: None,
                text: format!("{} (Variante {})", base.text, variant),
                explanation: base
                    .explanation
                    .as_ref()
                    .map(|e| format!("{} Esta es la variante {}.", e, variant)),
                ..base.clone()
            }
        })
        .collect()
}

/// Pad or truncate to `count`, number from 1 and coerce to `format`.
pub fn finalize<R: RandomSource + ?Sized>(
    mut questions: Vec<Question>,
    count: usize,
    format: QuestionFormat,
    rng: &mut R,
) -> Vec<Question> {
    if questions.len() < count {
        let missing = count - questions.len();
        questions.extend(fallback_questions(missing, format, rng));
    }
    questions.truncate(count);

    questions
        .into_iter()
        .zip(1..)
        .map(|(question, id)| conform(question.with_id(id), format, rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::stub;

    #[test]
    fn test_fallback_cycles_with_variants() {
        let mut rng = SeededRandom::new(10);
        let questions = fallback_questions(20, QuestionFormat::TrueFalse, &mut rng);
        assert_eq!(questions.len(), 20);
        assert!(questions.iter().all(Question::is_true_false));
        assert!(questions.iter().all(|q| q.text.contains("(Variante ")));
        assert!(questions
            .iter()
            .all(|q| q.explanation.as_deref().is_some_and(|e| e.contains("Esta es la variante"))));

        // The 16th question reuses the first base question of the shuffled pool.
        let base = |q: &Question| q.text.split(" (Variante").next().unwrap().to_string();
        assert_eq!(base(&questions[0]), base(&questions[15]));
    }

    #[test]
    fn test_fallback_multiple_choice() {
        let questions = fallback_questions(3, QuestionFormat::MultipleChoice, &mut SeededRandom::new(1));
        assert_eq!(questions.len(), 3);
        assert!(questions.iter().all(Question::is_multiple_choice));
    }

    #[test]
    fn test_finalize_pads_and_numbers() {
        let llm_output = vec![Question::true_false("Generada", true)];
        let questions = finalize(llm_output, 4, QuestionFormat::TrueFalse, &mut SeededRandom::new(2));
        assert_eq!(questions.len(), 4);
        assert_eq!(questions[0].text, "Generada");
        let ids: Vec<_> = questions.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![Some(1), Some(2), Some(3), Some(4)]);
    }

    #[test]
    fn test_finalize_truncates_and_coerces() {
        let llm_output = vec![
            Question {
                id: Some(40),
                text: "¿Cuál es mejor?".to_string(),
                correct_answer: Some("B".to_string()),
                options: Some(vec!["a".into(), "b".into(), "c".into(), "d".into()]),
                explanation: None,
            },
            Question::true_false("Sobra", false),
        ];
        let questions = finalize(
            llm_output,
            1,
            QuestionFormat::MultipleChoice,
            &mut SeededRandom::new(2),
        );
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].id, Some(1));
        assert_eq!(questions[0].correct_answer.as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn test_generate_without_llm() {
        let questions = generate_questions(None, QuestionCount::All, QuestionFormat::TrueFalse, 99).await;
        assert_eq!(questions.len(), AI_DEFAULT_COUNT);
        assert!(questions.iter().all(Question::is_true_false));

        let again = generate_questions(None, QuestionCount::All, QuestionFormat::TrueFalse, 99).await;
        assert_eq!(questions, again);

        let five = generate_questions(None, QuestionCount::Limit(5), QuestionFormat::MultipleChoice, 1).await;
        assert_eq!(five.len(), 5);
        assert!(five.iter().all(Question::is_multiple_choice));
    }

    #[tokio::test]
    async fn test_generate_zero() {
        let none = generate_questions(None, QuestionCount::Limit(0), QuestionFormat::TrueFalse, 1).await;
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_generate_caps_requested_count() {
        let questions =
            generate_questions(None, QuestionCount::Limit(2_000_000_000), QuestionFormat::TrueFalse, 1)
                .await;
        assert_eq!(questions.len(), AI_MAX_COUNT);
        assert_eq!(questions.last().and_then(|q| q.id), Some(AI_MAX_COUNT as u32));
    }

    #[tokio::test]
    async fn test_generate_uses_llm_reply() {
        let reply = "Aquí tienes:\n```json\n[\n  {\"text\": \"Generada uno\", \"correctAnswer\": \"V\", \"explanation\": \"Cierto.\"},\n  {\"text\": \"Generada dos\", \"correctAnswer\": \"Falso\"}\n]\n```";
        let (base_url, request) = stub::serve_once(200, stub::reply_body(reply)).await;
        let client = stub::client(base_url);

        let questions =
            generate_questions(Some(&client), QuestionCount::Limit(3), QuestionFormat::TrueFalse, 4)
                .await;

        assert_eq!(questions.len(), 3);
        assert_eq!(questions[0].text, "Generada uno");
        assert_eq!(questions[0].correct_answer.as_deref(), Some("V"));
        assert_eq!(questions[1].text, "Generada dos");
        assert_eq!(questions[1].correct_answer.as_deref(), Some("F"));
        assert!(questions[2].text.contains("(Variante "));
        assert!(questions.iter().all(Question::is_true_false));
        let ids: Vec<_> = questions.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![Some(1), Some(2), Some(3)]);

        assert!(request.await.unwrap().contains("Genera 3 preguntas de verdadero/falso"));
    }

    #[tokio::test]
    async fn test_generate_falls_back_on_llm_error() {
        let (base_url, _request) = stub::serve_once(500, "{}".to_string()).await;
        let client = stub::client(base_url);

        let questions =
            generate_questions(Some(&client), QuestionCount::Limit(2), QuestionFormat::MultipleChoice, 8)
                .await;
        assert_eq!(questions.len(), 2);
        assert!(questions.iter().all(|q| q.text.contains("(Variante ")));
        assert!(questions.iter().all(Question::is_multiple_choice));
    }
}
