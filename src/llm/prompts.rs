//! Prompt construction for question generation and section feedback.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

use crate::data::parse_json_array;
use crate::feedback::{AnswerReview, Score};
use crate::models::{Question, QuestionFormat};

static JSON_ARRAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[\s*\{.*\}\s*\]").expect("Invalid regex"));

/// Ask for `count` new questions in `format`, styled after `samples`.
pub fn question_prompt(
    count: usize,
    format: QuestionFormat,
    samples: &[Question],
    seed: u64,
) -> String {
    let mut prompt = String::new();
    let kind = match format {
        QuestionFormat::TrueFalse => "verdadero/falso",
        QuestionFormat::MultipleChoice => "opción múltiple",
    };

    let _ = writeln!(
        prompt,
        "Genera {} preguntas de {} sobre conceptos de inteligencia artificial.",
        count, kind
    );
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "Aquí hay algunos ejemplos de preguntas para basar tu estilo:");
    for sample in samples {
        let _ = writeln!(
            prompt,
            "- {} ({})",
            sample.text,
            sample.correct_answer.as_deref().unwrap_or("?")
        );
    }
    let _ = writeln!(prompt);

    match format {
        QuestionFormat::MultipleChoice => {
            prompt.push_str(
                "IMPORTANTE: DEBES generar preguntas de opción múltiple con EXACTAMENTE 4 opciones \
                 para cada pregunta.\n\
                 Cada pregunta debe tener un campo \"options\" que sea un array con 4 opciones.\n\
                 El campo \"correctAnswer\" debe ser el texto completo de una de estas opciones, \
                 exactamente como aparece en el array (no una letra).\n",
            );
        }
        QuestionFormat::TrueFalse => {
            prompt.push_str(
                "Las preguntas deben ser de verdadero/falso, donde la respuesta correcta es \"V\" \
                 para verdadero o \"F\" para falso.\n",
            );
        }
    }

    let fields = match format {
        QuestionFormat::MultipleChoice => "\"text\", \"correctAnswer\", \"options\" y \"explanation\"",
        QuestionFormat::TrueFalse => "\"text\", \"correctAnswer\" y \"explanation\"",
    };
    let _ = writeln!(prompt);
    let _ = writeln!(
        prompt,
        "Para cada pregunta, proporciona el texto, la respuesta correcta y una breve explicación \
         en español de por qué la respuesta es correcta."
    );
    let _ = writeln!(
        prompt,
        "Formatea tu respuesta como un array JSON con objetos que contengan los campos {}.",
        fields
    );
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "IMPORTANTE:");
    let _ = writeln!(
        prompt,
        "- Todas las preguntas, respuestas y explicaciones DEBEN estar en español."
    );
    let _ = writeln!(
        prompt,
        "- Usa la semilla aleatoria {} para generar variabilidad en las preguntas.",
        seed
    );
    let _ = writeln!(
        prompt,
        "- Asegúrate de que las preguntas sean variadas y cubran diferentes aspectos de la IA."
    );

    prompt
}

/// Ask for HTML feedback on one answered section.
pub fn feedback_prompt(score: &Score, reviews: &[AnswerReview]) -> String {
    let mut prompt = String::new();

    let _ = writeln!(
        prompt,
        "Acabo de completar una sección de quiz sobre conceptos de inteligencia artificial."
    );
    let _ = writeln!(
        prompt,
        "Obtuve {} de {} preguntas correctas ({}%).",
        score.correct, score.total, score.percentage
    );
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "Aquí están las preguntas y mis respuestas:");

    for (i, review) in reviews.iter().enumerate() {
        let correct = review.correct_answer.as_deref().unwrap_or("");
        let _ = writeln!(prompt);
        let _ = writeln!(prompt, "Pregunta {}: {}", i + 1, review.question);
        if !review.options.is_empty() {
            let _ = writeln!(prompt, "Opciones:");
            for option in &review.options {
                let mark = if option == correct { " (CORRECTA)" } else { "" };
                let _ = writeln!(prompt, "- {}{}", option, mark);
            }
        }
        let _ = writeln!(prompt, "Mi respuesta: {}", review.user_answer);
        let _ = writeln!(prompt, "Respuesta correcta: {}", correct);
        let _ = writeln!(
            prompt,
            "Resultado: {}",
            if review.is_correct { "Correcta" } else { "Incorrecta" }
        );
        if !review.explanation.is_empty() {
            let _ = writeln!(prompt, "Explicación: {}", review.explanation);
        }
    }

    prompt.push_str(
        "\nPor favor, proporciona:\n\
         1. Una breve evaluación de mi desempeño general\n\
         2. Retroalimentación DETALLADA para CADA pregunta, especialmente las que respondí incorrectamente\n\
         3. Para cada pregunta, explica POR QUÉ la respuesta correcta es correcta y POR QUÉ las otras opciones son incorrectas (si aplica)\n\
         4. IMPORTANTE: Menciona EXPLÍCITAMENTE cuál es la alternativa correcta en cada explicación\n\
         5. Sugerencias específicas para mejorar mi comprensión de estos conceptos\n\
         \n\
         Formatea tu respuesta como HTML que se pueda insertar directamente en una página web. \
         Usa etiquetas <h3>, <p>, <ul>, <li>, <div>, <strong> y otras etiquetas HTML según sea necesario.\n\
         \n\
         IMPORTANTE:\n\
         - Toda la retroalimentación DEBE estar en español.\n\
         - Incluye una sección para CADA pregunta con su retroalimentación específica.\n\
         - Usa <div class=\"question-feedback\"> para envolver la retroalimentación de cada pregunta individual.\n",
    );

    prompt
}

/// Pull the first JSON array of objects out of an LLM reply.
///
/// Replies often wrap the array in prose or a fenced code block.
pub fn extract_questions(response: &str) -> Vec<Question> {
    JSON_ARRAY
        .find(response)
        .and_then(|m| parse_json_array(m.as_str()))
        .unwrap_or_default()
}
