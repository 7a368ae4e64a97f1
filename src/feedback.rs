//! Scoring answered questions and building section feedback.

use std::fmt::Write;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::llm::{prompts, GeminiClient};
use crate::models::{Question, TRUE_ANSWER};

const NO_ANSWER: &str = "Sin respuesta";

/// Correct answers out of a total, with a rounded percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
    pub percentage: u32,
}

impl Score {
    pub fn new(correct: usize, total: usize) -> Self {
        let percentage = if total > 0 {
            ((correct as f64 / total as f64) * 100.0).round() as u32
        } else {
            0
        };
        Self {
            correct,
            total,
            percentage,
        }
    }
}

/// One question next to the answer that was given for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerReview {
    pub question: String,
    pub user_answer: String,
    pub correct_answer: Option<String>,
    pub is_correct: bool,
    pub explanation: String,
    pub options: Vec<String>,
}

/// Case-insensitive match against the expected answer.
///
/// A question without an expected answer can never be answered correctly.
pub fn is_correct(question: &Question, answer: Option<&str>) -> bool {
    match (answer, question.correct_answer.as_deref()) {
        (Some(given), Some(expected)) => given.to_lowercase() == expected.to_lowercase(),
        _ => false,
    }
}

pub fn score(questions: &[Question], answers: &[Option<String>]) -> Score {
    let correct = questions
        .iter()
        .enumerate()
        .filter(|(i, question)| is_correct(question, answer_at(answers, *i)))
        .count();
    Score::new(correct, questions.len())
}

pub fn review(questions: &[Question], answers: &[Option<String>]) -> Vec<AnswerReview> {
    questions
        .iter()
        .enumerate()
        .map(|(i, question)| {
            let answer = answer_at(answers, i);
            AnswerReview {
                question: question.text.clone(),
                user_answer: answer.unwrap_or(NO_ANSWER).to_string(),
                correct_answer: question.correct_answer.clone(),
                is_correct: is_correct(question, answer),
                explanation: question.explanation.clone().unwrap_or_default(),
                options: question.options.clone().unwrap_or_default(),
            }
        })
        .collect()
}

fn answer_at(answers: &[Option<String>], index: usize) -> Option<&str> {
    answers.get(index).and_then(|a| a.as_deref())
}

/// Feedback for one section: LLM prose when available, local HTML otherwise.
pub async fn section_feedback(
    llm: Option<&GeminiClient>,
    questions: &[Question],
    answers: &[Option<String>],
) -> String {
    let Some(client) = llm else {
        return render_local_feedback(questions, answers);
    };

    let prompt = prompts::feedback_prompt(&score(questions, answers), &review(questions, answers));
    match client.generate(&prompt, None).await {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => {
            info!("Empty feedback from the LLM, using local feedback");
            render_local_feedback(questions, answers)
        }
        Err(e) => {
            warn!("Feedback generation failed: {}", e);
            render_local_feedback(questions, answers)
        }
    }
}

fn tier_message(percentage: u32) -> &'static str {
    match percentage {
        80.. => "¡Excelente trabajo! Tienes una sólida comprensión de estos conceptos de IA.",
        60..=79 => {
            "¡Buen trabajo! Tienes un conocimiento decente de estos conceptos, pero hay margen para mejorar."
        }
        _ => "Podrías querer revisar estos conceptos más a fondo antes de continuar.",
    }
}

fn true_false_label(answer: Option<&str>) -> &'static str {
    if answer == Some(TRUE_ANSWER) {
        "Verdadero"
    } else {
        "Falso"
    }
}

/// Render the section summary as an HTML fragment.
pub fn render_local_feedback(questions: &[Question], answers: &[Option<String>]) -> String {
    let score = score(questions, answers);
    let mut html = String::new();

    let _ = write!(
        html,
        "<h3>Retroalimentación de la Sección</h3>\n\
         <p>Has respondido {} de {} preguntas correctamente ({}%).</p>\n\
         <p>{}</p>\n\
         <h4>Revisión de Preguntas:</h4>\n",
        score.correct,
        score.total,
        score.percentage,
        tier_message(score.percentage)
    );

    for (i, (question, review)) in questions.iter().zip(review(questions, answers)).enumerate() {
        let status = if review.is_correct { "correct" } else { "incorrect" };
        let _ = writeln!(html, "<div class=\"question-feedback {}\">", status);
        let _ = writeln!(
            html,
            "<p class=\"question\">Pregunta {}: {}</p>",
            i + 1,
            escape_html(&question.text)
        );

        let expected = question.correct_answer.as_deref();
        let shown_answer = match &question.options {
            Some(options) => {
                html.push_str("<p>Opciones:</p>\n<ul>\n");
                for option in options {
                    let mark = if Some(option.as_str()) == expected {
                        " ✓"
                    } else if option.to_lowercase() == review.user_answer.to_lowercase() {
                        " ✗"
                    } else {
                        ""
                    };
                    let _ = writeln!(html, "<li>{}{}</li>", escape_html(option), mark);
                }
                html.push_str("</ul>\n");
                expected.unwrap_or("").to_string()
            }
            None => {
                let _ = writeln!(
                    html,
                    "<p>Tu respuesta: <span class=\"{}\">{}</span></p>",
                    status,
                    escape_html(&review.user_answer)
                );
                let _ = writeln!(
                    html,
                    "<p>Respuesta correcta: <span class=\"correct\">{}</span></p>",
                    true_false_label(expected)
                );
                true_false_label(expected).to_string()
            }
        };

        html.push_str("<div class=\"explanation\">\n<p>Explicación:</p>\n");
        let _ = writeln!(
            html,
            "<p>La respuesta correcta es \"{}\". {}</p>",
            escape_html(&shown_answer),
            escape_html(&review.explanation)
        );
        if !review.is_correct {
            html.push_str(
                "<p><strong>Sugerencia para mejorar:</strong> Revisa cuidadosamente los conceptos \
                 relacionados con esta pregunta.",
            );
            if !review.explanation.is_empty() {
                html.push_str(
                    " La explicación proporcionada puede ayudarte a entender mejor este tema.",
                );
            }
            html.push_str("</p>\n");
        }
        html.push_str("</div>\n</div>\n");
    }

    html
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
