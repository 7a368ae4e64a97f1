use std::fmt;
use std::ops::Range;

use crate::feedback::{self, Score};
use crate::models::Question;
use crate::protocol::AnswerResult;

/// Where a run currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Answering the questions of the current section.
    Answering,
    /// The current section was handed in and its feedback is being read.
    Reviewing,
    /// Every section has been handed in.
    Finished,
}

/// A request that does not fit the current state of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    /// The run is not in the state the request needs.
    WrongState { expected: RunState, actual: RunState },
    /// The question is not part of the section being answered.
    OutsideSection { index: usize, section: usize },
    /// Some questions of the section have no answer yet.
    Unanswered(Vec<usize>),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::WrongState { expected, actual } => {
                write!(f, "quiz is {:?}, expected {:?}", actual, expected)
            }
            RunError::OutsideSection { index, section } => {
                write!(f, "question {} is not in section {}", index, section + 1)
            }
            RunError::Unanswered(missing) => {
                let numbers: Vec<String> = missing.iter().map(|i| (i + 1).to_string()).collect();
                write!(
                    f,
                    "answer every question before submitting (missing: {})",
                    numbers.join(", ")
                )
            }
        }
    }
}

impl std::error::Error for RunError {}

/// Outcome of handing in a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionOutcome {
    /// More sections follow; feedback is due for the one just handed in.
    Feedback {
        section: usize,
        questions: Vec<Question>,
        answers: Vec<Option<String>>,
    },
    /// That was the last section.
    Finished,
}

/// One player's pass through a quiz, in sections of `per_section` questions.
pub struct QuizRun {
    state: RunState,
    questions: Vec<Question>,
    per_section: usize,
    current_section: usize,
    answers: Vec<Option<String>>,
}

impl QuizRun {
    pub fn new(questions: Vec<Question>, per_section: usize) -> Self {
        let num_questions = questions.len();

        Self {
            state: RunState::Answering,
            questions,
            per_section: per_section.max(1),
            current_section: 0,
            answers: vec![None; num_questions],
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &[Option<String>] {
        &self.answers
    }

    pub fn per_section(&self) -> usize {
        self.per_section
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn total_sections(&self) -> usize {
        self.questions.len().div_ceil(self.per_section)
    }

    pub fn current_section(&self) -> usize {
        self.current_section
    }

    /// Absolute question indices of the current section.
    pub fn section_range(&self) -> Range<usize> {
        let start = (self.current_section * self.per_section).min(self.questions.len());
        let end = (start + self.per_section).min(self.questions.len());
        start..end
    }

    pub fn current_section_questions(&self) -> &[Question] {
        &self.questions[self.section_range()]
    }

    /// Share of all questions answered so far, in percent.
    pub fn progress(&self) -> f64 {
        if self.questions.is_empty() {
            return 0.0;
        }
        let answered = self.answers.iter().filter(|a| a.is_some()).count();
        (answered as f64 / self.questions.len() as f64) * 100.0
    }

    /// Record (or replace) the answer to question `index`.
    pub fn record_answer(&mut self, index: usize, answer: String) -> Result<(), RunError> {
        self.expect_state(RunState::Answering)?;

        if !self.section_range().contains(&index) {
            return Err(RunError::OutsideSection {
                index,
                section: self.current_section,
            });
        }

        self.answers[index] = Some(answer);
        Ok(())
    }

    pub fn submit_section(&mut self) -> Result<SectionOutcome, RunError> {
        self.expect_state(RunState::Answering)?;

        let range = self.section_range();
        let missing: Vec<usize> = range.clone().filter(|&i| self.answers[i].is_none()).collect();
        if !missing.is_empty() {
            return Err(RunError::Unanswered(missing));
        }

        if self.current_section + 1 >= self.total_sections() {
            self.state = RunState::Finished;
            return Ok(SectionOutcome::Finished);
        }

        self.state = RunState::Reviewing;
        Ok(SectionOutcome::Feedback {
            section: self.current_section,
            questions: self.questions[range.clone()].to_vec(),
            answers: self.answers[range].to_vec(),
        })
    }

    pub fn next_section(&mut self) -> Result<(), RunError> {
        self.expect_state(RunState::Reviewing)?;
        self.current_section += 1;
        self.state = RunState::Answering;
        Ok(())
    }

    pub fn score(&self) -> Score {
        feedback::score(&self.questions, &self.answers)
    }

    pub fn results(&self) -> Vec<AnswerResult> {
        self.questions
            .iter()
            .zip(self.answers.iter())
            .enumerate()
            .map(|(index, (question, answer))| AnswerResult {
                question_index: index,
                question_text: question.text.clone(),
                your_answer: answer.clone(),
                correct_answer: question.correct_answer.clone(),
                is_correct: feedback::is_correct(question, answer.as_deref()),
                options: question.options.clone(),
                explanation: question.explanation.clone(),
            })
            .collect()
    }

    pub fn restart(&mut self) {
        self.state = RunState::Answering;
        self.current_section = 0;
        self.answers = vec![None; self.questions.len()];
    }

    fn expect_state(&self, expected: RunState) -> Result<(), RunError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(RunError::WrongState {
                expected,
                actual: self.state,
            })
        }
    }
}
