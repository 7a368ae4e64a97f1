//! Quiz parameters chosen by the caller before a run starts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How many questions to take from a bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CountRepr", into = "CountRepr")]
pub enum QuestionCount {
    All,
    Limit(usize),
}

impl QuestionCount {
    /// Resolve against the number of available questions.
    pub fn resolve(self, available: usize) -> usize {
        match self {
            QuestionCount::All => available,
            QuestionCount::Limit(n) => n.min(available),
        }
    }
}

impl Default for QuestionCount {
    fn default() -> Self {
        QuestionCount::Limit(10)
    }
}

impl fmt::Display for QuestionCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionCount::All => write!(f, "all"),
            QuestionCount::Limit(n) => write!(f, "{}", n),
        }
    }
}

impl FromStr for QuestionCount {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(QuestionCount::All);
        }
        s.parse::<usize>()
            .map(QuestionCount::Limit)
            .map_err(|_| format!("invalid question count: {:?} (expected a number or \"all\")", s))
    }
}

/// Wire form of a count: `"all"`, `10` or `"10"`.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum CountRepr {
    Number(usize),
    Text(String),
}

impl TryFrom<CountRepr> for QuestionCount {
    type Error = String;

    fn try_from(repr: CountRepr) -> Result<Self, Self::Error> {
        match repr {
            CountRepr::Number(n) => Ok(QuestionCount::Limit(n)),
            CountRepr::Text(s) => s.parse(),
        }
    }
}

impl From<QuestionCount> for CountRepr {
    fn from(count: QuestionCount) -> Self {
        match count {
            QuestionCount::All => CountRepr::Text("all".to_string()),
            QuestionCount::Limit(n) => CountRepr::Number(n),
        }
    }
}

/// Order in which selected questions are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionOrder {
    #[default]
    Random,
    Sequential,
}

impl FromStr for QuestionOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "random" => Ok(QuestionOrder::Random),
            "sequential" => Ok(QuestionOrder::Sequential),
            other => Err(format!("invalid order: {:?} (expected random or sequential)", other)),
        }
    }
}

/// Presentation shape every question of a run is coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QuestionFormat {
    #[default]
    #[serde(rename = "truefalse")]
    TrueFalse,
    #[serde(rename = "multiplechoice")]
    MultipleChoice,
}

impl fmt::Display for QuestionFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionFormat::TrueFalse => write!(f, "truefalse"),
            QuestionFormat::MultipleChoice => write!(f, "multiplechoice"),
        }
    }
}

impl FromStr for QuestionFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "truefalse" => Ok(QuestionFormat::TrueFalse),
            "multiplechoice" => Ok(QuestionFormat::MultipleChoice),
            other => Err(format!(
                "invalid format: {:?} (expected truefalse or multiplechoice)",
                other
            )),
        }
    }
}

/// Where the questions of a run come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizSource {
    /// The loaded question bank.
    #[default]
    Predefined,
    /// Questions generated by the LLM.
    Ai,
}

/// Everything a client picks before starting a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    pub source: QuizSource,
    pub format: QuestionFormat,
    pub count: QuestionCount,
    pub order: QuestionOrder,
    #[serde(alias = "perSection")]
    pub per_section: usize,
}

pub const DEFAULT_PER_SECTION: usize = 5;

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            source: QuizSource::default(),
            format: QuestionFormat::default(),
            count: QuestionCount::default(),
            order: QuestionOrder::default(),
            per_section: DEFAULT_PER_SECTION,
        }
    }
}
