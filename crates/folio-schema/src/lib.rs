use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatResponse {
    pub reply: String,
}

// ---------------------------------------------------------------------------
// Contact
// ---------------------------------------------------------------------------

/// Contact form submission. Every field is optional on the wire; missing
/// values render as `(n/a)` in the outbound mail.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ---------------------------------------------------------------------------
// GitHub activity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityQuery {
    #[serde(default)]
    pub user: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<BTreeMap<NaiveDate, u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ActivityResponse {
    pub fn days(days: BTreeMap<NaiveDate, u32>) -> Self {
        Self {
            ok: true,
            days: Some(days),
            reason: None,
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            ok: false,
            days: None,
            reason: Some(reason.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Heatmap
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

/// Visual intensity level of a heatmap cell, lowest first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Idle,
    Low,
    Medium,
    High,
    Peak,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HeatmapQuery {
    /// Any 32-bit value, signed or unsigned; reduced modulo 2^32.
    #[serde(default)]
    pub seed: Option<i64>,
    #[serde(default)]
    pub weeks: Option<u32>,
    #[serde(default)]
    pub start: Option<WeekStart>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeatmapCellView {
    pub week: u32,
    pub weekday: u32,
    pub intensity: f64,
    pub tier: Tier,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeatmapResponse {
    pub seed: u32,
    pub weeks: u32,
    pub columns: u32,
    pub start: WeekStart,
    pub cells: Vec<HeatmapCellView>,
}

// ---------------------------------------------------------------------------
// Games
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypingScoreRequest {
    pub prompt: usize,
    pub typed: String,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TypingScoreResponse {
    pub wpm: u32,
    pub accuracy: u32,
    pub done: bool,
    pub best_wpm: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TriviaQuestionView {
    pub index: usize,
    pub question: String,
    pub choices: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriviaAnswerRequest {
    pub question: usize,
    pub choice: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TriviaAnswerResponse {
    pub correct: bool,
    pub answer: usize,
    pub explain: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriviaScoreRequest {
    /// `picks[i]` answers question `i`.
    #[serde(default)]
    pub picks: Vec<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TriviaScoreResponse {
    pub score: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn other(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRequest {
    pub cells: Vec<Option<Mark>>,
    pub cell: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoveResponse {
    pub cells: Vec<Option<Mark>>,
    pub next: Option<Mark>,
    pub winner: Option<Mark>,
    pub draw: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackGuessRequest {
    pub guess: String,
    #[serde(default)]
    pub found: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StackGuessResponse {
    pub matched: Option<String>,
    pub hint: String,
    pub found: Vec<String>,
    pub remaining: usize,
    pub done: bool,
}

/// Uniform error body for 4xx responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
