//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.
//!
//! Every generation endpoint returns a bare JSON list. Earlier mock layers
//! sometimes wrapped results in `{ items: [...] }`, which forced callers into
//! shape sniffing; the list shape is now the single canonical contract.

use serde::{Deserialize, Serialize};

use crate::domain::{GradingRow, Item, PracticeItem};

/// Grade as the UI sends it: either a bare number or a string. Numbers are
/// accepted as f64 so a fractional grade coerces instead of failing the
/// request; resolution truncates toward the canonical grades.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum GradeIn {
    Number(f64),
    Text(String),
}

/// Shared request body for all three generation endpoints. Everything except
/// `seed` is optional; missing fields fall back to configured defaults.
#[derive(Clone, Debug, Deserialize)]
pub struct GenerateIn {
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub grade: Option<GradeIn>,
    #[serde(default)]
    pub seed: String,
    #[serde(default)]
    pub count: Option<i64>,
}

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    GenerateAssessment {
        #[serde(flatten)]
        options: GenerateIn,
    },
    GeneratePractice {
        #[serde(flatten)]
        options: GenerateIn,
    },
    GradeBatch {
        #[serde(flatten)]
        options: GenerateIn,
    },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    AssessmentItems { items: Vec<Item> },
    PracticeItems { items: Vec<PracticeItem> },
    GradingBatch { rows: Vec<GradingRow> },
    Error { message: String },
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
