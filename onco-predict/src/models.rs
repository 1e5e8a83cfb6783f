//! Prediction data model
//!
//! JSON field names are camelCase on the wire (`confidenceScore`, `createdAt`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Diagnosis label produced by the classification policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    #[serde(rename = "Cancer")]
    Cancer,
    #[serde(rename = "Non-cancer")]
    NonCancer,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Cancer => "Cancer",
            Label::NonCancer => "Non-cancer",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Cancer" => Ok(Label::Cancer),
            "Non-cancer" => Ok(Label::NonCancer),
            other => Err(format!("unknown label: {}", other)),
        }
    }
}

/// Output of the classification policy, one per request
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    pub label: Label,
    pub suggestion: String,
    /// `max(model_output) * 100`
    pub confidence_score: f64,
}

/// Persisted prediction outcome (write-once)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRecord {
    /// UUID v4, hyphenated
    pub id: String,
    pub result: Label,
    pub suggestion: String,
    pub confidence_score: f64,
    /// ISO-8601 UTC, millisecond precision
    pub created_at: String,
}

/// Read-side projection of a record returned by the history endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryView {
    pub id: String,
    pub history: HistoryEntry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub result: Label,
    pub created_at: String,
    pub suggestion: String,
    pub id: String,
}

impl From<PredictionRecord> for HistoryView {
    fn from(record: PredictionRecord) -> Self {
        Self {
            id: record.id.clone(),
            history: HistoryEntry {
                result: record.result,
                created_at: record.created_at,
                suggestion: record.suggestion,
                id: record.id,
            },
        }
    }
}
