// Data models — the fixed record schema shared by the engine and its callers.
//
// Inputs arrive as `ResponseRecord`s (one per AI provider), outputs leave as
// `ScoredResponse`s plus one `ComparativeSummary`. Every optional field has a
// documented default so callers never need presence checks.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Outcome of the call to the AI provider that produced a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Failed,
    Timeout,
}

impl ResponseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseStatus::Success => "success",
            ResponseStatus::Failed => "failed",
            ResponseStatus::Timeout => "timeout",
        }
    }
}

impl std::fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where the provider processes data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ServerLocation {
    Usa,
    Eu,
    Asia,
    Other,
    Unknown,
}

impl ServerLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServerLocation::Usa => "USA",
            ServerLocation::Eu => "EU",
            ServerLocation::Asia => "ASIA",
            ServerLocation::Other => "OTHER",
            ServerLocation::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for ServerLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Data-residency descriptor supplied by the caller. Consumed, never computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sovereignty {
    /// Compliance score, 0-100
    #[serde(default)]
    pub score: f64,
    #[serde(default = "unknown_location")]
    pub server_location: ServerLocation,
    #[serde(default)]
    pub rgpd_compliant: bool,
    #[serde(default)]
    pub cloud_provider: String,
    #[serde(default)]
    pub data_retention: String,
}

fn unknown_location() -> ServerLocation {
    ServerLocation::Unknown
}

/// One raw response collected from an AI provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRecord {
    #[serde(alias = "aiModel")]
    pub model: String,
    /// Missing or null text is treated as empty
    #[serde(default, alias = "responseText", deserialize_with = "null_as_empty")]
    pub text: String,
    #[serde(default, alias = "responseTime")]
    pub response_time_ms: f64,
    pub status: ResponseStatus,
    #[serde(default, alias = "sovereigntyInfo")]
    pub sovereignty: Option<Sovereignty>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl ResponseRecord {
    /// Only successful, non-empty responses take part in scoring and comparisons.
    pub fn is_scorable(&self) -> bool {
        self.status == ResponseStatus::Success && !self.text.trim().is_empty()
    }

    /// The sovereignty score fed into the composite, 0 when absent.
    pub fn sovereignty_score(&self) -> f64 {
        self.sovereignty.as_ref().map(|s| s.score).unwrap_or(0.0)
    }

    /// Histogram key for the sovereignty distribution.
    pub fn location(&self) -> ServerLocation {
        self.sovereignty
            .as_ref()
            .map(|s| s.server_location)
            .unwrap_or(ServerLocation::Unknown)
    }
}

/// F1 values of the three ROUGE variants, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RougeScores {
    pub rouge1: f64,
    pub rouge2: f64,
    #[serde(rename = "rougeL")]
    pub rouge_l: f64,
}

/// Per-response scores. `None` means the response did not take part in scoring.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scores {
    pub relevance: Option<u32>,
    pub similarity: Option<u32>,
    pub speed: Option<u32>,
    pub composite: Option<u32>,
    pub rouge: Option<RougeScores>,
    /// Passed through from the input record
    pub sovereignty: Option<Sovereignty>,
}

/// A keyword with its raw frequency and share of the cleaned tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub word: String,
    pub count: usize,
    pub relevance: f64,
}

/// Flattened text analysis attached to each scored response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NlpAnalysis {
    pub keywords: Vec<Keyword>,
    pub sentiment: String,
    pub sentiment_score: f64,
    pub topics: Vec<String>,
    pub word_count: usize,
    pub sentence_count: usize,
    pub readability: f64,
}

/// A response enriched with its scores and analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredResponse {
    pub model: String,
    pub text: String,
    pub response_time_ms: f64,
    pub status: ResponseStatus,
    pub sovereignty: Option<Sovereignty>,
    pub scores: Scores,
    pub nlp_analysis: NlpAnalysis,
}

impl ScoredResponse {
    pub fn is_scorable(&self) -> bool {
        self.status == ResponseStatus::Success && !self.text.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestResponse {
    pub model: String,
    pub composite_score: Option<u32>,
    pub relevance: Option<u32>,
    pub sovereignty: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorstResponse {
    pub model: String,
    pub composite_score: Option<u32>,
}

/// Aggregate view over every scored response for one prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparativeSummary {
    pub total_responses: usize,
    pub successful_responses: usize,
    pub failed_responses: usize,
    pub average_relevance: u32,
    pub average_similarity: u32,
    pub average_sovereignty: u32,
    pub average_composite: u32,
    /// Averaged over all responses, failed ones included
    pub average_response_time: u32,
    pub best_response: Option<BestResponse>,
    pub worst_response: Option<WorstResponse>,
    /// Unrounded mean similarity of the successful responses
    pub consensus_level: f64,
    /// Location tag -> number of responses, over all responses
    pub sovereignty_distribution: BTreeMap<String, usize>,
}

/// Pairwise similarity (0-100) between the successful responses, in input order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SimilarityMatrix {
    pub models: Vec<String>,
    pub values: Vec<Vec<u32>>,
}

impl SimilarityMatrix {
    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

/// One prompt and the responses collected for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringRequest {
    pub prompt: String,
    #[serde(default)]
    pub responses: Vec<ResponseRecord>,
}

/// Everything the engine produces for one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringReport {
    pub prompt: String,
    pub responses: Vec<ScoredResponse>,
    pub summary: ComparativeSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity_matrix: Option<SimilarityMatrix>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_defaults_for_missing_fields() {
        let record: ResponseRecord =
            serde_json::from_str(r#"{"model": "gemini", "status": "failed"}"#).unwrap();
        assert_eq!(record.text, "");
        assert_eq!(record.response_time_ms, 0.0);
        assert!(record.sovereignty.is_none());
        assert_eq!(record.location(), ServerLocation::Unknown);
        assert_eq!(record.sovereignty_score(), 0.0);
        assert!(!record.is_scorable());
    }

    #[test]
    fn test_record_null_text_and_aliases() {
        let record: ResponseRecord = serde_json::from_str(
            r#"{
                "aiModel": "mistral",
                "responseText": null,
                "responseTime": 1200,
                "status": "success",
                "sovereigntyInfo": {"score": 80, "serverLocation": "EU", "rgpdCompliant": true}
            }"#,
        )
        .unwrap();
        assert_eq!(record.model, "mistral");
        assert_eq!(record.text, "");
        assert_eq!(record.response_time_ms, 1200.0);
        assert_eq!(record.location(), ServerLocation::Eu);
        assert_eq!(record.sovereignty_score(), 80.0);
        // Success with empty text still does not take part in scoring
        assert!(!record.is_scorable());
    }

    #[test]
    fn test_rouge_scores_serialize_with_upstream_names() {
        let json = serde_json::to_value(RougeScores {
            rouge1: 0.5,
            rouge2: 0.25,
            rouge_l: 0.4,
        })
        .unwrap();
        assert_eq!(json["rouge1"], 0.5);
        assert_eq!(json["rouge2"], 0.25);
        assert_eq!(json["rougeL"], 0.4);
    }

    #[test]
    fn test_location_display() {
        assert_eq!(ServerLocation::Usa.to_string(), "USA");
        assert_eq!(ServerLocation::Unknown.as_str(), "UNKNOWN");
        assert_eq!(ResponseStatus::Timeout.to_string(), "timeout");
    }
}
