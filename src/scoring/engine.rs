// ScoringEngine — scores every response to one prompt.
//
// Given the prompt and the collected responses, this module:
// 1. Separates scorable responses (success + non-empty text) from the rest
// 2. Runs the text analyzer on each scorable response
// 3. Computes BM25 relevance and ROUGE overlap against the prompt
// 4. Computes mean TF-IDF similarity against the other scorable responses
// 5. Normalizes response time into a speed score
// 6. Blends everything into the composite score
//
// Nothing here returns an error. Degenerate inputs map to each metric's
// neutral default, and unscorable responses pass through with empty scores.

use tracing::{debug, info};

use crate::analysis::tfidf::document_similarity;
use crate::analysis::{TextAnalysisResult, TextAnalyzer};
use crate::models::{
    ResponseRecord, ScoredResponse, Scores, ScoringReport, ScoringRequest, SimilarityMatrix,
};
use crate::scoring::composite::{composite_score, CompositeInputs};
use crate::scoring::relevance::{bm25_relevance, NEUTRAL_RELEVANCE};
use crate::scoring::rouge::rouge_scores;
use crate::scoring::speed::{speed_score, NEUTRAL_SPEED};
use crate::scoring::summary::summarize;

/// Similarity of a response that has no peers to compare against.
pub const SOLE_RESPONSE_SIMILARITY: u32 = 100;
/// Similarity reported when the average goes non-finite.
pub const NEUTRAL_SIMILARITY: u32 = 50;
/// Matrix diagonal value.
pub const SELF_SIMILARITY: u32 = 100;

pub struct ScoringEngine {
    analyzer: TextAnalyzer,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new(TextAnalyzer::new())
    }
}

impl ScoringEngine {
    pub fn new(analyzer: TextAnalyzer) -> Self {
        Self { analyzer }
    }

    pub fn analyzer(&self) -> &TextAnalyzer {
        &self.analyzer
    }

    /// Score every response. Output has the same length and order as the input.
    pub fn score_all(&self, responses: &[ResponseRecord], prompt: &str) -> Vec<ScoredResponse> {
        let scorable: Vec<usize> = responses
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_scorable())
            .map(|(i, _)| i)
            .collect();

        // Normalize speed against the slowest response, failures included
        let max_time_ms = responses
            .iter()
            .map(|r| r.response_time_ms)
            .filter(|t| t.is_finite())
            .fold(0.0_f64, f64::max);

        let prompt_tokens = self.analyzer.preprocess(prompt);
        let similarity_tokens: Vec<Vec<String>> = scorable
            .iter()
            .map(|&i| self.analyzer.tokenizer().content_tokens(&responses[i].text))
            .collect();

        let scored: Vec<ScoredResponse> = responses
            .iter()
            .enumerate()
            .map(|(index, record)| match scorable.iter().position(|&i| i == index) {
                Some(slot) => self.score_one(
                    record,
                    &prompt_tokens,
                    slot,
                    &similarity_tokens,
                    max_time_ms,
                ),
                None => unscored(record),
            })
            .collect();

        info!(
            responses = responses.len(),
            scored = scorable.len(),
            prompt_terms = prompt_tokens.len(),
            "Scored responses"
        );

        scored
    }

    fn score_one(
        &self,
        record: &ResponseRecord,
        prompt_tokens: &[String],
        slot: usize,
        similarity_tokens: &[Vec<String>],
        max_time_ms: f64,
    ) -> ScoredResponse {
        let analysis = self.analyzer.analyze(&record.text);
        let doc_tokens = self.analyzer.preprocess(&record.text);

        let relevance = bm25_relevance(prompt_tokens, &doc_tokens).unwrap_or_else(|| {
            debug!(model = %record.model, "Relevance not computable, using neutral value");
            NEUTRAL_RELEVANCE
        });

        let similarity = average_similarity(slot, similarity_tokens).unwrap_or_else(|| {
            debug!(model = %record.model, "Similarity not computable, using neutral value");
            NEUTRAL_SIMILARITY
        });

        let speed = speed_score(record.response_time_ms, max_time_ms).unwrap_or_else(|| {
            debug!(model = %record.model, "No usable max response time, using neutral speed");
            NEUTRAL_SPEED
        });

        let rouge = rouge_scores(&doc_tokens, prompt_tokens);

        let composite = composite_score(&CompositeInputs {
            relevance: Some(f64::from(relevance)),
            sovereignty: Some(record.sovereignty_score()),
            similarity: Some(f64::from(similarity)),
            speed: Some(f64::from(speed)),
        });

        debug!(
            model = %record.model,
            relevance,
            similarity,
            speed,
            composite,
            rouge1 = format!("{:.3}", rouge.rouge1),
            "Scored response"
        );

        ScoredResponse {
            model: record.model.clone(),
            text: record.text.clone(),
            response_time_ms: record.response_time_ms,
            status: record.status,
            sovereignty: record.sovereignty.clone(),
            scores: Scores {
                relevance: Some(relevance),
                similarity: Some(similarity),
                speed: Some(speed),
                composite: Some(composite),
                rouge: Some(rouge),
                sovereignty: record.sovereignty.clone(),
            },
            nlp_analysis: analysis.flatten(),
        }
    }

    /// Pairwise similarity over the scorable responses, in input order.
    ///
    /// Each off-diagonal cell is computed on its own rather than mirrored; the
    /// TF-IDF cosine is symmetric, so `[i][j] == [j][i]` holds anyway.
    pub fn similarity_matrix(&self, responses: &[ResponseRecord]) -> SimilarityMatrix {
        let scorable: Vec<&ResponseRecord> = responses.iter().filter(|r| r.is_scorable()).collect();
        let tokens: Vec<Vec<String>> = scorable
            .iter()
            .map(|r| self.analyzer.tokenizer().content_tokens(&r.text))
            .collect();

        let values = (0..scorable.len())
            .map(|i| {
                (0..scorable.len())
                    .map(|j| {
                        if i == j {
                            SELF_SIMILARITY
                        } else {
                            to_percent(document_similarity(&tokens[i], &tokens[j]))
                                .unwrap_or(0)
                        }
                    })
                    .collect()
            })
            .collect();

        SimilarityMatrix {
            models: scorable.iter().map(|r| r.model.clone()).collect(),
            values,
        }
    }

    /// Score a request and build the comparative summary, plus the matrix on request.
    pub fn evaluate(&self, request: &ScoringRequest, include_matrix: bool) -> ScoringReport {
        let responses = self.score_all(&request.responses, &request.prompt);
        let summary = summarize(&responses);
        let similarity_matrix = include_matrix.then(|| self.similarity_matrix(&request.responses));

        ScoringReport {
            prompt: request.prompt.clone(),
            responses,
            summary,
            similarity_matrix,
        }
    }
}

/// Mean similarity of `slot` against every other tokenized response, as 0-100.
///
/// With no peers the response trivially agrees with itself (100).
pub fn average_similarity(slot: usize, tokens: &[Vec<String>]) -> Option<u32> {
    let others: Vec<f64> = tokens
        .iter()
        .enumerate()
        .filter(|(j, _)| *j != slot)
        .map(|(_, other)| document_similarity(&tokens[slot], other))
        .collect();

    if others.is_empty() {
        return Some(SOLE_RESPONSE_SIMILARITY);
    }

    let mean = others.iter().sum::<f64>() / others.len() as f64;
    to_percent(mean)
}

fn to_percent(fraction: f64) -> Option<u32> {
    if !fraction.is_finite() {
        return None;
    }
    Some((fraction * 100.0).clamp(0.0, 100.0).round() as u32)
}

/// Pass-through for a response that takes no part in scoring.
fn unscored(record: &ResponseRecord) -> ScoredResponse {
    ScoredResponse {
        model: record.model.clone(),
        text: record.text.clone(),
        response_time_ms: record.response_time_ms,
        status: record.status,
        sovereignty: record.sovereignty.clone(),
        scores: Scores {
            sovereignty: record.sovereignty.clone(),
            ..Scores::default()
        },
        nlp_analysis: TextAnalysisResult::empty().flatten(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResponseStatus;

    fn record(model: &str, text: &str, time: f64, status: ResponseStatus) -> ResponseRecord {
        ResponseRecord {
            model: model.to_string(),
            text: text.to_string(),
            response_time_ms: time,
            status,
            sovereignty: None,
        }
    }

    #[test]
    fn test_sole_response_similarity_is_max() {
        let tokens = vec![vec!["rust".to_string()]];
        assert_eq!(average_similarity(0, &tokens), Some(100));
    }

    #[test]
    fn test_average_similarity_excludes_self() {
        let a = vec!["rust".to_string(), "ownership".to_string()];
        let b = vec!["python".to_string()];
        // Identical to itself but disjoint from the only peer
        assert_eq!(average_similarity(0, &[a, b]), Some(0));
    }

    #[test]
    fn test_unscored_passthrough() {
        let engine = ScoringEngine::default();
        let out = engine.score_all(
            &[record("gemini", "", 900.0, ResponseStatus::Timeout)],
            "What is Rust?",
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].scores.composite, None);
        assert_eq!(out[0].scores.rouge, None);
        assert_eq!(out[0].nlp_analysis.word_count, 0);
        assert_eq!(out[0].nlp_analysis.sentiment, "neutral");
    }

    #[test]
    fn test_success_with_blank_text_is_unscored() {
        let engine = ScoringEngine::default();
        let out = engine.score_all(
            &[record("cohere", "   ", 100.0, ResponseStatus::Success)],
            "prompt",
        );
        assert_eq!(out[0].scores.relevance, None);
    }

    #[test]
    fn test_zero_max_time_gives_neutral_speed() {
        let engine = ScoringEngine::default();
        let out = engine.score_all(
            &[record("a", "Rust ownership rules.", 0.0, ResponseStatus::Success)],
            "Explain Rust ownership",
        );
        assert_eq!(out[0].scores.speed, Some(NEUTRAL_SPEED));
    }

    #[test]
    fn test_matrix_skips_failures() {
        let engine = ScoringEngine::default();
        let matrix = engine.similarity_matrix(&[
            record("a", "Rust ownership rules.", 10.0, ResponseStatus::Success),
            record("b", "", 10.0, ResponseStatus::Failed),
            record("c", "Ownership in Rust.", 10.0, ResponseStatus::Success),
        ]);
        assert_eq!(matrix.models, vec!["a", "c"]);
        assert_eq!(matrix.values.len(), 2);
        assert_eq!(matrix.values[0][0], 100);
        assert_eq!(matrix.values[0][1], matrix.values[1][0]);
    }
}
