// Comparative summary across all scored responses for one prompt.

use std::collections::BTreeMap;

use crate::models::{BestResponse, ComparativeSummary, ScoredResponse, WorstResponse};

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

fn round_score(value: f64) -> u32 {
    if value.is_finite() {
        value.max(0.0).round() as u32
    } else {
        0
    }
}

/// Location tag -> count, over every response (failed ones included).
pub fn sovereignty_distribution(responses: &[ScoredResponse]) -> BTreeMap<String, usize> {
    let mut distribution = BTreeMap::new();
    for response in responses {
        let location = response
            .sovereignty
            .as_ref()
            .map(|s| s.server_location.as_str())
            .unwrap_or("UNKNOWN");
        *distribution.entry(location.to_string()).or_insert(0) += 1;
    }
    distribution
}

/// Best by composite, first occurrence winning ties.
fn best_of<'a>(responses: &[&'a ScoredResponse]) -> Option<&'a ScoredResponse> {
    let mut best: Option<&ScoredResponse> = None;
    for &r in responses {
        let score = r.scores.composite.unwrap_or(0);
        if best.map_or(true, |b| score > b.scores.composite.unwrap_or(0)) {
            best = Some(r);
        }
    }
    best
}

/// Worst by composite, last occurrence winning ties (the tail of a stable
/// descending sort).
fn worst_of<'a>(responses: &[&'a ScoredResponse]) -> Option<&'a ScoredResponse> {
    let mut worst: Option<&ScoredResponse> = None;
    for &r in responses {
        let score = r.scores.composite.unwrap_or(0);
        if worst.map_or(true, |w| score <= w.scores.composite.unwrap_or(0)) {
            worst = Some(r);
        }
    }
    worst
}

/// Aggregate the scored responses.
///
/// Means cover successful responses only; the response-time mean and the
/// sovereignty histogram cover every response. With no successful response the
/// means are 0 and best/worst are `None`.
pub fn summarize(responses: &[ScoredResponse]) -> ComparativeSummary {
    let successful: Vec<&ScoredResponse> = responses.iter().filter(|r| r.is_scorable()).collect();

    let score_mean = |pick: fn(&ScoredResponse) -> Option<f64>| {
        mean(successful.iter().map(|r| pick(r).unwrap_or(0.0)))
    };

    let avg_relevance = score_mean(|r| r.scores.relevance.map(f64::from));
    let avg_similarity = score_mean(|r| r.scores.similarity.map(f64::from));
    let avg_sovereignty = score_mean(|r| r.sovereignty.as_ref().map(|s| s.score));
    let avg_composite = score_mean(|r| r.scores.composite.map(f64::from));
    let avg_response_time = mean(
        responses
            .iter()
            .map(|r| r.response_time_ms)
            .filter(|t| t.is_finite()),
    );

    let best_response = best_of(&successful).map(|r| BestResponse {
        model: r.model.clone(),
        composite_score: r.scores.composite,
        relevance: r.scores.relevance,
        sovereignty: r.sovereignty.as_ref().map(|s| s.score),
    });
    let worst_response = worst_of(&successful).map(|r| WorstResponse {
        model: r.model.clone(),
        composite_score: r.scores.composite,
    });

    ComparativeSummary {
        total_responses: responses.len(),
        successful_responses: successful.len(),
        failed_responses: responses.len() - successful.len(),
        average_relevance: round_score(avg_relevance),
        average_similarity: round_score(avg_similarity),
        average_sovereignty: round_score(avg_sovereignty),
        average_composite: round_score(avg_composite),
        average_response_time: round_score(avg_response_time),
        best_response,
        worst_response,
        consensus_level: avg_similarity,
        sovereignty_distribution: sovereignty_distribution(responses),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::TextAnalysisResult;
    use crate::models::{ResponseStatus, Scores, ServerLocation, Sovereignty};

    fn scored(model: &str, composite: Option<u32>, status: ResponseStatus) -> ScoredResponse {
        ScoredResponse {
            model: model.to_string(),
            text: if status == ResponseStatus::Success {
                "text".to_string()
            } else {
                String::new()
            },
            response_time_ms: 1000.0,
            status,
            sovereignty: None,
            scores: Scores {
                composite,
                similarity: composite,
                ..Scores::default()
            },
            nlp_analysis: TextAnalysisResult::empty().flatten(),
        }
    }

    #[test]
    fn test_ties_first_best_last_worst() {
        let responses = vec![
            scored("a", Some(70), ResponseStatus::Success),
            scored("b", Some(70), ResponseStatus::Success),
            scored("c", Some(40), ResponseStatus::Success),
            scored("d", Some(40), ResponseStatus::Success),
        ];
        let summary = summarize(&responses);
        assert_eq!(summary.best_response.unwrap().model, "a");
        assert_eq!(summary.worst_response.unwrap().model, "d");
    }

    #[test]
    fn test_no_successes_degrades_to_defaults() {
        let responses = vec![
            scored("a", None, ResponseStatus::Failed),
            scored("b", None, ResponseStatus::Timeout),
        ];
        let summary = summarize(&responses);
        assert_eq!(summary.total_responses, 2);
        assert_eq!(summary.successful_responses, 0);
        assert_eq!(summary.failed_responses, 2);
        assert_eq!(summary.average_composite, 0);
        assert_eq!(summary.consensus_level, 0.0);
        assert!(summary.best_response.is_none());
        assert!(summary.worst_response.is_none());
        assert_eq!(summary.sovereignty_distribution["UNKNOWN"], 2);
    }

    #[test]
    fn test_distribution_counts_all_responses() {
        let mut eu = scored("a", Some(50), ResponseStatus::Success);
        eu.sovereignty = Some(Sovereignty {
            score: 90.0,
            server_location: ServerLocation::Eu,
            rgpd_compliant: true,
            cloud_provider: "OVH".to_string(),
            data_retention: "30d".to_string(),
        });
        let mut failed_usa = scored("b", None, ResponseStatus::Failed);
        failed_usa.sovereignty = Some(Sovereignty {
            score: 40.0,
            server_location: ServerLocation::Usa,
            rgpd_compliant: false,
            cloud_provider: "GCP".to_string(),
            data_retention: "unknown".to_string(),
        });
        let summary = summarize(&[eu, failed_usa, scored("c", Some(30), ResponseStatus::Success)]);
        assert_eq!(summary.sovereignty_distribution["EU"], 1);
        assert_eq!(summary.sovereignty_distribution["USA"], 1);
        assert_eq!(summary.sovereignty_distribution["UNKNOWN"], 1);
        // Only successful responses feed the sovereignty mean: (90 + 0) / 2
        assert_eq!(summary.average_sovereignty, 45);
    }

    #[test]
    fn test_means_and_consensus() {
        let responses = vec![
            scored("a", Some(80), ResponseStatus::Success),
            scored("b", Some(61), ResponseStatus::Success),
            scored("c", None, ResponseStatus::Failed),
        ];
        let summary = summarize(&responses);
        assert_eq!(summary.average_composite, 71);
        assert!((summary.consensus_level - 70.5).abs() < 1e-9);
        assert_eq!(summary.average_response_time, 1000);
    }
}
