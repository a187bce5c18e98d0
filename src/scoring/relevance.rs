// BM25 relevance of a response to the prompt.
//
// The corpus for one scoring request is a handful of responses, so there is no
// meaningful corpus-wide IDF: every query term gets idf = 1 and the average
// document length is a fixed 100 tokens.

use std::collections::HashMap;

pub const BM25_K1: f64 = 1.5;
pub const BM25_B: f64 = 0.75;
pub const AVG_DOC_LENGTH: f64 = 100.0;
const IDF: f64 = 1.0;

/// Relevance reported when the computation yields a non-finite value.
pub const NEUTRAL_RELEVANCE: u32 = 50;

/// Raw (unnormalized) BM25 score of `doc` for `query`.
pub fn bm25_raw(query: &[String], doc: &[String]) -> f64 {
    let mut term_freq: HashMap<&str, f64> = HashMap::new();
    for token in doc {
        *term_freq.entry(token.as_str()).or_insert(0.0) += 1.0;
    }

    let doc_len = doc.len() as f64;
    let length_norm = 1.0 - BM25_B + BM25_B * (doc_len / AVG_DOC_LENGTH);

    query
        .iter()
        .filter_map(|term| term_freq.get(term.as_str()))
        .map(|&tf| IDF * (tf * (BM25_K1 + 1.0)) / (tf + BM25_K1 * length_norm))
        .sum()
}

/// BM25 normalized to an integer in [0, 100].
///
/// Returns `Some(0)` when either token list is empty and `None` when the
/// arithmetic goes non-finite; the caller substitutes `NEUTRAL_RELEVANCE`.
pub fn bm25_relevance(query: &[String], doc: &[String]) -> Option<u32> {
    if query.is_empty() || doc.is_empty() {
        return Some(0);
    }

    let max_score = query.len() as f64 * (BM25_K1 + 1.0);
    let normalized = bm25_raw(query, doc) / max_score * 100.0;
    if !normalized.is_finite() {
        return None;
    }

    Some(normalized.clamp(0.0, 100.0).round() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(text: &str) -> Vec<String> {
        text.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_empty_inputs_score_zero() {
        assert_eq!(bm25_relevance(&[], &toks("rust")), Some(0));
        assert_eq!(bm25_relevance(&toks("rust"), &[]), Some(0));
    }

    #[test]
    fn test_no_shared_terms_score_zero() {
        assert_eq!(bm25_relevance(&toks("rust"), &toks("python java")), Some(0));
    }

    #[test]
    fn test_known_value() {
        // One query term, tf = 1, doc_len = 1:
        // norm = 0.25 + 0.75 * 0.01 = 0.2575
        // score = 2.5 / (1 + 1.5 * 0.2575) = 1.8034...
        // normalized = 1.8034 / 2.5 * 100 = 72.1 -> 72
        assert_eq!(bm25_relevance(&toks("rust"), &toks("rust")), Some(72));
    }

    #[test]
    fn test_monotone_in_term_frequency() {
        let query = toks("rust");
        let mut last = 0;
        for tf in 0..=6 {
            // Fixed document length of 6
            let mut doc: Vec<String> = vec!["rust".to_string(); tf];
            doc.extend(vec!["filler".to_string(); 6 - tf]);
            let score = bm25_relevance(&query, &doc).unwrap();
            assert!(score >= last, "tf={tf}: {score} < {last}");
            last = score;
        }
    }

    #[test]
    fn test_bounded() {
        let query = toks("a b");
        let doc = toks(&"a b ".repeat(500));
        let score = bm25_relevance(&query, &doc).unwrap();
        assert!(score <= 100);
    }
}
