// Frequency keyword extraction over the cleaned token stream.

use std::collections::HashMap;

use crate::models::Keyword;

/// Default number of keywords kept per text.
pub const DEFAULT_KEYWORD_LIMIT: usize = 10;

/// Count cleaned tokens and keep the `limit` most frequent.
///
/// Ties keep first-seen order (stable sort over insertion order), so the
/// output is deterministic. `relevance` is count / total cleaned tokens.
pub fn extract_keywords(tokens: &[String], limit: usize) -> Vec<Keyword> {
    if tokens.is_empty() || limit == 0 {
        return Vec::new();
    }

    // Insertion-ordered frequency table
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for token in tokens {
        match index.get(token.as_str()) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(token.as_str(), counts.len());
                counts.push((token.as_str(), 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let total = tokens.len() as f64;
    counts
        .into_iter()
        .take(limit)
        .map(|(word, count)| Keyword {
            word: word.to_string(),
            count,
            relevance: count as f64 / total,
        })
        .collect()
}
