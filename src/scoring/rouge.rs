// ROUGE overlap between a candidate (the response) and a reference (the prompt).
//
// ROUGE-N counts clipped n-gram matches; ROUGE-L uses the longest common
// subsequence of the two token sequences. Only the F1 values leave this module.

use std::collections::HashMap;

use crate::models::RougeScores;

/// Precision, recall and their harmonic mean.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Prf {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl Prf {
    fn from_counts(overlap: usize, candidate_total: usize, reference_total: usize) -> Self {
        let precision = if candidate_total > 0 {
            overlap as f64 / candidate_total as f64
        } else {
            0.0
        };
        let recall = if reference_total > 0 {
            overlap as f64 / reference_total as f64
        } else {
            0.0
        };
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };
        Self {
            precision,
            recall,
            f1,
        }
    }
}

/// Frequency map of the space-joined n-grams of `tokens`.
pub fn ngrams(tokens: &[String], n: usize) -> HashMap<String, usize> {
    let mut grams = HashMap::new();
    if n == 0 || tokens.len() < n {
        return grams;
    }
    for window in tokens.windows(n) {
        *grams.entry(window.join(" ")).or_insert(0) += 1;
    }
    grams
}

/// ROUGE-N. All zeros when the reference has no n-grams.
pub fn rouge_n(candidate: &[String], reference: &[String], n: usize) -> Prf {
    let candidate_grams = ngrams(candidate, n);
    let reference_grams = ngrams(reference, n);

    if reference_grams.is_empty() {
        return Prf::default();
    }

    let overlap: usize = candidate_grams
        .iter()
        .filter_map(|(gram, &count)| reference_grams.get(gram).map(|&r| count.min(r)))
        .sum();
    let candidate_total: usize = candidate_grams.values().sum();
    let reference_total: usize = reference_grams.values().sum();

    Prf::from_counts(overlap, candidate_total, reference_total)
}

/// Length of the longest common subsequence, O(m * n) time, O(n) memory.
pub fn lcs_length(a: &[String], b: &[String]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for x in a {
        for (j, y) in b.iter().enumerate() {
            curr[j + 1] = if x == y {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// ROUGE-L from the LCS length.
pub fn rouge_l(candidate: &[String], reference: &[String]) -> Prf {
    let lcs = lcs_length(candidate, reference);
    Prf::from_counts(lcs, candidate.len(), reference.len())
}

/// F1 of ROUGE-1, ROUGE-2 and ROUGE-L over preprocessed token sequences.
pub fn rouge_scores(candidate: &[String], reference: &[String]) -> RougeScores {
    RougeScores {
        rouge1: rouge_n(candidate, reference, 1).f1,
        rouge2: rouge_n(candidate, reference, 2).f1,
        rouge_l: rouge_l(candidate, reference).f1,
    }
}
