// Pairwise TF-IDF vectors and cosine similarity.
//
// For a pair of texts we build a two-document corpus. Each term's weight is
//
//   tf(term, doc) * (1 + ln(N / (1 + df(term))))
//
// with tf the raw count, N = 2 and df the number of documents containing the
// term. The smoothed idf stays positive even for terms shared by both
// documents, so identical texts score exactly 1.0. The vocabulary is the
// sorted union of both documents' terms, which makes the computation fully
// symmetric in its two arguments.

use std::collections::{BTreeSet, HashMap};

/// Term counts for one document.
fn term_frequencies(terms: &[String]) -> HashMap<&str, f64> {
    let mut tf = HashMap::new();
    for term in terms {
        *tf.entry(term.as_str()).or_insert(0.0) += 1.0;
    }
    tf
}

/// Build equal-length TF-IDF vectors for two tokenized documents.
///
/// Returns the shared vocabulary alongside the two vectors. Terms absent from a
/// document get weight 0 in that document's vector.
pub fn tfidf_vectors(a: &[String], b: &[String]) -> (Vec<String>, Vec<f64>, Vec<f64>) {
    let tf_a = term_frequencies(a);
    let tf_b = term_frequencies(b);

    let vocabulary: BTreeSet<&str> = tf_a.keys().chain(tf_b.keys()).copied().collect();
    let n_docs = 2.0_f64;

    let mut vec_a = Vec::with_capacity(vocabulary.len());
    let mut vec_b = Vec::with_capacity(vocabulary.len());
    for term in &vocabulary {
        let in_a = tf_a.get(term).copied().unwrap_or(0.0);
        let in_b = tf_b.get(term).copied().unwrap_or(0.0);
        let df = (in_a > 0.0) as u8 as f64 + (in_b > 0.0) as u8 as f64;
        let idf = 1.0 + (n_docs / (1.0 + df)).ln();
        vec_a.push(in_a * idf);
        vec_b.push(in_b * idf);
    }

    let vocabulary = vocabulary.into_iter().map(String::from).collect();
    (vocabulary, vec_a, vec_b)
}

/// Cosine similarity: dot(A, B) / (|A| * |B|).
///
/// Returns 0.0 for mismatched or empty vectors and when either norm is zero.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// TF-IDF cosine similarity of two tokenized documents, in [0, 1].
pub fn document_similarity(a: &[String], b: &[String]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let (_, vec_a, vec_b) = tfidf_vectors(a, b);
    cosine_similarity(&vec_a, &vec_b).clamp(0.0, 1.0)
}
