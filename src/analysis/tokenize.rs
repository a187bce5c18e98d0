// Tokenization pipelines.
//
// Three views of the same text are used across the crate:
// - raw tokens: lower-cased word tokens, nothing removed (word counts, sentiment)
// - keyword tokens: raw tokens minus stop words and anything of 3 chars or less
// - scoring tokens: raw tokens minus stop words, stemmed, then kept when they are
//   at least 2 chars of [a-z0-9] (so "AI" or "ML" survive). Feeds BM25 and ROUGE.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex_lite::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use stop_words::{get, LANGUAGE};

static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("sentence break pattern is valid"));

/// Split text into lower-cased word tokens on anything that is not a letter or digit.
pub fn raw_tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// Number of word tokens in the text, counted on the same stream as `raw_tokens`.
pub fn count_words(text: &str) -> usize {
    raw_tokens(text).len()
}

/// Split on runs of `.`, `!` and `?`, dropping blank segments.
pub fn sentences(text: &str) -> Vec<&str> {
    SENTENCE_BREAK
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

pub fn count_sentences(text: &str) -> usize {
    sentences(text).len()
}

fn is_ascii_word(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_lowercase())
}

fn is_scoring_token(token: &str) -> bool {
    token.len() >= 2
        && token
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
}

/// Reusable tokenizer configuration: stop-word sets and the stemmer.
///
/// Built once and shared read-only; holds no per-call state.
pub struct Tokenizer {
    /// English + French stop words, used by the keyword pipeline
    keyword_stop_words: HashSet<String>,
    /// English stop words, used by the scoring pipeline
    scoring_stop_words: HashSet<String>,
    stemmer: Stemmer,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    pub fn new() -> Self {
        let english: HashSet<String> = get(LANGUAGE::English)
            .iter()
            .map(|w| w.to_lowercase())
            .collect();
        let mut keyword_stop_words = english.clone();
        keyword_stop_words.extend(get(LANGUAGE::French).iter().map(|w| w.to_lowercase()));

        Self {
            keyword_stop_words,
            scoring_stop_words: english,
            stemmer: Stemmer::create(Algorithm::English),
        }
    }

    /// The stop-word list as owned strings, for APIs that take `&[String]`.
    pub fn stop_word_list(&self) -> Vec<String> {
        let mut words: Vec<String> = self.keyword_stop_words.iter().cloned().collect();
        words.sort();
        words
    }

    /// Tokens eligible as keywords: alphabetic, longer than 3 chars, not a stop word.
    pub fn keyword_tokens(&self, text: &str) -> Vec<String> {
        raw_tokens(text)
            .into_iter()
            .filter(|t| {
                t.chars().count() > 3 && is_ascii_word(t) && !self.keyword_stop_words.contains(t)
            })
            .collect()
    }

    /// Raw tokens with stop words removed, unstemmed. The TF-IDF vocabulary.
    pub fn content_tokens(&self, text: &str) -> Vec<String> {
        raw_tokens(text)
            .into_iter()
            .filter(|t| !self.scoring_stop_words.contains(t))
            .collect()
    }

    /// Stemmed tokens for relevance and overlap scoring.
    pub fn preprocess(&self, text: &str) -> Vec<String> {
        raw_tokens(text)
            .into_iter()
            .filter(|t| !self.scoring_stop_words.contains(t))
            .map(|t| self.stemmer.stem(&t).into_owned())
            .filter(|t| is_scoring_token(t))
            .collect()
    }

    pub fn stem(&self, word: &str) -> String {
        self.stemmer.stem(word).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_tokens_lowercase_and_split() {
        let tokens = raw_tokens("Hello, World! Rust-lang 2024");
        assert_eq!(tokens, vec!["hello", "world", "rust", "lang", "2024"]);
    }

    #[test]
    fn test_sentences_skip_empty_segments() {
        assert_eq!(count_sentences("One. Two!! Three?"), 3);
        assert_eq!(count_sentences("...!?"), 0);
        assert_eq!(count_sentences("no punctuation at all"), 1);
        assert_eq!(count_sentences(""), 0);
    }

    #[test]
    fn test_count_words_keeps_everything() {
        assert_eq!(count_words("The cat sat on the mat."), 6);
        assert_eq!(count_words("   "), 0);
    }

    #[test]
    fn test_count_words_matches_raw_tokens_on_expanding_lowercase() {
        // "İ" lower-cases to "i" + U+0307, which splits the token
        let text = "İstanbul is big";
        assert_eq!(count_words(text), raw_tokens(text).len());
    }

    #[test]
    fn test_keyword_tokens_drop_short_and_stop_words() {
        let tok = Tokenizer::new();
        let tokens = tok.keyword_tokens("The photosynthesis of the big plant uses chlorophyll");
        assert!(tokens.contains(&"photosynthesis".to_string()));
        assert!(tokens.contains(&"chlorophyll".to_string()));
        assert!(!tokens.iter().any(|t| t == "the" || t == "big" || t == "of"));
        assert!(tokens.iter().all(|t| t.len() > 3));
    }

    #[test]
    fn test_keyword_tokens_reject_digits() {
        let tok = Tokenizer::new();
        assert!(tok.keyword_tokens("version 2024 released").iter().all(|t| t != "2024"));
    }

    #[test]
    fn test_preprocess_keeps_short_acronyms_and_stems() {
        let tok = Tokenizer::new();
        let tokens = tok.preprocess("LLM cats");
        assert!(tokens.contains(&"llm".to_string()));
        assert!(tokens.contains(&"cat".to_string()));
        assert!(tokens.iter().all(|t| t.len() >= 2));
    }

    #[test]
    fn test_preprocess_empty() {
        let tok = Tokenizer::new();
        assert!(tok.preprocess("").is_empty());
        assert!(tok.preprocess("!!! ???").is_empty());
    }
}
