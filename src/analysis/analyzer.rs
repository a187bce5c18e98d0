// TextAnalyzer — the single entry point for per-text analysis.
//
// Holds only configuration (tokenizer, lexicon, topic extractor, keyword
// limit). Every call recomputes its result from the input, so one analyzer can
// be shared across threads freely.

use serde::{Deserialize, Serialize};

use super::keywords::{extract_keywords, DEFAULT_KEYWORD_LIMIT};
use super::sentiment::{Lexicon, SENTIMENT_THRESHOLD};
use super::tfidf;
use super::tokenize::{self, Tokenizer};
use super::topics::HeuristicTopicExtractor;
use super::traits::TopicExtractor;
use crate::models::{Keyword, NlpAnalysis};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Classify a score in [-1, 1] using the +/-0.2 thresholds.
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s > SENTIMENT_THRESHOLD => SentimentLabel::Positive,
            s if s < -SENTIMENT_THRESHOLD => SentimentLabel::Negative,
            _ => SentimentLabel::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub label: SentimentLabel,
    /// Clamped to [-1, 1]
    pub score: f64,
}

impl Default for Sentiment {
    fn default() -> Self {
        Self {
            label: SentimentLabel::Neutral,
            score: 0.0,
        }
    }
}

/// Everything derived from one text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAnalysisResult {
    pub keywords: Vec<Keyword>,
    pub sentiment: Sentiment,
    pub topics: Vec<String>,
    pub word_count: usize,
    pub sentence_count: usize,
    /// In [0, 100]
    pub readability: f64,
}

impl TextAnalysisResult {
    /// The analysis of an empty or missing text.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Flatten into the shape attached to scored responses.
    pub fn flatten(self) -> NlpAnalysis {
        NlpAnalysis {
            keywords: self.keywords,
            sentiment: self.sentiment.label.as_str().to_string(),
            sentiment_score: self.sentiment.score,
            topics: self.topics,
            word_count: self.word_count,
            sentence_count: self.sentence_count,
            readability: self.readability,
        }
    }
}

/// Simplified Flesch reading ease: 100 - 1.5 * words per sentence, in [0, 100].
///
/// A text with no sentence scores 0.
pub fn readability(word_count: usize, sentence_count: usize) -> f64 {
    if sentence_count == 0 {
        return 0.0;
    }
    let words_per_sentence = word_count as f64 / sentence_count as f64;
    (100.0 - 1.5 * words_per_sentence).clamp(0.0, 100.0)
}

pub struct TextAnalyzer {
    tokenizer: Tokenizer,
    lexicon: Lexicon,
    topic_extractor: Box<dyn TopicExtractor>,
    keyword_limit: usize,
}

impl Default for TextAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextAnalyzer {
    pub fn new() -> Self {
        Self::with_keyword_limit(DEFAULT_KEYWORD_LIMIT)
    }

    pub fn with_keyword_limit(keyword_limit: usize) -> Self {
        let tokenizer = Tokenizer::new();
        let lexicon = Lexicon::new(&tokenizer);
        let topic_extractor = Box::new(HeuristicTopicExtractor::new(&tokenizer));
        Self {
            tokenizer,
            lexicon,
            topic_extractor,
            keyword_limit,
        }
    }

    /// Replace the topic extractor, e.g. with a tagger-backed implementation.
    pub fn with_topic_extractor(mut self, extractor: Box<dyn TopicExtractor>) -> Self {
        self.topic_extractor = extractor;
        self
    }

    pub fn keyword_limit(&self) -> usize {
        self.keyword_limit
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Full analysis of one text. Blank text yields `TextAnalysisResult::empty()`.
    pub fn analyze(&self, text: &str) -> TextAnalysisResult {
        if text.trim().is_empty() {
            return TextAnalysisResult::empty();
        }

        let word_count = tokenize::count_words(text);
        let sentence_count = tokenize::count_sentences(text);

        TextAnalysisResult {
            keywords: self.keywords(text),
            sentiment: self.sentiment(text),
            topics: self.topic_extractor.extract(text),
            word_count,
            sentence_count,
            readability: readability(word_count, sentence_count),
        }
    }

    pub fn keywords(&self, text: &str) -> Vec<Keyword> {
        extract_keywords(&self.tokenizer.keyword_tokens(text), self.keyword_limit)
    }

    pub fn sentiment(&self, text: &str) -> Sentiment {
        let score = self
            .lexicon
            .score(&tokenize::raw_tokens(text), &self.tokenizer);
        Sentiment {
            label: SentimentLabel::from_score(score),
            score,
        }
    }

    pub fn topics(&self, text: &str) -> Vec<String> {
        self.topic_extractor.extract(text)
    }

    /// Tokens for BM25 and ROUGE: stop words removed, stemmed, length >= 2.
    pub fn preprocess(&self, text: &str) -> Vec<String> {
        self.tokenizer.preprocess(text)
    }

    /// TF-IDF cosine similarity of two texts, in [0, 1]. Symmetric.
    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        tfidf::document_similarity(
            &self.tokenizer.content_tokens(a),
            &self.tokenizer.content_tokens(b),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_analysis() {
        let analyzer = TextAnalyzer::new();
        let result = analyzer.analyze("");
        assert_eq!(result, TextAnalysisResult::empty());
        assert_eq!(result.sentiment.label, SentimentLabel::Neutral);
        assert_eq!(analyzer.analyze("  \n\t ").word_count, 0);
    }

    #[test]
    fn test_counts_and_readability() {
        let analyzer = TextAnalyzer::new();
        let result = analyzer.analyze("The cat sat on the mat. It was happy!");
        assert_eq!(result.word_count, 9);
        assert_eq!(result.sentence_count, 2);
        // 100 - 1.5 * 4.5
        assert!((result.readability - 93.25).abs() < 1e-9);
    }

    #[test]
    fn test_readability_clamped() {
        assert_eq!(readability(0, 0), 0.0);
        assert_eq!(readability(200, 1), 0.0);
        assert_eq!(readability(2, 0), 0.0);
        // A sentence without word tokens reads trivially
        assert_eq!(readability(0, 1), 100.0);
    }

    #[test]
    fn test_sentiment_thresholds() {
        assert_eq!(SentimentLabel::from_score(0.21), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_score(0.2), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(-0.2), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(-0.21), SentimentLabel::Negative);
    }

    #[test]
    fn test_flatten_keeps_fields() {
        let analyzer = TextAnalyzer::new();
        let result = analyzer.analyze("Wonderful photosynthesis. Photosynthesis is great!");
        let flat = result.clone().flatten();
        assert_eq!(flat.word_count, result.word_count);
        assert_eq!(flat.sentiment, result.sentiment.label.as_str());
        assert_eq!(flat.keywords, result.keywords);
        assert_eq!(flat.keywords[0].word, "photosynthesis");
    }

    #[test]
    fn test_keyword_limit_respected() {
        let analyzer = TextAnalyzer::with_keyword_limit(2);
        let kws = analyzer.keywords("alpha bravo charlie delta echo foxtrot golf hotel");
        assert!(kws.len() <= 2);
    }
}
