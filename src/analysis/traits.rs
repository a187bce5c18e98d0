// Topic extractor trait — swap-ready abstraction.
//
// Topic membership depends on how entities and salient nouns are detected.
// The default implementation is a heuristic; a real grammatical tagger can be
// dropped in behind this trait without touching the analyzer.

/// Maximum number of topics reported for one text.
pub const MAX_TOPICS: usize = 10;

/// Trait for extracting topic labels from a single text.
pub trait TopicExtractor: Send + Sync {
    /// Return at most `MAX_TOPICS` distinct topic labels. Never fails; an
    /// empty text yields an empty list.
    fn extract(&self, text: &str) -> Vec<String>;
}
