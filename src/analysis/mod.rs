// Text analysis — tokenization, keywords, sentiment, topics and TF-IDF similarity.

pub mod analyzer;
pub mod keywords;
pub mod sentiment;
pub mod tfidf;
pub mod tokenize;
pub mod topics;
pub mod traits;

pub use analyzer::{Sentiment, SentimentLabel, TextAnalysisResult, TextAnalyzer};
