// promptrank: reproducible ranking of AI responses to a shared prompt
//
// This is the library root. `analysis` turns text into tokens, keywords,
// sentiment, topics and TF-IDF similarity; `scoring` builds relevance, overlap,
// speed and composite scores on top of it.

pub mod analysis;
pub mod config;
pub mod input;
pub mod models;
pub mod output;
pub mod scoring;
