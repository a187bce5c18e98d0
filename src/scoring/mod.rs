// Scoring — per-response metrics, the composite blend and the comparative summary.

pub mod composite;
pub mod engine;
pub mod relevance;
pub mod rouge;
pub mod speed;
pub mod summary;

pub use engine::ScoringEngine;
