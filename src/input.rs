// Loading scoring requests from JSON files.

use std::path::Path;

use anyhow::{Context, Result};

use crate::models::ScoringRequest;

/// Read and parse one `{prompt, responses}` request file.
pub fn load_request(path: &Path) -> Result<ScoringRequest> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read request file {}", path.display()))?;
    parse_request(&raw).with_context(|| format!("Invalid request file {}", path.display()))
}

pub fn parse_request(raw: &str) -> Result<ScoringRequest> {
    let request: ScoringRequest = serde_json::from_str(raw)?;
    if request.prompt.trim().is_empty() {
        anyhow::bail!("Request has an empty prompt — nothing to score responses against");
    }
    Ok(request)
}
