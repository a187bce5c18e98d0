use std::env;

use anyhow::{Context, Result};

use crate::analysis::keywords::DEFAULT_KEYWORD_LIMIT;

/// How reports are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Colored tables (default)
    Terminal,
    /// Pretty-printed JSON on stdout
    Json,
}

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded at startup via dotenvy. Composite weights are
/// fixed constants and deliberately absent here.
#[derive(Debug, Clone)]
pub struct Config {
    /// Keywords kept per analyzed text (PROMPTRANK_KEYWORD_LIMIT, default 10)
    pub keyword_limit: usize,
    /// Request files scored in parallel (PROMPTRANK_CONCURRENCY, default 4)
    pub concurrency: usize,
    /// Default output format (PROMPTRANK_OUTPUT, "terminal" or "json")
    pub output_format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keyword_limit: DEFAULT_KEYWORD_LIMIT,
            concurrency: 4,
            output_format: OutputFormat::Terminal,
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let keyword_limit = match lookup("PROMPTRANK_KEYWORD_LIMIT") {
            Some(v) => parse_positive("PROMPTRANK_KEYWORD_LIMIT", &v)?,
            None => defaults.keyword_limit,
        };

        let concurrency = match lookup("PROMPTRANK_CONCURRENCY") {
            Some(v) => parse_positive("PROMPTRANK_CONCURRENCY", &v)?,
            None => defaults.concurrency,
        };

        let output_format = match lookup("PROMPTRANK_OUTPUT").as_deref().map(str::trim) {
            None | Some("") | Some("terminal") => OutputFormat::Terminal,
            Some("json") => OutputFormat::Json,
            Some(other) => anyhow::bail!(
                "PROMPTRANK_OUTPUT must be \"terminal\" or \"json\", got \"{other}\""
            ),
        };

        Ok(Self {
            keyword_limit,
            concurrency,
            output_format,
        })
    }
}

fn parse_positive(key: &str, value: &str) -> Result<usize> {
    let parsed: usize = value
        .trim()
        .parse()
        .with_context(|| format!("{key} must be a positive integer, got \"{value}\""))?;
    if parsed == 0 {
        anyhow::bail!("{key} must be at least 1");
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.keyword_limit, 10);
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.output_format, OutputFormat::Terminal);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("PROMPTRANK_KEYWORD_LIMIT", "5"),
            ("PROMPTRANK_CONCURRENCY", " 8 "),
            ("PROMPTRANK_OUTPUT", "json"),
        ]))
        .unwrap();
        assert_eq!(config.keyword_limit, 5);
        assert_eq!(config.concurrency, 8);
        assert_eq!(config.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(Config::from_lookup(lookup_from(&[("PROMPTRANK_KEYWORD_LIMIT", "0")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("PROMPTRANK_CONCURRENCY", "many")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("PROMPTRANK_OUTPUT", "xml")])).is_err());
    }
}
