// Heuristic topic extraction.
//
// Topics are the union of two signals, deduplicated in first-seen order and
// capped at MAX_TOPICS:
// 1. Entity-like spans: runs of capitalized words ("European Union", "Mistral",
//    "GDPR"). A single capitalized word opening a sentence is skipped unless it
//    is an acronym, since that is usually just sentence case.
// 2. Salient common words: the top 5 terms by TF-IDF, treating each sentence as
//    a document. Ties fall back to frequency, then first occurrence.

use std::collections::{HashMap, HashSet};

use keyword_extraction::tf_idf::{TfIdf, TfIdfParams};
use tracing::debug;

use super::tokenize::{raw_tokens, sentences, Tokenizer};
use super::traits::{TopicExtractor, MAX_TOPICS};

/// How many salient common words are merged into the topic list.
const SALIENT_WORDS: usize = 5;

pub struct HeuristicTopicExtractor {
    stop_words: Vec<String>,
    stop_set: HashSet<String>,
}

impl HeuristicTopicExtractor {
    pub fn new(tokenizer: &Tokenizer) -> Self {
        let stop_words = tokenizer.stop_word_list();
        let stop_set = stop_words.iter().cloned().collect();
        Self {
            stop_words,
            stop_set,
        }
    }

    fn is_stop_word(&self, word: &str) -> bool {
        self.stop_set.contains(&word.to_lowercase())
    }

    /// Capitalized spans that look like names of people, places or organizations.
    pub fn entities(&self, text: &str) -> Vec<String> {
        let mut found = Vec::new();

        for sentence in sentences(text) {
            let mut run: Vec<&str> = Vec::new();
            let mut run_start = 0;

            for (position, raw) in sentence.split_whitespace().enumerate() {
                let word = raw.trim_matches(|c: char| !c.is_alphanumeric());
                let capitalized = word.chars().next().is_some_and(|c| c.is_uppercase());

                if capitalized {
                    if run.is_empty() {
                        run_start = position;
                    }
                    run.push(word);
                } else {
                    self.flush_run(&mut run, run_start, &mut found);
                }

                // Punctuation after a word ends the span ("Paris, London")
                if raw.ends_with(|c: char| !c.is_alphanumeric()) {
                    self.flush_run(&mut run, run_start, &mut found);
                }
            }
            self.flush_run(&mut run, run_start, &mut found);
        }

        found
    }

    fn flush_run(&self, run: &mut Vec<&str>, run_start: usize, found: &mut Vec<String>) {
        if run.is_empty() {
            return;
        }

        let mut start = run_start;
        let mut words: &[&str] = run;
        while let Some((first, rest)) = words.split_first() {
            if self.is_stop_word(first) {
                words = rest;
                start += 1;
            } else {
                break;
            }
        }

        let sentence_case = start == 0 && words.len() == 1 && !is_acronym(words[0]);
        if !words.is_empty() && !sentence_case {
            found.push(words.join(" "));
        }
        run.clear();
    }

    /// Top common words by TF-IDF across the text's sentences.
    pub fn salient_words(&self, text: &str, n: usize) -> Vec<String> {
        let tokens = raw_tokens(text);
        let mut first_seen: HashMap<&str, usize> = HashMap::new();
        let mut frequency: HashMap<&str, usize> = HashMap::new();
        for (i, token) in tokens.iter().enumerate() {
            let eligible = token.len() > 3
                && token.bytes().all(|b| b.is_ascii_lowercase())
                && !self.stop_set.contains(token);
            if eligible {
                first_seen.entry(token.as_str()).or_insert(i);
                *frequency.entry(token.as_str()).or_insert(0) += 1;
            }
        }
        if first_seen.is_empty() {
            return Vec::new();
        }

        let documents: Vec<String> = sentences(text).into_iter().map(String::from).collect();
        let params = TfIdfParams::UnprocessedDocuments(&documents, &self.stop_words, None);
        let tfidf = TfIdf::new(params);
        let scores: HashMap<String, f32> = tfidf
            .get_ranked_word_scores(first_seen.len())
            .into_iter()
            .collect();

        let mut candidates: Vec<(&str, f32, usize, usize)> = first_seen
            .iter()
            .map(|(&word, &pos)| {
                let score = scores.get(word).copied().unwrap_or(0.0);
                (word, score, frequency[word], pos)
            })
            .collect();

        // Deterministic order: score, then frequency, then first occurrence
        candidates.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(b.2.cmp(&a.2))
                .then(a.3.cmp(&b.3))
        });

        candidates
            .into_iter()
            .take(n)
            .map(|(word, ..)| word.to_string())
            .collect()
    }
}

fn is_acronym(word: &str) -> bool {
    word.chars().count() >= 2 && word.chars().all(|c| c.is_uppercase() || c.is_ascii_digit())
}

impl TopicExtractor for HeuristicTopicExtractor {
    fn extract(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let entities = self.entities(text);
        let salient = self.salient_words(text, SALIENT_WORDS);
        debug!(
            entities = entities.len(),
            salient = salient.len(),
            "Extracted topic candidates"
        );

        let mut seen = HashSet::new();
        entities
            .into_iter()
            .chain(salient)
            .filter(|topic| seen.insert(topic.clone()))
            .take(MAX_TOPICS)
            .collect()
    }
}
