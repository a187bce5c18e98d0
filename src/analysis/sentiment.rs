// Lexicon sentiment scoring.
//
// Each raw token is looked up in an AFINN-style valence table (-5..=5). A token
// that misses is retried by its stem, so "loved" and "loving" hit "love". The
// summed valence is divided by the token count and clamped to [-1, 1].

use std::collections::HashMap;

use super::tokenize::Tokenizer;

/// Scores above this are positive, below its negation negative.
pub const SENTIMENT_THRESHOLD: f64 = 0.2;

const VALENCE: &[(&str, i8)] = &[
    ("abandon", -2), ("abuse", -3), ("accept", 1), ("accurate", 2), ("admire", 3),
    ("afraid", -2), ("agree", 1), ("alarm", -2), ("amazing", 4), ("anger", -3),
    ("angry", -3), ("annoy", -2), ("anxious", -2), ("appreciate", 2), ("awesome", 4),
    ("awful", -3), ("bad", -3), ("beautiful", 3), ("benefit", 2), ("best", 3),
    ("better", 2), ("bless", 2), ("boring", -3), ("brilliant", 4), ("broken", -1),
    ("calm", 2), ("care", 2), ("catastrophic", -4), ("celebrate", 3), ("challenge", -1),
    ("cheer", 2), ("clean", 2), ("clear", 1), ("comfort", 2), ("confuse", -2),
    ("cool", 1), ("crash", -2), ("crisis", -3), ("cruel", -3), ("damage", -3),
    ("danger", -2), ("dead", -3), ("defeat", -2), ("delight", 3), ("deny", -2),
    ("depress", -2), ("destroy", -3), ("difficult", -1), ("disappoint", -2), ("disaster", -2),
    ("dislike", -2), ("easy", 1), ("effective", 2), ("efficient", 2), ("elegant", 2),
    ("enjoy", 2), ("error", -2), ("excellent", 3), ("excite", 3), ("fail", -2),
    ("failure", -2), ("fair", 2), ("fantastic", 4), ("fear", -2), ("fine", 2),
    ("flaw", -2), ("fool", -2), ("fortunate", 2), ("free", 1), ("friend", 1),
    ("fun", 4), ("glad", 3), ("good", 3), ("great", 3), ("grief", -2),
    ("happy", 3), ("harm", -2), ("hate", -3), ("healthy", 2), ("help", 2),
    ("helpful", 2), ("hope", 2), ("horrible", -3), ("hurt", -2), ("ideal", 2),
    ("ignore", -1), ("ill", -2), ("impress", 3), ("improve", 2), ("incorrect", -2),
    ("inspire", 2), ("interest", 2), ("joy", 3), ("kill", -3), ("kind", 2),
    ("lack", -2), ("lie", -2), ("like", 2), ("lose", -3), ("loss", -3),
    ("love", 3), ("lucky", 3), ("mess", -2), ("miss", -2), ("mistake", -2),
    ("nice", 3), ("outstanding", 5), ("pain", -2), ("panic", -3), ("perfect", 3),
    ("pleasant", 3), ("please", 1), ("poor", -2), ("positive", 2), ("powerful", 2),
    ("praise", 3), ("problem", -2), ("progress", 2), ("protect", 1), ("proud", 2),
    ("reliable", 2), ("relief", 1), ("risk", -2), ("robust", 2), ("sad", -2),
    ("safe", 1), ("satisfy", 2), ("scary", -2), ("secure", 2), ("smart", 1),
    ("sorry", -1), ("strong", 2), ("stupid", -2), ("succeed", 3), ("success", 2),
    ("suffer", -2), ("superb", 5), ("support", 2), ("terrible", -3), ("thank", 2),
    ("threat", -2), ("trouble", -2), ("trust", 1), ("ugly", -3), ("unfair", -2),
    ("unhappy", -2), ("useful", 2), ("useless", -2), ("valuable", 2), ("violent", -3),
    ("warm", 1), ("weak", -2), ("welcome", 2), ("win", 4), ("wonderful", 4),
    ("worry", -3), ("worse", -3), ("worst", -3), ("wrong", -2), ("yes", 1),
];

/// Valence lookup table, keyed by the word and by its stem.
pub struct Lexicon {
    words: HashMap<&'static str, i8>,
    stems: HashMap<String, i8>,
}

impl Lexicon {
    pub fn new(tokenizer: &Tokenizer) -> Self {
        let words: HashMap<&'static str, i8> = VALENCE.iter().copied().collect();
        let stems = VALENCE
            .iter()
            .map(|(word, valence)| (tokenizer.stem(word), *valence))
            .collect();
        Self { words, stems }
    }

    pub fn valence(&self, token: &str, tokenizer: &Tokenizer) -> Option<i8> {
        self.words
            .get(token)
            .copied()
            .or_else(|| self.stems.get(&tokenizer.stem(token)).copied())
    }

    /// Mean valence per token, clamped to [-1, 1]. 0 for an empty token list.
    pub fn score(&self, tokens: &[String], tokenizer: &Tokenizer) -> f64 {
        if tokens.is_empty() {
            return 0.0;
        }
        let total: f64 = tokens
            .iter()
            .filter_map(|t| self.valence(t, tokenizer))
            .map(f64::from)
            .sum();
        (total / tokens.len() as f64).clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::tokenize::raw_tokens;

    #[test]
    fn test_positive_and_negative_words() {
        let tok = Tokenizer::new();
        let lex = Lexicon::new(&tok);
        assert!(lex.score(&raw_tokens("this is wonderful and great"), &tok) > 0.2);
        assert!(lex.score(&raw_tokens("this is terrible and awful"), &tok) < -0.2);
        assert_eq!(lex.score(&raw_tokens("the table has four legs"), &tok), 0.0);
    }

    #[test]
    fn test_stem_fallback() {
        let tok = Tokenizer::new();
        let lex = Lexicon::new(&tok);
        assert_eq!(lex.valence("loved", &tok), Some(3));
        assert_eq!(lex.valence("zzzz", &tok), None);
    }

    #[test]
    fn test_score_is_clamped() {
        let tok = Tokenizer::new();
        let lex = Lexicon::new(&tok);
        assert_eq!(lex.score(&raw_tokens("outstanding superb"), &tok), 1.0);
        assert_eq!(lex.score(&[], &tok), 0.0);
    }
}
