//! # Lexicon Classifier
//! Weighted-lexicon sentiment model: per-word scores, a short negation
//! window, and a neutral prior normalized into a 3-class distribution.
//!
//! Stands in for a pretrained transformer behind the [`Classifier`] trait:
//! construction loads artifacts once and the instance is reused for the
//! process lifetime, so it carries the same lifecycle contract as a heavy
//! model would.

use std::collections::HashMap;
use std::fs;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, info};

use crate::config::ClassifierConfig;
use crate::sentiment::{Classification, Classifier, Probabilities, SentimentLabel};

/// Lexicon compiled into the binary; `SENTIMENT_MODEL_DIR` overrides it.
static EMBEDDED_LEXICON: &str = include_str!("../sentiment_lexicon.json");

/// Artifact file name looked up inside the model directory.
const LEXICON_FILE: &str = "sentiment_lexicon.json";

/// Unnormalized mass assigned to the neutral class. Keeps distributions off
/// the 0/1 extremes, makes texts with no lexicon hits classify neutral, and
/// stays small enough that a single weak lexicon hit still wins the argmax.
const NEUTRAL_PRIOR: f64 = 0.5;

#[derive(Debug)]
pub struct LexiconClassifier {
    lexicon: HashMap<String, i32>,
}

impl LexiconClassifier {
    /// Load the model. A configured-but-unreadable artifact directory is an
    /// initialization failure and propagates; only the absence of any
    /// configuration selects the embedded lexicon.
    pub fn from_config(config: &ClassifierConfig) -> Result<Self> {
        if let Some(threads) = config.num_threads {
            // Advisory only for this model; logged so operators can see the
            // knob was picked up.
            debug!(threads, "classifier thread hint set");
        }

        let lexicon: HashMap<String, i32> = match &config.model_dir {
            Some(dir) => {
                let path = dir.join(LEXICON_FILE);
                let raw = fs::read_to_string(&path)
                    .with_context(|| format!("reading lexicon from {}", path.display()))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("parsing lexicon from {}", path.display()))?
            }
            None => serde_json::from_str(EMBEDDED_LEXICON).expect("valid embedded lexicon"),
        };

        info!(entries = lexicon.len(), "sentiment lexicon loaded");
        Ok(Self { lexicon })
    }

    #[inline]
    fn word_score(&self, word: &str) -> i32 {
        *self.lexicon.get(word).unwrap_or(&0)
    }

    /// Score a normalized text into a distribution + winning label.
    ///
    /// Negation: a negator within the previous 1..=3 tokens flips the sign of
    /// a word's lexicon score. Positive and negative mass compete with the
    /// constant neutral prior; the label is the strict argmax, ties neutral.
    pub fn score_text(&self, text: &str) -> Classification {
        let tokens: Vec<String> = tokenize(text).collect();

        let mut positive_mass = 0.0f64;
        let mut negative_mass = 0.0f64;
        for i in 0..tokens.len() {
            let base = self.word_score(tokens[i].as_str());
            if base == 0 {
                continue;
            }
            let negated = (1..=3).any(|k| i >= k && is_negator(tokens[i - k].as_str()));
            let adjusted = if negated { -base } else { base };
            if adjusted > 0 {
                positive_mass += f64::from(adjusted);
            } else {
                negative_mass += f64::from(-adjusted);
            }
        }

        let total = positive_mass + negative_mass + NEUTRAL_PRIOR;
        let probabilities = Probabilities {
            positive: positive_mass / total,
            negative: negative_mass / total,
            neutral: NEUTRAL_PRIOR / total,
        };

        let label = if positive_mass > negative_mass.max(NEUTRAL_PRIOR) {
            SentimentLabel::Positive
        } else if negative_mass > positive_mass.max(NEUTRAL_PRIOR) {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        };

        Classification {
            label: label.tag().to_string(),
            probabilities,
        }
    }
}

#[async_trait]
impl Classifier for LexiconClassifier {
    async fn classify(&self, text: &str) -> Result<Classification> {
        Ok(self.score_text(text))
    }

    fn name(&self) -> &'static str {
        "lexicon"
    }
}

/// Alphanumeric tokens, lower-cased, vowel accents folded so the ASCII
/// lexicon matches accented Spanish ("rápido" -> "rapido").
fn tokenize(s: &str) -> impl Iterator<Item = String> + '_ {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.chars().flat_map(fold_char).collect::<String>())
}

fn fold_char(c: char) -> impl Iterator<Item = char> {
    let folded = match c {
        'á' | 'Á' => 'a',
        'é' | 'É' => 'e',
        'í' | 'Í' => 'i',
        'ó' | 'Ó' => 'o',
        'ú' | 'Ú' | 'ü' | 'Ü' => 'u',
        other => other,
    };
    folded.to_lowercase()
}

/// Small negator set; tokenization splits contractions, so "isn't" arrives
/// as "isn" + "t".
fn is_negator(token: &str) -> bool {
    matches!(
        token,
        "no" | "ni" | "nunca" | "jamas" | "sin" | "tampoco" | "not" | "never" | "without"
    )
}
