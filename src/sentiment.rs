//! # Sentiment Primitives
//! Label tags, the three-class probability record, and the `Classifier`
//! capability trait the rest of the service is wired against.
//!
//! The classifier carries its label as the raw wire tag (`"POS"`, `"NEG"`,
//! `"NEU"`) rather than the enum so that an out-of-contract label from an
//! upstream model flows through unchanged and hits the documented neutral
//! fallback instead of a parse error.

use anyhow::Result;
use async_trait::async_trait;

/// The three sentiment classes a review can be assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Wire tag used in responses and by the rating mapper.
    pub const fn tag(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "POS",
            SentimentLabel::Negative => "NEG",
            SentimentLabel::Neutral => "NEU",
        }
    }

    /// Parse a wire tag. Unknown tags return `None`; callers decide whether
    /// that is an error or a fallback.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "POS" => Some(SentimentLabel::Positive),
            "NEG" => Some(SentimentLabel::Negative),
            "NEU" => Some(SentimentLabel::Neutral),
            _ => None,
        }
    }
}

/// Classifier confidence across the three labels.
///
/// All fields are always present; an entry a model failed to produce is
/// simply 0.0. For classifier output the values are non-negative and sum to
/// ~1.0 (floating-point drift tolerated).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Probabilities {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

impl Probabilities {
    /// Probability for a wire tag; unknown tags read as 0.0.
    pub fn for_tag(&self, tag: &str) -> f64 {
        match tag {
            "POS" => self.positive,
            "NEG" => self.negative,
            "NEU" => self.neutral,
            _ => 0.0,
        }
    }

    pub fn sum(&self) -> f64 {
        self.positive + self.negative + self.neutral
    }
}

/// One classified text: the winning label tag plus the full distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: String,
    pub probabilities: Probabilities,
}

/// Capability interface for the sentiment model.
///
/// The concrete model is opaque to the service core; production wires
/// [`crate::lexicon::LexiconClassifier`], tests inject lightweight stubs.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify already-normalized text into a label + distribution.
    async fn classify(&self, text: &str) -> Result<Classification>;

    /// Model name for diagnostics.
    fn name(&self) -> &'static str;
}

/// Returns a canned classification regardless of input. Used by tests and by
/// `SENTIMENT_TEST_MODE=fixed` wiring.
#[derive(Debug, Clone)]
pub struct FixedClassifier {
    pub fixed: Classification,
}

impl FixedClassifier {
    pub fn new(fixed: Classification) -> Self {
        Self { fixed }
    }

    /// Neutral canned result for smoke runs without a real model.
    pub fn neutral() -> Self {
        Self::new(Classification {
            label: SentimentLabel::Neutral.tag().to_string(),
            probabilities: Probabilities {
                positive: 0.05,
                negative: 0.05,
                neutral: 0.90,
            },
        })
    }
}

#[async_trait]
impl Classifier for FixedClassifier {
    async fn classify(&self, _text: &str) -> Result<Classification> {
        Ok(self.fixed.clone())
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}
