//! # Response Assembler
//! Builds the wire-level analysis payload. Pure transformation over inputs
//! the pipeline already validated; field names and decorative strings are
//! part of the public contract and compared byte-for-byte by consumers.

use serde::Serialize;

use crate::sentiment::Probabilities;

/// Decorative star glyph appended to the score display string.
const STAR_GLYPH: &str = "⭐";

/// Full analysis payload for one review.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentReport {
    pub review_data: ReviewData,
    pub sentiment_analysis: SentimentAnalysis,
    pub summary: Summary,
}

/// The review as received and as fed to the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewData {
    pub text_original: String,
    pub text_processed: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentAnalysis {
    pub label: String,
    pub score_1_to_5: u8,
    pub probabilities: PercentBreakdown,
}

/// Class probabilities on a 0–100 scale, rounded to 2 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PercentBreakdown {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub puntuacion_estrellas: String,
    pub polaridad_completa: PolarityFlags,
}

/// One-hot textual encoding of the winning label across the three fixed keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolarityFlags {
    #[serde(rename = "POS")]
    pub pos: String,
    #[serde(rename = "NEG")]
    pub neg: String,
    #[serde(rename = "NEU")]
    pub neu: String,
}

/// Assemble the response payload.
///
/// Texts and the label tag are copied verbatim; probabilities are scaled to
/// percentages. Rounding to 2 decimals is the only lossy step in the whole
/// pipeline.
pub fn build_report(
    original: &str,
    processed: &str,
    label: &str,
    probabilities: &Probabilities,
    stars: u8,
) -> SentimentReport {
    SentimentReport {
        review_data: ReviewData {
            text_original: original.to_string(),
            text_processed: processed.to_string(),
        },
        sentiment_analysis: SentimentAnalysis {
            label: label.to_string(),
            score_1_to_5: stars,
            probabilities: PercentBreakdown {
                positive: percent(probabilities.positive),
                negative: percent(probabilities.negative),
                neutral: percent(probabilities.neutral),
            },
        },
        summary: Summary {
            puntuacion_estrellas: format!("{stars}/5 {STAR_GLYPH}"),
            polaridad_completa: PolarityFlags {
                pos: polarity(label, "POS", "Positiva", "No Positiva"),
                neg: polarity(label, "NEG", "Negativa", "No Negativa"),
                neu: polarity(label, "NEU", "Neutral", "No Neutral"),
            },
        },
    }
}

/// `round(value * 100, 2)` on the 0–100 scale.
fn percent(value: f64) -> f64 {
    (value * 100.0 * 100.0).round() / 100.0
}

fn polarity(label: &str, key: &str, yes: &str, no: &str) -> String {
    if label == key { yes } else { no }.to_string()
}
