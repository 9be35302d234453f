//! # Rating Mapper
//! Deterministic mapping from `(distribution, label)` to a 1–5 star score.
//! No I/O, suitable for unit tests and offline evaluation.

use metrics::counter;
use tracing::warn;

use crate::sentiment::Probabilities;

/// Confidence above which a polar label earns the extreme rating.
/// Strict comparison: 0.90 exactly stays at the moderate rating.
const EXTREME_CONFIDENCE: f64 = 0.90;

/// Map a classification to stars. First match wins:
///
/// * `NEU` → 3
/// * `POS` → 5 when `positive > 0.90`, else 4
/// * `NEG` → 1 when `negative > 0.90`, else 2
/// * anything else → 3
///
/// An unrecognized label is not an error: upstream models occasionally drift
/// from their label contract, and the service answers neutrally rather than
/// failing the request. The fallback is observable via a warn log and the
/// `sentiment_label_fallback_total` counter.
pub fn map_to_stars(probabilities: &Probabilities, label: &str) -> u8 {
    match label {
        "NEU" => 3,
        "POS" => {
            if probabilities.positive > EXTREME_CONFIDENCE {
                5
            } else {
                4
            }
        }
        "NEG" => {
            if probabilities.negative > EXTREME_CONFIDENCE {
                1
            } else {
                2
            }
        }
        other => {
            warn!(label = other, "unrecognized sentiment label, rating neutral");
            counter!("sentiment_label_fallback_total").increment(1);
            3
        }
    }
}
