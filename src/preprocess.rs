//! # Review Preprocessor
//! Canonicalizes raw review text before classification: HTML entities are
//! decoded, mentions and URLs collapse to fixed tokens, hashtags unfold into
//! words, emoji become a text token, stretched characters and laughter are
//! shortened, and whitespace is collapsed.
//!
//! Pure string-to-string; the same input always yields the same output.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Replacement token for user mentions.
const USER_TOKEN: &str = "@usuario";
/// Replacement token for URLs.
const URL_TOKEN: &str = "url";
/// Replacement token for emoji.
const EMOJI_TOKEN: &str = "emoji";
/// Maximum run length for a repeated character ("buenooooo" -> "buenooo").
const MAX_CHAR_RUN: usize = 3;

static RE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bhttps?://\S+|\bwww\.\S+").expect("url regex"));
static RE_MENTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"@\w+").expect("mention regex"));
static RE_HASHTAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"#(\w+)").expect("hashtag regex"));
// Spanish "jajaja"/"jejeje" and English "hahaha" in any stretched form.
static RE_LAUGH_ES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bj+[aeiou](?:j+[aeiou])+j*\b").expect("laughter regex"));
static RE_LAUGH_EN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bh+a(?:h+a)+h*\b").expect("laughter regex"));

/// Normalize a raw review into the canonical form fed to the classifier.
pub fn normalize(text: &str) -> String {
    let decoded = html_escape::decode_html_entities(text);

    let step = RE_URL.replace_all(&decoded, URL_TOKEN);
    let step = RE_MENTION.replace_all(&step, USER_TOKEN);
    let step = RE_HASHTAG.replace_all(&step, |caps: &Captures<'_>| unfold_hashtag(&caps[1]));

    let step = replace_emoji(&step);
    let step = shorten_runs(&step, MAX_CHAR_RUN);
    let step = RE_LAUGH_ES.replace_all(&step, "jaja");
    let step = RE_LAUGH_EN.replace_all(&step, "haha");

    // Collapse all whitespace (tokens above may have introduced doubles).
    step.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `#MuyBuenProducto` -> `muy buen producto`, `#envio_rapido` -> `envio rapido`.
fn unfold_hashtag(body: &str) -> String {
    let mut out = String::with_capacity(body.len() + 4);
    let mut prev_lower = false;
    for ch in body.chars() {
        if ch == '_' {
            out.push(' ');
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower {
            out.push(' ');
        }
        out.extend(ch.to_lowercase());
        prev_lower = ch.is_lowercase() || ch.is_numeric();
    }
    out
}

/// Swap emoji scalars for the text token; drop joiners and variation
/// selectors so `👍🏽`-style sequences produce a single token.
fn replace_emoji(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match u32::from(ch) {
            // ZWJ, variation selectors, skin-tone modifiers
            0x200D | 0xFE0E | 0xFE0F | 0x1F3FB..=0x1F3FF => {}
            0x1F000..=0x1FAFF | 0x2600..=0x27BF | 0x2B00..=0x2BFF => {
                out.push(' ');
                out.push_str(EMOJI_TOKEN);
                out.push(' ');
            }
            _ => out.push(ch),
        }
    }
    out
}

/// Cap repeated-character runs at `max` ("holaaaaa" -> "holaaa").
fn shorten_runs(text: &str, max: usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last: Option<char> = None;
    let mut run = 0usize;
    for ch in text.chars() {
        if Some(ch) == last {
            run += 1;
        } else {
            last = Some(ch);
            run = 1;
        }
        if run <= max {
            out.push(ch);
        }
    }
    out
}
