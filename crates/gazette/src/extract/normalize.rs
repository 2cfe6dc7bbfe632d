//! OCR noise cleanup applied to free text before language detection.

use std::sync::OnceLock;

use regex::Regex;

/// Runs of three or more glyphs that are neither word characters, whitespace,
/// commas nor periods. Tesseract emits these for stamps, rules and scan specks.
fn noise_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^\w\s,.]{3,}").expect("valid noise regex"))
}

fn whitespace_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s{2,}").expect("valid whitespace regex"))
}

/// Strips noise glyph runs, collapses whitespace runs to one space and trims.
///
/// A legitimate three-character punctuation run such as `"!!!"` is removed as
/// well; the threshold is deliberately literal.
pub fn normalize(text: &str) -> String {
    let without_noise = noise_pattern().replace_all(text, "");
    let collapsed = whitespace_pattern().replace_all(&without_noise, " ");
    collapsed.trim().to_string()
}
