//! Short leading excerpt of the lines captured after a purpose label.

use std::sync::Arc;

use tracing::debug;

use super::language::{LanguageDetector, WhatlangDetector};
use super::normalize::normalize;
use super::segment::{SentenceSegmenter, UnicodeSentences};

pub const LANGUAGE_DETECTION_FAILED: &str = "Text removed due to language detection failure.";
pub const UNEXPECTED_LANGUAGE: &str = "Text removed due to unexpected language.";

/// Fixed excerpt length, independent of input size.
pub const SUMMARY_SENTENCES: usize = 3;

#[derive(Clone)]
pub struct Summarizer {
    detector: Arc<dyn LanguageDetector>,
    segmenter: Arc<dyn SentenceSegmenter>,
    supported_languages: Vec<String>,
}

impl Summarizer {
    pub fn new(
        detector: Arc<dyn LanguageDetector>,
        segmenter: Arc<dyn SentenceSegmenter>,
        supported_languages: Vec<String>,
    ) -> Self {
        let supported_languages = supported_languages
            .into_iter()
            .map(|code| code.to_lowercase())
            .collect();

        Self {
            detector,
            segmenter,
            supported_languages,
        }
    }

    /// Production summarizer: whatlang detection and UAX #29 sentences.
    pub fn with_defaults(supported_languages: Vec<String>) -> Self {
        Self::new(
            Arc::new(WhatlangDetector::new()),
            Arc::new(UnicodeSentences::new()),
            supported_languages,
        )
    }

    pub fn summarize<S: AsRef<str>>(&self, detail_lines: &[S]) -> String {
        if detail_lines.is_empty() {
            return String::new();
        }

        let joined = detail_lines
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(" ");
        let text = normalize(&joined);

        let language = match self.detector.detect(&text) {
            Ok(code) => code,
            Err(e) => {
                debug!("Summary suppressed: {}", e);
                return LANGUAGE_DETECTION_FAILED.to_string();
            }
        };

        if !self.is_supported(&language) {
            debug!("Summary suppressed: detected language '{}'", language);
            return UNEXPECTED_LANGUAGE.to_string();
        }

        self.segmenter
            .split(&text)
            .into_iter()
            .take(SUMMARY_SENTENCES)
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn is_supported(&self, language: &str) -> bool {
        let language = language.to_lowercase();
        self.supported_languages.iter().any(|code| *code == language)
    }
}

impl std::fmt::Debug for Summarizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Summarizer")
            .field("supported_languages", &self.supported_languages)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::language::DetectionError;
    use std::sync::Mutex;

    struct FixedLanguage(Result<String, DetectionError>);

    impl LanguageDetector for FixedLanguage {
        fn detect(&self, _text: &str) -> Result<String, DetectionError> {
            self.0.clone()
        }
    }

    /// Records the text handed to it and splits on periods.
    #[derive(Default)]
    struct PeriodSplitter {
        seen: Mutex<Vec<String>>,
    }

    impl SentenceSegmenter for PeriodSplitter {
        fn split(&self, text: &str) -> Vec<String> {
            self.seen.lock().unwrap().push(text.to_string());
            text.split_inclusive('.')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        }
    }

    fn summarizer_with(language: Result<String, DetectionError>) -> Summarizer {
        Summarizer::new(
            Arc::new(FixedLanguage(language)),
            Arc::new(PeriodSplitter::default()),
            vec!["en".into(), "fr".into(), "nl".into(), "de".into()],
        )
    }

    #[test]
    fn test_empty_input_returns_empty_string() {
        let summarizer = summarizer_with(Err(DetectionError::Undetermined));
        let empty: [&str; 0] = [];
        assert_eq!(summarizer.summarize(&empty), "");
    }

    #[test]
    fn test_detection_failure_sentinel() {
        let summarizer = summarizer_with(Err(DetectionError::Undetermined));
        assert_eq!(summarizer.summarize(&["12 34"]), LANGUAGE_DETECTION_FAILED);
    }

    #[test]
    fn test_unexpected_language_sentinel() {
        let summarizer = summarizer_with(Ok("es".to_string()));
        assert_eq!(
            summarizer.summarize(&["La sociedad ha nombrado un administrador."]),
            UNEXPECTED_LANGUAGE
        );
    }

    #[test]
    fn test_language_codes_compare_case_insensitively() {
        let summarizer = summarizer_with(Ok("FR".to_string()));
        assert_eq!(summarizer.summarize(&["Une phrase."]), "Une phrase.");
    }

    #[test]
    fn test_caps_at_three_sentences() {
        let summarizer = summarizer_with(Ok("en".to_string()));
        let lines = ["One. Two.", "Three. Four.", "Five."];
        assert_eq!(summarizer.summarize(&lines), "One. Two. Three.");
    }

    #[test]
    fn test_fewer_than_three_sentences_returns_all() {
        let summarizer = summarizer_with(Ok("de".to_string()));
        assert_eq!(summarizer.summarize(&["Eins.", "Zwei."]), "Eins. Zwei.");
    }

    #[test]
    fn test_lines_are_joined_and_normalized_before_splitting() {
        let segmenter = Arc::new(PeriodSplitter::default());
        let summarizer = Summarizer::new(
            Arc::new(FixedLanguage(Ok("nl".to_string()))),
            segmenter.clone(),
            vec!["nl".to_string()],
        );

        summarizer.summarize(&["  De vennootschap ~~~~ ", "benoemt   een bestuurder."]);

        let seen = segmenter.seen.lock().unwrap();
        assert_eq!(seen.as_slice(), ["De vennootschap benoemt een bestuurder."]);
    }

    #[test]
    fn test_default_summarizer_on_real_english_text() {
        let summarizer = Summarizer::with_defaults(vec!["en".to_string()]);
        let lines = [
            "The shareholders resolved to appoint Mr John Doe as director.",
            "His mandate will expire after the general meeting of 2030.",
            "The board accepted the resignation of Mrs Jane Roe.",
            "The registered office remains unchanged.",
        ];

        let summary = summarizer.summarize(&lines);
        assert!(summary.starts_with("The shareholders resolved"));
        assert!(summary.ends_with("resignation of Mrs Jane Roe."));
        assert!(!summary.contains("registered office"));
    }
}
