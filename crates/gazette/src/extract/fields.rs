//! Line-oriented field extraction over recognized gazette text.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::config::schema::ExtractionConfig;

use super::capture::DetailsCapture;
use super::keywords::{KeyTermCollector, KeywordSet, LineMatch};
use super::record::ExtractionRecord;
use super::summary::Summarizer;

fn annotation_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[\(\{].*?[\)\}]").expect("valid annotation regex"))
}

fn edge_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^\w]+|[^\w]+$").expect("valid edge regex"))
}

fn digit_run_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d{3,}").expect("valid digit regex"))
}

/// State accumulated over one forward pass, before the purpose is augmented.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldScan {
    pub company_name: Option<String>,
    pub company_identifier: Option<String>,
    pub document_purpose: Option<String>,
    pub details: Vec<String>,
    pub key_terms: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct FieldExtractor {
    keywords: KeywordSet,
    key_terms: Vec<String>,
    summarizer: Summarizer,
}

impl FieldExtractor {
    pub fn new(config: &ExtractionConfig, summarizer: Summarizer) -> Self {
        Self {
            keywords: KeywordSet::from_config(config),
            key_terms: config.key_terms.clone(),
            summarizer,
        }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new(
            config,
            Summarizer::with_defaults(config.supported_languages.clone()),
        )
    }

    /// Single pass over the lines. Each field keeps the value from the last
    /// line that matched it.
    pub fn scan(&self, raw_text: &str) -> FieldScan {
        let mut scan = FieldScan::default();
        let mut capture = DetailsCapture::new();
        let mut terms = KeyTermCollector::new(&self.key_terms);

        for line in raw_text.split('\n').map(str::trim) {
            if line.is_empty() {
                capture.observe_blank();
                continue;
            }

            let lowered = line.to_lowercase();
            let matched = self.keywords.classify(line, &lowered);

            match &matched {
                Some(LineMatch::Override(identifier)) => {
                    debug!("Identifier override applied");
                    scan.company_identifier = Some((*identifier).to_string());
                }
                Some(LineMatch::CompanyName) => {
                    scan.company_name = Some(clean_company_name(line));
                    debug!(company_name = ?scan.company_name, "Company name line");
                }
                Some(LineMatch::CompanyIdentifier) => {
                    scan.company_identifier = extract_identifier(line);
                    debug!(company_identifier = ?scan.company_identifier, "Identifier line");
                }
                Some(LineMatch::DocumentPurpose) => {
                    scan.document_purpose = Some(extract_purpose(line));
                    debug!(document_purpose = ?scan.document_purpose, "Purpose line");
                }
                None => {}
            }

            terms.scan(&lowered);
            capture.observe(line, matches!(matched, Some(LineMatch::DocumentPurpose)));
        }

        debug!(
            details = capture.lines().len(),
            open = capture.state().is_capturing(),
            key_terms = terms.terms().len(),
            "Scan finished"
        );

        scan.details = capture.into_lines();
        scan.key_terms = terms.into_terms();
        scan
    }

    pub fn extract(&self, raw_text: &str) -> ExtractionRecord {
        let _span = tracing::info_span!("extract").entered();

        let scan = self.scan(raw_text);

        let document_purpose = scan.document_purpose.map(|purpose| {
            if purpose.is_empty() {
                return purpose;
            }
            let summary = self.summarizer.summarize(&scan.details);
            format!(
                "{} | Summary: {} | Key Terms: {}",
                purpose,
                summary,
                scan.key_terms.join(", ")
            )
        });

        ExtractionRecord {
            company_name: scan.company_name,
            company_identifier: scan.company_identifier,
            document_purpose,
        }
    }
}

/// Text after the last colon, trimmed.
fn last_segment(line: &str) -> &str {
    line.rsplit(':').next().unwrap_or(line).trim()
}

/// Drops `(...)`/`{...}` annotations and non-word characters at both ends.
/// A label with nothing left after cleaning yields `""`.
pub fn clean_company_name(line: &str) -> String {
    let without_annotations = annotation_pattern().replace_all(last_segment(line), "");
    let cleaned = edge_pattern().replace_all(without_annotations.trim(), "");
    cleaned.trim().to_string()
}

/// All digit runs of three or more, space-joined. `None` clears a prior value.
pub fn extract_identifier(line: &str) -> Option<String> {
    let numbers: Vec<&str> = digit_run_pattern()
        .find_iter(line)
        .map(|m| m.as_str())
        .collect();

    if numbers.is_empty() {
        None
    } else {
        Some(numbers.join(" "))
    }
}

/// First clause after the last colon, cut at `.`, `!` or `?`.
pub fn extract_purpose(line: &str) -> String {
    last_segment(line)
        .split(['.', '!', '?'])
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}
