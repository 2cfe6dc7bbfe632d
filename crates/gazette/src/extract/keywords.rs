//! Literal label matching for the three extracted fields and key-term tagging.

use crate::config::schema::{ExtractionConfig, IdentifierOverride};

/// Which field a line carries. Checked in declaration order; the first hit
/// wins so a line feeds at most one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineMatch<'a> {
    Override(&'a str),
    CompanyName,
    CompanyIdentifier,
    DocumentPurpose,
}

#[derive(Debug, Clone)]
pub struct KeywordSet {
    overrides: Vec<IdentifierOverride>,
    /// Stored lowercased; compared with the lowercased line.
    company_name: Vec<String>,
    company_identifier: Vec<String>,
    document_purpose: Vec<String>,
}

impl KeywordSet {
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            overrides: config.overrides.clone(),
            company_name: config
                .keywords
                .company_name
                .iter()
                .map(|k| k.to_lowercase())
                .collect(),
            company_identifier: config.keywords.company_identifier.clone(),
            document_purpose: config.keywords.document_purpose.clone(),
        }
    }

    /// `line` is the stripped line, `lowered` its lowercase form.
    pub fn classify<'a>(&'a self, line: &str, lowered: &str) -> Option<LineMatch<'a>> {
        if let Some(rule) = self.overrides.iter().find(|o| line.contains(&o.contains)) {
            return Some(LineMatch::Override(&rule.identifier));
        }

        if contains_any(lowered, &self.company_name) {
            Some(LineMatch::CompanyName)
        } else if contains_any(line, &self.company_identifier) {
            Some(LineMatch::CompanyIdentifier)
        } else if contains_any(line, &self.document_purpose) {
            Some(LineMatch::DocumentPurpose)
        } else {
            None
        }
    }
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle.as_str()))
}

/// Domain vocabulary seen anywhere in a document, unique, in first-seen order.
#[derive(Debug, Clone)]
pub struct KeyTermCollector {
    vocabulary: Vec<String>,
    found: Vec<String>,
}

impl KeyTermCollector {
    pub fn new(vocabulary: &[String]) -> Self {
        Self {
            vocabulary: vocabulary.iter().map(|t| t.to_lowercase()).collect(),
            found: Vec::new(),
        }
    }

    /// Records every vocabulary term occurring in `lowered`, scanning the
    /// vocabulary in its configured order.
    pub fn scan(&mut self, lowered: &str) {
        for term in &self.vocabulary {
            if lowered.contains(term.as_str()) && !self.found.contains(term) {
                self.found.push(term.clone());
            }
        }
    }

    pub fn terms(&self) -> &[String] {
        &self.found
    }

    pub fn into_terms(self) -> Vec<String> {
        self.found
    }
}
