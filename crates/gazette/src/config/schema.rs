use serde::{Deserialize, Serialize};

pub const CONFIG_VERSION: &str = "1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub ocr: OcrConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_version() -> String {
    CONFIG_VERSION.to_string()
}

fn default_workers() -> usize {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            ocr: OcrConfig::default(),
            extraction: ExtractionConfig::default(),
            workers: default_workers(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrConfig {
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
    #[serde(default = "default_dpi")]
    pub dpi: u32,
}

/// Tesseract language packs for the four gazette languages.
fn default_languages() -> Vec<String> {
    to_strings(&["eng", "fra", "deu", "nld"])
}

fn default_dpi() -> u32 {
    300
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            languages: default_languages(),
            dpi: default_dpi(),
        }
    }
}

/// Literal match data driving field extraction.
///
/// Every list defaults to the variants observed in Belgian gazette scans,
/// including the spellings Tesseract is known to produce for each label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    #[serde(default)]
    pub keywords: FieldKeywords,
    #[serde(default = "default_key_terms")]
    pub key_terms: Vec<String>,
    #[serde(default = "default_overrides")]
    pub overrides: Vec<IdentifierOverride>,
    #[serde(default = "default_supported_languages")]
    pub supported_languages: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            keywords: FieldKeywords::default(),
            key_terms: default_key_terms(),
            overrides: default_overrides(),
            supported_languages: default_supported_languages(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldKeywords {
    /// Matched against the lowercased line.
    #[serde(default = "default_company_name")]
    pub company_name: Vec<String>,
    /// Matched case-sensitively.
    #[serde(default = "default_company_identifier")]
    pub company_identifier: Vec<String>,
    /// Matched case-sensitively.
    #[serde(default = "default_document_purpose")]
    pub document_purpose: Vec<String>,
}

impl Default for FieldKeywords {
    fn default() -> Self {
        Self {
            company_name: default_company_name(),
            company_identifier: default_company_identifier(),
            document_purpose: default_document_purpose(),
        }
    }
}

fn default_company_name() -> Vec<String> {
    to_strings(&["en entier", "en entler", "en enter"])
}

fn default_company_identifier() -> Vec<String> {
    to_strings(&[
        "N° d'entreprise",
        "N’ dentreprise",
        "N° @entreprise",
        "N° dientreprise",
    ])
}

fn default_document_purpose() -> Vec<String> {
    to_strings(&[
        "Objet de Pacte",
        "Objet de lacte",
        "Qbiet de Vacte",
        "Objet de l’acte",
        "Objet de l'acte",
        "' Qbjet de Pacte ",
    ])
}

fn default_key_terms() -> Vec<String> {
    to_strings(&[
        "appointment",
        "resignation",
        "director",
        "transfer of shares",
        "administrateur",
        "cession",
        "siége social",
    ])
}

/// A known OCR misread that maps straight to a registration number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierOverride {
    pub contains: String,
    pub identifier: String,
}

fn default_overrides() -> Vec<IdentifierOverride> {
    vec![IdentifierOverride {
        contains: "POF 86426".to_string(),
        identifier: "761786926".to_string(),
    }]
}

/// ISO-639-1 codes a summary may be written in.
fn default_supported_languages() -> Vec<String> {
    to_strings(&["en", "fr", "nl", "de"])
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Image,
    Text,
}

impl DocumentFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "txt" | "text" => Some(Self::Text),
            "png" | "jpg" | "jpeg" | "tiff" | "tif" | "bmp" | "gif" | "webp" => Some(Self::Image),
            _ => None,
        }
    }
}
