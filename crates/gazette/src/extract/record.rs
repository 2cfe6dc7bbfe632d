use serde::{Deserialize, Serialize};

/// Facts extracted from one document. Absent fields serialize as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtractionRecord {
    #[serde(rename = "Company Name")]
    pub company_name: Option<String>,
    #[serde(rename = "Company Identifier")]
    pub company_identifier: Option<String>,
    #[serde(rename = "Document Purpose")]
    pub document_purpose: Option<String>,
}

/// Stands in for an [`ExtractionRecord`] when a document could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    #[serde(rename = "Error")]
    pub message: String,
    #[serde(rename = "File")]
    pub file: String,
}

/// One entry of the batch output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentRecord {
    Extracted(ExtractionRecord),
    Failed(ErrorRecord),
}

impl DocumentRecord {
    pub fn failed(message: impl Into<String>, file: impl Into<String>) -> Self {
        Self::Failed(ErrorRecord {
            message: message.into(),
            file: file.into(),
        })
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn as_extracted(&self) -> Option<&ExtractionRecord> {
        match self {
            Self::Extracted(record) => Some(record),
            Self::Failed(_) => None,
        }
    }

    pub fn as_error(&self) -> Option<&ErrorRecord> {
        match self {
            Self::Extracted(_) => None,
            Self::Failed(error) => Some(error),
        }
    }
}

impl From<ExtractionRecord> for DocumentRecord {
    fn from(record: ExtractionRecord) -> Self {
        Self::Extracted(record)
    }
}
