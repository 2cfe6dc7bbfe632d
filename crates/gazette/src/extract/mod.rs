//! Text-to-record extraction: normalization, field scanning, summarization.

pub mod capture;
pub mod fields;
pub mod keywords;
pub mod language;
pub mod normalize;
pub mod record;
pub mod segment;
pub mod summary;

pub use capture::{CaptureState, DetailsCapture};
pub use fields::{FieldExtractor, FieldScan};
pub use keywords::{KeyTermCollector, KeywordSet, LineMatch};
pub use language::{DetectionError, LanguageDetector, WhatlangDetector};
pub use normalize::normalize;
pub use record::{DocumentRecord, ErrorRecord, ExtractionRecord};
pub use segment::{SentenceSegmenter, UnicodeSentences};
pub use summary::{Summarizer, LANGUAGE_DETECTION_FAILED, SUMMARY_SENTENCES, UNEXPECTED_LANGUAGE};
