use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DetectionError {
    #[error("No language could be detected")]
    Undetermined,
}

/// Statistical language identification.
///
/// Implementations return a lowercase ISO-639-1 code where one exists.
pub trait LanguageDetector: Send + Sync {
    fn detect(&self, text: &str) -> Result<String, DetectionError>;
}

/// Trigram-based detection backed by `whatlang`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhatlangDetector;

impl WhatlangDetector {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> Result<String, DetectionError> {
        let info = whatlang::detect(text).ok_or(DetectionError::Undetermined)?;
        Ok(iso_639_1(info.lang()).to_string())
    }
}

/// whatlang reports ISO-639-3; the gazette languages and their neighbours
/// are mapped down to two letters, anything else keeps its three-letter code.
fn iso_639_1(lang: whatlang::Lang) -> &'static str {
    use whatlang::Lang;

    match lang {
        Lang::Eng => "en",
        Lang::Fra => "fr",
        Lang::Nld => "nl",
        Lang::Deu => "de",
        Lang::Spa => "es",
        Lang::Ita => "it",
        Lang::Por => "pt",
        Lang::Dan => "da",
        Lang::Swe => "sv",
        Lang::Pol => "pl",
        other => other.code(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_english() {
        let detector = WhatlangDetector::new();
        let text = "The general meeting of shareholders has decided to appoint a new director \
                    of the company with immediate effect for a period of six years.";
        assert_eq!(detector.detect(text).unwrap(), "en");
    }

    #[test]
    fn test_detects_french() {
        let detector = WhatlangDetector::new();
        let text = "L'assemblée générale des actionnaires a décidé de nommer un nouvel \
                    administrateur de la société avec effet immédiat pour une durée de six ans.";
        assert_eq!(detector.detect(text).unwrap(), "fr");
    }

    #[test]
    fn test_detects_spanish_as_two_letter_code() {
        let detector = WhatlangDetector::new();
        let text = "La junta general de accionistas ha decidido nombrar a un nuevo \
                    administrador de la sociedad con efecto inmediato durante seis años.";
        assert_eq!(detector.detect(text).unwrap(), "es");
    }

    #[test]
    fn test_undetermined_on_degenerate_input() {
        let detector = WhatlangDetector::new();
        assert_eq!(detector.detect(""), Err(DetectionError::Undetermined));
        assert_eq!(detector.detect("12345 678"), Err(DetectionError::Undetermined));
    }
}
