use std::path::Path;

use crate::config::schema::{Config, CONFIG_VERSION};
use crate::error::ConfigError;

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_config_from_str(&content)
}

pub fn load_config_from_str(content: &str) -> Result<Config, ConfigError> {
    let config: Config = serde_json::from_str(content)?;

    validate_config(&config)?;

    Ok(config)
}

pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.version != CONFIG_VERSION {
        return Err(ConfigError::Validation {
            message: format!("Unsupported config version: {}", config.version),
        });
    }

    if config.ocr.dpi == 0 {
        return Err(ConfigError::Validation {
            message: "OCR dpi must be greater than 0".to_string(),
        });
    }

    if config.workers == 0 {
        return Err(ConfigError::Validation {
            message: "workers must be greater than 0".to_string(),
        });
    }

    let extraction = &config.extraction;
    validate_keywords("company_name", &extraction.keywords.company_name)?;
    validate_keywords("company_identifier", &extraction.keywords.company_identifier)?;
    validate_keywords("document_purpose", &extraction.keywords.document_purpose)?;

    if extraction.key_terms.iter().any(|t| t.trim().is_empty()) {
        return Err(ConfigError::InvalidKeywords {
            field: "key_terms".to_string(),
            reason: "Key terms must not be blank".to_string(),
        });
    }

    for (index, rule) in extraction.overrides.iter().enumerate() {
        if rule.contains.is_empty() {
            return Err(ConfigError::Validation {
                message: format!("Override #{} has an empty 'contains' pattern", index),
            });
        }
    }

    Ok(())
}

fn validate_keywords(field: &str, keywords: &[String]) -> Result<(), ConfigError> {
    if keywords.is_empty() {
        return Err(ConfigError::InvalidKeywords {
            field: field.to_string(),
            reason: "At least one keyword variant is required".to_string(),
        });
    }

    if keywords.iter().any(|k| k.trim().is_empty()) {
        return Err(ConfigError::InvalidKeywords {
            field: field.to_string(),
            reason: "Keyword variants must not be blank".to_string(),
        });
    }

    Ok(())
}
