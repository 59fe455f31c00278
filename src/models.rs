//! Data models and structures
//!
//! Defines the wire shape returned by the classification model, the validated
//! diagnosis handed to callers, and configuration.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Quick identification tips, keyed by condition name.
pub const DISEASE_LIBRARY: &[(&str, &str)] = &[
    (
        "Northern Corn Leaf Blight",
        "Long gray-green lesions that turn tan; common in humid regions.",
    ),
    (
        "Gray Leaf Spot",
        "Rectangular lesions following leaf veins; favors warm, wet conditions.",
    ),
    (
        "Common Rust",
        "Orange-brown pustules on both leaf surfaces; easily visible.",
    ),
    (
        "Nutrient Deficiency",
        "Yellowing or spotting not caused by pathogen; soil test recommended.",
    ),
];

/// Condition reported by the model.
///
/// The model is asked for one of four labels but may answer with anything;
/// unknown labels are kept verbatim in [`DiseaseName::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DiseaseName {
    Healthy,
    CommonRust,
    NorthernCornLeafBlight,
    GrayLeafSpot,
    Other(String),
}

impl DiseaseName {
    pub fn from_label(label: &str) -> Self {
        let normalized = label
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        match normalized.as_str() {
            "healthy" => DiseaseName::Healthy,
            "common rust" => DiseaseName::CommonRust,
            "northern corn leaf blight" | "northern leaf blight" => {
                DiseaseName::NorthernCornLeafBlight
            }
            "gray leaf spot" | "grey leaf spot" => DiseaseName::GrayLeafSpot,
            _ => DiseaseName::Other(label.trim().to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            DiseaseName::Healthy => "Healthy",
            DiseaseName::CommonRust => "Common Rust",
            DiseaseName::NorthernCornLeafBlight => "Northern Corn Leaf Blight",
            DiseaseName::GrayLeafSpot => "Gray Leaf Spot",
            DiseaseName::Other(name) => name,
        }
    }

    /// Identification tip from [`DISEASE_LIBRARY`], if the condition is listed.
    pub fn id_tip(&self) -> Option<&'static str> {
        let label = self.label();
        DISEASE_LIBRARY
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(label))
            .map(|(_, tip)| *tip)
    }
}

impl fmt::Display for DiseaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for DiseaseName {
    fn from(label: String) -> Self {
        DiseaseName::from_label(&label)
    }
}

impl From<DiseaseName> for String {
    fn from(name: DiseaseName) -> Self {
        name.label().to_string()
    }
}

/// Structured payload as produced by the model.
///
/// Every field is optional here; [`crate::diagnosis::Diagnoser`] decides
/// whether the payload is a declined diagnosis, a valid one, or garbage.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisRecord {
    #[serde(default)]
    pub disease_name: Option<String>,
    #[serde(default)]
    pub is_healthy: Option<bool>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub causes: Option<Vec<String>>,
    #[serde(default)]
    pub treatment: Option<Vec<String>>,
    #[serde(default)]
    pub prevention: Option<Vec<String>>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A successful diagnosis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnosis {
    pub disease_name: DiseaseName,
    pub is_healthy: bool,
    pub description: String,
    pub causes: Vec<String>,
    pub treatment: Vec<String>,
    pub prevention: Vec<String>,
}

/// A titled list of advice lines worth showing for a diagnosis.
#[derive(Debug, Clone, PartialEq)]
pub struct AdviceSection<'a> {
    pub title: &'static str,
    pub items: &'a [String],
}

impl Diagnosis {
    /// Advice sections to display, in order, skipping empty ones.
    ///
    /// For a healthy plant, `prevention` is presented as care tips and the
    /// causes/treatment lists are never shown.
    pub fn sections(&self) -> Vec<AdviceSection<'_>> {
        let candidates: Vec<(&'static str, &[String])> = if self.is_healthy {
            vec![("Care Tips", self.prevention.as_slice())]
        } else {
            vec![
                ("Possible Causes", self.causes.as_slice()),
                ("Treatment", self.treatment.as_slice()),
                ("Prevention", self.prevention.as_slice()),
            ]
        };

        candidates
            .into_iter()
            .filter(|(_, items)| !items.is_empty())
            .map(|(title, items)| AdviceSection { title, items })
            .collect()
    }
}

/// Resolved credential for the classification endpoint.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let trimmed = key.trim();
        if trimmed.is_empty() {
            return Err(Error::Configuration(
                "API_KEY environment variable is not set".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(****)")
    }
}

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            api_key: first_non_blank([
                std::env::var("API_KEY").ok(),
                std::env::var("GEMINI_API_KEY").ok(),
            ]),
            model: std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            base_url: std::env::var("GEMINI_BASE_URL").ok(),
        }
    }

    /// Validate the configured credential.
    pub fn api_key(&self) -> Result<ApiKey> {
        ApiKey::new(self.api_key.clone().unwrap_or_default())
    }
}

/// First candidate that is set and not blank.
fn first_non_blank<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .find(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_blank_api_key_falls_back_to_gemini_key() {
        assert_eq!(
            first_non_blank([Some(String::new()), Some("real-key".to_string())]),
            Some("real-key".to_string())
        );
        assert_eq!(first_non_blank([Some("  ".to_string()), None]), None);
        assert_eq!(
            first_non_blank([Some("primary".to_string()), Some("other".to_string())]),
            Some("primary".to_string())
        );
    }

    fn diagnosis(is_healthy: bool) -> Diagnosis {
        Diagnosis {
            disease_name: if is_healthy {
                DiseaseName::Healthy
            } else {
                DiseaseName::CommonRust
            },
            is_healthy,
            description: "desc".to_string(),
            causes: vec!["Puccinia sorghi spores".to_string()],
            treatment: vec![],
            prevention: vec!["Plant resistant hybrids".to_string()],
        }
    }

    #[test]
    fn test_disease_name_parses_known_labels() {
        assert_eq!(DiseaseName::from_label("Healthy"), DiseaseName::Healthy);
        assert_eq!(
            DiseaseName::from_label("  common   RUST "),
            DiseaseName::CommonRust
        );
        assert_eq!(
            DiseaseName::from_label("Northern Corn Leaf Blight"),
            DiseaseName::NorthernCornLeafBlight
        );
        assert_eq!(
            DiseaseName::from_label("Grey Leaf Spot"),
            DiseaseName::GrayLeafSpot
        );
    }

    #[test]
    fn test_disease_name_keeps_unknown_labels() {
        let name = DiseaseName::from_label(" Southern Rust ");
        assert_eq!(name, DiseaseName::Other("Southern Rust".to_string()));
        assert_eq!(name.label(), "Southern Rust");
    }

    #[test]
    fn test_disease_name_serializes_as_label() {
        let json = serde_json::to_string(&DiseaseName::GrayLeafSpot).unwrap();
        assert_eq!(json, "\"Gray Leaf Spot\"");

        let parsed: DiseaseName = serde_json::from_str("\"common rust\"").unwrap();
        assert_eq!(parsed, DiseaseName::CommonRust);
    }

    #[test]
    fn test_id_tip_lookup() {
        assert!(DiseaseName::CommonRust
            .id_tip()
            .unwrap()
            .contains("pustules"));
        assert!(DiseaseName::from_label("Nutrient Deficiency")
            .id_tip()
            .is_some());
        assert!(DiseaseName::Healthy.id_tip().is_none());
    }

    #[test]
    fn test_record_deserializes_camel_case() {
        let record: DiagnosisRecord = serde_json::from_str(
            r#"{"diseaseName":"Common Rust","isHealthy":false,"description":"d","causes":["a"],"treatment":[],"prevention":null}"#,
        )
        .unwrap();

        assert_eq!(record.disease_name.as_deref(), Some("Common Rust"));
        assert_eq!(record.is_healthy, Some(false));
        assert_eq!(record.causes, Some(vec!["a".to_string()]));
        assert_eq!(record.treatment, Some(vec![]));
        assert_eq!(record.prevention, None);
        assert_eq!(record.error, None);
    }

    #[test]
    fn test_sections_for_diseased_plant_skip_empty() {
        let d = diagnosis(false);
        let titles: Vec<&str> = d.sections().iter().map(|s| s.title).collect();
        assert_eq!(titles, vec!["Possible Causes", "Prevention"]);
    }

    #[test]
    fn test_sections_for_healthy_plant_show_care_tips_only() {
        let d = diagnosis(true);
        let sections = d.sections();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Care Tips");
        assert_eq!(sections[0].items, &["Plant resistant hybrids".to_string()]);
    }

    #[test]
    fn test_api_key_rejects_blank() {
        let err = ApiKey::new("   ").unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert_eq!(ApiKey::new(" abc ").unwrap().as_str(), "abc");
    }

    #[test]
    fn test_api_key_debug_is_redacted() {
        let key = ApiKey::new("secret-value").unwrap();
        assert!(!format!("{:?}", key).contains("secret"));
    }

    #[test]
    fn test_config_without_key_is_configuration_error() {
        let config = Config {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: None,
        };
        assert!(matches!(config.api_key(), Err(Error::Configuration(_))));
    }
}
