//! Diagnosis request/response adapter
//!
//! Sends an encoded leaf image through a [`ClassificationService`] and turns
//! the returned structured text into a [`Diagnosis`] or a typed error.

use crate::ai::ClassificationService;
use crate::encoder::EncodedImage;
use crate::models::{Diagnosis, DiagnosisRecord, DiseaseName};
use crate::{Error, Result};

pub struct Diagnoser {
    service: Box<dyn ClassificationService>,
}

impl Diagnoser {
    pub fn new(service: Box<dyn ClassificationService>) -> Self {
        Self { service }
    }

    /// Diagnose one image.
    ///
    /// The returned future is the only suspension point; dropping it abandons
    /// the remote call, so callers can bound it with `tokio::time::timeout`.
    pub async fn diagnose(&self, image: &EncodedImage) -> Result<Diagnosis> {
        let text = self.service.classify(image).await?;
        let diagnosis = interpret(&text)?;

        tracing::info!(
            "Diagnosis: {} (healthy={})",
            diagnosis.disease_name,
            diagnosis.is_healthy
        );
        Ok(diagnosis)
    }
}

/// Parse and validate the model's text payload.
///
/// A non-empty `error` wins over everything else in the payload.
pub fn interpret(text: &str) -> Result<Diagnosis> {
    let record: DiagnosisRecord = serde_json::from_str(text.trim()).map_err(|e| {
        tracing::error!("Diagnosis payload is not valid JSON: {}", e);
        Error::Transport(format!("Malformed diagnosis payload: {}", e))
    })?;

    if let Some(message) = record.error.as_deref().map(str::trim) {
        if !message.is_empty() {
            tracing::info!("Model declined to diagnose: {}", message);
            return Err(Error::DiagnosisUnavailable(message.to_string()));
        }
    }

    let disease_name = non_empty(record.disease_name, "diseaseName")?;
    let description = non_empty(record.description, "description")?;
    let is_healthy = record
        .is_healthy
        .ok_or_else(|| missing_field("isHealthy"))?;

    Ok(Diagnosis {
        disease_name: DiseaseName::from_label(&disease_name),
        is_healthy,
        description,
        causes: record.causes.unwrap_or_default(),
        treatment: record.treatment.unwrap_or_default(),
        prevention: record.prevention.unwrap_or_default(),
    })
}

fn non_empty(value: Option<String>, field: &str) -> Result<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| missing_field(field))
}

fn missing_field(field: &str) -> Error {
    tracing::error!("Diagnosis payload is missing `{}`", field);
    Error::Transport(format!("Diagnosis payload is missing `{}`", field))
}
