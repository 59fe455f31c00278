//! Application orchestration: encode an image file, diagnose it, render it.

use crate::ai::{ClassificationService, GeminiDiagnosisClient};
use crate::diagnosis::Diagnoser;
use crate::encoder::EncodedImage;
use crate::models::{Config, Diagnosis};
use crate::{Error, Result};
use std::fmt::Write as _;
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub struct App {
    diagnoser: Diagnoser,
    timeout: Option<Duration>,
}

impl App {
    /// Build an app around any classification service.
    ///
    /// Integration tests use this to inject [`crate::ai::FakeClassifier`].
    pub fn with_service(service: Box<dyn ClassificationService>) -> Self {
        Self {
            diagnoser: Diagnoser::new(service),
            timeout: None,
        }
    }

    /// Build an app backed by Gemini.
    ///
    /// Fails with [`Error::Configuration`] when no API key is configured.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = GeminiDiagnosisClient::from_config(config)?;
        info!("Diagnosis provider: Gemini (model: {})", client.model());
        Ok(Self::with_service(Box::new(client)))
    }

    /// Bound each diagnosis by `timeout`. Unbounded by default.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub async fn diagnose_file(
        &self,
        path: &Path,
        mime_override: Option<&str>,
    ) -> Result<Diagnosis> {
        let image = EncodedImage::from_file(path, mime_override).await?;
        self.diagnose_image(&image).await
    }

    pub async fn diagnose_image(&self, image: &EncodedImage) -> Result<Diagnosis> {
        match self.timeout {
            None => self.diagnoser.diagnose(image).await,
            Some(timeout) => tokio::time::timeout(timeout, self.diagnoser.diagnose(image))
                .await
                .map_err(|_| {
                    Error::Transport(format!(
                        "Diagnosis timed out after {}s",
                        timeout.as_secs_f32()
                    ))
                })?,
        }
    }
}

/// Plain-text rendering of a diagnosis for the terminal.
pub fn render(diagnosis: &Diagnosis) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Diagnosis Result: {}", diagnosis.disease_name);
    if let Some(tip) = diagnosis.disease_name.id_tip() {
        let _ = writeln!(out, "  ({})", tip);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", diagnosis.description);

    for section in diagnosis.sections() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}:", section.title);
        for item in section.items {
            let _ = writeln!(out, "  - {}", item);
        }
    }
    out
}
