//! Downloadable diagnosis report
//!
//! A one-way JSON export of a diagnosis with the time it was produced.

use crate::models::Diagnosis;
use crate::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisReport {
    #[serde(serialize_with = "serialize_rfc3339")]
    pub timestamp: DateTime<Utc>,
    pub disease: String,
    pub is_healthy: bool,
    pub advice: String,
    pub causes: Vec<String>,
    pub treatment: Vec<String>,
    pub prevention: Vec<String>,
}

fn serialize_rfc3339<S: serde::Serializer>(
    ts: &DateTime<Utc>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

impl DiagnosisReport {
    pub fn new(diagnosis: &Diagnosis, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            disease: diagnosis.disease_name.to_string(),
            is_healthy: diagnosis.is_healthy,
            advice: diagnosis.description.clone(),
            causes: diagnosis.causes.clone(),
            treatment: diagnosis.treatment.clone(),
            prevention: diagnosis.prevention.clone(),
        }
    }

    pub fn file_name(&self) -> String {
        format!(
            "corn-disease-report-{}.json",
            self.timestamp.timestamp_millis()
        )
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report into `dir`, returning the file path.
    pub async fn write_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(self.file_name());
        tokio::fs::write(&path, self.to_json()?).await?;
        tracing::info!("Wrote diagnosis report to {}", path.display());
        Ok(path)
    }
}
