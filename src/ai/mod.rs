//! Remote image classification
//!
//! The classification service is the single suspension point of a diagnosis:
//! it ships an encoded image to a hosted model and returns the model's raw
//! structured text. Interpreting that text is [`crate::diagnosis`]'s job.

pub mod gemini;
pub mod mock;

pub use gemini::GeminiDiagnosisClient;
pub use mock::FakeClassifier;

use crate::encoder::EncodedImage;
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ClassificationService: Send + Sync {
    /// Classify one image, returning the JSON text payload produced by the model.
    async fn classify(&self, image: &EncodedImage) -> Result<String>;
}
