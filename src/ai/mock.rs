use super::ClassificationService;
use crate::encoder::EncodedImage;
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory classifier with a fixed image → payload mapping.
///
/// Images are matched on their encoded data. Unmatched images get the default
/// payload, or a transport error when none is set.
pub struct FakeClassifier {
    responses: Arc<Mutex<HashMap<String, String>>>,
    default_response: Option<String>,
    failure: Option<String>,
    call_count: Arc<Mutex<usize>>,
}

impl FakeClassifier {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            default_response: None,
            failure: None,
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_response(self, image: &EncodedImage, payload: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(image.data.clone(), payload.into());
        self
    }

    pub fn with_default_response(mut self, payload: impl Into<String>) -> Self {
        self.default_response = Some(payload.into());
        self
    }

    /// Fail every call with a transport error carrying `message`.
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for FakeClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClassificationService for FakeClassifier {
    async fn classify(&self, image: &EncodedImage) -> Result<String> {
        *self.call_count.lock().unwrap() += 1;

        if let Some(message) = &self.failure {
            return Err(Error::Transport(message.clone()));
        }

        let responses = self.responses.lock().unwrap();
        responses
            .get(&image.data)
            .or(self.default_response.as_ref())
            .cloned()
            .ok_or_else(|| Error::Transport("No canned response for image".to_string()))
    }
}
