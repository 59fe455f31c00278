//! Image encoding for inline transport
//!
//! Turns raw image bytes into the base64 + media type pair the
//! classification endpoint expects. No resizing or re-encoding happens here.

pub mod mime;

use crate::Result;
use base64::Engine as _;
use std::path::Path;

/// Base64 image payload paired with its media type. Built per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub data: String,
    pub mime_type: String,
}

impl EncodedImage {
    /// Encode raw bytes as standard base64, without a `data:` URI prefix.
    pub fn encode(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self {
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
            mime_type: mime_type.into(),
        }
    }

    /// Read an image file and encode it.
    ///
    /// `mime_override` takes precedence over detection.
    pub async fn from_file(path: &Path, mime_override: Option<&str>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            tracing::error!("Failed to read image {}: {}", path.display(), e);
            e
        })?;

        let mime_type = match mime_override {
            Some(mime) => mime.to_string(),
            None => mime::detect_image_mime(path, &bytes).to_string(),
        };

        tracing::debug!(
            "Encoded {} ({} bytes, {})",
            path.display(),
            bytes.len(),
            mime_type
        );

        Ok(Self::encode(&bytes, mime_type))
    }

    /// Size of the original image in bytes.
    pub fn decoded_len(&self) -> usize {
        let padding = self.data.bytes().rev().take_while(|b| *b == b'=').count();
        (self.data.len() / 4 * 3).saturating_sub(padding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;
    use std::io::Write;

    #[test]
    fn test_encode_round_trips_bytes() {
        let bytes: Vec<u8> = (0..=255u8).chain([0, 0, 255]).collect();
        let encoded = EncodedImage::encode(&bytes, "image/jpeg");

        let decoded = base64::engine::general_purpose::STANDARD
            .decode(&encoded.data)
            .unwrap();
        assert_eq!(decoded, bytes);
        assert_eq!(encoded.mime_type, "image/jpeg");
        assert_eq!(encoded.decoded_len(), bytes.len());
    }

    #[test]
    fn test_encode_has_no_data_uri_prefix() {
        let encoded = EncodedImage::encode(b"leaf", "image/png");
        assert_eq!(encoded.data, "bGVhZg==");
        assert!(!encoded.data.starts_with("data:"));
    }

    #[test]
    fn test_encode_empty_input() {
        let encoded = EncodedImage::encode(&[], "image/png");
        assert_eq!(encoded.data, "");
        assert_eq!(encoded.decoded_len(), 0);
    }

    #[test]
    fn test_decoded_len_of_malformed_data_does_not_panic() {
        let image = EncodedImage {
            data: "==".to_string(),
            mime_type: "image/png".to_string(),
        };
        assert_eq!(image.decoded_len(), 0);
    }

    #[tokio::test]
    async fn test_from_file_detects_mime() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(&[0xFF, 0xD8, 0xFF, 0xE0, 0x01]).unwrap();

        let encoded = EncodedImage::from_file(file.path(), None).await.unwrap();
        assert_eq!(encoded.mime_type, "image/jpeg");
        assert_eq!(encoded.decoded_len(), 5);
    }

    #[tokio::test]
    async fn test_from_file_honours_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"whatever").unwrap();

        let encoded = EncodedImage::from_file(file.path(), Some("image/webp"))
            .await
            .unwrap();
        assert_eq!(encoded.mime_type, "image/webp");
    }

    #[tokio::test]
    async fn test_from_file_missing_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = EncodedImage::from_file(&dir.path().join("missing.jpg"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }
}
