use std::path::Path;

/// Fallback used when neither the bytes nor the file name identify the format.
pub const FALLBACK_MIME: &str = "image/png";

/// Identify an image format from its leading magic bytes.
pub fn sniff_image_mime(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [0x89, 0x50, 0x4E, 0x47, ..] => Some("image/png"),
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => Some("image/webp"),
        [0x47, 0x49, 0x46, 0x38, ..] => Some("image/gif"),
        [_, _, _, _, 0x66, 0x74, 0x79, 0x70, 0x68, 0x65, 0x69, 0x63, ..] => Some("image/heic"),
        _ => None,
    }
}

pub fn mime_from_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "heic" => Some("image/heic"),
        _ => None,
    }
}

/// Resolve the media type for an image file: magic bytes first, then the
/// file extension, then [`FALLBACK_MIME`].
pub fn detect_image_mime(path: &Path, bytes: &[u8]) -> &'static str {
    sniff_image_mime(bytes)
        .or_else(|| mime_from_extension(path))
        .unwrap_or_else(|| {
            tracing::warn!(
                "Unrecognized image format for {} (first 4 bytes: {:02X?}), falling back to {}",
                path.display(),
                &bytes[..bytes.len().min(4)],
                FALLBACK_MIME
            );
            FALLBACK_MIME
        })
}
