//! Image selection checks and preview handles

use std::collections::BTreeSet;
use thiserror::Error;

/// Largest image accepted for classification (10 MiB)
pub const MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;

/// Metadata of a file the user picked or dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCandidate {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
}

/// How the file reached the page. Both paths are validated identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSource {
    Picker,
    Drop,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageRejection {
    #[error("Por favor, selecciona un archivo de imagen válido")]
    NotAnImage,

    #[error("La imagen es demasiado grande. Máximo 10MB")]
    TooLarge { size: u64, max: u64 },
}

impl ImageCandidate {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size,
        }
    }

    pub fn validate(&self, max_bytes: u64) -> Result<(), ImageRejection> {
        if !self.mime_type.starts_with("image/") {
            return Err(ImageRejection::NotAnImage);
        }
        if self.size > max_bytes {
            return Err(ImageRejection::TooLarge {
                size: self.size,
                max: max_bytes,
            });
        }
        Ok(())
    }
}

/// Creates and releases preview URLs for selected files.
///
/// In the browser these are object URLs; every created URL must be revoked
/// once it is superseded.
pub trait PreviewRegistry<F> {
    /// `None` when the platform could not create a preview
    fn create(&mut self, file: &F) -> Option<String>;
    fn revoke(&mut self, url: &str);
}

/// Counter-backed registry for native use and tests
#[derive(Debug, Default)]
pub struct InMemoryPreviews {
    next: u64,
    live: BTreeSet<String>,
}

impl InMemoryPreviews {
    pub fn new() -> Self {
        Self::default()
    }

    /// Previews created and not yet revoked
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn is_live(&self, url: &str) -> bool {
        self.live.contains(url)
    }
}

impl<F> PreviewRegistry<F> for InMemoryPreviews {
    fn create(&mut self, _file: &F) -> Option<String> {
        self.next += 1;
        let url = format!("preview://{}", self.next);
        self.live.insert(url.clone());
        Some(url)
    }

    fn revoke(&mut self, url: &str) {
        if !self.live.remove(url) {
            tracing::debug!("Revoking unknown preview {}", url);
        }
    }
}

/// Guess an image MIME type from a file extension
pub fn mime_from_extension(path: &str) -> &'static str {
    let ext = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_images() {
        let pdf = ImageCandidate::new("a.pdf", "application/pdf", 10);
        assert_eq!(pdf.validate(MAX_IMAGE_BYTES), Err(ImageRejection::NotAnImage));
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        let exact = ImageCandidate::new("a.png", "image/png", MAX_IMAGE_BYTES);
        assert!(exact.validate(MAX_IMAGE_BYTES).is_ok());

        let over = ImageCandidate::new("a.png", "image/png", MAX_IMAGE_BYTES + 1);
        let err = over.validate(MAX_IMAGE_BYTES).unwrap_err();
        assert_eq!(err.to_string(), "La imagen es demasiado grande. Máximo 10MB");
    }

    #[test]
    fn test_in_memory_previews_track_live_urls() {
        let mut previews = InMemoryPreviews::new();
        let url = PreviewRegistry::<()>::create(&mut previews, &()).unwrap();
        assert_eq!(previews.live_count(), 1);
        PreviewRegistry::<()>::revoke(&mut previews, &url);
        assert_eq!(previews.live_count(), 0);
    }

    #[test]
    fn test_mime_from_extension() {
        assert_eq!(mime_from_extension("fondo.JPG"), "image/jpeg");
        assert_eq!(mime_from_extension("scan.png"), "image/png");
        assert_eq!(mime_from_extension("notes"), "application/octet-stream");
    }
}
