//! Upload validation by magic-byte MIME sniffing.
//!
//! The client-declared content type is never trusted for classification:
//! mislabeled or malicious uploads would pass a header check, so the true
//! type is always derived from the byte signature before the bytes are
//! forwarded to the inference backend.

use serde::{Deserialize, Serialize};

use crate::defaults::IMAGE_MIME_PREFIX;
use crate::error::{Error, Result};

/// Determine the true media type of an upload from its byte signature.
///
/// Pure function of the buffer. Returns the normalized MIME type
/// (e.g. `"image/png"`) when the bytes carry a recognized image signature.
///
/// # Errors
/// - [`Error::TypeDetection`] when no known signature matches (an empty
///   buffer included).
/// - [`Error::UnsupportedMediaType`] when the signature matches a non-image
///   format; the detected type is carried for logging.
pub fn sniff_media_type(data: &[u8]) -> Result<String> {
    let kind = infer::get(data).ok_or(Error::TypeDetection)?;
    let mime = kind.mime_type();
    if !mime.starts_with(IMAGE_MIME_PREFIX) {
        tracing::warn!(
            subsystem = "media",
            op = "sniff",
            mime_type = %mime,
            "Rejected non-image upload"
        );
        return Err(Error::UnsupportedMediaType(mime.to_string()));
    }
    Ok(mime.to_string())
}

/// An upload that passed byte-signature validation.
///
/// Only constructible through [`ValidatedImage::from_bytes`], so holding one
/// is proof the bytes sniffed as an image. `mime_type` is the sniffed type,
/// never the client-declared one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl ValidatedImage {
    /// Validate raw upload bytes, taking ownership on success.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let mime_type = sniff_media_type(&bytes)?;
        Ok(Self { bytes, mime_type })
    }

    /// Size of the validated image in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal PNG: signature + truncated IHDR. Enough for magic detection.
    fn png_bytes() -> Vec<u8> {
        let mut data = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        data.extend_from_slice(&[0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52]);
        data
    }

    /// JFIF JPEG header.
    fn jpeg_bytes() -> Vec<u8> {
        vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46, 0x00]
    }

    /// PDF header bytes, the classic "renamed to .png" case.
    fn pdf_bytes() -> Vec<u8> {
        b"%PDF-1.7\n%\xE2\xE3\xCF\xD3\n".to_vec()
    }

    #[test]
    fn test_sniff_png() {
        assert_eq!(sniff_media_type(&png_bytes()).unwrap(), "image/png");
    }

    #[test]
    fn test_sniff_jpeg() {
        assert_eq!(sniff_media_type(&jpeg_bytes()).unwrap(), "image/jpeg");
    }

    #[test]
    fn test_sniff_pdf_rejected_as_non_image() {
        let err = sniff_media_type(&pdf_bytes()).unwrap_err();
        match err {
            Error::UnsupportedMediaType(detected) => {
                assert_eq!(detected, "application/pdf");
            }
            other => panic!("expected UnsupportedMediaType, got {:?}", other),
        }
    }

    #[test]
    fn test_sniff_plain_text_fails_detection() {
        // Plain text has no magic bytes, so sniffing cannot classify it.
        let err = sniff_media_type(b"hello, this is not an image").unwrap_err();
        assert!(matches!(err, Error::TypeDetection));
    }

    #[test]
    fn test_sniff_empty_buffer_fails_detection() {
        let err = sniff_media_type(&[]).unwrap_err();
        assert!(matches!(err, Error::TypeDetection));
    }

    #[test]
    fn test_validated_image_uses_sniffed_type() {
        let img = ValidatedImage::from_bytes(jpeg_bytes()).unwrap();
        assert_eq!(img.mime_type, "image/jpeg");
        assert_eq!(img.len(), jpeg_bytes().len());
        assert!(!img.is_empty());
    }

    #[test]
    fn test_validated_image_rejects_non_image() {
        assert!(ValidatedImage::from_bytes(pdf_bytes()).is_err());
    }
}
