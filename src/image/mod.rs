//! Generated QR code image.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use mime::Mime;

/// Binary image returned by the generator.
#[derive(Clone, PartialEq, Eq)]
pub struct QrImage {
    data: Vec<u8>,
    mime: Mime,
}

impl QrImage {
    /// Wraps raw image bytes.
    ///
    /// `content_type` is the response's `Content-Type`; parameters are kept.
    /// A missing or unparsable value becomes `application/octet-stream`.
    pub fn new(data: Vec<u8>, content_type: Option<&str>) -> Self {
        let mime = content_type
            .and_then(|ct| ct.trim().parse::<Mime>().ok())
            .unwrap_or(mime::APPLICATION_OCTET_STREAM);
        Self { data, mime }
    }

    /// Raw bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// MIME type.
    pub fn mime(&self) -> &Mime {
        &self.mime
    }

    /// Byte length.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the body was empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns true if the MIME type is `image/*`.
    pub fn is_image(&self) -> bool {
        self.mime.type_() == mime::IMAGE
    }

    /// Renders `data:<mime>;base64,<data>` for display.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.data))
    }
}

impl std::fmt::Debug for QrImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QrImage")
            .field("mime", &self.mime.essence_str())
            .field("len", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url_png() {
        let image = QrImage::new(b"fake-image-data".to_vec(), Some("image/png"));

        assert!(image.is_image());
        assert_eq!(
            image.to_data_url(),
            "data:image/png;base64,ZmFrZS1pbWFnZS1kYXRh"
        );
    }

    #[test]
    fn test_missing_content_type_falls_back() {
        let image = QrImage::new(vec![0x89, 0x50], None);

        assert_eq!(image.mime(), &mime::APPLICATION_OCTET_STREAM);
        assert!(!image.is_image());
        assert!(image
            .to_data_url()
            .starts_with("data:application/octet-stream;base64,"));
    }

    #[test]
    fn test_garbage_content_type_falls_back() {
        let image = QrImage::new(vec![1], Some("not a mime"));
        assert_eq!(image.mime(), &mime::APPLICATION_OCTET_STREAM);
    }

    #[test]
    fn test_debug_hides_bytes() {
        let image = QrImage::new(vec![0; 4096], Some("image/png"));
        let debug = format!("{:?}", image);

        assert!(debug.contains("image/png"));
        assert!(debug.contains("4096"));
    }
}
