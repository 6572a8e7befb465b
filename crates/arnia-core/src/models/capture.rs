use serde::{Deserialize, Serialize};

/// One acquired photo, as handed over by a capture or gallery source.
///
/// The source reference may be a direct file path or an indirect
/// provider-style URI; the resolver decides how to read it. A capture is
/// consumed exactly once by the pipeline and never persisted by it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoCapture {
    /// Opaque reference to the image bytes (path, `file://`, or provider URI).
    pub source_uri: String,
    /// Filename suggested by the capture/gallery source, if any.
    pub suggested_filename: Option<String>,
    /// Pixel dimensions, informational only.
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl PhotoCapture {
    pub fn new(source_uri: impl Into<String>) -> Self {
        Self {
            source_uri: source_uri.into(),
            suggested_filename: None,
            width: None,
            height: None,
        }
    }

    /// True when the capture carries no usable reference at all.
    pub fn is_empty(&self) -> bool {
        self.source_uri.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_capture() {
        assert!(PhotoCapture::new("").is_empty());
        assert!(PhotoCapture::new("   ").is_empty());
        assert!(!PhotoCapture::new("/tmp/img.jpg").is_empty());
    }
}
