//! The QR code request built once per run

use crate::config::{ErrorCorrection, QrgenConfig};
use std::path::PathBuf;

/// Everything the encoder needs to produce one image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrRequest {
    /// Text to encode, normally a URL
    pub data: String,
    /// Destination image path
    pub output_path: PathBuf,
    /// Dark module color specification
    pub fill_color: String,
    /// Light module color specification
    pub back_color: String,
    /// Smallest QR version to try
    pub version: i16,
    /// Pixels per module
    pub box_size: u32,
    /// Quiet zone width in modules
    pub border: u32,
    /// Error correction level
    pub error_correction: ErrorCorrection,
}

impl QrRequest {
    /// Build a request with default symbol parameters.
    pub fn new(data: impl Into<String>, output_path: impl Into<PathBuf>) -> Self {
        let style = crate::config::StyleOptions::default();
        Self {
            data: data.into(),
            output_path: output_path.into(),
            fill_color: style.fill_color,
            back_color: style.back_color,
            version: style.version,
            box_size: style.box_size,
            border: style.border,
            error_correction: style.error_correction,
        }
    }

    /// Build a request from resolved configuration and an optional URL override.
    pub fn from_config(config: &QrgenConfig, cli_url: Option<&str>) -> Self {
        Self {
            data: config.effective_url(cli_url),
            output_path: config.output.path(),
            fill_color: config.style.fill_color.clone(),
            back_color: config.style.back_color.clone(),
            version: config.style.version,
            box_size: config.style.box_size,
            border: config.style.border,
            error_correction: config.style.error_correction,
        }
    }

    /// Override the fill and background colors
    pub fn with_colors(mut self, fill: impl Into<String>, back: impl Into<String>) -> Self {
        self.fill_color = fill.into();
        self.back_color = back.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_from_default_config() {
        let config = QrgenConfig::default();
        let request = QrRequest::from_config(&config, Some("https://example.com"));
        assert_eq!(request.data, "https://example.com");
        assert_eq!(
            request.output_path,
            Path::new("qr_codes").join("github_qr.png")
        );
        assert_eq!(request.fill_color, "red");
        assert_eq!(request.back_color, "white");
        assert_eq!(request.box_size, 10);
        assert_eq!(request.border, 5);
    }

    #[test]
    fn test_new_matches_default_config() {
        let config = QrgenConfig::default();
        let from_config = QrRequest::from_config(&config, Some("https://a.example"));
        let direct = QrRequest::new("https://a.example", config.output.path());
        assert_eq!(from_config, direct);
    }
}
