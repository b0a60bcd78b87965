//! Validate, encode and write a QR request to disk

use crate::color::Color;
use crate::error::{Error, Result};
use crate::qr::encoder::{QrEncoder, version_number};
use crate::request::QrRequest;
use crate::validate;
use std::fs;
use std::path::PathBuf;

/// Description of an image written by [`generate_qr_code`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    /// Where the image was written
    pub path: PathBuf,
    /// QR version actually used
    pub version: i16,
    /// Modules per side, excluding the border
    pub modules: usize,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Size of the written file
    pub bytes_written: u64,
}

/// Validate the request URL, render it and save the image, replacing any existing file.
///
/// Returns [`Error::InvalidUrl`](crate::Error::InvalidUrl) without touching the
/// filesystem when the data is not a URL. Color, encoding and write failures
/// come back as their own variants so callers can tell them apart.
pub fn generate_qr_code(request: &QrRequest) -> Result<Generated> {
    if !validate::is_valid_url(&request.data) {
        return Err(Error::InvalidUrl(request.data.clone()));
    }

    let fill: Color = request.fill_color.parse()?;
    let back: Color = request.back_color.parse()?;

    let encoder = QrEncoder::new()
        .with_error_correction(request.error_correction)
        .with_min_version(request.version)
        .with_box_size(request.box_size)
        .with_border(request.border)
        .with_colors(fill, back);

    let (code, image) = encoder.encode_string(&request.data)?;
    let (width, height) = image.dimensions();

    image.save(&request.output_path)?;
    let bytes_written = fs::metadata(&request.output_path)?.len();

    tracing::debug!(
        version = version_number(&code),
        modules = code.width(),
        width,
        height,
        bytes_written,
        fill = %fill,
        back = %back,
        "Rendered QR code"
    );

    Ok(Generated {
        path: request.output_path.clone(),
        version: version_number(&code),
        modules: code.width(),
        width,
        height,
        bytes_written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_in(dir: &std::path::Path, data: &str) -> QrRequest {
        QrRequest::new(data, dir.join("github_qr.png"))
    }

    #[test]
    fn test_writes_non_empty_png() {
        let tmp = tempfile::tempdir().unwrap();
        let request = request_in(tmp.path(), "https://example.com");

        let generated = generate_qr_code(&request).unwrap();
        assert_eq!(generated.path, request.output_path);
        assert!(generated.bytes_written > 0);
        assert_eq!(generated.width, (generated.modules as u32 + 10) * 10);

        let written = image::open(&request.output_path).unwrap().to_rgb8();
        assert_eq!(written.get_pixel(0, 0).0, [255, 255, 255]);
        assert_eq!(written.get_pixel(50, 50).0, [255, 0, 0]);
    }

    #[test]
    fn test_invalid_url_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let request = request_in(tmp.path(), "not-a-url");

        let err = generate_qr_code(&request).unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(ref s) if s == "not-a-url"));
        assert!(!request.output_path.exists());
    }

    #[test]
    fn test_repaired_url_is_not_encoded() {
        let tmp = tempfile::tempdir().unwrap();
        for data in [
            "https://exa\nmple.com",
            "https:example.com",
            "http://example.com\\path",
        ] {
            let request = request_in(tmp.path(), data);
            let err = generate_qr_code(&request).unwrap_err();
            assert!(matches!(err, Error::InvalidUrl(ref s) if s == data));
            assert!(!request.output_path.exists());
        }
    }

    #[test]
    fn test_invalid_color_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let request = request_in(tmp.path(), "https://example.com").with_colors("blurple", "white");

        let err = generate_qr_code(&request).unwrap_err();
        assert!(matches!(err, Error::InvalidColor(_)));
        assert!(!err.is_fatal());
        assert!(!request.output_path.exists());
    }

    #[test]
    fn test_unsupported_extension_is_image_error() {
        let tmp = tempfile::tempdir().unwrap();
        let request = QrRequest::new("https://example.com", tmp.path().join("qr.unknown"));

        let err = generate_qr_code(&request).unwrap_err();
        assert!(matches!(err, Error::Image(_)));
    }

    #[test]
    fn test_rerun_overwrites_previous_file() {
        let tmp = tempfile::tempdir().unwrap();
        let first = request_in(tmp.path(), "https://a.io");
        let second = request_in(tmp.path(), "https://example.com/a/considerably/longer/path");

        let small = generate_qr_code(&first).unwrap();
        let large = generate_qr_code(&second).unwrap();
        assert!(large.width > small.width);

        let reopened = image::open(&second.output_path).unwrap();
        assert_eq!(reopened.width(), large.width);
    }
}
