//! QR code encoder and rasterizer

use crate::color::Color;
use crate::config::ErrorCorrection;
use crate::error::{Error, Result};
use image::RgbImage;
use qrcode::types::QrError;
use qrcode::{QrCode, Version};

/// Highest normal QR version
const MAX_VERSION: i16 = 40;

/// QR code encoder
#[derive(Debug, Clone)]
pub struct QrEncoder {
    /// Error correction level
    ecc_level: qrcode::EcLevel,
    /// Smallest version tried when fitting the data
    min_version: i16,
    /// Pixels per module
    box_size: u32,
    /// Quiet zone in modules
    border: u32,
    fill: Color,
    back: Color,
}

impl QrEncoder {
    /// Create a new QR encoder: version 1 (fit), box size 10, border 5, Medium ECC, black on white
    pub fn new() -> Self {
        Self {
            ecc_level: qrcode::EcLevel::M,
            min_version: 1,
            box_size: 10,
            border: 5,
            fill: Color::BLACK,
            back: Color::WHITE,
        }
    }

    /// Set the error correction level
    pub fn with_error_correction(mut self, level: ErrorCorrection) -> Self {
        self.ecc_level = level.to_ec_level();
        self
    }

    /// Set the smallest version tried; larger versions are used when the data does not fit
    pub fn with_min_version(mut self, version: i16) -> Self {
        self.min_version = version.clamp(1, MAX_VERSION);
        self
    }

    /// Set the pixel size of one module
    pub fn with_box_size(mut self, box_size: u32) -> Self {
        self.box_size = box_size.max(1);
        self
    }

    /// Set the quiet zone width in modules
    pub fn with_border(mut self, border: u32) -> Self {
        self.border = border;
        self
    }

    /// Set the dark and light module colors
    pub fn with_colors(mut self, fill: Color, back: Color) -> Self {
        self.fill = fill;
        self.back = back;
        self
    }

    /// Build the smallest symbol at or above the minimum version that holds `data`.
    pub fn build_code(&self, data: &[u8]) -> Result<QrCode> {
        for version in self.min_version..=MAX_VERSION {
            match QrCode::with_version(data, Version::Normal(version), self.ecc_level) {
                Ok(code) => return Ok(code),
                Err(QrError::DataTooLong) => continue,
                Err(other) => return Err(other.into()),
            }
        }

        Err(Error::QrEncode(format!(
            "{} bytes do not fit in any QR version between {} and {MAX_VERSION}",
            data.len(),
            self.min_version
        )))
    }

    /// Rasterize a symbol with the configured box size, border and colors.
    pub fn render(&self, code: &QrCode) -> Result<RgbImage> {
        let modules = code.width();
        let side = u32::try_from(modules)
            .ok()
            .and_then(|m| m.checked_add(self.border.checked_mul(2)?))
            .and_then(|m| m.checked_mul(self.box_size))
            .ok_or_else(|| {
                Error::QrEncode(format!(
                    "Image size overflows for {modules} modules, border {}, box size {}",
                    self.border, self.box_size
                ))
            })?;

        let mut image = RgbImage::from_pixel(side, side, self.back.to_rgb());
        let fill = self.fill.to_rgb();

        for (idx, color) in code.to_colors().into_iter().enumerate() {
            if color != qrcode::Color::Dark {
                continue;
            }
            let x0 = ((idx % modules) as u32 + self.border) * self.box_size;
            let y0 = ((idx / modules) as u32 + self.border) * self.box_size;
            for y in y0..y0 + self.box_size {
                for x in x0..x0 + self.box_size {
                    image.put_pixel(x, y, fill);
                }
            }
        }

        Ok(image)
    }

    /// Encode a string into a QR code image
    pub fn encode_string(&self, data: &str) -> Result<(QrCode, RgbImage)> {
        let code = self.build_code(data.as_bytes())?;
        let image = self.render(&code)?;
        Ok((code, image))
    }
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Numeric version of a symbol
pub fn version_number(code: &QrCode) -> i16 {
    match code.version() {
        Version::Normal(v) | Version::Micro(v) => v,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_url_fits_version_one() {
        let encoder = QrEncoder::new();
        let code = encoder.build_code(b"https://a.io").unwrap();
        assert_eq!(version_number(&code), 1);
        assert_eq!(code.width(), 21);
    }

    #[test]
    fn test_version_grows_to_fit() {
        let encoder = QrEncoder::new();
        let data = "https://github.com/PoojaPatel9?tab=repositories&q=qr";
        let code = encoder.build_code(data.as_bytes()).unwrap();
        assert!(version_number(&code) > 1);
    }

    #[test]
    fn test_min_version_is_respected() {
        let encoder = QrEncoder::new().with_min_version(5);
        let code = encoder.build_code(b"hi").unwrap();
        assert_eq!(version_number(&code), 5);
    }

    #[test]
    fn test_data_too_long() {
        let encoder = QrEncoder::new();
        let data = vec![b'x'; 4000];
        assert!(matches!(encoder.build_code(&data), Err(Error::QrEncode(_))));
    }

    #[test]
    fn test_render_dimensions_and_colors() {
        let red = Color::new(255, 0, 0);
        let encoder = QrEncoder::new().with_colors(red, Color::WHITE);
        let (code, image) = encoder.encode_string("https://example.com").unwrap();

        let expected = (code.width() as u32 + 2 * 5) * 10;
        assert_eq!(image.dimensions(), (expected, expected));

        // Quiet zone uses the background color
        assert_eq!(*image.get_pixel(0, 0), Color::WHITE.to_rgb());
        // Top-left finder pattern corner is always dark
        assert_eq!(*image.get_pixel(50, 50), red.to_rgb());
        assert_eq!(*image.get_pixel(59, 59), red.to_rgb());
    }

    #[test]
    fn test_round_trip_through_decoder() {
        let encoder = QrEncoder::new()
            .with_colors(Color::new(255, 0, 0), Color::WHITE)
            .with_box_size(4);
        let (_, image) = encoder.encode_string("https://example.com").unwrap();

        let gray = image::DynamicImage::ImageRgb8(image).to_luma8();
        let mut prepared = rqrr::PreparedImage::prepare(gray);
        let grids = prepared.detect_grids();
        assert_eq!(grids.len(), 1);
        let (_, content) = grids[0].decode().unwrap();
        assert_eq!(content, "https://example.com");
    }
}
