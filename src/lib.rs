//! qrgen - render a URL as a colored QR code image
//!
//! A run resolves configuration, makes sure the output directory exists,
//! validates the URL and writes the QR image.
//!
//! # Example
//!
//! ```no_run
//! use qrgen::{QrRequest, generate_qr_code, output};
//!
//! fn main() -> anyhow::Result<()> {
//!     output::prepare_directory("qr_codes".as_ref())?;
//!
//!     let request = QrRequest::new("https://example.com", "qr_codes/example.png")
//!         .with_colors("navy", "white");
//!     let generated = generate_qr_code(&request)?;
//!
//!     println!("Wrote {} ({} bytes)", generated.path.display(), generated.bytes_written);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]

pub mod color;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod qr;
pub mod request;
pub mod validate;

// Re-exports for convenience
pub use error::{Error, Result};

pub use color::Color;
pub use config::{
    ErrorCorrection, LogRotation, LoggingOptions, OutputOptions, QrgenConfig, StyleOptions,
};
pub use qr::{Generated, QrEncoder, generate_qr_code};
pub use request::QrRequest;
pub use validate::is_valid_url;
