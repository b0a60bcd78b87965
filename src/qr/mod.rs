//! QR code generation
//!
//! [`QrEncoder`] builds and rasterizes the symbol; [`generate_qr_code`] runs
//! validation, encoding and the file write for a single [`QrRequest`](crate::QrRequest).

mod encoder;
mod writer;

pub use encoder::{QrEncoder, version_number};
pub use writer::{Generated, generate_qr_code};
