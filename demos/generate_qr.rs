//! Generate a QR code with custom colors and save it to a file
//!
//! Usage: cargo run --example generate_qr -- [URL]

use qrgen::{QrRequest, generate_qr_code, output};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://example.com".to_string());

    let dir = Path::new("qr_demo");
    output::prepare_directory(dir)?;

    // Black on white, the conventional look
    let plain =
        QrRequest::new(url.clone(), dir.join("plain.png")).with_colors("black", "white");
    let generated = generate_qr_code(&plain)?;
    println!(
        "✓ {} (version {}, {}x{} px)",
        generated.path.display(),
        generated.version,
        generated.width,
        generated.height
    );

    // Hex and rgb() color forms
    let branded = QrRequest::new(url, dir.join("branded.png"))
        .with_colors("#1e90ff", "rgb(255, 250, 240)");
    let generated = generate_qr_code(&branded)?;
    println!("✓ {} ({} bytes)", generated.path.display(), generated.bytes_written);

    Ok(())
}
