//! qrgen command-line entrypoint

use clap::Parser;
use qrgen::output::{self, RunSummary};
use qrgen::{Error, QrRequest, QrgenConfig, generate_qr_code, logging};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error, info};

#[derive(Parser, Debug)]
#[command(name = "qrgen", version, about = "Generate a QR code.")]
struct Cli {
    /// The URL to encode in the QR code (defaults to QR_DATA_URL)
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Optional configuration file (toml/yaml). Defaults to qrgen.{toml,yaml} in cwd/XDG config.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print a JSON summary of the run to stdout
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match QrgenConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => return fail(&err),
    };

    let _log_guard = match logging::init(&config.logging) {
        Ok(guard) => guard,
        Err(err) => return fail(&err),
    };

    match &config.source {
        Some(path) => info!("Using configuration file: {}", path.display()),
        None => debug!("No qrgen.toml / qrgen.yaml found, using defaults"),
    }

    if let Err(err) = output::prepare_directory(&config.output.directory) {
        return fail(&err);
    }

    let request = QrRequest::from_config(&config, cli.url.as_deref());
    let result = generate_qr_code(&request);
    let summary = match &result {
        Err(err) if err.is_fatal() => return fail(err),
        Ok(generated) => {
            info!("QR code successfully saved to {}", generated.path.display());
            RunSummary::Saved(generated)
        }
        Err(err @ Error::InvalidUrl(_)) => {
            error!("{err}");
            RunSummary::Skipped {
                data: &request.data,
                reason: err.to_string(),
            }
        }
        Err(err) => {
            error!("An error occurred while generating or saving the QR code: {err}");
            RunSummary::Failed {
                path: &request.output_path,
                reason: err.to_string(),
            }
        }
    };

    if cli.json {
        match serde_json::to_string_pretty(&summary.to_json()) {
            Ok(text) => println!("{text}"),
            Err(err) => error!("Failed to serialise run summary: {err}"),
        }
    }

    ExitCode::SUCCESS
}

fn fail(err: &Error) -> ExitCode {
    logging::init_fallback();
    error!("{err}");
    ExitCode::from(err.exit_code())
}
