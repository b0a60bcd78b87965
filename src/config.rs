//! qrgen runtime configuration handling

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default directory the QR image is written into
pub const DEFAULT_DIRECTORY: &str = "qr_codes";
/// Default QR image filename
pub const DEFAULT_FILENAME: &str = "github_qr.png";
/// Default fill (dark module) color
pub const DEFAULT_FILL_COLOR: &str = "red";
/// Default background (light module) color
pub const DEFAULT_BACK_COLOR: &str = "white";
/// URL encoded when neither `--url` nor `QR_DATA_URL` is given
pub const DEFAULT_URL: &str = "https://github.com/PoojaPatel9";

/// Top-level configuration structure loaded from disk and environment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QrgenConfig {
    /// URL encoded when no override is given on the command line
    pub default_url: DefaultUrl,
    /// Where the image is written
    pub output: OutputOptions,
    /// Colors and symbol parameters
    pub style: StyleOptions,
    /// Logging configuration
    pub logging: LoggingOptions,
    /// File the configuration was read from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// Newtype so the default URL deserializes with its fallback in place
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DefaultUrl(pub String);

impl Default for DefaultUrl {
    fn default() -> Self {
        Self(DEFAULT_URL.to_string())
    }
}

impl QrgenConfig {
    /// Load configuration from an explicit path or fall back to discovered defaults,
    /// then apply process environment overrides.
    ///
    /// Runs before logging is set up; the file used is kept in [`Self::source`].
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let path = match explicit_path {
            Some(path) => Some(path.to_path_buf()),
            None => Self::discover_file()?,
        };

        let mut config = match path {
            Some(path) => {
                let mut config = Self::from_file(&path)?;
                config.source = Some(path);
                config
            }
            None => Self::default(),
        };

        config.apply_env_overrides(|key| env::var(key).ok());
        Ok(config)
    }

    /// Attempt to locate a configuration file in common locations.
    fn discover_file() -> Result<Option<PathBuf>> {
        let cwd =
            env::current_dir().map_err(|e| Error::Config(format!("Failed to read cwd: {e}")))?;
        for candidate in ["qrgen.toml", "qrgen.yaml", "qrgen.yml"] {
            let path = cwd.join(candidate);
            if path.exists() {
                return Ok(Some(path));
            }
        }

        if let Some(xdg_config) = env::var_os("XDG_CONFIG_HOME") {
            let base = PathBuf::from(xdg_config).join("qrgen");
            for candidate in ["config.toml", "config.yaml"] {
                let path = base.join(candidate);
                if path.exists() {
                    return Ok(Some(path));
                }
            }
        }

        Ok(None)
    }

    /// Read configuration from a concrete file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;

        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
            .as_str()
        {
            "toml" => toml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse TOML {}: {e}", path.display()))
            }),
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse YAML {}: {e}", path.display()))
            }),
            other => Err(Error::Config(format!(
                "Unsupported config format '{}', expected toml/yaml",
                other
            ))),
        }
    }

    /// Apply environment overrides using `lookup` to read variables.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("QR_DATA_URL") {
            self.default_url = DefaultUrl(url);
        }
        self.output.apply_env_overrides(&lookup);
        self.style.apply_env_overrides(&lookup);
        self.logging.apply_env_overrides(&lookup);
    }

    /// URL to encode: the command-line override if present, else the configured default.
    pub fn effective_url(&self, cli_url: Option<&str>) -> String {
        cli_url
            .map(str::to_string)
            .unwrap_or_else(|| self.default_url.0.clone())
    }
}

/// Output location of the generated image
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    /// Directory created on demand before writing
    pub directory: PathBuf,
    /// Filename inside `directory`; its extension picks the image format
    pub filename: String,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_DIRECTORY),
            filename: DEFAULT_FILENAME.to_string(),
        }
    }
}

impl OutputOptions {
    pub(crate) fn apply_env_overrides<F>(&mut self, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("QR_CODE_DIR") {
            self.directory = PathBuf::from(dir);
        }
        if let Some(filename) = lookup("QR_CODE_FILENAME") {
            self.filename = filename;
        }
    }

    /// Full path of the output image
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.filename)
    }
}

/// QR error correction level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ErrorCorrection {
    /// ~7% recovery
    L,
    /// ~15% recovery
    M,
    /// ~25% recovery
    Q,
    /// ~30% recovery
    H,
}

impl ErrorCorrection {
    /// Matching `qrcode` level
    pub fn to_ec_level(self) -> qrcode::EcLevel {
        match self {
            Self::L => qrcode::EcLevel::L,
            Self::M => qrcode::EcLevel::M,
            Self::Q => qrcode::EcLevel::Q,
            Self::H => qrcode::EcLevel::H,
        }
    }
}

impl FromStr for ErrorCorrection {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "L" => Ok(Self::L),
            "M" => Ok(Self::M),
            "Q" => Ok(Self::Q),
            "H" => Ok(Self::H),
            _ => Err(format!(
                "Unsupported error correction level '{value}', expected L, M, Q or H"
            )),
        }
    }
}

/// Colors and symbol geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleOptions {
    /// Color of dark modules (name, `#rrggbb` or `rgb(r, g, b)`)
    pub fill_color: String,
    /// Color of light modules and the quiet zone
    pub back_color: String,
    /// Smallest QR version to try; grows until the data fits
    pub version: i16,
    /// Pixels per module
    pub box_size: u32,
    /// Quiet zone width in modules
    pub border: u32,
    /// Error correction level
    pub error_correction: ErrorCorrection,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            fill_color: DEFAULT_FILL_COLOR.to_string(),
            back_color: DEFAULT_BACK_COLOR.to_string(),
            version: 1,
            box_size: 10,
            border: 5,
            error_correction: ErrorCorrection::M,
        }
    }
}

impl StyleOptions {
    pub(crate) fn apply_env_overrides<F>(&mut self, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(fill) = lookup("FILL_COLOR") {
            self.fill_color = fill;
        }
        if let Some(back) = lookup("BACK_COLOR") {
            self.back_color = back;
        }
        if let Some(version) = lookup("QR_VERSION") {
            if let Ok(parsed) = version.parse::<i16>() {
                self.version = parsed.clamp(1, 40);
            }
        }
        if let Some(box_size) = lookup("QR_BOX_SIZE") {
            if let Ok(parsed) = box_size.parse::<u32>() {
                self.box_size = parsed.max(1);
            }
        }
        if let Some(border) = lookup("QR_BORDER") {
            if let Ok(parsed) = border.parse::<u32>() {
                self.border = parsed;
            }
        }
        if let Some(level) = lookup("QR_ERROR_CORRECTION") {
            if let Ok(parsed) = level.parse::<ErrorCorrection>() {
                self.error_correction = parsed;
            }
        }
    }
}

/// Structured logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Default log level (overridable via `QRGEN_LOG_LEVEL`)
    pub level: String,
    /// Optional log file path for teeing logs
    pub file: Option<PathBuf>,
    /// Force ANSI colors in stdout logging
    pub color: bool,
    /// Optional log rotation strategy applied to `file`
    pub rotation: Option<LogRotation>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            color: true,
            rotation: None,
        }
    }
}

impl LoggingOptions {
    pub(crate) fn apply_env_overrides<F>(&mut self, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("QRGEN_LOG_LEVEL") {
            self.level = level;
        }
        if let Some(file) = lookup("QRGEN_LOG_FILE") {
            if file.trim().is_empty() {
                self.file = None;
            } else {
                self.file = Some(PathBuf::from(file));
            }
        }
        if let Some(color) = lookup("QRGEN_LOG_COLOR") {
            match color.to_ascii_lowercase().as_str() {
                "0" | "false" | "off" => self.color = false,
                "1" | "true" | "on" => self.color = true,
                _ => {}
            }
        }
        if let Some(rotation) = lookup("QRGEN_LOG_ROTATION") {
            if let Some(parsed) = LogRotation::from_str(&rotation) {
                self.rotation = Some(parsed);
            }
        }
    }
}

/// Supported log rotation policies for file sinks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Rotate log files once per hour
    Hourly,
    /// Rotate log files once per day
    Daily,
}

impl LogRotation {
    fn from_str(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            _ => None,
        }
    }
}
