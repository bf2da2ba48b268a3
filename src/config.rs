use crate::report::DEFAULT_REPORT_PATH;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

pub const DEFAULT_CONFIG_PATH: &str = "config/config.toml";
pub const DEFAULT_INPUT_PATH: &str = "data/production_data.csv";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub app: AppSection,
    pub logging: LoggingSection,
    #[serde(default)]
    pub input: Option<InputSection>,
    #[serde(default)]
    pub report: Option<ReportSection>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSection {
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSection {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InputSection {
    /// CSV file with production measurements
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportSection {
    /// Workbook output path (default: Lean_Waste_Analysis_Report.xlsx)
    pub path: Option<PathBuf>,
    /// Optional JSON summary path; empty disables it
    pub summary_path: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

pub fn load_default() -> Result<Config, ConfigError> {
    load_from_path(DEFAULT_CONFIG_PATH)
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)?;
    Ok(config)
}

fn non_empty(path: Option<&Path>) -> Option<&Path> {
    path.filter(|path| !path.as_os_str().is_empty())
}

impl Config {
    /// Returns the input CSV path (default: data/production_data.csv)
    pub fn input_path(&self) -> &Path {
        non_empty(self.input.as_ref().and_then(|s| s.path.as_deref()))
            .unwrap_or(Path::new(DEFAULT_INPUT_PATH))
    }

    /// Returns the workbook path (default: Lean_Waste_Analysis_Report.xlsx)
    pub fn report_path(&self) -> &Path {
        non_empty(self.report.as_ref().and_then(|s| s.path.as_deref()))
            .unwrap_or(Path::new(DEFAULT_REPORT_PATH))
    }

    pub fn summary_path(&self) -> Option<&Path> {
        non_empty(self.report.as_ref()?.summary_path.as_deref())
    }

    /// Returns the configured log level, falling back to INFO when unrecognized.
    pub fn log_level(&self) -> Level {
        self.logging.level.parse().unwrap_or(Level::INFO)
    }
}
