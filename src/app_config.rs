use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use crate::script_converter::TargetVariant;

/// Application configuration module
/// This module handles loading, validating and defaulting configuration
/// settings. Every field is optional in the JSON file.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Conversion defaults
    #[serde(default)]
    pub conversion: ConversionConfig,

    /// Output naming
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Defaults applied to conversion requests
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ConversionConfig {
    /// Target script variant
    #[serde(default)]
    pub variant: TargetVariant,

    /// One line per cue in flat text output
    #[serde(default)]
    pub segment_by_line: bool,

    /// Apply script conversion to flat text output
    #[serde(default)]
    pub convert_script: bool,
}

/// Output file naming
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OutputConfig {
    // @field: Extension of flat text files, without the dot
    #[serde(default = "default_text_extension")]
    pub text_extension: String,

    // @field: Marker inserted before the extension of converted subtitle files
    #[serde(default = "default_converted_suffix")]
    pub converted_suffix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            text_extension: default_text_extension(),
            converted_suffix: default_converted_suffix(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the log facade
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_text_extension() -> String {
    "txt".to_string()
}

fn default_converted_suffix() -> String {
    "_T".to_string()
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let extension = self.output.text_extension.trim_start_matches('.');
        if extension.is_empty() {
            return Err(anyhow!("Text extension must not be empty"));
        }
        if extension.contains(['/', '\\']) {
            return Err(anyhow!("Text extension must not contain path separators: {}", extension));
        }

        // An empty suffix would overwrite the input subtitle
        if self.output.converted_suffix.is_empty() {
            return Err(anyhow!("Converted subtitle suffix must not be empty"));
        }
        if self.output.converted_suffix.contains(['/', '\\']) {
            return Err(anyhow!(
                "Converted subtitle suffix must not contain path separators: {}",
                self.output.converted_suffix
            ));
        }

        Ok(())
    }
}
