//! Configuration types for the console front end.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// How answers are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}' (expected text or json)", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Which answers to compute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parts {
    #[default]
    Both,
    One,
    Two,
}

impl Parts {
    pub fn includes_one(&self) -> bool {
        matches!(self, Parts::Both | Parts::One)
    }

    pub fn includes_two(&self) -> bool {
        matches!(self, Parts::Both | Parts::Two)
    }
}

impl FromStr for Parts {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "both" => Ok(Parts::Both),
            "1" | "one" => Ok(Parts::One),
            "2" | "two" => Ok(Parts::Two),
            other => Err(format!("unknown part '{}' (expected both, 1 or 2)", other)),
        }
    }
}

impl fmt::Display for Parts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parts::Both => write!(f, "both"),
            Parts::One => write!(f, "1"),
            Parts::Two => write!(f, "2"),
        }
    }
}

/// Console configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Program text to load (stdin when unset)
    pub input_path: Option<PathBuf>,
    /// Output format for the answers
    pub format: OutputFormat,
    /// Tracing filter used when RUST_LOG is not set
    pub log_filter: String,
    /// Which answers to compute
    pub parts: Parts,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            input_path: None,
            format: OutputFormat::Text,
            log_filter: "warn,handheld_vm=info".to_string(),
            parts: Parts::Both,
        }
    }
}
