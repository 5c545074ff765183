// SPDX-License-Identifier: PMPL-1.0-or-later

//! Serialization helpers for printed/exported reports

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportOutputFormat {
    Text,
    Json,
    Yaml,
}

impl ReportOutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "text" | "txt" => Some(ReportOutputFormat::Text),
            "json" => Some(ReportOutputFormat::Json),
            "yaml" | "yml" => Some(ReportOutputFormat::Yaml),
            _ => None,
        }
    }

    /// Guess from a file extension, defaulting to text.
    pub fn from_path(path: &std::path::Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::parse)
            .unwrap_or(ReportOutputFormat::Text)
    }

    /// An explicit format wins; otherwise the output file's extension
    /// decides, and console output is text.
    pub fn resolve(explicit: Option<Self>, output: Option<&std::path::Path>) -> Self {
        explicit
            .or_else(|| output.map(Self::from_path))
            .unwrap_or(ReportOutputFormat::Text)
    }

    /// Structured encodings only; text is produced by the formatter.
    pub fn serialize<T: Serialize>(&self, value: &T) -> Result<Option<String>> {
        match self {
            ReportOutputFormat::Text => Ok(None),
            ReportOutputFormat::Json => Ok(Some(serde_json::to_string_pretty(value)?)),
            ReportOutputFormat::Yaml => Ok(Some(serde_yaml::to_string(value)?)),
        }
    }
}
