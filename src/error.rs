// SPDX-License-Identifier: PMPL-1.0-or-later

//! Errors raised while loading translation resources.
//!
//! Lookups never fail; only loading (and reloading) can. A failed load
//! leaves any previously published catalog untouched.

use std::path::PathBuf;
use thiserror::Error;

/// Why a translation resource could not be turned into a catalog.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: xml error: {message}")]
    Xml { path: PathBuf, message: String },

    #[error("{path}: <{element}> is missing required {field}")]
    MissingField {
        path: PathBuf,
        element: &'static str,
        field: &'static str,
    },

    #[error("{path}: {message}")]
    Malformed { path: PathBuf, message: String },

    #[error("{path}: cannot determine locale (no language attribute and no locale suffix in file name)")]
    UnknownLocale { path: PathBuf },

    #[error("locale {locale} is provided by both {first} and {second}")]
    DuplicateLocale {
        locale: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("configuration {path}: {message}")]
    Config { path: PathBuf, message: String },
}

impl ResourceError {
    /// Path of the resource that failed, when the error is tied to one.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            ResourceError::Io { path, .. }
            | ResourceError::Xml { path, .. }
            | ResourceError::MissingField { path, .. }
            | ResourceError::Malformed { path, .. }
            | ResourceError::UnknownLocale { path }
            | ResourceError::Config { path, .. } => Some(path),
            ResourceError::DuplicateLocale { second, .. } => Some(second),
        }
    }
}

pub type Result<T> = std::result::Result<T, ResourceError>;
