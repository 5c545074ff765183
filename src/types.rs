// SPDX-License-Identifier: PMPL-1.0-or-later

//! Core type definitions for ts-catalog
//!
//! A translation resource is parsed into a [`LocaleDocument`]; the catalog
//! then indexes its [`Entry`] records per context.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Translation lifecycle status as recorded in a resource file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// No `type` attribute: the translation is complete.
    Finished,
    /// `type="unfinished"`: untranslated or awaiting review.
    Unfinished,
    /// `type="vanished"` (or legacy `obsolete`): kept for translator history.
    Vanished,
}

impl Status {
    /// Map the `type` attribute of a `<translation>` element.
    pub fn from_type_attr(value: Option<&str>) -> Option<Self> {
        match value {
            None | Some("") => Some(Status::Finished),
            Some("unfinished") => Some(Status::Unfinished),
            Some("vanished") | Some("obsolete") => Some(Status::Vanished),
            Some(_) => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Finished => "finished",
            Status::Unfinished => "unfinished",
            Status::Vanished => "vanished",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a status query; `Missing` means no record exists for the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupStatus {
    Finished,
    Unfinished,
    Vanished,
    Missing,
}

impl LookupStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupStatus::Finished => "finished",
            LookupStatus::Unfinished => "unfinished",
            LookupStatus::Vanished => "vanished",
            LookupStatus::Missing => "missing",
        }
    }
}

impl From<Status> for LookupStatus {
    fn from(status: Status) -> Self {
        match status {
            Status::Finished => LookupStatus::Finished,
            Status::Unfinished => LookupStatus::Unfinished,
            Status::Vanished => LookupStatus::Vanished,
        }
    }
}

impl fmt::Display for LookupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a source string was found by the extraction tool. Informational only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}", self.file, line),
            None => f.write_str(&self.file),
        }
    }
}

/// One message record of a context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub context: String,
    pub source_text: String,
    /// Distinguishes identical source strings with different meanings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disambiguation: Option<String>,
    /// Empty for unfinished entries that have no draft.
    pub translation: String,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translator_comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_comment: Option<String>,
}

impl Entry {
    /// Lookup key of this entry within its context.
    pub fn key(&self) -> MessageKey<'_> {
        MessageKey {
            source_text: &self.source_text,
            disambiguation: self.disambiguation.as_deref(),
        }
    }

    /// Entries that take part in lookups (anything not vanished).
    pub fn is_active(&self) -> bool {
        self.status != Status::Vanished
    }
}

/// Borrowed `(source_text, disambiguation)` pair identifying a message in a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageKey<'a> {
    pub source_text: &'a str,
    pub disambiguation: Option<&'a str>,
}

impl<'a> MessageKey<'a> {
    pub fn new(source_text: &'a str, disambiguation: Option<&'a str>) -> Self {
        Self {
            source_text,
            // An empty disambiguation is the same as none.
            disambiguation: disambiguation.filter(|d| !d.is_empty()),
        }
    }
}

impl fmt::Display for MessageKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.disambiguation {
            Some(d) => write!(f, "{:?} ({})", self.source_text, d),
            None => write!(f, "{:?}", self.source_text),
        }
    }
}

/// A `<context>` block as it appears in the resource, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextDocument {
    pub name: String,
    pub entries: Vec<Entry>,
}

/// A parsed per-locale resource, before indexing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleDocument {
    /// `language` attribute of the root element, if declared.
    pub language: Option<String>,
    /// `sourcelanguage` attribute; `en` when absent.
    pub source_language: String,
    /// Format version attribute, e.g. `2.1`.
    pub format_version: Option<String>,
    pub contexts: Vec<ContextDocument>,
}

impl LocaleDocument {
    pub fn entry_count(&self) -> usize {
        self.contexts.iter().map(|c| c.entries.len()).sum()
    }
}
