// SPDX-License-Identifier: PMPL-1.0-or-later

//! Locale identifiers and locale resolution.
//!
//! Resource files name their locale the way Qt does: `fr`, `zh_CN`,
//! `en_US`, occasionally with a script (`sr_Latn`) or a BCP 47 style dash
//! (`zh-CN`). [`LocaleId`] normalises all of them to the underscore form.
//!
//! [`resolve`] maps a requested locale onto one the catalog actually has.

mod iso639;

pub use iso639::{is_valid_iso639_1, language_name, native_name};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleError {
    #[error("empty locale identifier")]
    Empty,
    #[error("unknown language code {0:?}")]
    UnknownLanguage(String),
    #[error("invalid locale component {component:?} in {locale:?}")]
    InvalidComponent { locale: String, component: String },
}

/// A parsed `language[_Script][_REGION]` identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocaleId {
    language: String,
    script: Option<String>,
    region: Option<String>,
}

impl LocaleId {
    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// The same locale without its region.
    pub fn without_region(&self) -> LocaleId {
        LocaleId {
            language: self.language.clone(),
            script: self.script.clone(),
            region: None,
        }
    }

    /// English display name such as `Chinese (CN)`.
    pub fn display_name(&self) -> String {
        let base: &str = language_name(&self.language).unwrap_or(self.language.as_str());
        match (&self.script, &self.region) {
            (None, None) => base.to_string(),
            (Some(script), None) => format!("{} ({})", base, script),
            (None, Some(region)) => format!("{} ({})", base, region),
            (Some(script), Some(region)) => format!("{} ({}, {})", base, script, region),
        }
    }
}

impl FromStr for LocaleId {
    type Err = LocaleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        // Drop encoding and modifier suffixes: `de_DE.UTF-8`, `ca_ES@valencia`.
        let trimmed = value
            .trim()
            .split(['.', '@'])
            .next()
            .unwrap_or_default();
        if trimmed.is_empty() {
            return Err(LocaleError::Empty);
        }

        let mut parts = trimmed.split(['_', '-']);
        let language = parts.next().unwrap_or_default().to_ascii_lowercase();
        let known = match language.len() {
            2 => is_valid_iso639_1(&language),
            // ISO 639-2/3 codes (`fil`, `ast`) are accepted without validation.
            3 => language.bytes().all(|b| b.is_ascii_alphabetic()),
            _ => false,
        };
        if !known {
            return Err(LocaleError::UnknownLanguage(language));
        }

        let mut script = None;
        let mut region = None;
        for part in parts {
            let invalid = || LocaleError::InvalidComponent {
                locale: value.to_string(),
                component: part.to_string(),
            };
            let is_alpha = part.bytes().all(|b| b.is_ascii_alphabetic());
            if part.len() == 4 && is_alpha && script.is_none() && region.is_none() {
                let mut chars = part.chars();
                let head = chars.next().map(|c| c.to_ascii_uppercase());
                let tail: String = chars.map(|c| c.to_ascii_lowercase()).collect();
                script = head.map(|h| format!("{}{}", h, tail));
            } else if part.len() == 2 && is_alpha && region.is_none() {
                region = Some(part.to_ascii_uppercase());
            } else if part.len() == 3 && part.bytes().all(|b| b.is_ascii_digit()) && region.is_none()
            {
                region = Some(part.to_string());
            } else {
                return Err(invalid());
            }
        }

        Ok(LocaleId {
            language,
            script,
            region,
        })
    }
}

impl fmt::Display for LocaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.language)?;
        if let Some(script) = &self.script {
            write!(f, "_{}", script)?;
        }
        if let Some(region) = &self.region {
            write!(f, "_{}", region)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for LocaleId {
    type Error = LocaleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LocaleId> for String {
    fn from(id: LocaleId) -> Self {
        id.to_string()
    }
}

/// Pick the best available locale for `requested`.
///
/// Resolution order (first hit wins):
/// 1. exact match after normalisation (`zh-CN` finds `zh_CN`)
/// 2. same language and script without region (`fr_FR` finds `fr`)
/// 3. bare language (`sr_Latn_RS` finds `sr`)
/// 4. any available locale of the same language, in sorted order (`zh` finds `zh_CN`)
///
/// `available` must contain canonical identifiers. Unparseable requests
/// only match verbatim.
pub fn resolve<'a, I>(requested: &str, available: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut available: Vec<&'a str> = available.into_iter().collect();
    available.sort_unstable();

    let Ok(wanted) = requested.parse::<LocaleId>() else {
        return available.into_iter().find(|a| *a == requested);
    };

    let canonical = wanted.to_string();
    if let Some(hit) = available.iter().copied().find(|a| *a == canonical) {
        return Some(hit);
    }

    let no_region = wanted.without_region().to_string();
    if let Some(hit) = available.iter().copied().find(|a| *a == no_region) {
        return Some(hit);
    }

    if let Some(hit) = available.iter().copied().find(|a| *a == wanted.language()) {
        return Some(hit);
    }

    available.into_iter().find(|a| {
        a.parse::<LocaleId>()
            .map(|id| id.language() == wanted.language())
            .unwrap_or(false)
    })
}
