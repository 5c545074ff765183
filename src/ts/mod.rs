// SPDX-License-Identifier: PMPL-1.0-or-later

//! Qt Linguist `.ts` translation documents.
//!
//! One document per locale. The root `<TS>` element declares the target
//! `language` and the `sourcelanguage`; each `<context>` holds `<message>`
//! records with their `<source>`, optional `<comment>` (disambiguation),
//! `<location>` annotations and a `<translation>` whose `type` attribute
//! carries the status.
//!
//! Placeholders such as `%1` are passed through verbatim.

mod parser;

use crate::error::{ResourceError, Result};
use crate::types::LocaleDocument;
use std::path::Path;

pub(crate) const MEMORY_PATH: &str = "<memory>";

/// Parse a document held in memory.
pub fn parse_str(input: &str) -> Result<LocaleDocument> {
    parser::Parser::new(input, Path::new(MEMORY_PATH)).parse()
}

/// Parse raw bytes read from `path`. A UTF-8 byte order mark is tolerated.
pub fn parse_bytes(bytes: &[u8], path: &Path) -> Result<LocaleDocument> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let text = std::str::from_utf8(bytes).map_err(|err| ResourceError::Malformed {
        path: path.to_path_buf(),
        message: format!("not valid UTF-8 ({})", err),
    })?;
    parser::Parser::new(text, path).parse()
}

/// Read and parse a document from disk.
pub fn parse_file(path: &Path) -> Result<LocaleDocument> {
    let bytes = std::fs::read(path).map_err(|source| ResourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_bytes(&bytes, path)
}

/// Locale suffix of a file name such as `dsnote-zh_CN.ts` or `app_fr.ts`.
///
/// When `prefix` is given the stem must start with it followed by `-` or `_`.
pub fn locale_from_file_name(path: &Path, prefix: Option<&str>) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let rest = match prefix {
        Some(prefix) => {
            let rest = stem.strip_prefix(prefix)?;
            rest.strip_prefix('-').or_else(|| rest.strip_prefix('_'))?
        }
        None => {
            // Last `-` splits app name from locale; `_` is ambiguous because
            // it also separates language from region.
            match stem.rsplit_once('-') {
                Some((_, locale)) => locale,
                None => stem.split_once('_').map(|(_, locale)| locale)?,
            }
        }
    };
    if rest.is_empty() {
        None
    } else {
        Some(rest.to_string())
    }
}
