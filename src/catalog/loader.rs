// SPDX-License-Identifier: PMPL-1.0-or-later

//! Building catalogs from resource files.

use super::table::ContextTable;
use super::{Catalog, LocaleTable};
use crate::error::{ResourceError, Result};
use crate::locale::LocaleId;
use crate::ts;
use crate::types::{Entry, LocaleDocument};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// How resources are discovered and normalised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Trim Unicode direction marks (U+200E and friends) that translation
    /// tools wrap around translations.
    pub strip_direction_marks: bool,
    /// How deep `load_dir` descends below the resource directory.
    pub max_depth: usize,
    /// Only load `<prefix>-<locale>.ts` / `<prefix>_<locale>.ts` files.
    pub file_prefix: Option<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            strip_direction_marks: true,
            max_depth: 2,
            file_prefix: None,
        }
    }
}

/// Accumulates parsed documents, then freezes them into a [`Catalog`].
///
/// Nothing is published until [`CatalogBuilder::build`]; a failed `add_*`
/// leaves the caller free to discard the builder.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    options: LoadOptions,
    locales: BTreeMap<String, LocaleTable>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: LoadOptions) -> Self {
        Self {
            options,
            locales: BTreeMap::new(),
        }
    }

    /// Add a parsed document. `locale` overrides the document's `language`.
    pub fn add_document(
        &mut self,
        locale: Option<&str>,
        document: LocaleDocument,
        origin: Option<&Path>,
    ) -> Result<&LocaleTable> {
        let path = origin
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(ts::MEMORY_PATH));

        let declared = locale
            .map(str::to_string)
            .or_else(|| document.language.clone())
            .or_else(|| {
                origin.and_then(|p| ts::locale_from_file_name(p, self.options.file_prefix.as_deref()))
            })
            .ok_or_else(|| ResourceError::UnknownLocale { path: path.clone() })?;

        let id: LocaleId = declared.parse().map_err(|err| ResourceError::Malformed {
            path: path.clone(),
            message: format!("invalid locale {:?}: {}", declared, err),
        })?;
        if let (Some(explicit), Some(language)) = (locale, document.language.as_deref()) {
            if explicit != language {
                tracing::debug!(
                    path = %path.display(),
                    declared = language,
                    used = explicit,
                    "document language overridden"
                );
            }
        }

        let key = id.to_string();
        if let Some(existing) = self.locales.get(&key) {
            return Err(ResourceError::DuplicateLocale {
                locale: key,
                first: existing
                    .origin
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(ts::MEMORY_PATH)),
                second: path,
            });
        }

        let table = self.index(id, document, origin.map(Path::to_path_buf));
        tracing::debug!(
            locale = %key,
            contexts = table.contexts.len(),
            conflicts = table.conflicts.len(),
            "loaded locale table"
        );
        Ok(self.locales.entry(key).or_insert(table))
    }

    /// Parse resource text held in memory.
    pub fn add_str(&mut self, locale: Option<&str>, resource: &str) -> Result<&LocaleTable> {
        let document = ts::parse_str(resource)?;
        self.add_document(locale, document, None)
    }

    /// Read and parse one file.
    pub fn add_file(&mut self, path: &Path) -> Result<&LocaleTable> {
        let document = ts::parse_file(path)?;
        self.add_document(None, document, Some(path))
    }

    /// Read every `.ts` file below `dir` (sorted by path, up to `max_depth`).
    /// Returns how many files were added.
    pub fn add_dir(&mut self, dir: &Path) -> Result<usize> {
        let mut files = Vec::new();
        for entry in WalkDir::new(dir)
            .max_depth(self.options.max_depth)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|err| ResourceError::Io {
                path: err.path().unwrap_or(dir).to_path_buf(),
                source: err.into(),
            })?;
            if entry.file_type().is_file() && self.accepts(entry.path()) {
                files.push(entry.into_path());
            }
        }

        if files.is_empty() {
            tracing::warn!(dir = %dir.display(), "no translation files found");
        }
        for file in &files {
            self.add_file(file)?;
        }
        Ok(files.len())
    }

    pub fn build(self) -> Catalog {
        let revision = revision_of(&self.locales);
        Catalog {
            locales: self.locales,
            revision,
        }
    }

    fn accepts(&self, path: &Path) -> bool {
        let is_ts = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("ts"))
            .unwrap_or(false);
        if !is_ts {
            return false;
        }
        match self.options.file_prefix.as_deref() {
            Some(prefix) => ts::locale_from_file_name(path, Some(prefix)).is_some(),
            None => true,
        }
    }

    fn index(&self, id: LocaleId, document: LocaleDocument, origin: Option<PathBuf>) -> LocaleTable {
        // Contexts may be split across several blocks; merge them in order.
        let mut grouped: BTreeMap<String, Vec<Entry>> = BTreeMap::new();
        for context in document.contexts {
            let bucket = grouped.entry(context.name).or_default();
            for mut entry in context.entries {
                if self.options.strip_direction_marks {
                    entry.translation = strip_direction_marks(&entry.translation);
                }
                bucket.push(entry);
            }
        }

        let mut conflicts = Vec::new();
        let contexts = grouped
            .into_iter()
            .map(|(name, entries)| {
                let table = ContextTable::build(name.clone(), entries, &mut conflicts);
                (name, table)
            })
            .collect();

        LocaleTable {
            id,
            source_language: document.source_language,
            format_version: document.format_version,
            origin,
            contexts,
            conflicts,
        }
    }
}

fn is_direction_mark(c: char) -> bool {
    matches!(
        c,
        '\u{061C}' | '\u{200E}' | '\u{200F}' | '\u{202A}'..='\u{202E}' | '\u{2066}'..='\u{2069}'
    )
}

/// Leading and trailing marks only; marks inside the text are kept.
fn strip_direction_marks(text: &str) -> String {
    text.trim_matches(is_direction_mark).to_string()
}

/// BLAKE3 over everything a table exposes, in sorted order.
///
/// Locales, contexts and entries are preceded by their counts and optional
/// fields by a presence byte, so distinct catalogs never share a byte stream.
fn revision_of(locales: &BTreeMap<String, LocaleTable>) -> String {
    let mut hasher = blake3::Hasher::new();
    count(&mut hasher, locales.len());
    for (key, table) in locales {
        field(&mut hasher, key);
        field(&mut hasher, &table.source_language);
        optional(&mut hasher, table.format_version.as_deref());
        let origin = table.origin.as_ref().map(|p| p.to_string_lossy());
        optional(&mut hasher, origin.as_deref());

        count(&mut hasher, table.contexts.len());
        for context in table.contexts.values() {
            field(&mut hasher, context.name());
            count(&mut hasher, context.entries().len());
            for entry in context.entries() {
                entry_fields(&mut hasher, entry);
            }
        }
    }
    hasher.finalize().to_hex().to_string()
}

fn entry_fields(hasher: &mut blake3::Hasher, entry: &Entry) {
    field(hasher, &entry.source_text);
    optional(hasher, entry.disambiguation.as_deref());
    field(hasher, &entry.translation);
    field(hasher, entry.status.as_str());
    optional(hasher, entry.translator_comment.as_deref());
    optional(hasher, entry.extra_comment.as_deref());
    count(hasher, entry.locations.len());
    for location in &entry.locations {
        field(hasher, &location.file);
        match location.line {
            Some(line) => {
                hasher.update(&[1]);
                hasher.update(&line.to_le_bytes());
            }
            None => {
                hasher.update(&[0]);
            }
        }
    }
}

fn count(hasher: &mut blake3::Hasher, n: usize) {
    hasher.update(&(n as u64).to_le_bytes());
}

/// Length-prefixed so adjacent fields cannot run together.
fn field(hasher: &mut blake3::Hasher, value: &str) {
    count(hasher, value.len());
    hasher.update(value.as_bytes());
}

fn optional(hasher: &mut blake3::Hasher, value: Option<&str>) {
    match value {
        Some(value) => {
            hasher.update(&[1]);
            field(hasher, value);
        }
        None => {
            hasher.update(&[0]);
        }
    }
}
