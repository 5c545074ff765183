// SPDX-License-Identifier: PMPL-1.0-or-later

//! Translation catalog: per-locale message tables with source-text fallback.
//!
//! # Invariants
//!
//! 1. **Lookups never fail**: a missing locale, context or key, an
//!    unfinished entry, or a vanished entry all yield the source text.
//! 2. **Immutable after load**: a [`Catalog`] has no mutating methods.
//!    Reloading builds a new catalog and publishes it through
//!    [`CatalogHandle`], so readers see one revision or the other.
//! 3. **Last write wins**: a key repeated within a context resolves to the
//!    last non-vanished record in document order.
//! 4. **Deterministic revision**: identical resource content yields the
//!    same [`Catalog::revision`].

mod handle;
mod loader;
mod table;

pub use handle::{CatalogHandle, ReloadOutcome};
pub use loader::{CatalogBuilder, LoadOptions};
pub use table::{Conflict, ContextTable, StatusCounts};

use crate::error::Result;
use crate::locale::{self, LocaleId};
use crate::types::{Entry, LocaleDocument, LookupStatus};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// The message tables of one locale.
#[derive(Debug, Clone)]
pub struct LocaleTable {
    id: LocaleId,
    source_language: String,
    format_version: Option<String>,
    origin: Option<PathBuf>,
    contexts: BTreeMap<String, ContextTable>,
    conflicts: Vec<Conflict>,
}

impl LocaleTable {
    pub fn id(&self) -> &LocaleId {
        &self.id
    }

    /// Language the source strings are written in (`sourcelanguage`).
    pub fn source_language(&self) -> &str {
        &self.source_language
    }

    /// `version` attribute of the resource, e.g. `2.1`.
    pub fn format_version(&self) -> Option<&str> {
        self.format_version.as_deref()
    }

    /// File the table was loaded from, when it came from disk.
    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }

    pub fn context(&self, name: &str) -> Option<&ContextTable> {
        self.contexts.get(name)
    }

    /// Contexts sorted by name.
    pub fn contexts(&self) -> impl Iterator<Item = &ContextTable> {
        self.contexts.values()
    }

    /// Keys that were repeated with different translations at load time.
    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    pub fn counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for table in self.contexts.values() {
            counts.merge(table.counts());
        }
        counts
    }

    pub fn lookup<'a>(
        &'a self,
        context: &str,
        source_text: &'a str,
        disambiguation: Option<&str>,
    ) -> &'a str {
        match self.contexts.get(context) {
            Some(table) => table.lookup(source_text, disambiguation),
            None => source_text,
        }
    }

    pub fn status(
        &self,
        context: &str,
        source_text: &str,
        disambiguation: Option<&str>,
    ) -> LookupStatus {
        self.contexts
            .get(context)
            .map(|table| table.status(source_text, disambiguation))
            .unwrap_or(LookupStatus::Missing)
    }
}

/// Immutable set of locale tables.
///
/// ```
/// use ts_catalog::catalog::Catalog;
///
/// let catalog = Catalog::load(
///     "nl",
///     r#"<TS version="2.1" language="nl"><context><name>NotesPage</name>
///        <message><source>Clear</source><translation>Wissen</translation></message>
///        </context></TS>"#,
/// )
/// .unwrap();
/// assert_eq!(catalog.lookup("nl", "NotesPage", "Clear", None), "Wissen");
/// assert_eq!(catalog.lookup("nl", "NotesPage", "Cancel", None), "Cancel");
/// ```
#[derive(Debug, Clone)]
pub struct Catalog {
    locales: BTreeMap<String, LocaleTable>,
    revision: String,
}

impl Catalog {
    /// A catalog with no locales; every lookup returns the source text.
    pub fn empty() -> Self {
        CatalogBuilder::new().build()
    }

    /// Build a single-locale catalog from resource text.
    ///
    /// `locale` takes precedence over the document's own `language` attribute.
    pub fn load(locale: &str, resource: &str) -> Result<Self> {
        let mut builder = CatalogBuilder::new();
        builder.add_str(Some(locale), resource)?;
        Ok(builder.build())
    }

    /// Build from documents that were already parsed. Each document must
    /// declare its `language`.
    pub fn from_documents<I>(documents: I) -> Result<Self>
    where
        I: IntoIterator<Item = LocaleDocument>,
    {
        let mut builder = CatalogBuilder::new();
        for document in documents {
            builder.add_document(None, document, None)?;
        }
        Ok(builder.build())
    }

    /// Load one resource file.
    pub fn load_file(path: &Path, options: &LoadOptions) -> Result<Self> {
        let mut builder = CatalogBuilder::with_options(options.clone());
        builder.add_file(path)?;
        Ok(builder.build())
    }

    /// Load every `.ts` file under `dir`. Any malformed file fails the whole load.
    pub fn load_dir(dir: &Path, options: &LoadOptions) -> Result<Self> {
        let mut builder = CatalogBuilder::with_options(options.clone());
        builder.add_dir(dir)?;
        Ok(builder.build())
    }

    /// Content digest of every table in the catalog (BLAKE3, hex).
    pub fn revision(&self) -> &str {
        &self.revision
    }

    /// Canonical locale identifiers, sorted.
    pub fn locale_ids(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }

    pub fn locales(&self) -> impl Iterator<Item = &LocaleTable> {
        self.locales.values()
    }

    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }

    /// Best available locale for `requested`, see [`locale::resolve`].
    pub fn resolve_locale(&self, requested: &str) -> Option<&str> {
        if self.locales.contains_key(requested) {
            return self.locales.get_key_value(requested).map(|(k, _)| k.as_str());
        }
        locale::resolve(requested, self.locale_ids())
    }

    /// Table for `requested` after locale resolution.
    pub fn locale(&self, requested: &str) -> Option<&LocaleTable> {
        let resolved = self.resolve_locale(requested)?;
        self.locales.get(resolved)
    }

    /// Context names of a locale, sorted.
    pub fn contexts(&self, locale: &str) -> Vec<&str> {
        self.locale(locale)
            .map(|table| table.contexts().map(ContextTable::name).collect())
            .unwrap_or_default()
    }

    /// Records of one context, vanished ones included.
    pub fn entries(&self, locale: &str, context: &str) -> &[Entry] {
        self.locale(locale)
            .and_then(|table| table.context(context))
            .map(ContextTable::entries)
            .unwrap_or(&[])
    }

    /// Localized string for a key in `locale`, falling back to `source_text`.
    pub fn lookup<'a>(
        &'a self,
        locale: &str,
        context: &str,
        source_text: &'a str,
        disambiguation: Option<&str>,
    ) -> &'a str {
        self.translator(locale)
            .lookup(context, source_text, disambiguation)
    }

    pub fn status(
        &self,
        locale: &str,
        context: &str,
        source_text: &str,
        disambiguation: Option<&str>,
    ) -> LookupStatus {
        self.translator(locale)
            .status(context, source_text, disambiguation)
    }

    /// A view bound to one resolved locale.
    pub fn translator(&self, locale: &str) -> Translator<'_> {
        Translator {
            table: self.locale(locale),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::empty()
    }
}

/// Lookups against a single locale. Unknown locales translate nothing.
#[derive(Debug, Clone, Copy)]
pub struct Translator<'c> {
    table: Option<&'c LocaleTable>,
}

impl<'c> Translator<'c> {
    /// Resolved locale, `None` when the catalog had no match.
    pub fn locale(&self) -> Option<&'c LocaleId> {
        self.table.map(LocaleTable::id)
    }

    pub fn lookup<'a>(
        &self,
        context: &str,
        source_text: &'a str,
        disambiguation: Option<&str>,
    ) -> &'a str
    where
        'c: 'a,
    {
        match self.table {
            Some(table) => table.lookup(context, source_text, disambiguation),
            None => source_text,
        }
    }

    pub fn status(
        &self,
        context: &str,
        source_text: &str,
        disambiguation: Option<&str>,
    ) -> LookupStatus {
        match self.table {
            Some(table) => table.status(context, source_text, disambiguation),
            None => LookupStatus::Missing,
        }
    }

    /// Shorthand for a lookup without disambiguation.
    pub fn tr<'a>(&self, context: &str, source_text: &'a str) -> &'a str
    where
        'c: 'a,
    {
        self.lookup(context, source_text, None)
    }

    pub fn tr_disambiguated<'a>(
        &self,
        context: &str,
        source_text: &'a str,
        disambiguation: &str,
    ) -> &'a str
    where
        'c: 'a,
    {
        self.lookup(context, source_text, Some(disambiguation))
    }
}
