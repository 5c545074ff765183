// SPDX-License-Identifier: PMPL-1.0-or-later

//! Shared, hot-reloadable reference to the active catalog.

use super::{Catalog, LoadOptions};
use crate::error::Result;
use crate::types::LookupStatus;
use arc_swap::ArcSwap;
use std::path::Path;
use std::sync::Arc;

/// What a reload did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// The new catalog had the same revision; nothing was published.
    Unchanged { revision: String },
    Replaced { previous: String, current: String },
}

/// Publishes whole catalogs atomically.
///
/// Readers take a snapshot with [`CatalogHandle::current`] and keep it for
/// as long as they need a consistent view; a concurrent reload never
/// changes a snapshot that is already held.
#[derive(Debug)]
pub struct CatalogHandle {
    current: ArcSwap<Catalog>,
}

impl CatalogHandle {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: ArcSwap::from_pointee(catalog),
        }
    }

    /// Snapshot of the active catalog.
    pub fn current(&self) -> Arc<Catalog> {
        self.current.load_full()
    }

    pub fn revision(&self) -> String {
        self.current.load().revision().to_string()
    }

    /// Owned lookup against the active catalog.
    pub fn lookup(
        &self,
        locale: &str,
        context: &str,
        source_text: &str,
        disambiguation: Option<&str>,
    ) -> String {
        self.current
            .load()
            .lookup(locale, context, source_text, disambiguation)
            .to_string()
    }

    pub fn status(
        &self,
        locale: &str,
        context: &str,
        source_text: &str,
        disambiguation: Option<&str>,
    ) -> LookupStatus {
        self.current
            .load()
            .status(locale, context, source_text, disambiguation)
    }

    /// Publish `catalog` unconditionally, returning the one it replaced.
    pub fn replace(&self, catalog: Catalog) -> Arc<Catalog> {
        self.current.swap(Arc::new(catalog))
    }

    /// Build a new catalog with `build` and publish it.
    ///
    /// If `build` fails the active catalog is left as it was and the error
    /// is returned.
    pub fn reload_with<F>(&self, build: F) -> Result<ReloadOutcome>
    where
        F: FnOnce() -> Result<Catalog>,
    {
        let next = match build() {
            Ok(next) => next,
            Err(err) => {
                tracing::warn!(error = %err, "catalog reload failed; keeping active catalog");
                return Err(err);
            }
        };

        let previous = self.revision();
        if previous == next.revision() {
            tracing::debug!(revision = %previous, "catalog unchanged");
            return Ok(ReloadOutcome::Unchanged { revision: previous });
        }

        let current = next.revision().to_string();
        self.replace(next);
        tracing::info!(previous = %previous, current = %current, "catalog reloaded");
        Ok(ReloadOutcome::Replaced { previous, current })
    }

    /// Reload from a resource directory.
    pub fn reload_dir(&self, dir: &Path, options: &LoadOptions) -> Result<ReloadOutcome> {
        self.reload_with(|| Catalog::load_dir(dir, options))
    }
}

impl Default for CatalogHandle {
    fn default() -> Self {
        Self::new(Catalog::empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResourceError;
    use std::path::PathBuf;

    fn catalog(translation: &str) -> Catalog {
        Catalog::load(
            "nl",
            &format!(
                "<TS><context><name>NotesPage</name><message><source>Clear</source>\
                 <translation>{}</translation></message></context></TS>",
                translation
            ),
        )
        .unwrap()
    }

    #[test]
    fn reload_publishes_new_catalog() {
        let handle = CatalogHandle::new(catalog("Wissen"));
        let before = handle.current();

        let outcome = handle.reload_with(|| Ok(catalog("Leegmaken"))).unwrap();
        assert!(matches!(outcome, ReloadOutcome::Replaced { .. }));
        assert_eq!(handle.lookup("nl", "NotesPage", "Clear", None), "Leegmaken");

        // A snapshot taken earlier still sees the old table.
        assert_eq!(before.lookup("nl", "NotesPage", "Clear", None), "Wissen");
    }

    #[test]
    fn failed_reload_keeps_previous() {
        let handle = CatalogHandle::new(catalog("Wissen"));
        let revision = handle.revision();

        let err = handle
            .reload_with(|| {
                Err(ResourceError::Malformed {
                    path: PathBuf::from("app-nl.ts"),
                    message: "broken".into(),
                })
            })
            .unwrap_err();
        assert!(matches!(err, ResourceError::Malformed { .. }));
        assert_eq!(handle.revision(), revision);
        assert_eq!(handle.lookup("nl", "NotesPage", "Clear", None), "Wissen");
    }

    #[test]
    fn identical_reload_is_unchanged() {
        let handle = CatalogHandle::new(catalog("Wissen"));
        let outcome = handle.reload_with(|| Ok(catalog("Wissen"))).unwrap();
        assert!(matches!(outcome, ReloadOutcome::Unchanged { .. }));
    }

    #[test]
    fn default_handle_is_empty() {
        let handle = CatalogHandle::default();
        assert!(handle.current().is_empty());
        assert_eq!(
            handle.status("nl", "NotesPage", "Clear", None),
            LookupStatus::Missing
        );
    }

    #[test]
    fn reload_publishes_structurally_different_catalog() {
        let contexts_only = Catalog::load(
            "nl",
            "<TS><context><name>A</name></context><context><name>B</name></context>\
             <context><name>C</name></context><context><name>D</name></context>\
             <context><name>finished</name></context></TS>",
        )
        .unwrap();
        let handle = CatalogHandle::new(contexts_only);

        let outcome = handle
            .reload_with(|| {
                Catalog::load(
                    "nl",
                    "<TS><context><name>A</name><message><source>B</source>\
                     <comment>C</comment><translation>D</translation></message></context></TS>",
                )
            })
            .unwrap();
        assert!(matches!(outcome, ReloadOutcome::Replaced { .. }));
        assert_eq!(handle.lookup("nl", "A", "B", Some("C")), "D");
    }
}
