// SPDX-License-Identifier: PMPL-1.0-or-later

//! ts-catalog: translation catalogs built from Qt Linguist `.ts` resources.
//!
//! A [`Catalog`] maps (locale, context, source text, disambiguation) to a
//! localized string. Lookups are infallible and fall back to the source
//! text whenever no finished translation exists. Loading is the only
//! fallible step, and reloading goes through [`CatalogHandle`], which
//! swaps whole catalogs atomically.
//!
//! ```
//! use ts_catalog::{Catalog, LookupStatus};
//!
//! let catalog = Catalog::load(
//!     "nl",
//!     r#"<TS version="2.1" language="nl">
//!          <context><name>NotesPage</name>
//!            <message><source>Clear</source><translation>Wissen</translation></message>
//!          </context>
//!        </TS>"#,
//! )?;
//! assert_eq!(catalog.lookup("nl", "NotesPage", "Clear", None), "Wissen");
//! assert_eq!(catalog.lookup("de", "NotesPage", "Clear", None), "Clear");
//! assert_eq!(catalog.status("nl", "NotesPage", "Undo", None), LookupStatus::Missing);
//! # Ok::<(), ts_catalog::ResourceError>(())
//! ```

pub mod audit;
pub mod catalog;
pub mod config;
pub mod error;
pub mod locale;
pub mod render;
pub mod report;
pub mod ts;
pub mod types;

pub use catalog::{Catalog, CatalogHandle, LoadOptions, ReloadOutcome, Translator};
pub use config::Config;
pub use error::ResourceError;
pub use locale::LocaleId;
pub use types::{Entry, LookupStatus, Status};
