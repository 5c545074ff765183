// SPDX-License-Identifier: PMPL-1.0-or-later

//! Catalog behaviour against real `.ts` resources

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use ts_catalog::audit::{self, FindingKind};
use ts_catalog::catalog::{CatalogBuilder, StatusCounts};
use ts_catalog::report;
use ts_catalog::{Catalog, LoadOptions, LookupStatus, ResourceError};

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_fixtures() -> Catalog {
    Catalog::load_dir(&fixtures(), &LoadOptions::default()).expect("fixtures should load")
}

#[test]
fn test_loads_every_fixture_locale() {
    let catalog = load_fixtures();
    let locales: Vec<&str> = catalog.locale_ids().collect();
    assert_eq!(locales, vec!["fr", "nl", "zh_CN"]);
}

#[test]
fn test_clear_in_each_locale() {
    let catalog = load_fixtures();
    assert_eq!(catalog.lookup("fr", "NotesPage", "Clear", None), "Effacer");
    assert_eq!(catalog.lookup("nl", "NotesPage", "Clear", None), "Wissen");
    assert_eq!(catalog.lookup("zh_CN", "NotesPage", "Clear", None), "清除");
}

#[test]
fn test_direction_marks_kept_when_disabled() {
    let options = LoadOptions {
        strip_direction_marks: false,
        ..LoadOptions::default()
    };
    let catalog = Catalog::load_file(&fixtures().join("dsnote-fr.ts"), &options).unwrap();
    assert_eq!(
        catalog.lookup("fr", "NotesPage", "Clear", None),
        "\u{200e}Effacer"
    );
}

#[test]
fn test_unfinished_falls_back_to_source() {
    let catalog = load_fixtures();
    assert_eq!(
        catalog.lookup("fr", "SettingsPage", "Translate to English", None),
        "Translate to English"
    );
    assert_eq!(
        catalog.status("fr", "SettingsPage", "Translate to English", None),
        LookupStatus::Unfinished
    );
}

#[test]
fn test_vanished_excluded_from_lookup() {
    let catalog = load_fixtures();
    assert_eq!(catalog.lookup("fr", "AboutPage", "Libraries", None), "Libraries");
    assert_eq!(
        catalog.status("fr", "AboutPage", "Libraries", None),
        LookupStatus::Vanished
    );
    // Still translated where the message is current.
    assert_eq!(catalog.lookup("zh_CN", "AboutPage", "Libraries", None), "仓库");
}

#[test]
fn test_message_absent_from_one_locale() {
    let catalog = load_fixtures();
    assert_eq!(
        catalog.status("zh_CN", "SettingsPage", "Translate to English", None),
        LookupStatus::Missing
    );
    assert_eq!(
        catalog.lookup("zh_CN", "SettingsPage", "Translate to English", None),
        "Translate to English"
    );
}

#[test]
fn test_lookup_is_exact_and_case_sensitive() {
    let catalog = load_fixtures();
    assert_eq!(catalog.lookup("nl", "NotesPage", "clear", None), "clear");
    assert_eq!(catalog.lookup("nl", "notespage", "Clear", None), "Clear");
    assert_eq!(catalog.lookup("nl", "NotesPage", "Clear ", None), "Clear ");
    assert_eq!(catalog.lookup("nl", "NotesPage", "Clear", Some("button")), "Clear");
}

#[test]
fn test_unknown_locale_falls_back() {
    let catalog = load_fixtures();
    assert_eq!(catalog.lookup("de", "NotesPage", "Clear", None), "Clear");
    assert_eq!(
        catalog.status("de", "NotesPage", "Clear", None),
        LookupStatus::Missing
    );
}

#[test]
fn test_locale_resolution() {
    let catalog = load_fixtures();
    assert_eq!(catalog.resolve_locale("fr_FR"), Some("fr"));
    assert_eq!(catalog.resolve_locale("zh-CN"), Some("zh_CN"));
    assert_eq!(catalog.resolve_locale("zh"), Some("zh_CN"));
    assert_eq!(catalog.resolve_locale("nl_BE.UTF-8"), Some("nl"));
    assert_eq!(catalog.resolve_locale("de"), None);
    assert_eq!(catalog.lookup("fr_CA", "NotesPage", "Clear", None), "Effacer");
}

#[test]
fn test_placeholders_pass_through() {
    let catalog = load_fixtures();
    let about = catalog.lookup("fr", "AboutPage", "About %1", None);
    assert_eq!(about, "À propos de %1");
    assert_eq!(
        ts_catalog::render::arg(about, &["Speech Note"]),
        "À propos de Speech Note"
    );
}

#[test]
fn test_reload_same_content_is_identical() {
    let first = load_fixtures();
    let second = load_fixtures();
    assert_eq!(first.revision(), second.revision());

    for locale in ["fr", "nl", "zh_CN"] {
        for context in first.contexts(locale) {
            for entry in first.entries(locale, context) {
                let key = (&entry.source_text, entry.disambiguation.as_deref());
                assert_eq!(
                    first.lookup(locale, context, key.0, key.1),
                    second.lookup(locale, context, key.0, key.1)
                );
            }
        }
    }
}

#[test]
fn test_revision_changes_with_content() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dsnote-nl.ts");
    let original = fs::read_to_string(fixtures().join("dsnote-nl.ts")).unwrap();
    fs::write(&path, &original).unwrap();
    let before = Catalog::load_dir(dir.path(), &LoadOptions::default()).unwrap();

    fs::write(&path, original.replace(">Wissen<", ">Leegmaken<")).unwrap();
    let after = Catalog::load_dir(dir.path(), &LoadOptions::default()).unwrap();

    assert_ne!(before.revision(), after.revision());
    assert_eq!(after.lookup("nl", "NotesPage", "Clear", None), "Leegmaken");
}

#[test]
fn test_fixture_counts() {
    let catalog = load_fixtures();
    let fr = catalog.locale("fr").unwrap();
    assert_eq!(
        fr.counts(),
        StatusCounts {
            finished: 63,
            unfinished: 6,
            vanished: 2
        }
    );
    assert_eq!(fr.source_language(), "en_US");
    assert!(fr.conflicts().is_empty());
}

#[test]
fn test_prefix_filter() {
    let dir = TempDir::new().unwrap();
    fs::copy(fixtures().join("dsnote-nl.ts"), dir.path().join("dsnote-nl.ts")).unwrap();
    fs::copy(fixtures().join("dsnote-fr.ts"), dir.path().join("other-fr.ts")).unwrap();
    fs::write(dir.path().join("README.md"), "not a resource").unwrap();

    let options = LoadOptions {
        file_prefix: Some("dsnote".to_string()),
        ..LoadOptions::default()
    };
    let catalog = Catalog::load_dir(dir.path(), &options).unwrap();
    let locales: Vec<&str> = catalog.locale_ids().collect();
    assert_eq!(locales, vec!["nl"]);
}

#[test]
fn test_malformed_file_aborts_load() {
    let dir = TempDir::new().unwrap();
    fs::copy(fixtures().join("dsnote-nl.ts"), dir.path().join("dsnote-nl.ts")).unwrap();
    fs::write(
        dir.path().join("dsnote-fr.ts"),
        "<TS language=\"fr\"><context><name>NotesPage</name><message>",
    )
    .unwrap();

    let err = Catalog::load_dir(dir.path(), &LoadOptions::default()).unwrap_err();
    assert_eq!(err.path(), Some(dir.path().join("dsnote-fr.ts").as_path()));
}

#[test]
fn test_duplicate_locale_rejected() {
    let dir = TempDir::new().unwrap();
    fs::copy(fixtures().join("dsnote-nl.ts"), dir.path().join("dsnote-nl.ts")).unwrap();
    fs::copy(fixtures().join("dsnote-nl.ts"), dir.path().join("harbour-nl.ts")).unwrap();

    let err = Catalog::load_dir(dir.path(), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, ResourceError::DuplicateLocale { ref locale, .. } if locale == "nl"));
}

#[test]
fn test_missing_directory_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = Catalog::load_dir(&dir.path().join("absent"), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, ResourceError::Io { .. }));
}

#[test]
fn test_explicit_locale_overrides_document() {
    let mut builder = CatalogBuilder::new();
    let nl = fs::read_to_string(fixtures().join("dsnote-nl.ts")).unwrap();
    builder.add_str(Some("nl_BE"), &nl).unwrap();
    let catalog = builder.build();
    assert_eq!(catalog.locale_ids().collect::<Vec<_>>(), vec!["nl_BE"]);
    assert_eq!(catalog.lookup("nl_BE", "NotesPage", "Clear", None), "Wissen");
}

#[test]
fn test_fixture_audit_has_no_errors() {
    let catalog = load_fixtures();
    let findings = audit::audit(&catalog);
    assert!(!audit::has_errors(&findings));
    let drafts: Vec<_> = findings
        .iter()
        .filter(|f| f.kind == FindingKind::UnfinishedWithText)
        .map(|f| f.locale.as_str())
        .collect();
    assert_eq!(drafts, vec!["zh_CN", "zh_CN"]);
}

#[test]
fn test_coverage_report_for_fixtures() {
    let catalog = load_fixtures();
    let coverage = report::generate_coverage_report(&catalog);
    assert_eq!(coverage.revision, catalog.revision());
    assert_eq!(coverage.locales.len(), 3);
    assert_eq!(coverage.locales[1].display_name, "Dutch");
    assert_eq!(coverage.locales[2].display_name, "Chinese (CN)");
    assert_eq!(coverage.totals.finished, 63 + 63 + 41);
}
