// SPDX-License-Identifier: PMPL-1.0-or-later

//! Hot reload through CatalogHandle while readers are active

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use tempfile::TempDir;
use ts_catalog::{Catalog, CatalogHandle, LoadOptions, ReloadOutcome, ResourceError};

fn resource(clear: &str, cancel: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS>
<TS version="2.1" language="nl" sourcelanguage="en_US">
<context>
    <name>NotesPage</name>
    <message>
        <location filename="../qml/NotesPage.qml" line="120"/>
        <source>Clear</source>
        <translation>{}</translation>
    </message>
    <message>
        <location filename="../qml/NotesPage.qml" line="141"/>
        <source>Cancel</source>
        <translation>{}</translation>
    </message>
</context>
</TS>
"#,
        clear, cancel
    )
}

fn write(dir: &Path, content: &str) {
    fs::write(dir.join("app-nl.ts"), content).unwrap();
}

#[test]
fn test_reload_dir_picks_up_changes() {
    let dir = TempDir::new().unwrap();
    let options = LoadOptions::default();
    write(dir.path(), &resource("Wissen", "Annuleren"));
    let handle = CatalogHandle::new(Catalog::load_dir(dir.path(), &options).unwrap());

    write(dir.path(), &resource("Leegmaken", "Afbreken"));
    let outcome = handle.reload_dir(dir.path(), &options).unwrap();
    assert!(matches!(outcome, ReloadOutcome::Replaced { .. }));
    assert_eq!(handle.lookup("nl", "NotesPage", "Clear", None), "Leegmaken");

    let outcome = handle.reload_dir(dir.path(), &options).unwrap();
    assert!(matches!(outcome, ReloadOutcome::Unchanged { .. }));
}

#[test]
fn test_failed_reload_keeps_serving_previous_catalog() {
    let dir = TempDir::new().unwrap();
    let options = LoadOptions::default();
    write(dir.path(), &resource("Wissen", "Annuleren"));
    let handle = CatalogHandle::new(Catalog::load_dir(dir.path(), &options).unwrap());
    let revision = handle.revision();

    write(dir.path(), "<TS language=\"nl\"><context><name>NotesPage</name>");
    let err = handle.reload_dir(dir.path(), &options).unwrap_err();
    assert!(matches!(
        err,
        ResourceError::Xml { .. } | ResourceError::Malformed { .. }
    ));

    assert_eq!(handle.revision(), revision);
    assert_eq!(handle.lookup("nl", "NotesPage", "Clear", None), "Wissen");
}

#[test]
fn test_readers_never_see_a_mixed_catalog() {
    let old = Catalog::load("nl", &resource("Wissen", "Annuleren")).unwrap();
    let new = Catalog::load("nl", &resource("Leegmaken", "Afbreken")).unwrap();
    let handle = CatalogHandle::new(old.clone());
    let done = AtomicBool::new(false);

    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                let mut seen = 0usize;
                while !done.load(Ordering::Acquire) || seen == 0 {
                    let snapshot = handle.current();
                    let clear = snapshot.lookup("nl", "NotesPage", "Clear", None);
                    let cancel = snapshot.lookup("nl", "NotesPage", "Cancel", None);
                    match clear {
                        "Wissen" => assert_eq!(cancel, "Annuleren"),
                        "Leegmaken" => assert_eq!(cancel, "Afbreken"),
                        other => panic!("unexpected translation {:?}", other),
                    }
                    seen += 1;
                }
            });
        }

        for round in 0..200 {
            let next = if round % 2 == 0 { new.clone() } else { old.clone() };
            handle.replace(next);
        }
        done.store(true, Ordering::Release);
    });

    assert_eq!(handle.revision(), old.revision());
}

#[test]
fn test_snapshot_outlives_reload() {
    let handle = CatalogHandle::new(Catalog::load("nl", &resource("Wissen", "Annuleren")).unwrap());
    let snapshot = handle.current();

    handle
        .reload_with(|| Catalog::load("nl", &resource("Leegmaken", "Afbreken")))
        .unwrap();

    assert_eq!(snapshot.lookup("nl", "NotesPage", "Clear", None), "Wissen");
    assert_eq!(handle.lookup("nl", "NotesPage", "Clear", None), "Leegmaken");
    assert_ne!(snapshot.revision(), handle.revision());
}
