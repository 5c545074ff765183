// SPDX-License-Identifier: PMPL-1.0-or-later

//! Translation audit: problems a translator or release check should see.
//!
//! The catalog itself never rejects these; lookups keep working. The audit
//! only reports them.

use crate::catalog::Catalog;
use crate::render::placeholders;
use crate::types::Status;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn tag(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARN",
            Severity::Error => "ERR",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    /// Finished translation uses different `%n` markers than its source.
    PlaceholderMismatch,
    /// Key repeated in one context with different translations; the last won.
    ConflictingDuplicate,
    /// Marked finished but empty, so lookups fall back to the source.
    EmptyFinished,
    /// Unfinished entry carrying a draft that lookups ignore.
    UnfinishedWithText,
}

impl FindingKind {
    pub fn severity(&self) -> Severity {
        match self {
            FindingKind::PlaceholderMismatch => Severity::Error,
            FindingKind::ConflictingDuplicate | FindingKind::EmptyFinished => Severity::Warning,
            FindingKind::UnfinishedWithText => Severity::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FindingKind::PlaceholderMismatch => "placeholder mismatch",
            FindingKind::ConflictingDuplicate => "conflicting duplicate",
            FindingKind::EmptyFinished => "empty finished translation",
            FindingKind::UnfinishedWithText => "unfinished draft",
        }
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub locale: String,
    pub context: String,
    pub source_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disambiguation: Option<String>,
    pub kind: FindingKind,
    pub severity: Severity,
    pub detail: String,
}

/// Findings for every locale, ordered by locale then context then document order.
pub fn audit(catalog: &Catalog) -> Vec<Finding> {
    let mut findings = Vec::new();

    for table in catalog.locales() {
        let locale = table.id().to_string();
        let finding = |context: &str,
                       source: &str,
                       disambiguation: Option<&str>,
                       kind: FindingKind,
                       detail: String| Finding {
            locale: locale.clone(),
            context: context.to_string(),
            source_text: source.to_string(),
            disambiguation: disambiguation.map(str::to_string),
            kind,
            severity: kind.severity(),
            detail,
        };

        for context in table.contexts() {
            for entry in context.entries() {
                match entry.status {
                    Status::Finished if entry.translation.is_empty() => {
                        findings.push(finding(
                            context.name(),
                            &entry.source_text,
                            entry.disambiguation.as_deref(),
                            FindingKind::EmptyFinished,
                            "lookups return the source text".to_string(),
                        ));
                    }
                    Status::Finished => {
                        let expected = placeholders(&entry.source_text);
                        let actual = placeholders(&entry.translation);
                        if expected != actual {
                            findings.push(finding(
                                context.name(),
                                &entry.source_text,
                                entry.disambiguation.as_deref(),
                                FindingKind::PlaceholderMismatch,
                                format!(
                                    "source uses {}, translation uses {}",
                                    describe(&expected),
                                    describe(&actual)
                                ),
                            ));
                        }
                    }
                    Status::Unfinished if !entry.translation.trim().is_empty() => {
                        findings.push(finding(
                            context.name(),
                            &entry.source_text,
                            entry.disambiguation.as_deref(),
                            FindingKind::UnfinishedWithText,
                            format!("draft {:?} is not used", entry.translation),
                        ));
                    }
                    _ => {}
                }
            }
        }

        for conflict in table.conflicts() {
            findings.push(finding(
                &conflict.context,
                &conflict.source_text,
                conflict.disambiguation.as_deref(),
                FindingKind::ConflictingDuplicate,
                format!("{:?} overridden by {:?}", conflict.previous, conflict.winner),
            ));
        }
    }

    findings
}

/// Whether any finding should fail a release check.
pub fn has_errors(findings: &[Finding]) -> bool {
    findings.iter().any(|f| f.severity == Severity::Error)
}

fn describe(markers: &std::collections::BTreeSet<u32>) -> String {
    if markers.is_empty() {
        "no placeholders".to_string()
    } else {
        markers
            .iter()
            .map(|n| format!("%{}", n))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
