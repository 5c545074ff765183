// SPDX-License-Identifier: PMPL-1.0-or-later

//! Per-context message index.

use crate::types::{Entry, LookupStatus, MessageKey, Status};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// source text -> disambiguation (`""` when none) -> entry index
type KeyIndex = HashMap<String, HashMap<String, usize>>;

/// A key that appeared more than once in one context with different translations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    pub context: String,
    pub source_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disambiguation: Option<String>,
    /// Translation that was overridden.
    pub previous: String,
    /// Translation that won (last in document order).
    pub winner: String,
}

/// All messages of one context for one locale.
///
/// Every record is kept in document order; only non-vanished records are
/// reachable through lookups, and for a repeated key the last one wins.
#[derive(Debug, Clone)]
pub struct ContextTable {
    name: String,
    entries: Vec<Entry>,
    active: KeyIndex,
    vanished: KeyIndex,
}

impl ContextTable {
    /// Index `entries`, recording overridden duplicates in `conflicts`.
    pub(crate) fn build(name: String, entries: Vec<Entry>, conflicts: &mut Vec<Conflict>) -> Self {
        let mut active = KeyIndex::new();
        let mut vanished = KeyIndex::new();

        for (idx, entry) in entries.iter().enumerate() {
            let index = if entry.is_active() {
                &mut active
            } else {
                &mut vanished
            };
            let slot = index
                .entry(entry.source_text.clone())
                .or_default()
                .insert(entry.disambiguation.clone().unwrap_or_default(), idx);

            if let (Some(previous), true) = (slot, entry.is_active()) {
                let previous = &entries[previous];
                tracing::warn!(
                    context = %name,
                    key = %entry.key(),
                    "duplicate message in context; the later entry wins"
                );
                if previous.translation != entry.translation || previous.status != entry.status {
                    conflicts.push(Conflict {
                        context: name.clone(),
                        source_text: entry.source_text.clone(),
                        disambiguation: entry.disambiguation.clone(),
                        previous: previous.translation.clone(),
                        winner: entry.translation.clone(),
                    });
                }
            }
        }

        Self {
            name,
            entries,
            active,
            vanished,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every record, vanished ones included, in document order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The authoritative non-vanished record for a key.
    pub fn get(&self, source_text: &str, disambiguation: Option<&str>) -> Option<&Entry> {
        Self::find(&self.active, MessageKey::new(source_text, disambiguation))
            .map(|idx| &self.entries[idx])
    }

    /// Localized text, or `source_text` itself when no finished translation exists.
    pub fn lookup<'a>(&'a self, source_text: &'a str, disambiguation: Option<&str>) -> &'a str {
        match self.get(source_text, disambiguation) {
            Some(entry) if entry.status == Status::Finished && !entry.translation.is_empty() => {
                &entry.translation
            }
            _ => source_text,
        }
    }

    pub fn status(&self, source_text: &str, disambiguation: Option<&str>) -> LookupStatus {
        let key = MessageKey::new(source_text, disambiguation);
        if let Some(idx) = Self::find(&self.active, key) {
            return self.entries[idx].status.into();
        }
        if Self::find(&self.vanished, key).is_some() {
            return LookupStatus::Vanished;
        }
        LookupStatus::Missing
    }

    /// Count of distinct keys per status, agreeing with [`ContextTable::status`]:
    /// a repeated key counts once with its winning record, and a vanished key
    /// counts only when no active record shadows it.
    pub fn counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for by_disambiguation in self.active.values() {
            for &idx in by_disambiguation.values() {
                counts.add(self.entries[idx].status);
            }
        }
        for (source_text, by_disambiguation) in &self.vanished {
            let shadowing = self.active.get(source_text);
            for disambiguation in by_disambiguation.keys() {
                if !shadowing.is_some_and(|active| active.contains_key(disambiguation)) {
                    counts.vanished += 1;
                }
            }
        }
        counts
    }

    fn find(index: &KeyIndex, key: MessageKey<'_>) -> Option<usize> {
        index
            .get(key.source_text)?
            .get(key.disambiguation.unwrap_or(""))
            .copied()
    }
}

/// Number of keys per translation status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub finished: usize,
    pub unfinished: usize,
    pub vanished: usize,
}

impl StatusCounts {
    pub fn add(&mut self, status: Status) {
        match status {
            Status::Finished => self.finished += 1,
            Status::Unfinished => self.unfinished += 1,
            Status::Vanished => self.vanished += 1,
        }
    }

    pub fn merge(&mut self, other: StatusCounts) {
        self.finished += other.finished;
        self.unfinished += other.unfinished;
        self.vanished += other.vanished;
    }

    /// Keys that take part in lookups.
    pub fn active(&self) -> usize {
        self.finished + self.unfinished
    }

    /// Finished share of active keys, `1.0` when there are none.
    pub fn completion(&self) -> f64 {
        if self.active() == 0 {
            1.0
        } else {
            self.finished as f64 / self.active() as f64
        }
    }
}
