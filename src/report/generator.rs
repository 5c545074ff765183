// SPDX-License-Identifier: PMPL-1.0-or-later

//! Coverage report generation

use super::{ContextCoverage, CoverageReport, LocaleCoverage};
use crate::catalog::{Catalog, LocaleTable, StatusCounts};
use rayon::prelude::*;

pub struct ReportGenerator;

impl ReportGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self, catalog: &Catalog) -> CoverageReport {
        // Tables are immutable, so locales can be summarised independently.
        let tables: Vec<&LocaleTable> = catalog.locales().collect();
        let locales: Vec<LocaleCoverage> = tables
            .par_iter()
            .map(|table| self.locale_coverage(table))
            .collect();

        let mut totals = StatusCounts::default();
        for locale in &locales {
            totals.merge(locale.counts);
        }

        CoverageReport {
            created_at: chrono::Utc::now().to_rfc3339(),
            revision: catalog.revision().to_string(),
            totals,
            locales,
        }
    }

    fn locale_coverage(&self, table: &LocaleTable) -> LocaleCoverage {
        let contexts: Vec<ContextCoverage> = table
            .contexts()
            .map(|context| {
                let counts = context.counts();
                ContextCoverage {
                    context: context.name().to_string(),
                    counts,
                    completion: counts.completion(),
                }
            })
            .collect();
        let counts = table.counts();

        LocaleCoverage {
            locale: table.id().to_string(),
            display_name: table.id().display_name(),
            source_language: table.source_language().to_string(),
            origin: table.origin().map(|p| p.to_path_buf()),
            counts,
            completion: counts.completion(),
            conflicts: table.conflicts().len(),
            contexts,
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogBuilder;

    #[test]
    fn totals_sum_locales() {
        let mut builder = CatalogBuilder::new();
        builder
            .add_str(
                Some("fr"),
                "<TS><context><name>A</name>\
                 <message><source>a</source><translation>A</translation></message>\
                 <message><source>b</source><translation type=\"unfinished\"/></message>\
                 </context></TS>",
            )
            .unwrap();
        builder
            .add_str(
                Some("nl"),
                "<TS><context><name>A</name>\
                 <message><source>a</source><translation>A</translation></message>\
                 <message><source>c</source><translation type=\"vanished\">C</translation></message>\
                 </context></TS>",
            )
            .unwrap();
        let report = ReportGenerator::new().generate(&builder.build());

        assert_eq!(report.locales.len(), 2);
        assert_eq!(report.locales[0].locale, "fr");
        assert_eq!(report.locales[0].completion, 0.5);
        assert_eq!(report.locales[1].completion, 1.0);
        assert_eq!(
            report.totals,
            StatusCounts {
                finished: 2,
                unfinished: 1,
                vanished: 1
            }
        );
        assert_eq!(report.locales[1].contexts[0].context, "A");
    }

    #[test]
    fn repeated_key_counts_once() {
        let catalog = Catalog::load(
            "nl",
            "<TS><context><name>A</name>\
             <message><source>x</source><translation type=\"unfinished\"/></message>\
             <message><source>x</source><translation>X</translation></message>\
             </context></TS>",
        )
        .unwrap();
        let report = ReportGenerator::new().generate(&catalog);

        let locale = &report.locales[0];
        assert_eq!(
            locale.counts,
            StatusCounts {
                finished: 1,
                unfinished: 0,
                vanished: 0
            }
        );
        assert_eq!(locale.completion, 1.0);
        assert_eq!(locale.conflicts, 1);
    }
}
