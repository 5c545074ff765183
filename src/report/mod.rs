// SPDX-License-Identifier: PMPL-1.0-or-later

//! Coverage and audit reporting

pub mod formatter;
pub mod generator;
pub mod output;

use crate::audit::Finding;
use crate::catalog::{Catalog, StatusCounts};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use formatter::ReportFormatter;
pub use generator::ReportGenerator;
pub use output::ReportOutputFormat;

/// Translation progress of every loaded locale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageReport {
    pub created_at: String,
    pub revision: String,
    pub totals: StatusCounts,
    pub locales: Vec<LocaleCoverage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleCoverage {
    pub locale: String,
    pub display_name: String,
    pub source_language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<PathBuf>,
    pub counts: StatusCounts,
    /// Finished share of active (finished + unfinished) messages.
    pub completion: f64,
    pub conflicts: usize,
    pub contexts: Vec<ContextCoverage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextCoverage {
    pub context: String,
    pub counts: StatusCounts,
    pub completion: f64,
}

/// Findings plus counts per severity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub created_at: String,
    pub revision: String,
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
    pub findings: Vec<Finding>,
}

impl AuditReport {
    pub fn new(catalog: &Catalog, findings: Vec<Finding>) -> Self {
        use crate::audit::Severity;
        let count = |level: Severity| findings.iter().filter(|f| f.severity == level).count();
        Self {
            created_at: chrono::Utc::now().to_rfc3339(),
            revision: catalog.revision().to_string(),
            errors: count(Severity::Error),
            warnings: count(Severity::Warning),
            infos: count(Severity::Info),
            findings,
        }
    }
}

/// Generate a coverage report for every locale in `catalog`
pub fn generate_coverage_report(catalog: &Catalog) -> CoverageReport {
    ReportGenerator::new().generate(catalog)
}

/// Save a coverage report in the given format
pub fn save_coverage_report<P: AsRef<Path>>(
    report: &CoverageReport,
    format: ReportOutputFormat,
    path: P,
) -> Result<()> {
    ReportFormatter::new().save_coverage(report, format, path)
}

/// Print a coverage report to the console
pub fn print_coverage_report(report: &CoverageReport) {
    ReportFormatter::new().print_coverage(report);
}
