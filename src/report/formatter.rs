// SPDX-License-Identifier: PMPL-1.0-or-later

//! Report formatting and output

use super::{AuditReport, CoverageReport, ReportOutputFormat};
use crate::audit::Severity;
use anyhow::{Context, Result};
use colored::*;
use std::fs;
use std::path::Path;

pub struct ReportFormatter;

impl ReportFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn print_coverage(&self, report: &CoverageReport) {
        println!("{}", self.coverage_text(report, true));
    }

    pub fn print_audit(&self, report: &AuditReport) {
        println!("{}", self.audit_text(report, true));
    }

    pub fn save_coverage<P: AsRef<Path>>(
        &self,
        report: &CoverageReport,
        format: ReportOutputFormat,
        path: P,
    ) -> Result<()> {
        let content = match format.serialize(report)? {
            Some(encoded) => encoded,
            None => self.coverage_text(report, false),
        };
        write(path.as_ref(), &content)
    }

    pub fn save_audit<P: AsRef<Path>>(
        &self,
        report: &AuditReport,
        format: ReportOutputFormat,
        path: P,
    ) -> Result<()> {
        let content = match format.serialize(report)? {
            Some(encoded) => encoded,
            None => self.audit_text(report, false),
        };
        write(path.as_ref(), &content)
    }

    pub fn coverage_text(&self, report: &CoverageReport, color: bool) -> String {
        let mut lines = Vec::new();
        lines.push(paint("=== TRANSLATION COVERAGE ===", color, |s| s.bold().cyan()));
        lines.push(format!("Revision: {}", short_revision(&report.revision)));
        lines.push(format!("Generated: {}", report.created_at));
        lines.push(String::new());

        if report.locales.is_empty() {
            lines.push(paint("No locales loaded", color, |s| s.yellow()));
            return lines.join("\n");
        }

        for locale in &report.locales {
            let pct = format!("{:5.1}%", locale.completion * 100.0);
            lines.push(format!(
                "{} {} {:<22} {:>4}/{:<4} {}  ({} unfinished, {} vanished{})",
                paint("●", color, |s| completion_color(s, locale.completion)),
                paint(&format!("{:<8}", locale.locale), color, |s| s.bold()),
                locale.display_name,
                locale.counts.finished,
                locale.counts.active(),
                paint(&pct, color, |s| completion_color(s, locale.completion)),
                locale.counts.unfinished,
                locale.counts.vanished,
                if locale.conflicts > 0 {
                    format!(", {} conflicts", locale.conflicts)
                } else {
                    String::new()
                }
            ));
            for context in &locale.contexts {
                if context.counts.active() == 0 {
                    continue;
                }
                lines.push(format!(
                    "    {:<28} {:>4}/{:<4} {:5.1}%",
                    context.context,
                    context.counts.finished,
                    context.counts.active(),
                    context.completion * 100.0
                ));
            }
        }

        lines.push(String::new());
        lines.push(format!(
            "Total: {} finished, {} unfinished, {} vanished ({:.1}% complete)",
            report.totals.finished,
            report.totals.unfinished,
            report.totals.vanished,
            report.totals.completion() * 100.0
        ));
        lines.join("\n")
    }

    pub fn audit_text(&self, report: &AuditReport, color: bool) -> String {
        let mut lines = Vec::new();
        lines.push(paint("=== TRANSLATION AUDIT ===", color, |s| s.bold().cyan()));
        lines.push(format!("Revision: {}", short_revision(&report.revision)));
        lines.push(String::new());

        if report.findings.is_empty() {
            lines.push(paint("No findings", color, |s| s.green()));
            return lines.join("\n");
        }

        for finding in &report.findings {
            let tag = format!("[{}]", finding.severity.tag());
            let tag = paint(&tag, color, |s| match finding.severity {
                Severity::Error => s.red().bold(),
                Severity::Warning => s.yellow(),
                Severity::Info => s.blue(),
            });
            lines.push(format!(
                "  {:<7} {} {} {:?}: {} - {}",
                tag, finding.locale, finding.context, finding.source_text, finding.kind, finding.detail
            ));
        }

        lines.push(String::new());
        lines.push(format!(
            "{} errors, {} warnings, {} info",
            report.errors, report.warnings, report.infos
        ));
        lines.join("\n")
    }
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn write(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("writing report {}", path.display()))
}

fn paint(text: &str, color: bool, style: impl FnOnce(&str) -> ColoredString) -> String {
    if color {
        style(text).to_string()
    } else {
        text.to_string()
    }
}

fn completion_color(text: &str, completion: f64) -> ColoredString {
    if completion >= 0.95 {
        text.green()
    } else if completion >= 0.75 {
        text.yellow()
    } else {
        text.red()
    }
}

fn short_revision(revision: &str) -> &str {
    revision.get(..12).unwrap_or(revision)
}
