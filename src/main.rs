// SPDX-License-Identifier: PMPL-1.0-or-later

//! ts-catalog: inspect translation catalogs built from `.ts` resources
//!
//! Loads every locale under the resource directory and answers lookups,
//! status queries, coverage and audit reports from the command line.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use ts_catalog::audit;
use ts_catalog::locale;
use ts_catalog::render;
use ts_catalog::report::{self, AuditReport, ReportFormatter, ReportOutputFormat};
use ts_catalog::{Catalog, Config};

#[derive(Parser)]
#[command(name = "ts-catalog")]
#[command(version = "0.3.0")]
#[command(about = "Translation catalog lookups and reports for Qt .ts resources")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Resource directory (overrides config and TS_CATALOG_DIR)
    #[arg(short, long, global = true)]
    dir: Option<PathBuf>,

    /// Only load <prefix>-<locale>.ts files
    #[arg(long, global = true)]
    prefix: Option<String>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the localized string for a message
    Lookup {
        /// Locale, e.g. fr or zh_CN
        #[arg(value_name = "LOCALE")]
        locale: String,

        /// Context the message belongs to
        #[arg(value_name = "CONTEXT")]
        context: String,

        /// Source text
        #[arg(value_name = "SOURCE")]
        source: String,

        /// Disambiguation comment
        #[arg(short = 'm', long)]
        disambiguation: Option<String>,

        /// Values substituted for %1, %2, ...
        #[arg(short, long, value_delimiter = ',')]
        args: Vec<String>,
    },

    /// Print the translation status of a message
    Status {
        #[arg(value_name = "LOCALE")]
        locale: String,

        #[arg(value_name = "CONTEXT")]
        context: String,

        #[arg(value_name = "SOURCE")]
        source: String,

        #[arg(short = 'm', long)]
        disambiguation: Option<String>,
    },

    /// Translation progress per locale and context
    Coverage {
        /// Output format (default: from the output file extension, else text)
        #[arg(short, long, value_enum)]
        format: Option<ReportOutputFormat>,

        /// Write the report to a file instead of the console
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check translations for placeholder mismatches and other problems
    Audit {
        #[arg(short, long, value_enum)]
        format: Option<ReportOutputFormat>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List loaded locales
    Locales,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(dir) = cli.dir {
        config.resource_dir = dir;
    }
    if let Some(prefix) = cli.prefix {
        config.file_prefix = Some(prefix);
    }

    let catalog = load_catalog(&config)?;

    match cli.command {
        Commands::Lookup {
            locale,
            context,
            source,
            disambiguation,
            args,
        } => {
            let text = catalog.lookup(&locale, &context, &source, disambiguation.as_deref());
            if args.is_empty() {
                println!("{}", text);
            } else {
                let args: Vec<&str> = args.iter().map(String::as_str).collect();
                println!("{}", render::arg(text, &args));
            }
        }

        Commands::Status {
            locale,
            context,
            source,
            disambiguation,
        } => {
            let status = catalog.status(&locale, &context, &source, disambiguation.as_deref());
            println!("{}", status);
        }

        Commands::Coverage { format, output } => {
            let coverage = report::generate_coverage_report(&catalog);
            let format = ReportOutputFormat::resolve(format, output.as_deref());
            match (output, format) {
                (Some(path), format) => {
                    report::save_coverage_report(&coverage, format, &path)?;
                    println!("Report saved to: {}", path.display());
                }
                (None, ReportOutputFormat::Text) => report::print_coverage_report(&coverage),
                (None, format) => print_structured(format, &coverage)?,
            }
        }

        Commands::Audit { format, output } => {
            let findings = audit::audit(&catalog);
            let failed = audit::has_errors(&findings);
            let audit_report = AuditReport::new(&catalog, findings);
            let formatter = ReportFormatter::new();
            let format = ReportOutputFormat::resolve(format, output.as_deref());
            match (output, format) {
                (Some(path), format) => {
                    formatter.save_audit(&audit_report, format, &path)?;
                    println!("Report saved to: {}", path.display());
                }
                (None, ReportOutputFormat::Text) => formatter.print_audit(&audit_report),
                (None, format) => print_structured(format, &audit_report)?,
            }
            if failed {
                bail!("audit found {} error(s)", audit_report.errors);
            }
        }

        Commands::Locales => {
            let default = catalog.resolve_locale(&config.default_locale);
            println!("Revision: {}", catalog.revision());
            for table in catalog.locales() {
                let id = table.id().to_string();
                let marker = if default == Some(id.as_str()) { "*" } else { " " };
                let native = locale::native_name(table.id().language())
                    .map(|name| format!(" ({})", name))
                    .unwrap_or_default();
                println!(
                    "{} {:<8} {:<36} {:>4} messages  ts {}",
                    marker,
                    id.bold(),
                    format!("{}{}", table.id().display_name(), native),
                    table.counts().active(),
                    table.format_version().unwrap_or("?")
                );
            }
            if default.is_none() {
                println!(
                    "{}",
                    format!("default locale {} is not loaded", config.default_locale).yellow()
                );
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_catalog(config: &Config) -> Result<Catalog> {
    let dir: &Path = &config.resource_dir;
    let options = config.load_options();
    let catalog = if dir.is_file() {
        Catalog::load_file(dir, &options)
    } else {
        Catalog::load_dir(dir, &options)
    };
    catalog.with_context(|| format!("loading translations from {}", dir.display()))
}

fn print_structured<T: serde::Serialize>(format: ReportOutputFormat, value: &T) -> Result<()> {
    if let Some(encoded) = format.serialize(value)? {
        println!("{}", encoded);
    }
    Ok(())
}
