//! siteplot: configurable comparative error plots for multi-site data.
//!
//! Given a CSV export of per-site measurement counts and their ground-truth
//! counterparts, siteplot derives absolute-error metrics, appends a
//! `Composite` group of per-site means, and renders box-and-point plots
//! across groups. Every structural and cosmetic choice is driven by an
//! external JSON settings document in which each key has a default.
//!
//! # Pipeline
//!
//! 1. [`core::dataset`] reads the export, dropping rows with blank required
//!    fields.
//! 2. [`core::metrics`] derives the error columns and the composite rows.
//! 3. [`core::figure`] filters, orders, and labels groups per the settings
//!    document and computes box statistics.
//! 4. [`core::render`] draws the figure to PNG or SVG.
//!
//! # Commands
//!
//! ```bash
//! # Scaffold a fully-populated settings document
//! siteplot init
//!
//! # Render data.csv + settings.json to output_plot.png
//! siteplot render
//!
//! # Inspect per-group mean errors on the terminal
//! siteplot summary
//! ```

pub mod core;

mod cli;

use crate::cli::{Cli, Command, InitCli, RenderCli, SummaryCli};
use crate::core::error::SiteplotError;
use crate::core::{dataset, figure, metrics, render, settings, summary};

use clap::Parser;
use colored::Colorize;
use std::fs;
use std::path::Path;

pub fn run() -> Result<(), SiteplotError> {
    let cli = Cli::parse();
    match cli.command {
        Command::Version => {
            // Simple output for scripts/parsing.
            println!("v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Command::Render(render_cli) => run_render(&render_cli),
        Command::Summary(summary_cli) => run_summary(&summary_cli),
        Command::Init(init_cli) => run_init(&init_cli),
    }
}

/// Ingest the export and derive the full error table, composite included.
/// Returns `None` (after a notice) when no usable rows exist.
fn load_error_rows(data: &Path) -> Result<Option<Vec<metrics::ErrorRow>>, SiteplotError> {
    let ingest = dataset::read_csv(data)?;
    if ingest.skipped > 0 {
        println!(
            "{}",
            format!(
                "Dropped {} row(s) with blank required fields",
                ingest.skipped
            )
            .yellow()
        );
    }
    if ingest.records.is_empty() {
        println!("No usable rows in {}. Please check the CSV file.", data.display());
        return Ok(None);
    }
    let mut rows = metrics::derive_errors(&ingest.records);
    metrics::append_composite(&mut rows);
    Ok(Some(rows))
}

fn run_render(cli: &RenderCli) -> Result<(), SiteplotError> {
    let settings = settings::Settings::load(&cli.settings)?;
    let Some(rows) = load_error_rows(&cli.data)? else {
        return Ok(());
    };

    let figure = figure::build_figure(&rows, &settings)?;
    let report = render::render(&figure, &settings, &cli.out)?;

    println!(
        "{} {} ({} panel(s))",
        "✓ Wrote".green().bold(),
        report.output_path.display(),
        figure.panels.len()
    );
    Ok(())
}

fn run_summary(cli: &SummaryCli) -> Result<(), SiteplotError> {
    let Some(rows) = load_error_rows(&cli.data)? else {
        return Ok(());
    };
    // Means over the raw rows only; the composite row is derived in the table.
    let raw: Vec<metrics::ErrorRow> = rows
        .into_iter()
        .filter(|r| r.group != metrics::COMPOSITE_GROUP)
        .collect();
    for line in summary::summary_lines(&metrics::group_means(&raw)) {
        println!("{}", line);
    }
    Ok(())
}

fn run_init(cli: &InitCli) -> Result<(), SiteplotError> {
    let dir = match &cli.dir {
        Some(d) => d.clone(),
        None => std::env::current_dir()?,
    };
    let dest = dir.join("settings.json");

    if dest.exists() && !cli.force {
        return Err(SiteplotError::ValidationError(format!(
            "Refusing to overwrite existing path without --force: {}",
            dest.display()
        )));
    }

    fs::create_dir_all(&dir)?;
    let document = settings::Settings::default().to_pretty_json()?;
    fs::write(&dest, document + "\n")?;
    println!("{} {}", "✓ Wrote".green().bold(), dest.display());
    Ok(())
}
