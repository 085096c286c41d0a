//! CLI struct definitions for the siteplot command-line interface.
//!
//! All clap-derived types live here. Dispatch logic lives in `lib.rs`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "siteplot",
    version = env!("CARGO_PKG_VERSION"),
    about = "Comparative error plots for multi-site measurement data, driven by a settings document."
)]
pub(crate) struct Cli {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(clap::Args, Debug)]
pub(crate) struct RenderCli {
    /// CSV export with per-site counts and ground-truth columns.
    #[clap(long, default_value = "data.csv")]
    pub data: PathBuf,
    /// Settings document controlling filtering, ordering, and styling.
    #[clap(long, default_value = "settings.json")]
    pub settings: PathBuf,
    /// Output path stem; the extension follows the configured output format.
    #[clap(long, default_value = "output_plot")]
    pub out: PathBuf,
}

#[derive(clap::Args, Debug)]
pub(crate) struct SummaryCli {
    /// CSV export with per-site counts and ground-truth columns.
    #[clap(long, default_value = "data.csv")]
    pub data: PathBuf,
}

#[derive(clap::Args, Debug)]
pub(crate) struct InitCli {
    /// Directory to write settings.json into (defaults to the current
    /// working directory).
    #[clap(short, long)]
    pub dir: Option<PathBuf>,
    /// Overwrite an existing settings.json.
    #[clap(long)]
    pub force: bool,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Render the comparative error figure from a CSV export
    Render(RenderCli),
    /// Print per-group mean errors without rendering
    Summary(SummaryCli),
    /// Write a settings.json with every knob at its documented default
    Init(InitCli),
    /// Print version
    Version,
}
