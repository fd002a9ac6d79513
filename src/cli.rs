use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::backends::{CssBackend, ExportBackend, JsonBackend, TextBackend};
use crate::harmony::HarmonyKind;

/// Build color palettes from a seed color or an image, and check their contrast.
#[derive(Parser, Debug)]
#[command(name = "hueforge", version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Text, global = true)]
    pub format: ExportFormat,

    /// Write output to this file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Print colored swatches of the palette to stderr
    #[arg(long, global = true)]
    pub preview: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Derive a palette from a seed color using a harmony rule
    Harmony {
        /// Seed color (hex, rgb(), hsl() or oklch())
        color: String,

        /// Harmony rule
        #[arg(long, value_enum, default_value_t = HarmonyArg::Complementary)]
        kind: HarmonyArg,
    },

    /// Extract a palette from an image with k-means clustering
    Image {
        /// Path to the input image
        image: PathBuf,

        /// Number of colors to extract
        #[arg(short = 'k', long = "colors", default_value_t = 5, value_parser = clap::value_parser!(u8).range(2..=10))]
        colors: u8,

        /// Seed for reproducible clustering
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Report WCAG contrast for every pair of colors, or against a background.
    /// Accepts `--format text` or `--format json`.
    Contrast {
        /// Colors to check
        colors: Vec<String>,

        /// Also pull every color found in this text file
        #[arg(long)]
        scan: Option<PathBuf>,

        /// Check each color against this background instead of pairwise
        #[arg(short, long)]
        background: Option<String>,
    },

    /// Run a JSON generation request ({"kind": "harmony" | "image", ...})
    Request {
        /// Path to the request file
        file: PathBuf,

        /// Seed for reproducible clustering
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum HarmonyArg {
    Analogous,
    Complementary,
    SplitComplementary,
    Triadic,
    Square,
}

impl From<HarmonyArg> for HarmonyKind {
    fn from(arg: HarmonyArg) -> Self {
        match arg {
            HarmonyArg::Analogous => HarmonyKind::Analogous,
            HarmonyArg::Complementary => HarmonyKind::Complementary,
            HarmonyArg::SplitComplementary => HarmonyKind::SplitComplementary,
            HarmonyArg::Triadic => HarmonyKind::Triadic,
            HarmonyArg::Square => HarmonyKind::Square,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Text,
    Css,
    Json,
}

/// How `contrast` renders its reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ExportFormat {
    pub fn backend(self) -> Box<dyn ExportBackend> {
        match self {
            ExportFormat::Text => Box::new(TextBackend),
            ExportFormat::Css => Box::new(CssBackend),
            ExportFormat::Json => Box::new(JsonBackend),
        }
    }

    /// Contrast reports have no CSS form.
    pub fn contrast_report(self) -> anyhow::Result<ReportFormat> {
        match self {
            ExportFormat::Text => Ok(ReportFormat::Text),
            ExportFormat::Json => Ok(ReportFormat::Json),
            ExportFormat::Css => {
                anyhow::bail!("contrast reports support --format text or json, not css")
            }
        }
    }
}
