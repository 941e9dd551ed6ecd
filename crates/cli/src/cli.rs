//! Command-line arguments for `boq-export`.

use std::path::PathBuf;

use clap::Parser;

use boq_export::{Detail, ExportError, ExportFormat};
use boq_observability::LogFormat;

#[derive(Parser, Debug)]
#[clap(
    name = "boq-export",
    version = env!("CARGO_PKG_VERSION"),
    about = "Export a priced bill of quantities as Excel (SpreadsheetML), CSV, XML or JSON."
)]
pub struct Cli {
    /// Bill file (JSON: project_name, project_number, created_at, items).
    pub input: PathBuf,

    /// Output format: excel, csv, xml, json or all. Repeatable.
    #[clap(long, short = 'f', default_value = "excel")]
    pub format: Vec<String>,

    /// Directory for the exported files.
    #[clap(long, short = 'o', default_value = ".")]
    pub out_dir: PathBuf,

    /// Write a single export to stdout instead of a file.
    #[clap(long, conflicts_with = "out_dir")]
    pub stdout: bool,

    /// Omit calculation notes, reference drawing and measurement rule.
    #[clap(long)]
    pub compact: bool,

    /// Fail instead of exporting a bill without items.
    #[clap(long)]
    pub strict: bool,

    /// Log output: json or pretty.
    #[clap(long, default_value = "json")]
    pub log_format: LogFormat,
}

impl Cli {
    pub fn detail(&self) -> Detail {
        Detail::from_verbose(!self.compact)
    }

    /// Requested formats in [`ExportFormat::ALL`] order, without duplicates.
    pub fn formats(&self) -> Result<Vec<ExportFormat>, ExportError> {
        let mut requested = Vec::new();
        for token in &self.format {
            if token.trim().eq_ignore_ascii_case("all") {
                requested.extend(ExportFormat::ALL);
            } else {
                requested.push(token.parse()?);
            }
        }
        Ok(ExportFormat::ALL
            .into_iter()
            .filter(|format| requested.contains(format))
            .collect())
    }
}
