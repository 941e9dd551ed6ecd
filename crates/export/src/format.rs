//! Export format identifiers, tags and suggested file names.

use core::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ExportError;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Excel-compatible SpreadsheetML workbook (reference layout).
    Spreadsheet,
    /// Comma-separated values with a project preamble.
    Csv,
    /// `BillOfQuantities` XML document.
    Xml,
    /// JSON interchange object.
    Json,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Spreadsheet,
        ExportFormat::Csv,
        ExportFormat::Xml,
        ExportFormat::Json,
    ];

    /// Canonical token accepted by [`FromStr`].
    pub fn token(&self) -> &'static str {
        match self {
            ExportFormat::Spreadsheet => "excel",
            ExportFormat::Csv => "csv",
            ExportFormat::Xml => "xml",
            ExportFormat::Json => "json",
        }
    }

    /// Tag used in suggested file names.
    pub fn tag(&self) -> &'static str {
        match self {
            ExportFormat::Spreadsheet => "Excel",
            ExportFormat::Csv => "CSV",
            ExportFormat::Xml => "XML",
            ExportFormat::Json => "JSON",
        }
    }

    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Spreadsheet => "xml",
            ExportFormat::Csv => "csv",
            ExportFormat::Xml => "xml",
            ExportFormat::Json => "json",
        }
    }

    /// Get the MIME type for this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Spreadsheet => "application/vnd.ms-excel",
            ExportFormat::Csv => "text/csv",
            ExportFormat::Xml => "application/xml",
            ExportFormat::Json => "application/json",
        }
    }

    /// `<ProjectName>_BOQ_<FormatTag>_<YYYYMMDD>.<ext>`.
    ///
    /// Characters that are unsafe in file names (separators, whitespace,
    /// punctuation other than `-`) become `_`.
    pub fn suggested_file_name(&self, project_name: &str, date: NaiveDate) -> String {
        let mut stem: String = project_name
            .trim()
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        if stem.is_empty() {
            stem.push_str("Project");
        }
        format!(
            "{stem}_BOQ_{}_{}.{}",
            self.tag(),
            date.format("%Y%m%d"),
            self.extension()
        )
    }
}

impl core::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "excel" | "xlsx" | "xls" | "spreadsheet" => Ok(ExportFormat::Spreadsheet),
            "csv" => Ok(ExportFormat::Csv),
            "xml" => Ok(ExportFormat::Xml),
            "json" => Ok(ExportFormat::Json),
            _ => Err(ExportError::unsupported_format(s)),
        }
    }
}
