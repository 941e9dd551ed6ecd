//! Export configuration.

use serde::{Deserialize, Serialize};

use crate::format::ExportFormat;

/// Whether calculation metadata columns are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Detail {
    /// Priced fields only.
    Compact,
    /// Priced fields plus calculation notes, reference drawing and measurement rule.
    #[default]
    Verbose,
}

impl Detail {
    pub fn from_verbose(verbose: bool) -> Self {
        if verbose { Detail::Verbose } else { Detail::Compact }
    }

    pub fn is_verbose(self) -> bool {
        self == Detail::Verbose
    }
}

/// Program identification written into document headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generator {
    pub software: String,
    pub version: String,
}

impl Default for Generator {
    fn default() -> Self {
        Self {
            software: "boq-export".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Options for one export call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub detail: Detail,
    /// Reject bills without items instead of rendering a zero total.
    pub strict: bool,
    pub generator: Generator,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Spreadsheet,
            detail: Detail::default(),
            strict: false,
            generator: Generator::default(),
        }
    }
}

impl ExportOptions {
    pub fn new(format: ExportFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_detail(mut self, detail: Detail) -> Self {
        self.detail = detail;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_generator(mut self, software: impl Into<String>, version: impl Into<String>) -> Self {
        self.generator = Generator {
            software: software.into(),
            version: version.into(),
        };
        self
    }
}
