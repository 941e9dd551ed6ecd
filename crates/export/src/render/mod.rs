//! Format renderers.
//!
//! One renderer per format, each parameterised by the detail level carried in
//! the [`RenderContext`]. Renderers write into an in-memory buffer supplied by
//! the coordinator; they never see the destination.

use std::io::Write;

use crate::error::ExportResult;
use crate::format::ExportFormat;
use crate::layout::RenderContext;

pub mod delimited;
pub mod interchange;
pub mod markup;
pub mod spreadsheet;

pub use delimited::DelimitedRenderer;
pub use interchange::InterchangeRenderer;
pub use markup::MarkupRenderer;
pub use spreadsheet::SpreadsheetRenderer;

/// Trait for document renderers
pub trait Renderer: Send + Sync {
    /// Write the rendered document to the writer
    fn render(&self, ctx: &RenderContext<'_>, out: &mut dyn Write) -> ExportResult<()>;

    /// Format this renderer produces
    fn format(&self) -> ExportFormat;

    /// Get a description of this renderer
    fn description(&self) -> &str;
}

/// Renderer for the given format.
pub fn renderer_for(format: ExportFormat) -> &'static dyn Renderer {
    match format {
        ExportFormat::Spreadsheet => &SpreadsheetRenderer,
        ExportFormat::Csv => &DelimitedRenderer,
        ExportFormat::Xml => &MarkupRenderer,
        ExportFormat::Json => &InterchangeRenderer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_format_has_a_matching_renderer() {
        for format in ExportFormat::ALL {
            assert_eq!(renderer_for(format).format(), format);
            assert!(!renderer_for(format).description().is_empty());
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use boq_bill::{ItemCollection, LineItem, ProjectInfo, Unit};
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    pub(crate) fn project() -> ProjectInfo {
        ProjectInfo::new("Sample Building Project", "PROJ-2025-001")
            .with_created_at(Utc.with_ymd_and_hms(2025, 12, 6, 9, 30, 0).unwrap())
    }

    /// Three-item bill: two FOUNDATIONS items, one FINISHES item.
    pub(crate) fn scenario() -> ItemCollection {
        ItemCollection::from_items(
            project(),
            [
                LineItem::builder("1.1", "Clear site, 2m beyond perimeter", Unit::Area)
                    .section("FOUNDATIONS")
                    .quantity(dec!(150.5))
                    .rate(dec!(25.00))
                    .calculation_notes("(10+12)x2 = 44m perimeter")
                    .reference_drawing("DWG-SITE-001")
                    .measurement_rule("DQSRule")
                    .build()
                    .unwrap(),
                LineItem::builder("1.2", "Concrete footing \"type A\"", Unit::Count)
                    .section("FOUNDATIONS")
                    .quantity(dec!(10))
                    .rate(dec!(85.00))
                    .build()
                    .unwrap(),
                LineItem::builder("8.1", "Floor tiling <ceramic> & grout", Unit::Area)
                    .section("FINISHES")
                    .quantity(dec!(245.0))
                    .rate(dec!(125.00))
                    .build()
                    .unwrap(),
            ],
        )
        .unwrap()
    }
}
