//! `BillOfQuantities` XML renderer.

use std::io::Write;

use boq_core::format_money;

use crate::error::ExportResult;
use crate::format::ExportFormat;
use crate::layout::RenderContext;
use crate::render::Renderer;
use crate::xml::XmlWriter;

/// XML renderer.
pub struct MarkupRenderer;

impl Renderer for MarkupRenderer {
    fn render(&self, ctx: &RenderContext<'_>, out: &mut dyn Write) -> ExportResult<()> {
        let mut xml = XmlWriter::new();
        xml.open("BillOfQuantities", &[]);

        xml.open("ProjectInformation", &[]);
        xml.leaf("ProjectName", &[], &ctx.project.name);
        xml.leaf("ProjectNumber", &[], &ctx.project.number);
        xml.leaf("CreatedDate", &[], &ctx.created_date());
        xml.leaf("Software", &[], &ctx.generator.software);
        xml.leaf("Version", &[], &ctx.generator.version);
        xml.close();

        xml.open("Items", &[]);
        for item in ctx.items() {
            xml.open("Item", &[]);
            for column in ctx.columns() {
                xml.leaf(column.element(), &[], &column.text(item));
            }
            xml.close();
        }
        xml.close();

        xml.open("Summary", &[]);
        xml.leaf("TotalItems", &[], &ctx.item_count.to_string());
        xml.leaf("TotalAmount", &[], &format_money(ctx.total));
        xml.close();

        let document = xml.finish();
        tracing::debug!(bytes = document.len(), "rendered xml");
        out.write_all(document.as_bytes())?;
        Ok(())
    }

    fn format(&self) -> ExportFormat {
        ExportFormat::Xml
    }

    fn description(&self) -> &str {
        "BillOfQuantities XML with project information, items and summary"
    }
}
