//! Comma-delimited renderer.
//!
//! ```text
//! Project: <name>
//! Project Number: <number>
//! Date: <ISO timestamp>
//!
//! Item Number,Section,...,Amount[,Calculation Notes,...]
//! <group label>,,,...
//! <item fields>
//!
//! TOTAL,,,,,,,<grand total>
//! ```

use std::io::Write;

use csv::{Terminator, WriterBuilder};

use boq_core::format_money;

use crate::error::{ExportError, ExportResult};
use crate::format::ExportFormat;
use crate::layout::{AMOUNT_COLUMN, RenderContext, Row};
use crate::render::Renderer;

/// CSV renderer.
pub struct DelimitedRenderer;

/// Line buffer; each record is escaped by the `csv` crate (doubled quotes,
/// quoting on delimiter, quote or newline).
struct Lines {
    out: Vec<u8>,
}

impl Lines {
    fn record<I, T>(&mut self, fields: I) -> ExportResult<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        let mut writer = WriterBuilder::new()
            .flexible(true)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(&mut self.out);
        writer.write_record(fields)?;
        writer.flush().map_err(ExportError::encode)?;
        Ok(())
    }

    fn blank(&mut self) {
        self.out.push(b'\n');
    }
}

impl Renderer for DelimitedRenderer {
    fn render(&self, ctx: &RenderContext<'_>, out: &mut dyn Write) -> ExportResult<()> {
        let columns = ctx.columns();
        let mut lines = Lines { out: Vec::new() };

        lines.record([format!("Project: {}", ctx.project.name)])?;
        lines.record([format!("Project Number: {}", ctx.project.number)])?;
        lines.record([format!("Date: {}", ctx.created_date())])?;
        lines.blank();

        lines.record(columns.iter().map(|c| c.header()))?;

        for row in ctx.rows() {
            match row {
                Row::GroupHeader(label) => {
                    let mut fields = vec![String::new(); columns.len()];
                    fields[0] = label;
                    lines.record(fields)?;
                }
                Row::Item(item) => {
                    lines.record(columns.iter().map(|c| c.text(item).into_owned()))?;
                }
                Row::Total(total) => {
                    let mut fields = vec![String::new(); AMOUNT_COLUMN + 1];
                    fields[0] = "TOTAL".to_string();
                    fields[AMOUNT_COLUMN] = format_money(total);
                    lines.blank();
                    lines.record(fields)?;
                }
            }
        }

        tracing::debug!(bytes = lines.out.len(), "rendered csv");
        out.write_all(&lines.out)?;
        Ok(())
    }

    fn format(&self) -> ExportFormat {
        ExportFormat::Csv
    }

    fn description(&self) -> &str {
        "Comma-delimited text with project preamble and total line"
    }
}
