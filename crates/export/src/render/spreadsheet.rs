//! SpreadsheetML 2003 workbook renderer (the reference layout).
//!
//! Layout: header band (title, project number, date, generator), a blank row,
//! the column header row, one shaded row per group label, one row per item,
//! a blank row and the `TOTAL` row. Rows above the item area are frozen.

use std::io::Write;

use rust_decimal::Decimal;

use boq_core::format_money;

use crate::error::ExportResult;
use crate::format::ExportFormat;
use crate::layout::{AMOUNT_COLUMN, Column, RenderContext, Row};
use crate::render::Renderer;
use crate::xml::XmlWriter;

const SPREADSHEET_NS: &str = "urn:schemas-microsoft-com:office:spreadsheet";
const EXCEL_NS: &str = "urn:schemas-microsoft-com:office:excel";
const WORKSHEET_NAME: &str = "Bill of Quantities";

/// Rows before the item area: four header-band rows, a blank row, the column headers.
const FROZEN_ROWS: usize = 6;

/// SpreadsheetML renderer.
pub struct SpreadsheetRenderer;

fn column_width(column: Column) -> u32 {
    let chars = match column {
        Column::ItemNumber => 10,
        Column::Section | Column::Subsection => 20,
        Column::Description => 50,
        Column::Unit => 10,
        Column::Quantity | Column::Rate => 12,
        Column::Amount => 15,
        Column::CalculationNotes => 40,
        Column::ReferenceDrawing | Column::MeasurementRule => 15,
    };
    chars * 6
}

fn write_styles(xml: &mut XmlWriter) {
    xml.open("Styles", &[]);

    xml.open("Style", &[("ss:ID", "Title")]);
    xml.leaf("Font", &[("ss:Bold", "1"), ("ss:Size", "14")], "");
    xml.close();

    xml.open("Style", &[("ss:ID", "Header")]);
    xml.leaf("Alignment", &[("ss:Horizontal", "Center"), ("ss:Vertical", "Center")], "");
    xml.leaf("Font", &[("ss:Bold", "1"), ("ss:Color", "#FFFFFF"), ("ss:Size", "11")], "");
    xml.leaf("Interior", &[("ss:Color", "#366092"), ("ss:Pattern", "Solid")], "");
    xml.close();

    xml.open("Style", &[("ss:ID", "Group")]);
    xml.leaf("Font", &[("ss:Bold", "1"), ("ss:Size", "11")], "");
    xml.leaf("Interior", &[("ss:Color", "#D9E1F2"), ("ss:Pattern", "Solid")], "");
    xml.close();

    xml.open("Style", &[("ss:ID", "Number")]);
    xml.leaf("Alignment", &[("ss:Horizontal", "Right")], "");
    xml.leaf("NumberFormat", &[("ss:Format", "0.00")], "");
    xml.close();

    xml.open("Style", &[("ss:ID", "TotalLabel")]);
    xml.leaf("Alignment", &[("ss:Horizontal", "Right")], "");
    xml.leaf("Font", &[("ss:Bold", "1")], "");
    xml.close();

    xml.open("Style", &[("ss:ID", "TotalNumber")]);
    xml.leaf("Font", &[("ss:Bold", "1")], "");
    xml.leaf("NumberFormat", &[("ss:Format", "0.00")], "");
    xml.close();

    xml.close();
}

fn string_cell(xml: &mut XmlWriter, style: Option<&str>, text: &str) {
    if text.is_empty() {
        match style {
            Some(style) => xml.leaf("Cell", &[("ss:StyleID", style)], ""),
            None => xml.leaf("Cell", &[], ""),
        }
        return;
    }
    match style {
        Some(style) => xml.open("Cell", &[("ss:StyleID", style)]),
        None => xml.open("Cell", &[]),
    }
    xml.leaf("Data", &[("ss:Type", "String")], text);
    xml.close();
}

fn number_cell(xml: &mut XmlWriter, style: &str, value: Decimal) {
    xml.open("Cell", &[("ss:StyleID", style)]);
    xml.leaf("Data", &[("ss:Type", "Number")], &format_money(value));
    xml.close();
}

fn label_row(xml: &mut XmlWriter, label: &str, value: &str) {
    xml.open("Row", &[]);
    string_cell(xml, None, label);
    string_cell(xml, None, value);
    xml.close();
}

fn write_header_band(xml: &mut XmlWriter, ctx: &RenderContext<'_>, width: usize) {
    let merge = (width - 1).to_string();
    xml.open("Row", &[]);
    xml.open("Cell", &[("ss:MergeAcross", merge.as_str()), ("ss:StyleID", "Title")]);
    xml.leaf(
        "Data",
        &[("ss:Type", "String")],
        &format!("BILL OF QUANTITIES - {}", ctx.project.name),
    );
    xml.close();
    xml.close();

    label_row(xml, "Project Number:", &ctx.project.number);
    label_row(xml, "Date:", &ctx.created_date());
    label_row(
        xml,
        "Generated by:",
        &format!("{} {}", ctx.generator.software, ctx.generator.version),
    );
    xml.leaf("Row", &[], "");
}

fn write_rows(xml: &mut XmlWriter, ctx: &RenderContext<'_>) {
    let columns = ctx.columns();

    xml.open("Row", &[]);
    for column in columns {
        string_cell(xml, Some("Header"), column.header());
    }
    xml.close();

    for row in ctx.rows() {
        match row {
            Row::GroupHeader(label) => {
                xml.open("Row", &[]);
                string_cell(xml, Some("Group"), &label);
                for _ in 1..columns.len() {
                    string_cell(xml, Some("Group"), "");
                }
                xml.close();
            }
            Row::Item(item) => {
                xml.open("Row", &[]);
                for column in columns {
                    match column.number(item) {
                        Some(value) => number_cell(xml, "Number", value),
                        None => string_cell(xml, None, &column.text(item)),
                    }
                }
                xml.close();
            }
            Row::Total(total) => {
                xml.leaf("Row", &[], "");
                xml.open("Row", &[]);
                string_cell(xml, Some("TotalLabel"), "TOTAL");
                for index in 1..columns.len() {
                    if index == AMOUNT_COLUMN {
                        number_cell(xml, "TotalNumber", total);
                    } else {
                        string_cell(xml, None, "");
                    }
                }
                xml.close();
            }
        }
    }
}

fn write_worksheet_options(xml: &mut XmlWriter) {
    let frozen = FROZEN_ROWS.to_string();
    xml.open("WorksheetOptions", &[("xmlns", EXCEL_NS)]);
    xml.leaf("FreezePanes", &[], "");
    xml.leaf("FrozenNoSplit", &[], "");
    xml.leaf("SplitHorizontal", &[], &frozen);
    xml.leaf("TopRowBottomPane", &[], &frozen);
    xml.leaf("ActivePane", &[], "2");
    xml.close();
}

impl Renderer for SpreadsheetRenderer {
    fn render(&self, ctx: &RenderContext<'_>, out: &mut dyn Write) -> ExportResult<()> {
        let columns = ctx.columns();
        let mut xml = XmlWriter::new();
        xml.instruction("mso-application", "progid=\"Excel.Sheet\"");
        xml.open(
            "Workbook",
            &[
                ("xmlns", SPREADSHEET_NS),
                ("xmlns:o", "urn:schemas-microsoft-com:office:office"),
                ("xmlns:x", EXCEL_NS),
                ("xmlns:ss", SPREADSHEET_NS),
            ],
        );
        write_styles(&mut xml);

        xml.open("Worksheet", &[("ss:Name", WORKSHEET_NAME)]);
        xml.open("Table", &[]);
        for column in columns {
            let width = column_width(*column).to_string();
            xml.leaf("Column", &[("ss:Width", width.as_str())], "");
        }
        write_header_band(&mut xml, ctx, columns.len());
        write_rows(&mut xml, ctx);
        xml.close();
        write_worksheet_options(&mut xml);
        xml.close();

        let document = xml.finish();
        tracing::debug!(bytes = document.len(), "rendered spreadsheet");
        out.write_all(document.as_bytes())?;
        Ok(())
    }

    fn format(&self) -> ExportFormat {
        ExportFormat::Spreadsheet
    }

    fn description(&self) -> &str {
        "SpreadsheetML workbook with group headers and a total row"
    }
}
