//! JSON interchange renderer.
//!
//! Item objects are keyed by the column display names; numbers are JSON
//! numbers written exactly, with two decimals (`3762.50`). Metadata keys are
//! present only in verbose mode.

use std::io::Write;

use rust_decimal::Decimal;
use serde::Serialize;

use boq_bill::LineItem;
use boq_core::round_money;

use crate::error::ExportResult;
use crate::format::ExportFormat;
use crate::layout::RenderContext;
use crate::render::Renderer;

/// JSON renderer.
pub struct InterchangeRenderer;

#[derive(Serialize)]
struct Document<'a> {
    project_information: ProjectInformation<'a>,
    items: Vec<ItemRecord<'a>>,
    summary: SummaryRecord,
}

#[derive(Serialize)]
struct ProjectInformation<'a> {
    project_name: &'a str,
    project_number: &'a str,
    created_date: String,
    software: &'a str,
    version: &'a str,
}

#[derive(Serialize)]
struct ItemRecord<'a> {
    #[serde(rename = "Item Number")]
    item_number: &'a str,
    #[serde(rename = "Section")]
    section: &'a str,
    #[serde(rename = "Subsection")]
    subsection: &'a str,
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "Unit")]
    unit: &'static str,
    #[serde(rename = "Quantity", with = "rust_decimal::serde::arbitrary_precision")]
    quantity: Decimal,
    #[serde(rename = "Rate", with = "rust_decimal::serde::arbitrary_precision")]
    rate: Decimal,
    #[serde(rename = "Amount", with = "rust_decimal::serde::arbitrary_precision")]
    amount: Decimal,
    #[serde(rename = "Calculation Notes", skip_serializing_if = "Option::is_none")]
    calculation_notes: Option<&'a str>,
    #[serde(rename = "Reference Drawing", skip_serializing_if = "Option::is_none")]
    reference_drawing: Option<&'a str>,
    #[serde(rename = "Measurement Rule", skip_serializing_if = "Option::is_none")]
    measurement_rule: Option<&'a str>,
}

#[derive(Serialize)]
struct SummaryRecord {
    total_items: usize,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    total_amount: Decimal,
}

impl<'a> ItemRecord<'a> {
    fn new(item: &'a LineItem, verbose: bool) -> Self {
        let metadata = |value: Option<&'a str>| verbose.then(|| value.unwrap_or(""));
        Self {
            item_number: item.item_number().as_str(),
            section: item.section().unwrap_or(""),
            subsection: item.subsection().unwrap_or(""),
            description: item.description(),
            unit: item.unit().symbol(),
            quantity: round_money(item.quantity()),
            rate: round_money(item.rate()),
            amount: round_money(item.amount()),
            calculation_notes: metadata(item.calculation_notes()),
            reference_drawing: metadata(item.reference_drawing()),
            measurement_rule: metadata(item.measurement_rule()),
        }
    }
}

impl Renderer for InterchangeRenderer {
    fn render(&self, ctx: &RenderContext<'_>, out: &mut dyn Write) -> ExportResult<()> {
        let verbose = ctx.detail.is_verbose();

        let document = Document {
            project_information: ProjectInformation {
                project_name: &ctx.project.name,
                project_number: &ctx.project.number,
                created_date: ctx.created_date(),
                software: &ctx.generator.software,
                version: &ctx.generator.version,
            },
            items: ctx.items().map(|item| ItemRecord::new(item, verbose)).collect(),
            summary: SummaryRecord {
                total_items: ctx.item_count,
                total_amount: round_money(ctx.total),
            },
        };

        let mut encoded = serde_json::to_vec_pretty(&document)?;
        encoded.push(b'\n');
        tracing::debug!(bytes = encoded.len(), "rendered json");
        out.write_all(&encoded)?;
        Ok(())
    }

    fn format(&self) -> ExportFormat {
        ExportFormat::Json
    }

    fn description(&self) -> &str {
        "JSON object with project_information, items and summary"
    }
}
