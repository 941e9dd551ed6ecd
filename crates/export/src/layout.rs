//! Shared row/column layout.
//!
//! Every renderer walks the same [`RenderContext`]: same columns, same group
//! order, same totals. Renderers only decide the container format.

use std::borrow::Cow;

use chrono::SecondsFormat;
use rust_decimal::Decimal;

use boq_bill::{Group, ItemCollection, LineItem, ProjectInfo};
use boq_core::format_money;

use crate::options::{Detail, ExportOptions, Generator};

/// Column of the tabular layouts, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    ItemNumber,
    Section,
    Subsection,
    Description,
    Unit,
    Quantity,
    Rate,
    Amount,
    CalculationNotes,
    ReferenceDrawing,
    MeasurementRule,
}

const COMPACT_COLUMNS: [Column; 8] = [
    Column::ItemNumber,
    Column::Section,
    Column::Subsection,
    Column::Description,
    Column::Unit,
    Column::Quantity,
    Column::Rate,
    Column::Amount,
];

const VERBOSE_COLUMNS: [Column; 11] = [
    Column::ItemNumber,
    Column::Section,
    Column::Subsection,
    Column::Description,
    Column::Unit,
    Column::Quantity,
    Column::Rate,
    Column::Amount,
    Column::CalculationNotes,
    Column::ReferenceDrawing,
    Column::MeasurementRule,
];

/// Zero-based index of the amount column (same in both detail levels).
pub const AMOUNT_COLUMN: usize = 7;

/// Columns emitted at the given detail level.
pub fn columns(detail: Detail) -> &'static [Column] {
    match detail {
        Detail::Compact => &COMPACT_COLUMNS,
        Detail::Verbose => &VERBOSE_COLUMNS,
    }
}

impl Column {
    /// Display name, used as spreadsheet/CSV header and JSON key.
    pub fn header(self) -> &'static str {
        match self {
            Column::ItemNumber => "Item Number",
            Column::Section => "Section",
            Column::Subsection => "Subsection",
            Column::Description => "Description",
            Column::Unit => "Unit",
            Column::Quantity => "Quantity",
            Column::Rate => "Rate",
            Column::Amount => "Amount",
            Column::CalculationNotes => "Calculation Notes",
            Column::ReferenceDrawing => "Reference Drawing",
            Column::MeasurementRule => "Measurement Rule",
        }
    }

    /// XML element name.
    pub fn element(self) -> &'static str {
        match self {
            Column::ItemNumber => "ItemNumber",
            Column::Section => "Section",
            Column::Subsection => "Subsection",
            Column::Description => "Description",
            Column::Unit => "Unit",
            Column::Quantity => "Quantity",
            Column::Rate => "Rate",
            Column::Amount => "Amount",
            Column::CalculationNotes => "CalculationNotes",
            Column::ReferenceDrawing => "ReferenceDrawing",
            Column::MeasurementRule => "MeasurementRule",
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, Column::Quantity | Column::Rate | Column::Amount)
    }

    /// Raw numeric value for numeric columns.
    pub fn number(self, item: &LineItem) -> Option<Decimal> {
        match self {
            Column::Quantity => Some(item.quantity()),
            Column::Rate => Some(item.rate()),
            Column::Amount => Some(item.amount()),
            _ => None,
        }
    }

    /// Cell text: numbers with two decimals, absent labels as empty strings.
    pub fn text(self, item: &LineItem) -> Cow<'_, str> {
        if let Some(value) = self.number(item) {
            return Cow::Owned(format_money(value));
        }
        let text = match self {
            Column::ItemNumber => Some(item.item_number().as_str()),
            Column::Section => item.section(),
            Column::Subsection => item.subsection(),
            Column::Description => Some(item.description()),
            Column::Unit => Some(item.unit().symbol()),
            Column::CalculationNotes => item.calculation_notes(),
            Column::ReferenceDrawing => item.reference_drawing(),
            Column::MeasurementRule => item.measurement_rule(),
            Column::Quantity | Column::Rate | Column::Amount => None,
        };
        Cow::Borrowed(text.unwrap_or(""))
    }
}

/// One row of the reference layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row<'a> {
    /// Labelled group header; data cells blank.
    GroupHeader(String),
    Item(&'a LineItem),
    /// Closing row; grand total in the amount column.
    Total(Decimal),
}

/// Everything a renderer needs, computed once per export.
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    pub project: &'a ProjectInfo,
    pub groups: Vec<Group<'a>>,
    pub total: Decimal,
    pub item_count: usize,
    pub detail: Detail,
    pub generator: &'a Generator,
}

impl<'a> RenderContext<'a> {
    pub fn new(collection: &'a ItemCollection, options: &'a ExportOptions) -> Self {
        Self {
            project: collection.project(),
            groups: collection.grouped_view().iter().collect(),
            total: collection.grand_total(),
            item_count: collection.len(),
            detail: options.detail,
            generator: &options.generator,
        }
    }

    pub fn columns(&self) -> &'static [Column] {
        columns(self.detail)
    }

    /// Creation timestamp as RFC 3339 UTC, second precision.
    pub fn created_date(&self) -> String {
        self.project.created_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// Items in document order (ungrouped first, then by group).
    pub fn items(&self) -> impl Iterator<Item = &'a LineItem> + '_ {
        self.groups.iter().flat_map(|group| group.items.iter().copied())
    }

    /// Reference layout rows: group headers, items, closing total.
    pub fn rows(&self) -> Vec<Row<'a>> {
        let mut rows = Vec::with_capacity(self.item_count + self.groups.len() + 1);
        for group in &self.groups {
            if let Some(label) = group.label() {
                rows.push(Row::GroupHeader(label));
            }
            rows.extend(group.items.iter().copied().map(Row::Item));
        }
        rows.push(Row::Total(self.total));
        rows
    }
}
