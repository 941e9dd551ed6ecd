//! Line items and their validating builder.

use rust_decimal::Decimal;

use boq_core::{DomainError, DomainResult, ItemNumber, ValueObject, round_money};

use crate::unit::Unit;

/// One measured, priced unit of work.
///
/// Built through [`LineItemBuilder`], which validates every field. There are no
/// setters: a changed item is a new item (see [`LineItem::to_builder`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    item_number: ItemNumber,
    section: Option<String>,
    subsection: Option<String>,
    description: String,
    unit: Unit,
    quantity: Decimal,
    rate: Decimal,
    amount: Decimal,
    amount_overridden: bool,
    calculation_notes: Option<String>,
    reference_drawing: Option<String>,
    measurement_rule: Option<String>,
}

impl ValueObject for LineItem {}

impl LineItem {
    pub fn builder(
        item_number: impl Into<String>,
        description: impl Into<String>,
        unit: Unit,
    ) -> LineItemBuilder {
        LineItemBuilder::new(item_number, description, unit)
    }

    pub fn item_number(&self) -> &ItemNumber {
        &self.item_number
    }

    pub fn section(&self) -> Option<&str> {
        self.section.as_deref()
    }

    pub fn subsection(&self) -> Option<&str> {
        self.subsection.as_deref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }

    /// Supplied amount, or `quantity * rate` rounded to cents.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// True when the amount was supplied rather than derived.
    pub fn amount_overridden(&self) -> bool {
        self.amount_overridden
    }

    pub fn calculation_notes(&self) -> Option<&str> {
        self.calculation_notes.as_deref()
    }

    pub fn reference_drawing(&self) -> Option<&str> {
        self.reference_drawing.as_deref()
    }

    pub fn measurement_rule(&self) -> Option<&str> {
        self.measurement_rule.as_deref()
    }

    /// Items without section and subsection are ungrouped.
    pub fn is_ungrouped(&self) -> bool {
        self.section.is_none() && self.subsection.is_none()
    }

    /// Builder pre-filled with this item's fields, for building a replacement.
    ///
    /// A derived amount stays derived, so changing quantity or rate on the
    /// builder re-derives it; an overridden amount is carried over as supplied.
    pub fn to_builder(&self) -> LineItemBuilder {
        LineItemBuilder {
            item_number: self.item_number.to_string(),
            section: self.section.clone(),
            subsection: self.subsection.clone(),
            description: self.description.clone(),
            unit: self.unit,
            quantity: self.quantity,
            rate: self.rate,
            amount: self.amount_overridden.then_some(self.amount),
            calculation_notes: self.calculation_notes.clone(),
            reference_drawing: self.reference_drawing.clone(),
            measurement_rule: self.measurement_rule.clone(),
        }
    }
}

/// Validating builder for [`LineItem`].
#[derive(Debug, Clone, PartialEq)]
pub struct LineItemBuilder {
    item_number: String,
    section: Option<String>,
    subsection: Option<String>,
    description: String,
    unit: Unit,
    quantity: Decimal,
    rate: Decimal,
    amount: Option<Decimal>,
    calculation_notes: Option<String>,
    reference_drawing: Option<String>,
    measurement_rule: Option<String>,
}

impl LineItemBuilder {
    pub fn new(item_number: impl Into<String>, description: impl Into<String>, unit: Unit) -> Self {
        Self {
            item_number: item_number.into(),
            section: None,
            subsection: None,
            description: description.into(),
            unit,
            quantity: Decimal::ZERO,
            rate: Decimal::ZERO,
            amount: None,
            calculation_notes: None,
            reference_drawing: None,
            measurement_rule: None,
        }
    }

    pub fn section(mut self, section: impl Into<String>) -> Self {
        self.section = non_blank(section.into());
        self
    }

    pub fn subsection(mut self, subsection: impl Into<String>) -> Self {
        self.subsection = non_blank(subsection.into());
        self
    }

    pub fn quantity(mut self, quantity: Decimal) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn rate(mut self, rate: Decimal) -> Self {
        self.rate = rate;
        self
    }

    /// Supply the amount explicitly. It is stored as given, never recomputed.
    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Drop a supplied amount so it is derived again.
    pub fn derive_amount(mut self) -> Self {
        self.amount = None;
        self
    }

    pub fn calculation_notes(mut self, notes: impl Into<String>) -> Self {
        self.calculation_notes = non_blank(notes.into());
        self
    }

    pub fn reference_drawing(mut self, drawing: impl Into<String>) -> Self {
        self.reference_drawing = non_blank(drawing.into());
        self
    }

    pub fn measurement_rule(mut self, rule: impl Into<String>) -> Self {
        self.measurement_rule = non_blank(rule.into());
        self
    }

    pub fn build(self) -> DomainResult<LineItem> {
        let item_number = ItemNumber::parse(&self.item_number)?;

        if self.description.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "item {item_number}: description must not be empty"
            )));
        }
        let text_fields = [
            ("description", Some(&self.description)),
            ("section", self.section.as_ref()),
            ("subsection", self.subsection.as_ref()),
            ("calculation notes", self.calculation_notes.as_ref()),
            ("reference drawing", self.reference_drawing.as_ref()),
            ("measurement rule", self.measurement_rule.as_ref()),
        ];
        for (field, value) in text_fields {
            if let Some(value) = value {
                ensure_printable(&item_number, field, value)?;
            }
        }
        ensure_non_negative(&item_number, "quantity", self.quantity)?;
        ensure_non_negative(&item_number, "rate", self.rate)?;

        let (amount, amount_overridden) = match self.amount {
            Some(amount) => {
                ensure_non_negative(&item_number, "amount", amount)?;
                (amount, true)
            }
            None => {
                let product = self.quantity.checked_mul(self.rate).ok_or_else(|| {
                    DomainError::validation(format!("item {item_number}: amount overflow"))
                })?;
                (round_money(product), false)
            }
        };

        Ok(LineItem {
            item_number,
            section: self.section,
            subsection: self.subsection,
            description: self.description,
            unit: self.unit,
            quantity: self.quantity,
            rate: self.rate,
            amount,
            amount_overridden,
            calculation_notes: self.calculation_notes,
            reference_drawing: self.reference_drawing,
            measurement_rule: self.measurement_rule,
        })
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() { None } else { Some(value) }
}

/// Tab, line feed and carriage return are the only control characters every
/// export format can carry.
fn ensure_printable(item: &ItemNumber, field: &str, value: &str) -> DomainResult<()> {
    let invalid = value
        .chars()
        .any(|c| c.is_control() && !matches!(c, '\t' | '\n' | '\r'));
    if invalid {
        return Err(DomainError::validation(format!(
            "item {item}: {field} contains control characters"
        )));
    }
    Ok(())
}

fn ensure_non_negative(item: &ItemNumber, field: &str, value: Decimal) -> DomainResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(DomainError::validation(format!(
            "item {item}: {field} must not be negative (got {value})"
        )));
    }
    Ok(())
}
