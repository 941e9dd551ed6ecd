//! Serializable bill input.
//!
//! Upstream tools hand over priced items as JSON; these DTOs go through the
//! same validating builder as in-process callers.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use boq_core::{DomainError, DomainResult};

use crate::collection::{ItemCollection, ProjectInfo};
use crate::line_item::{LineItem, LineItemBuilder};
use crate::unit::Unit;

/// One line item as supplied by a collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemInput {
    pub item_number: String,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub subsection: Option<String>,
    pub description: String,
    pub unit: Unit,
    #[serde(default)]
    pub quantity: Decimal,
    #[serde(default)]
    pub rate: Decimal,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub calculation_notes: Option<String>,
    #[serde(default)]
    pub reference_drawing: Option<String>,
    #[serde(default)]
    pub measurement_rule: Option<String>,
}

impl TryFrom<LineItemInput> for LineItem {
    type Error = DomainError;

    fn try_from(input: LineItemInput) -> Result<Self, Self::Error> {
        let mut builder = LineItemBuilder::new(input.item_number, input.description, input.unit)
            .quantity(input.quantity)
            .rate(input.rate);
        if let Some(section) = input.section {
            builder = builder.section(section);
        }
        if let Some(subsection) = input.subsection {
            builder = builder.subsection(subsection);
        }
        if let Some(amount) = input.amount {
            builder = builder.amount(amount);
        }
        if let Some(notes) = input.calculation_notes {
            builder = builder.calculation_notes(notes);
        }
        if let Some(drawing) = input.reference_drawing {
            builder = builder.reference_drawing(drawing);
        }
        if let Some(rule) = input.measurement_rule {
            builder = builder.measurement_rule(rule);
        }
        builder.build()
    }
}

/// A whole bill: project metadata plus items in document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillInput {
    pub project_name: String,
    #[serde(default)]
    pub project_number: String,
    /// Defaults to the time of conversion.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    pub items: Vec<LineItemInput>,
}

impl BillInput {
    pub fn into_collection(self) -> DomainResult<ItemCollection> {
        let mut project = ProjectInfo::new(self.project_name, self.project_number);
        if let Some(created_at) = self.created_at {
            project = project.with_created_at(created_at);
        }
        let items = self
            .items
            .into_iter()
            .map(LineItem::try_from)
            .collect::<DomainResult<Vec<_>>>()?;
        ItemCollection::from_items(project, items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const BILL: &str = r#"{
        "project_name": "Sample Building Project",
        "project_number": "PROJ-2025-001",
        "created_at": "2025-12-06T09:30:00Z",
        "items": [
            {
                "item_number": "1.1",
                "section": "FOUNDATIONS",
                "subsection": "Site Preparation",
                "description": "Clear site",
                "unit": "m2",
                "quantity": 150.5,
                "rate": "25.00",
                "measurement_rule": "DQSRule"
            },
            {
                "item_number": "1.2",
                "description": "Lump sum adjustment",
                "unit": "item",
                "amount": 120
            }
        ]
    }"#;

    #[test]
    fn json_bill_converts_through_builder() {
        let input: BillInput = serde_json::from_str(BILL).unwrap();
        let bill = input.into_collection().unwrap();
        assert_eq!(bill.len(), 2);
        assert_eq!(bill.project().number, "PROJ-2025-001");
        assert_eq!(bill.get("1.1").unwrap().amount(), dec!(3762.50));
        assert_eq!(bill.get("1.2").unwrap().unit(), Unit::Count);
        assert!(bill.get("1.2").unwrap().amount_overridden());
        assert_eq!(bill.grand_total(), dec!(3882.50));
    }

    #[test]
    fn invalid_items_are_rejected() {
        let mut input: BillInput = serde_json::from_str(BILL).unwrap();
        input.items[1].quantity = dec!(-3);
        assert!(input.into_collection().unwrap_err().is_validation());
    }

    #[test]
    fn duplicate_numbers_are_rejected() {
        let mut input: BillInput = serde_json::from_str(BILL).unwrap();
        input.items[1].item_number = "1.1".to_string();
        assert!(input.into_collection().unwrap_err().is_duplicate());
    }
}
