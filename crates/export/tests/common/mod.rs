#![allow(dead_code)]

use boq_bill::{ItemCollection, LineItem, ProjectInfo, Unit};
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub fn project() -> ProjectInfo {
    ProjectInfo::new("Sample Building Project", "PROJ-2025-001")
        .with_created_at(Utc.with_ymd_and_hms(2025, 12, 6, 9, 30, 0).unwrap())
}

/// Items 1.1 and 1.2 under FOUNDATIONS, 8.1 under FINISHES.
pub fn scenario() -> ItemCollection {
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

/// Scenario plus an ungrouped item, a subsection-only item and an overridden amount.
pub fn mixed() -> ItemCollection {
    let mut bill = scenario();
    bill.extend([
        LineItem::builder("0.1", "Mobilisation; site set-up\nand insurance", Unit::Count)
            .quantity(dec!(1))
            .rate(dec!(1500))
            .build()
            .unwrap(),
        LineItem::builder("10.2", "Rebar, 12mm & 16mm", Unit::Mass)
            .subsection("Reinforcement")
            .quantity(dec!(2.345))
            .rate(dec!(1200.333))
            .build()
            .unwrap(),
        LineItem::builder("10.10", "Formwork 'Class F2'", Unit::Area)
            .section("FRAME")
            .subsection("Formwork")
            .quantity(dec!(12))
            .rate(dec!(40))
            .amount(dec!(500.00))
            .build()
            .unwrap(),
    ])
    .unwrap();
    bill
}

pub fn amounts(bill: &ItemCollection) -> Vec<(String, Decimal)> {
    bill.items()
        .iter()
        .map(|item| (item.item_number().to_string(), item.amount()))
        .collect()
}
