mod common;

use std::str::FromStr;
use std::thread;

use boq_bill::ItemCollection;
use boq_export::{
    Detail, ExportError, ExportFormat, ExportOptions, MemorySink, export, export_with,
    render_to_vec,
};
use boq_bill::{LineItem, Unit};
use proptest::prelude::*;
use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use common::{mixed, project, scenario};

/// (item number, amount) pairs and the grand total read back from a document.
#[derive(Debug, PartialEq)]
struct Parsed {
    items: Vec<(String, Decimal)>,
    total: Decimal,
}

fn decimal(text: &str) -> Decimal {
    Decimal::from_str(text.trim()).unwrap_or_else(|_| panic!("not a decimal: {text:?}"))
}

fn render(bill: &ItemCollection, format: ExportFormat, detail: Detail) -> String {
    let options = ExportOptions::new(format).with_detail(detail);
    String::from_utf8(render_to_vec(bill, &options).unwrap()).unwrap()
}

fn parse_csv(doc: &str) -> Parsed {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(doc.as_bytes());

    let mut items = Vec::new();
    let mut total = None;
    let mut in_body = false;
    for record in reader.records() {
        let record = record.unwrap();
        if &record[0] == "Item Number" {
            in_body = true;
            continue;
        }
        if !in_body {
            continue;
        }
        if &record[0] == "TOTAL" {
            total = Some(decimal(&record[7]));
        } else if !record[7].is_empty() {
            items.push((record[0].to_string(), decimal(&record[7])));
        }
    }
    Parsed { items, total: total.unwrap() }
}

fn parse_xml(doc: &str) -> Parsed {
    let item = Regex::new(r"(?s)<Item>(.*?)</Item>").unwrap();
    let number = Regex::new(r"<ItemNumber>([^<]*)</ItemNumber>").unwrap();
    let amount = Regex::new(r"<Amount>([^<]*)</Amount>").unwrap();
    let total = Regex::new(r"<TotalAmount>([^<]*)</TotalAmount>").unwrap();

    let items = item
        .captures_iter(doc)
        .map(|c| {
            let body = c.get(1).unwrap().as_str();
            (
                number.captures(body).unwrap()[1].to_string(),
                decimal(&amount.captures(body).unwrap()[1]),
            )
        })
        .collect();
    Parsed { items, total: decimal(&total.captures(doc).unwrap()[1]) }
}

/// Cells per row; `None` for empty cells.
fn spreadsheet_rows(doc: &str) -> Vec<Vec<Option<String>>> {
    let row = Regex::new(r"(?s)<Row>(.*?)</Row>").unwrap();
    let cell = Regex::new(r#"(?s)<Cell[^>]*/>|<Cell[^>]*>\s*<Data ss:Type="\w+">([^<]*)</Data>\s*</Cell>"#)
        .unwrap();
    row.captures_iter(doc)
        .map(|r| {
            cell.captures_iter(r.get(1).unwrap().as_str())
                .map(|c| c.get(1).map(|m| m.as_str().to_string()))
                .collect()
        })
        .collect()
}

fn parse_spreadsheet(doc: &str) -> Parsed {
    let mut items = Vec::new();
    let mut total = None;
    for cells in spreadsheet_rows(doc) {
        if cells.len() < 8 || cells[0].as_deref() == Some("Item Number") {
            continue;
        }
        match (cells[0].as_deref(), cells[7].as_deref()) {
            (Some("TOTAL"), Some(amount)) => total = Some(decimal(amount)),
            (Some(number), Some(amount)) => items.push((number.to_string(), decimal(amount))),
            _ => {}
        }
    }
    Parsed { items, total: total.unwrap() }
}

fn parse_json(doc: &str) -> Parsed {
    let value: serde_json::Value = serde_json::from_str(doc).unwrap();
    let items = value["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| {
            (
                item["Item Number"].as_str().unwrap().to_string(),
                decimal(&item["Amount"].to_string()),
            )
        })
        .collect();
    Parsed {
        items,
        total: decimal(&value["summary"]["total_amount"].to_string()),
    }
}

fn parse(format: ExportFormat, doc: &str) -> Parsed {
    match format {
        ExportFormat::Spreadsheet => parse_spreadsheet(doc),
        ExportFormat::Csv => parse_csv(doc),
        ExportFormat::Xml => parse_xml(doc),
        ExportFormat::Json => parse_json(doc),
    }
}

/// Items in document order: ungrouped first, then groups by first appearance.
fn expected(bill: &ItemCollection) -> Parsed {
    let items = bill
        .grouped_view()
        .iter()
        .flat_map(|group| group.items)
        .map(|item| (item.item_number().to_string(), item.amount()))
        .collect();
    Parsed { items, total: bill.grand_total() }
}

/// Start/end tags balance and nest; comments and instructions are skipped.
///
/// Only tag structure is checked here. Entity and character validity is
/// covered by the property tests on the escaper in `xml.rs`.
fn assert_well_formed(doc: &str) {
    let tag = Regex::new(r"<(/?)([A-Za-z][\w:.-]*)[^>]*?(/?)>").unwrap();
    let mut stack: Vec<String> = Vec::new();
    for c in tag.captures_iter(doc) {
        let name = c[2].to_string();
        match (&c[1], &c[3]) {
            ("", "/") => {}
            ("", _) => stack.push(name),
            _ => assert_eq!(stack.pop().as_deref(), Some(name.as_str()), "mismatched </{name}>"),
        }
    }
    assert!(stack.is_empty(), "unclosed elements: {stack:?}");
    assert_eq!(doc.matches("<?xml ").count(), 1);
}

#[test]
fn scenario_totals_agree_in_every_format() {
    let bill = scenario();
    assert_eq!(bill.grouped_view().subtotals(), vec![dec!(4612.50), dec!(30625.00)]);

    for format in ExportFormat::ALL {
        for detail in [Detail::Compact, Detail::Verbose] {
            let parsed = parse(format, &render(&bill, format, detail));
            assert_eq!(parsed.total, dec!(35237.50), "{format} {detail:?}");
            assert_eq!(
                parsed.items,
                vec![
                    ("1.1".to_string(), dec!(3762.50)),
                    ("1.2".to_string(), dec!(850.00)),
                    ("8.1".to_string(), dec!(30625.00)),
                ],
                "{format} {detail:?}"
            );
        }
    }
}

#[test]
fn formats_agree_on_a_mixed_bill() {
    let bill = mixed();
    let expected = expected(&bill);
    assert_eq!(expected.items[0].0, "0.1");
    assert_eq!(expected.total, common::amounts(&bill).iter().map(|(_, a)| *a).sum::<Decimal>());

    for format in ExportFormat::ALL {
        assert_eq!(parse(format, &render(&bill, format, Detail::Verbose)), expected, "{format}");
    }
}

#[test]
fn large_amounts_read_back_exactly_in_every_format() {
    let bill = ItemCollection::from_items(
        project(),
        [
            LineItem::builder("1.1", "Provisional sum", Unit::Count)
                .section("PROVISIONAL SUMS")
                .amount(dec!(12345678901234567.89))
                .build()
                .unwrap(),
            LineItem::builder("1.2", "Contingency", Unit::Count)
                .section("PROVISIONAL SUMS")
                .amount(dec!(0.01))
                .build()
                .unwrap(),
        ],
    )
    .unwrap();

    for format in ExportFormat::ALL {
        let parsed = parse(format, &render(&bill, format, Detail::Compact));
        assert_eq!(parsed.total, dec!(12345678901234567.90), "{format}");
        assert_eq!(parsed.items[0].1, dec!(12345678901234567.89), "{format}");
    }
}

#[test]
fn markup_outputs_are_well_formed() {
    for bill in [scenario(), mixed(), ItemCollection::new(project())] {
        for detail in [Detail::Compact, Detail::Verbose] {
            assert_well_formed(&render(&bill, ExportFormat::Xml, detail));
            assert_well_formed(&render(&bill, ExportFormat::Spreadsheet, detail));
        }
    }
}

#[test]
fn special_characters_survive_every_format() {
    let bill = scenario();

    let delimited = render(&bill, ExportFormat::Csv, Detail::Compact);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(delimited.as_bytes());
    let descriptions: Vec<String> = reader
        .records()
        .map(|r| r.unwrap())
        .filter(|r| r.len() > 3)
        .map(|r| r[3].to_string())
        .collect();
    assert!(descriptions.contains(&"Concrete footing \"type A\"".to_string()));
    assert!(descriptions.contains(&"Clear site, 2m beyond perimeter".to_string()));

    let xml = render(&bill, ExportFormat::Xml, Detail::Compact);
    assert!(xml.contains("<Description>Floor tiling &lt;ceramic&gt; &amp; grout</Description>"));

    let json: serde_json::Value =
        serde_json::from_str(&render(&bill, ExportFormat::Json, Detail::Compact)).unwrap();
    assert_eq!(json["items"][1]["Description"], "Concrete footing \"type A\"");
}

#[test]
fn empty_bill_is_zero_by_default_and_rejected_when_strict() {
    let bill = ItemCollection::new(project());

    for format in ExportFormat::ALL {
        let parsed = parse(format, &render(&bill, format, Detail::Verbose));
        assert!(parsed.items.is_empty(), "{format}");
        assert_eq!(parsed.total, Decimal::ZERO, "{format}");

        let mut sink = MemorySink::new();
        let err = export_with(&bill, &mut sink, &ExportOptions::new(format).with_strict(true))
            .unwrap_err();
        assert!(matches!(err, ExportError::EmptyCollection), "{format}");
        assert!(sink.as_bytes().is_empty());
    }

    let json: serde_json::Value =
        serde_json::from_str(&render(&bill, ExportFormat::Json, Detail::Compact)).unwrap();
    assert_eq!(json["summary"]["total_items"], 0);
}

#[test]
fn unsupported_format_is_rejected_before_rendering() {
    let bill = scenario();
    for token in ["pdf", "", "xlsm", "jsonl"] {
        let mut sink = MemorySink::new();
        let err = export(&bill, &mut sink, token, Detail::Verbose).unwrap_err();
        assert!(matches!(err, ExportError::UnsupportedFormat(_)), "{token:?}");
        assert!(sink.as_bytes().is_empty());
    }
}

#[test]
fn format_aliases_render_the_same_document() {
    let bill = scenario();
    let mut reference = MemorySink::new();
    export(&bill, &mut reference, "excel", Detail::Verbose).unwrap();

    for alias in ["XLSX", "xls", "Spreadsheet"] {
        let mut sink = MemorySink::new();
        export(&bill, &mut sink, alias, Detail::Verbose).unwrap();
        assert_eq!(sink.as_bytes(), reference.as_bytes(), "{alias}");
    }
}

#[test]
fn concurrent_exports_match_sequential_output() {
    let bill = mixed();
    let sequential: Vec<Vec<u8>> = ExportFormat::ALL
        .into_iter()
        .map(|format| render_to_vec(&bill, &ExportOptions::new(format)).unwrap())
        .collect();

    let concurrent: Vec<Vec<Vec<u8>>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let bill = &bill;
                scope.spawn(move || {
                    ExportFormat::ALL
                        .into_iter()
                        .map(|format| render_to_vec(bill, &ExportOptions::new(format)).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for run in concurrent {
        assert_eq!(run, sequential);
    }
}

/// Bills mixing ordinary prices with supplied amounts of up to 18 significant
/// digits, beyond what an `f64` carries exactly.
fn arbitrary_bill() -> impl Strategy<Value = ItemCollection> {
    let supplied = prop_oneof![
        Just(None),
        (0i64..1_000_000).prop_map(Some),
        (i64::MAX / 64..i64::MAX / 32).prop_map(Some),
    ];
    let item = (0usize..4, 0i64..1_000_000, 0i64..500_000, supplied);
    prop::collection::vec(item, 0..25).prop_map(|specs| {
        let sections = ["", "SUBSTRUCTURE", "FRAME", "FINISHES"];
        let items = specs.into_iter().enumerate().map(|(i, (section, qty, rate, supplied))| {
            let builder = LineItem::builder(format!("{}.{}", section + 1, i + 1), "Item", Unit::Area)
                .section(sections[section])
                .quantity(Decimal::new(qty, 3))
                .rate(Decimal::new(rate, 2));
            let builder = match supplied {
                Some(cents) => builder.amount(Decimal::new(cents, 2)),
                None => builder,
            };
            builder.build().unwrap()
        });
        ItemCollection::from_items(project(), items).unwrap()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_format_reads_back_the_same_items_and_total(bill in arbitrary_bill()) {
        let expected = expected(&bill);
        prop_assert_eq!(
            expected.total,
            bill.grouped_view().subtotals().into_iter().sum::<Decimal>()
        );
        for format in ExportFormat::ALL {
            let parsed = parse(format, &render(&bill, format, Detail::Compact));
            prop_assert_eq!(&parsed, &expected, "{}", format);
        }
    }
}
