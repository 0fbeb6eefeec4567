//! Golden tests for NDC normalization and change classification.
//!
//! These tests verify the matching pipeline against known cases.

use std::collections::BTreeMap;

use order_recon_core::models::OrderRow;
use order_recon_core::recon::{classify, normalize_ndc, MatchKey};
use order_recon_core::ChangeType;

/// Known normalization case.
struct GoldenCase {
    id: &'static str,
    input: &'static str,
    expected: &'static str,
}

fn get_golden_cases() -> Vec<GoldenCase> {
    vec![
        GoldenCase {
            id: "short-code-pads",
            input: "123",
            expected: "00000000123",
        },
        GoldenCase {
            id: "hyphenated-ndc",
            input: "0069-0242-10",
            expected: "00069024210",
        },
        GoldenCase {
            id: "spaces-and-hyphens",
            input: "1-2 3",
            expected: "00000000123",
        },
        GoldenCase {
            id: "non-breaking-space",
            input: "123\u{00A0}",
            expected: "00000000123",
        },
        GoldenCase {
            id: "exactly-eleven",
            input: "12345678901",
            expected: "12345678901",
        },
        GoldenCase {
            id: "overlong-passes-through",
            input: "123456789012",
            expected: "123456789012",
        },
        GoldenCase {
            id: "empty-stays-empty",
            input: "",
            expected: "",
        },
        GoldenCase {
            id: "no-digits-collapses-to-zeros",
            input: "n/a",
            expected: "00000000000",
        },
    ]
}

#[test]
fn golden_ndc_normalization() {
    for case in get_golden_cases() {
        assert_eq!(
            normalize_ndc(case.input),
            case.expected,
            "case {} failed",
            case.id
        );
    }
}

#[test]
fn golden_ndc_normalization_is_idempotent() {
    for case in get_golden_cases() {
        let once = normalize_ndc(case.input);
        assert_eq!(normalize_ndc(&once), once, "case {} not idempotent", case.id);
    }
}

fn order_row(notes: &str, name: &str, ndc: &str, quantity: f64) -> OrderRow {
    OrderRow {
        notes: notes.into(),
        name: name.into(),
        ndc: normalize_ndc(ndc),
        quantity,
        po_reference: None,
        extra: BTreeMap::new(),
    }
}

#[test]
fn golden_match_key() {
    let row = order_row("StoreA", "DrugX", "1", 5.0);
    assert_eq!(MatchKey::of(&row).as_str(), "storea|drugx|00000000001");
}

#[test]
fn golden_quantity_change_scenario() {
    // Draft has storeA/drugx qty 5; submitted has the same key qty 7.
    let draft = vec![order_row("storeA", "drugx", "1", 5.0)];
    let submitted = vec![order_row("storeA", "drugx", "1", 7.0)];

    let records = classify(&draft, &submitted).into_records();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].change_type, ChangeType::QuantityChanged);
    assert_eq!(records[0].order.quantity, 5.0);
    assert_eq!(records[0].submitted_quantity, Some(7.0));
}

#[test]
fn golden_added_scenario() {
    let draft: Vec<OrderRow> = Vec::new();
    let submitted = vec![order_row("storeA", "drugx", "1", 5.0)];

    let records = classify(&draft, &submitted).into_records();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].change_type, ChangeType::Added);
    assert_eq!(records[0].submitted_quantity, None);
}

#[test]
fn golden_presentation_order() {
    let draft = vec![
        order_row("storeA", "changed", "1", 5.0),
        order_row("storeA", "removed", "2", 1.0),
    ];
    let submitted = vec![
        order_row("storeA", "added", "3", 2.0),
        order_row("storeA", "changed", "1", 9.0),
    ];

    let records = classify(&draft, &submitted).into_records();
    let types: Vec<ChangeType> = records.iter().map(|r| r.change_type).collect();

    assert_eq!(
        types,
        vec![
            ChangeType::QuantityChanged,
            ChangeType::Added,
            ChangeType::Removed
        ]
    );
}
