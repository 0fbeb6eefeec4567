//! Draft vs submitted classification.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::models::{ChangeRecord, ChangeType, OrderRow};

/// Composite identity correlating one logical order line across tables.
///
/// Built from the lowercase-trimmed notes and name plus the normalized NDC.
/// Duplicate keys within a table collapse last-write-wins when used as a
/// lookup; sibling rows still surface individually in the classified subsets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchKey(String);

impl MatchKey {
    /// Build the key for an order row.
    pub fn of(row: &OrderRow) -> Self {
        MatchKey(format!(
            "{}|{}|{}",
            row.notes.trim().to_lowercase(),
            row.name.trim().to_lowercase(),
            row.ndc.trim()
        ))
    }

    /// Returns the raw composite string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Classified change subsets, in presentation order.
#[derive(Debug, Clone, Default)]
pub struct Classified {
    pub quantity_changed: Vec<ChangeRecord>,
    pub added: Vec<ChangeRecord>,
    pub removed: Vec<ChangeRecord>,
}

impl Classified {
    /// Total classified rows across the three subsets.
    pub fn len(&self) -> usize {
        self.quantity_changed.len() + self.added.len() + self.removed.len()
    }

    /// Whether nothing changed between the tables.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Concatenate in presentation order: Quantity Changed, Added, Removed.
    pub fn into_records(self) -> Vec<ChangeRecord> {
        let mut records = self.quantity_changed;
        records.extend(self.added);
        records.extend(self.removed);
        records
    }
}

/// Classify rows between the draft and submitted order tables.
///
/// Key→quantity lookups are built last-write-wins. A key present in both
/// tables with unequal quantity (exact `f64` inequality, no tolerance) is
/// Quantity Changed; present only in submitted is Added; present only in
/// draft is Removed. Subset rows are selected from the source tables by key
/// membership, so the draft row supplies every non-quantity column of a
/// Quantity Changed record, with the submitted-side quantity attached.
pub fn classify(draft: &[OrderRow], submitted: &[OrderRow]) -> Classified {
    let draft_qty: HashMap<MatchKey, f64> = draft
        .iter()
        .map(|row| (MatchKey::of(row), row.quantity))
        .collect();
    let submitted_qty: HashMap<MatchKey, f64> = submitted
        .iter()
        .map(|row| (MatchKey::of(row), row.quantity))
        .collect();

    let mut classified = Classified::default();

    for row in draft {
        let key = MatchKey::of(row);
        match submitted_qty.get(&key) {
            Some(&submitted_quantity) if draft_qty[&key] != submitted_quantity => {
                classified.quantity_changed.push(ChangeRecord {
                    change_type: ChangeType::QuantityChanged,
                    order: row.clone(),
                    submitted_quantity: Some(submitted_quantity),
                    forecast: None,
                });
            }
            Some(_) => {}
            None => classified.removed.push(ChangeRecord {
                change_type: ChangeType::Removed,
                order: row.clone(),
                submitted_quantity: None,
                forecast: None,
            }),
        }
    }

    for row in submitted {
        if !draft_qty.contains_key(&MatchKey::of(row)) {
            classified.added.push(ChangeRecord {
                change_type: ChangeType::Added,
                order: row.clone(),
                submitted_quantity: None,
                forecast: None,
            });
        }
    }

    debug!(
        quantity_changed = classified.quantity_changed.len(),
        added = classified.added.len(),
        removed = classified.removed.len(),
        "classified order changes"
    );

    classified
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashSet};

    use super::*;

    fn order_row(notes: &str, name: &str, ndc: &str, quantity: f64) -> OrderRow {
        OrderRow {
            notes: notes.into(),
            name: name.into(),
            ndc: ndc.into(),
            quantity,
            po_reference: None,
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn test_match_key_composite() {
        let row = order_row(" Store A ", "DrugX", "00000000001", 5.0);
        assert_eq!(MatchKey::of(&row).as_str(), "store a|drugx|00000000001");
    }

    #[test]
    fn test_quantity_change_detected() {
        let draft = vec![order_row("storeA", "drugx", "00000000001", 5.0)];
        let submitted = vec![order_row("storeA", "drugx", "00000000001", 7.0)];

        let classified = classify(&draft, &submitted);

        assert_eq!(classified.quantity_changed.len(), 1);
        assert!(classified.added.is_empty());
        assert!(classified.removed.is_empty());

        let record = &classified.quantity_changed[0];
        assert_eq!(record.order.quantity, 5.0);
        assert_eq!(record.submitted_quantity, Some(7.0));
    }

    #[test]
    fn test_equal_quantity_is_no_change() {
        let draft = vec![order_row("storeA", "drugx", "00000000001", 5.0)];
        let submitted = vec![order_row("storeA", "drugx", "00000000001", 5.0)];

        let classified = classify(&draft, &submitted);
        assert!(classified.is_empty());
    }

    #[test]
    fn test_added_and_removed() {
        let draft = vec![order_row("storeA", "old line", "00000000001", 2.0)];
        let submitted = vec![order_row("storeA", "new line", "00000000002", 3.0)];

        let classified = classify(&draft, &submitted);

        assert_eq!(classified.added.len(), 1);
        assert_eq!(classified.removed.len(), 1);
        assert_eq!(classified.added[0].order.name, "new line");
        assert_eq!(classified.removed[0].order.name, "old line");
    }

    #[test]
    fn test_near_miss_quantities_still_differ() {
        // Exact inequality, no tolerance: a float hair apart counts as changed.
        let draft = vec![order_row("storeA", "drugx", "00000000001", 5.0)];
        let submitted = vec![order_row("storeA", "drugx", "00000000001", 5.000001)];

        let classified = classify(&draft, &submitted);
        assert_eq!(classified.quantity_changed.len(), 1);
    }

    #[test]
    fn test_key_folds_case_and_whitespace() {
        let draft = vec![order_row(" StoreA ", "DrugX", "00000000001", 5.0)];
        let submitted = vec![order_row("storea", "drugx", "00000000001", 5.0)];

        let classified = classify(&draft, &submitted);
        assert!(classified.is_empty());
    }

    #[test]
    fn test_subsets_are_disjoint_by_key() {
        let draft = vec![
            order_row("storeA", "kept", "00000000001", 5.0),
            order_row("storeA", "changed", "00000000002", 5.0),
            order_row("storeA", "removed", "00000000003", 1.0),
        ];
        let submitted = vec![
            order_row("storeA", "kept", "00000000001", 5.0),
            order_row("storeA", "changed", "00000000002", 9.0),
            order_row("storeA", "added", "00000000004", 2.0),
        ];

        let classified = classify(&draft, &submitted);

        let mut seen: HashSet<String> = HashSet::new();
        for record in classified.into_records() {
            let key = MatchKey::of(&record.order).as_str().to_string();
            assert!(seen.insert(key), "key classified twice");
        }
    }

    #[test]
    fn test_duplicate_keys_last_write_wins() {
        // Two draft rows share a key; the second quantity is what the lookup
        // keeps, so both rows classify against it.
        let draft = vec![
            order_row("storeA", "dup", "00000000001", 5.0),
            order_row("storeA", "dup", "00000000001", 7.0),
        ];
        let submitted = vec![order_row("storeA", "dup", "00000000001", 7.0)];

        let classified = classify(&draft, &submitted);

        // 7 == 7, so neither sibling row registers as changed.
        assert!(classified.is_empty());
    }

    #[test]
    fn test_duplicate_key_siblings_both_surface() {
        let draft = vec![
            order_row("storeA", "dup", "00000000001", 5.0),
            order_row("storeA", "dup", "00000000001", 7.0),
        ];
        let submitted = vec![order_row("storeA", "dup", "00000000001", 9.0)];

        let classified = classify(&draft, &submitted);

        // Both sibling rows carry the key, so both surface as changed.
        assert_eq!(classified.quantity_changed.len(), 2);
        assert_eq!(classified.quantity_changed[0].submitted_quantity, Some(9.0));
        assert_eq!(classified.quantity_changed[1].submitted_quantity, Some(9.0));
    }
}
