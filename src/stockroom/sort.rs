//! Stable in-place ordering of records.
//!
//! The catalog is a flat list of at most a few thousand items, so a bubble sort
//! with early exit is enough. It only swaps neighbours that are strictly out of
//! order, which makes it stable and means an already ordered list is left
//! untouched after a single pass.

use crate::model::{Record, SortKey};
use std::cmp::Ordering;
use tracing::debug;

/// What a sort run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortStats {
    pub swaps: usize,
    pub passes: usize,
}

impl SortKey {
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        match self {
            SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortKey::ProductNumber => a
                .product_number
                .to_lowercase()
                .cmp(&b.product_number.to_lowercase()),
            SortKey::Quantity => a.quantity.cmp(&b.quantity),
            SortKey::Category => a.category_rank().cmp(&b.category_rank()),
        }
    }
}

pub fn order_by(records: &mut [Record], key: SortKey) -> SortStats {
    let mut stats = SortStats::default();
    let n = records.len();

    for i in 0..n {
        stats.passes += 1;
        let mut swapped = false;
        for j in 0..n - i - 1 {
            if key.compare(&records[j], &records[j + 1]) == Ordering::Greater {
                records.swap(j, j + 1);
                stats.swaps += 1;
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }

    debug!(key = %key, swaps = stats.swaps, passes = stats.passes, "sorted records");
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(pn: &str, name: &str, category: &str, quantity: u64) -> Record {
        Record::new(pn, name, category, quantity)
    }

    fn names(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn name_order_ignores_case() {
        let mut records = vec![rec("P1", "Zeta", "", 1), rec("P2", "alpha", "", 2)];
        order_by(&mut records, SortKey::Name);
        assert_eq!(names(&records), vec!["alpha", "Zeta"]);
        assert_eq!(records[0].quantity, 2);
    }

    #[test]
    fn quantity_order_is_numeric() {
        let mut records = vec![
            rec("P1", "a", "", 10),
            rec("P2", "b", "", 9),
            rec("P3", "c", "", 100),
        ];
        order_by(&mut records, SortKey::Quantity);
        let quantities: Vec<u64> = records.iter().map(|r| r.quantity).collect();
        assert_eq!(quantities, vec![9, 10, 100]);
    }

    #[test]
    fn product_number_order_ignores_case() {
        let mut records = vec![rec("b-2", "x", "", 1), rec("A-9", "y", "", 1)];
        order_by(&mut records, SortKey::ProductNumber);
        assert_eq!(records[0].product_number, "A-9");
    }

    #[test]
    fn category_order_follows_known_list_and_keeps_unknowns_in_place() {
        let mut records = vec![
            rec("P1", "one", "Compounds", 1),
            rec("P2", "two", "Pads", 1),
            rec("P3", "three", "", 1),
            rec("P4", "four", "Coating & Wax", 1),
            rec("P5", "five", "Misc", 1),
            rec("P6", "six", "Maintenance", 1),
        ];
        order_by(&mut records, SortKey::Category);
        assert_eq!(
            names(&records),
            vec!["four", "six", "two", "one", "three", "five"]
        );
    }

    #[test]
    fn equal_keys_keep_their_relative_order() {
        let mut records = vec![
            rec("P1", "b", "", 1),
            rec("P2", "a", "", 1),
            rec("P3", "B", "", 0),
            rec("P4", "A", "", 1),
        ];
        order_by(&mut records, SortKey::Name);
        let pns: Vec<&str> = records.iter().map(|r| r.product_number.as_str()).collect();
        assert_eq!(pns, vec!["P2", "P4", "P1", "P3"]);
    }

    #[test]
    fn sorted_input_needs_no_swaps() {
        for key in SortKey::ALL {
            let mut records = vec![
                rec("P3", "c", "Pads", 3),
                rec("P1", "a", "Coating & Wax", 1),
                rec("P2", "b", "Other", 2),
            ];
            order_by(&mut records, key);
            let before = records.clone();

            let stats = order_by(&mut records, key);
            assert_eq!(stats.swaps, 0, "key {}", key);
            assert_eq!(stats.passes, 1);
            assert_eq!(records, before);
        }
    }

    #[test]
    fn result_is_non_decreasing_for_every_key() {
        let base = vec![
            rec("q-7", "Polish", "Accessories", 4),
            rec("A1", "wax", "Pads", 12),
            rec("z", "Cloth", "", 0),
            rec("m3", "buffer", "Maintenance", 4),
            rec("B2", "Applicator", "Coating & Wax", 7),
        ];
        for key in SortKey::ALL {
            let mut records = base.clone();
            order_by(&mut records, key);
            for pair in records.windows(2) {
                assert_ne!(key.compare(&pair[0], &pair[1]), Ordering::Greater);
            }
        }
    }

    #[test]
    fn empty_and_single_inputs_are_fine() {
        let mut empty: Vec<Record> = Vec::new();
        assert_eq!(order_by(&mut empty, SortKey::Name).swaps, 0);
        let mut one = vec![rec("P1", "a", "", 1)];
        assert_eq!(order_by(&mut one, SortKey::Quantity).swaps, 0);
    }
}
