//! Key alignment between a reference and a candidate table.
//!
//! Keys are compared as strings. A nested entry `outer → {inner → value}`
//! becomes one key per inner entry, formatted `"(outer, inner)"`; a flat
//! entry keeps its key. Both sides go through the same flattening, so an
//! engine emitting `"(1, 2)": 0.5` lines up with one emitting
//! `"1": {"2": 0.5}`.
//!
//! Key lists are ordered by length, then lexicographically, which puts
//! `"2"` before `"10"` without parsing numbers.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use netrics_core::{Entry, MetricTable};

/// Flat string key → value view of one table.
pub type FlatTable = BTreeMap<String, f64>;

/// Order keys by length, then lexicographically.
#[must_use]
pub fn key_order(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Flatten nested entries into composite `"(outer, inner)"` keys.
#[must_use]
pub fn flatten(table: &MetricTable) -> FlatTable {
    let mut flat = FlatTable::new();
    for (key, entry) in table {
        match entry {
            Entry::Value(v) => {
                flat.insert(key.clone(), *v);
            }
            Entry::Nested(inner) => {
                for (inner_key, v) in inner {
                    flat.insert(format!("({key}, {inner_key})"), *v);
                }
            }
        }
    }
    flat
}

/// Both sides of one metric, flattened and split by key membership.
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    pub reference: FlatTable,
    pub candidate: FlatTable,
    /// Keys on both sides, in [`key_order`].
    pub common: Vec<String>,
    /// Reference keys the candidate lacks, in [`key_order`].
    pub missing_in_compare: Vec<String>,
    /// Candidate keys the reference lacks, in [`key_order`].
    pub missing_in_reference: Vec<String>,
}

impl Alignment {
    #[must_use]
    pub fn new(reference: &MetricTable, candidate: &MetricTable) -> Self {
        let reference = flatten(reference);
        let candidate = flatten(candidate);

        let mut common = Vec::new();
        let mut missing_in_compare = Vec::new();
        for key in reference.keys() {
            if candidate.contains_key(key) {
                common.push(key.clone());
            } else {
                missing_in_compare.push(key.clone());
            }
        }
        let mut missing_in_reference: Vec<String> = candidate
            .keys()
            .filter(|k| !reference.contains_key(*k))
            .cloned()
            .collect();

        for keys in [&mut common, &mut missing_in_compare, &mut missing_in_reference] {
            keys.sort_by(|a, b| key_order(a, b));
        }

        Self {
            reference,
            candidate,
            common,
            missing_in_compare,
            missing_in_reference,
        }
    }

    /// `(key, reference, candidate)` for every common key, in order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, f64, f64)> + '_ {
        self.common.iter().filter_map(|k| {
            let r = self.reference.get(k)?;
            let c = self.candidate.get(k)?;
            Some((k.as_str(), *r, *c))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, f64)]) -> MetricTable {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), Entry::Value(*v)))
            .collect()
    }

    #[test]
    fn key_order_is_length_then_lexicographic() {
        let mut keys = vec!["10", "9", "b", "100", "a", "(1, 2)"];
        keys.sort_by(|a, b| key_order(a, b));
        assert_eq!(keys, vec!["9", "a", "b", "10", "100", "(1, 2)"]);
    }

    #[test]
    fn nested_entries_become_composite_keys() {
        let mut t = MetricTable::new();
        t.insert(
            "1".to_string(),
            Entry::Nested(BTreeMap::from([("2".to_string(), 0.5), ("3".to_string(), 1.0)])),
        );
        t.insert("(4, 5)".to_string(), Entry::Value(2.0));
        let flat = flatten(&t);
        assert_eq!(flat.len(), 3);
        assert_eq!(flat.get("(1, 2)"), Some(&0.5));
        assert_eq!(flat.get("(4, 5)"), Some(&2.0));
    }

    #[test]
    fn flat_and_nested_sides_align() {
        let reference = table(&[("(1, 2)", 0.25)]);
        let mut candidate = MetricTable::new();
        candidate.insert(
            "1".to_string(),
            Entry::Nested(BTreeMap::from([("2".to_string(), 0.5)])),
        );
        let a = Alignment::new(&reference, &candidate);
        assert_eq!(a.common, vec!["(1, 2)".to_string()]);
        assert_eq!(a.pairs().collect::<Vec<_>>(), vec![("(1, 2)", 0.25, 0.5)]);
    }

    #[test]
    fn missing_keys_are_split_and_sorted() {
        let reference = table(&[("1", 0.0), ("10", 0.0), ("2", 0.0), ("3", 0.0)]);
        let candidate = table(&[("3", 0.0), ("11", 0.0), ("4", 0.0)]);
        let a = Alignment::new(&reference, &candidate);
        assert_eq!(a.common, vec!["3"]);
        assert_eq!(a.missing_in_compare, vec!["1", "2", "10"]);
        assert_eq!(a.missing_in_reference, vec!["4", "11"]);
    }
}
