use std::collections::HashSet;

use pretty_assertions::assert_eq;
use probe_core::{reconcile, Mapping, MatchRecord};

fn present(ids: &[u64]) -> HashSet<u64> {
    ids.iter().copied().collect()
}

#[test]
fn labels_only_the_present_identifier() {
    let mapping = Mapping::from_pairs([("2", "Smith")]);

    let result = reconcile(&present(&[2]), &mapping);

    assert_eq!(
        result.records,
        vec![MatchRecord {
            identifier: 2,
            label: Some("Smith".to_string()),
        }]
    );
    assert_eq!(result.missing_labels, 0);
}

#[test]
fn empty_mapping_marks_every_record_missing() {
    let result = reconcile(&present(&[20, 10]), &Mapping::new());

    assert_eq!(
        result.records,
        vec![
            MatchRecord {
                identifier: 10,
                label: None,
            },
            MatchRecord {
                identifier: 20,
                label: None,
            },
        ]
    );
    assert_eq!(result.missing_labels, 2);
    assert_eq!(result.missing().count(), 2);
}

#[test]
fn output_is_sorted_and_stable_across_runs() {
    let mapping = Mapping::from_pairs([("5", "Five"), ("300", "Three hundred"), ("7", "Seven")]);
    let ids = present(&[300, 7, 42, 5, 1_000_000]);

    let first = reconcile(&ids, &mapping);
    for _ in 0..10 {
        assert_eq!(reconcile(&ids, &mapping), first);
    }

    let order: Vec<u64> = first.records.iter().map(|r| r.identifier).collect();
    assert_eq!(order, vec![5, 7, 42, 300, 1_000_000]);
    assert_eq!(first.missing_labels, 2);
    assert_eq!(first.matched(), 5);
}

#[test]
fn empty_present_set_yields_empty_reconciliation() {
    let mapping = Mapping::from_pairs([("1", "One")]);
    let result = reconcile(&HashSet::new(), &mapping);
    assert!(result.is_empty());
    assert_eq!(result.missing_labels, 0);
}

#[test]
fn mapping_keys_and_labels_are_trimmed() {
    let mapping = Mapping::from_pairs([(" 12 ", "  Ivanov\t"), ("", "ignored"), ("12", "Petrov")]);

    assert_eq!(mapping.len(), 1);
    assert_eq!(mapping.label_for(12), Some("Petrov"));
    assert_eq!(mapping.preview(5), vec![("12", "Petrov")]);
}

#[test]
fn preview_follows_source_order() {
    let mapping = Mapping::from_pairs([("3", "C"), ("1", "A"), ("2", "B")]);
    assert_eq!(mapping.preview(2), vec![("3", "C"), ("1", "A")]);
}
