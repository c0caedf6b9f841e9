//! Property tests for the alignment pipeline.

use std::collections::BTreeSet;

use clustalign_core::{
    adjusted_rand_index, build_contingency, optimal_cluster_to_label_map, purity,
};
use proptest::{collection::vec, prelude::*};
use test_strategy::proptest;

type Pairs = Vec<(u8, u8)>;

fn assignment() -> impl Strategy<Value = Pairs> {
    vec((0_u8..4, 0_u8..5), 1..40)
}

fn shuffled_assignment() -> impl Strategy<Value = (Pairs, Pairs)> {
    assignment().prop_flat_map(|pairs| (Just(pairs.clone()), Just(pairs).prop_shuffle()))
}

fn split(pairs: &[(u8, u8)]) -> (Vec<u8>, Vec<u8>) {
    pairs.iter().copied().unzip()
}

#[proptest]
fn contingency_counts_every_item(#[strategy(assignment())] pairs: Pairs) {
    let (labels, clusters) = split(&pairs);
    let table = build_contingency(&labels, &clusters).expect("inputs are aligned");
    prop_assert_eq!(table.total(), pairs.len());
    prop_assert_eq!(table.rows().iter().flatten().sum::<usize>(), pairs.len());
    for (label, row_sum) in table.labels().iter().zip(table.row_sums()) {
        let expected = labels.iter().filter(|&candidate| candidate == label).count();
        prop_assert_eq!(row_sum, expected);
    }
}

#[proptest]
fn purity_is_a_fraction(#[strategy(assignment())] pairs: Pairs) {
    let (labels, clusters) = split(&pairs);
    let table = build_contingency(&labels, &clusters).expect("inputs are aligned");
    let value = purity(&table);
    prop_assert!((0.0..=1.0).contains(&value), "purity={value}");
}

#[proptest]
fn purity_is_one_for_label_pure_clusters(#[strategy(assignment())] pairs: Pairs) {
    // Splitting each label over several clusters keeps every cluster pure.
    let labels: Vec<u8> = pairs.iter().map(|&(label, _)| label).collect();
    let clusters: Vec<u16> = pairs
        .iter()
        .map(|&(label, sub)| u16::from(label) * 8 + u16::from(sub))
        .collect();
    let table = build_contingency(&labels, &clusters).expect("inputs are aligned");
    prop_assert!((purity(&table) - 1.0).abs() < 1e-12);
}

#[proptest]
fn results_ignore_item_order(#[strategy(shuffled_assignment())] input: (Pairs, Pairs)) {
    let (original, shuffled) = input;
    let (labels, clusters) = split(&original);
    let (shuffled_labels, shuffled_clusters) = split(&shuffled);

    let table = build_contingency(&labels, &clusters).expect("inputs are aligned");
    let shuffled_table =
        build_contingency(&shuffled_labels, &shuffled_clusters).expect("inputs are aligned");
    prop_assert_eq!(&table, &shuffled_table);
    prop_assert_eq!(
        optimal_cluster_to_label_map(&table),
        optimal_cluster_to_label_map(&shuffled_table)
    );
}

#[proptest]
fn order_preserving_relabel_keeps_matched_pairs(#[strategy(assignment())] pairs: Pairs) {
    let (labels, clusters) = split(&pairs);
    let renamed: Vec<String> = clusters.iter().map(|cluster| format!("c{cluster:03}")).collect();

    let table = build_contingency(&labels, &clusters).expect("inputs are aligned");
    let renamed_table = build_contingency(&labels, &renamed).expect("inputs are aligned");
    prop_assert!((purity(&table) - purity(&renamed_table)).abs() < 1e-12);

    let matched: Vec<(u8, String)> = optimal_cluster_to_label_map(&table)
        .pairs()
        .iter()
        .map(|pair| (pair.label, format!("c{:03}", pair.cluster)))
        .collect();
    let renamed_matched: Vec<(u8, String)> = optimal_cluster_to_label_map(&renamed_table)
        .pairs()
        .iter()
        .map(|pair| (pair.label, pair.cluster.clone()))
        .collect();
    prop_assert_eq!(matched, renamed_matched);
}

#[proptest]
fn any_relabel_keeps_scores(#[strategy(assignment())] pairs: Pairs) {
    let (labels, clusters) = split(&pairs);
    // Reversing the ids changes their order, so only tie-free quantities
    // are compared.
    let reversed: Vec<u8> = clusters.iter().map(|&cluster| u8::MAX - cluster).collect();

    let table = build_contingency(&labels, &clusters).expect("inputs are aligned");
    let reversed_table = build_contingency(&labels, &reversed).expect("inputs are aligned");
    prop_assert!((purity(&table) - purity(&reversed_table)).abs() < 1e-12);
    prop_assert_eq!(
        optimal_cluster_to_label_map(&table).matched_weight(),
        optimal_cluster_to_label_map(&reversed_table).matched_weight()
    );

    let ari = adjusted_rand_index(&labels, &clusters).expect("inputs are aligned");
    let reversed_ari = adjusted_rand_index(&labels, &reversed).expect("inputs are aligned");
    prop_assert!((ari - reversed_ari).abs() < 1e-9);
}

#[proptest]
fn mapping_is_injective_and_complete(#[strategy(assignment())] pairs: Pairs) {
    let (labels, clusters) = split(&pairs);
    let table = build_contingency(&labels, &clusters).expect("inputs are aligned");
    let mapping = optimal_cluster_to_label_map(&table);
    let (label_count, cluster_count) = table.shape();

    prop_assert_eq!(mapping.pairs().len(), label_count.min(cluster_count));
    let mapped_labels: BTreeSet<u8> = mapping.pairs().iter().map(|pair| pair.label).collect();
    prop_assert_eq!(mapped_labels.len(), mapping.pairs().len());
    prop_assert_eq!(
        mapping.pairs().len() + mapping.unmapped_clusters().len(),
        cluster_count
    );
    prop_assert_eq!(
        mapping.pairs().len() + mapping.unmapped_labels().len(),
        label_count
    );
    prop_assert!(mapping.matched_weight() <= table.total());
}
