use crate::config::WireConfig;
use crate::data::RawCodec;
use crate::tree::PrefixTree;

use itertools::Itertools;
use proptest::prelude::*;
use std::cmp::Ordering;

type Entry = (Vec<u8>, Vec<u8>);

fn key_strategy() -> impl Strategy<Value = Vec<u8>> + Clone {
    // A tiny alphabet so keys share prefixes; marker bytes included on purpose
    let byte = prop::sample::select(vec![0x00u8, 0x01, 0x02, b'a', b'b', 0xff]);
    prop::collection::vec(byte, 0..=8)
}

fn entries_strategy() -> impl Strategy<Value = Vec<Entry>> {
    let value = prop::collection::vec(any::<u8>(), 0..=4);
    prop::collection::vec((key_strategy(), value), 0..=64)
}

fn config_strategy() -> impl Strategy<Value = WireConfig> {
    prop_oneof![
        Just(WireConfig::default()),
        Just(WireConfig::uncompressed()),
        (1u8..=255).prop_map(|len| WireConfig::default().with_max_prefix_len(len)),
    ]
}

fn build(entries: &[Entry]) -> PrefixTree<Vec<u8>> {
    entries.iter().cloned().collect()
}

/// Position of the first entry that created the node for `prefix`
fn born(entries: &[Entry], prefix: &[u8]) -> Option<usize> {
    entries.iter().position(|(key, _)| key.starts_with(prefix))
}

/// Search order computed straight from insertion history
fn expected_order(entries: &[Entry], prefix: &[u8]) -> Vec<Entry> {
    let mut hits: Vec<(usize, &Entry)> = entries
        .iter()
        .enumerate()
        .filter(|(_, (key, _))| key.starts_with(prefix))
        .collect();
    hits.sort_by(|(ia, (a, _)), (ib, (b, _))| {
        let common = a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count();
        match (a.len() == common, b.len() == common) {
            (true, true) => ia.cmp(ib),
            // deeper keys on the same branch come first
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                born(entries, &a[..=common]).cmp(&born(entries, &b[..=common]))
            }
        }
    });
    hits.into_iter().map(|(_, entry)| entry.clone()).collect()
}

fn collect(tree: &PrefixTree<Vec<u8>>, prefix: &[u8]) -> Vec<Entry> {
    tree.search(prefix)
        .into_iter()
        .map(|m| (m.key, m.value.clone()))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_search_returns_every_match(entries in entries_strategy(), prefix in key_strategy()) {
        let tree = build(&entries);
        prop_assert_eq!(tree.len(), entries.len());

        let got: Vec<Entry> = collect(&tree, &prefix).into_iter().sorted().collect();
        let expected: Vec<Entry> = entries
            .iter()
            .filter(|(key, _)| key.starts_with(&prefix))
            .cloned()
            .sorted()
            .collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_search_order(entries in entries_strategy(), prefix in key_strategy()) {
        let tree = build(&entries);
        let got = collect(&tree, &prefix);
        prop_assert_eq!(&got, &expected_order(&entries, &prefix));
        prop_assert_eq!(got, collect(&tree, &prefix));
    }

    #[test]
    fn prop_round_trip(entries in entries_strategy(), config in config_strategy()) {
        let tree = build(&entries);
        let bytes = tree.serialize_with(&RawCodec, &config).unwrap();
        let decoded = PrefixTree::<Vec<u8>>::deserialize(&bytes, &RawCodec).unwrap();
        prop_assert_eq!(&decoded, &tree);
        prop_assert_eq!(collect(&decoded, &[]), collect(&tree, &[]));

        // Any configuration is a valid encoding of the same tree
        let canonical = tree.serialize(&RawCodec).unwrap();
        let again = PrefixTree::<Vec<u8>>::deserialize(&canonical, &RawCodec).unwrap();
        prop_assert_eq!(again.serialize_with(&RawCodec, &config).unwrap(), bytes);
    }

    #[test]
    fn prop_strict_prefixes_fail(entries in entries_strategy(), cut in any::<prop::sample::Index>()) {
        let bytes = build(&entries).serialize(&RawCodec).unwrap();
        let end = cut.index(bytes.len());
        prop_assert!(PrefixTree::<Vec<u8>>::deserialize(&bytes[..end], &RawCodec).is_err());
    }

    #[test]
    fn prop_garbage_never_panics(input in prop::collection::vec(0u8..=4, 0..=64)) {
        let _ = PrefixTree::<Vec<u8>>::deserialize(&input, &RawCodec);
    }
}

#[test]
fn long_keys_round_trip_under_every_run_cap() {
    let mut tree = PrefixTree::new();
    tree.add(vec![b'x'; 1000], vec![1u8]);
    tree.add(vec![b'x'; 512], vec![2u8]);
    tree.add([vec![b'x'; 256], vec![b'y'; 300]].concat(), vec![3u8]);

    for len in [1u8, 2, 127, 254, 255] {
        let config = WireConfig::default().with_max_prefix_len(len);
        let bytes = tree.serialize_with(&RawCodec, &config).unwrap();
        let decoded = PrefixTree::<Vec<u8>>::deserialize(&bytes, &RawCodec).unwrap();
        assert_eq!(decoded, tree, "run cap {}", len);
    }
}
