use prefix_tree::{
    DecodeErrorKind, PrefixTree, PrefixTreeError, ProstCodec, UuidCodec, Utf8Codec, WireConfig,
};
use uuid::Uuid;

fn card_names() -> Vec<(&'static str, Uuid)> {
    vec![
        ("Lightning Bolt", Uuid::from_u128(0x1c4f_0000_0000_4000_8000_0000_0000_0001)),
        ("Lightning Helix", Uuid::from_u128(0x1c4f_0000_0000_4000_8000_0000_0000_0002)),
        ("Llanowar Elves", Uuid::from_u128(0x1c4f_0000_0000_4000_8000_0000_0000_0003)),
        ("Lightning Bolt", Uuid::from_u128(0x1c4f_0000_0000_4000_8000_0000_0000_0004)),
        ("Counterspell", Uuid::from_u128(0x1c4f_0000_0000_4000_8000_0000_0000_0005)),
    ]
}

#[test]
fn card_name_lookup_survives_the_wire() {
    let tree: PrefixTree<Uuid> = card_names().into_iter().collect();
    let bytes = tree.serialize(&UuidCodec).unwrap();
    let decoded = PrefixTree::<Uuid>::deserialize(&bytes, &UuidCodec).unwrap();
    assert_eq!(decoded, tree);

    let names: Vec<String> = decoded
        .search("Li")
        .into_iter()
        .map(|m| m.key_str().unwrap().to_owned())
        .collect();
    assert_eq!(names, vec!["Lightning Bolt", "Lightning Bolt", "Lightning Helix"]);

    let reprints: Vec<u128> = decoded
        .search("Lightning Bolt")
        .into_iter()
        .map(|m| m.value.as_u128() & 0xff)
        .collect();
    assert_eq!(reprints, vec![1, 4]);
    assert!(decoded.search("Lotus").is_empty());
}

#[test]
fn greeting_scenario() {
    let mut tree = PrefixTree::new();
    tree.add("hello", String::from("a"));
    tree.add("helvo", String::from("b"));
    tree.add("helloooo", String::from("c"));
    tree.add("goodbye", String::from("d"));

    let hits = |prefix: &str| -> Vec<(String, String)> {
        tree.search(prefix)
            .into_iter()
            .map(|m| (m.key_str().unwrap().to_owned(), m.value.clone()))
            .collect()
    };
    let pair = |k: &str, v: &str| (k.to_owned(), v.to_owned());

    assert_eq!(
        hits("hel"),
        vec![pair("helloooo", "c"), pair("hello", "a"), pair("helvo", "b")]
    );
    assert_eq!(hits("hello"), vec![pair("helloooo", "c"), pair("hello", "a")]);
    assert!(hits("xyz").is_empty());

    for config in [WireConfig::default(), WireConfig::uncompressed()] {
        let bytes = tree.serialize_with(&Utf8Codec, &config).unwrap();
        let decoded = PrefixTree::<String>::deserialize(&bytes, &Utf8Codec).unwrap();
        assert_eq!(decoded, tree);
    }
}

#[derive(Clone, PartialEq, prost::Message)]
struct Printing {
    #[prost(string, tag = "1")]
    set: String,
    #[prost(uint32, tag = "2")]
    collector_number: u32,
}

#[test]
fn protobuf_values() {
    let mut tree = PrefixTree::new();
    tree.add(
        "Dark Ritual",
        Printing {
            set: "lea".into(),
            collector_number: 98,
        },
    );
    tree.add(
        "Dark Confidant",
        Printing {
            set: "rav".into(),
            collector_number: 81,
        },
    );

    let codec = ProstCodec::<Printing>::new();
    let bytes = tree.serialize(&codec).unwrap();
    let decoded = PrefixTree::<Printing>::deserialize(&bytes, &codec).unwrap();
    assert_eq!(decoded, tree);
    assert_eq!(decoded.search("Dark R")[0].value.collector_number, 98);
}

#[test]
fn oversized_values_are_refused() {
    let mut tree = PrefixTree::new();
    tree.add("Ancestral Recall", "x".repeat(300));
    let err = tree.serialize(&Utf8Codec).unwrap_err();
    assert!(matches!(err, PrefixTreeError::ValueTooLarge { len: 300, .. }));
    assert!(err.to_string().contains("Ancestral Recall"));
}

#[test]
fn broken_buffers_are_refused() {
    let tree: PrefixTree<Uuid> = card_names().into_iter().collect();
    let bytes = tree.serialize(&UuidCodec).unwrap();

    let err = PrefixTree::<Uuid>::deserialize(&bytes[..bytes.len() - 1], &UuidCodec).unwrap_err();
    assert!(matches!(
        err,
        PrefixTreeError::Decode {
            kind: DecodeErrorKind::Truncated,
            ..
        }
    ));
}
