//! Property-based tests - pragmatic coverage of the core guarantees:
//! round-trip fidelity, the level invariant, the root invariant, and the
//! escape codec identity, across generated inputs.

use proptest::prelude::*;
use texttree::reader::{decode_escapes, escape_universal};
use texttree::{parse_ini, parse_jsonex, to_jsonex, GenericKind, NodeKind, TextTree};

/// Lowercase identifiers: unique as map keys implies unique under the
/// tree's case-insensitive lookup too.
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}"
}

fn check_invariants(tree: &TextTree) {
    assert!(tree.node_count() >= 1);
    assert_eq!(tree.node(0).unwrap().kind, NodeKind::Root);
    assert_eq!(tree.node(0).unwrap().level, 0);
    for pair in tree.nodes().windows(2) {
        assert!(pair[1].level <= pair[0].level + 1);
    }
}

proptest! {
    // Any input at all: the parsers never panic and always uphold the
    // root and level invariants, however malformed the text.
    #[test]
    fn prop_jsonex_never_panics(input in ".*") {
        let (tree, _) = parse_jsonex(&input);
        check_invariants(&tree);
    }

    #[test]
    fn prop_ini_never_panics(input in ".*") {
        let (tree, _) = parse_ini(&input);
        check_invariants(&tree);
    }

    // Escape codec: encoding then decoding is the identity for any
    // string, including astral-plane characters.
    #[test]
    fn prop_escape_round_trip(s in ".*") {
        prop_assert_eq!(decode_escapes(&escape_universal(&s)), s);
    }

    // Key/value round trip: build a document programmatically, write it,
    // parse it back, and look every value up again.
    #[test]
    fn prop_key_values_survive_round_trip(
        entries in prop::collection::btree_map(key_strategy(), ".*", 0..8)
    ) {
        let mut tree = TextTree::new();
        for (key, value) in &entries {
            tree.set_key_value(0, key, value).unwrap();
        }
        let text = to_jsonex(&tree);
        let (again, errors) = parse_jsonex(&text);
        prop_assert!(errors.is_empty(), "reparse errors: {errors:?}\nfor: {text}");
        for (key, value) in &entries {
            prop_assert_eq!(again.get_key_value(0, key), Some(value.as_str()));
        }
    }

    // Nested round trip: two levels of generated objects keep their
    // shape (generic category, level, decoded text per node).
    #[test]
    fn prop_nested_shape_survives_round_trip(
        sections in prop::collection::btree_map(
            key_strategy(),
            prop::collection::btree_map(key_strategy(), ".*", 0..5),
            0..5,
        )
    ) {
        let mut tree = TextTree::new();
        for (section, entries) in &sections {
            let node = tree.append_child(0, NodeKind::Object, section).unwrap();
            for (key, value) in entries {
                tree.set_key_value(node, key, value).unwrap();
            }
        }
        let (again, errors) = parse_jsonex(&to_jsonex(&tree));
        prop_assert!(errors.is_empty());
        prop_assert_eq!(tree.node_count(), again.node_count());
        for (index, (a, b)) in tree.nodes().iter().zip(again.nodes()).enumerate() {
            prop_assert_eq!(a.generic(), b.generic(), "node {}", index);
            prop_assert_eq!(a.level, b.level, "node {}", index);
            prop_assert_eq!(tree.node_text(index), again.node_text(index), "node {}", index);
        }
    }

    // INI documents built from generated sections parse back with every
    // key reachable.
    #[test]
    fn prop_ini_key_values_parse(
        sections in prop::collection::btree_map(
            key_strategy(),
            prop::collection::btree_map(key_strategy(), "[a-z0-9 ]{0,12}", 1..5),
            1..4,
        )
    ) {
        let mut text = String::new();
        for (section, entries) in &sections {
            text.push_str(&format!("[{section}]\n"));
            for (key, value) in entries {
                text.push_str(&format!("{key} = {value}\n"));
            }
        }
        let (tree, errors) = parse_ini(&text);
        prop_assert!(errors.is_empty());
        check_invariants(&tree);
        for (section, entries) in &sections {
            let node = tree.find_key(0, section).unwrap();
            for (key, value) in entries {
                prop_assert_eq!(
                    tree.get_key_value(node, key),
                    Some(value.trim_end()),
                    "[{}] {}", section, key
                );
            }
        }
    }

    // Writing any parsed tree yields text that parses with no errors.
    #[test]
    fn prop_written_text_reparses_cleanly(input in "[a-z0-9:,{}\\[\\]() ]{0,40}") {
        let (tree, _) = parse_jsonex(&input);
        let (again, errors) = parse_jsonex(&to_jsonex(&tree));
        prop_assert!(errors.is_empty());
        check_invariants(&again);
        // Category counts survive even when the source was malformed.
        let count = |t: &TextTree, g: GenericKind| {
            t.nodes().iter().filter(|n| n.generic() == g).count()
        };
        prop_assert_eq!(count(&tree, GenericKind::Value), count(&again, GenericKind::Value));
        prop_assert_eq!(count(&tree, GenericKind::Key), count(&again, GenericKind::Key));
    }
}
