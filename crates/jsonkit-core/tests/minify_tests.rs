/// Minifier: legend derivation, profitability filter, rewriting, and envelopes.
use std::collections::HashSet;

use jsonkit_core::minify::{derive_legend, is_profitable, LEGEND_ENTRY_COST};
use jsonkit_core::{minify, minify_with, unminify, KeyCensus, Legend, Value};
use serde_json::json;

fn value(json: serde_json::Value) -> Value {
    Value::from(json)
}

fn plain(value: &Value) -> serde_json::Value {
    serde_json::Value::from(value)
}

/// Document whose `testKeys` object uses `a..z` and `1..26` as real keys,
/// so derived identifiers must start at `a0`.
fn reserved_letters_fixture() -> serde_json::Value {
    let mut test_keys = serde_json::Map::new();
    for (i, c) in ('a'..='z').enumerate() {
        test_keys.insert(c.to_string(), json!(i + 1));
    }
    for (i, c) in ('a'..='z').enumerate() {
        test_keys.insert((i + 1).to_string(), json!(c.to_string()));
    }
    json!({
        "very-long-name": {
            "very-long-name": "very-long-name",
            "very-long-name-2": 2
        },
        "number": 1,
        "boolean": true,
        "null": null,
        "arr": [
            {"very-long-name": {"very-long-name": "very-long-name"}},
            {"very-long-name-2": true, "testKeys": test_keys}
        ],
        "normal": "string"
    })
}

// ============================================================================
// Profitability filter
// ============================================================================

#[test]
fn legend_entry_cost_is_two() {
    assert_eq!(LEGEND_ENTRY_COST, 2);
}

#[test]
fn single_occurrence_keys_are_never_profitable() {
    assert!(!is_profitable("an-extremely-long-key-name", 1, "a"));
    assert!(!is_profitable("x", 1, "a"));
}

#[test]
fn five_char_key_three_times_is_profitable() {
    // 5 * 2 = 10, not < 1 * 2
    assert!(is_profitable("abcde", 3, "a"));
}

#[test]
fn boundary_equal_savings_is_profitable() {
    // 1 * 2 = 2, not < 2
    assert!(is_profitable("k", 3, "a"));
    // 2 * 1 = 2, not < 2
    assert!(is_profitable("kk", 2, "a"));
}

#[test]
fn boundary_below_threshold_is_not_profitable() {
    // 1 * 1 = 1 < 2
    assert!(!is_profitable("k", 2, "a"));
    // 3 * 1 = 3 < 2 * 2 = 4
    assert!(!is_profitable("kkk", 2, "a0"));
    // 4 * 1 = 4, not < 4
    assert!(is_profitable("kkkk", 2, "a0"));
}

#[test]
fn empty_key_is_never_profitable() {
    assert!(!is_profitable("", 1000, "a"));
}

#[test]
fn key_length_counts_characters_not_bytes() {
    // "éé" is two characters (four bytes): 2 * 1 = 2, not < 2
    assert!(is_profitable("éé", 2, "a"));
    // "é" is one character: 1 * 1 = 1 < 2
    assert!(!is_profitable("é", 2, "a"));
}

#[test]
fn derived_legend_matches_filter_on_literal_fixture() {
    let tree = value(json!([
        {"abcde": 1, "k": 1, "kk": 1, "once-only-long-key": 1},
        {"abcde": 2, "k": 2, "kk": 2},
        {"abcde": 3, "k": 3}
    ]));
    let legend = derive_legend(&tree);
    // abcde x3 -> "a", k x3 (1*2 >= 1*2) -> "b", kk x2 (2*1 >= 1*2) -> "c"
    assert_eq!(legend.get("abcde"), Some("a"));
    assert_eq!(legend.get("k"), Some("b"));
    assert_eq!(legend.get("kk"), Some("c"));
    assert_eq!(legend.get("once-only-long-key"), None);
    assert_eq!(legend.len(), 3);
}

#[test]
fn skipped_key_releases_its_identifier() {
    // "rare" is probed first and offered "a", but appears once; "common"
    // must then receive "a", not "b".
    let tree = value(json!([{"rare": 1, "common": 1}, {"common": 2}]));
    let legend = derive_legend(&tree);
    assert_eq!(legend.get("rare"), None);
    assert_eq!(legend.get("common"), Some("a"));
}

// ============================================================================
// Legend derivation
// ============================================================================

#[test]
fn legend_follows_first_observed_order() {
    let tree = value(json!([
        {"zebra": 1, "apple": 1},
        {"zebra": 2, "apple": 2}
    ]));
    let legend = derive_legend(&tree);
    assert_eq!(legend.get("zebra"), Some("a"));
    assert_eq!(legend.get("apple"), Some("b"));
}

#[test]
fn identifiers_skip_existing_keys() {
    let tree = value(json!([
        {"a": 1, "b": 2, "long-key": 1},
        {"long-key": 2}
    ]));
    let legend = derive_legend(&tree);
    assert_eq!(legend.get("long-key"), Some("c"));
}

#[test]
fn reserved_letters_force_two_character_identifiers() {
    let legend = derive_legend(&value(reserved_letters_fixture()));
    assert_eq!(legend.get("very-long-name"), Some("a0"));
    assert_eq!(legend.get("very-long-name-2"), Some("a1"));
    assert_eq!(legend.len(), 2);
}

#[test]
fn derived_legend_is_a_bijection_avoiding_original_keys() {
    let tree = value(reserved_letters_fixture());
    let census = KeyCensus::of(&tree);
    let legend = derive_legend(&tree);

    let shorts: HashSet<&str> = legend.iter().map(|(_, short)| short).collect();
    assert_eq!(shorts.len(), legend.len(), "short keys must be distinct");
    for (original, short) in legend.iter() {
        assert!(!short.is_empty());
        assert!(
            !census.contains(short),
            "short key {short} for {original} collides with an original key"
        );
    }
}

#[test]
fn derivation_is_deterministic() {
    let tree = value(reserved_letters_fixture());
    assert_eq!(derive_legend(&tree), derive_legend(&tree));
}

#[test]
fn many_profitable_keys_roll_over_to_two_characters() {
    let mut first = serde_json::Map::new();
    for i in 0..30 {
        first.insert(format!("field-number-{i}"), json!(i));
    }
    let tree = value(json!([first.clone(), first]));
    let legend = derive_legend(&tree);
    assert_eq!(legend.len(), 30);
    assert_eq!(legend.get("field-number-0"), Some("a"));
    assert_eq!(legend.get("field-number-25"), Some("z"));
    assert_eq!(legend.get("field-number-26"), Some("a0"));
    assert_eq!(legend.get("field-number-29"), Some("a3"));
}

// ============================================================================
// Rewriting
// ============================================================================

#[test]
fn end_to_end_example_rewrites_top_level_key() {
    let input = json!({"very-long-name": {"very-long-name": "x", "very-long-name-2": 2}});
    let tree = value(input.clone());
    let minified = minify(&tree);

    let short = minified.legend.get("very-long-name").unwrap();
    assert!(minified.legend.get("very-long-name-2").is_none());
    let top_keys: Vec<&String> = minified.tree.as_object().unwrap().keys().collect();
    assert_eq!(top_keys, vec![short]);

    let restored = unminify(minified.tree.clone(), Some(&minified.legend.inverted()));
    assert_eq!(plain(&restored), input);
}

#[test]
fn end_to_end_example_with_repeated_second_key() {
    let input = json!({
        "very-long-name": {"very-long-name": "x", "very-long-name-2": 2},
        "other": {"very-long-name-2": 3}
    });
    let minified = minify(&value(input.clone()));
    assert_eq!(minified.legend.get("very-long-name"), Some("a"));
    assert_eq!(minified.legend.get("very-long-name-2"), Some("b"));
    assert_eq!(
        plain(&minified.tree),
        json!({"a": {"a": "x", "b": 2}, "other": {"b": 3}})
    );
}

#[test]
fn rewriting_preserves_key_positions() {
    let tree = value(json!([
        {"first": 1, "long-key": 2, "last": 3},
        {"long-key": 4}
    ]));
    let minified = minify(&tree);
    let keys: Vec<&String> = minified.tree.as_array().unwrap()[0]
        .as_object()
        .unwrap()
        .keys()
        .collect();
    assert_eq!(keys, vec!["first", "a", "last"]);
}

#[test]
fn values_are_never_rewritten() {
    let tree = value(json!([{"long-key": "long-key"}, {"long-key": ["long-key"]}]));
    let minified = minify(&tree);
    assert_eq!(
        plain(&minified.tree),
        json!([{"a": "long-key"}, {"a": ["long-key"]}])
    );
}

#[test]
fn minify_leaves_input_untouched() {
    let tree = value(json!([{"long-key": 1}, {"long-key": 2}]));
    let before = tree.clone();
    let minified = minify(&tree);
    assert_eq!(tree, before);
    assert_ne!(minified.tree, tree);
}

#[test]
fn opaque_leaves_are_copied_not_rewritten() {
    let date = Value::date_from_millis(1_669_902_255_177).unwrap();
    let mut map = jsonkit_core::Map::new();
    map.insert("timestamp".to_string(), date.clone());
    let tree = Value::Array(vec![Value::Object(map.clone()), Value::Object(map)]);
    let minified = minify(&tree);
    let first = &minified.tree.as_array().unwrap()[0];
    assert_eq!(first.get("a"), Some(&date));
}

#[test]
fn nothing_profitable_yields_identical_tree_and_empty_legend() {
    let tree = value(json!({"a": 1, "b": [1, 2, {"c": 3}]}));
    let minified = minify(&tree);
    assert!(minified.legend.is_empty());
    assert_eq!(minified.tree, tree);
}

#[test]
fn empty_string_key_is_kept() {
    let tree = value(json!([{"": 1, "long-key": 1}, {"": 2, "long-key": 2}]));
    let minified = minify(&tree);
    assert_eq!(minified.legend.get(""), None);
    assert_eq!(plain(&minified.tree), json!([{"": 1, "a": 1}, {"": 2, "a": 2}]));
}

// ============================================================================
// Caller-supplied legends
// ============================================================================

#[test]
fn supplied_legend_is_used_verbatim() {
    let legend = Legend::from_pairs([("very-long-name", "vln")]).unwrap();
    // Appears once: a derived legend would skip it; a supplied one does not.
    let tree = value(json!({"very-long-name": 1, "other": 2}));
    let rewritten = minify_with(&tree, &legend);
    assert_eq!(plain(&rewritten), json!({"vln": 1, "other": 2}));
}

#[test]
fn supplied_legend_only_touches_listed_keys() {
    let legend = Legend::from_pairs([("x", "y")]).unwrap();
    let tree = value(json!([{"x": {"x": 1, "z": 2}}, {"w": 3}]));
    let rewritten = minify_with(&tree, &legend);
    assert_eq!(plain(&rewritten), json!([{"y": {"y": 1, "z": 2}}, {"w": 3}]));
}

#[test]
fn supplied_short_key_wins_over_sibling_listed_after_it() {
    let legend = Legend::from_pairs([("long", "l")]).unwrap();
    let tree = value(json!({"long": "renamed", "l": "sibling"}));
    assert_eq!(plain(&minify_with(&tree, &legend)), json!({"l": "renamed"}));
}

#[test]
fn supplied_short_key_wins_over_sibling_listed_before_it() {
    let legend = Legend::from_pairs([("long", "l")]).unwrap();
    let tree = value(json!({"l": "sibling", "long": "renamed", "z": 1}));
    let rewritten = minify_with(&tree, &legend);
    let keys: Vec<&String> = rewritten.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["l", "z"]);
    assert_eq!(plain(&rewritten), json!({"l": "renamed", "z": 1}));
}

#[test]
fn supplied_legend_must_be_injective() {
    let err = Legend::from_pairs([("first", "f"), ("second", "f")]).unwrap_err();
    assert!(err.to_string().contains("\"f\""));
}

#[test]
fn supplied_legend_rejects_empty_targets() {
    assert!(Legend::from_pairs([("first", "")]).is_err());
}

// ============================================================================
// Envelope
// ============================================================================

#[test]
fn envelope_holds_tree_and_inverted_legend() {
    let tree = value(json!([{"long-key": 1}, {"long-key": 2}]));
    let envelope = minify(&tree).into_envelope();
    assert_eq!(
        plain(&envelope),
        json!({"_jkv": [{"a": 1}, {"a": 2}], "_jkm": {"a": "long-key"}})
    );
}

#[test]
fn envelope_of_unprofitable_tree_has_empty_legend() {
    let tree = value(json!({"k": 1}));
    let envelope = minify(&tree).into_envelope();
    assert_eq!(plain(&envelope), json!({"_jkv": {"k": 1}, "_jkm": {}}));
}
