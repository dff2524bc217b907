/// Unminifier: envelope detection, embedded and supplied legends, pass-through.
use jsonkit_core::envelope::{self, LEGEND_KEY, VALUE_KEY};
use jsonkit_core::{minify, unminify, Legend, Value};
use serde_json::json;

fn value(json: serde_json::Value) -> Value {
    Value::from(json)
}

fn plain(value: Value) -> serde_json::Value {
    serde_json::Value::from(value)
}

/// Expected decoding of the minified fixtures below.
fn original_object() -> serde_json::Value {
    json!({
        "very-long-name": {
            "very-long-name": "very-long-name",
            "very-long-name-2": 2
        },
        "arr": [
            {"very-long-name": {"very-long-name": "very-long-name"}},
            {"very-long-name-2": true}
        ],
        "normal": "string"
    })
}

// ============================================================================
// Pass-through
// ============================================================================

#[test]
fn plain_object_passes_through() {
    let out = unminify(value(json!({"foo": 1})), None);
    assert_eq!(plain(out), json!({"foo": 1}));
}

#[test]
fn scalars_and_arrays_pass_through() {
    for json in [json!(null), json!(42), json!("s"), json!([{"a": 1}])] {
        assert_eq!(plain(unminify(value(json.clone()), None)), json);
    }
}

#[test]
fn half_an_envelope_passes_through() {
    let only_value = json!({"_jkv": {"a": 1}});
    assert_eq!(plain(unminify(value(only_value.clone()), None)), only_value);

    let only_legend = json!({"_jkm": {"a": "long"}});
    assert_eq!(plain(unminify(value(only_legend.clone()), None)), only_legend);
}

#[test]
fn envelope_around_null_unwraps_to_null() {
    let wire = json!({"_jkv": null, "_jkm": {}});
    assert!(envelope::is_envelope(&value(wire.clone())));
    assert_eq!(unminify(value(wire.clone()), None), Value::Null);

    let legend = Legend::from_pairs([("a", "long")]).unwrap();
    assert_eq!(unminify(value(wire), Some(&legend)), Value::Null);
}

#[test]
fn null_legend_member_still_counts_as_envelope() {
    let wire = json!({"_jkv": {"a": 1}, "_jkm": null});
    assert_eq!(plain(unminify(value(wire), None)), json!({"a": 1}));
}

// ============================================================================
// Embedded legend
// ============================================================================

#[test]
fn fixture_without_key_map() {
    let wire = json!({
        "_jkv": {
            "normal": "string",
            "a0": {"a0": "very-long-name", "a1": 2},
            "arr": [{"a0": {"a0": "very-long-name"}}, {"a1": true}]
        },
        "_jkm": {"a0": "very-long-name", "a1": "very-long-name-2"}
    });
    let out = plain(unminify(value(wire), None));
    // Key order differs from the input fixture; JSON equality ignores it.
    assert_eq!(out, original_object());
}

#[test]
fn envelope_unwraps_even_with_empty_legend() {
    let wire = json!({"_jkv": {"k": 1}, "_jkm": {}});
    assert_eq!(plain(unminify(value(wire), None)), json!({"k": 1}));
}

#[test]
fn embedded_legend_ignores_non_string_entries() {
    let wire = json!({
        "_jkv": {"a": 1, "b": 2, "c": 3},
        "_jkm": {"a": "alpha", "b": 7, "c": ""}
    });
    assert_eq!(
        plain(unminify(value(wire), None)),
        json!({"alpha": 1, "b": 2, "c": 3})
    );
}

#[test]
fn non_object_legend_still_unwraps() {
    let wire = json!({"_jkv": {"a": 1}, "_jkm": "not a legend"});
    assert_eq!(plain(unminify(value(wire), None)), json!({"a": 1}));
}

#[test]
fn nested_arrays_are_restored() {
    let wire = json!({
        "_jkv": [[{"a": [{"a": 1}]}]],
        "_jkm": {"a": "deep"}
    });
    assert_eq!(
        plain(unminify(value(wire), None)),
        json!([[{"deep": [{"deep": 1}]}]])
    );
}

// ============================================================================
// Supplied legend
// ============================================================================

#[test]
fn fixture_with_key_map() {
    let wire = json!({
        "_jkv": {
            "arr": [{"vln": {"vln": "very-long-name"}}, {"vln2": true}],
            "normal": "string",
            "vln": {"vln": "very-long-name", "vln2": 2}
        },
        "_jkm": {"vln": "very-long-name", "vln2": "very-long-name-2"}
    });
    let legend = Legend::from_pairs([("vln", "very-long-name"), ("vln2", "very-long-name-2")]).unwrap();
    assert_eq!(plain(unminify(value(wire), Some(&legend))), original_object());
}

#[test]
fn supplied_legend_overrides_embedded_one() {
    let wire = json!({"_jkv": {"a": 1}, "_jkm": {"a": "embedded"}});
    let legend = Legend::from_pairs([("a", "supplied")]).unwrap();
    assert_eq!(plain(unminify(value(wire), Some(&legend))), json!({"supplied": 1}));
}

#[test]
fn supplied_legend_works_on_bare_trees() {
    let tree = json!({"lk": "A Large Object", "other": 1});
    let legend = Legend::from_pairs([("lk", "long_key")]).unwrap();
    assert_eq!(
        plain(unminify(value(tree), Some(&legend))),
        json!({"long_key": "A Large Object", "other": 1})
    );
}

#[test]
fn restored_key_wins_over_sibling_listed_after_it() {
    let tree = json!({"vln": "renamed", "very-long-name": "sibling"});
    let legend = Legend::from_pairs([("vln", "very-long-name")]).unwrap();
    assert_eq!(
        plain(unminify(value(tree), Some(&legend))),
        json!({"very-long-name": "renamed"})
    );
}

#[test]
fn restored_key_wins_over_sibling_listed_before_it() {
    let tree = json!({"very-long-name": "sibling", "vln": "renamed", "z": 1});
    let legend = Legend::from_pairs([("vln", "very-long-name")]).unwrap();
    let restored = unminify(value(tree), Some(&legend));
    let keys: Vec<&String> = restored.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["very-long-name", "z"]);
    assert_eq!(plain(restored), json!({"very-long-name": "renamed", "z": 1}));
}

#[test]
fn partial_legend_leaves_unknown_keys_alone() {
    let tree = json!({"a": {"b": 1, "c": 2}});
    let legend = Legend::from_pairs([("b", "bravo")]).unwrap();
    assert_eq!(
        plain(unminify(value(tree), Some(&legend))),
        json!({"a": {"bravo": 1, "c": 2}})
    );
}

#[test]
fn supplied_legend_unwraps_value_without_embedded_legend() {
    let wire = json!({"_jkv": {"s": 1}});
    let legend = Legend::from_pairs([("s", "short")]).unwrap();
    assert_eq!(plain(unminify(value(wire), Some(&legend))), json!({"short": 1}));
}

// ============================================================================
// Inverse of minify
// ============================================================================

#[test]
fn unminify_inverts_minify_with_inverted_legend() {
    let input = value(original_object());
    let minified = minify(&input);
    let restored = unminify(minified.tree, Some(&minified.legend.inverted()));
    assert_eq!(restored, input);
}

#[test]
fn unminify_inverts_minify_through_envelope() {
    let input = value(original_object());
    let wrapped = minify(&input).into_envelope();
    assert!(envelope::is_envelope(&wrapped));
    assert!(wrapped.get(VALUE_KEY).is_some());
    assert!(wrapped.get(LEGEND_KEY).is_some());
    assert_eq!(unminify(wrapped, None), input);
}

#[test]
fn key_order_is_preserved_through_the_round_trip() {
    let input = value(original_object());
    let restored = unminify(minify(&input).into_envelope(), None);
    let keys: Vec<&String> = restored.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["very-long-name", "arr", "normal"]);
}
