use serde_json::{Value, json};

use crate::parser::{Parse, ParseOptions, parse};

#[test]
fn truncated_mid_array() {
    let root = Parse::expect_fragment(r#"{"name": "Steven", "age": 21, "favNums": [1,2,"#);
    assert_eq!(
        root,
        Some(json!({"name": "Steven", "age": 21, "favNums": [1, 2]}))
    );
}

#[test]
fn truncated_after_nested_colon() {
    let root = Parse::expect_fragment(r#"{"hi": {"omg":"#);
    assert_eq!(root, Some(json!({})));
}

#[test]
fn truncated_after_last_colon() {
    let root = Parse::expect_fragment(r#"{"omg": 24, "bye": true, "same": "string", "omg2":"#);
    assert_eq!(
        root,
        Some(json!({"omg": 24, "bye": true, "same": "string"}))
    );
}

#[test]
fn truncation_is_reported_on_the_parse() {
    let cut = parse(r#"{"a": 1, "b"#, false);
    assert!(cut.is_truncated());
    assert!(!cut.has_error());

    let whole = parse(r#"{"a": 1}"#, false);
    assert!(!whole.is_truncated());
}

#[test]
fn incomplete_scalars_are_dropped() {
    let tails = [
        "12",
        "-",
        "1.",
        "2e",
        "tr",
        "fals",
        "n",
        r#""unfinished"#,
        "{{#toJ",
        "{{#toJson}}",
        "{{#toJson}}x",
        "{{#toJson}}x{",
        "{{#toJson}}x{{/to",
    ];
    for tail in tails {
        let source = format!(r#"{{"keep": true, "drop": {tail}"#);
        assert_eq!(
            Parse::expect_fragment(&source),
            Some(json!({"keep": true})),
            "tail: {tail}"
        );
    }
}

#[test]
fn complete_scalars_at_end_are_kept() {
    assert_eq!(
        Parse::expect_fragment(r#"{"a": true"#),
        Some(json!({"a": true}))
    );
    assert_eq!(
        Parse::expect_fragment(r#"{"a": null"#),
        Some(json!({"a": null}))
    );
    assert_eq!(
        Parse::expect_fragment(r#"{"a": "done""#),
        Some(json!({"a": "done"}))
    );
    // Whitespace after a number proves it ended.
    assert_eq!(
        Parse::expect_fragment(r#"{"a": 12 "#),
        Some(json!({"a": 12}))
    );
}

#[test]
fn dangling_key_is_dropped() {
    assert_eq!(Parse::expect_fragment(r#"{"a": 1, "b""#), Some(json!({"a": 1})));
    assert_eq!(Parse::expect_fragment(r#"{"a": 1, "b" "#), Some(json!({"a": 1})));
    assert_eq!(Parse::expect_fragment(r#"{"a": 1, "b"#), Some(json!({"a": 1})));
}

#[test]
fn nested_partial_containers() {
    assert_eq!(
        Parse::expect_fragment(r#"[1, {"b": 2}, {"c":"#),
        Some(json!([1, {"b": 2}]))
    );
    assert_eq!(
        Parse::expect_fragment("[1, [2, ["),
        Some(json!([1, [2]]))
    );
    assert_eq!(
        Parse::expect_fragment(r#"{"a": {"b": {"c": 1, "d":"#),
        Some(json!({"a": {"b": {"c": 1}}}))
    );
}

#[test]
fn root_container_is_always_kept() {
    assert_eq!(Parse::expect_fragment("{"), Some(json!({})));
    assert_eq!(Parse::expect_fragment("[ "), Some(json!([])));
}

#[test]
fn incomplete_root_scalar() {
    assert_eq!(Parse::expect_fragment(r#""abc"#), None);
    assert_eq!(Parse::expect_fragment("12"), None);
    assert_eq!(Parse::expect_fragment("true"), Some(json!(true)));
}

#[test]
fn unterminated_comment_is_a_cut_off_tail() {
    assert_eq!(
        Parse::expect_fragment(r#"{"a": 1, /* note"#),
        Some(json!({"a": 1}))
    );
}

#[test]
fn errors_before_the_cut_are_still_reported() {
    let parse = parse(r#"{"a": foo, "b": 1, "c":"#, false);
    assert_eq!(parse.errors().len(), 1);
    assert!(parse.is_truncated());

    let tree = parse.tree();
    let root = parse.root().unwrap();
    assert!(tree.property(root, "b").is_some());
    assert!(!tree.get(root).object_children().unwrap().contains_key("c"));
}

#[test]
fn every_prefix_parses_silently() {
    let document = r#"{"query": {"terms": {"id": [1, 2.5, -3e2, {{#toJson}}ids{{/toJson}}]}}, "explain": false, "note": "a \"b\" é", "x": null}"#;

    let mut previous_keys = 0;
    for (k, _) in document.char_indices().chain([(document.len(), ' ')]) {
        let prefix = &document[..k];
        let parse = parse(prefix, false);
        assert!(
            !parse.has_error(),
            "prefix {prefix:?} reported:\n{}",
            parse.diagnostics().render(prefix)
        );

        // Complete pairs never disappear as more input arrives.
        if let Some(root) = parse.root() {
            let keys = parse.tree().get(root).object_children().map_or(0, |p| p.len());
            assert!(keys >= previous_keys, "prefix {prefix:?} lost a key");
            previous_keys = keys;
        }
    }
    assert_eq!(previous_keys, 4);
}

#[test]
fn prefix_matches_its_complete_pairs() {
    let document = r#"{"a": [1, 2], "b": {"c": "x"}, "d": true}"#;
    let cut = document.find(r#""d""#).unwrap() + 5;
    let root = Parse::expect_fragment(&document[..cut]);
    let expected: Value = serde_json::from_str(r#"{"a": [1, 2], "b": {"c": "x"}}"#).unwrap();
    assert_eq!(root, Some(expected));
}

#[test]
fn fragments_can_be_forced_in_strict_mode() {
    let parse = ParseOptions::new()
        .wrap_in_parens(true)
        .fragments(Some(true))
        .parse(r#"{"a": 1, "b":"#);
    assert!(!parse.has_error());
    assert_eq!(parse.tree().root_json(), Some(json!({"a": 1})));
}
