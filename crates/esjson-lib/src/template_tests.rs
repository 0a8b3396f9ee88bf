use indoc::indoc;

use crate::parser::parse;
use crate::template::{TemplateError, generate, generate_root};

fn render(source: &str) -> String {
    let parse = parse(source, true);
    assert!(
        !parse.has_error(),
        "{}",
        parse.diagnostics().render(source)
    );
    generate_root(parse.tree()).unwrap()
}

#[test]
fn scalars() {
    assert_eq!(render("null"), "null");
    assert_eq!(render("true"), "true");
    assert_eq!(render("-12"), "-12");
    assert_eq!(render("1.50"), "1.5");
    assert_eq!(render(r#""a\"b""#), r#""a\"b""#);
}

#[test]
fn out_of_range_numbers_keep_their_literal() {
    assert_eq!(render(r#"{"big": [1e400, -1E+999]}"#), r#"{ "big":[1e400,-1E+999] }"#);
}

#[test]
fn objects_are_padded() {
    insta::assert_snapshot!(render(r#"{"a": 1, "b": [true, null, "x"]}"#), @r#"{ "a":1,"b":[true,null,"x"] }"#);
    insta::assert_snapshot!(render("{}"), @"{  }");
    insta::assert_snapshot!(render(r#"{"a": {"b": {}}}"#), @r#"{ "a":{ "b":{  } } }"#);
}

#[test]
fn arrays_are_compact() {
    assert_eq!(render("[ ]"), "[]");
    assert_eq!(render("[1, [2, [3]]]"), "[1,[2,[3]]]");
}

#[test]
fn parameters_become_markers() {
    insta::assert_snapshot!(
        render(r#"{"size": {{#toJson}}size{{/toJson}}, "ids": [{{#toJson}}id{{/toJson}}]}"#),
        @r#"{ "size":{{#toJson}}size{{/toJson}},"ids":[{{#toJson}}id{{/toJson}}] }"#
    );
}

#[test]
fn parameter_round_trips_exactly() {
    let source = "{{#toJson}}x{{/toJson}}";
    assert_eq!(render(source), source);
}

#[test]
fn strings_are_reescaped() {
    assert_eq!(
        render(r#"{"kéy": "line\nbreak\ttab"}"#),
        r#"{ "kéy":"line\nbreak\ttab" }"#
    );
}

#[test]
fn subtree() {
    let parse = parse(r#"{"outer": {"inner": [1, 2]}}"#, true);
    let tree = parse.tree();
    let outer = tree.property(parse.root().unwrap(), "outer").unwrap();
    assert_eq!(generate(tree, outer).unwrap(), r#"{ "inner":[1,2] }"#);
}

#[test]
fn round_trip() {
    let source = indoc! {r#"
    {
      "query": {"bool": {"must": [{"term": {"user": "kimchy"}}, {"range": {"age": {"gte": 10}}}]}},
      "sort": [{"date": "desc"}, "_score"],
      "size": {{#toJson}}size{{/toJson}},
      "empty": {},
      "none": null,
      "ratio": 0.25
    }
    "#};

    let first = parse(source, true);
    assert!(!first.has_error());
    let template = generate_root(first.tree()).unwrap();

    let second = parse(&template, true);
    assert!(!second.has_error(), "{}", second.diagnostics().render(&template));
    assert!(first.tree().structurally_eq(
        first.root().unwrap(),
        second.tree(),
        second.root().unwrap()
    ));
    // Generating is stable.
    assert_eq!(generate_root(second.tree()).unwrap(), template);
}

#[test]
fn missing_property_value_fails() {
    let parse = parse(r#"{"ok": 1, "broken": oops}"#, true);
    let err = generate_root(parse.tree()).unwrap_err();
    assert!(matches!(
        &err,
        TemplateError::MissingPropertyValue { property } if property == "broken"
    ));
    assert_eq!(err.to_string(), "property `broken` has no value");
}

#[test]
fn missing_value_deep_in_tree_fails() {
    let parse = parse(r#"[{"a": [{"b": }]}]"#, true);
    assert!(matches!(
        generate_root(parse.tree()),
        Err(TemplateError::MissingPropertyValue { .. })
    ));
}

#[test]
fn empty_tree_fails() {
    let parse = parse("", false);
    assert!(matches!(
        generate_root(parse.tree()),
        Err(TemplateError::EmptyTree)
    ));
}
