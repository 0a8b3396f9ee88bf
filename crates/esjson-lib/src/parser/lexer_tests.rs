use super::lexer::{EscapeError, NumberShape, is_keyword_prefix, lex, number_shape, token_text, unescape};
use super::syntax_kind::SyntaxKind::{self, *};
use super::syntax_kind::TokenSet;
use super::syntax_kind::token_sets::{PARAM_RECOVERY, VALUE_FIRST, VALUE_RECOVERY};

fn snapshot(source: &str) -> String {
    lex(source)
        .iter()
        .map(|t| {
            format!(
                "{:?} {}..{} {:?}",
                t.kind,
                u32::from(t.span.start()),
                u32::from(t.span.end()),
                token_text(source, t)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn kinds(source: &str) -> Vec<SyntaxKind> {
    lex(source)
        .into_iter()
        .map(|t| t.kind)
        .filter(|k| !k.is_trivia())
        .collect()
}

#[test]
fn simple_object() {
    insta::assert_snapshot!(snapshot(r#"{"a": 1}"#), @r#"
    BraceOpen 0..1 "{"
    Str 1..4 "\"a\""
    Colon 4..5 ":"
    Whitespace 5..6 " "
    Number 6..7 "1"
    BraceClose 7..8 "}"
    "#);
}

#[test]
fn parameter_markers() {
    assert_eq!(
        kinds("{{#toJson}}size{{/toJson}}"),
        vec![ParamOpen, Ident, ParamClose]
    );
}

#[test]
fn parameter_inside_object() {
    assert_eq!(
        kinds(r#"{"q":{{#toJson}}q{{/toJson}}}"#),
        vec![BraceOpen, Str, Colon, ParamOpen, Ident, ParamClose, BraceClose]
    );
}

#[test]
fn partial_markers() {
    assert_eq!(kinds("{{"), vec![PartialMarker]);
    assert_eq!(kinds("{{#to"), vec![PartialMarker]);
    assert_eq!(kinds("{{/toJson}"), vec![PartialMarker]);
}

#[test]
fn keywords_and_identifiers() {
    assert_eq!(kinds("true false null"), vec![True, False, Null]);
    assert_eq!(kinds("tru nul truest"), vec![Ident, Ident, Ident]);
}

#[test]
fn numbers() {
    assert_eq!(kinds("0 -1 3.25 1e10 2E-3"), vec![Number; 5]);
    assert_eq!(kinds("01"), vec![MalformedNumber]);
    assert_eq!(kinds("1."), vec![MalformedNumber]);
    assert_eq!(kinds("-"), vec![MalformedNumber]);
    assert_eq!(kinds("2e+"), vec![MalformedNumber]);
}

#[test]
fn strings() {
    assert_eq!(kinds(r#""plain" "esc\"aped" "é""#), vec![Str; 3]);
    assert_eq!(kinds(r#""bad \q escape""#), vec![InvalidStr]);
    assert_eq!(kinds(r#""never closed"#), vec![UnterminatedStr]);
    assert_eq!(kinds(r#""ends in backslash\"#), vec![UnterminatedStr]);
}

#[test]
fn comments_are_trivia() {
    let source = "// line\n/* block */ 1 /* open";
    insta::assert_snapshot!(snapshot(source), @r#"
    LineComment 0..7 "// line"
    Newline 7..8 "\n"
    BlockComment 8..19 "/* block */"
    Whitespace 19..20 " "
    Number 20..21 "1"
    Whitespace 21..22 " "
    UnterminatedComment 22..29 "/* open"
    "#);
    assert_eq!(kinds(source), vec![Number]);
}

#[test]
fn garbage_coalesces() {
    insta::assert_snapshot!(snapshot("[=== 1]"), @r#"
    BracketOpen 0..1 "["
    Garbage 1..4 "==="
    Whitespace 4..5 " "
    Number 5..6 "1"
    BracketClose 6..7 "]"
    "#);
}

#[test]
fn garbage_at_end() {
    assert_eq!(kinds("1 %%"), vec![Number, Garbage]);
}

#[test]
fn multibyte_spans_are_bytes() {
    let tokens = lex(r#""é":1"#);
    assert_eq!(tokens[0].kind, Str);
    assert_eq!(u32::from(tokens[0].span.end()), 4);
    assert_eq!(tokens[1].start(), 4);
}

#[test]
fn unescape_json_escapes() {
    assert_eq!(unescape(r#"a\"b\\c\/d"#).unwrap(), "a\"b\\c/d");
    assert_eq!(unescape(r"\b\f\n\r\t").unwrap(), "\u{8}\u{c}\n\r\t");
    assert_eq!(unescape(r"\u00e9").unwrap(), "é");
}

#[test]
fn unescape_surrogates() {
    assert_eq!(unescape(r"\ud83d\ude00").unwrap(), "😀");
    assert_eq!(unescape(r"\ud83dx").unwrap(), "\u{FFFD}x");
    assert_eq!(unescape(r"\ude00").unwrap(), "\u{FFFD}");
}

#[test]
fn unescape_errors() {
    assert_eq!(unescape(r"\q"), Err(EscapeError::UnknownEscape('q')));
    assert_eq!(unescape(r"\u12"), Err(EscapeError::BadUnicode));
    assert_eq!(unescape("a\u{1}"), Err(EscapeError::ControlCharacter('\u{1}')));
    assert_eq!(
        EscapeError::UnknownEscape('q').to_string(),
        "invalid escape sequence `\\q`"
    );
}

#[test]
fn number_shapes() {
    for complete in ["0", "-0", "12", "1.5", "1e5", "1E+5", "-0.0e-1"] {
        assert_eq!(number_shape(complete), NumberShape::Complete, "{complete}");
    }
    for prefix in ["-", "1.", "1e", "1e-"] {
        assert_eq!(number_shape(prefix), NumberShape::Prefix, "{prefix}");
    }
    for invalid in ["", "01", "1.2.3", "--1", "1e5e"] {
        assert_eq!(number_shape(invalid), NumberShape::Invalid, "{invalid}");
    }
}

#[test]
fn keyword_prefixes() {
    assert!(is_keyword_prefix("t"));
    assert!(is_keyword_prefix("fals"));
    assert!(is_keyword_prefix("nu"));
    assert!(!is_keyword_prefix(""));
    assert!(!is_keyword_prefix("x"));
    assert!(!is_keyword_prefix("truex"));
}

#[test]
fn token_set_contains() {
    let set = TokenSet::new(&[Comma, Colon]);
    assert!(set.contains(Comma));
    assert!(set.contains(Colon));
    assert!(!set.contains(Str));
}

#[test]
fn token_set_union() {
    assert!(PARAM_RECOVERY.contains(ParamClose));
    assert!(PARAM_RECOVERY.contains(Comma));
    assert!(!VALUE_RECOVERY.contains(ParamClose));
    assert!(VALUE_FIRST.contains(ParamOpen));
    assert!(!VALUE_FIRST.contains(Ident));
}

#[test]
fn token_set_debug() {
    insta::assert_snapshot!(format!("{:?}", VALUE_RECOVERY), @"{BraceClose, BracketClose, Comma}");
}

#[test]
fn trivia_and_lexical_errors() {
    assert!(Whitespace.is_trivia());
    assert!(UnterminatedComment.is_trivia());
    assert!(!Str.is_trivia());
    assert!(Garbage.is_lexical_error());
    assert!(PartialMarker.is_lexical_error());
    assert!(!Number.is_lexical_error());
}
