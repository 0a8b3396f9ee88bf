use crate::{LineIndex, Position};

#[test]
fn first_line_offsets() {
    let index = LineIndex::new(r#"{"a": 1}"#);

    assert_eq!(
        index.position(0),
        Position {
            row: 0,
            col: 0,
            char_offset: 0
        }
    );
    assert_eq!(index.position(6).to_string(), "0:6:6");
}

#[test]
fn rows_start_after_newline() {
    let source = "{\n  \"a\": 1\n}";
    let index = LineIndex::new(source);

    assert_eq!(index.line_count(), 3);
    assert_eq!(index.position(2).to_string(), "1:0:2");
    assert_eq!(index.position(4).to_string(), "1:2:4");
    assert_eq!(index.position(source.len() - 1).to_string(), "2:0:11");
}

#[test]
fn columns_count_characters_not_bytes() {
    let source = r#"{"é": ü}"#;
    let index = LineIndex::new(source);

    let u_offset = source.find('ü').unwrap();
    assert_eq!(u_offset, 7);
    assert_eq!(index.position(u_offset).to_string(), "0:6:6");
}

#[test]
fn offsets_clamp_and_snap() {
    let source = "aé";
    let index = LineIndex::new(source);

    assert_eq!(index.position(100), index.end());
    assert_eq!(index.end().to_string(), "0:2:2");
    // byte 2 is inside `é`
    assert_eq!(index.position(2).to_string(), "0:1:1");
}

#[test]
fn empty_source() {
    let index = LineIndex::new("");

    assert_eq!(index.line_count(), 1);
    assert_eq!(index.end(), Position::default());
}

#[test]
fn position_serializes_as_struct() {
    let pos = LineIndex::new("ab\nc").position(3);
    let json = serde_json::to_string(&pos).unwrap();

    assert_eq!(json, r#"{"row":1,"col":0,"char_offset":3}"#);
}
