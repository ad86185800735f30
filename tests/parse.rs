use arena_json::{parse, parse_str, Document, ParseErrorKind, Value};
use rstest::rstest;

#[rstest]
#[case("0", true)]
#[case("-0", true)]
#[case("1", false)]
#[case("-1", true)]
#[case("  0  ", true)]
fn integers_pick_the_signed_variant_only_when_needed(#[case] text: &str, #[case] is_int: bool) {
    let doc = parse_str(text).unwrap();
    assert!(doc.root().is_number());
    assert_eq!(doc.root().is_int(), is_int);
    assert_eq!(doc.root().is_uint(), !is_int);
}

#[test]
fn unsigned_range_edges() {
    let doc = parse_str("18446744073709551615").unwrap();
    assert_eq!(doc.root().get::<u64>(), Ok(u64::MAX));

    let err = parse_str("18446744073709551616").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::NumberOverflow);
}

#[test]
fn signed_range_edges() {
    let doc = parse_str("-9223372036854775808").unwrap();
    assert_eq!(doc.root().get::<i64>(), Ok(i64::MIN));

    let err = parse_str("-9223372036854775809").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::NumberOverflow);
}

#[rstest]
#[case("5.972E+24", 5.972e24)]
#[case("-5.972E+24", -5.972e24)]
#[case("9.109e-31", 9.109e-31)]
#[case("-9.109e-31", -9.109e-31)]
#[case("-1e1", -10.0)]
#[case("1.2", 1.2)]
#[case("-0.0e0", -0.0)]
#[case("-0.0E0", -0.0)]
#[case("-0.0E+000001", -0.0)]
fn doubles(#[case] text: &str, #[case] expected: f64) {
    let doc = parse_str(text).unwrap();
    assert!(doc.root().is_float());
    let got = doc.root().get::<f64>().unwrap();
    assert_eq!(got.to_bits(), expected.to_bits());
}

#[rstest]
#[case("")]
#[case("-")]
#[case("-0.0e")]
#[case("-0.0ee")]
#[case("1.2,")]
#[case("01")]
#[case("1e")]
#[case("+1")]
#[case(".5")]
fn rejected_numbers_and_garbage(#[case] text: &str) {
    assert!(parse_str(text).is_err());
}

#[test]
fn whitespace_is_space_tab_cr_lf_only() {
    assert!(parse_str("               ").is_err());
    assert!(parse_str(" \n\r\t1 \n\r\t").is_ok());
    // Vertical tab is not whitespace.
    assert!(parse_str("\x0b1").is_err());
}

#[test]
fn a_leading_bom_is_a_syntax_error() {
    let err = parse(b"\xEF\xBB\xBF1").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    assert_eq!(err.offset, 0);
}

#[rstest]
#[case(r#""""#, "")]
#[case(r#""\n""#, "\n")]
#[case(r#""\\n""#, "\\n")]
#[case(r#""HelloWorld""#, "HelloWorld")]
#[case(r#""HelloWorld\n""#, "HelloWorld\n")]
fn strings(#[case] text: &str, #[case] expected: &str) {
    let doc = parse_str(text).unwrap();
    assert_eq!(doc.root().get::<String>(), Ok(expected.to_owned()));
}

#[test]
fn keywords_parse_whole_words_only() {
    assert!(parse_str(" null ").unwrap().root().is_null());
    assert_eq!(parse_str(" true ").unwrap().root().as_bool(), Some(true));
    assert_eq!(parse_str(" false ").unwrap().root().as_bool(), Some(false));

    for bad in [
        "n", "nu", "nul", "xull", "nxll", "nuxl", "nulx", "nullx", "f", "fa", "fal", "xalse",
        "fxlse", "faxse", "falxe", "falsx", "falsex", "t", "tr", "tru", "xrue", "txue", "trxe",
        "trux", "truex",
    ] {
        assert!(parse_str(bad).is_err(), "{bad:?} should not parse");
    }
}

#[test]
fn arrays() {
    let doc = parse_str("[]").unwrap();
    assert!(doc.root().is_array());
    assert!(doc.root().is_empty());

    assert!(parse_str("[").is_err());
    assert!(parse_str("]").is_err());
    assert!(parse_str("[1, true, false]").is_ok());
    assert!(parse_str("[\"hi\", true, false]").is_ok());
    assert!(parse_str("[1, true, false, [1.2, false, []]]").is_ok());
    assert!(parse_str("[{\"hi\": true}, false]").is_ok());
}

#[test]
fn array_element_extraction() {
    let doc = parse_str("[1, true, false]").unwrap();
    let root = doc.root();
    assert_eq!(root.len(), 3);
    assert_eq!(root[0].get::<u64>(), Ok(1));
    assert_eq!(root[1].get::<bool>(), Ok(true));
    assert_eq!(root[2].get::<bool>(), Ok(false));
}

#[test]
fn objects() {
    let doc = parse_str("{}").unwrap();
    assert!(doc.root().is_object());

    assert!(parse_str("{").is_err());
    assert!(parse_str("}").is_err());
    assert!(parse_str(r#"{"key": true, "key2": false, "key3": null, "key4": 123}"#).is_ok());
    assert!(parse_str(r#"{"key": true, "key2": {"key3": null, "key4": 123}}"#).is_ok());
    assert!(parse_str(r#"{"key": true, "key2": [null, "key4", 123]}"#).is_ok());
    assert!(parse_str(r#"[{"key": true}, {"key2": [null, "str4", 123]}]"#).is_ok());
}

#[test]
fn object_member_access_preserves_insertion_order() {
    let doc = parse_str(r#"{"a":1,"b":[2,3]}"#).unwrap();
    let root = doc.root();
    let keys: Vec<&str> = root.items().map(|(k, _)| k).collect();
    assert_eq!(keys, ["a", "b"]);
    assert_eq!(root["b"][1].get::<u64>(), Ok(3));
}

#[test]
fn duplicate_keys_are_preserved_as_distinct_pairs() {
    let doc = parse_str(r#"{"k":1,"k":2}"#).unwrap();
    let root = doc.root();
    assert_eq!(root.len(), 2);
    // Lookup by key sees the first match.
    assert_eq!(root["k"].get::<u64>(), Ok(1));
    assert_eq!(root.dump(), r#"{"k":1,"k":2}"#);
}

#[rstest]
#[case("[1 2]", ParseErrorKind::ExpectedComma)]
#[case("[1,]", ParseErrorKind::UnexpectedToken)]
#[case("[1,,2]", ParseErrorKind::UnexpectedToken)]
#[case("{\"a\":1,}", ParseErrorKind::ExpectedKeyString)]
#[case("{\"a\" 1}", ParseErrorKind::ExpectedColon)]
#[case("{\"a\":1 \"b\":2}", ParseErrorKind::ExpectedComma)]
#[case("{1:2}", ParseErrorKind::ExpectedKeyString)]
#[case("{\"a\":}", ParseErrorKind::UnexpectedToken)]
#[case("1 1", ParseErrorKind::TrailingGarbage)]
#[case("[] []", ParseErrorKind::TrailingGarbage)]
#[case("\"x\"y", ParseErrorKind::TrailingGarbage)]
fn structural_errors(#[case] text: &str, #[case] kind: ParseErrorKind) {
    assert_eq!(parse_str(text).unwrap_err().kind, kind);
}

#[test]
fn error_offsets_point_at_the_stopping_byte() {
    let err = parse_str("[").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnexpectedEndOfInput);
    assert_eq!(err.offset, 1);

    let err = parse_str("[1, x]").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    assert_eq!(err.offset, 4);

    let err = parse_str("{\"a\"").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::ExpectedColon);
    assert_eq!(err.offset, 4);
}

#[test]
fn agrees_with_serde_json_on_plain_documents() {
    let corpus = [
        r#"{"key": true, "key2": {"key3": null, "key4": 123}}"#,
        r#"[{"key": true}, {"key2": [null, "str4", 123]}]"#,
        r#"[0, -1, 18446744073709551615, -9223372036854775808, 1.5, -2.25e10]"#,
        r#"{"text": "a\u0041\n\t\"quoted\" \\ done", "empty": {}}"#,
        r#"[[[[["deep"]]]]]"#,
    ];
    for text in corpus {
        let ours = parse_str(text).unwrap();
        let theirs: serde_json::Value = serde_json::from_str(text).unwrap();
        let reparsed: serde_json::Value = serde_json::from_str(&ours.dump()).unwrap();
        assert_eq!(theirs, reparsed, "mismatch for {text}");
    }
}

#[test]
fn rejects_what_serde_json_rejects_on_common_malformed_inputs() {
    let corpus = [
        "", "[", "]", "{", "}", "[1,]", "{\"a\":1,}", "nul", "tru", "{\"a\"}", "[01]", "\"",
        "\"\\q\"", "1 2",
    ];
    for text in corpus {
        assert!(parse_str(text).is_err(), "{text:?} should fail");
        assert!(serde_json::from_str::<serde_json::Value>(text).is_err());
    }
}

#[test]
fn document_reports_arena_usage() {
    let doc: Document = parse(br#"{"k":"a string that is certainly in the arena"}"#).unwrap();
    assert!(doc.arena_size() > 0);
}

#[test]
fn scalar_roots() {
    assert!(parse_str("null").unwrap().root().is_null());
    assert_eq!(parse_str("\"s\"").unwrap().root().as_str(), Some("s"));
    assert_eq!(
        parse_str("5.972E+24").unwrap().root().get::<f64>(),
        Ok(5.972e24)
    );
    let v: Value = Value::from(1u64);
    assert_eq!(parse_str("1").unwrap().root(), &v);
}
