// tests/decode.rs
//
// Decoder behaviour on state payloads shaped like the live site's.
//
use serde_json::{json, Value};
use thesaurus_scrape::decode::{self, decode, decode_state, isolate_payload};
use thesaurus_scrape::ScrapeError;

const SCRIPT: &str = r#"window.INITIAL_STATE = {
    config: {apiHost: 'https:\/\/tuna.thesaurus.com', ads: undefined, features: [1, 2, 3,],},
    "searchData": {
        tunaApiData: {
            entry: "caf\u00e9",
            emoji: "\ud83d\ude00",
            quote: 'it\'s',
            thesRid: undefined,
        },
    },
};"#;

#[test]
fn decodes_site_shaped_payload() {
    let v = decode_state(SCRIPT).unwrap();
    assert_eq!(v["config"]["apiHost"], json!("https://tuna.thesaurus.com"));
    assert_eq!(v["config"]["features"], json!([1, 2, 3]));
    assert_eq!(v["searchData"]["tunaApiData"]["quote"], json!("it's"));
}

#[test]
fn undefined_becomes_null_in_place() {
    let v = decode_state(SCRIPT).unwrap();
    let config = v["config"].as_object().unwrap();
    assert!(config.contains_key("ads"));
    assert_eq!(config["ads"], Value::Null);
    assert_eq!(v["searchData"]["tunaApiData"]["thesRid"], Value::Null);
    assert_eq!(decode("[undefined, {a: undefined}]").unwrap(), json!([null, {"a": null}]));
}

#[test]
fn escaped_non_ascii_is_one_character() {
    let v = decode_state(SCRIPT).unwrap();
    let entry = v["searchData"]["tunaApiData"]["entry"].as_str().unwrap();
    assert_eq!(entry, "café");
    assert_eq!(entry.chars().count(), 4);

    let emoji = v["searchData"]["tunaApiData"]["emoji"].as_str().unwrap();
    assert_eq!(emoji, "\u{1F600}");
    assert_eq!(emoji.chars().count(), 1);

    // Already-literal non-ASCII passes through untouched.
    assert_eq!(decode("'naïve – ok'").unwrap(), json!("naïve – ok"));
}

#[test]
fn reserialized_state_decodes_to_the_same_value() {
    let v = decode_state(SCRIPT).unwrap();
    let text = decode::to_pretty_json(&v).unwrap();
    assert_eq!(decode(&text).unwrap(), v);

    let mixed = json!({
        "n": [0, -1, 18446744073709551615u64, 1.5, -2.25e-8, 1e300],
        "s": "tab\tquote\"back\\slash\u{1}nul\u{0}",
        "b": [true, false, null],
        "nested": {"": {"deep": [[], {}]}},
    });
    let compact = serde_json::to_string(&mixed).unwrap();
    assert_eq!(decode(&compact).unwrap(), mixed);
}

#[test]
fn missing_assignment_is_extraction_error() {
    let err = isolate_payload("window.OTHER_STATE = {};").unwrap_err();
    assert!(matches!(err, ScrapeError::Extraction(_)));
}

#[test]
fn grammar_violation_is_decode_error() {
    for bad in [
        "window.INITIAL_STATE = {a: NaN};",
        "window.INITIAL_STATE = {a: 1 b: 2};",
        "window.INITIAL_STATE = {a: 'unterminated};",
        "window.INITIAL_STATE = {a: [1, 2};",
    ] {
        match decode_state(bad) {
            Err(ScrapeError::Decode { line, column, .. }) => assert!(line >= 1 && column >= 1),
            other => panic!("{bad}: unexpected {other:?}"),
        }
    }
}

#[test]
fn debug_dump_is_valid_json() {
    let dir = std::env::temp_dir().join("thesaurus_scrape_dump_test");
    let _ = std::fs::remove_dir_all(&dir);
    let path = dir.join("nested").join("example.json");

    let v = decode_state(SCRIPT).unwrap();
    decode::write_debug_dump(&path, &v).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\n  \"config\""));
    let strict: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(strict, v);
}
